use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::grpc_user_server::respond;
use super::handlers::login;
use crate::domain::context::OperationContext;
use crate::domain::user::ports::UserServicePort;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub struct AuthGrpcService<S>
where
    S: UserServicePort,
{
    service: Arc<S>,
    request_timeout: Duration,
}

impl<S> AuthGrpcService<S>
where
    S: UserServicePort,
{
    pub fn new(service: Arc<S>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }
}

#[tonic::async_trait]
impl<S> AuthServiceProto for AuthGrpcService<S>
where
    S: UserServicePort,
{
    async fn login(&self, request: Request<LoginRequest>) -> Result<Response<LoginResponse>, Status> {
        let ctx = OperationContext::with_timeout(self.request_timeout);
        let result = login::login(&*self.service, &ctx, request.into_inner()).await;
        respond("Login", result)
    }
}
