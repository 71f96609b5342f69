use std::sync::Arc;
use std::time::Duration;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::create_user;
use super::handlers::delete_user;
use super::handlers::get_user;
use super::handlers::get_users;
use super::handlers::update_user;
use crate::domain::context::OperationContext;
use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;
use crate::proto::DeleteUserRequest;
use crate::proto::DeleteUserResponse;
use crate::proto::GetUserRequest;
use crate::proto::GetUserResponse;
use crate::proto::GetUsersRequest;
use crate::proto::GetUsersResponse;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;
use crate::user::errors::UserError;

pub struct UserGrpcService<S>
where
    S: UserServicePort,
{
    service: Arc<S>,
    request_timeout: Duration,
}

impl<S> UserGrpcService<S>
where
    S: UserServicePort,
{
    pub fn new(service: Arc<S>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    fn context(&self) -> OperationContext {
        OperationContext::with_timeout(self.request_timeout)
    }
}

/// Log the outcome of an RPC and convert it for tonic.
pub(crate) fn respond<T>(rpc: &'static str, result: Result<T, UserError>) -> Result<Response<T>, Status> {
    match result {
        Ok(response) => {
            tracing::debug!(rpc, "RPC succeeded");
            Ok(Response::new(response))
        }
        Err(e) => {
            tracing::debug!(rpc, error = %e, kind = ?e.kind(), "RPC failed");
            Err(e.into())
        }
    }
}

#[tonic::async_trait]
impl<S> UserServiceProto for UserGrpcService<S>
where
    S: UserServicePort,
{
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let ctx = self.context();
        let result = create_user::create_user(&*self.service, &ctx, request.into_inner()).await;
        respond("CreateUser", result)
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let ctx = self.context();
        let result = get_user::get_user(&*self.service, &ctx, request.into_inner()).await;
        respond("GetUser", result)
    }

    async fn get_users(
        &self,
        request: Request<GetUsersRequest>,
    ) -> Result<Response<GetUsersResponse>, Status> {
        let ctx = self.context();
        let result = get_users::get_users(&*self.service, &ctx, request.into_inner()).await;
        respond("GetUsers", result)
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let ctx = self.context();
        let result = update_user::update_user(&*self.service, &ctx, request.into_inner()).await;
        respond("UpdateUser", result)
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let ctx = self.context();
        let result = delete_user::delete_user(&*self.service, &ctx, request.into_inner()).await;
        respond("DeleteUser", result)
    }
}
