use anyhow::Error;
use chrono::DateTime;
use chrono::Utc;
use tonic::transport::Channel;
use tonic::transport::Endpoint;
use tonic::Code;
use tonic::Request;
use tonic::Status;

use crate::domain::context::OperationContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserFilter;
use crate::domain::user::ports::UserServicePort;
use crate::proto::auth_service_client::AuthServiceClient;
use crate::proto::user_service_client::UserServiceClient;
use crate::proto::CreateUserRequest;
use crate::proto::DeleteUserRequest;
use crate::proto::GetUserRequest;
use crate::proto::GetUsersRequest;
use crate::proto::LoginRequest;
use crate::proto::UpdateUserRequest;

/// gRPC adapter for user-service.
///
/// Both clients share one channel; cloning a client per call is cheap.
#[derive(Clone)]
pub struct GrpcUserServiceClient {
    users: UserServiceClient<Channel>,
    auth: AuthServiceClient<Channel>,
}

impl GrpcUserServiceClient {
    /// Connect to user-service at `url`.
    pub async fn new(url: &str) -> Result<Self, Error> {
        let channel = Endpoint::from_shared(url.to_string())?.connect().await?;
        Ok(Self::from_channel(channel))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            users: UserServiceClient::new(channel.clone()),
            auth: AuthServiceClient::new(channel),
        }
    }
}

/// Wrap `message` with the context's remaining budget as its gRPC deadline.
fn request<T>(ctx: &OperationContext, message: T) -> Result<Request<T>, UserError> {
    if ctx.is_expired() {
        return Err(UserError::Internal("context deadline exceeded".to_string()));
    }

    let mut request = Request::new(message);
    if let Some(remaining) = ctx.remaining() {
        request.set_timeout(remaining);
    }
    Ok(request)
}

fn missing_user() -> UserError {
    UserError::Internal("user-service returned no user".to_string())
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, UserError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| UserError::Internal(format!("Invalid {field} from user-service: {e}")))
}

impl TryFrom<crate::proto::User> for User {
    type Error = UserError;

    fn try_from(user: crate::proto::User) -> Result<Self, Self::Error> {
        Ok(Self {
            created_at: parse_timestamp("created_at", &user.created_at)?,
            updated_at: parse_timestamp("updated_at", &user.updated_at)?,
            deleted_at: user
                .deleted_at
                .as_deref()
                .map(|at| parse_timestamp("deleted_at", at))
                .transpose()?,
            id: user.id,
            name: user.name,
            email: user.email,
            created_by: user.created_by,
        })
    }
}

impl From<Status> for UserError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();

        match status.code() {
            Code::InvalidArgument => UserError::InvalidArgument(message),
            Code::NotFound => UserError::NotFound(message),
            Code::AlreadyExists => UserError::Conflict(message),
            Code::Unauthenticated => UserError::Unauthenticated(message),
            code => {
                tracing::error!(code = ?code, message = %message, "user-service call failed");
                UserError::Internal(message)
            }
        }
    }
}

#[async_trait::async_trait]
impl UserServicePort for GrpcUserServiceClient {
    async fn create_user(&self, ctx: &OperationContext, user: NewUser) -> Result<User, UserError> {
        let request = request(
            ctx,
            CreateUserRequest {
                name: user.name,
                email: user.email.as_str().to_string(),
                password: user.password,
                created_by: user.created_by,
            },
        )?;

        let mut client = self.users.clone();
        let response = client.create_user(request).await?.into_inner();

        response.user.ok_or_else(missing_user)?.try_into()
    }

    async fn get_user(&self, ctx: &OperationContext, id: &str) -> Result<User, UserError> {
        let request = request(ctx, GetUserRequest { id: id.to_string() })?;

        let mut client = self.users.clone();
        let response = client.get_user(request).await?.into_inner();

        response.user.ok_or_else(missing_user)?.try_into()
    }

    async fn list_users(
        &self,
        ctx: &OperationContext,
        filter: UserFilter,
    ) -> Result<Vec<User>, UserError> {
        let request = request(
            ctx,
            GetUsersRequest {
                id: None,
                name: filter.name,
                email: filter.email.map(|email| email.as_str().to_string()),
            },
        )?;

        let mut client = self.users.clone();
        let response = client.get_users(request).await?.into_inner();

        response.data.into_iter().map(User::try_from).collect()
    }

    async fn update_user(
        &self,
        ctx: &OperationContext,
        id: &str,
        changes: UserChanges,
    ) -> Result<User, UserError> {
        let request = request(
            ctx,
            UpdateUserRequest {
                id: id.to_string(),
                name: changes.name,
                email: changes.email.map(|email| email.as_str().to_string()),
                password: changes.password,
            },
        )?;

        let mut client = self.users.clone();
        let response = client.update_user(request).await?.into_inner();

        response.user.ok_or_else(missing_user)?.try_into()
    }

    async fn delete_user(&self, ctx: &OperationContext, id: &str) -> Result<(), UserError> {
        let request = request(ctx, DeleteUserRequest { id: id.to_string() })?;

        let mut client = self.users.clone();
        client.delete_user(request).await?;

        Ok(())
    }

    async fn login(
        &self,
        ctx: &OperationContext,
        credentials: Credentials,
    ) -> Result<String, UserError> {
        let request = request(
            ctx,
            LoginRequest {
                email: credentials.email.as_str().to_string(),
                password: credentials.password,
            },
        )?;

        let mut client = self.auth.clone();
        let response = client.login(request).await?.into_inner();

        Ok(response.user_id)
    }
}
