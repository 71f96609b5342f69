use async_trait::async_trait;

use crate::domain::context::OperationContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserFilter;

/// Port for user-service communication (via gRPC).
///
/// Every call forwards the context's remaining budget as its deadline.
/// Identifiers are passed through opaque; user-service decides whether they
/// are well formed.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    async fn create_user(&self, ctx: &OperationContext, user: NewUser) -> Result<User, UserError>;

    /// # Errors
    /// * `InvalidArgument` - Malformed identifier
    /// * `NotFound` - No user with that identifier
    async fn get_user(&self, ctx: &OperationContext, id: &str) -> Result<User, UserError>;

    async fn list_users(
        &self,
        ctx: &OperationContext,
        filter: UserFilter,
    ) -> Result<Vec<User>, UserError>;

    async fn update_user(
        &self,
        ctx: &OperationContext,
        id: &str,
        changes: UserChanges,
    ) -> Result<User, UserError>;

    async fn delete_user(&self, ctx: &OperationContext, id: &str) -> Result<(), UserError>;

    /// Check credentials remotely and return the matching user id.
    ///
    /// # Errors
    /// * `NotFound` - Unknown email
    /// * `InvalidArgument` - Wrong password
    async fn login(
        &self,
        ctx: &OperationContext,
        credentials: Credentials,
    ) -> Result<String, UserError>;
}

#[cfg(test)]
mockall::mock! {
    pub UserService {}

    #[async_trait]
    impl UserServicePort for UserService {
        async fn create_user(&self, ctx: &OperationContext, user: NewUser) -> Result<User, UserError>;
        async fn get_user(&self, ctx: &OperationContext, id: &str) -> Result<User, UserError>;
        async fn list_users(&self, ctx: &OperationContext, filter: UserFilter) -> Result<Vec<User>, UserError>;
        async fn update_user(&self, ctx: &OperationContext, id: &str, changes: UserChanges) -> Result<User, UserError>;
        async fn delete_user(&self, ctx: &OperationContext, id: &str) -> Result<(), UserError>;
        async fn login(&self, ctx: &OperationContext, credentials: Credentials) -> Result<String, UserError>;
    }
}
