use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::domain::context::OperationContext;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// bcrypt runs on the blocking pool so a slow hash never stalls the runtime.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Credential hasher with the configured cost
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = self.password_hasher;
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))??;
        Ok(hash)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        let hasher = self.password_hasher;
        let (password, hash) = (password.to_string(), hash.to_string());
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))??;
        Ok(matches)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(
        &self,
        ctx: &OperationContext,
        command: CreateUserCommand,
    ) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User::register(
            command.name,
            command.email,
            password_hash,
            command.created_by,
        );

        let created_user = self.repository.insert(ctx, user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_user(&self, ctx: &OperationContext, id: &UserId) -> Result<User, UserError> {
        self.repository.find_by_id(ctx, id).await
    }

    async fn list_users(
        &self,
        ctx: &OperationContext,
        filter: UserFilter,
    ) -> Result<Vec<User>, UserError> {
        self.repository.find(ctx, &filter).await
    }

    async fn update_user(
        &self,
        ctx: &OperationContext,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self.repository.find_by_id(ctx, id).await?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        // An empty password would store the "no password set" hash.
        if let Some(new_password) = command.password.filter(|p| !p.is_empty()) {
            user.password_hash = self.hash_password(new_password).await?;
        }

        user.touch();
        self.repository.replace(ctx, id, &user).await?;
        tracing::info!(user_id = %id, "User updated");

        Ok(user)
    }

    async fn delete_user(&self, ctx: &OperationContext, id: &UserId) -> Result<(), UserError> {
        let mut user = self.repository.find_by_id(ctx, id).await?;

        user.soft_delete();
        self.repository.replace(ctx, id, &user).await?;
        tracing::info!(user_id = %id, "User soft-deleted");

        Ok(())
    }

    async fn login(
        &self,
        ctx: &OperationContext,
        email: &EmailAddress,
        password: &str,
    ) -> Result<User, UserError> {
        let user = self.repository.find_by_email(ctx, email).await?;

        if user.is_deleted() {
            return Err(UserError::NotFound);
        }

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn count_active_users(&self, ctx: &OperationContext) -> Result<u64, UserError> {
        self.repository.count(ctx).await
    }
}
