use async_trait::async_trait;

use crate::domain::context::OperationContext;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `ctx` - Operation context bounding the storage call
    /// * `command` - Validated name, email, plaintext password and creator
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Password` - Password could not be hashed (too long or hasher failure)
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(
        &self,
        ctx: &OperationContext,
        command: CreateUserCommand,
    ) -> Result<User, UserError>;

    /// Retrieve user by unique identifier, soft-deleted records included.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, ctx: &OperationContext, id: &UserId) -> Result<User, UserError>;

    /// Retrieve all users matching every provided filter field.
    ///
    /// # Returns
    /// Matching users, empty when nothing matches
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(
        &self,
        ctx: &OperationContext,
        filter: UserFilter,
    ) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Arguments
    /// * `id` - User ID to update
    /// * `command` - Command with optional name, email, and password fields
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(
        &self,
        ctx: &OperationContext,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError>;

    /// Soft-delete a user by stamping `deleted_at`.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, ctx: &OperationContext, id: &UserId) -> Result<(), UserError>;

    /// Check credentials for an active user.
    ///
    /// # Returns
    /// The authenticated user
    ///
    /// # Errors
    /// * `NotFound` - No active user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Candidate exceeds the hashing limit
    async fn login(
        &self,
        ctx: &OperationContext,
        email: &EmailAddress,
        password: &str,
    ) -> Result<User, UserError>;

    /// Number of users that are not soft-deleted.
    async fn count_active_users(&self, ctx: &OperationContext) -> Result<u64, UserError>;
}

/// Persistence operations for user aggregate.
///
/// One storage call per method, no retries. Every method honours the
/// deadline carried by `ctx`.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email index rejected the record
    /// * `DatabaseError` - Any other storage failure
    async fn insert(&self, ctx: &OperationContext, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - No record with this identifier
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, ctx: &OperationContext, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by normalized email.
    ///
    /// # Errors
    /// * `NotFound` - No record with this email
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        ctx: &OperationContext,
        email: &EmailAddress,
    ) -> Result<User, UserError>;

    /// Retrieve every user matching all provided filter fields.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find(&self, ctx: &OperationContext, filter: &UserFilter)
        -> Result<Vec<User>, UserError>;

    /// Overwrite the whole record stored at `id`.
    ///
    /// A vanished id is not reported.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - New email collides with another record
    /// * `DatabaseError` - Database operation failed
    async fn replace(&self, ctx: &OperationContext, id: &UserId, user: &User)
        -> Result<(), UserError>;

    /// Count records without `deleted_at`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn count(&self, ctx: &OperationContext) -> Result<u64, UserError>;
}
