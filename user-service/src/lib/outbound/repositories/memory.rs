use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::context::OperationContext;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserFilter;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local store with the same contract as the MongoDB repository,
/// including the unique email constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<UserId, User>>, UserError> {
        self.users
            .read()
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<UserId, User>>, UserError> {
        self.users
            .write()
            .map_err(|e| UserError::DatabaseError(e.to_string()))
    }
}

fn matches(filter: &UserFilter, user: &User) -> bool {
    filter.id.map_or(true, |id| id == user.id)
        && filter
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or(true, |name| name == user.name.as_str())
        && filter
            .email
            .as_ref()
            .map_or(true, |email| email == &user.email)
}

fn check_deadline(ctx: &OperationContext) -> Result<(), UserError> {
    if ctx.is_expired() {
        return Err(crate::domain::context::DeadlineExceeded.into());
    }
    Ok(())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, ctx: &OperationContext, user: User) -> Result<User, UserError> {
        check_deadline(ctx)?;
        let mut users = self.write()?;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, ctx: &OperationContext, id: &UserId) -> Result<User, UserError> {
        check_deadline(ctx)?;
        self.read()?.get(id).cloned().ok_or(UserError::NotFound)
    }

    async fn find_by_email(
        &self,
        ctx: &OperationContext,
        email: &EmailAddress,
    ) -> Result<User, UserError> {
        check_deadline(ctx)?;
        self.read()?
            .values()
            .find(|user| &user.email == email)
            .cloned()
            .ok_or(UserError::NotFound)
    }

    async fn find(
        &self,
        ctx: &OperationContext,
        filter: &UserFilter,
    ) -> Result<Vec<User>, UserError> {
        check_deadline(ctx)?;
        let mut users: Vec<User> = self
            .read()?
            .values()
            .filter(|user| matches(filter, user))
            .cloned()
            .collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn replace(
        &self,
        ctx: &OperationContext,
        id: &UserId,
        user: &User,
    ) -> Result<(), UserError> {
        check_deadline(ctx)?;
        let mut users = self.write()?;

        if users
            .values()
            .any(|existing| existing.id != *id && existing.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.as_str().to_string()));
        }

        if let Some(existing) = users.get_mut(id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn count(&self, ctx: &OperationContext) -> Result<u64, UserError> {
        check_deadline(ctx)?;
        Ok(self.read()?.values().filter(|user| !user.is_deleted()).count() as u64)
    }
}
