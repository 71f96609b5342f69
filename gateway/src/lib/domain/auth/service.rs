use std::sync::Arc;

use auth::TokenService;

use crate::domain::context::OperationContext;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Credentials;
use crate::domain::user::ports::UserServicePort;

/// Turns credentials into an access token.
///
/// The credential check itself happens in user-service; this only validates
/// the input, forwards it and signs the resulting subject.
pub struct LoginService<U>
where
    U: UserServicePort,
{
    users: Arc<U>,
    tokens: Arc<TokenService>,
}

impl<U> LoginService<U>
where
    U: UserServicePort,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Log in and return a signed access token.
    ///
    /// # Errors
    /// * `InvalidEmail` / `MissingField` - Rejected before any remote call
    /// * Whatever user-service reports, unchanged (`NotFound` for an unknown
    ///   email, `InvalidArgument` for a wrong password)
    /// * `Internal` - Token signing failed
    pub async fn login(
        &self,
        ctx: &OperationContext,
        email: String,
        password: String,
    ) -> Result<String, UserError> {
        let credentials = Credentials::new(email, password)?;

        let user_id = self.users.login(ctx, credentials).await?;
        let token = self.tokens.issue(&user_id)?;

        tracing::info!(user_id = %user_id, "Access token issued");

        Ok(token)
    }
}
