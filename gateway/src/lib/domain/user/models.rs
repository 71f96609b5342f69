use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::UserError;

/// User as returned by user-service.
///
/// The password hash never leaves user-service, so it has no place here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Email address value type
///
/// Trimmed and lowercased, so normalizing twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `Required` - Email is empty
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(EmailError::Required);
        }

        email_address::EmailAddress::from_str(&normalized)
            .map(|_| EmailAddress(normalized))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registration payload, checked before it is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: EmailAddress,
    pub password: String,
    pub created_by: Option<String>,
}

impl NewUser {
    /// # Errors
    /// * `MissingField` - Name or password is empty
    /// * `InvalidEmail` - Email is empty or malformed
    pub fn new(
        name: String,
        email: String,
        password: String,
        created_by: Option<String>,
    ) -> Result<Self, UserError> {
        let name = required("name", name)?;
        let email = EmailAddress::new(email)?;
        let password = required("password", password)?;

        Ok(Self {
            name,
            email,
            password,
            created_by,
        })
    }
}

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl Credentials {
    /// # Errors
    /// * `InvalidEmail` - Email is empty or malformed
    /// * `MissingField` - Password is empty
    pub fn new(email: String, password: String) -> Result<Self, UserError> {
        let email = EmailAddress::new(email)?;
        let password = required("password", password)?;
        Ok(Self { email, password })
    }
}

/// Conjunctive filter for listing users. Absent fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
}

impl UserFilter {
    /// # Errors
    /// * `InvalidEmail` - Email filter is present but malformed
    pub fn new(name: Option<String>, email: Option<String>) -> Result<Self, UserError> {
        let name = non_blank(name);
        let email = non_blank(email).map(EmailAddress::new).transpose()?;
        Ok(Self { name, email })
    }
}

/// Partial update. Only the present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<EmailAddress>,
    pub password: Option<String>,
}

impl UserChanges {
    /// # Errors
    /// * `InvalidEmail` - New email is present but malformed
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, UserError> {
        Ok(Self {
            name: non_blank(name),
            email: non_blank(email).map(EmailAddress::new).transpose()?,
            password: non_blank(password),
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, UserError> {
    if value.trim().is_empty() {
        Err(UserError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
