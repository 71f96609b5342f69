//! Authentication building blocks shared by the user service and the gateway:
//! - Password hashing (bcrypt)
//! - HS256 identity tokens with strict expiry
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4);
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::TokenService;
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(5));
//! let token = tokens.issue("64b7f0c2a1e4d5f6a7b8c9d0").unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.sub, "64b7f0c2a1e4d5f6a7b8c9d0");
//! ```

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenService;
