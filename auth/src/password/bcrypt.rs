use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Salted bcrypt hashes; comparison is constant-time.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Cost used for interactive logins.
    pub const DEFAULT_COST: u32 = 14;

    /// bcrypt ignores everything past this many bytes, so longer input is rejected.
    pub const MAX_PASSWORD_BYTES: usize = 72;

    /// Create a new password hasher.
    ///
    /// # Arguments
    /// * `cost` - bcrypt work factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// An empty password hashes to an empty string, meaning "no password set".
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `TooLong` - Password exceeds 72 bytes
    /// * `HashingFailed` - bcrypt rejected the cost or failed internally
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Ok(String::new());
        }
        Self::check_length(password)?;

        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a candidate password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext candidate
    /// * `hash` - Stored hash produced by [`PasswordHasher::hash`]
    ///
    /// # Returns
    /// True if the candidate matches, false otherwise (always false when no
    /// password is set)
    ///
    /// # Errors
    /// * `TooLong` - Candidate exceeds 72 bytes
    /// * `VerificationFailed` - Stored hash is malformed
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if hash.is_empty() {
            return Ok(false);
        }
        Self::check_length(password)?;

        bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))
    }

    fn check_length(password: &str) -> Result<(), PasswordError> {
        let actual = password.len();
        if actual > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: Self::MAX_PASSWORD_BYTES,
                actual,
            });
        }
        Ok(())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_COST)
    }
}
