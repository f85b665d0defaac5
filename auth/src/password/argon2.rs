use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id work factor.
///
/// The default costs on the order of one to three seconds of CPU per hash on
/// commodity server hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashingCost {
    pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
    pub const DEFAULT_ITERATIONS: u32 = 16;
    pub const DEFAULT_PARALLELISM: u32 = 1;

    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    /// Convert into Argon2 parameters.
    ///
    /// # Errors
    /// * `InvalidCost` - Values are outside the ranges Argon2 accepts
    pub fn params(&self) -> Result<Params, PasswordError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordError::InvalidCost(e.to_string()))
    }
}

impl Default for HashingCost {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MEMORY_KIB,
            Self::DEFAULT_ITERATIONS,
            Self::DEFAULT_PARALLELISM,
        )
    }
}

/// Password hashing implementation.
///
/// Provides salted, adaptive one-way hashing (Argon2id, PHC string output).
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a password hasher with the default work factor.
    pub fn new() -> Self {
        Self {
            params: Params::new(
                HashingCost::DEFAULT_MEMORY_KIB,
                HashingCost::DEFAULT_ITERATIONS,
                HashingCost::DEFAULT_PARALLELISM,
                None,
            )
            .unwrap_or_default(),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost parameters are rejected by Argon2
    pub fn with_cost(cost: HashingCost) -> Result<Self, PasswordError> {
        Ok(Self {
            params: cost.params()?,
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// Generates a fresh random salt for every call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The comparison is constant-time and uses the parameters encoded in
    /// the stored hash, so hashes produced under an older cost still verify.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or uses an unsupported algorithm
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
