//! Authentication primitives
//!
//! Provides the building blocks the gatekeeper service layers its login flow
//! and access gate on:
//! - Password hashing (Argon2id, tunable work factor)
//! - JWT token signing and validation (HS256)
//! - The identity claims carried inside a token
//!
//! Nothing in this crate performs I/O; storage and transport live in the service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingCost, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_cost(HashingCost::new(4096, 1, 1)).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user("user123", "alice");
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded, claims);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::HashingCost;
pub use password::PasswordError;
pub use password::PasswordHasher;
