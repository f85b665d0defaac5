use async_trait::async_trait;
use auth::Claims;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::Username;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user, storing only the password hash.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, password, and department
    ///
    /// # Returns
    /// Created user record
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Store reports the username as taken
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Check credentials and build the claims for a token.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    ///
    /// # Arguments
    /// * `username` - Username as typed by the client
    /// * `password` - Plaintext password as typed by the client
    ///
    /// # Returns
    /// Claims for the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Password` - Stored hash could not be verified
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<Claims, UserError>;

    /// List every stored user record.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user records.
///
/// Username uniqueness is enforced here, not by the service.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User record to create
    ///
    /// # Returns
    /// Created user record
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by username.
    ///
    /// # Returns
    /// Optional user record (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve all users from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
