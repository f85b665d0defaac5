use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordHasher;
use tokio::sync::Semaphore;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration and login.
///
/// Hashing is CPU-bound (seconds at the default cost) and runs on the blocking
/// thread pool. A semaphore caps how many hashes run at once, so memory use
/// stays at `limit * memory_kib` however many logins arrive.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    hashing_permits: Arc<Semaphore>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub const DEFAULT_MAX_CONCURRENT_HASHES: usize = 4;

    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Hasher configured with the deployment's work factor
    pub fn new(repository: Arc<UR>, password_hasher: PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
            hashing_permits: Arc::new(Semaphore::new(Self::DEFAULT_MAX_CONCURRENT_HASHES)),
        }
    }

    /// Allow at most `max_concurrent` hash computations at a time (minimum 1).
    pub fn with_hashing_limit(mut self, max_concurrent: usize) -> Self {
        self.hashing_permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
        self
    }

    /// Run a hasher operation on the blocking pool once a permit is free.
    ///
    /// The permit moves into the blocking task and is released only when the
    /// computation ends, even if the caller stops waiting.
    async fn run_hashing<F, R>(&self, context: &'static str, task: F) -> Result<R, UserError>
    where
        F: FnOnce(&PasswordHasher) -> Result<R, auth::PasswordError> + Send + 'static,
        R: Send + 'static,
    {
        let permit = self
            .hashing_permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| UserError::Unknown(format!("{} limiter closed: {}", context, e)))?;
        let hasher = self.password_hasher.clone();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task(&hasher)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("{} task failed: {}", context, e)))?
        .map_err(UserError::from)
    }

    async fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let password = password.to_owned();
        self.run_hashing("Password hashing", move |hasher| hasher.hash(&password))
            .await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, UserError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        self.run_hashing("Password verification", move |hasher| {
            hasher.verify(&password, &hash)
        })
        .await
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password.expose()).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            password_hash,
            department: command.department,
        };

        let created_user = self.repository.create(user).await?;

        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, username: &str, password: &str) -> Result<Claims, UserError> {
        // A blank username cannot exist in the store; treat it as unknown.
        let candidate = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let Some(user) = candidate else {
            // Spend the same work a verification would so timing does not reveal the miss.
            let _ = self.hash_password(password).await;
            tracing::warn!(username = ?username, "Login rejected");
            return Err(UserError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash).await? {
            tracing::warn!(username = ?username, "Login rejected");
            return Err(UserError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, username = %user.username, "Login succeeded");

        Ok(Claims::for_user(user.id, user.username.as_str()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }
}
