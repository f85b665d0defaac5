use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    department: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::new(row.username).map_err(|e| {
            UserError::DatabaseError(format!("Stored user {} is unreadable: {}", row.id, e))
        })?;

        Ok(User {
            id: UserId(row.id),
            username,
            password_hash: row.password_hash,
            department: row.department,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, department)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(&user.password_hash)
        .bind(&user.department)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("users_username_key")
                {
                    return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
                }
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, department
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .map(User::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, department
            FROM users
            ORDER BY created_at, username
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?
        .into_iter()
        .map(User::try_from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            department: "eng".to_string(),
        }
    }

    #[test]
    fn test_row_with_free_form_username_converts() {
        let user = User::try_from(row("alice@example.com")).unwrap();
        assert_eq!(user.username.as_str(), "alice@example.com");
    }

    #[test]
    fn test_unreadable_row_is_a_storage_error() {
        let result = User::try_from(row(""));
        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }
}
