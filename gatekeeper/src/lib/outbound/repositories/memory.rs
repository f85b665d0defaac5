use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Used when no database is configured. Records are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::UserId;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=4096,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            department: "eng".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let alice = user("alice");

        repository.create(alice.clone()).await.unwrap();

        let found = repository.find_by_username(&alice.username).await.unwrap();
        assert_eq!(found, Some(alice));

        let missing = Username::new("bob".to_string()).unwrap();
        assert_eq!(repository.find_by_username(&missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("alice")).await.unwrap();

        let result = repository.create(user("alice")).await;
        assert!(matches!(result, Err(UserError::UsernameAlreadyExists(name)) if name == "alice"));
        assert_eq!(repository.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_all_preserves_insertion_order() {
        let repository = InMemoryUserRepository::new();
        for name in ["carol", "alice", "bob"] {
            repository.create(user(name)).await.unwrap();
        }

        let names: Vec<String> = repository
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username.to_string())
            .collect();
        assert_eq!(names, ["carol", "alice", "bob"]);
    }
}
