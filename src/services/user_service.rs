//! User service - profile access and updates.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{ProfileUpdate, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get a user's profile by username
    async fn profile(&self, username: &str) -> AppResult<User>;

    /// Fully replace the profile fields of a user
    async fn update_profile(&self, username: &str, update: ProfileUpdate) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn profile(&self, username: &str) -> AppResult<User> {
        self.uow
            .users()
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    async fn update_profile(&self, username: &str, update: ProfileUpdate) -> AppResult<User> {
        let user = self.profile(username).await?;

        // The replacement may rename the account; make sure the new
        // identifiers are not already owned by someone else.
        if update.username != user.username {
            if let Some(other) = self.uow.users().find_by_username(&update.username).await? {
                if other.id != user.id {
                    return Err(AppError::not_acceptable("username has been taken"));
                }
            }
        }
        if update.email != user.email {
            if let Some(other) = self.uow.users().find_by_email(&update.email).await? {
                if other.id != user.id {
                    return Err(AppError::not_acceptable("email has been taken"));
                }
            }
        }

        self.uow.users().update_profile(user.id, update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{
        MockCartRepository, MockProductRepository, MockUserRepository,
    };
    use crate::infra::{CartRepository, ProductRepository, UserRepository};
    use uuid::Uuid;

    struct TestUow {
        users: Arc<MockUserRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn products(&self) -> Arc<dyn ProductRepository> {
            Arc::new(MockProductRepository::new())
        }

        fn carts(&self) -> Arc<dyn CartRepository> {
            Arc::new(MockCartRepository::new())
        }
    }

    fn test_user(id: Uuid, username: &str) -> User {
        User::new(
            id,
            username.to_string(),
            format!("{}@example.com", username),
            "Test User".to_string(),
            "hashed".to_string(),
        )
    }

    fn service(users: MockUserRepository) -> UserManager<TestUow> {
        UserManager::new(Arc::new(TestUow {
            users: Arc::new(users),
        }))
    }

    #[tokio::test]
    async fn profile_returns_user() {
        let id = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |name| Ok(Some(test_user(id, name))));

        let user = service(users).profile("jdoe").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "jdoe");
    }

    #[tokio::test]
    async fn profile_of_unknown_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| Ok(None));

        let result = service(users).profile("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_rejects_username_owned_by_another_user() {
        let me = Uuid::new_v4();
        let someone_else = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(move |name| {
            Ok(Some(match name {
                "jdoe" => test_user(me, "jdoe"),
                other => test_user(someone_else, other),
            }))
        });

        let update = ProfileUpdate {
            username: "taken".to_string(),
            email: "jdoe@example.com".to_string(),
            full_name: "John Doe".to_string(),
        };
        let result = service(users).update_profile("jdoe", update).await;
        assert!(matches!(result, Err(AppError::NotAcceptable(_))));
    }

    #[tokio::test]
    async fn update_replaces_profile_fields() {
        let me = Uuid::new_v4();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(move |name| match name {
                "jdoe" => Ok(Some(test_user(me, "jdoe"))),
                _ => Ok(None),
            });
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_update_profile()
            .returning(move |id, update| {
                let mut user = test_user(id, &update.username);
                user.email = update.email;
                user.full_name = update.full_name;
                Ok(user)
            });

        let update = ProfileUpdate {
            username: "jdoe2".to_string(),
            email: "new@example.com".to_string(),
            full_name: "Jane Doe".to_string(),
        };
        let user = service(users).update_profile("jdoe", update).await.unwrap();
        assert_eq!(user.username, "jdoe2");
        assert_eq!(user.email, "new@example.com");
    }
}
