use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Identity;
use chrono::Utc;

use crate::domain::user::models::Session;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::SignUpCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Signup and signin both end with a session token issued by the shared
/// [`Authenticator`].
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Run a password operation on the blocking pool.
    ///
    /// Argon2 is CPU-bound and must not stall the async workers.
    async fn run_blocking<T, F>(&self, task: F) -> Result<T, UserError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || task(&authenticator))
            .await
            .map_err(|e| UserError::Unknown(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<Session, UserError> {
        let password = command.password;
        let password_hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.expose()))
            .await??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        let token = self
            .authenticator
            .issue_token(&Identity::new(created_user.id))?;

        tracing::info!(user_id = %created_user.id, "User signed up");

        Ok(Session {
            user: created_user,
            token,
        })
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<Session, UserError> {
        let SignInCommand { email, password } = command;

        let Some(user) = self.repository.find_by_email(&email).await? else {
            // Same cost as a wrong password for a known email
            let decoy = self
                .run_blocking(move |authenticator| authenticator.verify_decoy(&password))
                .await?;
            if let Err(e) = decoy {
                tracing::error!(error = %e, "Decoy password verification failed");
            }

            tracing::info!("Sign-in rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let stored_hash = user.password_hash.clone();
        let identity = Identity::new(user.id);
        let outcome = self
            .run_blocking(move |authenticator| {
                authenticator.authenticate(&stored_hash, &password, &identity)
            })
            .await?;

        let token = outcome.map_err(|e| {
            match &e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::info!(user_id = %user.id, "Sign-in rejected: wrong password")
                }
                other => {
                    tracing::error!(user_id = %user.id, error = %other, "Sign-in failed")
                }
            }
            UserError::from(e)
        })?;

        Ok(Session { user, token })
    }
}

#[cfg(test)]
mod tests {
    use auth::HasherParams;
    use auth::JwtError;
    use auth::PasswordError;
    use auth::PasswordHasher;
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let hasher = PasswordHasher::with_params(HasherParams {
            memory_cost_kib: 1024,
            time_cost: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher");

        Arc::new(Authenticator::new(SECRET).with_password_hasher(hasher))
    }

    fn email(value: &str) -> EmailAddress {
        EmailAddress::new(value.to_string()).unwrap()
    }

    fn stored_user(password: &str) -> User {
        User {
            id: UserId::new(),
            email: email("a@x.com"),
            password_hash: authenticator().hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sign_up_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "a@x.com"
                    && user.password_hash.starts_with("$argon2id$")
                    && !user.password_hash.contains("pw123")
            })
            .times(1)
            .returning(|user| Ok(user));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let command = SignUpCommand::new(email("a@x.com"), Password::new("pw123".to_string()).unwrap());
        let session = service.sign_up(command).await.expect("Sign-up failed");

        let identity = authenticator.verify_token(&session.token).unwrap();
        assert_eq!(identity.id, session.user.id.to_string());
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .times(1)
            .returning(|user| Err(UserError::EmailAlreadyExists(user.email.to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = SignUpCommand::new(email("a@x.com"), Password::new("pw123".to_string()).unwrap());
        let result = service.sign_up(command).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_sign_in_success() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("pw123");
        let user_id = user.id;

        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "a@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let authenticator = authenticator();
        let service = UserService::new(Arc::new(repository), Arc::clone(&authenticator));

        let session = service
            .sign_in(SignInCommand {
                email: email("a@x.com"),
                password: "pw123".to_string(),
            })
            .await
            .expect("Sign-in failed");

        assert_eq!(session.user.id, user_id);
        assert_eq!(
            authenticator.verify_token(&session.token).unwrap(),
            Identity::new(user_id)
        );
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("pw123");

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_in(SignInCommand {
                email: email("a@x.com"),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email_is_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_in(SignInCommand {
                email: email("nobody@x.com"),
                password: "pw123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_email_costs_a_password_verification() {
        let hasher = PasswordHasher::with_params(HasherParams {
            memory_cost_kib: 8192,
            time_cost: 2,
            parallelism: 1,
        })
        .unwrap();
        let authenticator = Arc::new(Authenticator::new(SECRET).with_password_hasher(hasher));
        let user = User {
            id: UserId::new(),
            email: email("a@x.com"),
            password_hash: authenticator.hash_password("pw123").unwrap(),
            created_at: Utc::now(),
        };

        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().returning(move |email| {
            Ok((email.as_str() == "a@x.com").then(|| user.clone()))
        });
        let service = UserService::new(Arc::new(repository), authenticator);

        let sign_in = |address: &str| SignInCommand {
            email: email(address),
            password: "wrong".to_string(),
        };

        // First unknown-email call builds the decoy hash
        let _ = service.sign_in(sign_in("nobody@x.com")).await;

        let mut wrong_password = std::time::Duration::MAX;
        let mut unknown_email = std::time::Duration::MAX;
        for _ in 0..3 {
            let started = std::time::Instant::now();
            let result = service.sign_in(sign_in("a@x.com")).await;
            wrong_password = wrong_password.min(started.elapsed());
            assert!(matches!(result, Err(UserError::InvalidCredentials)));

            let started = std::time::Instant::now();
            let result = service.sign_in(sign_in("nobody@x.com")).await;
            unknown_email = unknown_email.min(started.elapsed());
            assert!(matches!(result, Err(UserError::InvalidCredentials)));
        }

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
        );
    }

    #[tokio::test]
    async fn test_sign_in_corrupted_hash() {
        let mut repository = MockTestUserRepository::new();
        let mut user = stored_user("pw123");
        user.password_hash = "corrupted".to_string();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_in(SignInCommand {
                email: email("a@x.com"),
                password: "pw123".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(UserError::Credential(PasswordError::HashDecode(_)))
        ));
    }

    #[tokio::test]
    async fn test_sign_in_store_failure_is_not_invalid_credentials() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .sign_in(SignInCommand {
                email: email("a@x.com"),
                password: "pw123".to_string(),
            })
            .await;

        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_tokens_from_other_secret_do_not_verify() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_create().returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repository), authenticator());
        let command = SignUpCommand::new(email("a@x.com"), Password::new("pw123".to_string()).unwrap());
        let session = service.sign_up(command).await.unwrap();

        let other = Authenticator::new(b"a-completely-different-secret-of-32-bytes");
        assert_eq!(
            other.verify_token(&session.token),
            Err(JwtError::SignatureInvalid)
        );
    }
}
