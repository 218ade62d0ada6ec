//! Account registration and login.

use tracing::{debug, info};

use crate::auth::{hash_password, verify_password};
use crate::db::{Grade, NewUser, User, UserRepository};
use crate::validation::require_text;
use crate::{BulletinError, Result};

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Display nickname.
    pub nickname: String,
    /// Desired login identifier.
    pub login_id: String,
    /// Plain-text password, hashed before storage.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(
        nickname: impl Into<String>,
        login_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            login_id: login_id.into(),
            password: password.into(),
        }
    }
}

/// Register a new SILVER user.
///
/// This function:
/// 1. Rejects blank fields
/// 2. Rejects a login id that is already registered (`DuplicateLoginId`)
/// 3. Hashes the password
/// 4. Creates the user
///
/// # Examples
///
/// ```ignore
/// let mut conn = db.acquire().await?;
/// let mut repo = UserRepository::new(&mut conn);
/// let user = register(&mut repo, RegistrationRequest::new("Alice", "alice", "1234")).await?;
/// ```
pub async fn register(repo: &mut UserRepository<'_>, request: RegistrationRequest) -> Result<User> {
    register_with_grade(repo, request, Grade::Silver).await
}

/// Register a new user with a specific grade.
///
/// Used for the bootstrap administrator account.
pub async fn register_with_grade(
    repo: &mut UserRepository<'_>,
    request: RegistrationRequest,
    grade: Grade,
) -> Result<User> {
    require_text("nickname", &request.nickname)?;
    require_text("login id", &request.login_id)?;

    if repo.login_id_exists(&request.login_id).await? {
        return Err(BulletinError::DuplicateLoginId);
    }

    let password_hash = hash_password(&request.password)?;

    // The UNIQUE constraint still catches a concurrent registration.
    let new_user =
        NewUser::new(&request.login_id, password_hash, &request.nickname).with_grade(grade);
    let user = repo.create(&new_user).await?;

    info!(
        login_id = %user.login_id,
        user_id = user.id,
        grade = %user.grade,
        "New user registered"
    );

    Ok(user)
}

/// Check credentials and return the matching user.
///
/// An unknown login id and a wrong password both yield `UserNotFound`.
pub async fn login(repo: &mut UserRepository<'_>, login_id: &str, password: &str) -> Result<User> {
    let Some(user) = repo.get_by_login_id(login_id).await? else {
        debug!(login_id, "Login failed: unknown login id");
        return Err(BulletinError::UserNotFound);
    };

    verify_password(password, &user.password)?;
    debug!(user_id = user.id, "Login succeeded");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_register_success() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);

        let user = register(&mut repo, RegistrationRequest::new("Alice", "alice", "1234"))
            .await
            .unwrap();

        assert_eq!(user.nickname, "Alice");
        assert_eq!(user.login_id, "alice");
        assert_eq!(user.grade, Grade::Silver);
        assert_ne!(user.password, "1234");
        assert!(user.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_login_id() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);

        register(&mut repo, RegistrationRequest::new("Alice", "alice", "1234"))
            .await
            .unwrap();
        let result = register(&mut repo, RegistrationRequest::new("Other", "alice", "5678")).await;

        assert!(matches!(result, Err(BulletinError::DuplicateLoginId)));
    }

    #[tokio::test]
    async fn test_register_blank_fields() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);

        for request in [
            RegistrationRequest::new("", "alice", "1234"),
            RegistrationRequest::new("Alice", " ", "1234"),
            RegistrationRequest::new("Alice", "alice", ""),
        ] {
            let result = register(&mut repo, request).await;
            assert!(matches!(result, Err(BulletinError::Validation(_))));
        }
        assert_eq!(repo.count(None).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_with_grade() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);

        let admin = register_with_grade(
            &mut repo,
            RegistrationRequest::new("Admin", "admin", "1234"),
            Grade::Admin,
        )
        .await
        .unwrap();
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_login() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);

        let registered = register(&mut repo, RegistrationRequest::new("Alice", "alice", "1234"))
            .await
            .unwrap();

        let user = login(&mut repo, "alice", "1234").await.unwrap();
        assert_eq!(user.id, registered.id);

        assert!(matches!(
            login(&mut repo, "alice", "wrong").await,
            Err(BulletinError::UserNotFound)
        ));
        assert!(matches!(
            login(&mut repo, "nobody", "1234").await,
            Err(BulletinError::UserNotFound)
        ));
    }
}
