use uuid::Uuid;

use matchday_api::domain::repository::SessionStore;
use matchday_api::error::ApiError;
use matchday_api::extractors::Identity;
use matchday_api::usecase::auth::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};
use matchday_auth_types::token::validate_token;
use matchday_domain::user::Role;

use crate::helpers::{MockSessionStore, MockUserRepo, TEST_JWT_SECRET};

fn register_input(username: &str, email: &str, role: Role) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "hunter22".to_owned(),
        role,
    }
}

// ── Register → login ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_then_login_with_same_credentials() {
    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();

    let registered = RegisterUseCase {
        users: users.clone(),
    }
    .execute(register_input("alice", "alice@example.com", Role::Admin))
    .await
    .unwrap();

    let login = LoginUseCase {
        users,
        sessions: sessions.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(LoginInput {
        email: "Alice@Example.COM".to_owned(),
        password: "hunter22".to_owned(),
    })
    .await
    .unwrap();

    assert_eq!(login.user_id, registered.id);

    // The token carries the registered identity.
    let info = validate_token(&login.token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.user_id, registered.id);
    assert_eq!(info.email, "alice@example.com");
    assert_eq!(info.role, Role::Admin);

    // The session record exists and is independently authoritative.
    let record = sessions.get(login.session_id).await.unwrap().unwrap();
    assert_eq!(record.user_id, registered.id);
    assert_eq!(record.role, Role::Admin);
}

#[tokio::test]
async fn should_reject_duplicate_registration() {
    let users = MockUserRepo::empty();
    let uc = RegisterUseCase {
        users: users.clone(),
    };
    uc.execute(register_input("alice", "alice@example.com", Role::User))
        .await
        .unwrap();

    let result = uc
        .execute(register_input("ALICE", "other@example.com", Role::User))
        .await;
    assert!(matches!(result, Err(ApiError::UsernameTaken)));

    let result = uc
        .execute(register_input("bob", "ALICE@example.com", Role::User))
        .await;
    assert!(matches!(result, Err(ApiError::EmailTaken)));
}

// ── Role gate ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_non_admin_after_full_login_flow() {
    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();

    RegisterUseCase {
        users: users.clone(),
    }
    .execute(register_input("bob", "bob@example.com", Role::User))
    .await
    .unwrap();

    let login = LoginUseCase {
        users,
        sessions: sessions.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(LoginInput {
        email: "bob@example.com".to_owned(),
        password: "hunter22".to_owned(),
    })
    .await
    .unwrap();

    let info = validate_token(&login.token, TEST_JWT_SECRET).unwrap();
    let record = sessions.get(login.session_id).await.unwrap().unwrap();
    let identity = Identity {
        user_id: info.user_id,
        email: info.email,
        role: record.role,
        session_id: login.session_id,
    };

    assert!(matches!(identity.require_admin(), Err(ApiError::Forbidden)));
}

// ── Logout ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_invalidate_session_on_logout() {
    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();

    RegisterUseCase {
        users: users.clone(),
    }
    .execute(register_input("alice", "alice@example.com", Role::Admin))
    .await
    .unwrap();

    let login = LoginUseCase {
        users,
        sessions: sessions.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    }
    .execute(LoginInput {
        email: "alice@example.com".to_owned(),
        password: "hunter22".to_owned(),
    })
    .await
    .unwrap();

    LogoutUseCase {
        sessions: sessions.clone(),
    }
    .execute(login.session_id)
    .await
    .unwrap();

    // Token still verifies; only the session is gone. The auth gate treats
    // that as an expired session.
    assert!(validate_token(&login.token, TEST_JWT_SECRET).is_ok());
    assert!(sessions.get(login.session_id).await.unwrap().is_none());
}

#[tokio::test]
async fn should_issue_distinct_sessions_per_login() {
    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();

    RegisterUseCase {
        users: users.clone(),
    }
    .execute(register_input("alice", "alice@example.com", Role::User))
    .await
    .unwrap();

    let uc = LoginUseCase {
        users,
        sessions,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let input = || LoginInput {
        email: "alice@example.com".to_owned(),
        password: "hunter22".to_owned(),
    };
    let first = uc.execute(input()).await.unwrap();
    let second = uc.execute(input()).await.unwrap();

    assert_ne!(first.session_id, second.session_id);
    assert_ne!(first.session_id, Uuid::nil());
}
