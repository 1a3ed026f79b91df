use uuid::Uuid;

use matchday_api::domain::types::{TeamFilter, TeamPatch, TeamSortBy};
use matchday_api::error::ApiError;
use matchday_api::usecase::team::{
    AddTeamInput, AddTeamUseCase, GetTeamUseCase, RemoveTeamUseCase, SearchTeamsInput,
    SearchTeamsUseCase, UpdateTeamUseCase,
};
use matchday_domain::pagination::{PageRequest, Sort};

use crate::helpers::{MockTeamRepo, test_team};

fn add_input(name: &str, country: &str) -> AddTeamInput {
    AddTeamInput {
        name: name.to_owned(),
        country: country.to_owned(),
    }
}

// ── Create / uniqueness ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_then_fetch_team() {
    let repo = MockTeamRepo::empty();
    let created = AddTeamUseCase {
        teams: repo.clone(),
    }
    .execute(add_input("Arsenal", "England"))
    .await
    .unwrap();

    let fetched = GetTeamUseCase { teams: repo }.execute(created.id).await.unwrap();
    assert_eq!(fetched.name, "Arsenal");
    assert_eq!(fetched.country, "England");
}

#[tokio::test]
async fn should_always_reject_case_insensitive_duplicate_and_accept_distinct() {
    let repo = MockTeamRepo::empty();
    let uc = AddTeamUseCase {
        teams: repo.clone(),
    };
    uc.execute(add_input("Arsenal", "England")).await.unwrap();

    for name in ["Arsenal", "arsenal", "ARSENAL", "aRsEnAl"] {
        let result = uc.execute(add_input(name, "England")).await;
        assert!(matches!(result, Err(ApiError::TeamExists)), "name {name}");
    }

    assert!(uc.execute(add_input("Chelsea", "England")).await.is_ok());
    assert_eq!(repo.teams.lock().unwrap().len(), 2);
}

// ── Update / delete ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_apply_partial_update() {
    let repo = MockTeamRepo::empty();
    let created = AddTeamUseCase {
        teams: repo.clone(),
    }
    .execute(add_input("Arsenal", "England"))
    .await
    .unwrap();

    let updated = UpdateTeamUseCase { teams: repo }
        .execute(
            created.id,
            TeamPatch {
                name: None,
                country: Some("Wales".to_owned()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Arsenal");
    assert_eq!(updated.country, "Wales");
}

#[tokio::test]
async fn should_recheck_uniqueness_only_for_renames() {
    let repo = MockTeamRepo::with(vec![
        test_team("Arsenal", "England"),
        test_team("Chelsea", "England"),
    ]);
    let chelsea_id = repo.teams.lock().unwrap()[1].id;

    let uc = UpdateTeamUseCase {
        teams: repo.clone(),
    };
    let result = uc
        .execute(
            chelsea_id,
            TeamPatch {
                name: Some("Arsenal".to_owned()),
                country: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::TeamExists)));

    // Same name, different casing, same team: not a collision.
    let result = uc
        .execute(
            chelsea_id,
            TeamPatch {
                name: Some("CHELSEA".to_owned()),
                country: None,
            },
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn should_remove_team_idempotently() {
    let repo = MockTeamRepo::with(vec![test_team("Arsenal", "England")]);
    let id = repo.teams.lock().unwrap()[0].id;

    let uc = RemoveTeamUseCase {
        teams: repo.clone(),
    };
    uc.execute(id).await.unwrap();
    assert!(repo.teams.lock().unwrap().is_empty());

    // Repeating the delete, or deleting an id that never existed, succeeds.
    assert!(uc.execute(id).await.is_ok());
    assert!(uc.execute(Uuid::now_v7()).await.is_ok());
}

// ── Full role-gate scenario ──────────────────────────────────────────────────

#[tokio::test]
async fn should_gate_team_creation_on_admin_role_end_to_end() {
    use matchday_api::domain::repository::SessionStore;
    use matchday_api::extractors::Identity;
    use matchday_api::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
    use matchday_auth_types::token::validate_token;
    use matchday_domain::user::Role;

    use crate::helpers::{MockSessionStore, MockUserRepo, TEST_JWT_SECRET};

    let users = MockUserRepo::empty();
    let sessions = MockSessionStore::empty();
    let teams = MockTeamRepo::empty();

    let register = |username: &str, email: &str, role: Role| RegisterInput {
        username: username.to_owned(),
        email: email.to_owned(),
        password: "hunter22".to_owned(),
        role,
    };
    let login_as = |email: &str| LoginInput {
        email: email.to_owned(),
        password: "hunter22".to_owned(),
    };
    let identity_for = async |login: &matchday_api::usecase::auth::LoginOutput| {
        let info = validate_token(&login.token, TEST_JWT_SECRET).unwrap();
        let record = sessions.get(login.session_id).await.unwrap().unwrap();
        Identity {
            user_id: info.user_id,
            email: info.email,
            role: record.role,
            session_id: login.session_id,
        }
    };

    let register_uc = RegisterUseCase {
        users: users.clone(),
    };
    let login_uc = LoginUseCase {
        users: users.clone(),
        sessions: sessions.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    // Plain user is rejected by the role gate before any team is written.
    register_uc
        .execute(register("plain", "plain@example.com", Role::User))
        .await
        .unwrap();
    let login = login_uc.execute(login_as("plain@example.com")).await.unwrap();
    let identity = identity_for(&login).await;
    assert!(matches!(identity.require_admin(), Err(ApiError::Forbidden)));

    // Admin passes the gate and creates the team.
    register_uc
        .execute(register("boss", "boss@example.com", Role::Admin))
        .await
        .unwrap();
    let login = login_uc.execute(login_as("boss@example.com")).await.unwrap();
    let identity = identity_for(&login).await;
    identity.require_admin().unwrap();

    let add = AddTeamUseCase {
        teams: teams.clone(),
    };
    add.execute(add_input("Alpha", "England")).await.unwrap();
    let result = add.execute(add_input("alpha", "England")).await;
    assert!(matches!(result, Err(ApiError::TeamExists)));
}

// ── Search ───────────────────────────────────────────────────────────────────

fn search_input(filter: TeamFilter, page: PageRequest) -> SearchTeamsInput {
    SearchTeamsInput {
        filter,
        sort_by: TeamSortBy::Name,
        order: Sort::Asc,
        page,
    }
}

#[tokio::test]
async fn should_filter_by_case_insensitive_substring() {
    let repo = MockTeamRepo::with(vec![
        test_team("Manchester United", "England"),
        test_team("Manchester City", "England"),
        test_team("Real Madrid", "Spain"),
    ]);
    let uc = SearchTeamsUseCase { teams: repo };

    let page = uc
        .execute(search_input(
            TeamFilter {
                name: Some("manchester".to_owned()),
                country: None,
            },
            PageRequest::default(),
        ))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 2);
    assert!(page.items.iter().all(|t| t.name.contains("Manchester")));
}

#[tokio::test]
async fn should_page_results_with_ceil_total_pages() {
    let teams: Vec<_> = (0..23)
        .map(|i| test_team(&format!("Team {i:02}"), "England"))
        .collect();
    let uc = SearchTeamsUseCase {
        teams: MockTeamRepo::with(teams),
    };

    let page = uc
        .execute(search_input(
            TeamFilter::default(),
            PageRequest::from_params(Some(3), Some(10)),
        ))
        .await
        .unwrap();

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.pagination.total, 23);
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.current_page, 3);
    assert_eq!(page.pagination.page_size, 10);
}

#[tokio::test]
async fn should_coerce_out_of_range_pagination_to_defaults() {
    let teams: Vec<_> = (0..15)
        .map(|i| test_team(&format!("Team {i:02}"), "England"))
        .collect();
    let uc = SearchTeamsUseCase {
        teams: MockTeamRepo::with(teams),
    };

    let page = uc
        .execute(search_input(
            TeamFilter::default(),
            PageRequest::from_params(Some(0), Some(-5)),
        ))
        .await
        .unwrap();

    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.page_size, 10);
    assert_eq!(page.items.len(), 10);
}

#[tokio::test]
async fn should_return_same_results_for_repeated_search() {
    let repo = MockTeamRepo::with(vec![
        test_team("Arsenal", "England"),
        test_team("Chelsea", "England"),
    ]);
    let uc = SearchTeamsUseCase { teams: repo };

    let first = uc
        .execute(search_input(TeamFilter::default(), PageRequest::default()))
        .await
        .unwrap();
    let second = uc
        .execute(search_input(TeamFilter::default(), PageRequest::default()))
        .await
        .unwrap();

    let ids = |page: &matchday_domain::pagination::Paginated<matchday_api::domain::types::Team>| {
        page.items.iter().map(|t| t.id).collect::<Vec<Uuid>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.pagination, second.pagination);
}
