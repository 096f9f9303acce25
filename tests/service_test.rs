//! Service integration tests.
//!
//! Each test runs the real services and `Persistence` unit of work against a
//! fresh in-memory SQLite database with migrations applied.

use std::collections::HashSet;

use pr_reviewer::config::Config;
use pr_reviewer::domain::{PullRequestStatus, ReviewerPicker, Team, TeamMember};
use pr_reviewer::errors::{AppError, Resource};
use pr_reviewer::infra::{Database, Persistence, UnitOfWork};
use pr_reviewer::services::{
    PullRequestService, ServiceContainer, Services, TeamService, UserService,
};

async fn setup_with_seed(seed: u64) -> (Database, Services) {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        database_max_connections: 1,
        ..Config::default()
    };

    let db = Database::connect(&config)
        .await
        .expect("in-memory database should start");
    let services = Services::with_picker(db.get_connection(), ReviewerPicker::seeded(seed));

    (db, services)
}

async fn setup() -> (Database, Services) {
    setup_with_seed(42).await
}

fn team(name: &str, members: &[(&str, &str, bool)]) -> Team {
    Team {
        team_name: name.to_string(),
        members: members
            .iter()
            .map(|(id, username, active)| TeamMember::new(*id, *username, *active))
            .collect(),
    }
}

fn payments() -> Team {
    team(
        "payments",
        &[("u1", "Alice", true), ("u2", "Bob", true), ("u3", "Carol", false)],
    )
}

fn platform() -> Team {
    team(
        "platform",
        &[
            ("p1", "Paul", true),
            ("p2", "Petra", true),
            ("p3", "Pavel", true),
            ("p4", "Pia", true),
        ],
    )
}

fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// =============================================================================
// Teams
// =============================================================================

#[tokio::test]
async fn test_create_team_returns_payload_and_get_team_reads_it_back() {
    let (_db, services) = setup().await;

    let created = services.teams().create_team(payments()).await.unwrap();
    assert_eq!(created, payments());

    let fetched = services.teams().get_team("payments").await.unwrap();
    assert_eq!(fetched.team_name, "payments");
    assert_eq!(fetched.members, payments().members);
}

#[tokio::test]
async fn test_get_team_trims_name() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let fetched = services.teams().get_team("  payments \t").await.unwrap();
    assert_eq!(fetched.members.len(), 3);
}

#[tokio::test]
async fn test_get_unknown_team_is_not_found() {
    let (_db, services) = setup().await;

    let result = services.teams().get_team("nobody").await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_duplicate_team_fails_without_touching_rows() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let again = team("payments", &[("u1", "Renamed", false), ("u9", "Zed", true)]);
    let result = services.teams().create_team(again).await;
    assert!(matches!(result, Err(AppError::AlreadyExists(Resource::Team))));

    let fetched = services.teams().get_team("payments").await.unwrap();
    assert_eq!(fetched.members, payments().members);

    // u9 was never committed
    let missing = services.pull_requests().get_user_reviews("u9".to_string()).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_reused_user_keeps_membership_and_activity() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let backend = team("backend", &[("u1", "Alice Renamed", false), ("u7", "Gus", true)]);
    services.teams().create_team(backend).await.unwrap();

    let payments = services.teams().get_team("payments").await.unwrap();
    let alice = payments.members.iter().find(|m| m.user_id == "u1").unwrap();
    assert_eq!(alice.username, "Alice Renamed");
    assert!(alice.is_active);

    let backend = services.teams().get_team("backend").await.unwrap();
    let member_ids: HashSet<String> = backend.members.iter().map(|m| m.user_id.clone()).collect();
    assert_eq!(member_ids, ids(&["u1", "u7"]));
}

#[tokio::test]
async fn test_racing_team_insert_maps_to_team_exists() {
    let (db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    // Bypasses the name check, as a concurrent create would
    let uow = Persistence::new(db.get_connection());
    let result = uow.teams().create("payments").await;
    assert!(matches!(result, Err(AppError::AlreadyExists(Resource::Team))));
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn test_failed_transaction_discards_earlier_writes() {
    let (db, _services) = setup().await;
    let uow = Persistence::new(db.get_connection());

    let result: Result<(), AppError> = pr_reviewer::with_transaction!(uow, |ctx| {
        ctx.users()
            .upsert_many(&[TeamMember::new("w1", "Walt", true)])
            .await?;
        Err::<(), _>(AppError::internal("abort after write"))
    });

    assert!(matches!(result, Err(AppError::Internal(ref msg)) if msg == "abort after write"));
    assert!(!uow.users().exists("w1").await.unwrap());
}

#[tokio::test]
async fn test_successful_transaction_commits_writes() {
    let (db, _services) = setup().await;
    let uow = Persistence::new(db.get_connection());

    let result: Result<(), AppError> = pr_reviewer::with_transaction!(uow, |ctx| {
        ctx.users()
            .upsert_many(&[TeamMember::new("w2", "Wendy", true)])
            .await
    });

    assert!(result.is_ok());
    assert!(uow.users().exists("w2").await.unwrap());
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_set_is_active_returns_updated_user() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let user = services
        .users()
        .set_is_active("u2".to_string(), false)
        .await
        .unwrap();

    assert_eq!(user.user_id, "u2");
    assert_eq!(user.username, "Bob");
    assert_eq!(user.team_name.as_deref(), Some("payments"));
    assert!(!user.is_active);

    let fetched = services.teams().get_team("payments").await.unwrap();
    let bob = fetched.members.iter().find(|m| m.user_id == "u2").unwrap();
    assert!(!bob.is_active);
}

#[tokio::test]
async fn test_set_is_active_unknown_user() {
    let (_db, services) = setup().await;

    let result = services.users().set_is_active("ghost".to_string(), true).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

// =============================================================================
// Pull request creation
// =============================================================================

#[tokio::test]
async fn test_payments_scenario_assigns_only_eligible_reviewer() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let pr = services
        .pull_requests()
        .create_pull_request("pr-1".to_string(), "Add search".to_string(), "u1".to_string())
        .await
        .unwrap();

    assert_eq!(pr.id, "pr-1");
    assert_eq!(pr.name, "Add search");
    assert_eq!(pr.author_id, "u1");
    assert_eq!(pr.status, PullRequestStatus::Opened);
    assert_eq!(pr.reviewer_ids(), vec!["u2".to_string()]);
}

#[tokio::test]
async fn test_create_assigns_two_distinct_active_teammates() {
    let (_db, services) = setup().await;
    services.teams().create_team(platform()).await.unwrap();

    for i in 0..10 {
        let pr = services
            .pull_requests()
            .create_pull_request(format!("pr-{}", i), "Refactor".to_string(), "p1".to_string())
            .await
            .unwrap();

        let reviewers: HashSet<String> = pr.reviewer_ids().into_iter().collect();
        assert_eq!(reviewers.len(), 2);
        assert!(!reviewers.contains("p1"));
        assert!(reviewers.is_subset(&ids(&["p2", "p3", "p4"])));
        assert!(pr.reviewers.iter().all(|r| r.is_active));
    }
}

#[tokio::test]
async fn test_create_duplicate_pull_request() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    prs.create_pull_request("pr-1".to_string(), "First".to_string(), "u1".to_string())
        .await
        .unwrap();

    let result = prs
        .create_pull_request("pr-1".to_string(), "Second".to_string(), "u2".to_string())
        .await;
    assert!(matches!(
        result,
        Err(AppError::AlreadyExists(Resource::PullRequest))
    ));
}

#[tokio::test]
async fn test_racing_pull_request_insert_maps_to_pr_exists() {
    let (db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();
    services
        .pull_requests()
        .create_pull_request("pr-1".to_string(), "First".to_string(), "u1".to_string())
        .await
        .unwrap();

    let uow = Persistence::new(db.get_connection());
    let result = uow.pull_requests().create("pr-1", "Second", "u2").await;
    assert!(matches!(
        result,
        Err(AppError::AlreadyExists(Resource::PullRequest))
    ));
}

#[tokio::test]
async fn test_create_with_unknown_author() {
    let (_db, services) = setup().await;

    let result = services
        .pull_requests()
        .create_pull_request("pr-1".to_string(), "Orphan".to_string(), "ghost".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_create_without_candidates_rolls_back() {
    let (_db, services) = setup().await;
    services
        .teams()
        .create_team(team("solo", &[("s1", "Sam", true), ("s2", "Sue", false)]))
        .await
        .unwrap();

    let result = services
        .pull_requests()
        .create_pull_request("pr-solo".to_string(), "Lonely".to_string(), "s1".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NoReviewersAvailable)));

    let merged = services
        .pull_requests()
        .merge_pull_request("pr-solo".to_string())
        .await;
    assert!(matches!(merged, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_reviewer_selection_varies_between_pull_requests() {
    let (_db, services) = setup_with_seed(7).await;
    services.teams().create_team(platform()).await.unwrap();

    let mut seen = HashSet::new();
    for i in 0..20 {
        let pr = services
            .pull_requests()
            .create_pull_request(format!("pr-{}", i), "Tweak".to_string(), "p1".to_string())
            .await
            .unwrap();
        seen.insert(pr.reviewer_ids());
    }

    assert!(seen.len() > 1, "always picked {:?}", seen);
}

// =============================================================================
// Merge
// =============================================================================

#[tokio::test]
async fn test_merge_unknown_pull_request() {
    let (_db, services) = setup().await;

    let result = services
        .pull_requests()
        .merge_pull_request("missing".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_merge_is_repeatable_and_keeps_reviewers() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    prs.create_pull_request("pr-1".to_string(), "Ship".to_string(), "u1".to_string())
        .await
        .unwrap();

    let merged = prs.merge_pull_request("pr-1".to_string()).await.unwrap();
    assert_eq!(merged.status, PullRequestStatus::Merged);
    assert_eq!(merged.reviewer_ids(), vec!["u2".to_string()]);

    let again = prs.merge_pull_request("pr-1".to_string()).await.unwrap();
    assert_eq!(again.status, PullRequestStatus::Merged);
}

// =============================================================================
// Reassignment
// =============================================================================

#[tokio::test]
async fn test_reassign_after_merge_is_rejected() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    prs.create_pull_request("pr-1".to_string(), "Ship".to_string(), "u1".to_string())
        .await
        .unwrap();
    prs.merge_pull_request("pr-1".to_string()).await.unwrap();

    let result = prs
        .reassign_pull_request("pr-1".to_string(), "u2".to_string())
        .await;
    assert!(matches!(result, Err(AppError::AlreadyMerged)));
}

#[tokio::test]
async fn test_reassign_picks_remaining_teammate() {
    let (_db, services) = setup().await;
    services.teams().create_team(platform()).await.unwrap();

    let prs = services.pull_requests();
    let pr = prs
        .create_pull_request("pr-1".to_string(), "Refactor".to_string(), "p1".to_string())
        .await
        .unwrap();

    let current = pr.reviewer_ids();
    let old = current[0].clone();
    let kept = current[1].clone();
    let expected_new = ["p2", "p3", "p4"]
        .into_iter()
        .find(|id| !current.iter().any(|c| c == *id))
        .unwrap();

    let updated = prs
        .reassign_pull_request("pr-1".to_string(), old.clone())
        .await
        .unwrap();

    let reviewers: HashSet<String> = updated.reviewer_ids().into_iter().collect();
    assert_eq!(reviewers, ids(&[kept.as_str(), expected_new]));
    assert!(!reviewers.contains(&old));

    let old_reviews = prs.get_user_reviews(old).await.unwrap();
    assert!(old_reviews.pull_requests.is_empty());
}

#[tokio::test]
async fn test_reassign_author_is_not_assigned() {
    let (_db, services) = setup().await;
    services.teams().create_team(platform()).await.unwrap();

    let prs = services.pull_requests();
    prs.create_pull_request("pr-1".to_string(), "Refactor".to_string(), "p1".to_string())
        .await
        .unwrap();

    let result = prs
        .reassign_pull_request("pr-1".to_string(), "p1".to_string())
        .await;
    assert!(matches!(result, Err(AppError::UserNotAssigned)));
}

#[tokio::test]
async fn test_reassign_without_candidate() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    prs.create_pull_request("pr-1".to_string(), "Ship".to_string(), "u1".to_string())
        .await
        .unwrap();

    let result = prs
        .reassign_pull_request("pr-1".to_string(), "u2".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NoReviewersAvailable)));

    let pr = prs.merge_pull_request("pr-1".to_string()).await.unwrap();
    assert_eq!(pr.reviewer_ids(), vec!["u2".to_string()]);
}

#[tokio::test]
async fn test_reassign_unknown_pull_request_or_user() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    let missing_pr = prs
        .reassign_pull_request("missing".to_string(), "u2".to_string())
        .await;
    assert!(matches!(missing_pr, Err(AppError::NotFound)));

    prs.create_pull_request("pr-1".to_string(), "Ship".to_string(), "u1".to_string())
        .await
        .unwrap();
    let missing_user = prs
        .reassign_pull_request("pr-1".to_string(), "ghost".to_string())
        .await;
    assert!(matches!(missing_user, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_reassign_of_unassigned_reviewer_is_a_no_op() {
    let (_db, services) = setup().await;
    services.teams().create_team(platform()).await.unwrap();

    let prs = services.pull_requests();
    let pr = prs
        .create_pull_request("pr-1".to_string(), "Refactor".to_string(), "p1".to_string())
        .await
        .unwrap();

    let bystander = ["p2", "p3", "p4"]
        .into_iter()
        .find(|id| !pr.has_reviewer(id))
        .unwrap();

    let after = prs
        .reassign_pull_request("pr-1".to_string(), bystander.to_string())
        .await
        .unwrap();

    assert_eq!(after.reviewer_ids(), pr.reviewer_ids());
}

// =============================================================================
// Review listings
// =============================================================================

#[tokio::test]
async fn test_user_reviews_empty_and_populated() {
    let (_db, services) = setup().await;
    services.teams().create_team(payments()).await.unwrap();

    let prs = services.pull_requests();
    let empty = prs.get_user_reviews("u2".to_string()).await.unwrap();
    assert_eq!(empty.user_id, "u2");
    assert!(empty.pull_requests.is_empty());

    prs.create_pull_request("pr-2".to_string(), "Second".to_string(), "u1".to_string())
        .await
        .unwrap();
    prs.create_pull_request("pr-1".to_string(), "First".to_string(), "u1".to_string())
        .await
        .unwrap();
    prs.merge_pull_request("pr-2".to_string()).await.unwrap();

    let reviews = prs.get_user_reviews("u2".to_string()).await.unwrap();
    let listed: Vec<(&str, PullRequestStatus)> = reviews
        .pull_requests
        .iter()
        .map(|p| (p.id.as_str(), p.status))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("pr-1", PullRequestStatus::Opened),
            ("pr-2", PullRequestStatus::Merged)
        ]
    );
    assert!(reviews.pull_requests.iter().all(|p| p.author_id == "u1"));
}

#[tokio::test]
async fn test_user_reviews_unknown_user() {
    let (_db, services) = setup().await;

    let result = services
        .pull_requests()
        .get_user_reviews("ghost".to_string())
        .await;
    assert!(matches!(result, Err(AppError::NotFound)));
}
