//! Integration tests for a user's project/badge lifecycle in the store.

#![allow(clippy::unwrap_used)]

use maintained_core::BadgeId;
use maintained_server::store::{BadgeUpdate, ProjectStore};

fn titles(store_user: &maintained_core::User) -> Vec<&str> {
    store_user.projects.iter().map(|p| p.title.as_str()).collect()
}

// =============================================================================
// Full Lifecycle
// =============================================================================

#[tokio::test]
async fn test_alice_lifecycle() {
    let store = ProjectStore::new("Maintained");

    // First contact seeds a project named after the user
    assert!(store.ensure_user("alice").await);
    let alice = store.get_user("alice").await.unwrap();
    assert!(alice.first_visit);
    assert_eq!(titles(&alice), ["alice"]);
    let starter = alice.projects[0].badge(BadgeId::new(0)).unwrap();
    assert_eq!(starter.title, "Welcome to");
    assert_eq!(starter.value, "Maintained");

    // New project lands in sorted position
    let demo = store.create_project("alice", "demo").await.unwrap();
    assert_eq!(demo.badges.len(), 1);
    let alice = store.get_user("alice").await.unwrap();
    assert_eq!(titles(&alice), ["alice", "demo"]);

    // Badge IDs continue from the last badge
    let badge = store.create_badge("alice", "demo").await.unwrap();
    assert_eq!(badge.id, BadgeId::new(1));

    // Value-only edit
    let update = BadgeUpdate {
        value: Some("v2.0".to_string()),
        ..BadgeUpdate::default()
    };
    let updated = store
        .update_badge("alice", "demo", badge.id, update)
        .await
        .unwrap();
    assert_eq!(updated.value, "v2.0");
    assert_eq!(updated.title, "New");

    // Dropping the starter project leaves only demo
    assert!(store.delete_project("alice", "alice").await);
    let alice = store.get_user("alice").await.unwrap();
    assert_eq!(titles(&alice), ["demo"]);
}

#[tokio::test]
async fn test_onboarding_and_repeat_contact() {
    let store = ProjectStore::new("Maintained");

    assert!(store.ensure_user("bob").await);
    assert!(store.clear_first_visit("bob").await);
    assert!(!store.ensure_user("bob").await);

    let bob = store.get_user("bob").await.unwrap();
    assert!(!bob.first_visit);
    assert_eq!(bob.projects.len(), 1);
    assert_eq!(bob.projects[0].badges.len(), 1);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let store = ProjectStore::new("Maintained");
    store.ensure_user("alice").await;
    store.ensure_user("bob").await;

    store.create_project("alice", "shared-name").await.unwrap();
    assert!(store.create_project("bob", "shared-name").await.is_some());

    assert!(store.delete_project("alice", "shared-name").await);
    let bob = store.get_user("bob").await.unwrap();
    assert!(bob.project("shared-name").is_some());
}

#[tokio::test]
async fn test_concurrent_edits_across_users() {
    let store = ProjectStore::new("Maintained");
    let users: Vec<String> = (0..8).map(|i| format!("user-{i}")).collect();
    for user in &users {
        store.ensure_user(user).await;
    }

    let mut tasks = Vec::new();
    for user in users.clone() {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                store.create_badge(&user, &user).await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    for user in &users {
        let snapshot = store.get_user(user).await.unwrap();
        let ids: Vec<i32> = snapshot.projects[0]
            .badges
            .iter()
            .map(|b| b.id.as_i32())
            .collect();
        assert_eq!(ids, (0..=10).collect::<Vec<_>>());
    }
}
