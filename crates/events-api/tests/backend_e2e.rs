//! End-to-end tests against a live SP Events backend.
//!
//! These tests read the project settings from .env.local or the environment:
//! SPEV_TEST_URL=<project url>
//! SPEV_TEST_API_KEY=<anon key>
//! SPEV_TEST_EMAIL=<user email>       (favorites tests only)
//! SPEV_TEST_PASSWORD=<user password> (favorites tests only)
//!
//! Run with: cargo test --package sp-events-api --features e2e --test backend_e2e

#![cfg(feature = "e2e")]

use std::fs;

use sp_events_api::prelude::*;

fn read_setting(name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    for path in &[".env.local", "../../.env.local", "../../../.env.local"] {
        if let Ok(contents) = fs::read_to_string(path) {
            for line in contents.lines() {
                if let Some(value) = line.strip_prefix(&prefix) {
                    return Some(value.trim().to_string());
                }
            }
        }
    }
    std::env::var(name).ok()
}

fn anon_client() -> Option<EventsClient> {
    let url = read_setting("SPEV_TEST_URL")?;
    let key = read_setting("SPEV_TEST_API_KEY")?;
    Some(EventsClient::new(url, key).unwrap())
}

async fn user_client() -> Option<(EventsClient, Session)> {
    let client = anon_client()?;
    let email = read_setting("SPEV_TEST_EMAIL")?;
    let password = read_setting("SPEV_TEST_PASSWORD")?;
    let session = client
        .sign_in_with_password(&email, &password)
        .await
        .expect("sign in should succeed with the test credentials");
    Some((client.with_access_token(&session.access_token), session))
}

#[tokio::test]
async fn test_list_events_is_sorted() {
    let Some(client) = anon_client() else {
        eprintln!("Skipping e2e test: no backend settings found");
        return;
    };

    let events = client.list_events().await.unwrap();
    println!("Got {} events", events.len());

    let starts: Vec<_> = events.iter().filter_map(|e| e.starts_at()).collect();
    assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn test_wrong_password_is_auth_error() {
    let Some(client) = anon_client() else {
        eprintln!("Skipping e2e test: no backend settings found");
        return;
    };

    let email = format!("nobody-{}@example.com", uuid::Uuid::new_v4());
    let err = client
        .sign_in_with_password(&email, "not-the-password")
        .await
        .unwrap_err();
    assert!(err.is_auth());
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_favorite_round_trip() {
    let Some((client, session)) = user_client().await else {
        eprintln!("Skipping e2e test: no test user configured");
        return;
    };

    let events = client.list_events().await.unwrap();
    let Some(event) = events.first() else {
        eprintln!("Skipping e2e test: backend has no events");
        return;
    };
    let user = client.get_user().await.unwrap();
    assert_eq!(user.id, session.user.id);

    let before = client.list_favorites(&user.id).await.unwrap();
    if before.contains(&event.id) {
        client.remove_favorite(&user.id, &event.id).await.unwrap();
    }

    client.add_favorite(&user.id, &event.id).await.unwrap();
    let during = client.list_favorites(&user.id).await.unwrap();
    assert!(during.contains(&event.id));

    client.remove_favorite(&user.id, &event.id).await.unwrap();
    let after = client.list_favorites(&user.id).await.unwrap();
    assert!(!after.contains(&event.id));

    // Put things back the way we found them.
    if before.contains(&event.id) {
        client.add_favorite(&user.id, &event.id).await.unwrap();
    }
    client.sign_out().await.unwrap();
}
