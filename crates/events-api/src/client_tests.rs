//! Unit and integration tests for the EventsClient.

use super::*;
use crate::error::{ApiError, Error};

const URL: &str = "https://project.supabase.co";

// Test: EventsClient::new() trims the trailing slash from the project URL
#[test]
fn test_client_new_normalizes_base_url() {
    let client = EventsClient::new("https://project.supabase.co/", "anon-key").unwrap();
    assert_eq!(client.base_url(), URL);
    assert_eq!(client.api_key(), "anon-key");
    assert!(client.access_token().is_none());
}

// Test: a URL without scheme is rejected
#[test]
fn test_client_rejects_url_without_scheme() {
    let result = EventsClient::new("project.supabase.co", "anon-key");
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

// Test: an empty API key is rejected
#[test]
fn test_client_rejects_empty_api_key() {
    let result = EventsClient::new(URL, "  ");
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

// Test: Debug output never shows secrets
#[test]
fn test_client_debug_redacts_secrets() {
    let client = EventsClient::new(URL, "anon-key")
        .unwrap()
        .with_access_token("user-jwt");
    let debug_str = format!("{:?}", client);
    assert!(!debug_str.contains("anon-key"));
    assert!(!debug_str.contains("user-jwt"));
    assert!(debug_str.contains(URL));
}

// Test: with_access_token keeps the rest of the configuration
#[test]
fn test_with_access_token_keeps_configuration() {
    let client = EventsClientBuilder::new(URL, "anon-key")
        .max_retries(7)
        .build()
        .unwrap();
    let authed = client.with_access_token("user-jwt");

    assert_eq!(authed.access_token(), Some("user-jwt"));
    assert_eq!(authed.max_retries(), 7);
    assert_eq!(authed.base_url(), client.base_url());
}

// Test: url() encodes PostgREST query parameters
#[test]
fn test_url_encodes_query() {
    let client = EventsClient::new(URL, "anon-key").unwrap();
    let url = client
        .url("/rest/v1/events", &[("select", "*"), ("id", "eq.a b")])
        .unwrap();
    assert_eq!(url, format!("{}/rest/v1/events?select=*&id=eq.a+b", URL));

    let empty: [(&str, &str); 0] = [];
    assert_eq!(
        client.url("/auth/v1/user", &empty).unwrap(),
        format!("{}/auth/v1/user", URL)
    );
}

// Test: builder defaults
#[test]
fn test_builder_default_values() {
    let client = EventsClientBuilder::new(URL, "anon-key").build().unwrap();

    assert_eq!(client.max_retries(), DEFAULT_MAX_RETRIES);
    assert_eq!(
        client.initial_backoff(),
        Duration::from_secs(DEFAULT_INITIAL_BACKOFF_SECS)
    );
    assert_eq!(
        client.max_backoff(),
        Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS)
    );
    assert_eq!(DEFAULT_TIMEOUT_SECS, 30);
}

// Test: calculate_backoff uses Retry-After when provided, capped at max
#[test]
fn test_calculate_backoff_with_retry_after() {
    let client = EventsClient::new(URL, "anon-key").unwrap();

    assert_eq!(client.calculate_backoff(0, Some(5)), Duration::from_secs(5));
    assert_eq!(
        client.calculate_backoff(0, Some(60)),
        Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS)
    );
}

// Test: calculate_backoff is exponential without Retry-After
#[test]
fn test_calculate_backoff_exponential() {
    let client = EventsClient::new(URL, "anon-key").unwrap();

    assert_eq!(client.calculate_backoff(0, None), Duration::from_secs(1));
    assert_eq!(client.calculate_backoff(1, None), Duration::from_secs(2));
    assert_eq!(client.calculate_backoff(2, None), Duration::from_secs(4));
    assert_eq!(
        client.calculate_backoff(10, None),
        Duration::from_secs(DEFAULT_MAX_BACKOFF_SECS)
    );
}

// Test: custom backoff settings
#[test]
fn test_builder_custom_backoff() {
    let client = EventsClientBuilder::new(URL, "anon-key")
        .initial_backoff(Duration::from_secs(2))
        .max_backoff(Duration::from_secs(10))
        .build()
        .unwrap();

    assert_eq!(client.calculate_backoff(0, None), Duration::from_secs(2));
    assert_eq!(client.calculate_backoff(10, None), Duration::from_secs(10));
    assert_eq!(client.calculate_backoff(0, Some(60)), Duration::from_secs(10));
}

mod wiremock_tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

    fn test_client(server: &MockServer) -> EventsClient {
        EventsClientBuilder::new(server.uri(), "anon-key")
            .initial_backoff(Duration::from_secs(0))
            .build()
            .unwrap()
    }

    // Test: list_events sends the key headers and the ordering clause
    #[tokio::test]
    async fn test_list_events_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .and(query_param("select", "*"))
            .and(query_param("order", "date_start.asc.nullslast"))
            .and(header("apikey", "anon-key"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "1", "title": "Jazz Night", "date_start": "2025-05-01T20:00:00+00:00"},
                {"id": "2", "title": "Sarau", "price_min": 10, "price_max": 20}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server).with_access_token("user-jwt");
        let events = client.list_events().await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].title, "Jazz Night");
        assert_eq!(events[1].price_max, Some(20.0));
    }

    // Test: anonymous requests use the API key as bearer
    #[tokio::test]
    async fn test_anonymous_request_uses_api_key_as_bearer() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .and(header("Authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let events = test_client(&mock_server).list_events().await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_list_favorites() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/favorites"))
            .and(query_param("select", "event_id"))
            .and(query_param("user_id", "eq.user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"event_id": "1"},
                {"event_id": "3"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let ids = test_client(&mock_server)
            .list_favorites("user-1")
            .await
            .unwrap();
        assert_eq!(ids, vec!["1".to_string(), "3".to_string()]);
    }

    // Test: add_favorite posts the pair with return=minimal
    #[tokio::test]
    async fn test_add_favorite() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/favorites"))
            .and(header("Prefer", "return=minimal"))
            .and(body_json(serde_json::json!({"user_id": "user-1", "event_id": "7"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&mock_server)
            .await;

        test_client(&mock_server)
            .add_favorite("user-1", "7")
            .await
            .unwrap();
    }

    // Test: a duplicate favorite maps to Conflict
    #[tokio::test]
    async fn test_add_favorite_conflict() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/v1/favorites"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint",
                "details": null,
                "hint": null
            })))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .add_favorite("user-1", "7")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Conflict { .. })));
    }

    // Test: remove_favorite deletes by both columns
    #[tokio::test]
    async fn test_remove_favorite() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/v1/favorites"))
            .and(query_param("user_id", "eq.user-1"))
            .and(query_param("event_id", "eq.7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        test_client(&mock_server)
            .remove_favorite("user-1", "7")
            .await
            .unwrap();
    }

    // Test: GET retries on 429 and succeeds
    #[tokio::test]
    async fn test_get_retry_on_429_then_success() {
        let mock_server = MockServer::start().await;
        let call_count = Arc::new(AtomicU32::new(0));

        struct RetryThenSuccessResponder {
            call_count: Arc<AtomicU32>,
        }

        impl Respond for RetryThenSuccessResponder {
            fn respond(&self, _request: &Request) -> ResponseTemplate {
                let count = self.call_count.fetch_add(1, Ordering::SeqCst);
                if count == 0 {
                    ResponseTemplate::new(429)
                        .insert_header("Retry-After", "0")
                        .set_body_string("Rate limited")
                } else {
                    ResponseTemplate::new(200).set_body_json(serde_json::json!([]))
                }
            }
        }

        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .respond_with(RetryThenSuccessResponder {
                call_count: call_count.clone(),
            })
            .expect(2)
            .mount(&mock_server)
            .await;

        let events = test_client(&mock_server).list_events().await.unwrap();
        assert!(events.is_empty());
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    // Test: GET gives up after max retries
    #[tokio::test]
    async fn test_get_fails_after_max_retries() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
            .expect(3)
            .mount(&mock_server)
            .await;

        let client = EventsClientBuilder::new(mock_server.uri(), "anon-key")
            .max_retries(2)
            .build()
            .unwrap();
        let err = client.list_events().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::RateLimit { .. })));
    }

    // Test: 401 maps to Auth with the backend's message
    #[tokio::test]
    async fn test_expired_jwt_is_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/favorites"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "code": "PGRST301",
                "message": "JWT expired"
            })))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .with_access_token("old-jwt")
            .list_favorites("user-1")
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert!(err.to_string().contains("JWT expired"));
    }

    // Test: 500 maps to Http
    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/v1/events"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server).list_events().await.unwrap_err();
        match err {
            Error::Api(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Expected Http, got {:?}", other),
        }
    }

    // Test: password sign-in decodes the session and fills in expiry
    #[tokio::test]
    async fn test_sign_in_with_password() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(body_json(serde_json::json!({
                "email": "ana@example.com",
                "password": "hunter22"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "refresh",
                "user": {"id": "user-1", "email": "ana@example.com"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = test_client(&mock_server)
            .sign_in_with_password("ana@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(session.user.id, "user-1");
        assert!(session.expires_at.is_some());
        assert!(!session.is_expired(chrono::Utc::now()));
    }

    // Test: wrong credentials map to Auth, not Validation
    #[tokio::test]
    async fn test_sign_in_invalid_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": 400,
                "error_code": "invalid_credentials",
                "msg": "Invalid login credentials"
            })))
            .mount(&mock_server)
            .await;

        let err = test_client(&mock_server)
            .sign_in_with_password("ana@example.com", "wrong")
            .await
            .unwrap_err();
        match err {
            Error::Api(ApiError::Auth { message }) => {
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("Expected Auth, got {:?}", other),
        }
    }

    // Test: refresh uses the refresh_token grant
    #[tokio::test]
    async fn test_refresh_session() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_json(serde_json::json!({"refresh_token": "refresh"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "jwt-2",
                "expires_in": 3600,
                "expires_at": 1999999999,
                "refresh_token": "refresh-2",
                "user": {"id": "user-1"}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let session = test_client(&mock_server)
            .refresh_session("refresh")
            .await
            .unwrap();
        assert_eq!(session.access_token, "jwt-2");
        assert_eq!(session.expires_at, Some(1999999999));
    }

    // Test: get_user without a token fails locally
    #[tokio::test]
    async fn test_get_user_requires_token() {
        let mock_server = MockServer::start().await;
        let err = test_client(&mock_server).get_user().await.unwrap_err();
        assert!(err.is_auth());
    }

    // Test: sign_out posts to logout with the user's token
    #[tokio::test]
    async fn test_sign_out() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("Authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        test_client(&mock_server)
            .with_access_token("user-jwt")
            .sign_out()
            .await
            .unwrap();
    }
}
