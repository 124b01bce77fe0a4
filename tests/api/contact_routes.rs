use std::sync::Arc;

use reqwest::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ACCESS_CONTROL_REQUEST_METHOD,
    HeaderName, ORIGIN,
};
use reqwest::{Method, StatusCode};

use serde_json::Value;

use contacts::error::MessageBody;
use contacts::model::Contact;

use crate::helpers::{FailingStore, NewContactBody, TestApp, CLIENT_ORIGIN};

#[tokio::test]
async fn create_returns_created_record_for_valid_request() {
    let app = TestApp::spawn().await;

    let res = app
        .contact_create(&NewContactBody::new("Alice", "1234567890"))
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());

    let body: Value = res.json().await.expect("Failed to decode body");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());
    assert_eq!("Alice", body["name"]);
    assert_eq!("1234567890", body["phone"]);

    let stored = app.store.list().await.unwrap();
    assert_eq!(1, stored.len());
    assert_eq!(body["id"], stored[0].id.to_string());
}

#[tokio::test]
async fn create_keeps_optional_fields() {
    let app = TestApp::spawn().await;

    let body = NewContactBody {
        email: Some("alice@example.com".into()),
        message: Some("Call after six".into()),
        ..NewContactBody::new("Alice", "1234567890")
    };
    let res = app
        .contact_create(&body)
        .await
        .expect("Failed to execute request");

    let contact: Contact = res.json().await.expect("Failed to decode contact");
    assert_eq!(Some("alice@example.com".to_string()), contact.email);
    assert_eq!(Some("Call after six".to_string()), contact.message);
}

#[tokio::test]
async fn create_returns_bad_request_for_missing_data() {
    let app = TestApp::spawn().await;

    let test_cases: Vec<(&str, NewContactBody)> = vec![
        (
            "missing name",
            NewContactBody {
                phone: Some("1234567890".into()),
                ..NewContactBody::default()
            },
        ),
        (
            "missing phone",
            NewContactBody {
                name: Some("Alice".into()),
                email: Some("alice@example.com".into()),
                ..NewContactBody::default()
            },
        ),
        ("missing both", NewContactBody::default()),
        ("empty name", NewContactBody::new("", "1234567890")),
        ("empty phone", NewContactBody::new("Alice", "")),
    ];

    for (desc, body) in test_cases {
        let res = app
            .contact_create(&body)
            .await
            .expect("Failed to execute request");

        assert_eq!(
            StatusCode::BAD_REQUEST,
            res.status(),
            "API did not fail when payload was {}",
            desc
        );
        let body: MessageBody = res.json().await.expect("Failed to decode error body");
        assert_eq!("Name and phone are required", body.message);
    }

    assert!(app.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/contacts")
        .header("Content-Type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    let body: MessageBody = res.json().await.expect("Failed to decode error body");
    assert!(!body.message.is_empty());
}

#[tokio::test]
async fn create_accepts_numeric_phone() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/contacts")
        .json(&serde_json::json!({ "name": "Al", "phone": 1234567890 }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::CREATED, res.status());
    let contact: Contact = res.json().await.expect("Failed to decode contact");
    assert_eq!("1234567890", contact.phone);
}

#[tokio::test]
async fn create_without_json_content_type_is_missing_data() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::POST, "api/contacts")
        .body(r#"{"name": "Alice", "phone": "1234567890"}"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::BAD_REQUEST, res.status());
    let body: MessageBody = res.json().await.expect("Failed to decode error body");
    assert_eq!("Name and phone are required", body.message);
    assert!(app.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_empty_array_for_no_contacts() {
    let app = TestApp::spawn().await;

    let res = app.contact_list().await.expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!(Value::Array(vec![]), res.json::<Value>().await.unwrap());
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;

    for name in ["Alice", "Bob"] {
        app.contact_create(&NewContactBody::new(name, "1234567890"))
            .await
            .expect("Failed to create contact");
    }

    let names: Vec<String> = app.contacts().await.into_iter().map(|c| c.name).collect();

    assert_eq!(vec!["Bob", "Alice"], names);
}

#[tokio::test]
async fn delete_removes_contact_from_list() {
    let app = TestApp::spawn().await;

    let alice: Contact = app
        .contact_create(&NewContactBody::new("Alice", "1234567890"))
        .await
        .expect("Failed to create contact")
        .json()
        .await
        .unwrap();
    app.contact_create(&NewContactBody::new("Bob", "0987654321"))
        .await
        .expect("Failed to create contact");

    let res = app
        .contact_delete(&alice.id.to_string())
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    let body: MessageBody = res.json().await.unwrap();
    assert_eq!("Contact deleted successfully", body.message);

    let remaining = app.contacts().await;
    assert_eq!(1, remaining.len());
    assert_eq!("Bob", remaining[0].name);
}

#[tokio::test]
async fn delete_is_ok_for_unknown_ids() {
    let app = TestApp::spawn().await;

    for id in [uuid::Uuid::new_v4().to_string(), "not-an-id".to_string()] {
        let res = app
            .contact_delete(&id)
            .await
            .expect("Failed to execute request");

        assert_eq!(StatusCode::OK, res.status(), "delete of {} failed", id);
    }
}

#[tokio::test]
async fn persistence_failures_return_500_with_driver_message() {
    let app = TestApp::spawn_with(Arc::new(FailingStore)).await;
    let expected = sqlx::Error::PoolTimedOut.to_string();

    let responses = vec![
        app.contact_create(&NewContactBody::new("Alice", "1234567890"))
            .await
            .unwrap(),
        app.contact_list().await.unwrap(),
        app.contact_delete(&uuid::Uuid::new_v4().to_string())
            .await
            .unwrap(),
    ];

    for res in responses {
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, res.status());
        let body: MessageBody = res.json().await.unwrap();
        assert_eq!(expected, body.message);
    }
}

#[tokio::test]
async fn configured_origin_is_allowed() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "api/contacts")
        .header(ORIGIN, CLIENT_ORIGIN)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(StatusCode::OK, res.status());
    assert_eq!(
        Some(CLIENT_ORIGIN),
        res.headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
    );
}

#[tokio::test]
async fn other_origins_are_refused() {
    let app = TestApp::spawn().await;

    let res = app
        .request(Method::GET, "api/contacts")
        .header(ORIGIN, "http://evil.example.com")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(res.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn preflight_allows_json_writes_with_credentials() {
    let app = TestApp::spawn().await;
    let id = uuid::Uuid::new_v4().to_string();

    let preflights = [
        ("DELETE", format!("api/contacts/{}", id)),
        ("POST", "api/contacts".to_string()),
    ];

    for (method, path) in preflights {
        let res = app
            .request(Method::OPTIONS, &path)
            .header(ORIGIN, CLIENT_ORIGIN)
            .header(ACCESS_CONTROL_REQUEST_METHOD, method)
            .header(ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .send()
            .await
            .expect("Failed to execute request");

        assert!(res.status().is_success(), "{} preflight failed", method);

        let header = |name: HeaderName| {
            res.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_lowercase)
                .unwrap_or_default()
        };
        assert_eq!(CLIENT_ORIGIN, header(ACCESS_CONTROL_ALLOW_ORIGIN));
        assert_eq!("true", header(ACCESS_CONTROL_ALLOW_CREDENTIALS));
        assert!(header(ACCESS_CONTROL_ALLOW_HEADERS).contains("content-type"));

        let methods = header(ACCESS_CONTROL_ALLOW_METHODS);
        for allowed in ["get", "post", "put", "patch", "delete"] {
            assert!(methods.contains(allowed), "{} missing from {}", allowed, methods);
        }
    }
}
