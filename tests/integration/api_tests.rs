//! API integration tests

use lending_desk::{api, config::AppConfig, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

/// Start a server on an ephemeral port and return its API base URL
async fn spawn_app() -> String {
    let state = AppState::new(AppConfig::default());
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    format!("http://{}/api/v1", addr)
}

async fn register_book(client: &Client, base: &str, title: &str, author: &str) -> Value {
    let response = client
        .post(format!("{}/books", base))
        .json(&json!({
            "title": title,
            "author": author,
            "isbn": "978-0-261-10221-7",
            "publication_date": "1937-09-21",
            "genre": "fantasy"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn register_member(client: &Client, base: &str, name: &str) -> Value {
    let response = client
        .post(format!("{}/members", base))
        .json(&json!({
            "name": name,
            "email": format!("{}@example.org", name.to_lowercase())
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_book() {
    let base = spawn_app().await;
    let client = Client::new();

    let book = register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;
    assert_eq!(book["id"], 1);
    assert_eq!(book["available"], true);
    assert_eq!(book["publication_date"], "1937-09-21");

    let second = register_book(&client, &base, "Dune", "Frank Herbert").await;
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn test_register_invalid_member() {
    let base = spawn_app().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/members", base))
        .json(&json!({ "name": "Ada", "email": "not-an-email" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_loan_lifecycle() {
    let base = spawn_app().await;
    let client = Client::new();

    let book = register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;
    let ada = register_member(&client, &base, "Ada").await;
    let grace = register_member(&client, &base, "Grace").await;

    // Borrow
    let response = client
        .post(format!("{}/loans", base))
        .json(&json!({ "book_id": book["id"], "member_id": ada["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let loan: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(loan["returned"], false);
    let loan_id = loan["id"].as_i64().expect("No loan ID");

    let loan_date: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(loan["loan_date"].clone()).expect("Bad loan date");
    let due_date: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(loan["due_date"].clone()).expect("Bad due date");
    assert_eq!(due_date - loan_date, chrono::Duration::days(14));

    // Book unavailable, member holds it
    let book_now: Value = client
        .get(format!("{}/books/{}", base, book["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book_now["available"], false);

    let held: Value = client
        .get(format!("{}/members/{}/books", base, ada["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(held.as_array().map(Vec::len), Some(1));
    assert_eq!(held[0]["title"], "The Hobbit");

    // Second borrower is refused
    let response = client
        .post(format!("{}/loans", base))
        .json(&json!({ "book_id": book["id"], "member_id": grace["id"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Return
    let response = client
        .post(format!("{}/loans/{}/return", base, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let returned: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(returned["returned"], true);

    // Returning twice is refused
    let response = client
        .post(format!("{}/loans/{}/return", base, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let book_now: Value = client
        .get(format!("{}/books/{}", base, book["id"]))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book_now["available"], true);

    let active: Value = client
        .get(format!("{}/loans", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(active.as_array().map(Vec::len), Some(0));

    let all: Value = client
        .get(format!("{}/loans?status=all", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_renew_loan() {
    let base = spawn_app().await;
    let client = Client::new();

    let book = register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;
    let ada = register_member(&client, &base, "Ada").await;

    let loan: Value = client
        .post(format!("{}/loans", base))
        .json(&json!({ "book_id": book["id"], "member_id": ada["id"] }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    // Default configuration allows two renewals
    for expected in 1..=2i64 {
        let response = client
            .post(format!("{}/loans/{}/renew", base, loan["id"]))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["renewals"], expected);
    }

    let response = client
        .post(format!("{}/loans/{}/renew", base, loan["id"]))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "MaxRenewsReached");
}

#[tokio::test]
async fn test_unknown_ids() {
    let base = spawn_app().await;
    let client = Client::new();

    let book = register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;

    let response = client
        .post(format!("{}/loans", base))
        .json(&json!({ "book_id": book["id"], "member_id": 42 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchMember");

    for path in ["books/9", "members/9", "members/9/books", "loans/9"] {
        let response = client
            .get(format!("{}/{}", base, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", path);
    }
}

#[tokio::test]
async fn test_search_books() {
    let base = spawn_app().await;
    let client = Client::new();

    register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;
    register_book(&client, &base, "Dune", "Frank Herbert").await;

    let found: Value = client
        .get(format!("{}/books?author=TOLKIEN", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    assert_eq!(found[0]["title"], "The Hobbit");

    let by_isbn: Value = client
        .get(format!("{}/books?isbn=9780261102217", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(by_isbn[0]["id"], 1);

    let all: Value = client
        .get(format!("{}/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_stats() {
    let base = spawn_app().await;
    let client = Client::new();

    let book = register_book(&client, &base, "The Hobbit", "J.R.R. Tolkien").await;
    register_book(&client, &base, "Dune", "Frank Herbert").await;
    let ada = register_member(&client, &base, "Ada").await;
    client
        .post(format!("{}/loans", base))
        .json(&json!({ "book_id": book["id"], "member_id": ada["id"] }))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .get(format!("{}/stats", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["books"]["total"], 2);
    assert_eq!(body["books"]["on_loan"], 1);
    assert_eq!(body["members"]["borrowing"], 1);
    assert_eq!(body["loans"]["active"], 1);
    assert_eq!(body["loans"]["overdue"], 0);
}

#[tokio::test]
async fn test_openapi_document() {
    let base = spawn_app().await;
    let client = Client::new();

    let root = base.trim_end_matches("/api/v1");
    let response = client
        .get(format!("{}/api-docs/openapi.json", root))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["paths"]["/loans"].is_object());
}
