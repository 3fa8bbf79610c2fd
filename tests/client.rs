//! Client tests against a mocked fintrack server

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{bearer_token, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fintrack::client::{resolve_user_id, ClientError, FinanceClient, StoredToken, TokenStore};
use fintrack::models::{
    ExpenseDto, ExpenseId, ListFilter, LoginRequest, Money, PaymentId, SortOrder, UserId,
};

fn problem(status: u16, message: &str, details: &[&str]) -> serde_json::Value {
    json!({
        "timestamp": "2025-01-01T00:00:00Z",
        "status": status,
        "error": "Bad Request",
        "message": message,
        "path": "/api/v1/expenses",
        "details": details,
    })
}

#[tokio::test]
async fn test_list_sends_filter_and_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/expenses"))
        .and(query_param("search", "rent"))
        .and(query_param("sort", "date_desc"))
        .and(bearer_token("tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "userId": 1, "amount": 900.0, "category": "Rent", "date": "2024-03-01",
             "frequency": "MONTHLY", "paymentMethod": "TRANSFER"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap().with_token("tok");
    let filter = ListFilter {
        search: Some("rent".into()),
        sort: SortOrder::DateDesc,
        ..Default::default()
    };
    let expenses = client.expenses().list(&filter).await.unwrap();

    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].amount, Some(Money::from_cents(90000)));
    assert_eq!(expenses[0].category.as_deref(), Some("Rent"));
}

#[tokio::test]
async fn test_create_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/expenses"))
        .and(body_json(json!({"amount": 42.5, "category": "Food"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "amount": 42.5, "category": "Food"
        })))
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap();
    let created = client
        .expenses()
        .create(&ExpenseDto {
            amount: Some(Money::from_cents(4250)),
            category: Some("Food".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, Some(ExpenseId::new(7)));
}

#[tokio::test]
async fn test_not_found_is_special_cased() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/expenses/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(problem(
            404,
            "Expense not found: 99",
            &[],
        )))
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap();
    let err = client.expenses().get(ExpenseId::new(99)).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.exception().unwrap().message, "Expense not found: 99");
}

#[tokio::test]
async fn test_error_carries_status_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/expenses"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("x-request-id", "req-1")
                .set_body_json(problem(400, "Validation failed", &["Amount cannot be null"])),
        )
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap();
    let err = client
        .expenses()
        .create(&ExpenseDto::default())
        .await
        .unwrap_err();

    let ClientError::Api(exception) = err else {
        panic!("expected an API error, got {:?}", err);
    };
    assert_eq!(exception.code, 400);
    assert_eq!(exception.message, "Validation failed");
    assert_eq!(exception.details(), vec!["Amount cannot be null".to_string()]);
    assert!(exception.body.contains("Validation failed"));
    assert_eq!(
        exception.headers.get("x-request-id").map(String::as_str),
        Some("req-1")
    );
}

#[tokio::test]
async fn test_delete_accepts_empty_and_json_bodies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/expenses/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/payments/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Rent"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap();
    client.expenses().delete(ExpenseId::new(3)).await.unwrap();
    client.payments().delete(PaymentId::new(4)).await.unwrap();
}

#[tokio::test]
async fn test_login_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc", "expiresAt": "2030-01-01T00:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let client = FinanceClient::new(mock_server.uri()).unwrap();
    let response = client
        .auth()
        .login(&LoginRequest {
            email: Some("ana@example.com".into()),
            password: Some("secret123".into()),
        })
        .await
        .unwrap();

    assert_eq!(response.token, "abc");
    assert!(response.expires_at.is_some());
}

#[tokio::test]
async fn test_identity_resolved_by_email_and_cached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/by-email"))
        .and(query_param("email", "ana@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12, "name": "Ana", "email": "ana@example.com"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let store = TokenStore::at(temp_dir.path().join("session.json"));
    store.save(&StoredToken::new("tok", "ana@example.com")).unwrap();

    let client = FinanceClient::new(mock_server.uri()).unwrap().with_token("tok");

    // The second call is answered from the session file
    assert_eq!(resolve_user_id(&client, &store).await.unwrap(), UserId::new(12));
    assert_eq!(resolve_user_id(&client, &store).await.unwrap(), UserId::new(12));
    assert_eq!(store.load().unwrap().unwrap().user_id, Some(UserId::new(12)));
}

#[tokio::test]
async fn test_identity_requires_login() {
    let temp_dir = TempDir::new().unwrap();
    let store = TokenStore::at(temp_dir.path().join("session.json"));
    let client = FinanceClient::new("http://127.0.0.1:9").unwrap();

    let err = resolve_user_id(&client, &store).await.unwrap_err();
    assert!(matches!(err, ClientError::NotLoggedIn(_)));

    let mut expired = StoredToken::new("tok", "ana@example.com");
    expired.expires_at = Some(chrono::Utc::now() - chrono::Duration::hours(1));
    store.save(&expired).unwrap();

    let err = resolve_user_id(&client, &store).await.unwrap_err();
    assert!(err.to_string().contains("session expired"));
}
