//! End-to-end authentication flows against a mock API.

use std::sync::Arc;

use carestay_api::ApiClient;
use carestay_state::auth::SESSION_EXPIRED;
use carestay_state::session::{self, TOKEN_KEY, USER_KEY};
use carestay_state::{
    AuthPhase, CarestayApp, Error, FileSessionStorage, MemorySessionStorage, SessionStorage,
};
use carestay_types::{AppointmentFilter, AuthSession, LoginRequest, RegisterRequest, Role, User};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(role: &str) -> serde_json::Value {
    json!({ "id": 21, "name": "Ada Lovelace", "email": "ada@example.com", "role": role })
}

async fn app_with_storage(server: &MockServer) -> (CarestayApp, Arc<MemorySessionStorage>) {
    let storage = Arc::new(MemorySessionStorage::new());
    let client = ApiClient::new(server.uri()).unwrap();
    (CarestayApp::with_parts(client, storage.clone()), storage)
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({ "email": "ada@example.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "token": "tok-21", "user": user_json(role) }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_with_valid_credentials_persists_session() {
    let server = MockServer::start().await;
    mount_login(&server, "Patient").await;
    let (app, storage) = app_with_storage(&server).await;

    let target = app
        .login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap();

    assert_eq!(target, "/patient/dashboard");
    assert_eq!(app.auth().phase(), AuthPhase::Authenticated);
    assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-21"));
    assert!(storage.get(USER_KEY).unwrap().is_some());
    assert_eq!(app.client().token().as_deref(), Some("tok-21"));
}

#[tokio::test]
async fn login_with_invalid_credentials_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;
    let (app, storage) = app_with_storage(&server).await;

    let err = app
        .login(&LoginRequest::new("ada@example.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api(_)));
    assert!(!app.auth().is_authenticated());
    assert_eq!(app.auth().error().as_deref(), Some("Invalid credentials"));
    assert!(storage.get(TOKEN_KEY).unwrap().is_none());
    assert!(!app.client().has_token());
}

#[tokio::test]
async fn malformed_login_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (app, _) = app_with_storage(&server).await;

    let err = app
        .login(&LoginRequest::new("not-an-email", ""))
        .await
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["email", "password"]);
    assert_eq!(app.auth().phase(), AuthPhase::Anonymous);
}

#[tokio::test]
async fn register_uses_stored_redirect_target() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "tok-new",
            "user": user_json("Provider")
        })))
        .mount(&server)
        .await;
    let (app, _) = app_with_storage(&server).await;
    app.auth().set_redirect_target("/provider/appointments/4");

    let target = app
        .register(&RegisterRequest {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "correct-horse".into(),
            password_confirmation: "correct-horse".into(),
            role: Role::Provider,
            phone: Some("+1 555 123 4567".into()),
        })
        .await
        .unwrap();

    assert_eq!(target, "/provider/appointments/4");
    assert_eq!(app.auth().user().map(|u| u.role), Some(Role::Provider));
}

#[tokio::test]
async fn logout_clears_everything_even_when_server_fails() {
    let server = MockServer::start().await;
    mount_login(&server, "Patient").await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("Authorization", "Bearer tok-21"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [{
            "id": 1, "patient_id": 21, "provider_id": 3, "center_id": 1,
            "appointment_datetime": "2026-03-02T09:30:00Z", "status": "scheduled"
        }]})))
        .mount(&server)
        .await;
    let (app, storage) = app_with_storage(&server).await;

    app.login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap();
    app.appointments()
        .fetch_list(&AppointmentFilter::for_patient(21))
        .await;
    assert_eq!(app.appointments().items().len(), 1);

    app.logout().await;

    assert_eq!(app.auth().phase(), AuthPhase::Anonymous);
    assert!(storage.is_empty());
    assert!(app.appointments().items().is_empty());
    assert!(!app.client().has_token());
}

#[tokio::test]
async fn restore_reattaches_persisted_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": {
            "id": 21, "name": "Ada King", "email": "ada@example.com", "role": "Admin"
        }})))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemorySessionStorage::new());
    storage
        .set_many(&[
            (TOKEN_KEY, "persisted".to_string()),
            (USER_KEY, user_json("Admin").to_string()),
        ])
        .unwrap();
    let app = CarestayApp::with_parts(ApiClient::new(server.uri()).unwrap(), storage.clone());

    assert!(app.restore());
    let user = app.auth().refresh_user().await.unwrap();

    assert_eq!(user.name, "Ada King");
    let persisted = session::load_session(storage.as_ref()).unwrap().unwrap();
    assert_eq!(persisted.user.name, "Ada King");
    assert_eq!(persisted.token, "persisted");
}

#[tokio::test]
async fn expired_token_drops_previous_users_data() {
    let server = MockServer::start().await;
    mount_login(&server, "Patient").await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1, "patient_id": 21, "provider_id": 3, "center_id": 1,
            "appointment_datetime": "2026-03-02T09:30:00Z", "status": "scheduled"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, storage) = app_with_storage(&server).await;

    app.login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap();
    app.appointments()
        .fetch_list(&AppointmentFilter::for_patient(21))
        .await;
    assert_eq!(app.appointments().items().len(), 1);

    let err = app.refresh_user().await.unwrap_err();

    assert!(matches!(err, Error::Api(ref e) if e.is_unauthorized()));
    assert_eq!(app.auth().phase(), AuthPhase::Anonymous);
    assert_eq!(app.auth().error().as_deref(), Some(SESSION_EXPIRED));
    assert!(app.appointments().items().is_empty());
    assert!(storage.is_empty());
    assert!(!app.client().has_token());
}

#[tokio::test]
async fn refresh_failure_other_than_401_keeps_data() {
    let server = MockServer::start().await;
    mount_login(&server, "Patient").await;
    Mock::given(method("GET"))
        .and(path("/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1, "patient_id": 21, "provider_id": 3, "center_id": 1,
            "appointment_datetime": "2026-03-02T09:30:00Z", "status": "scheduled"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let (app, _) = app_with_storage(&server).await;

    app.login(&LoginRequest::new("ada@example.com", "secret"))
        .await
        .unwrap();
    app.appointments()
        .fetch_list(&AppointmentFilter::for_patient(21))
        .await;

    assert!(app.refresh_user().await.is_err());
    assert!(app.auth().is_authenticated());
    assert_eq!(app.appointments().items().len(), 1);
}

#[tokio::test]
async fn load_builds_from_settings_file_and_restores_session() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session_file = dir.path().join("session.json");
    let config_file = dir.path().join("config.toml");
    std::fs::write(
        &config_file,
        format!(
            "api_url = \"{}\"\nsession_file = \"{}\"\n",
            server.uri(),
            session_file.display()
        ),
    )
    .unwrap();
    session::save_session(
        &FileSessionStorage::new(&session_file),
        &AuthSession {
            token: "persisted".into(),
            user: User {
                id: 21,
                name: "Ada Lovelace".into(),
                email: "ada@example.com".into(),
                role: Role::Admin,
                phone: None,
                created_at: None,
            },
        },
    )
    .unwrap();

    let app = CarestayApp::load(Some(config_file.as_path())).unwrap();

    assert!(app.auth().is_authenticated());
    assert_eq!(app.client().token().as_deref(), Some("persisted"));
}

#[tokio::test]
async fn load_reports_missing_settings_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");

    let err = CarestayApp::load(Some(missing.as_path())).unwrap_err();

    assert!(matches!(err, Error::Settings(_)));
}
