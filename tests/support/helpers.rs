// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use linkforge::application::services::{ApplicationServices, Ports, Repositories};
use linkforge::infrastructure::security::login_state::InMemoryLoginStateStore;
use linkforge::infrastructure::util::DefaultSlugGenerator;
use linkforge::presentation::http::{
    routes::build_router,
    state::{HttpSettings, HttpState},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt as _;

pub const FRONTEND_URL: &str = "http://frontend.test";
pub const PROJECT_NAME: &str = "Linkforge HQ";

pub fn test_ports(geo: mocks::StubGeoLocator) -> Ports {
    Ports {
        password_hasher: Arc::new(mocks::StrictPasswordHasher),
        token_manager: Arc::new(mocks::DummyTokenManager),
        clock: Arc::new(mocks::FixedClock),
        slugger: Arc::new(DefaultSlugGenerator),
        short_codes: Arc::new(mocks::SequentialShortCodes::default()),
        secrets: Arc::new(mocks::SequentialSecrets::default()),
        geo: Arc::new(geo),
        identity_provider: None,
        login_states: Arc::new(InMemoryLoginStateStore::new()),
    }
}

pub fn build_test_state(store: &mocks::MemoryStore, ports: Ports) -> HttpState {
    let links = Arc::new(mocks::MemoryLinkRepo(store.clone()));
    let repos = Repositories {
        users: Arc::new(mocks::MemoryUserRepo(store.clone())),
        organizations: Arc::new(mocks::MemoryOrganizationRepo(store.clone())),
        memberships: Arc::new(mocks::MemoryMembershipRepo(store.clone())),
        invites: Arc::new(mocks::MemoryInviteRepo(store.clone())),
        link_writes: links.clone(),
        link_reads: links,
        campaigns: Arc::new(mocks::MemoryCampaignRepo(store.clone())),
        clicks: Arc::new(mocks::MemoryClickRepo(store.clone())),
        audit_logs: Arc::new(mocks::MemoryAuditRepo(store.clone())),
    };
    HttpState {
        services: Arc::new(ApplicationServices::new(repos, ports, PROJECT_NAME)),
        settings: Arc::new(HttpSettings {
            project_name: PROJECT_NAME.into(),
            frontend_url: FRONTEND_URL.into(),
            allowed_origins: vec![FRONTEND_URL.into()],
            rate_limit: None,
        }),
    }
}

pub fn make_test_router() -> axum::Router {
    TestApp::new().router
}

/// Router plus the store behind it, so tests can seed and inspect state.
#[derive(Clone)]
pub struct TestApp {
    pub router: axum::Router,
    pub store: mocks::MemoryStore,
}

/// A registered account and the bearer string that authenticates it.
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: i64,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_geo(mocks::StubGeoLocator(Some("JP")))
    }

    pub fn with_geo(geo: mocks::StubGeoLocator) -> Self {
        Self::with_ports(|ports| ports.geo = Arc::new(geo))
    }

    /// Default test ports with `customize` applied before the router is built.
    pub fn with_ports(customize: impl FnOnce(&mut Ports)) -> Self {
        let store = mocks::MemoryStore::new();
        let mut ports = test_ports(mocks::StubGeoLocator(Some("JP")));
        customize(&mut ports);
        let router = build_router(build_test_state(&store, ports));
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// JSON request; returns the status and parsed body (`Null` when empty).
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        session: Option<&Session>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let resp = self.send(json_request(method, uri, session, None, body)).await;
        read_json(resp).await
    }

    /// Same as [`TestApp::call`] with an explicit `X-Org-Id` header.
    pub async fn call_in_org(
        &self,
        method: Method,
        uri: &str,
        session: &Session,
        org_id: i64,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let resp = self
            .send(json_request(method, uri, Some(session), Some(org_id), body))
            .await;
        read_json(resp).await
    }

    pub async fn register(&self, username: &str) -> Session {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@example.com"),
                    "password": "correct-horse",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        let user_id = body["id"].as_i64().unwrap();
        Session {
            user_id,
            token: mocks::token_for(user_id, body["is_superuser"].as_bool().unwrap()),
        }
    }

    /// Registers the first account, which becomes superuser and owns the
    /// bootstrap organization.
    pub async fn bootstrap_admin(&self) -> Session {
        self.register("admin").await
    }

    /// Registers `username` and has `admin` approve it into the bootstrap org.
    pub async fn approved_member(&self, admin: &Session, username: &str) -> Session {
        let member = self.register(username).await;
        let (status, body) = self
            .call(
                Method::POST,
                &format!("/api/users/{}/approve", member.user_id),
                Some(admin),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "approve failed: {body}");
        member
    }

    pub async fn create_link(&self, session: &Session, body: Value) -> Value {
        let (status, link) = self
            .call(Method::POST, "/api/links", Some(session), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "create link failed: {link}");
        link
    }

    /// Organization id of the bootstrap org.
    pub fn bootstrap_org_id(&self) -> i64 {
        self.store
            .lock()
            .organizations
            .iter()
            .map(|o| o.id.0)
            .min()
            .unwrap()
    }
}

pub fn json_request(
    method: Method,
    uri: &str,
    session: Option<&Session>,
    org_id: Option<i64>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", session.token));
    }
    if let Some(org_id) = org_id {
        builder = builder.header("x-org-id", org_id.to_string());
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// Location header of a redirect response.
pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and message.
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_message: &str) {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let (_, json) = read_json(resp).await;
    assert_eq!(
        json["error"].as_str(),
        expected_status.canonical_reason(),
        "unexpected error field: {json}"
    );
    assert_eq!(json["message"], expected_message, "unexpected message: {json}");
}

/// `multipart/form-data` body with one `file` field.
pub fn multipart_request(uri: &str, session: &Session, filename: &str, content: &str) -> Request<Body> {
    const BOUNDARY: &str = "linkforge-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", session.token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
