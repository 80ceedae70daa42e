//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use bulldog_api::{AppState, build_app};
use bulldog_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, DatabaseProvider, LoggingConfig, ServerConfig,
};
use bulldog_database::{MemoryDatabase, Stores};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "hunter22";

/// Test application backed by the in-memory provider.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for reaching into stores directly
    pub state: AppState,
}

/// A decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// Value of the `name` cookie set by this response, if any.
    pub fn cookie(&self, name: &str) -> Option<String> {
        let prefix = format!("{name}=");
        self.set_cookies.iter().find_map(|header| {
            header
                .strip_prefix(&prefix)
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
    }

    /// The raw `Set-Cookie` header for `name`, if any.
    pub fn cookie_header(&self, name: &str) -> Option<&str> {
        let prefix = format!("{name}=");
        self.set_cookies
            .iter()
            .find(|header| header.starts_with(&prefix))
            .map(String::as_str)
    }

    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    /// Create a new test application with default auth settings
    pub fn new() -> Self {
        Self::with_auth(|_| {})
    }

    /// Create a test application after adjusting the auth config
    pub fn with_auth(adjust: impl FnOnce(&mut AuthConfig)) -> Self {
        let mut config = AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                provider: DatabaseProvider::Memory,
                ..DatabaseConfig::default()
            },
            auth: AuthConfig::with_secret(SECRET),
            logging: LoggingConfig::default(),
        };
        adjust(&mut config.auth);
        config.validate().expect("test config must be valid");

        let stores = Stores::memory(Arc::new(MemoryDatabase::new()));
        let state = AppState::new(config, stores).expect("Failed to build app state");

        Self {
            router: build_app(state.clone()),
            state,
        }
    }

    /// Send a request with an optional JSON body and bearer token
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, uri, body, token, None).await
    }

    /// Send a request, optionally carrying a refresh cookie
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
        refresh_cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(value) = refresh_cookie {
            builder = builder.header(COOKIE, format!("refresh_token={value}"));
        }

        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.dispatch(request).await
    }

    /// Send a bodyless request with a verbatim `Authorization` header
    pub async fn send_raw_auth(&self, method: &str, uri: &str, authorization: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap();

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok().map(String::from))
            .collect();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }

    /// Register a user through the API and return its id
    pub async fn register(&self, email: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/users",
                Some(json!({
                    "name": "Test User",
                    "email": email,
                    "age": 30,
                    "password": PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }

    /// Log in and return (access token, refresh cookie value)
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

        let access = response.body["access_token"].as_str().unwrap().to_string();
        let refresh = response.cookie("refresh_token").unwrap();
        (access, refresh)
    }

    /// Register and log in a fresh user
    pub async fn signed_in(&self, email: &str) -> (i64, String, String) {
        let id = self.register(email).await;
        let (access, refresh) = self.login(email, PASSWORD).await;
        (id, access, refresh)
    }
}
