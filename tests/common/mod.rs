// Shared helpers for the HTTP-level tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use valora_backend::{
    ai::AiClient,
    config::{AiConfig, DEFAULT_AI_API_URL},
    create_router,
    models::{Post, PostWithAuthor, User},
    ApiError, ApiResult, AppState, Repository,
};

/// Repository backed by vectors, enforcing the same constraints as the SQL schema.
#[derive(Default)]
pub struct MemoryRepository {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<Post>>,
}

impl MemoryRepository {
    pub fn user_count(&self, email: &str) -> usize {
        self.users.lock().unwrap().iter().filter(|u| u.email == email).count()
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> ApiResult<i32> {
        Ok(1)
    }

    async fn find_user_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i32) -> ApiResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, email: &str, password_hash: &str) -> ApiResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == email) {
            return Err(ApiError::conflict("Email already registered"));
        }

        let user = User {
            id: users.len() as i32 + 1,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn insert_post(&self, user_id: i32, title: &str, content: &str) -> ApiResult<Post> {
        if !self.users.lock().unwrap().iter().any(|u| u.id == user_id) {
            return Err(ApiError::validation("Referenced user does not exist"));
        }

        let mut posts = self.posts.lock().unwrap();
        let post = Post {
            id: posts.len() as i32 + 1,
            title: title.to_string(),
            content: content.to_string(),
            user_id,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn list_posts_with_authors(&self) -> ApiResult<Vec<PostWithAuthor>> {
        let users = self.users.lock().unwrap();
        let posts = self.posts.lock().unwrap();

        Ok(posts
            .iter()
            .filter_map(|post| {
                users
                    .iter()
                    .find(|u| u.id == post.user_id)
                    .map(|author| post.clone().with_author(author.email.clone()))
            })
            .collect())
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepository>,
}

impl TestApp {
    /// App with no AI key configured.
    pub fn new() -> Self {
        Self::with_ai(AiConfig::without_key(DEFAULT_AI_API_URL))
    }

    pub fn with_ai(ai: AiConfig) -> Self {
        let repo = Arc::new(MemoryRepository::default());
        let client = AiClient::new(ai).expect("AI client should build");
        let state = AppState::new(repo.clone(), client);

        TestApp {
            router: create_router(state),
            repo,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(Method::GET, uri, None, cookie)).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        self.send(build_request(Method::POST, uri, Some(body), cookie)).await
    }

    /// Signs up and logs in, returning the `name=value` cookie pair.
    pub async fn login_as(&self, email: &str, password: &str) -> String {
        let creds = serde_json::json!({ "email": email, "password": password });
        let signup = self.post_json("/signup", creds.clone(), None).await;
        assert_eq!(signup.status, StatusCode::OK, "signup failed: {}", signup.body);

        let login = self.post_json("/login", creds, None).await;
        assert_eq!(login.status, StatusCode::OK, "login failed: {}", login.body);
        login.session_pair().expect("login should set the session cookie")
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
    }

    /// The `name=value` part of the Set-Cookie header.
    pub fn session_pair(&self) -> Option<String> {
        self.set_cookie()
            .and_then(|raw| raw.split(';').next())
            .map(|pair| pair.trim().to_string())
    }

    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }

    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }
}

fn build_request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}

/// Serves `router` on an ephemeral local port and returns its completion URL.
pub async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub provider");
    let addr = listener.local_addr().expect("stub provider address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub provider crashed");
    });

    format!("http://{addr}/chat/completions")
}
