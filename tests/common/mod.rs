#![allow(dead_code)]

//! Shared test fixtures: an in-memory store implementing the repository
//! traits plus a notifier that captures outgoing codes, wired into the real
//! router. No database required.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use uuid::Uuid;

use snaplink::application::services::{AuthService, LinkService, SessionService, TokenService};
use snaplink::domain::entities::{Link, NewLink, Token, User};
use snaplink::domain::repositories::{LinkRepository, TokenRepository, UserRepository};
use snaplink::error::AppError;
use snaplink::infrastructure::email::EmailNotifier;
use snaplink::routes::router;
use snaplink::state::AppState;

pub const TEST_COOKIE_SECRET: &str = "test-cookie-secret";

/// In-memory stand-in for the relational store.
#[derive(Default)]
pub struct MemStore {
    users: Mutex<Vec<User>>,
    tokens: Mutex<Vec<Token>>,
    links: Mutex<Vec<Link>>,
    next_token_id: Mutex<i64>,
    next_link_id: Mutex<i64>,
}

impl MemStore {
    pub fn user_code(&self, email: &str) -> Option<Option<String>> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.code.clone())
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn link_clicks(&self, key: &str) -> Option<i64> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.shortened == key)
            .map(|l| l.clicks)
    }

    pub fn seed_user(&self, email: &str, code: Option<&str>) -> Uuid {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            code: code.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.users.lock().unwrap().push(user);
        id
    }
}

pub struct MemUserRepository(pub Arc<MemStore>);

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .0
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn upsert_code(&self, email: &str, code: &str) -> Result<User, AppError> {
        let mut users = self.0.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            user.code = Some(code.to_string());
            user.updated_at = Utc::now();
            return Ok(user.clone());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            code: Some(code.to_string()),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn store_code(&self, email: &str, code: &str) -> Result<bool, AppError> {
        let mut users = self.0.users.lock().unwrap();
        match users.iter_mut().find(|u| u.email == email) {
            Some(user) => {
                user.code = Some(code.to_string());
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn clear_code(&self, email: &str) -> Result<(), AppError> {
        let mut users = self.0.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.email == email) {
            user.code = None;
            user.updated_at = Utc::now();
        }
        Ok(())
    }
}

pub struct MemTokenRepository(pub Arc<MemStore>);

#[async_trait]
impl TokenRepository for MemTokenRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Token>, AppError> {
        Ok(self
            .0
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.user_id == user_id)
            .cloned())
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<Token>, AppError> {
        Ok(self
            .0
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_val == value)
            .cloned())
    }

    async fn create(&self, user_id: Uuid, value: &str) -> Result<Token, AppError> {
        let mut tokens = self.0.tokens.lock().unwrap();
        if tokens.iter().any(|t| t.user_id == user_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "constraint": "tokens_user_id_key" }),
            ));
        }

        let mut next_id = self.0.next_token_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let token = Token {
            id: *next_id,
            user_id,
            token_val: value.to_string(),
            created_at: now,
            updated_at: now,
        };
        tokens.push(token.clone());
        Ok(token)
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool, AppError> {
        let mut tokens = self.0.tokens.lock().unwrap();
        let before = tokens.len();
        tokens.retain(|t| t.token_val != value);
        Ok(tokens.len() < before)
    }
}

pub struct MemLinkRepository(pub Arc<MemStore>);

#[async_trait]
impl LinkRepository for MemLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.0.links.lock().unwrap();
        if links.iter().any(|l| l.original == new_link.original) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "constraint": "links_original_key" }),
            ));
        }

        let mut next_id = self.0.next_link_id.lock().unwrap();
        *next_id += 1;
        let now = Utc::now();
        let link = Link {
            id: *next_id,
            user_id: new_link.user_id,
            title: new_link.title,
            description: new_link.description,
            original: new_link.original,
            shortened: new_link.shortened,
            clicks: 0,
            created_at: now,
            updated_at: now,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .0
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.shortened == key)
            .cloned())
    }

    async fn find_by_original(&self, original: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .0
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.original == original)
            .cloned())
    }

    async fn increment_clicks(&self, key: &str) -> Result<bool, AppError> {
        let mut links = self.0.links.lock().unwrap();
        match links.iter_mut().find(|l| l.shortened == key) {
            Some(link) => {
                link.clicks += 1;
                link.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Notifier that records every (email, code) pair instead of sending.
#[derive(Default)]
pub struct CapturingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailNotifier for CapturingNotifier {
    async fn send_verification(&self, email: &str, code: &str) -> anyhow::Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

pub fn test_session() -> SessionService {
    // Dev mode: host-only cookies without Secure, matching the test client.
    SessionService::new(TEST_COOKIE_SECRET.to_string(), true, None)
}

pub fn create_test_state() -> (AppState, Arc<MemStore>, Arc<CapturingNotifier>) {
    let store = Arc::new(MemStore::default());
    let notifier = Arc::new(CapturingNotifier::default());

    let users: Arc<dyn UserRepository> = Arc::new(MemUserRepository(store.clone()));
    let tokens: Arc<dyn TokenRepository> = Arc::new(MemTokenRepository(store.clone()));
    let links: Arc<dyn LinkRepository> = Arc::new(MemLinkRepository(store.clone()));

    let session = test_session();

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            notifier.clone(),
            session.clone(),
        )),
        token_service: Arc::new(TokenService::new(tokens, users.clone())),
        link_service: Arc::new(LinkService::new(links, users)),
        session,
    };

    (state, store, notifier)
}

/// Test server with a persistent cookie jar, over the real router.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::builder()
        .save_cookies()
        .build(router(state))
        .unwrap()
}

/// Drives signup + verify for an email, leaving the server session
/// cookies established.
pub async fn sign_up_and_verify(
    server: &TestServer,
    notifier: &CapturingNotifier,
    email: &str,
) {
    server
        .post("/signup")
        .json(&serde_json::json!({ "email": email }))
        .await
        .assert_status_ok();

    let code = notifier.last_code_for(email).expect("code was sent");

    server
        .post("/verify")
        .json(&serde_json::json!({ "email": email, "code": code }))
        .await
        .assert_status_ok();
}
