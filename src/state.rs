use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, SessionService, TokenService};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub link_service: Arc<LinkService>,
    pub session: SessionService,
}
