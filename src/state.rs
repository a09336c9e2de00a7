use crate::auth::repo::UserStore;
use crate::config::AppConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> Self {
        let config = Arc::new(AppConfig::from_env());
        Self::from_parts(Arc::new(UserStore::new()), config)
    }

    pub fn from_parts(users: Arc<UserStore>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }
}
