pub mod client;
pub mod config;
pub mod routes;

use std::sync::Arc;

use crate::client::ApiClient;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<ApiClient>,
}
