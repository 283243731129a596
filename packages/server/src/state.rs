use std::sync::Arc;

use ewakeel_common::storage::UploadStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::services::advice::AdviceClient;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub uploads: Arc<dyn UploadStore>,
    pub advice: AdviceClient,
}
