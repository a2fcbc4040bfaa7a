use models::validation::ValidationRules;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub rules: Arc<ValidationRules>,
}
