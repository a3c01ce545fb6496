use std::sync::Arc;

use crate::calculate::AnalyticsSettings;
use crate::storage::MatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub settings: AnalyticsSettings,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(store: Arc<dyn MatchStore>, settings: AnalyticsSettings) -> Self {
        Self {
            store,
            settings,
            cors_origin: "*".to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }
}
