use std::sync::Arc;

use crate::{
    authentication::auth::{CredentialService, PendingCredentials},
    data_access::data_context::DataContext,
    settings::Settings,
};

pub struct AppState {
    pub data_context: DataContext,
    pub settings: Settings,
    pub credentials: Arc<dyn CredentialService>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// State with the only credential backend that exists today.
    pub fn new(data_context: DataContext, settings: Settings) -> SharedState {
        Arc::new(Self {
            data_context,
            settings,
            credentials: Arc::new(PendingCredentials),
        })
    }
}
