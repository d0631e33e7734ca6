use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct AppState {
    pub data: Arc<Mutex<AppData>>,
}
