use crate::models::FeedbackLog;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub log: Arc<Mutex<FeedbackLog>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, log: FeedbackLog) -> Self {
        Self {
            data_path,
            log: Arc::new(Mutex::new(log)),
        }
    }
}
