use crate::errors::AppError;
use crate::models::FeedbackLog;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/feedback.json"))
}

pub async fn load_log(path: &Path) -> FeedbackLog {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(log) => log,
            Err(err) => {
                error!("failed to parse feedback file: {err}");
                FeedbackLog::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => FeedbackLog::default(),
        Err(err) => {
            error!("failed to read feedback file: {err}");
            FeedbackLog::default()
        }
    }
}

pub async fn persist_log(path: &Path, log: &FeedbackLog) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(log).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Opinion, OpinionKind};

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("feedback_nav_{}_{name}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty_log() {
        let log = load_log(&temp_path("missing")).await;
        assert!(log.opinions.is_empty());
        assert_eq!(log.next_id(), 1);
    }

    #[tokio::test]
    async fn persisted_log_reloads() {
        let path = temp_path("roundtrip");
        let log = FeedbackLog {
            opinions: vec![Opinion {
                id: 7,
                kind: OpinionKind::BrokenWebsite,
                description: "Login button does nothing".to_string(),
                url: Some("http://example.com/login".to_string()),
                created: chrono::Utc::now(),
            }],
        };
        persist_log(&path, &log).await.unwrap();

        let loaded = load_log(&path).await;
        let _ = fs::remove_file(&path).await;
        assert_eq!(loaded.opinions.len(), 1);
        assert_eq!(loaded.opinions[0].kind, OpinionKind::BrokenWebsite);
        assert_eq!(loaded.next_id(), 8);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_log() {
        let path = temp_path("corrupt");
        fs::write(&path, b"not json").await.unwrap();
        let log = load_log(&path).await;
        let _ = fs::remove_file(&path).await;
        assert!(log.opinions.is_empty());
    }
}
