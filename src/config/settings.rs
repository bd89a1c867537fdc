use std::env;
use std::path::PathBuf;

/// Application settings loaded from the environment
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub session_ttl_hours: i64,
}

impl AppSettings {
    /// Load settings from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        let session_ttl_hours = env::var("SESSION_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24);

        Self {
            bind_addr,
            upload_dir,
            session_ttl_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_env() {
        // Env vars are process global, so only assert on the defaults shape
        let settings = AppSettings {
            bind_addr: "0.0.0.0:3000".to_string(),
            upload_dir: PathBuf::from("uploads"),
            session_ttl_hours: 24,
        };
        assert_eq!(settings.session_ttl_hours, 24);
        assert_eq!(settings.upload_dir, PathBuf::from("uploads"));
    }
}
