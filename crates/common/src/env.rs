//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Check that the optional static frontend directory exists.
///
/// Returns `true` when the directory is present and can be served; a missing
/// directory is not fatal since the API works without the admin UI.
pub async fn check_frontend_dir(frontend_dir: &str) -> bool {
    match tokio::fs::metadata(frontend_dir).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            warn!(%frontend_dir, "frontend path is not a directory; static assets disabled");
            false
        }
        Err(_) => {
            warn!(%frontend_dir, "frontend assets directory not found; serving API only");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_frontend_dir_is_not_fatal() {
        assert!(!check_frontend_dir("/definitely/not/here/frontend").await);
    }

    #[tokio::test]
    async fn existing_dir_is_served() {
        let dir = std::env::temp_dir();
        assert!(check_frontend_dir(dir.to_str().unwrap()).await);
    }
}
