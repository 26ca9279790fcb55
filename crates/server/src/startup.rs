use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::{admin_http::spawn_admin_server, env::check_frontend_dir};
use configs::AppConfig;
use service::{Clock, MemStorage, Storage, SystemClock};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{errors::StartupError, observability, routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn build_storage(cfg: &AppConfig) -> anyhow::Result<Arc<dyn Storage>> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    if cfg.storage.seed_sample_data {
        Ok(Arc::new(MemStorage::with_sample_data(clock)?))
    } else {
        info!("starting with empty storage");
        Ok(Arc::new(MemStorage::new(clock)))
    }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {raw}: {e}")))
}

/// Build the app from `cfg` and run the HTTP server until it fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let storage = build_storage(&cfg)?;

    if let Some(admin_addr) = cfg.server.admin_addr.as_deref() {
        spawn_admin_server(admin_addr, observability::encode_metrics).await?;
    }

    let frontend_dir = if check_frontend_dir(&cfg.frontend.dir).await {
        Some(cfg.frontend.dir.as_str())
    } else {
        None
    };
    let app: Router = routes::build_router(AppState::new(storage), build_cors(), frontend_dir);

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, frontend = frontend_dir.unwrap_or("-"), "http server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_host_is_a_config_error() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        let err = bind_addr(&cfg).unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig(_)));
        assert!(err.to_string().contains("not a host:8080"));
    }

    #[test]
    fn default_config_binds_loopback() {
        let addr = bind_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");
    }
}
