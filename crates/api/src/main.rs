use std::sync::Arc;

use sweetshop_api::app::{self, services::AppServices};

#[tokio::main]
async fn main() {
    sweetshop_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });

    let services = match std::env::var("DATABASE_URL") {
        Ok(url) => match AppServices::postgres(&url, jwt_secret).await {
            Ok(services) => services,
            Err(e) => {
                tracing::error!(error = %e, "failed to connect to database");
                std::process::exit(1);
            }
        },
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory storage");
            AppServices::in_memory(jwt_secret)
        }
    };

    let services = Arc::new(services);
    if let Err(e) = app::services::seed_admin_from_env(&services).await {
        tracing::error!(error = %e, "failed to seed admin account");
        std::process::exit(1);
    }

    let app = app::app_with_services(services);

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %bind_addr, "failed to bind");
            std::process::exit(1);
        }
    };

    if let Ok(addr) = listener.local_addr() {
        tracing::info!("listening on {addr}");
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
