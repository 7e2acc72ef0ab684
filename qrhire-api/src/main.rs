use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use shared_types::HealthResponse;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

mod config;
mod handlers;
mod helpers;
mod store;

#[get("/api/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        message: "Server is running".to_string(),
    })
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = args.log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("qrhire-api.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        std::mem::forget(guard);

        tracing_subscriber::registry()
            .with(env_filter.clone())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Load config
    let (config, config_path) = config::ApiConfig::load().expect("Failed to load config");
    tracing::info!("Config loaded from {:?}", config_path);

    // Open the configured record store; without one there is nothing to serve
    let storage_config = config.storage.clone().unwrap_or_default();
    let store: Arc<dyn store::RecordStore> = match store::from_config(&storage_config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to initialize record store: {e:#}");
            std::process::exit(1);
        }
    };

    // Admin sessions are optional; without a configured password the delete
    // endpoints stay open
    let (admin_password, session_ttl) = match &config.admin {
        Some(admin) => (Some(admin.password.clone()), admin.session_ttl_secs),
        None => (None, 3600),
    };
    if admin_password.is_none() {
        tracing::warn!("No admin password configured; delete endpoints are unauthenticated");
    }
    let sessions = Arc::new(helpers::session::SessionManager::new(
        admin_password,
        session_ttl,
    ));

    // Get server config or use defaults
    let (host, port) = if let Some(server_config) = &config.server {
        (server_config.host.clone(), server_config.port)
    } else {
        let defaults = config::ServerConfig::default();
        (defaults.host, defaults.port)
    };

    tracing::info!("Server will listen on {}:{}", host, port);

    let server = HttpServer::new(move || {
        // Configure CORS
        let cors = if let Some(cors_config) = &config.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Content-Type", "X-Admin-Token"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Content-Type", "X-Admin-Token"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(sessions.clone()))
            .service(health)
            .configure(handlers::configure_routes)
    })
    .bind((host.as_str(), port))?
    .run();

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        tracing::info!("Ctrl+C received, shutting down...");
        handle.stop(true).await;
        tracing::info!("Record store connection closed");
    });

    server.await
}
