use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use careers_api::auth::provider_from_config;
use careers_api::config::ApiConfig;
use careers_api::handlers::PageSettings;
use careers_api::{helpers, routes, Gateway};
use clap::{Parser, Subcommand};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long)]
    log_file_path: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Strip editor tracking attributes from every stored job description
    CleanDescriptions,
}

fn init_tracing(log_file_path: Option<String>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file_path {
        let log_path = std::path::Path::new(&log_path);
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(std::path::Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("careers-api.log")),
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
}

async fn clean_descriptions(gateway: &Gateway) -> std::io::Result<()> {
    let report = gateway
        .clean_descriptions()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    println!("Cleaned {} job descriptions", report.cleaned);
    println!("Skipped {} (already clean)", report.skipped);
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file_path);

    let (config, config_path) = ApiConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    tracing::info!("Loaded config from {:?}", config_path);

    let gateway = match helpers::database::initialize_database(&config.database) {
        Ok(Some(db)) => Gateway::new(db),
        Ok(None) => {
            tracing::info!("Database disabled, serving sample data");
            Gateway::fallback_only()
        }
        Err(e) => {
            tracing::warn!("Failed to initialize database: {}, serving sample data", e);
            Gateway::fallback_only()
        }
    };

    if let Some(Command::CleanDescriptions) = args.command {
        return clean_descriptions(&gateway).await;
    }

    let provider = provider_from_config(&config);
    let settings = PageSettings {
        excerpt_length: config.page.excerpt_length,
    };
    let (host, port) = (config.server.host.clone(), config.server.port);

    tracing::info!("Server will listen on {}:{}", host, port);

    let gateway = web::Data::new(gateway);
    let provider = web::Data::new(provider);
    let settings = web::Data::new(settings);

    let server = HttpServer::new(move || {
        let cors = if let Some(cors_config) = &config.cors {
            let mut cors_builder = Cors::default();
            for origin in &cors_config.allowed_origins {
                cors_builder = cors_builder.allowed_origin(origin);
            }
            cors_builder
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        } else {
            Cors::default()
                .allow_any_origin()
                .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .allowed_headers(vec!["Authorization", "Accept", "Content-Type"])
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(gateway.clone())
            .app_data(provider.clone())
            .app_data(settings.clone())
            .configure(routes::configure)
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
    });

    server.await
}
