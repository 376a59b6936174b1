use std::io;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chirp::{handlers, AppState, Config};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate =
            signal(SignalKind::terminate()).expect("Failed to install SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = terminate.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    }
}

/// chirp
///
/// A minimal status-update service: authenticated users post short texts,
/// anyone can read the feed and profile pages.
///
/// # Routes
///
/// - `GET /`, `GET /@{username}`, `GET /post/{id}`, `POST /posts` - HTML
/// - `GET|POST /api/v1/posts`, `GET /api/v1/profile/{username}` - JSON
/// - `GET /health` - database-backed health probe
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting chirp v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    let state = match AppState::initialize(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Application state initialization failed: {}", e);
            eprintln!("ERROR: Failed to initialize application state: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting HTTP server at {}", bind_address);

    let state_data = web::Data::new(state.clone());
    let sessions_data = web::Data::new(state.sessions.clone());
    let allowed_origins = state.config.cors.allowed_origins.clone();

    let server = HttpServer::new(move || {
        // Build CORS configuration for the JSON API scope
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state_data.clone())
            .app_data(sessions_data.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(handlers::health_check))
            .route("/", web::get().to(handlers::home))
            .route("/@{username}", web::get().to(handlers::profile_page))
            .route("/post/{id}", web::get().to(handlers::post_page))
            .route("/posts", web::post().to(handlers::submit_post))
            .service(
                web::scope("/api/v1")
                    .wrap(cors)
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(handlers::get_posts))
                            .route(web::post().to(handlers::create_post)),
                    )
                    .route(
                        "/profile/{username}",
                        web::get().to(handlers::get_profile),
                    ),
            )
    })
    .bind(&bind_address)?
    .workers(4)
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        server_handle.stop(true).await;
    });

    server.await?;

    tracing::info!("chirp shutting down");
    Ok(())
}
