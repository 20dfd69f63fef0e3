use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dpay_gateway::{config::GatewayConfig, error, routes, state::AppState};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().expect("Failed to load configuration");
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();

    tracing::info!("Starting dpay-gateway on port {}", port);
    tracing::info!("Settlement API: {}", config.payment_api_url);
    tracing::info!(config = ?config, "effective configuration");

    // Create shared state
    let state = AppState::new(config);
    let state_data = web::Data::new(state);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = dpay_gateway::cors::build_cors(&allowed_origins);

        App::new()
            .app_data(state_data.clone())
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(routes::root::configure)
            .configure(routes::health::configure)
            .configure(routes::payment::configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
