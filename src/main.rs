use ssc_backend::{SocketSessionClient, XmlRpcProvisioningClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ssc::{create_router, AppState, Config};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ssc=info,ssc_backend=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Required: SSC_PROVISIONING_URL=<http url>, SSC_SESSION_ADDR=<host:port>");
            eprintln!("Optional: SSC_LISTEN_ADDR, SSC_PROVISIONING_METHOD,");
            eprintln!("          SSC_BACKEND_TIMEOUT_SECS, SSC_DEFAULT_OPERATOR, SSC_CITIES");
            std::process::exit(1);
        }
    };

    let grammar = match config.grammar() {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting SSC server");
    tracing::info!("Listen address: {}", config.listen_addr);
    tracing::info!("Provisioning server: {}", config.provisioning_url);
    tracing::info!("Session service: {}", config.session_addr);
    tracing::info!("Cities: {}", grammar.cities().join(", "));

    let provisioning = match XmlRpcProvisioningClient::new(
        &config.provisioning_url,
        &config.provisioning_method,
        config.backend_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Provisioning client error: {}", e);
            std::process::exit(1);
        }
    };
    let sessions = SocketSessionClient::new(&config.session_addr, config.backend_timeout);

    // Create app state
    let state = AppState::new(grammar, provisioning, sessions, &config.default_operator);

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running at http://{}", config.listen_addr);

    axum::serve(listener, app).await.expect("Server error");
}
