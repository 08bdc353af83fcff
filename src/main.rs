use bson::doc;
use dotenvy::dotenv;
use mongodb::Client;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use event_planner_server::config::Config;
use event_planner_server::handlers::AppState;
use event_planner_server::routes::create_routes;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let client = Client::with_uri_str(&config.mongo_url)
        .await
        .expect("Failed to connect to MongoDB");
    let db = client.database(&config.mongo_db);

    // The client connects lazily; ping so a bad address fails at startup.
    db.run_command(doc! { "ping": 1 })
        .await
        .expect("Failed to reach MongoDB");

    tracing::info!("Successfully connected to MongoDB database '{}'", config.mongo_db);

    let state = AppState::new(&db);
    let app = create_routes(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    tracing::info!("Server stopped, MongoDB connection closed");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
