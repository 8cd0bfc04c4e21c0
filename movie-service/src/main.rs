use movie_aggregator::Config;
use movie_service::{create_app, settings::port_from_env, telemetry::init_tracing};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!("Loaded configuration: {:?}", config);

    let port = match port_from_env() {
        Ok(port) => port,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };

    let app = create_app(&config)?;
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    let addr = listener.local_addr()?;

    info!("Movie Aggregator Service starting on {}", addr);
    info!("Health check endpoint: http://{}/health", addr);
    info!("Lookup endpoint: GET http://{}/movie?title=<title>", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
