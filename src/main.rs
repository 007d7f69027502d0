mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod plan;
mod routes;
mod services;

use anyhow::Result;

use services::OpenAiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env();

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting build4me backend"
    );

    // Create the OpenAI client once at startup. When no key is configured the
    // server still boots; plan requests get a configuration error instead of a
    // failed upstream call.
    let openai = match settings.openai_api_key.as_deref() {
        Some(key) => Some(OpenAiClient::new(
            &settings.openai_base_url,
            key,
            &settings.openai_model,
            settings.openai_timeout_seconds,
        )?),
        None => {
            tracing::warn!("OPENAI_API_KEY is not set - plan generation will be unavailable");
            None
        }
    };

    // Create application state
    let state = app::AppState::new(settings.clone(), openai);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
