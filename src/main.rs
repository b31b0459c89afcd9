use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use carecompanion::application::ports::LlmClient;
use carecompanion::application::services::AnalysisService;
use carecompanion::infrastructure::llm::OpenAiClient;
use carecompanion::infrastructure::observability::{TracingConfig, init_tracing};
use carecompanion::infrastructure::text_processing::ExtractorFactory;
use carecompanion::presentation::{AppState, Environment, ROUTES, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::new(
        environment.as_str(),
        settings.logging.enable_json,
        &settings.logging.level,
    ));

    let file_loader = Arc::new(ExtractorFactory::create(&settings.extraction));

    let llm_client: Option<Arc<dyn LlmClient>> = match settings.llm.client_config() {
        Some(config) => Some(Arc::new(
            OpenAiClient::new(config).context("Failed to build LLM client")?,
        )),
        None => None,
    };

    let analysis_service = Arc::new(AnalysisService::new(
        file_loader,
        llm_client,
        settings.analysis_options(),
    ));

    tracing::info!(
        api_key = if analysis_service.has_llm_client() { "set" } else { "missing" },
        model = %settings.llm.chat_model,
        on_missing_api_key = ?settings.llm.on_missing_api_key,
        "LLM configuration"
    );

    let state = AppState {
        analysis_service,
        service_name: settings.server.service_name.as_str().into(),
    };

    let router = create_router(state, settings.max_upload_bytes());

    for (method, path) in ROUTES {
        tracing::info!(method, path, "Route registered");
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;
    tracing::info!(%addr, service = %settings.server.service_name, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
