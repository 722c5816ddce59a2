use std::sync::Arc;

use anyhow::Context;

use crate::clients::anthropic::{AnthropicClient, MessagesApi};
use crate::clients::openai::{ImagesApi, OpenAiClient, ResponsesApi};
use crate::config::Config;
use crate::db::Store;
use crate::services::{GenerationService, MediaStore, ResearchService};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across both upstream clients to enable connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Newsroom/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub media: MediaStore,

    pub research: Arc<ResearchService>,

    pub generation: Arc<GenerationService>,
}

impl SharedState {
    /// Wires up production clients. API keys come from the environment so
    /// they never land in the config file.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let openai_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable is not set")?;
        let anthropic_key = std::env::var("ANTHROPIC_API_KEY")
            .context("ANTHROPIC_API_KEY environment variable is not set")?;

        let http_client =
            build_shared_http_client(config.openai.request_timeout_seconds.into())?;

        let openai = Arc::new(OpenAiClient::new(
            http_client.clone(),
            openai_key,
            &config.openai,
        ));
        let anthropic = Arc::new(AnthropicClient::new(
            http_client,
            anthropic_key,
            &config.anthropic,
        ));

        Self::with_clients(config, anthropic, openai.clone(), openai).await
    }

    /// Assembles the state around the given upstream clients. Tests use this
    /// to substitute scripted fakes for the real services.
    pub async fn with_clients(
        config: Config,
        messages: Arc<dyn MessagesApi>,
        responses: Arc<dyn ResponsesApi>,
        images: Arc<dyn ImagesApi>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let media = MediaStore::new(&config.general.images_path);
        media.ensure_dir()?;

        let research = Arc::new(ResearchService::new(
            messages,
            config.anthropic.thinking_budget_tokens,
        ));
        let generation = Arc::new(GenerationService::new(
            responses,
            images,
            store.clone(),
            media.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            media,
            research,
            generation,
        })
    }
}
