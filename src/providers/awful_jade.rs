//! OpenAI-compatible backend through `awful_aj`.
//!
//! Uses the endpoint, key and model from an `awful_aj` `config.yaml` and a
//! chat template from the `awful_aj` template directory. The model receives
//! the same instruction as the Gemini backend; whether it can actually look
//! up current news depends on the configured endpoint.

use crate::api::{parse_articles, search_prompt, SummarizationProvider};
use crate::models::NewsArticle;
use awful_aj::api::ask;
use awful_aj::{config, config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{info, instrument, warn};

pub const DEFAULT_TEMPLATE: &str = "news_search";

/// News search through any endpoint configured for `awful_aj`.
pub struct AwfulJadeProvider {
    config: AwfulJadeConfig,
    template: ChatTemplate,
    template_name: String,
}

impl AwfulJadeProvider {
    /// Load the `awful_aj` configuration and chat template.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Path to `config.yaml`; defaults to `config_dir()/config.yaml`
    /// * `template_name` - Name of the chat template to load
    #[instrument(level = "info", skip_all, fields(%template_name))]
    pub async fn load(
        config_path: Option<&str>,
        template_name: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let config_path = match config_path {
            Some(path) => path.to_string(),
            None => config_dir()?.join("config.yaml").to_string_lossy().into_owned(),
        };
        let config = config::load_config(&config_path)
            .map_err(|e| format!("failed to load awful_aj config {config_path}: {e}"))?;
        info!(%config_path, "Loaded configuration");

        let template = template::load_template(template_name).await?;
        info!("Loaded template: {template_name}");

        Ok(Self {
            config,
            template,
            template_name: template_name.to_string(),
        })
    }
}

impl fmt::Debug for AwfulJadeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwfulJadeProvider")
            .field("template", &self.template_name)
            .finish()
    }
}

impl SummarizationProvider for AwfulJadeProvider {
    fn name(&self) -> &str {
        "awful-jade"
    }

    #[instrument(level = "info", skip_all, fields(template = %self.template_name))]
    async fn fetch_and_summarize_news(
        &self,
        topic: &str,
    ) -> Result<Vec<NewsArticle>, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = ask(&self.config, search_prompt(topic), &self.template, None, None).await;
        let dt = t0.elapsed();

        let reply = match res {
            Ok(reply) => reply,
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed");
                return Err(e);
            }
        };

        let articles = parse_articles(&reply)?;
        info!(
            count = articles.len(),
            elapsed_ms = dt.as_millis() as u128,
            "awful_aj search completed"
        );
        Ok(articles)
    }
}
