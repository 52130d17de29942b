//! Command handlers. Each returns the text to print so it can be tested
//! without a terminal.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use mathgenie_core::{AppConfig, ConnectionConfig, QuizRequestParams, SettingsStore, find_topic};
use mathgenie_llm::{LlmError, QuizClient, Transport};
use tracing::{info, warn};

use crate::cli::{ConnectionArgs, GenerateArgs, OutputFormat, SettingsCommand};
use crate::render;

/// Apply command-line overrides on top of a stored config.
pub fn apply_overrides(mut config: ConnectionConfig, overrides: &ConnectionArgs) -> ConnectionConfig {
    if let Some(base_url) = &overrides.base_url {
        config.base_url = base_url.trim().to_string();
    }
    if let Some(api_key) = &overrides.api_key {
        config.api_key = api_key.trim().to_string();
    }
    if let Some(model) = &overrides.model {
        config.model_name = model.trim().to_string();
    }
    config
}

/// Build the HTTP quiz client from app config.
pub fn build_client(app: &AppConfig) -> Result<QuizClient> {
    match app.llm.request_timeout_secs {
        0 => Ok(QuizClient::new()),
        secs => QuizClient::with_timeout(Duration::from_secs(secs))
            .context("failed to build HTTP client"),
    }
}

/// `mathgenie generate`
pub async fn generate<S, T>(
    args: GenerateArgs,
    app: &AppConfig,
    store: &S,
    client: &QuizClient<T>,
) -> Result<String>
where
    S: SettingsStore,
    T: Transport,
{
    let stored = store
        .load_or_default()
        .context("failed to load saved settings")?;
    let connection = apply_overrides(stored, &args.connection);

    for topic in &args.topics {
        if find_topic(topic).is_none() {
            warn!(topic = %topic, "Topic is not in the built-in catalogue, sending as-is");
        }
    }

    let params = QuizRequestParams::new(
        args.topics,
        args.difficulty.unwrap_or(app.quiz.default_difficulty),
        args.count.unwrap_or(app.quiz.default_count),
    )?;

    info!(
        topics = ?params.topics(),
        difficulty = %params.difficulty(),
        count = params.count(),
        model = %connection.model_name,
        "Generating quiz"
    );

    let items = match client.generate_quiz(&connection, &params).await {
        Ok(items) => items,
        Err(LlmError::MissingCredential) => bail!(
            "API key is missing. Run `mathgenie settings set --api-key <KEY>` or set MATHGENIE_API_KEY."
        ),
        Err(err) => return Err(err).context("quiz generation failed"),
    };

    match args.output {
        OutputFormat::Text => Ok(render::format_quiz(&items, args.reveal)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&items)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// `mathgenie settings ...`
pub fn settings<S: SettingsStore>(command: SettingsCommand, store: &S) -> Result<String> {
    match command {
        SettingsCommand::Show => {
            let config = store
                .load_or_default()
                .context("failed to load saved settings")?;
            Ok(render::format_settings(&config))
        }
        SettingsCommand::Set(overrides) => {
            if overrides.is_empty() {
                bail!("nothing to change: pass --base-url, --api-key or --model");
            }
            let current = store
                .load_or_default()
                .context("failed to load saved settings")?;
            let updated = apply_overrides(current, &overrides);
            store.save(&updated).context("failed to save settings")?;
            Ok(format!("Settings saved.\n{}", render::format_settings(&updated)))
        }
        SettingsCommand::Reset => {
            let removed = store.clear().context("failed to clear settings")?;
            Ok(if removed {
                "Settings cleared; defaults will be used.\n".to_string()
            } else {
                "No saved settings.\n".to_string()
            })
        }
    }
}
