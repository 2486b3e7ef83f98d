//! Terminal front end: one line in, one exchange out.

use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use constraint_chat::adapters::{
    ConsoleFailureReporter, ConsoleRenderer, HttpBackendConfig, HttpChatBackend, NoCredentials,
    PasswordGrantConfig, PasswordGrantProvider, StaticTokenProvider, TokioPacer,
};
use constraint_chat::application::{ExchangeCoordinator, ExchangeMode};
use constraint_chat::config::{AppConfig, CredentialSource};
use constraint_chat::ports::CredentialProvider;

const EMPTY_STATE: &str = "Describe when, where and against whom your league plays. \
Commands: /steps, /plain, /logout, /quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let json = config.client.log_json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.client.log_level)),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    tracing::info!(
        endpoint = %config.client.endpoint,
        mode = ?config.client.exchange_mode,
        "constraint-chat v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let backend = HttpChatBackend::new(
        HttpBackendConfig::new(&config.client.endpoint).with_timeout(config.client.timeout()),
    )?;

    let mut login: Option<Arc<PasswordGrantProvider>> = None;
    let credentials: Arc<dyn CredentialProvider> = match config.auth.source() {
        CredentialSource::None => Arc::new(NoCredentials),
        CredentialSource::Static { token } => Arc::new(StaticTokenProvider::new(token)),
        CredentialSource::PasswordGrant {
            token_url,
            username,
            password,
        } => {
            let provider = Arc::new(PasswordGrantProvider::new(PasswordGrantConfig::new(
                token_url, username, password,
            ))?);
            login = Some(Arc::clone(&provider));
            provider
        }
    };

    let coordinator = ExchangeCoordinator::new(
        Arc::new(backend),
        credentials,
        Arc::new(ConsoleFailureReporter::stderr()),
        Arc::new(TokioPacer),
    )
    .with_mode(config.client.exchange_mode)
    .with_pacing(config.replay.policy());

    let mut renderer = ConsoleRenderer::stdout().with_timestamps(config.client.show_timestamps);
    coordinator.render(&mut renderer, EMPTY_STATE)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" => break,
            "/steps" => {
                coordinator.set_mode(ExchangeMode::Steps);
                continue;
            }
            "/plain" => {
                coordinator.set_mode(ExchangeMode::Plain);
                continue;
            }
            "/logout" => {
                if let Some(provider) = &login {
                    provider.logout().await;
                }
                continue;
            }
            _ => {}
        }

        // Failures already went to the reporter
        coordinator.send(line).await;
        coordinator.render(&mut renderer, EMPTY_STATE)?;
    }

    Ok(())
}
