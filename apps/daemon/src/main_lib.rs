use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fedisync_client::MastodonApiClient;
use fedisync_core::accounts::{AccountRepositoryTrait, NewAccount};
use fedisync_core::actions::ActionService;
use fedisync_core::cache::CacheSynchronizer;
use fedisync_core::events::EventHub;
use fedisync_storage_sqlite::accounts::AccountRepository;
use fedisync_storage_sqlite::timeline::TimelineCacheRepository;
use fedisync_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

use crate::commands::ActionCommand;
use crate::config::Config;

pub struct App {
    pub synchronizer: CacheSynchronizer,
    /// `None` when no instance credentials are configured
    pub actions: Option<ActionService>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FEDISYNC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_app(config: &Config) -> anyhow::Result<App> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let accounts = Arc::new(AccountRepository::new(Arc::clone(&pool), writer.clone()));
    let cache = Arc::new(TimelineCacheRepository::new(pool, writer));

    if let (Some(account), Some(domain)) = (&config.account, config.instance_domain()) {
        accounts
            .upsert(NewAccount {
                id: account.account_id.clone(),
                instance: domain,
                username: account.username.clone(),
                display_name: None,
            })
            .await?;
        accounts.set_active(&account.account_id).await?;
    }

    match accounts.get_active()? {
        Some(active) => tracing::info!("Active account: {}", active.full_name()),
        None => tracing::warn!("No active account, events will not touch the cache"),
    }

    let hub = EventHub::new();

    let actions = match &config.instance {
        Some(instance) => {
            let client = MastodonApiClient::new(
                &instance.base_url,
                &instance.access_token,
                config.request_timeout,
            )?;
            Some(ActionService::new(Arc::new(client), Arc::new(hub.clone())))
        }
        None => {
            tracing::warn!("No instance configured, action commands are disabled");
            None
        }
    };

    let synchronizer = CacheSynchronizer::new(hub, cache, accounts);

    Ok(App {
        synchronizer,
        actions,
    })
}

/// Reads action commands from stdin until Ctrl-C.
pub async fn run_until_shutdown(app: &App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Shutdown requested");
                return Ok(());
            }
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) if line.trim().is_empty() => {}
                Some(line) => handle_line(app, &line).await,
                None => {
                    tracing::debug!("stdin closed, waiting for Ctrl-C");
                    stdin_open = false;
                }
            }
        }
    }
}

async fn handle_line(app: &App, line: &str) {
    let Some(actions) = &app.actions else {
        tracing::warn!("Ignoring command, no instance configured");
        return;
    };

    let command = match ActionCommand::parse(line) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("{}", e);
            return;
        }
    };

    match command.execute(actions).await {
        Ok(summary) => tracing::info!("{}", summary),
        Err(e) => tracing::error!("Action failed: {}", e),
    }
}
