use anyhow::Context;
use clap::Parser;
use snip_cache::{MokaCache, NoopCache};
use snip_core::{LinkCache, LinkStore, UrlShortener};
use snip_engine::{ContentHashGenerator, LinkEngine, RandomTokenGenerator};
use snip_gateway::app::App;
use snip_gateway::cli::{Cli, IdStrategyArg, StoreBackendArg};
use snip_gateway::state::AppState;
use snip_storage::{MemoryStore, SqliteStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(
        (3..=32).contains(&cli.id_length),
        "--id-length must be between 3 and 32"
    );

    info!(
        listen_addr = %cli.listen_addr,
        store = %cli.store,
        id_strategy = %cli.id_strategy,
        id_length = cli.id_length,
        "starting snip gateway"
    );

    let shortener = match cli.store {
        StoreBackendArg::InMemory => build_engine(MemoryStore::new(), &cli),
        StoreBackendArg::Sqlite => {
            let store = SqliteStore::connect(&cli.database_url)
                .await
                .context("opening sqlite database")?;
            build_engine(store, &cli)
        }
    };

    let app = App::router(AppState::new(shortener));
    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .context("binding listen address")?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn build_engine<S: LinkStore>(store: S, cli: &Cli) -> Arc<dyn UrlShortener> {
    let cache: Arc<dyn LinkCache> = if cli.no_cache {
        Arc::new(NoopCache::new())
    } else {
        let ttl = Duration::from_secs(cli.cache_ttl_secs);
        let cache: MokaCache = match cli.cache_capacity {
            Some(capacity) => MokaCache::builder()
                .ttl(ttl)
                .max_capacity(capacity)
                .build()
                .into(),
            None => MokaCache::with_ttl(ttl),
        };
        if cli.cache_sweep_secs > 0 {
            cache.spawn_sweeper(Duration::from_secs(cli.cache_sweep_secs));
        }
        Arc::new(cache)
    };

    match cli.id_strategy {
        IdStrategyArg::Random => Arc::new(LinkEngine::with_max_attempts(
            store,
            cache,
            RandomTokenGenerator::with_length(cli.id_length),
            cli.max_attempts,
        )),
        IdStrategyArg::Hash => Arc::new(LinkEngine::with_max_attempts(
            store,
            cache,
            ContentHashGenerator::with_length(cli.id_length),
            cli.max_attempts,
        )),
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "failed to install shutdown signal handler");
            std::future::pending::<()>().await;
        }
    }
}
