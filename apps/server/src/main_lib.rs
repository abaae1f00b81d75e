use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use solarbond_core::{
    audit::{AuditService, AuditServiceTrait},
    bonds::BondRepositoryTrait,
    irradiance::{
        CacheStore, DirectIrradianceSource, IrradianceCache, IrradianceClient,
        IrradianceSourceTrait, MemoryCacheStore,
    },
    production::ProductionRepositoryTrait,
};
use solarbond_irradiance::{NasaPowerConfig, NasaPowerProvider};
use solarbond_ledger::{EvmLedgerPublisher, LedgerConfig};
use solarbond_storage_sqlite::{
    db::{self, WriteHandle},
    BondRepository, DbPool, ProductionRepository, SqliteCacheStore,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{CacheMode, Config, LogFormat};
use crate::models::SeedData;

pub struct AppState {
    pub audit_service: Arc<dyn AuditServiceTrait>,
    pub bond_repository: Arc<dyn BondRepositoryTrait>,
    pub production_repository: Arc<dyn ProductionRepositoryTrait>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // `init` also installs the `log` bridge, so library crates show up here.
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

fn build_irradiance_source(
    config: &Config,
    pool: &Arc<DbPool>,
    writer: &WriteHandle,
) -> Arc<dyn IrradianceSourceTrait> {
    let provider = Arc::new(NasaPowerProvider::new(NasaPowerConfig {
        base_url: config.irradiance_base_url.clone(),
        timeout: config.irradiance_timeout,
    }));
    let client = Arc::new(IrradianceClient::new(provider));

    let store: Arc<dyn CacheStore> = match config.irradiance_cache {
        CacheMode::Off => {
            tracing::info!("Irradiance cache disabled, fetching directly");
            return Arc::new(DirectIrradianceSource::new(client));
        }
        CacheMode::Memory => Arc::new(MemoryCacheStore::new()),
        CacheMode::Sqlite => Arc::new(SqliteCacheStore::new(pool.clone(), writer.clone())),
    };
    tracing::info!("Irradiance cache mode: {:?}", config.irradiance_cache);
    Arc::new(IrradianceCache::new(store, client))
}

/// Upserts the bonds and production records of a seed file, bonds first so
/// production rows always have a parent.
async fn load_seed(
    path: &Path,
    bonds: &dyn BondRepositoryTrait,
    production: &dyn ProductionRepositoryTrait,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let seed: SeedData = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    seed.bonds
        .iter()
        .try_for_each(|b| b.validate())
        .and_then(|_| seed.production.iter().try_for_each(|r| r.validate()))?;

    let bond_count = bonds.upsert_bonds(seed.bonds).await?;
    let record_count = production.upsert_records(seed.production).await?;
    tracing::info!(
        "Seeded {} bonds and {} production records from {}",
        bond_count,
        record_count,
        path.display()
    );
    Ok(())
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let bond_repository = Arc::new(BondRepository::new(pool.clone(), writer.clone()));
    let production_repository = Arc::new(ProductionRepository::new(pool.clone(), writer.clone()));

    if let Some(seed_file) = &config.seed_file {
        load_seed(
            Path::new(seed_file),
            bond_repository.as_ref(),
            production_repository.as_ref(),
        )
        .await?;
    }

    let irradiance_source = build_irradiance_source(config, &pool, &writer);

    let ledger_publisher = Arc::new(
        EvmLedgerPublisher::new(LedgerConfig {
            rpc_url: config.ledger_rpc_url.clone(),
            private_key: config.ledger_private_key.clone(),
            contract_address: config.ledger_contract.clone(),
            chain_id: config.ledger_chain_id,
            timeout: config.ledger_timeout,
            ..LedgerConfig::default()
        })
        .context("Invalid ledger configuration")?,
    );

    let audit_service = Arc::new(AuditService::new(
        bond_repository.clone(),
        production_repository.clone(),
        irradiance_source,
        ledger_publisher,
    ));

    Ok(Arc::new(AppState {
        audit_service,
        bond_repository,
        production_repository,
    }))
}
