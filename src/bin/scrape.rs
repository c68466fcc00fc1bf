//! Fetch one depth snapshot per the configuration and persist it for later
//! analysis.

use orderbook_analyzer::{
    api::{futures::FuturesClient, spot::SpotClient, SnapshotSource},
    config::{self, MarketType},
    store::SnapshotStore,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = config::read_config();

    let source: Box<dyn SnapshotSource> = match config.market {
        MarketType::Spot => Box::new(SpotClient::new(&config)),
        MarketType::Futures => Box::new(FuturesClient::new(&config)),
    };
    log::info!(
        "fetching {} {} depth snapshot for {}",
        String::from(&config.exchange),
        String::from(&config.market),
        config.currency_pair.symbol_for(config.market),
    );
    let snapshot = source.fetch_snapshot(config.limit).await?;

    let store = SnapshotStore::new(&config.data_dir);
    let path = store.save(
        config.exchange,
        config.market,
        &config.currency_pair,
        &snapshot,
    )?;
    println!("snapshot saved to {}", path.display());
    Ok(())
}
