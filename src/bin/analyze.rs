//! Load the persisted snapshot for the configured market, run the depth
//! analysis and print the result.
//!
//! All formatting lives here; the library hands back plain data.

use orderbook_analyzer::{
    analysis::{analyze, SideAnalysis},
    config,
    orderbook::NormalizedBook,
    store::SnapshotStore,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = config::read_config();

    let store = SnapshotStore::new(&config.data_dir);
    let snapshot = store.load(config.exchange, config.market, &config.currency_pair)?;
    let book = NormalizedBook::from_snapshot(&snapshot)?;
    let result = analyze(&book, config.depth)?;

    print_side("Top Bids (Buy Orders)", &result.bids);
    print_side("Top Asks (Sell Orders)", &result.asks);
    if let Some(spread) = result.spread() {
        println!("\nSpread: {spread}");
    }
    Ok(())
}

fn print_side(heading: &str, side: &SideAnalysis) {
    println!("\n--- {heading} ---");
    for (level, cumulative) in side.levels.iter().zip(&side.cumulative) {
        println!(
            "Price: {}, Quantity: {}, Cumulative: {}",
            level.price, level.quantity, cumulative
        );
    }
    match &side.wall {
        Some(wall) => println!("Wall: quantity {} at price {}", wall.quantity, wall.price),
        None => println!("Wall: none"),
    }
}
