use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use bakery_filter::data::filter::{
    chocolate_items_functional, chocolate_items_imperative, items_above_threshold, items_of_type,
    names,
};
use bakery_filter::data::loader::load_file;
use bakery_filter::report::{print_id_names, print_names, ConsoleSink};
use bakery_filter::DEFAULT_INVENTORY_PATH;

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_PATH));

    let dataset = load_file(&path)
        .with_context(|| format!("loading inventory from {}", path.display()))?;
    info!("{} items, price threshold {}", dataset.len(), dataset.price_thresh_now);

    let mut sink = ConsoleSink::stdout();

    // ---- Simple example: threshold and type filters ----
    let items = items_above_threshold(&dataset)?;
    let donuts = items_of_type(&dataset, "donut")?;
    print_id_names(&mut sink, "Printing items above threshold", &items)?;
    print_id_names(&mut sink, "Printing donuts", &donuts)?;

    // ---- Nested example: chocolate batter above threshold ----
    let imperative = chocolate_items_imperative(&dataset)?;
    print_names(
        &mut sink,
        "Chocolate items above threshold (imperative)",
        &names(&imperative)?,
    )?;

    let functional = chocolate_items_functional(&dataset)?;
    print_names(
        &mut sink,
        "Chocolate items above threshold (functional)",
        &names(&functional)?,
    )?;

    Ok(())
}
