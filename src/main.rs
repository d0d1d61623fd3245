use anyhow::Result;
use kalshi_climate::format::{
    filter_events_by_category, format_category_name, format_date, format_price, format_volume,
    CategoryFilter,
};
use kalshi_climate::{
    compute_category_statistics, Aggregation, CategoryStatistics, ClimateContracts, Event,
    KalshiClient, KalshiConfig,
};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    info!("Starting Kalshi climate dashboard...");

    let config = KalshiConfig::from_env()?;
    let client = KalshiClient::new(&config)?;
    let contracts = ClimateContracts::new(client);

    // First CLI argument wins over CLIMATE_CATEGORY
    let selection = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CLIMATE_CATEGORY").ok())
        .unwrap_or_default();
    let filter: CategoryFilter = selection.parse()?;

    match &filter {
        CategoryFilter::All => {
            let result = contracts.get_all_open_climate_contracts().await;
            println!("\nAll Climate Contracts");
            print_contracts(&result, &filter);
        }
        CategoryFilter::Only(category) => {
            let result = contracts.get_climate_contracts_by_category(category, None).await;
            let stats = compute_category_statistics(&result.items);
            println!("\n{} Contracts", format_category_name(category));
            print_statistics(&stats);
            print_contracts(&result, &filter);
        }
    }

    Ok(())
}

/// Events to list under the current selection. A single-category fetch is
/// shown as returned: the API's own `category` label may not match the query.
fn displayed_events<'a>(result: &'a Aggregation<Event>, filter: &CategoryFilter) -> Vec<&'a Event> {
    match filter {
        CategoryFilter::All => filter_events_by_category(&result.items, filter),
        CategoryFilter::Only(_) => result.items.iter().collect(),
    }
}

fn print_contracts(result: &Aggregation<Event>, filter: &CategoryFilter) {
    let events = displayed_events(result, filter);
    if events.is_empty() {
        println!("No contracts found for this category.");
    }
    for event in events {
        print_card(event);
    }

    if !result.is_complete() {
        error!("{} fetches failed; results are incomplete", result.failures.len());
        for failure in &result.failures {
            println!("  ! {}: {}", failure.scope, failure.error);
        }
    }
}

fn print_card(event: &Event) {
    println!("───────────────────────────────────────────");
    println!("{}", format_category_name(&event.category));
    println!("{}", event.title);
    if !event.subtitle.is_empty() {
        println!("  {}", event.subtitle);
    }
    println!("  Status: {}    Markets: {}", event.status, event.market_count());
    match event.markets().first() {
        Some(market) => println!("  Market: {}", market.title),
        None => println!("  No market data available"),
    }
}

fn print_statistics(stats: &CategoryStatistics) {
    println!("═══════════════════════════════════════════");
    println!("Category Statistics");
    println!("  Total Events:       {}", stats.total_events);
    println!("  Total Markets:      {}", stats.total_markets);
    println!("  Average Price:      {}", format_price(Some(stats.average_price)));
    println!("  Highest 24h Volume: {}", format_volume(stats.highest_volume));
    if let Some(date) = &stats.nearest_settlement {
        println!("  Nearest Settlement: {}", format_date(date));
    }
    println!("═══════════════════════════════════════════");
}
