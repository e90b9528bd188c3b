use dotenvy::dotenv;
use finbuddy::config;
use finbuddy::core::metrics::compute_metrics;
use finbuddy::core::settings::IncomeSettingsHolder;
use finbuddy::errors::Result;
use finbuddy::gateway::{FileSettingsStore, HttpGateway};
use finbuddy::store;
use std::{env, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!("Successfully processed application configuration.");

    // 4. Build the gateway. The API token is loaded here, directly before
    // use, not stored in AppConfig.
    let token = env::var("FINBUDDY_API_TOKEN").ok();
    let gateway = Arc::new(HttpGateway::new(app_config.api_base_url.clone(), token));

    // 5. Load the persisted manual income figures
    let settings_store = Arc::new(FileSettingsStore::new(&app_config.settings_path));
    let incomes = IncomeSettingsHolder::load(settings_store);

    // 6. Fetch the entity snapshot and print the dashboard summary
    let store = store::new_shared_store();
    store::refresh_all(gateway.as_ref(), &store).await?;

    let snapshot = store.read().await;
    let metrics = compute_metrics(&snapshot.transactions, &snapshot.loans, &incomes.get());

    println!("Total income:   {:>10.2}", metrics.total_income);
    println!("Total expenses: {:>10.2}", metrics.total_expenses);
    println!("Net:            {:>10.2}", metrics.net);
    println!("Spent:          {:>9.1}%", metrics.spent_percent);
    if !metrics.category_breakdown.is_empty() {
        println!("Expenses by category:");
        for entry in &metrics.category_breakdown {
            println!("  {:<20} {:>10.2}", entry.label, entry.amount);
        }
    }

    Ok(())
}
