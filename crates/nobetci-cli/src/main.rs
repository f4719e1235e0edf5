use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nobetci_core::{AppConfig, SupportedCities};
use nobetci_scraper::{EczaneScraper, ScraperSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nobetci-cli")]
#[command(about = "Look up today's on-duty pharmacies for a Turkish city")]
struct Cli {
    /// City name or code, e.g. "İstanbul" or "izmir"
    #[arg(long, env = "NOBETCI_CITY", global = true)]
    city: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the city's on-duty listing
    List {
        /// Prepended to every pharmacy's relative detail link
        #[arg(long, default_value = "")]
        link_prefix: String,
    },
    /// Print one pharmacy's detail page
    Detail {
        /// Detail link, relative to the city site or absolute on it
        link: String,
    },
    /// Print the supported city codes and names
    Cities,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = nobetci_core::load_app_config_from_env()?;

    // Logs go to stderr so stdout stays pure JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let success = match cli.command {
        Commands::List { link_prefix } => {
            let scraper = build_scraper(cli.city.as_deref(), &config)?;
            let envelope = scraper.list_pharmacies(&link_prefix).await;
            print_json(&envelope)?;
            envelope.is_success()
        }
        Commands::Detail { link } => {
            let scraper = build_scraper(cli.city.as_deref(), &config)?;
            let envelope = scraper.pharmacy_detail(&link).await;
            print_json(&envelope)?;
            envelope.is_success()
        }
        Commands::Cities => {
            print_json(&SupportedCities)?;
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_scraper(city: Option<&str>, config: &AppConfig) -> anyhow::Result<EczaneScraper> {
    let city = city.unwrap_or(&config.city);
    let scraper = EczaneScraper::new(city, &ScraperSettings::from_app_config(config))?;
    tracing::debug!(city = %scraper.city(), "scraper configured");
    Ok(scraper)
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
