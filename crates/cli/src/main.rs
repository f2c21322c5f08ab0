use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelml_core::client::{
    FallbackPredictionClient, HttpPredictionClient, LocalPredictionClient, PredictionClient,
};

mod query;

#[derive(Debug, Parser)]
#[command(name = "travelml", about = "Travel date and deal predictions")]
struct Cli {
    /// Ask the prediction service at ML_SERVICE_BASE_URL instead of computing locally.
    #[arg(long)]
    remote: bool,

    /// With --remote, fail instead of answering locally when the service is unreachable.
    #[arg(long, requires = "remote")]
    no_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend departure (and return) dates inside a window.
    DateWindow(query::DateWindowArgs),
    /// Judge a priced option against a budget.
    Deal(query::DealArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = travelml_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let cli = Cli::parse();

    let client: Box<dyn PredictionClient> = match (cli.remote, cli.no_fallback) {
        (false, _) => Box::new(LocalPredictionClient),
        (true, true) => Box::new(HttpPredictionClient::from_settings(&settings)?),
        (true, false) => Box::new(FallbackPredictionClient::new(
            HttpPredictionClient::from_settings(&settings)?,
            LocalPredictionClient,
        )),
    };

    let output = match run(client.as_ref(), cli.command).await {
        Ok(v) => v,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(client = client.client_name(), error = %err, "prediction failed");
            return Err(err);
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run(client: &dyn PredictionClient, command: Command) -> anyhow::Result<Value> {
    match command {
        Command::DateWindow(args) => {
            let query = args.into_query();
            tracing::debug!(client = client.client_name(), origin = %query.origin, destination = %query.destination, "best-date-window");
            let result = client.best_date_window(&query).await?;
            Ok(serde_json::to_value(result)?)
        }
        Command::Deal(args) => {
            let query = args.into_query();
            tracing::debug!(client = client.client_name(), price = query.price, "option-recommendation");
            let result = client.option_recommendation(&query).await?;
            Ok(serde_json::to_value(result)?)
        }
    }
}

fn init_sentry(settings: &travelml_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.require_sentry_dsn().ok()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("travelml").chain(args.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn date_window_runs_locally() {
        let cli = parse(&[
            "date-window",
            "--origin",
            "JFK",
            "--destination",
            "LHR",
            "--earliest-departure",
            "2024-01-01",
            "--latest-departure",
            "2024-01-11",
            "--max-budget",
            "1500",
        ]);
        assert!(!cli.remote);

        let out = run(&LocalPredictionClient, cli.command).await.unwrap();
        assert_eq!(
            out,
            json!({
                "recommendedDepartureDate": "2024-01-06",
                "recommendedReturnDate": null,
                "confidence": 0.7,
            })
        );
    }

    #[tokio::test]
    async fn deal_runs_locally() {
        let cli = parse(&[
            "deal",
            "--price",
            "101",
            "--max-budget",
            "100",
            "--departure-date",
            "2024-03-01",
        ]);
        let out = run(&LocalPredictionClient, cli.command).await.unwrap();
        assert_eq!(
            out,
            json!({"isGoodDeal": false, "priceTrend": "rising", "note": "Price exceeds budget"})
        );
    }

    #[test]
    fn return_bounds_must_come_together() {
        let res = Cli::try_parse_from([
            "travelml",
            "date-window",
            "--origin",
            "JFK",
            "--destination",
            "LHR",
            "--earliest-departure",
            "2024-01-01",
            "--latest-departure",
            "2024-01-11",
            "--earliest-return",
            "2024-01-20",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn no_fallback_requires_remote() {
        let res = Cli::try_parse_from([
            "travelml",
            "--no-fallback",
            "deal",
            "--price",
            "1",
            "--departure-date",
            "2024-03-01",
        ]);
        assert!(res.is_err());

        let cli = parse(&["--remote", "--no-fallback", "deal", "--price", "1", "--departure-date", "2024-03-01"]);
        assert!(cli.remote && cli.no_fallback);
    }

    #[tokio::test]
    async fn negative_budget_is_accepted_as_a_value() {
        let cli = parse(&[
            "deal",
            "--price",
            "10",
            "--max-budget",
            "-10",
            "--departure-date",
            "2024-03-01",
        ]);
        let out = run(&LocalPredictionClient, cli.command).await.unwrap();
        assert_eq!(
            out,
            json!({"isGoodDeal": false, "priceTrend": "rising", "note": "Price exceeds budget"})
        );
    }

    #[tokio::test]
    async fn negative_price_and_date_window_budget_parse() {
        let cli = parse(&[
            "deal",
            "--price",
            "-5",
            "--max-budget",
            "100",
            "--departure-date",
            "2024-03-01",
        ]);
        let out = run(&LocalPredictionClient, cli.command).await.unwrap();
        assert_eq!(out["isGoodDeal"], true);

        let cli = parse(&[
            "date-window",
            "--origin",
            "JFK",
            "--destination",
            "LHR",
            "--earliest-departure",
            "2024-01-01",
            "--latest-departure",
            "2024-01-11",
            "--max-budget",
            "-10",
        ]);
        let out = run(&LocalPredictionClient, cli.command).await.unwrap();
        assert_eq!(out["confidence"], 0.6);
    }
}
