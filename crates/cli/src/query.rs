use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use travelml_core::domain::{DateWindowQuery, DealQuery};

pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

#[derive(Debug, Args)]
pub struct DateWindowArgs {
    #[arg(long)]
    origin: String,

    #[arg(long)]
    destination: String,

    /// Earliest acceptable departure (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    earliest_departure: NaiveDate,

    /// Latest acceptable departure (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    latest_departure: NaiveDate,

    /// Earliest acceptable return; needs --latest-return.
    #[arg(long, value_parser = parse_date, requires = "latest_return")]
    earliest_return: Option<NaiveDate>,

    #[arg(long, value_parser = parse_date, requires = "earliest_return")]
    latest_return: Option<NaiveDate>,

    #[arg(long, allow_negative_numbers = true)]
    max_budget: Option<f64>,

    #[arg(long, default_value_t = 1)]
    travelers: i64,
}

impl DateWindowArgs {
    pub fn into_query(self) -> DateWindowQuery {
        let mut query = DateWindowQuery::new(
            self.origin,
            self.destination,
            self.earliest_departure,
            self.latest_departure,
        );
        query.earliest_return_date = self.earliest_return;
        query.latest_return_date = self.latest_return;
        query.max_budget = self.max_budget;
        query.num_travelers = Some(self.travelers);
        query
    }
}

#[derive(Debug, Args)]
pub struct DealArgs {
    /// Total price of the option.
    #[arg(long, allow_negative_numbers = true)]
    price: f64,

    #[arg(long, value_parser = parse_date)]
    departure_date: NaiveDate,

    #[arg(long, value_parser = parse_date)]
    return_date: Option<NaiveDate>,

    #[arg(long, default_value = "USD")]
    currency: String,

    #[arg(long, default_value_t = 0)]
    stops: i64,

    #[arg(long)]
    duration_minutes: Option<i64>,

    #[arg(long, default_value_t = 1)]
    travelers: i64,

    #[arg(long, allow_negative_numbers = true)]
    max_budget: Option<f64>,
}

impl DealArgs {
    pub fn into_query(self) -> DealQuery {
        let mut query = DealQuery::new(self.price, self.departure_date);
        query.return_date = self.return_date;
        query.currency = Some(self.currency);
        query.stops = Some(self.stops);
        query.duration_minutes = self.duration_minutes;
        query.num_travelers = Some(self.travelers);
        query.max_budget = self.max_budget;
        query
    }
}
