use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_window::default_num_travelers;

/// A single priced trip option to be judged against the traveler's budget.
///
/// Only `price` and `max_budget` feed the verdict today. The remaining trip
/// metadata is accepted so callers can send full option summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealQuery {
    pub price: f64,
    #[serde(default = "default_currency")]
    pub currency: Option<String>,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_stops")]
    pub stops: Option<i64>,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default = "default_num_travelers")]
    pub num_travelers: Option<i64>,
    #[serde(default)]
    pub max_budget: Option<f64>,
}

impl DealQuery {
    pub fn new(price: f64, departure_date: NaiveDate) -> Self {
        Self {
            price,
            currency: default_currency(),
            departure_date,
            return_date: None,
            stops: default_stops(),
            duration_minutes: None,
            num_travelers: default_num_travelers(),
            max_budget: None,
        }
    }

    pub fn with_max_budget(mut self, max_budget: f64) -> Self {
        self.max_budget = Some(max_budget);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealResult {
    pub is_good_deal: bool,
    pub price_trend: PriceTrend,
    pub note: String,
}

/// Price relative to budget. Not a historical movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Stable,
    Rising,
}

fn default_currency() -> Option<String> {
    Some("USD".to_string())
}

fn default_stops() -> Option<i64> {
    Some(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_take_their_defaults() {
        let q: DealQuery = serde_json::from_value(json!({
            "price": 420.5,
            "departureDate": "2024-03-01",
        }))
        .unwrap();

        assert_eq!(q.currency.as_deref(), Some("USD"));
        assert_eq!(q.stops, Some(0));
        assert_eq!(q.num_travelers, Some(1));
        assert_eq!(q.duration_minutes, None);
        assert_eq!(q.max_budget, None);
        assert_eq!(q, DealQuery::new(420.5, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn rejects_missing_price() {
        let res = serde_json::from_value::<DealQuery>(json!({"departureDate": "2024-03-01"}));
        assert!(res.is_err());
    }

    #[test]
    fn trend_uses_lowercase_labels() {
        assert_eq!(serde_json::to_value(PriceTrend::Stable).unwrap(), json!("stable"));
        assert_eq!(serde_json::to_value(PriceTrend::Rising).unwrap(), json!("rising"));
        assert!(serde_json::from_value::<PriceTrend>(json!("falling")).is_err());
    }
}
