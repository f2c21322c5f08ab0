use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindowQuery {
    pub origin: String,
    pub destination: String,
    pub earliest_departure_date: NaiveDate,
    pub latest_departure_date: NaiveDate,
    #[serde(default)]
    pub earliest_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub latest_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default = "default_num_travelers")]
    pub num_travelers: Option<i64>,
    /// Free-form traveler preferences. Accepted for forward compatibility; not consulted.
    #[serde(default)]
    pub preferences: Option<Map<String, Value>>,
}

impl DateWindowQuery {
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        earliest_departure_date: NaiveDate,
        latest_departure_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            earliest_departure_date,
            latest_departure_date,
            earliest_return_date: None,
            latest_return_date: None,
            max_budget: None,
            num_travelers: default_num_travelers(),
            preferences: None,
        }
    }

    pub fn with_return_window(mut self, earliest: NaiveDate, latest: NaiveDate) -> Self {
        self.earliest_return_date = Some(earliest);
        self.latest_return_date = Some(latest);
        self
    }

    pub fn with_max_budget(mut self, max_budget: f64) -> Self {
        self.max_budget = Some(max_budget);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindowResult {
    pub recommended_departure_date: NaiveDate,
    pub recommended_return_date: Option<NaiveDate>,
    /// Between 0 and 1.
    pub confidence: f64,
}

pub(crate) fn default_num_travelers() -> Option<i64> {
    Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_take_their_defaults() {
        let q: DateWindowQuery = serde_json::from_value(json!({
            "origin": "JFK",
            "destination": "LHR",
            "earliestDepartureDate": "2024-01-01",
            "latestDepartureDate": "2024-01-11",
        }))
        .unwrap();

        assert_eq!(q.num_travelers, Some(1));
        assert_eq!(q.max_budget, None);
        assert_eq!(q.earliest_return_date, None);
        assert!(q.preferences.is_none());
    }

    #[test]
    fn explicit_null_travelers_stays_absent() {
        let q: DateWindowQuery = serde_json::from_value(json!({
            "origin": "JFK",
            "destination": "LHR",
            "earliestDepartureDate": "2024-01-01",
            "latestDepartureDate": "2024-01-11",
            "numTravelers": null,
        }))
        .unwrap();

        assert_eq!(q.num_travelers, None);
    }

    #[test]
    fn preferences_are_kept_as_given() {
        let q: DateWindowQuery = serde_json::from_value(json!({
            "origin": "JFK",
            "destination": "LHR",
            "earliestDepartureDate": "2024-01-01",
            "latestDepartureDate": "2024-01-11",
            "preferences": {"nonstop": true, "cabin": "economy"},
        }))
        .unwrap();

        let prefs = q.preferences.unwrap();
        assert_eq!(prefs.get("cabin"), Some(&json!("economy")));
    }

    #[test]
    fn rejects_missing_required_dates() {
        let res = serde_json::from_value::<DateWindowQuery>(json!({
            "origin": "JFK",
            "destination": "LHR",
            "earliestDepartureDate": "2024-01-01",
        }));
        assert!(res.is_err());
    }

    #[test]
    fn absent_return_date_serializes_as_null() {
        let result = DateWindowResult {
            recommended_departure_date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap(),
            recommended_return_date: None,
            confidence: 0.7,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "recommendedDepartureDate": "2024-01-06",
                "recommendedReturnDate": null,
                "confidence": 0.7,
            })
        );
    }
}
