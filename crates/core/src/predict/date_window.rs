use crate::domain::{Budget, DateWindowQuery, DateWindowResult};
use crate::time::ordinal::midpoint;

const DEFAULT_CONFIDENCE: f64 = 0.5;
const HIGH_BUDGET: f64 = 2000.0;
const MID_BUDGET: f64 = 1000.0;

pub fn recommend(query: &DateWindowQuery) -> DateWindowResult {
    let recommended_departure_date =
        midpoint(query.earliest_departure_date, query.latest_departure_date);

    let recommended_return_date = match (query.earliest_return_date, query.latest_return_date) {
        (Some(earliest), Some(latest)) => Some(midpoint(earliest, latest)),
        _ => None,
    };

    DateWindowResult {
        recommended_departure_date,
        recommended_return_date,
        confidence: confidence_for(query.max_budget),
    }
}

/// Larger budgets leave more room to book on the recommended date.
fn confidence_for(max_budget: Option<f64>) -> f64 {
    let Some(budget) = Budget::effective(max_budget) else {
        return DEFAULT_CONFIDENCE;
    };

    match budget.amount() {
        b if b >= HIGH_BUDGET => 0.9,
        b if b >= MID_BUDGET => 0.7,
        _ => 0.6,
    }
}
