use crate::domain::{Budget, DealQuery, DealResult, PriceTrend};

pub const NOTE_WITHIN_BUDGET: &str = "Meets budget criteria";
// Also used when no budget was given; callers match on this exact text.
pub const NOTE_OVER_BUDGET: &str = "Price exceeds budget";

pub fn evaluate(query: &DealQuery) -> DealResult {
    let budget = Budget::effective(query.max_budget);

    let is_good_deal = budget.is_some_and(|b| query.price <= b.amount());

    // Without a budget the price is compared to itself, which is never rising.
    let reference = budget.map_or(query.price, Budget::amount);
    let price_trend = if query.price > reference {
        PriceTrend::Rising
    } else {
        PriceTrend::Stable
    };

    let note = if is_good_deal {
        NOTE_WITHIN_BUDGET
    } else {
        NOTE_OVER_BUDGET
    };

    DealResult {
        is_good_deal,
        price_trend,
        note: note.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn deal(price: f64, max_budget: Option<f64>) -> DealQuery {
        let mut q = DealQuery::new(price, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        q.max_budget = max_budget;
        q
    }

    #[test]
    fn price_at_budget_is_a_good_deal() {
        let res = evaluate(&deal(100.0, Some(100.0)));
        assert!(res.is_good_deal);
        assert_eq!(res.price_trend, PriceTrend::Stable);
        assert_eq!(res.note, "Meets budget criteria");
    }

    #[test]
    fn price_over_budget_is_rising() {
        let res = evaluate(&deal(101.0, Some(100.0)));
        assert!(!res.is_good_deal);
        assert_eq!(res.price_trend, PriceTrend::Rising);
        assert_eq!(res.note, "Price exceeds budget");
    }

    #[test]
    fn zero_budget_counts_as_no_budget() {
        let res = evaluate(&deal(50.0, Some(0.0)));
        assert!(!res.is_good_deal);
        assert_eq!(res.price_trend, PriceTrend::Stable);
        assert_eq!(res.note, "Price exceeds budget");

        let free = evaluate(&deal(0.0, Some(0.0)));
        assert!(!free.is_good_deal);
    }

    #[test]
    fn missing_budget_is_never_a_good_deal() {
        let res = evaluate(&deal(1.0, None));
        assert!(!res.is_good_deal);
        assert_eq!(res.price_trend, PriceTrend::Stable);
        assert_eq!(res.note, NOTE_OVER_BUDGET);
    }

    #[test]
    fn metadata_does_not_change_the_verdict() {
        let plain = deal(300.0, Some(450.0));
        let mut detailed = plain.clone();
        detailed.currency = Some("EUR".to_string());
        detailed.stops = Some(2);
        detailed.duration_minutes = Some(610);
        detailed.num_travelers = Some(3);
        detailed.return_date = NaiveDate::from_ymd_opt(2024, 3, 9);
        assert_eq!(evaluate(&plain), evaluate(&detailed));
    }

    #[test]
    fn same_query_same_answer() {
        let q = deal(812.4, Some(799.0));
        assert_eq!(evaluate(&q), evaluate(&q));
    }
}
