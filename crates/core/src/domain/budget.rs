/// Traveler budget as the prediction rules see it.
///
/// Callers send `maxBudget` as an optional number, and a budget of exactly
/// zero has always meant "no budget given". Both predictors go through
/// [`Budget::effective`] so that rule lives in one place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Budget(f64);

impl Budget {
    pub fn effective(max_budget: Option<f64>) -> Option<Self> {
        max_budget.filter(|b| *b != 0.0).map(Self)
    }

    pub fn amount(self) -> f64 {
        self.0
    }
}
