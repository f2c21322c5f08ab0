pub mod budget;
pub mod date_window;
pub mod deal;

pub use budget::Budget;
pub use date_window::{DateWindowQuery, DateWindowResult};
pub use deal::{DealQuery, DealResult, PriceTrend};
