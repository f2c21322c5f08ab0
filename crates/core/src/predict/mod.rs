//! Deterministic prediction rules behind the two `/predict` endpoints.
//!
//! Both functions are pure: same query in, same result out.

pub mod date_window;
pub mod deal;

pub use date_window::recommend;
pub use deal::evaluate;
