pub mod currencies;
pub mod eval;
