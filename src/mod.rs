//! Immutable money and currency value objects
//!
//! A [`Money`](models::Money) is an exact amount of some [`Currency`](models::Currency).
//! Amounts are never changed, every operation returns a new value.
//!
//! ```rust
//! use money::models::{Currency, Money};
//! use num::BigInt;
//! use std::sync::Arc;
//!
//! let usd = Arc::new(Currency::new("US Dollar", "USD").with_symbol("$"));
//! let price = Money::from_integer(10, usd.clone());
//! let total = price.mul(BigInt::from(3)).add(&Money::from_integer(5, usd)).unwrap();
//! assert_eq!(format!("{}", total), "$35.00");
//! assert_eq!(format!("{}", price), "$10.00");
//! ```
extern crate pest;
#[macro_use]
extern crate pest_derive;

mod app;
pub mod commands;
mod default_currencies;
mod error;
mod list;
pub mod models;
pub mod parser;

pub use app::{run_app, CommonOpts};
pub use default_currencies::default_currencies;
pub use error::{DifferentCurrencyError, Error, ExpressionError, ListError, ParserError};
pub use list::List;
