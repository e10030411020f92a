//! Money and currency models
pub use currency::Currency;
pub use money::{Money, Scalar};

pub mod currency;
pub mod money;

pub trait HasName {
    fn get_name(&self) -> &str;
}
