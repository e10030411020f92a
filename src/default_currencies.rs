use crate::models::Currency;
use crate::parser::Tokenizer;
use crate::{Error, List};

/// Currencies known without any definitions file
pub(crate) const DEFAULT_CURRENCIES: &str = "; builtin currencies
currency USD
    name US Dollar
    symbol $
    alias dollar
currency EUR
    name Euro
    symbol €
    alias euro
currency GBP
    name Pound Sterling
    symbol £
    alias pound
currency JPY
    name Japanese Yen
    symbol ¥
    digits 0
    alias yen
currency CHF
    name Swiss Franc
    alias franc
";

/// The builtin currency list
///
/// # Examples
/// ```rust
/// let currencies = money::default_currencies().unwrap();
/// assert_eq!(currencies.get("€").unwrap().get_code(), "EUR");
/// assert_eq!(currencies.get("yen").unwrap().get_digits(), 0);
/// ```
pub fn default_currencies() -> Result<List<Currency>, Error> {
    let parsed = Tokenizer::from(DEFAULT_CURRENCIES.to_string()).tokenize()?;
    Ok(parsed.to_list()?)
}
