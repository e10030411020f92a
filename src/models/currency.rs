use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::HasName;

/// Currency representation
///
/// A currency has a name, a code (ISO 4217 style, like `USD`), an optional symbol and
/// the number of digits used when displaying amounts. Two currencies are the same only
/// when all four fields are the same.
///
/// Nothing is validated on construction: the code is not checked to be three letters long.
///
/// # Examples
/// ```rust
/// use money::models::Currency;
///
/// let usd1 = Currency::new("US Dollar", "USD").with_symbol("$");
/// let usd2 = Currency::from_parts("US Dollar", "USD", Some("$"), 2);
/// assert_eq!(usd1, usd2);
/// assert_eq!(format!("{}", usd1), "USD ($)");
///
/// // A different digit count is a different currency
/// let usd3 = usd2.clone().with_digits(3);
/// assert_ne!(usd2, usd3);
///
/// let eur = Currency::new("Euro", "EUR");
/// assert_eq!(format!("{}", eur), "EUR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency {
    name: String,
    code: String,
    symbol: Option<String>,
    digits: usize,
}

pub const DEFAULT_DIGITS: usize = 2;

impl Currency {
    /// A currency without symbol that displays two digits
    pub fn new<N: Into<String>, C: Into<String>>(name: N, code: C) -> Self {
        Currency {
            name: name.into(),
            code: code.into(),
            symbol: None,
            digits: DEFAULT_DIGITS,
        }
    }

    pub fn from_parts<N, C, S>(name: N, code: C, symbol: Option<S>, digits: usize) -> Self
    where
        N: Into<String>,
        C: Into<String>,
        S: Into<String>,
    {
        Currency {
            name: name.into(),
            code: code.into(),
            symbol: symbol.map(|s| s.into()),
            digits,
        }
    }

    pub fn with_symbol<S: Into<String>>(self, symbol: S) -> Self {
        Currency {
            symbol: Some(symbol.into()),
            ..self
        }
    }

    pub fn with_digits(self, digits: usize) -> Self {
        Currency { digits, ..self }
    }

    pub fn get_code(&self) -> &str {
        self.code.as_str()
    }
    /// The symbol, if there is a non empty one
    pub fn get_symbol(&self) -> Option<&str> {
        self.symbol.as_deref().filter(|s| !s.is_empty())
    }
    pub fn get_digits(&self) -> usize {
        self.digits
    }
    /// The English name of the currency
    pub fn get_full_name(&self) -> &str {
        self.name.as_str()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.get_symbol() {
            Some(symbol) => write!(f, "{} ({})", self.code, symbol),
            None => write!(f, "{}", self.code),
        }
    }
}

impl HasName for Currency {
    fn get_name(&self) -> &str {
        self.code.as_str()
    }
}

impl<'a> From<&'a str> for Currency {
    fn from(code: &'a str) -> Self {
        Currency::new(code, code)
    }
}
