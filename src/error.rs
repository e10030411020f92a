use colored::{ColoredString, Colorize};
use std::error;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Raised when two amounts of money with different currencies are operated together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferentCurrencyError {
    pub left: String,
    pub right: String,
}

impl DifferentCurrencyError {
    pub fn new<L: Display, R: Display>(left: L, right: R) -> Self {
        DifferentCurrencyError {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

impl error::Error for DifferentCurrencyError {}
impl Display for DifferentCurrencyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Different currencies: {} and {}", self.left, self.right)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    CannotReadFile(String),
    UnexpectedInput(Option<String>),
}

impl error::Error for ParserError {}
impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::CannotReadFile(file) => write!(f, "Cannot read file {}", file),
            ParserError::UnexpectedInput(None) => write!(f, "Unexpected input"),
            ParserError::UnexpectedInput(Some(message)) => write!(f, "{}", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    AliasNotInList(String),
    RepeatedAlias { alias: String, existing: String },
}

impl error::Error for ListError {}
impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ListError::AliasNotInList(message) => write!(f, "{}", message),
            ListError::RepeatedAlias { alias, existing } => {
                write!(f, "Repeated alias {} (already used for {})", alias, existing)
            }
        }
    }
}

/// Errors found while evaluating a money expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    Parse(String),
    DifferentCurrency(DifferentCurrencyError),
    DivisionByZero,
    TypeMismatch(String),
    UnknownCurrency(String),
}

impl error::Error for ExpressionError {}
impl Display for ExpressionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionError::Parse(message) => write!(f, "Could not parse expression\n{}", message),
            ExpressionError::DifferentCurrency(e) => write!(f, "{}", e),
            ExpressionError::DivisionByZero => write!(f, "Division by zero"),
            ExpressionError::TypeMismatch(message) => write!(f, "{}", message),
            ExpressionError::UnknownCurrency(c) => write!(f, "Unknown currency {:?}", c),
        }
    }
}

impl From<DifferentCurrencyError> for ExpressionError {
    fn from(error: DifferentCurrencyError) -> Self {
        ExpressionError::DifferentCurrency(error)
    }
}

/// The error the command line reports
#[derive(Debug)]
pub struct Error {
    pub message: Vec<ColoredString>,
}

impl error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ColoredStrings(&self.message))
    }
}

impl From<ParserError> for Error {
    fn from(error: ParserError) -> Self {
        match error {
            ParserError::CannotReadFile(s) => Error {
                message: vec![
                    "Cannot read file ".normal(),
                    s.as_str().red().bold(),
                ],
            },
            ParserError::UnexpectedInput(s) => Error {
                message: match s {
                    None => vec![],
                    Some(s) => vec![ColoredString::from(s.as_str())],
                },
            },
        }
    }
}

impl From<ListError> for Error {
    fn from(error: ListError) -> Self {
        Error {
            message: vec![format!("{}", error).as_str().red()],
        }
    }
}

impl From<DifferentCurrencyError> for Error {
    fn from(error: DifferentCurrencyError) -> Self {
        Error {
            message: vec![
                "Different currencies: ".normal(),
                error.left.as_str().red().bold(),
                " and ".normal(),
                error.right.as_str().red().bold(),
            ],
        }
    }
}

impl From<ExpressionError> for Error {
    fn from(error: ExpressionError) -> Self {
        match error {
            ExpressionError::DifferentCurrency(e) => Error::from(e),
            ExpressionError::UnknownCurrency(c) => Error {
                message: vec![
                    "Unknown currency ".normal(),
                    c.as_str().bold().bright_red(),
                ],
            },
            other => Error {
                message: vec![format!("{}", other).as_str().bright_red()],
            },
        }
    }
}

// https://medium.com/apolitical-engineering/how-do-you-impl-display-for-vec-b8dbb21d814f
struct ColoredStrings<'a>(pub &'a Vec<ColoredString>);

impl<'a> fmt::Display for ColoredStrings<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.iter().fold(Ok(()), |result, partial| {
            result.and_then(|_| write!(f, "{}", partial))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn different_currency_message() {
        let err = DifferentCurrencyError::new("USD", "EUR (€)");
        assert_eq!(format!("{}", err), "Different currencies: USD and EUR (€)");
    }

    #[test]
    fn expression_error_wraps_currency_error() {
        let err: ExpressionError = DifferentCurrencyError::new("USD", "EUR").into();
        assert_eq!(
            err,
            ExpressionError::DifferentCurrency(DifferentCurrencyError::new("USD", "EUR"))
        );
        colored::control::set_override(false);
        let generic = Error::from(err);
        assert_eq!(format!("{}", generic), "Different currencies: USD and EUR");
    }

    #[test]
    fn empty_parser_error_is_silent() {
        let generic = Error::from(ParserError::UnexpectedInput(None));
        assert_eq!(format!("{}", generic), "");
    }
}
