//! Parser module
//!
//! The parser takes an input string (or file) with currency definitions and translates it into
//! a list of currencies and aliases with a tokenizer. It also parses money expressions, see
//! [`value_expr`].

use std::convert::TryFrom;
use std::fs::read_to_string;
use std::path::PathBuf;

use colored::Colorize;
use pest::iterators::Pair;
use pest::Parser;

use crate::error::{ListError, ParserError};
use crate::models::currency::DEFAULT_DIGITS;
use crate::models::{Currency, HasName};
use crate::List;

pub(crate) mod utils;
pub mod value_expr;

#[derive(Parser)]
#[grammar = "grammar/grammar.pest"]
pub struct GrammarParser;

/// Currencies and aliases read from a definitions file, in order of appearance
#[derive(Debug, Clone, Default)]
pub struct ParsedCurrencies {
    pub currencies: Vec<Currency>,
    /// Pairs of (alias, currency code)
    pub aliases: Vec<(String, String)>,
}

impl ParsedCurrencies {
    pub fn new() -> Self {
        ParsedCurrencies::default()
    }
    pub fn len(&self) -> usize {
        self.currencies.len() + self.aliases.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a proper list of currencies
    ///
    /// The first definition of a code wins. Symbols become aliases when nobody else is using
    /// them yet, explicit aliases must not collide.
    pub fn to_list(self) -> Result<List<Currency>, ListError> {
        let mut list = List::<Currency>::new();
        for currency in self.currencies.iter() {
            if !list.insert(currency.clone()) {
                eprintln!(
                    "{} currency {} is defined more than once, keeping the first definition",
                    "Warning:".yellow().bold(),
                    currency.get_name()
                );
            }
        }
        for (alias, code) in self.aliases {
            let currency = list.get(code.as_str())?.clone();
            list.add_alias(alias, &currency)?;
        }
        for currency in self.currencies.iter() {
            let currency = list.get(currency.get_name())?.clone();
            if let Some(symbol) = currency.get_symbol() {
                if let Err(e) = list.add_alias(symbol.to_string(), &currency) {
                    eprintln!("{} {}", "Warning:".yellow().bold(), e);
                }
            }
        }
        Ok(list)
    }
}

/// A struct for holding data about the string being parsed
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    file: Option<&'a PathBuf>,
    content: String,
}

impl<'a> TryFrom<&'a PathBuf> for Tokenizer<'a> {
    type Error = ParserError;

    fn try_from(file: &'a PathBuf) -> Result<Self, Self::Error> {
        match read_to_string(file) {
            Ok(content) => Ok(Tokenizer {
                file: Some(file),
                content,
            }),
            Err(err) => Err(ParserError::CannotReadFile(format!(
                "{} ({})",
                file.display(),
                err
            ))),
        }
    }
}

impl<'a> From<String> for Tokenizer<'a> {
    fn from(content: String) -> Self {
        Tokenizer {
            file: None,
            content,
        }
    }
}

impl<'a> Tokenizer<'a> {
    /// Parses a string with currency definitions
    pub fn tokenize(&self) -> Result<ParsedCurrencies, ParserError> {
        let mut parsed_currencies = ParsedCurrencies::new();
        let parsed = GrammarParser::parse(Rule::currencies, self.content.as_str())
            .map_err(|e| self.error(e.to_string()))?;
        for element in parsed.flat_map(|pair| pair.into_inner()) {
            match element.as_rule() {
                Rule::currency => self.parse_currency(element, &mut parsed_currencies)?,
                Rule::EOI => {}
                x => return Err(self.error(format!("Unexpected {:?}", x))),
            }
        }
        Ok(parsed_currencies)
    }

    fn parse_currency(
        &self,
        element: Pair<Rule>,
        parsed: &mut ParsedCurrencies,
    ) -> Result<(), ParserError> {
        let mut inner = element.into_inner();
        let code = match inner.next() {
            Some(code) => code.as_str().to_string(),
            None => return Err(self.error("Currency code expected. Not found.".to_string())),
        };
        let mut name = None;
        let mut symbol = None;
        let mut digits = DEFAULT_DIGITS;

        for property in inner {
            let rule = property.as_rule();
            let value = property.as_str();
            // the value is whatever follows the property keyword
            let value = match property.into_inner().next() {
                Some(v) => v.as_str().to_string(),
                None => return Err(self.error(format!("Empty property {:?}", value))),
            };
            match rule {
                Rule::name => name = Some(value),
                Rule::symbol => symbol = Some(value),
                Rule::digits => {
                    digits = value.parse::<usize>().map_err(|_| {
                        self.error(format!("Wrong number of digits for {}: {}", code, value))
                    })?
                }
                Rule::alias => parsed.aliases.push((value, code.clone())),
                other => return Err(self.error(format!("Unexpected {:?}", other))),
            }
        }

        parsed.currencies.push(Currency::from_parts(
            name.unwrap_or_else(|| code.clone()),
            code,
            symbol,
            digits,
        ));
        Ok(())
    }

    fn error(&self, message: String) -> ParserError {
        match self.file {
            Some(file) => ParserError::UnexpectedInput(Some(format!(
                "Error parsing {}\n{}",
                file.display(),
                message
            ))),
            None => ParserError::UnexpectedInput(Some(message)),
        }
    }
}
