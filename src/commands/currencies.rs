use colored::Colorize;
use prettytable::format;
use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;
use regex::Regex;
use std::convert::TryFrom;
use std::sync::Arc;

use crate::models::{Currency, HasName};
use crate::{CommonOpts, Error, List};

pub fn execute(options: &CommonOpts, pattern: Option<&str>) -> Result<(), Error> {
    let currencies = List::<Currency>::try_from(options)?;
    print_currencies(&currencies, pattern)
}

/// Prints a table with the currencies whose code, name or aliases match the pattern
pub(crate) fn print_currencies(
    currencies: &List<Currency>,
    pattern: Option<&str>,
) -> Result<(), Error> {
    let table = currencies_table(currencies, pattern)?;
    // Print the table to stdout
    table.printstd();
    Ok(())
}

fn currencies_table(currencies: &List<Currency>, pattern: Option<&str>) -> Result<Table, Error> {
    let regex = match pattern {
        Some(pattern) => match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(_) => {
                return Err(Error {
                    message: vec![
                        "Invalid pattern ".normal(),
                        pattern.bold().bright_red(),
                    ],
                })
            }
        },
        None => None,
    };
    let mut selected: Vec<&Arc<Currency>> = currencies
        .values()
        .filter(|c| match &regex {
            Some(regex) => {
                regex.is_match(c.get_name())
                    || regex.is_match(c.get_full_name())
                    || currencies.get_aliases(c).iter().any(|a| regex.is_match(a))
            }
            None => true,
        })
        .collect();
    selected.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        ["Code", "Name", "Symbol", "Digits", "Aliases"]
            .iter()
            .map(|title| Cell::new(title))
            .collect(),
    ));
    for currency in selected {
        table.add_row(Row::new(vec![
            Cell::new(currency.get_code()),
            Cell::new(currency.get_full_name()),
            Cell::new(currency.get_symbol().unwrap_or("")),
            Cell::new_align(
                format!("{}", currency.get_digits()).as_str(),
                format::Alignment::RIGHT,
            ),
            Cell::new(currencies.get_aliases(currency).join(", ").as_str()),
        ]));
    }
    Ok(table)
}
