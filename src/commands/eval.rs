use std::convert::TryFrom;

use crate::models::Currency;
use crate::parser::value_expr::eval_expression;
use crate::{CommonOpts, Error, List};

/// Evaluates the expression and prints the result
pub fn execute(options: &CommonOpts, expression: &str) -> Result<(), Error> {
    let currencies = List::<Currency>::try_from(options)?;
    let value = eval_expression(expression, &currencies)?;
    println!("{}", value);
    Ok(())
}
