use super::utils::parse_rational;
use super::{GrammarParser, Rule};
use crate::error::ExpressionError;
use crate::models::money::split_amount;
use crate::models::{Currency, Money};
use crate::List;

use num::{BigRational, Signed, Zero};
use pest::iterators::Pair;
use pest::Parser;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Fractional digits shown for plain numbers that are not integers
const NUMBER_DIGITS: usize = 8;

/// Builds the abstract syntax tree, to be able to evaluate expressions
///
/// This all comes from the defined grammar.pest
pub fn build_root_node_from_expression(expression: &str) -> Result<Node, ExpressionError> {
    let parsed = GrammarParser::parse(Rule::expression, expression)
        .map_err(|e| ExpressionError::Parse(e.to_string()))?
        .next()
        .unwrap()
        .into_inner()
        .next()
        .unwrap();

    // Build the abstract syntax tree
    Ok(build_ast_from_expr(parsed))
}

/// Evaluates an expression like `5 USD + $3 * 2`, looking up currencies in ```currencies```
///
/// # Examples
/// ```rust
/// # use money::models::Currency;
/// # use money::List;
/// use money::parser::value_expr::eval_expression;
///
/// let mut currencies = List::<Currency>::new();
/// currencies.insert(Currency::new("US Dollar", "USD"));
/// let value = eval_expression("(5 USD + USD 2.5) * 2", &currencies).unwrap();
/// assert_eq!(format!("{}", value), "USD 15.00");
/// assert!(eval_expression("5 EUR", &currencies).is_err());
/// ```
pub fn eval_expression(
    expression: &str,
    currencies: &List<Currency>,
) -> Result<Value, ExpressionError> {
    let root = build_root_node_from_expression(expression)?;
    eval(&root, currencies)
}

/// Evaluates an expression that has to result in money
pub fn eval_money_expression(
    expression: &str,
    currencies: &List<Currency>,
) -> Result<Money, ExpressionError> {
    match eval_expression(expression, currencies)? {
        Value::Money(m) => Ok(m),
        x => Err(ExpressionError::TypeMismatch(format!(
            "Should be money. Found {}",
            x
        ))),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Number(BigRational),
    Money {
        currency: String,
        amount: BigRational,
    },
    UnaryExpr {
        op: Unary,
        child: Box<Node>,
    },
    BinaryExpr {
        op: Binary,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(BigRational),
    Money(Money),
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Money(m) => write!(f, "{}", m),
            Value::Number(n) if n.is_integer() => write!(f, "{}", n.numer()),
            Value::Number(n) => {
                let (negative, digits) = split_amount(n, NUMBER_DIGITS);
                let digits = digits.trim_end_matches('0').trim_end_matches('.');
                match negative {
                    true => write!(f, "-{}", digits),
                    false => write!(f, "{}", digits),
                }
            }
        }
    }
}

pub fn eval(node: &Node, currencies: &List<Currency>) -> Result<Value, ExpressionError> {
    let res = match node {
        Node::Number(n) => Value::Number(n.clone()),
        Node::Money { currency, amount } => {
            let cur = match currencies.get(currency) {
                Ok(c) => c.clone(),
                Err(_) => return Err(ExpressionError::UnknownCurrency(currency.clone())),
            };
            Value::Money(Money::from((cur, amount.clone())))
        }
        Node::UnaryExpr { op, child } => {
            let res = eval(child, currencies)?;
            match op {
                Unary::Neg => match res {
                    Value::Number(n) => Value::Number(-n),
                    Value::Money(money) => Value::Money(-money),
                },
                Unary::Abs => match res {
                    Value::Number(n) => Value::Number(n.abs()),
                    Value::Money(money) => Value::Money(money.abs()),
                },
            }
        }
        Node::BinaryExpr { op, lhs, rhs } => {
            let left = eval(lhs, currencies)?;
            let right = eval(rhs, currencies)?;
            eval_binary(op, left, right)?
        }
    };
    Ok(res)
}

fn eval_binary(op: &Binary, left: Value, right: Value) -> Result<Value, ExpressionError> {
    let res = match (op, left, right) {
        (Binary::Add, Value::Number(lhs), Value::Number(rhs)) => Value::Number(lhs + rhs),
        (Binary::Subtract, Value::Number(lhs), Value::Number(rhs)) => Value::Number(lhs - rhs),
        (Binary::Mult, Value::Number(lhs), Value::Number(rhs)) => Value::Number(lhs * rhs),
        (Binary::Div, Value::Number(lhs), Value::Number(rhs)) => {
            if rhs.is_zero() {
                return Err(ExpressionError::DivisionByZero);
            }
            Value::Number(lhs / rhs)
        }
        // Between amounts of money the operators only check the currency code
        (Binary::Add, Value::Money(lhs), Value::Money(rhs)) => Value::Money((lhs + rhs)?),
        (Binary::Subtract, Value::Money(lhs), Value::Money(rhs)) => Value::Money((lhs - rhs)?),
        (Binary::Mult, Value::Money(lhs), Value::Money(rhs)) => Value::Money((lhs * rhs)?),
        (Binary::Div, Value::Money(lhs), Value::Money(rhs)) => match lhs.checked_div_money(&rhs)? {
            Some(m) => Value::Money(m),
            None => return Err(ExpressionError::DivisionByZero),
        },
        // Scaling
        (Binary::Mult, Value::Money(money), Value::Number(n))
        | (Binary::Mult, Value::Number(n), Value::Money(money)) => Value::Money(money.mul(n)),
        (Binary::Div, Value::Money(money), Value::Number(n)) => match money.checked_div(n) {
            Some(m) => Value::Money(m),
            None => return Err(ExpressionError::DivisionByZero),
        },
        (op, lhs, rhs) => {
            return Err(ExpressionError::TypeMismatch(format!(
                "Can't {} {} and {}",
                op, lhs, rhs
            )))
        }
    };
    Ok(res)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Unary {
    Neg,
    Abs,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Binary {
    Add,
    Subtract,
    Mult,
    Div,
}

impl Display for Binary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Binary::Add => "add",
            Binary::Subtract => "subtract",
            Binary::Mult => "multiply",
            Binary::Div => "divide",
        };
        write!(f, "{}", verb)
    }
}

fn build_ast_from_expr(pair: Pair<Rule>) -> Node {
    let rule = pair.as_rule();
    match rule {
        Rule::expr | Rule::term => {
            let mut pair = pair.into_inner();
            let mut lhs = build_ast_from_expr(pair.next().unwrap());
            // Left associative: 1 - 2 - 3 is (1 - 2) - 3
            while let Some(x) = pair.next() {
                let op = match x.as_str() {
                    "+" => Binary::Add,
                    "-" => Binary::Subtract,
                    "*" => Binary::Mult,
                    "/" => Binary::Div,
                    x => unreachable!("{}", x),
                };
                let rhs = build_ast_from_expr(pair.next().unwrap());
                lhs = parse_binary_expr(op, lhs, rhs);
            }
            lhs
        }
        Rule::factor => {
            let mut inner = pair.into_inner();
            let first = inner.next().unwrap();
            match first.as_rule() {
                Rule::neg | Rule::function => {
                    let op = match first.as_str() {
                        "-" => Unary::Neg,
                        "abs" => Unary::Abs,
                        unknown => unreachable!("Unknown function: {:?}", unknown),
                    };
                    parse_unary_expr(op, build_ast_from_expr(inner.next().unwrap()))
                }
                _ => build_ast_from_expr(first),
            }
        }
        Rule::money => {
            let mut money = pair.into_inner();
            let first = money.next().unwrap();
            let second = money.next().unwrap();
            let (number, currency) = match first.as_rule() {
                Rule::number => (first, second),
                _ => (second, first),
            };
            Node::Money {
                currency: currency.as_str().to_string(),
                amount: parse_number(number),
            }
        }
        Rule::number => Node::Number(parse_number(pair)),
        unknown => unreachable!("Unknown expr: {:?}", unknown),
    }
}

fn parse_number(number: Pair<Rule>) -> BigRational {
    // The grammar only lets digits and a dot through
    parse_rational(number.as_str()).unwrap()
}

fn parse_binary_expr(operation: Binary, lhs: Node, rhs: Node) -> Node {
    Node::BinaryExpr {
        op: operation,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn parse_unary_expr(operation: Unary, child: Node) -> Node {
    Node::UnaryExpr {
        op: operation,
        child: Box::new(child),
    }
}
