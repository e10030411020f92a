use money::default_currencies;
use money::parser::value_expr::{eval_expression, eval_money_expression};
use money::ExpressionError;

fn eval(expression: &str) -> String {
    let currencies = default_currencies().unwrap();
    format!("{}", eval_expression(expression, &currencies).unwrap())
}

#[test]
fn symbols_codes_and_aliases() {
    assert_eq!(eval("€10 + 2.5 EUR"), "€12.50");
    assert_eq!(eval("10 euro - eur 2.5"), "€7.50");
    assert_eq!(eval("(¥100 + 50 yen) * 3"), "¥450");
    assert_eq!(eval("100 CHF / 3"), "CHF 33.33");
    assert_eq!(eval("-$5.25"), "$-5.25");
}

#[test]
fn plain_numbers() {
    assert_eq!(eval("1 + 2 * 3"), "7");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("10 - 4 - 3"), "3");
    assert_eq!(eval("1 / 4"), "0.25");
}

#[test]
fn money_over_money() {
    // combining two amounts keeps the currency of the left one
    assert_eq!(eval("$10 / $4"), "$2.50");
    assert_eq!(eval("$10 * $4"), "$40.00");
}

#[test]
fn errors() {
    let currencies = default_currencies().unwrap();
    assert!(matches!(
        eval_expression("$1 + €1", &currencies),
        Err(ExpressionError::DifferentCurrency(_))
    ));
    assert!(matches!(
        eval_expression("$1 / 0", &currencies),
        Err(ExpressionError::DivisionByZero)
    ));
    assert!(matches!(
        eval_expression("5 ZZZ", &currencies),
        Err(ExpressionError::UnknownCurrency(_))
    ));
    assert!(matches!(
        eval_expression("$1 + 1", &currencies),
        Err(ExpressionError::TypeMismatch(_))
    ));
    assert!(matches!(
        eval_expression("$1 +", &currencies),
        Err(ExpressionError::Parse(_))
    ));
    assert!(eval_money_expression("2 * 3", &currencies).is_err());
    assert!(eval_money_expression("2 * £3", &currencies).is_ok());
}
