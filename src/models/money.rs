use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops;
use std::sync::Arc;

use num::rational::BigRational;
use num::{BigInt, Signed, Zero};

use crate::error::DifferentCurrencyError;
use crate::models::Currency;
use crate::parser::utils::parse_rational;

/// Money representation: an amount and a currency
///
/// It is important that calculations are not done with floats but with Rational numbers so that
/// everything adds up correctly
///
/// Money is immutable: every operation returns a new value and leaves its operands alone.
/// The currency is shared, many amounts can point to the same one.
///
/// There are two flavours of arithmetic:
/// - the methods [`Money::add`] and [`Money::sub`] require both currencies to be exactly equal
/// - the operators `+`, `-`, `*` and `/` only require the currency codes to be equal, and
///   `*` and `/` combine two amounts of money (see [`Money::mul_money`]) while [`Money::mul`]
///   and [`Money::div`] scale an amount by a number
///
/// # Examples
/// ```rust
/// # use money::models::{Money, Currency};
/// # use std::sync::Arc;
///
/// let usd = Arc::new(Currency::new("US Dollar", "USD").with_symbol("$"));
/// let eur = Arc::new(Currency::new("Euro", "EUR"));
///
/// let m1 = Money::from_integer(100, usd.clone());
/// let m2 = Money::from_integer(200, usd.clone());
/// let total = m1.add(&m2).unwrap();
/// assert_eq!(total, Money::from_integer(300, usd.clone()));
/// assert_eq!(format!("{}", total), "$300.00");
///
/// // Mixing currencies fails
/// let e1 = Money::from_integer(50, eur.clone());
/// assert!(m1.add(&e1).is_err());
/// assert!((&m1 + &e1).is_err());
///
/// // Scaling
/// assert_eq!(m1.mul(3), Money::from_integer(300, usd.clone()));
/// assert_eq!(format!("{}", e1.div(4)), "EUR 12.50");
/// assert_eq!(format!("{:?}", m1.mul(0.5)), "<Money $50.00>");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: BigRational,
    currency: Arc<Currency>,
}

impl Money {
    pub fn new(amount: BigRational, currency: Arc<Currency>) -> Self {
        Money { amount, currency }
    }
    pub fn from_integer<T: Into<BigInt>>(amount: T, currency: Arc<Currency>) -> Self {
        Money::new(BigRational::from_integer(amount.into()), currency)
    }
    /// Builds money from a float, using the same digits `f64` displays
    ///
    /// Returns `None` for infinite or NaN amounts.
    pub fn from_float(amount: f64, currency: Arc<Currency>) -> Option<Self> {
        amount
            .into_rational()
            .map(|amount| Money::new(amount, currency))
    }
    pub fn zero(currency: Arc<Currency>) -> Self {
        Money::new(BigRational::zero(), currency)
    }

    pub fn get_amount(&self) -> &BigRational {
        &self.amount
    }
    pub fn get_currency(&self) -> &Arc<Currency> {
        &self.currency
    }
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }
    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }
    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency.clone())
    }
    /// Whether both amounts use a currency with the same code, regardless of the other fields
    pub fn has_currency_code(&self, other: &Money) -> bool {
        self.currency.get_code() == other.currency.get_code()
    }

    fn check_currency(&self, other: &Money) -> Result<(), DifferentCurrencyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(DifferentCurrencyError::new(&self.currency, &other.currency))
        }
    }
    fn check_code(&self, other: &Money) -> Result<(), DifferentCurrencyError> {
        if self.has_currency_code(other) {
            Ok(())
        } else {
            Err(DifferentCurrencyError::new(&self.currency, &other.currency))
        }
    }

    /// Adds two amounts of the very same currency
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Money) -> Result<Money, DifferentCurrencyError> {
        self.check_currency(other)?;
        Ok(Money::new(&self.amount + &other.amount, self.currency.clone()))
    }
    /// Subtracts two amounts of the very same currency
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &Money) -> Result<Money, DifferentCurrencyError> {
        self.check_currency(other)?;
        Ok(Money::new(&self.amount - &other.amount, self.currency.clone()))
    }
    /// Multiplies the amount by a number
    ///
    /// # Panics
    /// When `factor` is a float that is NaN or infinite.
    #[allow(clippy::should_implement_trait)]
    pub fn mul<T: Scalar>(&self, factor: T) -> Money {
        Money::new(&self.amount * scalar(factor), self.currency.clone())
    }
    /// Divides the amount by a number
    ///
    /// # Panics
    /// When `divisor` is zero, NaN or infinite. Use [`Money::checked_div`] to avoid it.
    #[allow(clippy::should_implement_trait)]
    pub fn div<T: Scalar>(&self, divisor: T) -> Money {
        Money::new(&self.amount / scalar(divisor), self.currency.clone())
    }
    pub fn checked_div<T: Scalar>(&self, divisor: T) -> Option<Money> {
        match divisor.into_rational() {
            Some(divisor) if !divisor.is_zero() => {
                Some(Money::new(&self.amount / divisor, self.currency.clone()))
            }
            _ => None,
        }
    }
    /// Multiplies two amounts of money with the same currency code, which is what `*` does
    pub fn mul_money(&self, other: &Money) -> Result<Money, DifferentCurrencyError> {
        self.check_code(other)?;
        Ok(Money::new(&self.amount * &other.amount, self.currency.clone()))
    }
    /// Divides two amounts of money with the same currency code, which is what `/` does
    ///
    /// # Panics
    /// When `other` is zero. Use [`Money::checked_div_money`] to avoid it.
    pub fn div_money(&self, other: &Money) -> Result<Money, DifferentCurrencyError> {
        self.check_code(other)?;
        Ok(Money::new(&self.amount / &other.amount, self.currency.clone()))
    }
    pub fn checked_div_money(&self, other: &Money) -> Result<Option<Money>, DifferentCurrencyError> {
        self.check_code(other)?;
        if other.is_zero() {
            Ok(None)
        } else {
            self.div_money(other).map(Some)
        }
    }
}

impl From<(Arc<Currency>, BigRational)> for Money {
    fn from(cur_amount: (Arc<Currency>, BigRational)) -> Self {
        let (currency, amount) = cur_amount;
        Money { amount, currency }
    }
}

/// A plain number that an amount of money can be scaled by
///
/// Floats go through their shortest decimal representation, so `0.1` is exactly one tenth.
pub trait Scalar {
    /// The exact value, `None` for floats that are NaN or infinite
    fn into_rational(self) -> Option<BigRational>;
}

macro_rules! integer_scalar {
    ($($t:ty),*) => {
        $(impl Scalar for $t {
            fn into_rational(self) -> Option<BigRational> {
                Some(BigRational::from_integer(BigInt::from(self)))
            }
        })*
    };
}

integer_scalar!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Scalar for f64 {
    fn into_rational(self) -> Option<BigRational> {
        if !self.is_finite() {
            return None;
        }
        parse_rational(format!("{}", self).as_str())
    }
}
impl Scalar for f32 {
    fn into_rational(self) -> Option<BigRational> {
        if !self.is_finite() {
            return None;
        }
        parse_rational(format!("{}", self).as_str())
    }
}
impl Scalar for BigInt {
    fn into_rational(self) -> Option<BigRational> {
        Some(BigRational::from_integer(self))
    }
}
impl Scalar for BigRational {
    fn into_rational(self) -> Option<BigRational> {
        Some(self)
    }
}

fn scalar<T: Scalar>(value: T) -> BigRational {
    match value.into_rational() {
        Some(value) => value,
        None => panic!("Money can only be scaled by finite numbers"),
    }
}

impl<'a, 'b> ops::Add<&'b Money> for &'a Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn add(self, rhs: &'b Money) -> Self::Output {
        self.check_code(rhs)?;
        Ok(Money::new(&self.amount + &rhs.amount, self.currency.clone()))
    }
}
impl ops::Add for Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

impl<'a, 'b> ops::Sub<&'b Money> for &'a Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn sub(self, rhs: &'b Money) -> Self::Output {
        self.check_code(rhs)?;
        Ok(Money::new(&self.amount - &rhs.amount, self.currency.clone()))
    }
}
impl ops::Sub for Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl<'a, 'b> ops::Mul<&'b Money> for &'a Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn mul(self, rhs: &'b Money) -> Self::Output {
        self.mul_money(rhs)
    }
}
impl ops::Mul for Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_money(&rhs)
    }
}

impl<'a, 'b> ops::Div<&'b Money> for &'a Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn div(self, rhs: &'b Money) -> Self::Output {
        self.div_money(rhs)
    }
}
impl ops::Div for Money {
    type Output = Result<Money, DifferentCurrencyError>;

    fn div(self, rhs: Self) -> Self::Output {
        self.div_money(&rhs)
    }
}

impl<'a> ops::Neg for &'a Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money::new(-&self.amount, self.currency.clone())
    }
}
impl ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money::new(-self.amount, self.currency)
    }
}

/// Splits an amount into its sign and its digits, truncated to `digits` decimals
///
/// An amount that truncates to zero is never negative.
pub(crate) fn split_amount(amount: &BigRational, digits: usize) -> (bool, String) {
    let scale = num::pow(BigInt::from(10), digits);
    let scaled = (amount.abs() * BigRational::from_integer(scale.clone())).to_integer();
    let negative = amount.is_negative() && !scaled.is_zero();
    if digits == 0 {
        return (negative, scaled.to_string());
    }
    let integer_part = &scaled / &scale;
    let decimal_part = &scaled % &scale;
    (
        negative,
        format!("{}.{:0width$}", integer_part, decimal_part, width = digits),
    )
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<Money {}>", self)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (negative, amount_str) = split_amount(&self.amount, self.currency.get_digits());
        let sign = if negative { "-" } else { "" };
        match self.currency.get_symbol() {
            Some(symbol) => write!(f, "{}{}{}", symbol, sign, amount_str),
            None => write!(f, "{} {}{}", self.currency.get_code(), sign, amount_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollar() -> Arc<Currency> {
        Arc::new(Currency::new("US Dollar", "USD").with_symbol("$"))
    }
    fn plain_dollar() -> Arc<Currency> {
        Arc::new(Currency::new("US Dollar", "USD"))
    }
    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    #[test]
    fn display_with_symbol() {
        let usd = dollar();
        assert_eq!(format!("{}", Money::from_integer(5, usd.clone())), "$5.00");
        assert_eq!(format!("{}", Money::new(ratio(21, 4), usd.clone())), "$5.25");
        assert_eq!(format!("{}", Money::new(ratio(-21, 4), usd.clone())), "$-5.25");
        assert_eq!(format!("{}", Money::zero(usd)), "$0.00");
    }

    #[test]
    fn display_without_symbol() {
        let usd = plain_dollar();
        assert_eq!(format!("{}", Money::from_integer(5, usd.clone())), "USD 5.00");
        assert_eq!(
            format!("{}", Money::from_integer(-1234567, usd.clone())),
            "USD -1234567.00"
        );
        // Truncated, not rounded
        assert_eq!(format!("{}", Money::new(ratio(2, 3), usd.clone())), "USD 0.66");
        assert_eq!(format!("{}", Money::new(ratio(-1, 1000), usd)), "USD 0.00");
    }

    #[test]
    fn display_digits() {
        let yen = Arc::new(Currency::new("Japanese Yen", "JPY").with_digits(0));
        assert_eq!(format!("{}", Money::new(ratio(1999, 2), yen)), "JPY 999");
        let dinar = Arc::new(Currency::new("Kuwaiti Dinar", "KWD").with_digits(3));
        assert_eq!(format!("{}", Money::new(ratio(1, 8), dinar)), "KWD 0.125");
    }

    #[test]
    fn display_floats() {
        let usd = dollar();
        let money = Money::from_float(0.29, usd.clone()).unwrap();
        assert_eq!(money, Money::new(ratio(29, 100), usd.clone()));
        assert_eq!(format!("{}", money), "$0.29");
        assert_eq!(format!("{}", Money::from_float(5.0, usd.clone()).unwrap()), "$5.00");
        assert_eq!(format!("{}", Money::from_float(-2.5, usd.clone()).unwrap()), "$-2.50");
        assert!(Money::from_float(f64::NAN, usd.clone()).is_none());
        assert!(Money::from_float(f64::INFINITY, usd).is_none());
    }

    #[test]
    fn empty_symbol_uses_code() {
        let odd = Arc::new(Currency::new("US Dollar", "USD").with_symbol(""));
        assert_eq!(format!("{}", Money::from_integer(5, odd)), "USD 5.00");
    }

    #[test]
    fn methods_need_equal_currencies() {
        let m1 = Money::from_integer(5, dollar());
        let m2 = Money::from_integer(5, plain_dollar());
        assert_eq!(
            m1.add(&m2),
            Err(DifferentCurrencyError::new("USD ($)", "USD"))
        );
        assert!(m1.sub(&m2).is_err());
        // The operators only look at the code
        assert_eq!((&m1 + &m2).unwrap(), Money::from_integer(10, dollar()));
        assert_eq!((&m1 - &m2).unwrap(), Money::zero(dollar()));
    }

    #[test]
    fn operators_keep_left_currency() {
        let m1 = Money::from_integer(6, plain_dollar());
        let m2 = Money::from_integer(3, dollar());
        let product = (m1.clone() * m2.clone()).unwrap();
        assert_eq!(product, Money::from_integer(18, plain_dollar()));
        let quotient = (m1 / m2).unwrap();
        assert_eq!(quotient, Money::from_integer(2, plain_dollar()));
    }

    #[test]
    fn scale_and_combine_differ() {
        let usd = dollar();
        let ten = Money::from_integer(10, usd.clone());
        let two = Money::from_integer(2, usd.clone());
        assert_eq!(ten.mul(2), ten.mul_money(&two).unwrap());
        assert_eq!(ten.div(2), Money::from_integer(5, usd.clone()));
        assert_eq!(ten.div_money(&two).unwrap(), Money::from_integer(5, usd.clone()));
        assert_eq!(ten.mul(ratio(1, 4)), Money::new(ratio(5, 2), usd));
    }

    #[test]
    fn plain_scalars() {
        let usd = dollar();
        let ten = Money::from_integer(10, usd.clone());
        assert_eq!(ten.mul(3), Money::from_integer(30, usd.clone()));
        assert_eq!(ten.div(2), Money::from_integer(5, usd.clone()));
        assert_eq!(ten.mul(1.5), Money::from_integer(15, usd.clone()));
        assert_eq!(ten.mul(0.1), Money::from_integer(1, usd.clone()));
        assert_eq!(ten.div(2.5f32), Money::from_integer(4, usd.clone()));
        assert_eq!(ten.mul(-2i64), Money::from_integer(-20, usd.clone()));
        assert_eq!(ten.mul(BigInt::from(3)), ten.mul(3u64));
        assert_eq!(ten.mul(ratio(3, 10)), Money::new(ratio(3, 1), usd));
    }

    #[test]
    #[should_panic(expected = "finite")]
    fn scaling_by_nan_panics() {
        let _ = Money::from_integer(10, dollar()).mul(f64::NAN);
    }

    #[test]
    fn debug_wraps_display() {
        let usd = dollar();
        assert_eq!(format!("{:?}", Money::from_integer(5, usd.clone())), "<Money $5.00>");
        assert_eq!(
            format!("{:?}", Money::from_integer(-5, plain_dollar())),
            "<Money USD -5.00>"
        );
        assert_eq!(format!("{:?}", Money::from_integer(-5, usd)), "<Money $-5.00>");
    }

    #[test]
    fn checked_division() {
        let usd = dollar();
        let ten = Money::from_integer(10, usd.clone());
        assert_eq!(ten.checked_div(0), None);
        assert_eq!(ten.checked_div(f64::NAN), None);
        assert_eq!(
            ten.checked_div(4u8),
            Some(Money::new(ratio(5, 2), usd.clone()))
        );
        assert_eq!(ten.checked_div_money(&Money::zero(usd.clone())), Ok(None));
        let eur = Arc::new(Currency::new("Euro", "EUR"));
        assert!(ten.checked_div_money(&Money::zero(eur)).is_err());
    }

    #[test]
    #[should_panic]
    fn division_by_zero_panics() {
        let _ = Money::from_integer(10, dollar()).div(0);
    }

    #[test]
    fn negation_and_signs() {
        let usd = dollar();
        let five = Money::from_integer(5, usd.clone());
        let minus_five = -&five;
        assert!(minus_five.is_negative());
        assert!(five.is_positive());
        assert_eq!(minus_five.abs(), five);
        assert_eq!(-minus_five, five);
        assert!(Money::zero(usd).is_zero());
    }

    #[test]
    fn shared_currency() {
        let usd = dollar();
        let m1 = Money::from_integer(1, usd.clone());
        let m2 = m1.mul(2);
        assert!(Arc::ptr_eq(m1.get_currency(), m2.get_currency()));
        assert_eq!(Arc::strong_count(&usd), 3);
    }

    #[test]
    fn send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Money>();
        assert_send_sync::<Currency>();
    }
}
