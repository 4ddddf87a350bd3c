use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::{FieldViolation, KernelError};

pub const CURRENCY_SUFFIX: &str = "so'm";

/// Hourly rates accept at most ten digits, two of them after the point.
const MAX_DIGITS: u32 = 10;
const MAX_DECIMAL_PLACES: u32 = 2;

/// Currency amount with two decimal places of precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Fromln, AsRefln, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self(amount.into())
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn parse(field: &'static str, amount: Decimal) -> error_stack::Result<Self, KernelError> {
        if amount.is_sign_negative() {
            return Err(
                FieldViolation::new(field, "Ensure this value is greater than or equal to 0.")
                    .into_report(),
            );
        }
        let normalized = amount.normalize();
        if normalized.scale() > MAX_DECIMAL_PLACES {
            return Err(FieldViolation::new(
                field,
                format!("Ensure that there are no more than {MAX_DECIMAL_PLACES} decimal places."),
            )
            .into_report());
        }
        let limit = Decimal::from_i128_with_scale(
            10_i128.pow(MAX_DIGITS) - 1,
            MAX_DECIMAL_PLACES,
        );
        if normalized > limit {
            return Err(FieldViolation::new(
                field,
                format!("Ensure that there are no more than {MAX_DIGITS} digits in total."),
            )
            .into_report());
        }
        Ok(Self(amount))
    }

    /// Rounds to the currency precision, midpoint away from zero.
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Whole units with thousands separators, e.g. `170,000 so'm`.
    pub fn display(&self) -> String {
        let whole = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let digits = whole.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        if whole.is_sign_negative() && !whole.is_zero() {
            grouped.insert(0, '-');
        }
        format!("{grouped} {CURRENCY_SUFFIX}")
    }
}

impl std::ops::Sub for Price {
    type Output = Price;
    fn sub(self, rhs: Self) -> Self::Output {
        Price(self.0 - rhs.0)
    }
}

impl std::ops::Add for Price {
    type Output = Price;
    fn add(self, rhs: Self) -> Self::Output {
        Price(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Price::zero(), |acc, price| acc + price)
    }
}

#[cfg(test)]
mod test {
    use super::Price;
    use rust_decimal_macros::dec;

    #[test]
    fn display_groups_thousands() {
        assert_eq!(Price::new(dec!(170000)).display(), "170,000 so'm");
        assert_eq!(Price::new(dec!(1234567.50)).display(), "1,234,568 so'm");
        assert_eq!(Price::new(dec!(999)).display(), "999 so'm");
        assert_eq!(Price::zero().display(), "0 so'm");
    }

    #[test]
    fn rounding_is_midpoint_away_from_zero() {
        assert_eq!(Price::new(dec!(0.005)).rounded(), Price::new(dec!(0.01)));
        assert_eq!(Price::new(dec!(12.344)).rounded(), Price::new(dec!(12.34)));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(Price::parse("price_per_hour", dec!(-1)).is_err());
        assert!(Price::parse("price_per_hour", dec!(0)).is_ok());
    }

    #[test]
    fn amounts_must_fit_the_stored_precision() {
        assert!(Price::parse("price_per_hour", dec!(99999999.99)).is_ok());
        assert!(Price::parse("price_per_hour", dec!(150000.50)).is_ok());
        assert!(Price::parse("price_per_hour", dec!(1.500)).is_ok());

        let too_large = Price::parse("price_per_hour", dec!(100000000)).unwrap_err();
        let violations = crate::FieldViolation::collect(&too_large);
        assert_eq!(violations[0].field(), "price_per_hour");
        assert_eq!(
            violations[0].message(),
            "Ensure that there are no more than 10 digits in total."
        );

        let too_precise = Price::parse("price_per_hour", dec!(1.005)).unwrap_err();
        assert_eq!(
            crate::FieldViolation::collect(&too_precise)[0].message(),
            "Ensure that there are no more than 2 decimal places."
        );
    }
}
