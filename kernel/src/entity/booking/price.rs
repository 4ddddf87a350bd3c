use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::References;

use crate::entity::common::Price;
use crate::entity::{Age, DiscountPercent, DiscountRules, DurationHours, Headcount};

/// Money side of a booking. `total_price` is always `base_price - discount_amount`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, References)]
pub struct PriceBreakdown {
    base_price: Price,
    discount_percent: DiscountPercent,
    discount_amount: Price,
    total_price: Price,
}

impl PriceBreakdown {
    pub fn calculate(
        hourly_rate: &Price,
        duration: &DurationHours,
        headcount: &Headcount,
        age: &Age,
        rules: &DiscountRules,
    ) -> Self {
        let base = Price::new(*hourly_rate.as_ref() * Decimal::from(*duration.as_ref())).rounded();
        Self::from_base(base, rules.applicable_percent(age, headcount))
    }

    /// Derives discount and total from an already fixed base price.
    pub fn from_base(base_price: Price, discount_percent: DiscountPercent) -> Self {
        let discount_amount = Price::new(
            *base_price.as_ref() * Decimal::from(*discount_percent.as_ref()) / Decimal::ONE_HUNDRED,
        )
        .rounded();
        Self {
            base_price,
            discount_percent,
            discount_amount,
            total_price: base_price - discount_amount,
        }
    }

    pub fn has_discount(&self) -> bool {
        !self.discount_percent.is_zero()
    }
}

#[cfg(test)]
mod test {
    use super::PriceBreakdown;
    use crate::entity::{
        Age, DiscountPercent, DiscountRules, DurationHours, Headcount, Price,
    };
    use rust_decimal_macros::dec;

    fn rules(children: i32, group: i32) -> DiscountRules {
        DiscountRules::new(
            DiscountPercent::parse("children_discount", children).unwrap(),
            DiscountPercent::parse("group_discount", group).unwrap(),
        )
    }

    #[test]
    fn adult_pair_pays_base_price() {
        let price = PriceBreakdown::calculate(
            &Price::new(dec!(100000)),
            &DurationHours::new(2),
            &Headcount::new(2),
            &Age::new(25),
            &rules(10, 20),
        );
        assert_eq!(price.base_price(), &Price::new(dec!(200000)));
        assert!(price.discount_percent().is_zero());
        assert_eq!(price.discount_amount(), &Price::zero());
        assert_eq!(price.total_price(), &Price::new(dec!(200000)));
        assert!(!price.has_discount());
    }

    #[test]
    fn group_of_six_gets_group_discount() {
        let price = PriceBreakdown::calculate(
            &Price::new(dec!(100000)),
            &DurationHours::new(2),
            &Headcount::new(6),
            &Age::new(25),
            &rules(0, 15),
        );
        assert_eq!(price.base_price(), &Price::new(dec!(200000)));
        assert_eq!(price.discount_percent().as_ref(), &15);
        assert_eq!(price.discount_amount(), &Price::new(dec!(30000)));
        assert_eq!(price.total_price(), &Price::new(dec!(170000)));
    }

    #[test]
    fn child_gets_child_discount() {
        let price = PriceBreakdown::calculate(
            &Price::new(dec!(50000)),
            &DurationHours::new(3),
            &Headcount::new(1),
            &Age::new(10),
            &rules(50, 0),
        );
        assert_eq!(price.base_price(), &Price::new(dec!(150000)));
        assert_eq!(price.discount_amount(), &Price::new(dec!(75000)));
        assert_eq!(price.total_price(), &Price::new(dec!(75000)));
    }

    #[test]
    fn larger_discount_wins_when_both_apply() {
        let price = PriceBreakdown::calculate(
            &Price::new(dec!(80000)),
            &DurationHours::new(1),
            &Headcount::new(7),
            &Age::new(12),
            &rules(20, 30),
        );
        assert_eq!(price.discount_percent().as_ref(), &30);
        assert_eq!(price.discount_amount(), &Price::new(dec!(24000)));
    }

    #[test]
    fn total_is_base_minus_discount() {
        for (rate, hours, percent) in [
            (dec!(33333.33), 3, 7),
            (dec!(125000.50), 5, 33),
            (dec!(1), 12, 99),
        ] {
            let base = Price::new(rate * rust_decimal::Decimal::from(hours)).rounded();
            let price = PriceBreakdown::from_base(
                base,
                DiscountPercent::parse("percent", percent).unwrap(),
            );
            assert_eq!(*price.total_price(), *price.base_price() - *price.discount_amount());
        }
    }

    #[test]
    fn discount_amount_rounds_half_away_from_zero() {
        let price = PriceBreakdown::from_base(
            Price::new(dec!(0.50)),
            DiscountPercent::parse("percent", 1).unwrap(),
        );
        assert_eq!(price.discount_amount(), &Price::new(dec!(0.01)));
        assert_eq!(price.total_price(), &Price::new(dec!(0.49)));
    }
}
