//! Pricing table and purchase arithmetic.
//!
//! All arithmetic is checked; an overflow is reported as
//! [`Error::ArithmeticOverflow`] rather than wrapping. Division truncates, so
//! no fractional token amount is ever issued.

use crate::types::{PriceSchedule, Stage};
use crate::Error;

impl PriceSchedule {
    /// Rate for an open stage, `None` for every other stage.
    pub fn rate_for(&self, stage: Stage) -> Option<i128> {
        match stage {
            Stage::PrivateSaleOpen => Some(self.private_sale),
            Stage::PreSaleOpen => Some(self.pre_sale),
            Stage::RoundOneOpen => Some(self.round_one),
            Stage::RoundTwoOpen => Some(self.round_two),
            Stage::RoundThreeOpen => Some(self.round_three),
            Stage::RoundFourOpen => Some(self.round_four),
            _ => None,
        }
    }

    /// Every rate must be strictly positive.
    pub fn is_valid(&self) -> bool {
        [
            self.private_sale,
            self.pre_sale,
            self.round_one,
            self.round_two,
            self.round_three,
            self.round_four,
        ]
        .iter()
        .all(|rate| *rate > 0)
    }
}

/// `amount_sent * rate / currency_unit`, truncated.
pub fn token_amount(amount_sent: i128, rate: i128, currency_unit: i128) -> Result<i128, Error> {
    amount_sent
        .checked_mul(rate)
        .and_then(|scaled| scaled.checked_div(currency_unit))
        .ok_or(Error::ArithmeticOverflow)
}

/// Value of `amount_sent` in reference-price cents, truncated.
///
/// This is what the private-stage counter accumulates.
pub fn reference_value(
    amount_sent: i128,
    reference_price_cents: u64,
    currency_unit: i128,
) -> Result<i128, Error> {
    amount_sent
        .checked_mul(i128::from(reference_price_cents))
        .and_then(|scaled| scaled.checked_div(currency_unit))
        .ok_or(Error::ArithmeticOverflow)
}
