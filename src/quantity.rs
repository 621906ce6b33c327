use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Day-ahead price in Swedish krona per kilowatt-hour.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::Sum,
)]
pub struct KronaPerKilowattHour(pub f64);

impl Display for KronaPerKilowattHour {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.4} SEK/kWh", self.0)
    }
}

impl PartialEq for KronaPerKilowattHour {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.0).eq(&OrderedFloat(other.0))
    }
}

impl Eq for KronaPerKilowattHour {}

impl PartialOrd for KronaPerKilowattHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KronaPerKilowattHour {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.0).cmp(&OrderedFloat(other.0))
    }
}

/// Day-ahead price in euro per kilowatt-hour, as published alongside the SEK price.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct EuroPerKilowattHour(pub f64);

impl Display for EuroPerKilowattHour {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.4} EUR/kWh", self.0)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct KilowattHours(pub f64);

impl Display for KilowattHours {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} kWh", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum() {
        let prices = [KronaPerKilowattHour(0.25), KronaPerKilowattHour(0.5)];
        assert_eq!(prices.into_iter().sum::<KronaPerKilowattHour>(), KronaPerKilowattHour(0.75));
    }

    #[test]
    fn test_ordering_is_total() {
        assert!(KronaPerKilowattHour(-0.1) < KronaPerKilowattHour(0.0));
        assert!(KronaPerKilowattHour(f64::NAN) > KronaPerKilowattHour(1.0));
    }
}
