use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Whole-rupee currency amount. The funnel carries no sub-unit precision.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn rupees(amount: i64) -> Self {
        Money(amount)
    }

    pub fn amount(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Render with Indian digit grouping (1,72,500).
    pub fn grouped(&self) -> String {
        let negative = self.0 < 0;
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::new();
        let len = digits.len();
        for (i, ch) in digits.chars().enumerate() {
            let remaining = len - i;
            if i > 0 && remaining >= 3 && (remaining - 3) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if negative {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.grouped())
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_indian_style() {
        assert_eq!(Money(0).grouped(), "0");
        assert_eq!(Money(999).grouped(), "999");
        assert_eq!(Money(9942).grouped(), "9,942");
        assert_eq!(Money(172500).grouped(), "1,72,500");
        assert_eq!(Money(185789).grouped(), "1,85,789");
        assert_eq!(Money(10000000).grouped(), "1,00,00,000");
        assert_eq!(Money(-174498).grouped(), "-1,74,498");
    }

    #[test]
    fn test_sum_and_display() {
        let total: Money = [Money(999), Money(999)].into_iter().sum();
        assert_eq!(total, Money(1998));
        assert_eq!(format!("{}", Money(172500)), "₹1,72,500");
    }
}
