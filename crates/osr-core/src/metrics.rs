use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Judgement tallies from a play, in replay field order.
///
/// In mania, `geki` counts MAX (rainbow 300) hits and `katu` counts 200s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgementCounts {
    pub perfect: u16,
    pub great: u16,
    pub good: u16,
    pub geki: u16,
    pub katu: u16,
    pub miss: u16,
}

impl JudgementCounts {
    /// Total number of judged objects.
    pub fn total(&self) -> u64 {
        [
            self.perfect,
            self.great,
            self.good,
            self.geki,
            self.katu,
            self.miss,
        ]
        .iter()
        .map(|&n| u64::from(n))
        .sum()
    }

    /// Weighted hit value: MAX and 300 are worth 300, 200 is 200, 100 is 100, 50 is 50.
    pub fn hit_value(&self) -> u64 {
        (u64::from(self.perfect) + u64::from(self.geki)) * 300
            + u64::from(self.katu) * 200
            + u64::from(self.great) * 100
            + u64::from(self.good) * 50
    }

    /// Accuracy as a percentage in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when no objects were judged.
    pub fn accuracy(&self) -> Result<f64> {
        let total = self.total();
        if total == 0 {
            return Err(Error::DivisionByZero { metric: "accuracy" });
        }

        Ok(self.hit_value() as f64 / (total * 300) as f64 * 100.0)
    }

    /// MAX to 300 ratio (`geki / perfect`).
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` when there are no 300s.
    pub fn ma_ratio(&self) -> Result<f64> {
        if self.perfect == 0 {
            return Err(Error::DivisionByZero { metric: "ma_ratio" });
        }

        Ok(f64::from(self.geki) / f64::from(self.perfect))
    }

    pub fn is_perfect(&self) -> bool {
        self.great == 0 && self.good == 0 && self.katu == 0 && self.miss == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(
        perfect: u16,
        great: u16,
        good: u16,
        geki: u16,
        katu: u16,
        miss: u16,
    ) -> JudgementCounts {
        JudgementCounts {
            perfect,
            great,
            good,
            geki,
            katu,
            miss,
        }
    }

    #[test]
    fn test_accuracy_example() {
        let acc = counts(100, 10, 5, 0, 0, 1).accuracy().unwrap();
        let expected = (100.0 * 300.0 + 10.0 * 100.0 + 5.0 * 50.0) / (116.0 * 300.0) * 100.0;
        assert!((acc - expected).abs() < 1e-9);
        assert!((acc - 89.80).abs() < 0.01);
    }

    #[test]
    fn test_accuracy_all_max() {
        let acc = counts(0, 0, 0, 500, 0, 0).accuracy().unwrap();
        assert!((acc - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accuracy_all_miss() {
        assert_eq!(counts(0, 0, 0, 0, 0, 20).accuracy().unwrap(), 0.0);
    }

    #[test]
    fn test_accuracy_katu_weight() {
        // one 200 and one miss: 200 / 600
        let acc = counts(0, 0, 0, 0, 1, 1).accuracy().unwrap();
        assert!((acc - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_accuracy_zero_total() {
        assert!(matches!(
            JudgementCounts::default().accuracy(),
            Err(Error::DivisionByZero { metric: "accuracy" })
        ));
    }

    #[test]
    fn test_accuracy_does_not_overflow() {
        let max = u16::MAX;
        let acc = counts(max, max, max, max, max, max).accuracy().unwrap();
        assert!(acc > 0.0 && acc < 100.0);
    }

    #[test]
    fn test_ma_ratio() {
        let ratio = counts(200, 0, 0, 500, 0, 0).ma_ratio().unwrap();
        assert!((ratio - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ma_ratio_zero_perfect() {
        assert!(matches!(
            counts(0, 3, 0, 100, 0, 0).ma_ratio(),
            Err(Error::DivisionByZero { metric: "ma_ratio" })
        ));
    }

    #[test]
    fn test_total_and_is_perfect() {
        let c = counts(10, 0, 0, 20, 0, 0);
        assert_eq!(c.total(), 30);
        assert!(c.is_perfect());
        assert!(!counts(10, 1, 0, 20, 0, 0).is_perfect());
    }
}
