//! Measures of association on a 2×2 table
//!
//! ```text
//!                 outcome+   outcome-
//! exposure high      a          b
//! exposure low       c          d
//! ```

use crate::error::AssociationError;
use serde::{Deserialize, Serialize};

/// Exposure row of the contingency table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureLevel {
    /// Exposed group (population density above the provincial mean)
    High,
    /// Unexposed group
    Low,
}

/// Counts of a 2×2 exposure/outcome table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationTable {
    /// Exposed, outcome present
    pub a: u64,
    /// Exposed, outcome absent
    pub b: u64,
    /// Unexposed, outcome present
    pub c: u64,
    /// Unexposed, outcome absent
    pub d: u64,
}

/// Population density vs tuberculosis, West Java 2024
pub const PROVINCIAL_DENSITY_TABLE: AssociationTable = AssociationTable {
    a: 67_968,
    b: 10_406_262,
    c: 156_830,
    d: 39_714_130,
};

impl AssociationTable {
    /// Create table from the four cell counts
    #[inline]
    #[must_use]
    pub const fn new(a: u64, b: u64, c: u64, d: u64) -> Self {
        Self { a, b, c, d }
    }

    /// `(outcome present, outcome absent)` for one exposure level
    #[inline]
    #[must_use]
    pub fn row(&self, level: ExposureLevel) -> (u64, u64) {
        match level {
            ExposureLevel::High => (self.a, self.b),
            ExposureLevel::Low => (self.c, self.d),
        }
    }

    /// Row total for one exposure level
    ///
    /// Totals are widened to `u128`; four `u64` counts cannot overflow it.
    #[inline]
    #[must_use]
    pub fn row_total(&self, level: ExposureLevel) -> u128 {
        let (present, absent) = self.row(level);
        u128::from(present) + u128::from(absent)
    }

    /// `(outcome present, outcome absent)` column totals
    #[inline]
    #[must_use]
    pub fn column_totals(&self) -> (u128, u128) {
        (
            u128::from(self.a) + u128::from(self.c),
            u128::from(self.b) + u128::from(self.d),
        )
    }

    /// Grand total
    #[inline]
    #[must_use]
    pub fn total(&self) -> u128 {
        self.row_total(ExposureLevel::High) + self.row_total(ExposureLevel::Low)
    }

    /// Prevalence ratio `(a/(a+b)) / (c/(c+d))`
    ///
    /// # Errors
    ///
    /// Undefined when `a+b`, `c+d` or `c` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn prevalence_ratio(&self) -> Result<f64, AssociationError> {
        let zero = |term| AssociationError::ZeroDenominator { metric: "PR", term };
        let exposed = self.row_total(ExposureLevel::High);
        let unexposed = self.row_total(ExposureLevel::Low);
        if exposed == 0 {
            return Err(zero("a+b"));
        }
        if unexposed == 0 {
            return Err(zero("c+d"));
        }
        if self.c == 0 {
            return Err(zero("c"));
        }
        let p_exposed = self.a as f64 / exposed as f64;
        let p_unexposed = self.c as f64 / unexposed as f64;
        Ok(p_exposed / p_unexposed)
    }

    /// Prevalence odds ratio `(a×d) / (b×c)`
    ///
    /// # Errors
    ///
    /// Undefined when `b` or `c` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn prevalence_odds_ratio(&self) -> Result<f64, AssociationError> {
        let zero = |term| AssociationError::ZeroDenominator { metric: "POR", term };
        if self.b == 0 {
            return Err(zero("b"));
        }
        if self.c == 0 {
            return Err(zero("c"));
        }
        // a×d overflows u64 for provincial-scale counts
        Ok((self.a as f64 * self.d as f64) / (self.b as f64 * self.c as f64))
    }

    /// Both metrics together
    ///
    /// # Errors
    ///
    /// Propagates the first undefined metric.
    pub fn metrics(&self) -> Result<AssociationMetrics, AssociationError> {
        Ok(AssociationMetrics {
            table: *self,
            prevalence_ratio: self.prevalence_ratio()?,
            prevalence_odds_ratio: self.prevalence_odds_ratio()?,
        })
    }
}

/// PR and POR with the counts they were computed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssociationMetrics {
    /// Source table
    pub table: AssociationTable,
    /// Prevalence ratio
    pub prevalence_ratio: f64,
    /// Prevalence odds ratio
    pub prevalence_odds_ratio: f64,
}

/// Round to two decimals for display
#[inline]
#[must_use]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
