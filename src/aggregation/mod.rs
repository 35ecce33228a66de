use std::{fmt, str::FromStr};

use num::{Float, NumCast};
use serde::{Deserialize, Serialize};

use crate::error::{Error, InputContext, Result};

/// Enum for strategies reducing per-pair coherence scores to one number
///
/// Unweighted forms see every value, so a single NaN makes the result NaN.
/// Weighted forms drop NaN values together with their weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    /// Arithmetic mean
    ArithmeticMean,
    /// Geometric mean
    /// only meaningful for positive values
    GeometricMean,
    /// Harmonic mean
    /// only meaningful for non-zero values
    HarmonicMean,
    /// Quadratic mean (root mean square)
    QuadraticMean,
    /// Median
    /// the weighted form picks the value where the cumulative weight reaches one half
    Median,
    /// Minimum
    /// weights only decide which values take part
    Min,
    /// Maximum
    /// weights only decide which values take part
    Max,
}

impl Aggregation {
    pub const ALL: [Aggregation; 7] = [
        Aggregation::ArithmeticMean,
        Aggregation::GeometricMean,
        Aggregation::HarmonicMean,
        Aggregation::QuadraticMean,
        Aggregation::Median,
        Aggregation::Min,
        Aggregation::Max,
    ];

    /// Short name used in coherence measure notation
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::ArithmeticMean => "sigma_a",
            Aggregation::GeometricMean => "sigma_g",
            Aggregation::HarmonicMean => "sigma_h",
            Aggregation::QuadraticMean => "sigma_q",
            Aggregation::Median => "sigma_m",
            Aggregation::Min => "sigma_n",
            Aggregation::Max => "sigma_x",
        }
    }

    /// Reduce all values; NaN anywhere gives NaN, an empty slice gives NaN
    pub fn summarize<F: Float>(&self, values: &[F]) -> F {
        if values.iter().any(|v| v.is_nan()) {
            return F::nan();
        }
        let n = match <F as NumCast>::from(values.len()) {
            Some(n) => n,
            None => return F::nan(),
        };
        match self {
            Aggregation::ArithmeticMean => sum(values.iter().copied()) / n,
            Aggregation::GeometricMean => (sum(values.iter().map(|v| v.ln())) / n).exp(),
            Aggregation::HarmonicMean => n / sum(values.iter().map(|v| v.recip())),
            Aggregation::QuadraticMean => (sum(values.iter().map(|&v| v * v)) / n).sqrt(),
            Aggregation::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                median_of_sorted(&sorted)
            }
            Aggregation::Min => values.iter().copied().reduce(F::min).unwrap_or_else(F::nan),
            Aggregation::Max => values.iter().copied().reduce(F::max).unwrap_or_else(F::nan),
        }
    }

    /// Reduce values weighted by `weights`, skipping NaN values and zero weights.
    /// Returns 0 if the remaining weight sum is not positive.
    ///
    /// # Errors
    /// * `InvalidInput` - `values` and `weights` differ in length
    pub fn summarize_weighted<F: Float>(&self, values: &[F], weights: &[F]) -> Result<F> {
        if values.len() != weights.len() {
            return Err(Error::invalid(
                InputContext::Values,
                format!("{} values but {} weights", values.len(), weights.len()),
            ));
        }
        let defined: Vec<(F, F)> = values
            .iter()
            .zip(weights)
            .filter(|(v, w)| !v.is_nan() && !w.is_zero())
            .map(|(&v, &w)| (v, w))
            .collect();
        let weight_sum = sum(defined.iter().map(|&(_, w)| w));
        if !(weight_sum > F::zero()) {
            return Ok(F::zero());
        }

        let result = match self {
            Aggregation::ArithmeticMean => sum(defined.iter().map(|&(v, w)| w * v)) / weight_sum,
            Aggregation::GeometricMean => {
                (sum(defined.iter().map(|&(v, w)| w * v.ln())) / weight_sum).exp()
            }
            Aggregation::HarmonicMean => weight_sum / sum(defined.iter().map(|&(v, w)| w / v)),
            Aggregation::QuadraticMean => {
                (sum(defined.iter().map(|&(v, w)| w * v * v)) / weight_sum).sqrt()
            }
            Aggregation::Median => {
                let mut sorted = defined;
                sorted.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
                weighted_median_of_sorted(&sorted, weight_sum)
            }
            Aggregation::Min => defined.iter().map(|&(v, _)| v).reduce(F::min).unwrap_or_else(F::zero),
            Aggregation::Max => defined.iter().map(|&(v, _)| v).reduce(F::max).unwrap_or_else(F::zero),
        };
        Ok(result)
    }
}

/// Arithmetic mean over all values; NaN if any value is NaN
pub fn summarize_unweighted<F: Float>(values: &[F]) -> F {
    Aggregation::ArithmeticMean.summarize(values)
}

/// Weighted arithmetic mean skipping NaN values and their weights
pub fn summarize_weighted<F: Float>(values: &[F], weights: &[F]) -> Result<F> {
    Aggregation::ArithmeticMean.summarize_weighted(values, weights)
}

#[inline]
fn sum<F: Float>(iter: impl Iterator<Item = F>) -> F {
    iter.fold(F::zero(), |acc, v| acc + v)
}

fn median_of_sorted<F: Float>(sorted: &[F]) -> F {
    let n = sorted.len();
    if n == 0 {
        return F::nan();
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        let two = F::one() + F::one();
        (sorted[n / 2 - 1] + sorted[n / 2]) / two
    }
}

/// First value whose cumulative weight reaches half of the total
fn weighted_median_of_sorted<F: Float>(sorted: &[(F, F)], weight_sum: F) -> F {
    let half = weight_sum / (F::one() + F::one());
    let mut cumulative = F::zero();
    for &(value, weight) in sorted {
        cumulative = cumulative + weight;
        if cumulative >= half {
            return value;
        }
    }
    sorted.last().map_or_else(F::zero, |&(value, _)| value)
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Aggregation::ALL
            .iter()
            .copied()
            .find(|agg| agg.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::invalid(InputContext::Request, format!("unknown aggregation \"{}\"", s)))
    }
}
