//! Monthly consumption series for the customer portal.
//!
//! The backend exposes no usage history, so the dashboard draws a seeded
//! synthetic series: a baseline with a summer peak and log-normal noise.
//! The same customer id always produces the same series.

use std::f64::consts::PI;

use jiff::ToSpan;
use jiff::civil::Date;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("invalid usage profile: {0}")]
    InvalidProfile(&'static str),

    #[error("date out of range: {0}")]
    Date(#[from] jiff::Error),
}

/// Shape of a customer's consumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    /// Average monthly consumption in cubic metres
    pub baseline_m3: f64,
    /// Fractional swing between winter and summer, in `[0, 1)`
    pub seasonal_swing: f64,
    /// Log-space standard deviation of month-to-month noise
    pub noise_sigma: f64,
}

impl Default for UsageProfile {
    fn default() -> Self {
        Self {
            baseline_m3: 18.0,
            seasonal_swing: 0.25,
            noise_sigma: 0.12,
        }
    }
}

impl UsageProfile {
    fn validate(&self) -> Result<(), UsageError> {
        if !self.baseline_m3.is_finite() || self.baseline_m3 < 0.0 {
            return Err(UsageError::InvalidProfile("baseline must be non-negative"));
        }
        if !(0.0..1.0).contains(&self.seasonal_swing) {
            return Err(UsageError::InvalidProfile("seasonal swing must be in [0, 1)"));
        }
        if !self.noise_sigma.is_finite() || self.noise_sigma < 0.0 {
            return Err(UsageError::InvalidProfile("noise sigma must be non-negative"));
        }
        Ok(())
    }

    /// Seasonal multiplier, peaking in July
    fn season(&self, month: i8) -> f64 {
        1.0 + self.seasonal_swing * (2.0 * PI * f64::from(month - 7) / 12.0).cos()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsagePoint {
    /// First day of the month
    pub month: Date,
    pub cubic_metres: f64,
}

impl UsagePoint {
    /// Short axis label such as `Jul 24`
    pub fn label(&self) -> String {
        self.month.strftime("%b %y").to_string()
    }
}

/// Generate `months` points ending with the month containing `end`, oldest first.
pub fn monthly_usage(
    customer_id: i64,
    end: Date,
    months: usize,
    profile: &UsageProfile,
) -> Result<Vec<UsagePoint>, UsageError> {
    profile.validate()?;
    let noise = rand_distr::LogNormal::new(0.0, profile.noise_sigma)
        .map_err(|_| UsageError::InvalidProfile("noise sigma must be finite"))?;
    let mut rng = SmallRng::seed_from_u64(customer_id as u64);

    let last = end.first_of_month();
    let mut points = Vec::with_capacity(months);
    for back in (0..months).rev() {
        let month = last.checked_sub((back as i64).months())?;
        let value = profile.baseline_m3 * profile.season(month.month()) * noise.sample(&mut rng);
        points.push(UsagePoint {
            month,
            cubic_metres: (value * 10.0).round() / 10.0,
        });
    }
    Ok(points)
}

/// Residential tariff: (upper bound of the block in m3, price per m3)
const TARIFF_BLOCKS: [(f64, f64); 3] = [(10.0, 1.50), (30.0, 2.25), (f64::INFINITY, 3.10)];

/// Fixed monthly service charge
pub const SERVICE_CHARGE: f64 = 8.00;

/// Bill for one month's consumption under the tiered tariff
pub fn estimate_charge(cubic_metres: f64) -> f64 {
    let mut remaining = cubic_metres.max(0.0);
    let mut floor = 0.0;
    let mut charge = SERVICE_CHARGE;
    for (ceiling, price) in TARIFF_BLOCKS {
        if remaining <= 0.0 {
            break;
        }
        let in_block = remaining.min(ceiling - floor);
        charge += in_block * price;
        remaining -= in_block;
        floor = ceiling;
    }
    (charge * 100.0).round() / 100.0
}

/// Headline figures shown above the usage chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub total: f64,
    pub average: f64,
    pub peak: Option<UsagePoint>,
    /// Percent change of the last month over the one before
    pub trend_pct: Option<f64>,
    /// Charge for the most recent month
    pub estimated_charge: f64,
}

impl UsageSummary {
    pub fn from_points(points: &[UsagePoint]) -> Self {
        let total: f64 = points.iter().map(|p| p.cubic_metres).sum();
        let average = if points.is_empty() {
            0.0
        } else {
            total / points.len() as f64
        };
        let peak = points
            .iter()
            .copied()
            .max_by(|a, b| a.cubic_metres.total_cmp(&b.cubic_metres));
        let trend_pct = match points {
            [.., prev, last] if prev.cubic_metres > 0.0 => {
                Some((last.cubic_metres - prev.cubic_metres) / prev.cubic_metres * 100.0)
            }
            _ => None,
        };
        let estimated_charge = points.last().map_or(0.0, |p| estimate_charge(p.cubic_metres));
        Self {
            total,
            average,
            peak,
            trend_pct,
            estimated_charge,
        }
    }
}
