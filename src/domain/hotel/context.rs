//! HotelContext - The editable inputs describing a hotel's market position.
//!
//! The context is a plain value. Every analysis request takes a snapshot of
//! it by value, so later edits never leak into an in-flight request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Longest planning horizon a context may carry, in months.
///
/// The projection allocates one point per month, so the horizon is capped.
pub const MAX_TIMEFRAME_MONTHS: u32 = 120;

/// Current performance and goals for one property.
///
/// Wire names follow the dashboard's JSON contract (`currentRevPAR`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelContext {
    /// City the property is located in.
    pub city: String,
    /// Target profitability increase, in percent.
    #[serde(rename = "targetProfitability")]
    pub target_profitability_percent: f64,
    /// Months available to reach the target.
    #[serde(rename = "timeframe")]
    pub timeframe_months: u32,
    /// Revenue per available room.
    #[serde(rename = "currentRevPAR")]
    pub current_revpar: f64,
    /// Average daily rate.
    #[serde(rename = "currentADR")]
    pub current_adr: f64,
    /// Occupancy, in percent.
    #[serde(rename = "currentOccupancy")]
    pub current_occupancy_percent: f64,
}

impl Default for HotelContext {
    fn default() -> Self {
        Self {
            city: "London".to_string(),
            target_profitability_percent: 15.0,
            timeframe_months: 18,
            current_revpar: 145.0,
            current_adr: 180.0,
            current_occupancy_percent: 82.0,
        }
    }
}

impl HotelContext {
    /// Applies raw form input to a single field.
    ///
    /// Numeric fields never fail: input that does not parse collapses to 0.
    /// Target and timeframe take the leading integer of the input
    /// (`"12.7"` becomes 12), matching how the dashboard form reads them.
    pub fn set_field(&mut self, field: ContextField, raw: &str) {
        match field {
            ContextField::City => self.city = raw.to_string(),
            ContextField::TargetProfitability => {
                self.target_profitability_percent = parse_leading_int(raw) as f64;
            }
            ContextField::Timeframe => {
                self.timeframe_months = parse_leading_int(raw).clamp(0, u32::MAX as i64) as u32;
            }
            ContextField::CurrentRevPar => self.current_revpar = parse_number_or_zero(raw),
            ContextField::CurrentAdr => self.current_adr = parse_number_or_zero(raw),
            ContextField::CurrentOccupancy => {
                self.current_occupancy_percent = parse_number_or_zero(raw);
            }
        }
    }

    /// Checks the bounds coercion cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeframe_months > MAX_TIMEFRAME_MONTHS {
            return Err(ValidationError::out_of_range(
                ContextField::Timeframe.wire_name(),
                MAX_TIMEFRAME_MONTHS as u64,
            ));
        }
        Ok(())
    }

    /// Returns a copy with one field replaced by coerced raw input.
    pub fn with_field(mut self, field: ContextField, raw: &str) -> Self {
        self.set_field(field, raw);
        self
    }
}

/// An editable field of [`HotelContext`], addressed by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextField {
    #[serde(rename = "city")]
    City,
    #[serde(rename = "targetProfitability")]
    TargetProfitability,
    #[serde(rename = "timeframe")]
    Timeframe,
    #[serde(rename = "currentRevPAR")]
    CurrentRevPar,
    #[serde(rename = "currentADR")]
    CurrentAdr,
    #[serde(rename = "currentOccupancy")]
    CurrentOccupancy,
}

impl ContextField {
    /// All editable fields, in form order.
    pub fn all() -> &'static [ContextField] {
        &[
            ContextField::City,
            ContextField::TargetProfitability,
            ContextField::Timeframe,
            ContextField::CurrentRevPar,
            ContextField::CurrentAdr,
            ContextField::CurrentOccupancy,
        ]
    }

    /// The field's JSON wire name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ContextField::City => "city",
            ContextField::TargetProfitability => "targetProfitability",
            ContextField::Timeframe => "timeframe",
            ContextField::CurrentRevPar => "currentRevPAR",
            ContextField::CurrentAdr => "currentADR",
            ContextField::CurrentOccupancy => "currentOccupancy",
        }
    }
}

impl fmt::Display for ContextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ContextField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContextField::all()
            .iter()
            .copied()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| ValidationError::unknown_field(s))
    }
}

/// Reads an optional sign followed by digits from the start of the input.
/// Anything else yields 0.
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..digits_end].parse::<i64>().unwrap_or(0);

    if negative {
        -value
    } else {
        value
    }
}

fn parse_number_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
