//! Screen-based hour estimation: per-line calculation, totals and day rounding.
//!
//! A line's hours come straight from the hour mapping for its
//! (complexity, screen type) pair. Totals are plain sums, converted to days
//! with a half-day floor for small estimations.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::CoreError;
use crate::hour_mapping::HourMappingProvider;
use crate::types::Hours;
use crate::validation::{validate_name, validate_non_negative_hours, validate_version_number};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Working hours in one day.
pub const HOURS_PER_DAY: i64 = 8;

/// Totals at or below this many hours are reported as half a day.
pub const HALF_DAY_MAX_HOURS: i64 = 4;

/// Maximum number of line items in a single estimation.
pub const MAX_ESTIMATION_LINES: usize = 500;

// ---------------------------------------------------------------------------
// Missing mapping policy
// ---------------------------------------------------------------------------

/// What to do when a line's (complexity, screen type) pair has no mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingMappingPolicy {
    /// Count the line as zero hours and flag it as unmapped.
    #[default]
    ZeroDefault,
    /// Fail the calculation with [`CoreError::MappingMissing`].
    Reject,
}

impl MissingMappingPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ZeroDefault => "zero",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for MissingMappingPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "zero_default" => Ok(Self::ZeroDefault),
            "reject" => Ok(Self::Reject),
            other => Err(CoreError::Validation(format!(
                "Unknown missing-mapping policy '{other}', expected 'zero' or 'reject'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Calculated hours for one screen line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineEstimate {
    pub hours: Hours,
    /// `false` when the pair was unmapped and defaulted to zero.
    pub mapped: bool,
}

/// Calculate the hours for one line from the hour mapping.
pub fn calculate_line<P: HourMappingProvider>(
    provider: &P,
    complexity: &str,
    screen_type: &str,
    policy: MissingMappingPolicy,
) -> Result<LineEstimate, CoreError> {
    match provider.lookup_hours(complexity, screen_type) {
        Some(hours) => Ok(LineEstimate {
            hours,
            mapped: true,
        }),
        None => match policy {
            MissingMappingPolicy::ZeroDefault => Ok(LineEstimate {
                hours: 0,
                mapped: false,
            }),
            MissingMappingPolicy::Reject => Err(CoreError::MappingMissing {
                complexity: complexity.to_string(),
                screen_type: screen_type.to_string(),
            }),
        },
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Sum line hours. An empty iterator totals zero.
pub fn total_hours<I>(lines: I) -> i64
where
    I: IntoIterator<Item = Hours>,
{
    lines.into_iter().map(i64::from).sum()
}

/// A day count as shown to users: either half a day or a whole number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCount {
    Half,
    Whole(i64),
}

impl DayCount {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Half => 0.5,
            Self::Whole(days) => days as f64,
        }
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Half => f.write_str("0.5 Day"),
            Self::Whole(days) => write!(f, "{days}"),
        }
    }
}

impl Serialize for DayCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Half => serializer.serialize_f64(0.5),
            Self::Whole(days) => serializer.serialize_i64(*days),
        }
    }
}

/// Convert total hours to days.
///
/// `total <= 4` is half a day (including zero); anything above rounds up to
/// whole 8-hour days.
pub fn days_for_hours(total: i64) -> DayCount {
    if total <= HALF_DAY_MAX_HOURS {
        DayCount::Half
    } else {
        DayCount::Whole((total + HOURS_PER_DAY - 1) / HOURS_PER_DAY)
    }
}

/// Total hours with their day conversion, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationTotals {
    pub total_hours: i64,
    pub days: DayCount,
    pub days_label: String,
}

impl EstimationTotals {
    pub fn from_total(total_hours: i64) -> Self {
        let days = days_for_hours(total_hours);
        Self {
            total_hours,
            days,
            days_label: days.to_string(),
        }
    }
}

/// Sum the lines and convert to days in one step.
pub fn summarize<I>(lines: I) -> EstimationTotals
where
    I: IntoIterator<Item = Hours>,
{
    EstimationTotals::from_total(total_hours(lines))
}

// ---------------------------------------------------------------------------
// Submission checks
// ---------------------------------------------------------------------------

/// Reject a client-submitted total that disagrees with the recomputed one.
pub fn verify_submitted_total(submitted: Option<i64>, computed: i64) -> Result<(), CoreError> {
    match submitted {
        Some(total) if total < 0 => Err(CoreError::Validation(format!(
            "total_hours must not be negative, got {total}"
        ))),
        Some(total) if total != computed => Err(CoreError::Validation(format!(
            "total_hours {total} does not match the sum of line items ({computed})"
        ))),
        _ => Ok(()),
    }
}

/// Reject a client-submitted line figure that disagrees with the mapping.
pub fn verify_submitted_line(
    index: usize,
    submitted: Option<Hours>,
    computed: Hours,
) -> Result<(), CoreError> {
    match submitted {
        Some(hours) if hours != computed => Err(CoreError::Validation(format!(
            "details[{index}].calculated_hours {hours} does not match the hour mapping ({computed})"
        ))),
        _ => Ok(()),
    }
}

/// Validated estimation header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimationHeader {
    pub name: String,
    pub version_number: String,
}

/// Validate the header fields and the number of line items.
pub fn validate_estimation(
    name: &str,
    version_number: &str,
    line_count: usize,
) -> Result<EstimationHeader, CoreError> {
    let name = validate_name(name, "name")?;
    let version_number = validate_version_number(version_number)?;
    validate_line_count(line_count)?;
    Ok(EstimationHeader {
        name,
        version_number,
    })
}

/// An estimation needs at least one line and at most [`MAX_ESTIMATION_LINES`].
pub fn validate_line_count(count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "An estimation must contain at least one screen".to_string(),
        ));
    }
    if count > MAX_ESTIMATION_LINES {
        return Err(CoreError::Validation(format!(
            "An estimation may contain at most {MAX_ESTIMATION_LINES} screens, got {count}"
        )));
    }
    Ok(())
}

/// Stored line hours must be non-negative.
pub fn validate_line_hours(hours: Hours) -> Result<(), CoreError> {
    validate_non_negative_hours(hours, "calculated_hours")
}

// ---------------------------------------------------------------------------
// Report breakdown
// ---------------------------------------------------------------------------

/// Hours and line count for one label in a report breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub line_count: usize,
    pub total_hours: i64,
}

/// Group `(label, hours)` pairs by label, sorted by label.
pub fn breakdown<'a, I>(lines: I) -> Vec<BreakdownEntry>
where
    I: IntoIterator<Item = (&'a str, Hours)>,
{
    let mut groups: BTreeMap<&str, (usize, i64)> = BTreeMap::new();
    for (label, hours) in lines {
        let entry = groups.entry(label).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += i64::from(hours);
    }
    groups
        .into_iter()
        .map(|(label, (line_count, total_hours))| BreakdownEntry {
            label: label.to_string(),
            line_count,
            total_hours,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
