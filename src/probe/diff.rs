//! The diff-dedup decision: whether a test response is distinct enough from
//! its target's baseline to be worth reporting.
use std::collections::BTreeSet;

use crate::args::MinDiff;

/// Symmetric relative difference `|a - b| * 2 / (a + b)`, kept as an exact
/// fraction. Ranges over `[0, 2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthDiff {
    numerator: u128,
    denominator: u128,
}

impl LengthDiff {
    /// Returns `None` when both lengths are zero.
    #[must_use]
    pub fn between(baseline: u64, candidate: u64) -> Option<Self> {
        let denominator = u128::from(baseline).saturating_add(u128::from(candidate));
        if denominator == 0 {
            return None;
        }
        let numerator = u128::from(baseline.abs_diff(candidate)).saturating_mul(2);
        Some(Self {
            numerator,
            denominator,
        })
    }

    #[must_use]
    pub fn is_below(self, min_diff: MinDiff) -> bool {
        let scaled = self.numerator.saturating_mul(u128::from(MinDiff::SCALE));
        let threshold = u128::from(min_diff.millionths()).saturating_mul(self.denominator);
        scaled < threshold
    }

    /// The difference in millionths, truncated.
    #[must_use]
    pub fn millionths(self) -> u64 {
        self.numerator
            .saturating_mul(u128::from(MinDiff::SCALE))
            .checked_div(self.denominator)
            .and_then(|value| u64::try_from(value).ok())
            .unwrap_or(u64::MAX)
    }
}

/// Outcome of judging one test response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    EmptyBody,
    StatusRejected,
    NoDifference,
    TooSimilar(LengthDiff),
    Hit(LengthDiff),
}

impl Verdict {
    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(self, Verdict::Hit(_))
    }
}

#[must_use]
pub fn judge(
    status: u16,
    length: u64,
    baseline: u64,
    acceptable_status: &BTreeSet<u16>,
    min_diff: MinDiff,
) -> Verdict {
    if length == 0 {
        return Verdict::EmptyBody;
    }
    if !acceptable_status.contains(&status) {
        return Verdict::StatusRejected;
    }
    let Some(diff) = LengthDiff::between(baseline, length) else {
        return Verdict::NoDifference;
    };
    if diff.is_below(min_diff) {
        Verdict::TooSimilar(diff)
    } else {
        Verdict::Hit(diff)
    }
}

/// Human-readable body size: bytes below 1000, then KB and MB with two
/// decimals.
#[must_use]
pub fn format_size(length: u64) -> String {
    if length < 1_000 {
        return format!("{}B", length);
    }
    let kilo_hundredths = length.saturating_mul(100).saturating_add(500) / 1_000;
    // Values that round up to 1000.00KB are shown as MB.
    let (hundredths, suffix) = if kilo_hundredths < 100_000 {
        (kilo_hundredths, "KB")
    } else {
        (
            length.saturating_mul(100).saturating_add(500_000) / 1_000_000,
            "MB",
        )
    };
    format!("{}.{:02}{}", hundredths / 100, hundredths % 100, suffix)
}
