use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Sixteenth-note steps in one whole note.
pub const STEPS_PER_WHOLE: u32 = 16;

/// Meter of the grid.
///
/// The grid always runs on sixteenth notes, so the meter only decides how many
/// steps make up a bar: `round(numerator × 16 / denominator)`, at least one.
/// Tempo is independent of the meter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSignature {
    /// Number of beats per bar
    pub numerator: u8,
    /// Note value that gets one beat (4 = quarter, 8 = eighth)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature {
        numerator: 3,
        denominator: 4,
    };

    /// 6/8 time
    pub const SIX_EIGHT: TimeSignature = TimeSignature {
        numerator: 6,
        denominator: 8,
    };

    /// 7/8 time
    pub const SEVEN_EIGHT: TimeSignature = TimeSignature {
        numerator: 7,
        denominator: 8,
    };

    /// 5/4 time
    pub const FIVE_FOUR: TimeSignature = TimeSignature {
        numerator: 5,
        denominator: 4,
    };

    /// Meters offered by the front-end, in menu order.
    pub const PRESETS: [TimeSignature; 5] = [
        Self::FOUR_FOUR,
        Self::THREE_FOUR,
        Self::SIX_EIGHT,
        Self::SEVEN_EIGHT,
        Self::FIVE_FOUR,
    ];

    /// Both parts are raised to at least 1.
    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator: numerator.max(1),
            denominator: denominator.max(1),
        }
    }

    /// Grid steps in one bar of this meter.
    pub fn steps_per_bar(&self) -> usize {
        let numerator = f64::from(self.numerator.max(1));
        let denominator = f64::from(self.denominator.max(1));
        let steps = (numerator * f64::from(STEPS_PER_WHOLE) / denominator).round();
        (steps as usize).max(1)
    }

    /// Total steps for `bars` bars.
    pub fn steps_for(&self, bars: u32) -> usize {
        bars as usize * self.steps_per_bar()
    }

    /// Steps per beat, for drawing beat separators. At least 1.
    pub fn steps_per_beat(&self) -> usize {
        (self.steps_per_bar() / usize::from(self.numerator.max(1))).max(1)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Error returned when a string is not of the form `n/d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimeSignatureError(String);

impl fmt::Display for ParseTimeSignatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time signature '{}', expected e.g. 4/4", self.0)
    }
}

impl std::error::Error for ParseTimeSignatureError {}

impl FromStr for TimeSignature {
    type Err = ParseTimeSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTimeSignatureError(s.to_string());
        let (num, den) = s.trim().split_once('/').ok_or_else(err)?;
        let numerator = num.trim().parse::<u8>().map_err(|_| err())?;
        let denominator = den.trim().parse::<u8>().map_err(|_| err())?;
        Ok(Self::new(numerator, denominator))
    }
}
