use derive_more::{AsRef, Deref, Display};
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumCount,
    EnumString,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Level {
    #[default]
    Off,
    Low,
    Medium,
    High,
}

/// Resource key a host resolves into the displayed label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref, AsRef)]
pub struct LabelKey(&'static str);

const LABEL_KEYS: [&str; Level::COUNT] = ["fan_off", "fan_low", "fan_medium", "fan_high"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("invalid dial state: ordinal {0} is outside 0..{max}", max = Level::COUNT)]
    InvalidState(usize),
}

impl Level {
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    pub fn from_ordinal(idx: usize) -> Result<Self, LevelError> {
        Self::iter().nth(idx).ok_or(LevelError::InvalidState(idx))
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Off => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::Off,
        }
    }

    pub fn label_key(&self) -> LabelKey {
        LabelKey(LABEL_KEYS[self.ordinal()])
    }
}
