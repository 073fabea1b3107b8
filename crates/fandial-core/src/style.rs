use crate::level::{LabelKey, Level};
use palette::Srgba;
use std::collections::HashMap;
use strum::IntoEnumIterator;

pub type Color = Srgba<f64>;

/// Face color of the dial while it is off, independent of configuration.
pub fn neutral() -> Color {
    let gray = f64::from(0x88_u8) / 255.0;
    Srgba::new(gray, gray, gray, 1.0)
}

pub fn black() -> Color {
    Srgba::new(0.0, 0.0, 0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialColors {
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

impl DialColors {
    pub fn new(low: Color, medium: Color, high: Color) -> Self {
        Self { low, medium, high }
    }

    pub fn color_for(&self, level: Level) -> Color {
        match level {
            Level::Off => neutral(),
            Level::Low => self.low,
            Level::Medium => self.medium,
            Level::High => self.high,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            size: 55.0,
            bold: true,
        }
    }
}

/// Immutable drawing parameters handed to the render path.
#[derive(Debug, Clone, PartialEq)]
pub struct DialStyle {
    /// Share of the half-extent the dial face occupies.
    pub radius_factor: f64,
    pub label_offset: f64,
    pub indicator_offset: f64,
    /// Indicator disc radius is the face radius divided by this.
    pub indicator_divisor: f64,
    pub indicator_color: Color,
    pub label_color: Color,
    pub text: TextStyle,
}

impl Default for DialStyle {
    fn default() -> Self {
        Self {
            radius_factor: 0.8,
            label_offset: 30.0,
            indicator_offset: -35.0,
            indicator_divisor: 12.0,
            indicator_color: black(),
            label_color: black(),
            text: TextStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTable {
    texts: HashMap<LabelKey, String>,
}

impl LabelTable {
    pub fn new(texts: impl IntoIterator<Item = (LabelKey, String)>) -> Self {
        Self {
            texts: texts.into_iter().collect(),
        }
    }

    /// Builds a table from one display string per level, in ordinal order.
    pub fn from_levels<S: Into<String>>(texts: [S; 4]) -> Self {
        Self::new(
            Level::iter()
                .zip(texts)
                .map(|(level, text)| (level.label_key(), text.into())),
        )
    }

    /// Unknown keys resolve to the key itself.
    pub fn resolve(&self, key: LabelKey) -> &str {
        self.texts.get(&key).map(String::as_str).unwrap_or(*key)
    }

    pub fn label_for(&self, level: Level) -> &str {
        self.resolve(level.label_key())
    }
}

impl Default for LabelTable {
    fn default() -> Self {
        Self::from_levels(["off", "1", "2", "3"])
    }
}
