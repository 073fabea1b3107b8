use crate::layout::{DialGeometry, Point, position_for};
use crate::level::{LabelKey, Level};
use crate::style::{Color, DialColors, DialStyle, LabelTable, TextStyle};
use strum::IntoEnumIterator;

/// Drawing surface the dial paints onto.
pub trait Painter {
    type Error;

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error>;

    /// Draws `text` horizontally centered on `anchor.x`, with `anchor.y` as the baseline.
    fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: &TextStyle,
        color: Color,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelMark {
    pub level: Level,
    pub key: LabelKey,
    pub text: String,
    pub position: Point,
}

/// Everything needed to draw one frame of the dial.
#[derive(Debug, Clone, PartialEq)]
pub struct DialScene {
    pub face: Disc,
    pub indicator: Disc,
    pub labels: Vec<LabelMark>,
    pub label_color: Color,
    pub text: TextStyle,
}

impl DialScene {
    pub fn compose(
        level: Level,
        geometry: &DialGeometry,
        colors: &DialColors,
        style: &DialStyle,
        labels: &LabelTable,
    ) -> Self {
        let DialGeometry { center, radius, .. } = *geometry;

        let face = Disc {
            center,
            radius,
            color: colors.color_for(level),
        };

        let indicator = Disc {
            center: position_for(level, radius + style.indicator_offset, center),
            radius: radius / style.indicator_divisor,
            color: style.indicator_color,
        };

        let label_radius = radius + style.label_offset;
        let labels = Level::iter()
            .map(|l| LabelMark {
                level: l,
                key: l.label_key(),
                text: labels.label_for(l).to_string(),
                position: position_for(l, label_radius, center),
            })
            .collect();

        Self {
            face,
            indicator,
            labels,
            label_color: style.label_color,
            text: style.text.clone(),
        }
    }

    pub fn paint<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        painter.fill_circle(self.face.center, self.face.radius, self.face.color)?;
        painter.fill_circle(
            self.indicator.center,
            self.indicator.radius,
            self.indicator.color,
        )?;
        for mark in &self.labels {
            painter.fill_text(&mark.text, mark.position, &self.text, self.label_color)?;
        }
        Ok(())
    }
}
