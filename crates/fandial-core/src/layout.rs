use crate::level::Level;
use std::f64::consts::PI;
use strum::EnumCount;

/// Angle of ordinal 0 (`Level::Off`), in radians.
pub const BASE_ANGLE: f64 = PI * (9.0 / 8.0);
pub const ANGLE_STEP: f64 = PI / 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

pub fn angle_for_ordinal(ordinal: usize) -> f64 {
    assert!(
        ordinal < Level::COUNT,
        "dial ordinal {ordinal} out of range 0..{}",
        Level::COUNT
    );
    BASE_ANGLE + ordinal as f64 * ANGLE_STEP
}

pub fn angle_for(level: Level) -> f64 {
    angle_for_ordinal(level.ordinal())
}

pub fn position_for(level: Level, radius: f64, center: Point) -> Point {
    let angle = angle_for(level);
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Dial placement inside a widget of the given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialGeometry {
    pub width: i32,
    pub height: i32,
    pub center: Point,
    pub radius: f64,
}

impl DialGeometry {
    pub fn from_size(width: i32, height: i32, radius_factor: f64) -> Self {
        // center snaps to whole pixels
        let center = Point::new((width / 2) as f64, (height / 2) as f64);
        let radius = width.min(height) as f64 / 2.0 * radius_factor;
        Self {
            width,
            height,
            center,
            radius,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self::from_size(0, 0, 0.0)
    }
}
