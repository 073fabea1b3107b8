pub mod view;

pub use view::{CairoPainter, draw, write_png};

pub const DEFAULT_WIDTH: i32 = 400;
pub const DEFAULT_HEIGHT: i32 = 400;
