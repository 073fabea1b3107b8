//! Framework-independent model of a four-position fan speed dial.

pub mod layout;
pub mod level;
pub mod scene;
pub mod state;
pub mod style;
pub mod widget;

pub use layout::{DialGeometry, Point, position_for};
pub use level::{LabelKey, Level, LevelError};
pub use scene::{DialScene, Painter};
pub use state::DialState;
pub use style::{Color, DialColors, DialStyle, LabelTable, TextStyle};
pub use widget::{Dial, Renderable, Tappable};
