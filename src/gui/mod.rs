pub mod app;
pub mod dial;
pub mod theme;
