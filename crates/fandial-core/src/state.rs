use crate::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DialState {
    level: Level,
}

impl DialState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// A state that starts somewhere other than `Off`, e.g. for snapshots.
    pub fn starting_at(level: Level) -> Self {
        Self { level }
    }

    pub fn activated(self) -> Self {
        Self {
            level: self.level.next(),
        }
    }

    pub fn activate(&mut self) -> Level {
        let previous = self.level;
        *self = self.activated();
        log::debug!("dial advanced {} -> {}", previous, self.level);
        self.level
    }
}
