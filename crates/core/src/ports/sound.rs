/// Port for the optional tick sound
pub trait TickSound: Send + Sync {
    fn tick(&self);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl TickSound for Silent {
    fn tick(&self) {}
}
