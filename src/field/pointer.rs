//! Last known pointer or touch position.

use glam::Vec2;

/// Position reported when nothing is hovering or touching the surface.
/// Far enough outside any surface that repulsion never reaches the grid.
pub const FAR_AWAY: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Pointer position in logical surface coordinates
///
/// Mouse and touch share one position; the last event wins. Only the first
/// active touch drives it.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    position: Vec2,
    touch_id: Option<u64>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: FAR_AWAY,
            touch_id: None,
        }
    }
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.position != FAR_AWAY
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Cursor left the surface
    pub fn leave(&mut self) {
        self.position = FAR_AWAY;
    }

    /// Touch started or moved; ignored unless it is the first active touch
    pub fn touch_move(&mut self, id: u64, position: Vec2) {
        match self.touch_id {
            Some(active) if active != id => {}
            _ => {
                self.touch_id = Some(id);
                self.position = position;
            }
        }
    }

    /// Touch ended or was cancelled
    pub fn touch_end(&mut self, id: u64) {
        if self.touch_id == Some(id) {
            self.touch_id = None;
            self.position = FAR_AWAY;
        }
    }
}
