// Pure pointer helpers. No web APIs here so the logic is testable on the host.

use scatter_core::CLICK_SLOP_PX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Secondary button or shift-drag pans, everything else rotates.
#[inline]
pub fn drag_mode_for(button: i16, shift: bool) -> DragMode {
    if button == 2 || shift {
        DragMode::Pan
    } else {
        DragMode::Rotate
    }
}

/// Client coordinates relative to an element's top-left corner.
#[inline]
pub fn client_to_local(client_x: f32, client_y: f32, left: f32, top: f32) -> [f32; 2] {
    [client_x - left, client_y - top]
}

/// Tracks one press-move-release gesture, reporting incremental drag deltas
/// and whether the release counts as a click.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragTracker {
    mode: Option<DragMode>,
    last: [f32; 2],
    travel: f32,
}

impl DragTracker {
    pub fn press(&mut self, x: f32, y: f32, mode: DragMode) {
        self.mode = Some(mode);
        self.last = [x, y];
        self.travel = 0.0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    /// Delta since the previous sample while a button is held.
    pub fn on_move(&mut self, x: f32, y: f32) -> Option<(DragMode, f32, f32)> {
        let mode = self.mode?;
        let dx = x - self.last[0];
        let dy = y - self.last[1];
        self.last = [x, y];
        self.travel += (dx * dx + dy * dy).sqrt();
        Some((mode, dx, dy))
    }

    /// End the gesture. Returns true when the pointer barely moved.
    pub fn release(&mut self, x: f32, y: f32) -> bool {
        if self.mode.is_none() {
            return false;
        }
        let _ = self.on_move(x, y);
        self.mode = None;
        self.travel <= CLICK_SLOP_PX
    }

    pub fn cancel(&mut self) {
        self.mode = None;
    }
}
