/// Input events the host forwards from the page.
/// No game-specific semantics beyond the four steering controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released (DOM `keyCode`).
    KeyUp { key_code: u32 },
    /// The page lost focus; every held control is released.
    Blur,
}

/// The four steering signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    RotateLeft,
    RotateRight,
    ThrustForward,
    ThrustBack,
}

pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;
pub const KEY_A: u32 = 65;
pub const KEY_D: u32 = 68;
pub const KEY_S: u32 = 83;
pub const KEY_W: u32 = 87;

/// Map a DOM key code to a steering control (arrows and WASD).
pub fn control_for_key(key_code: u32) -> Option<Control> {
    match key_code {
        KEY_LEFT | KEY_A => Some(Control::RotateLeft),
        KEY_RIGHT | KEY_D => Some(Control::RotateRight),
        KEY_UP | KEY_W => Some(Control::ThrustForward),
        KEY_DOWN | KEY_S => Some(Control::ThrustBack),
        _ => None,
    }
}

/// Snapshot of which controls are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Level-triggered input state.
/// Events overwrite flags as they arrive; the game samples the flags once per step.
/// Nothing is queued, so a press and release between two frames is never seen.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    controls: Controls,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an input event (called from JS via wasm-bindgen).
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                if let Some(control) = control_for_key(key_code) {
                    self.set(control, true);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(control) = control_for_key(key_code) {
                    self.set(control, false);
                }
            }
            InputEvent::Blur => self.release_all(),
        }
    }

    /// Set one control directly.
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::RotateLeft => self.controls.left = pressed,
            Control::RotateRight => self.controls.right = pressed,
            Control::ThrustForward => self.controls.up = pressed,
            Control::ThrustBack => self.controls.down = pressed,
        }
    }

    /// Release every control.
    pub fn release_all(&mut self) {
        self.controls = Controls::default();
    }

    /// Current snapshot of the held controls.
    pub fn controls(&self) -> Controls {
        self.controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_same_controls() {
        assert_eq!(control_for_key(KEY_LEFT), control_for_key(KEY_A));
        assert_eq!(control_for_key(KEY_RIGHT), control_for_key(KEY_D));
        assert_eq!(control_for_key(KEY_UP), control_for_key(KEY_W));
        assert_eq!(control_for_key(KEY_DOWN), control_for_key(KEY_S));
        assert_eq!(control_for_key(32), None);
    }

    #[test]
    fn level_triggered_last_write_wins() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown { key_code: KEY_UP });
        input.apply(InputEvent::KeyUp { key_code: KEY_UP });
        input.apply(InputEvent::KeyDown { key_code: KEY_LEFT });
        let c = input.controls();
        assert!(!c.up);
        assert!(c.left);
        assert!(!c.right && !c.down);
    }

    #[test]
    fn repeated_keydown_is_idempotent() {
        let mut input = InputState::new();
        for _ in 0..5 {
            input.apply(InputEvent::KeyDown { key_code: KEY_W });
        }
        input.apply(InputEvent::KeyUp { key_code: KEY_W });
        assert!(!input.controls().up);
    }

    #[test]
    fn blur_releases_everything() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown { key_code: KEY_UP });
        input.apply(InputEvent::KeyDown { key_code: KEY_RIGHT });
        input.apply(InputEvent::Blur);
        assert_eq!(input.controls(), Controls::default());
    }
}
