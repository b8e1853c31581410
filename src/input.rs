//! Keyboard handling: held keys become a movement intent, single presses
//! become commands.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::physics::MoveIntent;
use crate::renderer::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Restart,
    ToggleView,
    Quit,
    /// One-tile move in the top-down view.
    GridStep(i32, i32),
}

/// Keys currently held down.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    down: HashSet<KeyCode>,
}

impl KeyState {
    pub fn press(&mut self, code: KeyCode) {
        self.down.insert(code);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.down.remove(&code);
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    #[inline]
    pub fn is_down(&self, code: KeyCode) -> bool {
        self.down.contains(&code)
    }

    fn axis(&self, pos: &[KeyCode], neg: &[KeyCode]) -> f32 {
        let mut v = 0.0;
        if pos.iter().any(|&k| self.is_down(k)) {
            v += 1.0;
        }
        if neg.iter().any(|&k| self.is_down(k)) {
            v -= 1.0;
        }
        v
    }

    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.axis(
                &[KeyCode::KeyW, KeyCode::ArrowUp],
                &[KeyCode::KeyS, KeyCode::ArrowDown],
            ),
            strafe: self.axis(&[KeyCode::KeyD], &[KeyCode::KeyA]),
            turn: self.axis(
                &[KeyCode::KeyE, KeyCode::ArrowRight],
                &[KeyCode::KeyQ, KeyCode::ArrowLeft],
            ),
        }
    }
}

/// Command triggered by a key press in the given view, if any.
pub fn command_for(code: KeyCode, view: ViewMode) -> Option<Command> {
    match code {
        KeyCode::KeyR => Some(Command::Restart),
        KeyCode::Tab => Some(Command::ToggleView),
        KeyCode::Escape => Some(Command::Quit),
        _ if view == ViewMode::TopDown => grid_dir(code).map(|(dx, dy)| Command::GridStep(dx, dy)),
        _ => None,
    }
}

fn grid_dir(code: KeyCode) -> Option<(i32, i32)> {
    match code {
        KeyCode::ArrowUp | KeyCode::KeyW => Some((0, -1)),
        KeyCode::ArrowDown | KeyCode::KeyS => Some((0, 1)),
        KeyCode::ArrowLeft | KeyCode::KeyA => Some((-1, 0)),
        KeyCode::ArrowRight | KeyCode::KeyD => Some((1, 0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_build_intent() {
        let mut keys = KeyState::default();
        assert!(keys.intent().is_idle());

        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::KeyA);
        keys.press(KeyCode::ArrowRight);
        assert_eq!(
            keys.intent(),
            MoveIntent {
                forward: 1.0,
                strafe: -1.0,
                turn: 1.0
            }
        );

        keys.release(KeyCode::KeyW);
        assert_eq!(keys.intent().forward, 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = KeyState::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::ArrowDown);
        keys.press(KeyCode::KeyQ);
        keys.press(KeyCode::KeyE);
        let intent = keys.intent();
        assert_eq!(intent.forward, 0.0);
        assert_eq!(intent.turn, 0.0);

        keys.clear();
        assert!(keys.intent().is_idle());
    }

    #[test]
    fn commands_depend_on_view() {
        assert_eq!(command_for(KeyCode::KeyR, ViewMode::FirstPerson), Some(Command::Restart));
        assert_eq!(command_for(KeyCode::Tab, ViewMode::TopDown), Some(Command::ToggleView));
        assert_eq!(command_for(KeyCode::Escape, ViewMode::FirstPerson), Some(Command::Quit));

        assert_eq!(command_for(KeyCode::ArrowUp, ViewMode::FirstPerson), None);
        assert_eq!(
            command_for(KeyCode::ArrowUp, ViewMode::TopDown),
            Some(Command::GridStep(0, -1))
        );
        assert_eq!(
            command_for(KeyCode::KeyD, ViewMode::TopDown),
            Some(Command::GridStep(1, 0))
        );
        assert_eq!(command_for(KeyCode::KeyZ, ViewMode::TopDown), None);
    }
}
