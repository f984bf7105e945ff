use crate::action::{Action, ROTATE_STEP_DEGREES, ZOOM_STEP};

/// Keys the demos react to. Window backends translate their own key codes
/// into this set and drop everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    P,
    Z,
    X,
    Escape,
    F1,
}

/// Map a key-down event to its action.
pub fn action_for(key: Key) -> Action {
    let action = match key {
        Key::Left => Action::Rotate {
            pitch: 0.0,
            yaw: -ROTATE_STEP_DEGREES,
        },
        Key::Right => Action::Rotate {
            pitch: 0.0,
            yaw: ROTATE_STEP_DEGREES,
        },
        Key::Up => Action::Rotate {
            pitch: -ROTATE_STEP_DEGREES,
            yaw: 0.0,
        },
        Key::Down => Action::Rotate {
            pitch: ROTATE_STEP_DEGREES,
            yaw: 0.0,
        },
        Key::Space => Action::ToggleAutoRotate,
        Key::P => Action::TogglePath,
        Key::Z => Action::Zoom(ZOOM_STEP),
        Key::X => Action::Zoom(-ZOOM_STEP),
        Key::Escape => Action::Quit,
        Key::F1 => Action::ToggleOverlay,
    };
    tracing::debug!(?key, ?action, "key mapped");
    action
}

/// Control lines printed at startup and shown in the overlay.
pub fn controls_help() -> &'static [&'static str] {
    &[
        "Arrow keys: Rotate",
        "Z/X: Zoom in/out",
        "SPACE: Toggle auto-rotation",
        "P: Toggle paths visibility",
        "F1: Toggle help overlay",
        "ESC: Quit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_rotate_by_five_degrees() {
        assert_eq!(
            action_for(Key::Left),
            Action::Rotate {
                pitch: 0.0,
                yaw: -5.0
            }
        );
        assert_eq!(
            action_for(Key::Right),
            Action::Rotate {
                pitch: 0.0,
                yaw: 5.0
            }
        );
        assert_eq!(
            action_for(Key::Up),
            Action::Rotate {
                pitch: -5.0,
                yaw: 0.0
            }
        );
        assert_eq!(
            action_for(Key::Down),
            Action::Rotate {
                pitch: 5.0,
                yaw: 0.0
            }
        );
    }

    #[test]
    fn zoom_keys_are_opposite() {
        assert_eq!(action_for(Key::Z), Action::Zoom(1));
        assert_eq!(action_for(Key::X), Action::Zoom(-1));
    }

    #[test]
    fn toggles_and_quit() {
        assert_eq!(action_for(Key::Space), Action::ToggleAutoRotate);
        assert_eq!(action_for(Key::P), Action::TogglePath);
        assert_eq!(action_for(Key::F1), Action::ToggleOverlay);
        assert_eq!(action_for(Key::Escape), Action::Quit);
    }

    #[test]
    fn help_mentions_every_binding() {
        let help = controls_help().join("\n");
        for needle in ["Arrow", "Z/X", "SPACE", "P:", "ESC"] {
            assert!(help.contains(needle), "missing {needle}");
        }
    }
}
