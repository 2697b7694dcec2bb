//! Raylib input polling.
//!
//! [`poll_raylib_input`] reads the keyboard and mouse once per frame and
//! feeds transitions into [`InputState`] using `KeyboardEvent.code` names.
//! Edge state is flushed by the scheduler at the end of the frame.

use raylib::prelude::{KeyboardKey, MouseButton, RaylibHandle};

use crate::math::Vector2;
use crate::resources::input::InputState;

const KEY_CODES: &[(KeyboardKey, &str)] = &[
    (KeyboardKey::KEY_A, "KeyA"),
    (KeyboardKey::KEY_B, "KeyB"),
    (KeyboardKey::KEY_C, "KeyC"),
    (KeyboardKey::KEY_D, "KeyD"),
    (KeyboardKey::KEY_E, "KeyE"),
    (KeyboardKey::KEY_F, "KeyF"),
    (KeyboardKey::KEY_G, "KeyG"),
    (KeyboardKey::KEY_H, "KeyH"),
    (KeyboardKey::KEY_I, "KeyI"),
    (KeyboardKey::KEY_J, "KeyJ"),
    (KeyboardKey::KEY_K, "KeyK"),
    (KeyboardKey::KEY_L, "KeyL"),
    (KeyboardKey::KEY_M, "KeyM"),
    (KeyboardKey::KEY_N, "KeyN"),
    (KeyboardKey::KEY_O, "KeyO"),
    (KeyboardKey::KEY_P, "KeyP"),
    (KeyboardKey::KEY_Q, "KeyQ"),
    (KeyboardKey::KEY_R, "KeyR"),
    (KeyboardKey::KEY_S, "KeyS"),
    (KeyboardKey::KEY_T, "KeyT"),
    (KeyboardKey::KEY_U, "KeyU"),
    (KeyboardKey::KEY_V, "KeyV"),
    (KeyboardKey::KEY_W, "KeyW"),
    (KeyboardKey::KEY_X, "KeyX"),
    (KeyboardKey::KEY_Y, "KeyY"),
    (KeyboardKey::KEY_Z, "KeyZ"),
    (KeyboardKey::KEY_ZERO, "Digit0"),
    (KeyboardKey::KEY_ONE, "Digit1"),
    (KeyboardKey::KEY_TWO, "Digit2"),
    (KeyboardKey::KEY_THREE, "Digit3"),
    (KeyboardKey::KEY_FOUR, "Digit4"),
    (KeyboardKey::KEY_FIVE, "Digit5"),
    (KeyboardKey::KEY_SIX, "Digit6"),
    (KeyboardKey::KEY_SEVEN, "Digit7"),
    (KeyboardKey::KEY_EIGHT, "Digit8"),
    (KeyboardKey::KEY_NINE, "Digit9"),
    (KeyboardKey::KEY_UP, "ArrowUp"),
    (KeyboardKey::KEY_DOWN, "ArrowDown"),
    (KeyboardKey::KEY_LEFT, "ArrowLeft"),
    (KeyboardKey::KEY_RIGHT, "ArrowRight"),
    (KeyboardKey::KEY_SPACE, "Space"),
    (KeyboardKey::KEY_ENTER, "Enter"),
    (KeyboardKey::KEY_ESCAPE, "Escape"),
    (KeyboardKey::KEY_TAB, "Tab"),
    (KeyboardKey::KEY_BACKSPACE, "Backspace"),
    (KeyboardKey::KEY_LEFT_SHIFT, "ShiftLeft"),
    (KeyboardKey::KEY_RIGHT_SHIFT, "ShiftRight"),
    (KeyboardKey::KEY_LEFT_CONTROL, "ControlLeft"),
    (KeyboardKey::KEY_RIGHT_CONTROL, "ControlRight"),
];

const BUTTON_CODES: &[(MouseButton, &str)] = &[
    (MouseButton::MOUSE_BUTTON_LEFT, "MouseLeft"),
    (MouseButton::MOUSE_BUTTON_RIGHT, "MouseRight"),
    (MouseButton::MOUSE_BUTTON_MIDDLE, "MouseMiddle"),
];

/// Update `input` from the current raylib keyboard and mouse state.
pub fn poll_raylib_input(rl: &RaylibHandle, input: &mut InputState) {
    for (key, code) in KEY_CODES {
        if rl.is_key_down(*key) {
            input.key_down(code);
        } else if input.is_pressed(code) {
            input.key_up(code);
        }
    }
    for (button, code) in BUTTON_CODES {
        if rl.is_mouse_button_down(*button) {
            input.key_down(code);
        } else if input.is_pressed(code) {
            input.key_up(code);
        }
    }
    let mouse = rl.get_mouse_position();
    input.pointer_moved(Vector2::new(mouse.x, mouse.y));
}
