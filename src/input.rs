use crate::pos::Pos;
use nannou::event::{MouseButton, TouchPhase, WindowEvent};
use nannou::geom::Rect;

/// Which family of window events drives the theremin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Mouse,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Start,
    Move,
    End,
    /// Touch only: the platform took the contact away.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub phase: Phase,
    pub pos: Pos,
}

impl InputMode {
    /// The phases a contact listens for between its start and its end.
    pub fn contact_phases(self) -> &'static [Phase] {
        match self {
            InputMode::Mouse => &[Phase::Move, Phase::End],
            InputMode::Touch => &[Phase::Move, Phase::End, Phase::Cancel],
        }
    }

    /// Contact event for a window event, or `None` if this mode ignores it.
    /// Mouse buttons carry no position, so `cursor` supplies it.
    pub fn translate(self, event: &WindowEvent, cursor: Pos, window: Rect) -> Option<ContactEvent> {
        let (phase, pos) = match (self, event) {
            (InputMode::Mouse, WindowEvent::MousePressed(MouseButton::Left)) => (Phase::Start, cursor),
            (InputMode::Mouse, WindowEvent::MouseReleased(MouseButton::Left)) => (Phase::End, cursor),
            (InputMode::Mouse, WindowEvent::MouseMoved(point)) => {
                (Phase::Move, Pos::from_window(*point, window))
            }
            (InputMode::Touch, WindowEvent::Touch(touch)) => {
                let phase = match touch.phase {
                    TouchPhase::Started => Phase::Start,
                    TouchPhase::Moved => Phase::Move,
                    TouchPhase::Ended => Phase::End,
                    TouchPhase::Cancelled => Phase::Cancel,
                };
                (phase, Pos::from_window(touch.position, window))
            }
            _ => return None,
        };
        Some(ContactEvent { phase, pos })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nannou::event::TouchEvent;
    use nannou::geom::pt2;
    use pretty_assertions::assert_eq;

    fn window() -> Rect {
        Rect::from_w_h(200.0, 100.0)
    }

    #[test]
    fn mouse_press_uses_cursor_position() {
        let cursor = Pos::new(20.0, 30.0);
        let event = InputMode::Mouse
            .translate(&WindowEvent::MousePressed(MouseButton::Left), cursor, window())
            .unwrap();
        assert_eq!(event, ContactEvent { phase: Phase::Start, pos: cursor });
    }

    #[test]
    fn mouse_mode_ignores_other_buttons_and_touches() {
        let cursor = Pos::default();
        assert_eq!(
            InputMode::Mouse.translate(&WindowEvent::MousePressed(MouseButton::Right), cursor, window()),
            None
        );
        let touch = WindowEvent::Touch(TouchEvent {
            id: 0,
            phase: TouchPhase::Started,
            position: pt2(0.0, 0.0),
        });
        assert_eq!(InputMode::Mouse.translate(&touch, cursor, window()), None);
    }

    #[test]
    fn touch_phases_map_across() {
        let touch = WindowEvent::Touch(TouchEvent {
            id: 3,
            phase: TouchPhase::Cancelled,
            position: pt2(-100.0, 50.0),
        });
        let event = InputMode::Touch.translate(&touch, Pos::default(), window()).unwrap();
        assert_eq!(event.phase, Phase::Cancel);
        assert_eq!(event.pos, Pos::new(0.0, 0.0));
        assert_eq!(
            InputMode::Touch.translate(&WindowEvent::MousePressed(MouseButton::Left), Pos::default(), window()),
            None
        );
    }

    #[test]
    fn only_touch_contacts_listen_for_cancel() {
        assert!(!InputMode::Mouse.contact_phases().contains(&Phase::Cancel));
        assert!(InputMode::Touch.contact_phases().contains(&Phase::Cancel));
    }
}
