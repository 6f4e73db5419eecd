//! Pan drag state machine.

use crate::layout::Point;

/// Pan drag interaction state for the viewport.
///
/// A drag session spans pointer-down to pointer-up on the container. Any
/// pointer movement in between turns the session into a pan; without
/// movement the release counts as a click.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanDragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging; `start` is the pointer page position at drag start minus
    /// the translation at that time
    Dragging { start: Point, moved: bool },
}

/// How a drag session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEnd {
    /// Pointer never moved between down and up
    Click,
    /// Pointer moved at least once
    Pan,
}

impl PanDragState {
    /// Check if currently dragging
    pub fn is_dragging(&self) -> bool {
        matches!(self, PanDragState::Dragging { .. })
    }

    /// Start a session at `pointer` with the current `translation`.
    pub fn start_drag(&mut self, pointer: Point, translation: Point) {
        *self = PanDragState::Dragging {
            start: pointer - translation,
            moved: false,
        };
    }

    /// Record a pointer move and return the translation it asks for.
    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        match self {
            PanDragState::Dragging { start, moved } => {
                *moved = true;
                Some(pointer - *start)
            }
            PanDragState::Idle => None,
        }
    }

    /// End the session; `None` if no session was open.
    pub fn stop_drag(&mut self) -> Option<DragEnd> {
        let end = match *self {
            PanDragState::Dragging { moved: true, .. } => Some(DragEnd::Pan),
            PanDragState::Dragging { moved: false, .. } => Some(DragEnd::Click),
            PanDragState::Idle => None,
        };
        *self = PanDragState::Idle;
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_without_move_is_click() {
        let mut drag = PanDragState::default();
        drag.start_drag(Point::new(100.0, 100.0), Point::ORIGIN);
        assert!(drag.is_dragging());

        assert_eq!(drag.stop_drag(), Some(DragEnd::Click));
        assert_eq!(drag, PanDragState::Idle);
    }

    #[test]
    fn test_move_recovers_absolute_translation() {
        let mut drag = PanDragState::default();
        drag.start_drag(Point::new(400.0, 300.0), Point::new(-400.0, -300.0));

        assert_eq!(
            drag.drag_to(Point::new(410.0, 305.0)),
            Some(Point::new(-390.0, -295.0))
        );
        assert_eq!(drag.stop_drag(), Some(DragEnd::Pan));
    }

    #[test]
    fn test_single_move_defeats_click() {
        let mut drag = PanDragState::default();
        drag.start_drag(Point::new(10.0, 10.0), Point::ORIGIN);
        drag.drag_to(Point::new(10.0, 10.0));
        assert_eq!(drag.stop_drag(), Some(DragEnd::Pan));
    }

    #[test]
    fn test_idle_ignores_moves_and_release() {
        let mut drag = PanDragState::Idle;
        assert_eq!(drag.drag_to(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.stop_drag(), None);
    }

    #[test]
    fn test_new_session_resets_moved_flag() {
        let mut drag = PanDragState::default();
        drag.start_drag(Point::ORIGIN, Point::ORIGIN);
        drag.drag_to(Point::new(5.0, 5.0));
        drag.stop_drag();

        drag.start_drag(Point::ORIGIN, Point::ORIGIN);
        assert_eq!(drag.stop_drag(), Some(DragEnd::Click));
    }
}
