use crate::canvas::model::Point;

/// Idle → Dragging → Idle.
///
/// While dragging the item is drawn at its committed position plus the
/// pointer delta since the press; nothing is written to the overlay list
/// until release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        id: usize,
        committed: Point,
        grab: Point,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn dragged_id(&self) -> Option<usize> {
        match self {
            DragState::Dragging { id, .. } => Some(*id),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed on item `id`. A press while already dragging restarts
    /// the drag on the new item.
    pub fn press(&mut self, id: usize, committed: Point, pointer: Point) {
        *self = DragState::Dragging {
            id,
            committed,
            grab: pointer,
        };
    }

    /// Where item `id` should be drawn this frame, or `None` when it is not
    /// the one being dragged.
    pub fn preview_position(&self, id: usize, pointer: Point) -> Option<Point> {
        match *self {
            DragState::Dragging {
                id: active,
                committed,
                grab,
            } if active == id => Some(Point::new(
                committed.x + (pointer.x - grab.x),
                committed.y + (pointer.y - grab.y),
            )),
            _ => None,
        }
    }

    /// Pointer released: the release coordinate becomes the item's new
    /// absolute position.
    pub fn release(&mut self, pointer: Point) -> Option<(usize, Point)> {
        let id = self.dragged_id()?;
        *self = DragState::Idle;
        Some((id, pointer))
    }

    /// Pointer left the window mid-drag. The item snaps back to its
    /// committed position.
    pub fn cancel(&mut self) -> Option<usize> {
        let id = self.dragged_id()?;
        *self = DragState::Idle;
        Some(id)
    }
}
