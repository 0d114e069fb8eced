pub mod drag;
pub mod reveal;

pub use drag::DragState;
pub use reveal::RevealQueue;

use crate::canvas::bounds::BoundingBox;
use crate::canvas::model::Point;
use crate::recognize::wire::RecognitionRecord;
use serde::{Deserialize, Serialize};

/// Where new items land when nobody has dragged them yet.
pub const DEFAULT_ITEM_POSITION: Point = Point::new(10.0, 200.0);

const INLINE_OPEN: &str = "\\(";
const INLINE_CLOSE: &str = "\\)";
const LARGE_OPEN: &str = "\\LARGE{";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Always the fixed anchor.
    #[default]
    Fixed,
    /// Centre of the submitted ink, falling back to the anchor for a blank
    /// canvas.
    Centroid,
}

impl Placement {
    pub fn resolve(self, bbox: Option<&BoundingBox>) -> Point {
        match self {
            Placement::Fixed => DEFAULT_ITEM_POSITION,
            Placement::Centroid => bbox
                .and_then(BoundingBox::centroid)
                .unwrap_or(DEFAULT_ITEM_POSITION),
        }
    }
}

/// Inline TeX for one result, e.g. `\(\LARGE{x = 5}\)`.
pub fn render_markup(expression: &str, result_value: &str) -> String {
    format!("{INLINE_OPEN}{LARGE_OPEN}{expression} = {result_value}}}{INLINE_CLOSE}")
}

/// Strip the inline delimiters and size wrapper for plain-text display.
pub fn display_text(markup: &str) -> &str {
    let inner = markup
        .strip_prefix(INLINE_OPEN)
        .and_then(|s| s.strip_suffix(INLINE_CLOSE))
        .unwrap_or(markup);
    inner
        .strip_prefix(LARGE_OPEN)
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(inner)
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayItem {
    pub id: usize,
    pub markup: String,
    pub position: Point,
}

impl OverlayItem {
    pub fn display_text(&self) -> &str {
        display_text(&self.markup)
    }
}

/// Append-only list of revealed results. Ids are insertion indices and stay
/// valid until [`OverlayList::clear_all`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayList {
    items: Vec<OverlayItem>,
}

impl OverlayList {
    pub fn enqueue(&mut self, record: &RecognitionRecord) -> &OverlayItem {
        self.enqueue_at(record, DEFAULT_ITEM_POSITION)
    }

    pub fn enqueue_at(&mut self, record: &RecognitionRecord, position: Point) -> &OverlayItem {
        let id = self.items.len();
        self.items.push(OverlayItem {
            id,
            markup: render_markup(&record.expression, &record.result_value),
            position,
        });
        &self.items[id]
    }

    /// Move an item. Returns false for an unknown id.
    pub fn reposition(&mut self, id: usize, point: Point) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                item.position = point;
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, id: usize) -> Option<&OverlayItem> {
        self.items.get(id)
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> OverlayList {
        let mut list = OverlayList::default();
        for i in 0..n {
            list.enqueue(&RecognitionRecord::new(&format!("{i}+0"), &i.to_string(), false));
        }
        list
    }

    #[test]
    fn markup_wraps_expression_and_result() {
        let markup = render_markup("x+2", "7");
        assert_eq!(markup, "\\(\\LARGE{x+2 = 7}\\)");
        assert_eq!(display_text(&markup), "x+2 = 7");
        assert_eq!(display_text("plain"), "plain");
    }

    #[test]
    fn ids_are_insertion_indices_with_default_position() {
        let list = list_of(3);
        for (idx, item) in list.items().iter().enumerate() {
            assert_eq!(item.id, idx);
            assert_eq!(item.position, DEFAULT_ITEM_POSITION);
        }
    }

    #[test]
    fn reposition_only_moves_the_target() {
        let mut list = list_of(3);
        let before = list.clone();
        assert!(list.reposition(1, Point::new(42.5, 7.0)));
        assert_eq!(list.get(1).map(|i| i.position), Some(Point::new(42.5, 7.0)));
        assert_eq!(list.len(), 3);
        for (a, b) in list.items().iter().zip(before.items()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.markup, b.markup);
        }
        assert_eq!(list.get(0), before.get(0));
        assert_eq!(list.get(2), before.get(2));
    }

    #[test]
    fn reposition_unknown_id_is_ignored() {
        let mut list = list_of(1);
        assert!(!list.reposition(5, Point::new(1.0, 1.0)));
        assert_eq!(list, list_of(1));
    }

    #[test]
    fn clear_all_restarts_ids_at_default_position() {
        let mut list = list_of(2);
        list.reposition(0, Point::new(300.0, 300.0));
        list.clear_all();
        assert!(list.is_empty());
        let item = list.enqueue(&RecognitionRecord::new("1", "1", false));
        assert_eq!(item.id, 0);
        assert_eq!(item.position, DEFAULT_ITEM_POSITION);
    }

    #[test]
    fn centroid_placement_falls_back_on_empty_box() {
        let empty = BoundingBox {
            min_x: 100,
            min_y: 100,
            max_x: 0,
            max_y: 0,
        };
        let inked = BoundingBox {
            min_x: 10,
            min_y: 20,
            max_x: 30,
            max_y: 40,
        };
        assert_eq!(Placement::Centroid.resolve(Some(&empty)), DEFAULT_ITEM_POSITION);
        assert_eq!(Placement::Centroid.resolve(None), DEFAULT_ITEM_POSITION);
        assert_eq!(Placement::Centroid.resolve(Some(&inked)), Point::new(20.0, 30.0));
        assert_eq!(Placement::Fixed.resolve(Some(&inked)), DEFAULT_ITEM_POSITION);
    }
}
