use crate::canvas::model::{Color, Point, StrokeState, Tool};
use crate::canvas::raster::Raster;

/// Pointer-driven drawing surface.
///
/// Before [`CanvasSurface::mount`] there is no raster and every operation is
/// a no-op. Mutations bump `revision` so the view knows when to re-upload.
#[derive(Debug, Clone, Default)]
pub struct CanvasSurface {
    raster: Option<Raster>,
    stroke: StrokeState,
    last_point: Option<Point>,
    revision: u64,
}

impl CanvasSurface {
    pub fn new(stroke: StrokeState) -> Self {
        Self {
            raster: None,
            stroke,
            last_point: None,
            revision: 0,
        }
    }

    pub fn mount(&mut self, width: u32, height: u32) {
        match self.raster.as_mut() {
            Some(raster) => raster.resize(width, height),
            None => self.raster = Some(Raster::new(width, height)),
        }
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn is_mounted(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn stroke(&self) -> &StrokeState {
        &self.stroke
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.stroke.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.stroke.color = color;
    }

    pub fn set_stroke_width(&mut self, width: u32) {
        self.stroke.stroke_width = width.max(1);
    }

    pub fn set_eraser_radius(&mut self, radius: u32) {
        self.stroke.eraser_radius = radius.max(1);
    }

    pub fn is_pointer_down(&self) -> bool {
        self.stroke.pointer_down
    }

    pub fn begin_stroke(&mut self, point: Point) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        match self.stroke.tool {
            Tool::Draw => {
                raster.stamp_dot(point, self.stroke.color, self.stroke.stroke_width);
            }
            Tool::Erase => raster.clear_square(point, self.stroke.eraser_radius),
        }
        self.stroke.pointer_down = true;
        self.last_point = Some(point);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Continue the active stroke. Stray moves without a pointer-down are
    /// ignored.
    pub fn extend_stroke(&mut self, point: Point) {
        if !self.stroke.pointer_down {
            return;
        }
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        match self.stroke.tool {
            Tool::Draw => {
                let from = self.last_point.unwrap_or(point);
                raster.paint_segment(from, point, self.stroke.color, self.stroke.stroke_width);
            }
            Tool::Erase => raster.clear_square(point, self.stroke.eraser_radius),
        }
        self.last_point = Some(point);
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn end_stroke(&mut self) {
        self.stroke.pointer_down = false;
        self.last_point = None;
    }

    /// Pointer left the surface; same as releasing it.
    pub fn pointer_left(&mut self) {
        self.end_stroke();
    }

    pub fn erase(&mut self, point: Point, radius: u32) {
        if let Some(raster) = self.raster.as_mut() {
            raster.clear_square(point, radius);
            self.revision = self.revision.wrapping_add(1);
        }
    }

    pub fn clear(&mut self) {
        if let Some(raster) = self.raster.as_mut() {
            raster.clear();
            self.revision = self.revision.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> CanvasSurface {
        let mut surface = CanvasSurface::new(StrokeState::default());
        surface.mount(32, 32);
        surface
    }

    fn is_blank(surface: &CanvasSurface) -> bool {
        surface.raster().map(Raster::is_blank).unwrap_or(true)
    }

    #[test]
    fn unmounted_surface_ignores_everything() {
        let mut surface = CanvasSurface::new(StrokeState::default());
        surface.begin_stroke(Point::new(1.0, 1.0));
        surface.extend_stroke(Point::new(5.0, 5.0));
        surface.erase(Point::new(1.0, 1.0), 3);
        surface.clear();
        assert!(!surface.is_mounted());
        assert!(!surface.is_pointer_down());
        assert_eq!(surface.revision(), 0);
    }

    #[test]
    fn move_without_pointer_down_is_ignored() {
        let mut surface = mounted();
        surface.extend_stroke(Point::new(4.0, 4.0));
        surface.extend_stroke(Point::new(20.0, 20.0));
        assert!(is_blank(&surface));
    }

    #[test]
    fn stroke_paints_until_pointer_up() {
        let mut surface = mounted();
        surface.begin_stroke(Point::new(4.0, 4.0));
        surface.extend_stroke(Point::new(20.0, 4.0));
        surface.end_stroke();
        let after_stroke = surface.raster().cloned();
        surface.extend_stroke(Point::new(20.0, 28.0));
        assert!(!is_blank(&surface));
        assert_eq!(surface.raster().cloned(), after_stroke);
    }

    #[test]
    fn erase_tool_clears_under_pointer() {
        let mut surface = mounted();
        surface.begin_stroke(Point::new(2.0, 10.0));
        surface.extend_stroke(Point::new(30.0, 10.0));
        surface.end_stroke();

        surface.set_tool(Tool::Erase);
        surface.set_eraser_radius(4);
        surface.begin_stroke(Point::new(2.0, 10.0));
        for x in (2..=30).step_by(2) {
            surface.extend_stroke(Point::new(x as f32, 10.0));
        }
        surface.end_stroke();
        assert!(is_blank(&surface));
    }

    #[test]
    fn erase_works_without_active_stroke() {
        let mut surface = mounted();
        surface.begin_stroke(Point::new(10.0, 10.0));
        surface.end_stroke();
        surface.erase(Point::new(10.0, 10.0), 5);
        assert!(is_blank(&surface));
    }

    #[test]
    fn pointer_leave_ends_stroke() {
        let mut surface = mounted();
        surface.begin_stroke(Point::new(10.0, 10.0));
        assert!(surface.is_pointer_down());
        surface.pointer_left();
        assert!(!surface.is_pointer_down());
    }

    #[test]
    fn clear_after_any_drawing_is_blank_and_idempotent() {
        let mut surface = mounted();
        surface.set_stroke_width(6);
        surface.begin_stroke(Point::new(0.0, 0.0));
        surface.extend_stroke(Point::new(31.0, 31.0));
        surface.set_color(Color::rgb(255, 0, 0));
        surface.extend_stroke(Point::new(0.0, 31.0));
        surface.end_stroke();
        surface.clear();
        assert!(is_blank(&surface));
        surface.clear();
        assert!(is_blank(&surface));
    }

    #[test]
    fn remount_keeps_existing_ink() {
        let mut surface = mounted();
        surface.begin_stroke(Point::new(5.0, 5.0));
        surface.end_stroke();
        surface.mount(64, 64);
        assert_eq!(surface.raster().map(Raster::size), Some((64, 64)));
        assert!(!is_blank(&surface));
    }
}
