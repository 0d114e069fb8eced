use crate::canvas::model::{Point, Tool};
use crate::session::Session;
use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions};

/// GPU copy of the raster, re-uploaded whenever the surface revision moves.
#[derive(Default)]
pub(super) struct CanvasTexture {
    texture: Option<TextureHandle>,
    revision: Option<u64>,
}

impl CanvasTexture {
    fn sync(&mut self, ctx: &egui::Context, session: &Session) {
        let surface = session.surface();
        let Some(raster) = surface.raster() else {
            return;
        };
        if self.revision == Some(surface.revision()) && self.texture.is_some() {
            return;
        }
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [raster.width() as usize, raster.height() as usize],
            raster.pixels(),
        );
        match self.texture.as_mut() {
            Some(tex) => tex.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST));
            }
        }
        self.revision = Some(surface.revision());
    }
}

/// Paint the canvas and feed pointer input to the surface. Returns the
/// screen position of the canvas origin.
pub(super) fn show(ui: &mut egui::Ui, session: &mut Session, canvas: &mut CanvasTexture) -> Pos2 {
    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
    let rect = response.rect;
    let size = (
        rect.width().max(1.0).round() as u32,
        rect.height().max(1.0).round() as u32,
    );
    if session.surface().raster().map(|r| r.size()) != Some(size) {
        tracing::debug!(width = size.0, height = size.1, "canvas mounted");
        session.surface_mut().mount(size.0, size.1);
    }

    let to_canvas = |pos: Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);
    let (pressed, down, released, pointer) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });
    let surface = session.surface_mut();
    match pointer {
        Some(pos) if pressed && response.hovered() => surface.begin_stroke(to_canvas(pos)),
        Some(pos) if down && surface.is_pointer_down() => {
            if rect.contains(pos) {
                surface.extend_stroke(to_canvas(pos));
            } else {
                surface.pointer_left();
            }
        }
        None if surface.is_pointer_down() => surface.pointer_left(),
        _ => {}
    }
    if released {
        surface.end_stroke();
    }

    canvas.sync(ui.ctx(), session);
    painter.rect_filled(rect, 0.0, Color32::BLACK);
    if let Some(tex) = &canvas.texture {
        painter.image(
            tex.id(),
            rect,
            Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }
    let stroke = session.surface().stroke();
    if stroke.tool == Tool::Erase {
        if let Some(pos) = response.hover_pos() {
            let side = stroke.eraser_radius as f32 * 2.0 + 1.0;
            painter.rect_stroke(
                Rect::from_center_size(pos, egui::vec2(side, side)),
                0.0,
                Stroke::new(1.0, Color32::GRAY),
            );
        }
    }
    rect.min
}
