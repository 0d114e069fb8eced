use crate::canvas::model::Point;
use crate::session::Session;
use eframe::egui::{self, Color32, Pos2, RichText, Sense};

const ITEM_TEXT_SIZE: f32 = 28.0;

/// Draw every revealed result as a draggable card above the canvas.
pub(super) fn show(ctx: &egui::Context, session: &mut Session, origin: Pos2) {
    let to_canvas = |pos: Pos2| Point::new(pos.x - origin.x, pos.y - origin.y);
    let (pointer, pointer_gone) = ctx.input(|i| {
        (
            i.pointer.interact_pos().or_else(|| i.pointer.hover_pos()),
            i.events.iter().any(|e| matches!(e, egui::Event::PointerGone)),
        )
    });
    let pointer = pointer.map(to_canvas);

    if pointer_gone {
        if let Some(id) = session.cancel_drag() {
            tracing::debug!(id, "drag cancelled, pointer left window");
        }
    }

    let generation = session.generation();
    let mut pressed = None;
    let mut released = None;
    for item in session.overlay().items() {
        let Some(pos) = session.item_position(item.id, pointer) else {
            continue;
        };
        let area = egui::Area::new(egui::Id::new(("overlay_item", generation, item.id)))
            .fixed_pos(Pos2::new(origin.x + pos.x, origin.y + pos.y))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(Color32::WHITE)
                    .rounding(5.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(
                                RichText::new(item.display_text())
                                    .color(Color32::BLACK)
                                    .size(ITEM_TEXT_SIZE),
                            )
                            .selectable(false)
                            .sense(Sense::drag()),
                        )
                        .on_hover_text(&item.markup)
                    })
                    .inner
            });
        let response = area.inner;
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                pressed = Some((item.id, to_canvas(pos)));
            }
        }
        if response.drag_stopped() && session.drag().dragged_id() == Some(item.id) {
            released = response.interact_pointer_pos().map(to_canvas).or(pointer);
        }
    }

    if let Some((id, pos)) = pressed {
        session.press_item(id, pos);
    }
    if let Some(pos) = released {
        if let Some(id) = session.release_drag(pos) {
            tracing::debug!(id, x = pos.x, y = pos.y, "overlay item moved");
        }
    }
    if session.drag().is_dragging() {
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
    }
}
