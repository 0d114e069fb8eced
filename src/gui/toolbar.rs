use super::color32;
use crate::canvas::model::{Color, Tool};
use crate::session::Session;
use eframe::egui::{self, Color32, RichText, Stroke};

const MAX_STROKE_WIDTH: u32 = 30;
const MAX_ERASER_RADIUS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Reset,
    Run,
}

pub(super) fn show(ui: &mut egui::Ui, session: &mut Session, swatches: &[Color]) -> Option<ToolbarAction> {
    let mut action = None;
    let stroke = *session.surface().stroke();

    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            action = Some(ToolbarAction::Reset);
        }
        ui.separator();

        let mut tool = stroke.tool;
        ui.selectable_value(&mut tool, Tool::Draw, "Draw");
        ui.selectable_value(&mut tool, Tool::Erase, "Erase");
        if tool != stroke.tool {
            session.surface_mut().set_tool(tool);
        }
        ui.separator();

        for (idx, color) in swatches.iter().enumerate() {
            let selected = stroke.color == *color;
            let button = egui::Button::new("   ")
                .fill(color32(*color))
                .stroke(if selected {
                    Stroke::new(2.0, Color32::WHITE)
                } else {
                    Stroke::new(1.0, Color32::DARK_GRAY)
                });
            if ui.add(button).on_hover_text(color.to_string()).clicked() {
                tracing::debug!(swatch = idx, color = %color, "color selected");
                session.surface_mut().set_color(*color);
                session.surface_mut().set_tool(Tool::Draw);
            }
        }
        ui.separator();

        match stroke.tool {
            Tool::Draw => {
                let mut width = stroke.stroke_width;
                ui.add(egui::Slider::new(&mut width, 1..=MAX_STROKE_WIDTH).text("Width"));
                if width != stroke.stroke_width {
                    session.surface_mut().set_stroke_width(width);
                }
            }
            Tool::Erase => {
                let mut radius = stroke.eraser_radius;
                ui.add(egui::Slider::new(&mut radius, 1..=MAX_ERASER_RADIUS).text("Eraser"));
                if radius != stroke.eraser_radius {
                    session.surface_mut().set_eraser_radius(radius);
                }
            }
        }
        ui.separator();

        let pending = session.is_pending();
        if ui.add_enabled(!pending, egui::Button::new("Run")).clicked() {
            action = Some(ToolbarAction::Run);
        }
        if pending {
            ui.spinner();
        }

        if let Some(err) = session.last_error() {
            ui.label(RichText::new(format!("Recognition failed: {err}")).color(Color32::LIGHT_RED));
        } else if !session.vars().is_empty() {
            let summary = session
                .vars()
                .iter()
                .map(|(name, value)| format!("{name} = {value}"))
                .collect::<Vec<_>>()
                .join(", ");
            ui.label(RichText::new(summary).weak());
        }
    });

    if action.is_none() && ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.ctrl) {
        action = Some(ToolbarAction::Run);
    }
    action
}
