mod canvas_view;
mod overlay_view;
mod toolbar;

pub use toolbar::ToolbarAction;

use crate::canvas::model::Color;
use crate::recognize::client::RecognitionClient;
use crate::recognize::worker::{spawn_submission, RecognitionReply};
use crate::session::{ResponseOutcome, Session, SessionConfig};
use crate::settings::Settings;
use crate::toast_log::append_toast_log;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::time::Instant;

fn push_toast(toasts: &mut Toasts, toast: Toast) {
    append_toast_log(toast.text.text());
    toasts.add(toast);
}

pub(crate) fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

pub struct MathCanvasApp {
    pub session: Session,
    client: Option<RecognitionClient>,
    client_error: Option<String>,
    reply_tx: Sender<RecognitionReply>,
    reply_rx: Receiver<RecognitionReply>,
    toasts: Toasts,
    pub enable_toasts: bool,
    pub toast_duration: f32,
    swatches: Vec<Color>,
    canvas: canvas_view::CanvasTexture,
}

impl MathCanvasApp {
    pub fn new(settings: &Settings, api_url: String) -> Self {
        let (client, client_error) =
            match RecognitionClient::new(&api_url, settings.request_timeout()) {
                Ok(client) => {
                    tracing::info!(endpoint = %client.endpoint(), "recognition client ready");
                    (Some(client), None)
                }
                Err(e) => {
                    tracing::error!("recognition client unavailable: {e:#}");
                    (None, Some(format!("{e:#}")))
                }
            };
        let (reply_tx, reply_rx) = channel();
        Self {
            session: Session::new(SessionConfig::from_settings(settings)),
            client,
            client_error,
            reply_tx,
            reply_rx,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            enable_toasts: settings.enable_toasts,
            toast_duration: settings.toast_duration,
            swatches: settings.swatches.clone(),
            canvas: canvas_view::CanvasTexture::default(),
        }
    }

    pub fn add_toast(&mut self, toast: Toast) {
        if self.enable_toasts {
            push_toast(&mut self.toasts, toast);
        }
    }

    fn notify(&mut self, kind: ToastKind, text: String) {
        let duration = self.toast_duration as f64;
        self.add_toast(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(duration),
        });
    }

    /// Kick off a recognition request for the current drawing.
    pub fn run(&mut self, ctx: &egui::Context) {
        let Some(client) = self.client.clone() else {
            let reason = self
                .client_error
                .clone()
                .unwrap_or_else(|| "no recognition service configured".into());
            self.notify(ToastKind::Error, format!("Cannot run: {reason}"));
            return;
        };
        let Some(submission) = self.session.begin_submission() else {
            return;
        };
        let ctx = ctx.clone();
        spawn_submission(client, submission, self.reply_tx.clone(), move || {
            ctx.request_repaint()
        });
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Apply every reply that has arrived since the last frame.
    pub fn poll_replies(&mut self, now: Instant) {
        loop {
            match self.reply_rx.try_recv() {
                Ok(reply) => match self.session.apply_reply(reply, now) {
                    ResponseOutcome::Applied { records: 0, .. } => {
                        self.notify(ToastKind::Info, "Nothing recognized".into());
                    }
                    ResponseOutcome::Applied { .. } | ResponseOutcome::Stale => {}
                    ResponseOutcome::Failed(e) => {
                        self.notify(
                            ToastKind::Error,
                            format!("Recognition failed, try again: {e}"),
                        );
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }
}

impl eframe::App for MathCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.poll_replies(now);
        self.session.tick(now);
        if let Some(due) = self.session.next_reveal_due() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }

        let action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, &mut self.session, &self.swatches))
            .inner;
        match action {
            Some(ToolbarAction::Reset) => self.reset(),
            Some(ToolbarAction::Run) => self.run(ctx),
            None => {}
        }

        let origin = egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| canvas_view::show(ui, &mut self.session, &mut self.canvas))
            .inner;

        overlay_view::show(ctx, &mut self.session, origin);

        if self.enable_toasts {
            self.toasts.show(ctx);
        }
    }
}
