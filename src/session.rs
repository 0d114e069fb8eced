//! Application state for one canvas window.
//!
//! Holds the drawing surface, the variable environment, the overlay list and
//! its reveal queue, plus the request generation used to drop replies that
//! arrive after a reset.

use crate::canvas::bounds::scan;
use crate::canvas::model::{Color, Point, StrokeState};
use crate::canvas::surface::CanvasSurface;
use crate::overlay::{DragState, OverlayList, Placement, RevealQueue};
use crate::recognize::error::RecognizeError;
use crate::recognize::vars::VariableEnvironment;
use crate::recognize::worker::{RecognitionReply, Submission};
use crate::settings::Settings;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub stroke: StrokeState,
    pub reveal_delay: Duration,
    pub placement: Placement,
    pub flatten_background: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stroke: StrokeState::default(),
            reveal_delay: crate::overlay::reveal::DEFAULT_REVEAL_DELAY,
            placement: Placement::Fixed,
            flatten_background: false,
        }
    }
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            stroke: settings.initial_stroke(),
            reveal_delay: settings.reveal_delay(),
            placement: settings.placement,
            flatten_background: settings.flatten_background,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    /// Issued before the last reset; nothing was touched.
    Stale,
    Failed(RecognizeError),
    Applied { records: usize, assignments: usize },
}

#[derive(Debug)]
pub struct Session {
    surface: CanvasSurface,
    vars: VariableEnvironment,
    overlay: OverlayList,
    reveal: RevealQueue,
    drag: DragState,
    placement: Placement,
    flatten_background: bool,
    generation: u64,
    pending: Option<u64>,
    last_error: Option<RecognizeError>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            surface: CanvasSurface::new(config.stroke),
            vars: VariableEnvironment::default(),
            overlay: OverlayList::default(),
            reveal: RevealQueue::new(config.reveal_delay),
            drag: DragState::Idle,
            placement: config.placement,
            flatten_background: config.flatten_background,
            generation: 0,
            pending: None,
            last_error: None,
        }
    }

    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    pub fn vars(&self) -> &VariableEnvironment {
        &self.vars
    }

    pub fn overlay(&self) -> &OverlayList {
        &self.overlay
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&RecognizeError> {
        self.last_error.as_ref()
    }

    pub fn pending_reveals(&self) -> usize {
        self.reveal.len()
    }

    pub fn next_reveal_due(&self) -> Option<Instant> {
        self.reveal.next_due()
    }

    /// Clear the drawing, the variables and every overlay item. Any request
    /// still in flight is orphaned.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.surface.end_stroke();
        self.vars.clear();
        self.overlay.clear_all();
        self.reveal.clear();
        self.drag = DragState::Idle;
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        self.last_error = None;
        tracing::info!(generation = self.generation, "session reset");
    }

    /// Snapshot the canvas and variables for a request. Returns `None` while
    /// another request is outstanding or before the canvas is mounted.
    pub fn begin_submission(&mut self) -> Option<Submission> {
        if self.pending.is_some() {
            tracing::debug!("submission ignored, request already in flight");
            return None;
        }
        let raster = self.surface.raster()?;
        let raster = if self.flatten_background {
            raster.flattened_onto(Color::BLACK)
        } else {
            raster.clone()
        };
        self.pending = Some(self.generation);
        self.last_error = None;
        tracing::info!(
            generation = self.generation,
            width = raster.width(),
            height = raster.height(),
            "submitting canvas"
        );
        Some(Submission {
            generation: self.generation,
            raster,
            vars: self.vars.clone(),
        })
    }

    pub fn apply_reply(&mut self, reply: RecognitionReply, now: Instant) -> ResponseOutcome {
        if reply.generation != self.generation {
            tracing::info!(
                reply = reply.generation,
                current = self.generation,
                "discarding stale recognition reply"
            );
            return ResponseOutcome::Stale;
        }
        self.pending = None;

        let records = match reply.result {
            Ok(records) => records,
            Err(e) => {
                self.last_error = Some(e.clone());
                return ResponseOutcome::Failed(e);
            }
        };

        let assignments = self.vars.apply_assignments(&records);
        let bbox = self.surface.raster().map(scan);
        let anchor = self.placement.resolve(bbox.as_ref());
        let count = records.len();
        self.reveal.schedule(records, anchor, now);
        self.surface.clear();
        self.tick(now);
        ResponseOutcome::Applied {
            records: count,
            assignments,
        }
    }

    /// Move every record whose reveal time has come onto the overlay.
    pub fn tick(&mut self, now: Instant) -> usize {
        let ready = self.reveal.drain_due(now);
        for (record, anchor) in &ready {
            let item = self.overlay.enqueue_at(record, *anchor);
            tracing::debug!(id = item.id, markup = %item.markup, "overlay item revealed");
        }
        ready.len()
    }

    pub fn press_item(&mut self, id: usize, pointer: Point) {
        if let Some(item) = self.overlay.get(id) {
            self.drag.press(id, item.position, pointer);
        }
    }

    /// Position to draw item `id` at, following the pointer while it is the
    /// dragged item.
    pub fn item_position(&self, id: usize, pointer: Option<Point>) -> Option<Point> {
        let committed = self.overlay.get(id)?.position;
        Some(
            pointer
                .and_then(|p| self.drag.preview_position(id, p))
                .unwrap_or(committed),
        )
    }

    pub fn release_drag(&mut self, pointer: Point) -> Option<usize> {
        let (id, position) = self.drag.release(pointer)?;
        self.overlay.reposition(id, position).then_some(id)
    }

    pub fn cancel_drag(&mut self) -> Option<usize> {
        self.drag.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognize::wire::RecognitionRecord;

    fn immediate() -> Session {
        let mut session = Session::new(SessionConfig {
            reveal_delay: Duration::ZERO,
            ..SessionConfig::default()
        });
        session.surface_mut().mount(40, 40);
        session
    }

    #[test]
    fn unmounted_session_cannot_submit() {
        let mut session = Session::default();
        assert!(session.begin_submission().is_none());
        assert!(!session.is_pending());
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut session = immediate();
        assert!(session.begin_submission().is_some());
        assert!(session.begin_submission().is_none());
    }

    #[test]
    fn flatten_option_sends_opaque_snapshot() {
        let mut session = Session::new(SessionConfig {
            flatten_background: true,
            ..SessionConfig::default()
        });
        session.surface_mut().mount(3, 3);
        let submission = session.begin_submission().expect("submission");
        assert!(submission.raster.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn drag_release_commits_and_cancel_reverts() {
        let mut session = immediate();
        let gen = session.begin_submission().expect("submission").generation;
        session.apply_reply(
            RecognitionReply {
                generation: gen,
                result: Ok(vec![RecognitionRecord::new("1+1", "2", false)]),
            },
            Instant::now(),
        );

        session.press_item(0, Point::new(15.0, 205.0));
        assert_eq!(
            session.item_position(0, Some(Point::new(25.0, 215.0))),
            Some(Point::new(20.0, 210.0))
        );
        assert_eq!(session.release_drag(Point::new(120.0, 80.0)), Some(0));
        assert_eq!(session.item_position(0, None), Some(Point::new(120.0, 80.0)));

        session.press_item(0, Point::new(120.0, 80.0));
        assert_eq!(session.cancel_drag(), Some(0));
        assert_eq!(
            session.item_position(0, Some(Point::new(500.0, 500.0))),
            Some(Point::new(120.0, 80.0))
        );
    }

    #[test]
    fn press_on_unknown_item_does_not_start_drag() {
        let mut session = immediate();
        session.press_item(4, Point::new(0.0, 0.0));
        assert!(!session.drag().is_dragging());
    }
}
