//! The metadata panel: selection in, snapshot and edit state out.
//!
//! Every method is a reaction to one discrete event (selection change,
//! operator input, request resolution). The only suspension point is the
//! status update itself, which is why confirming is split into
//! [`Panel::begin_confirm`], [`PendingUpdate::send`] and [`Panel::resolve`]:
//! the panel is not borrowed while the request is in flight, so a new
//! selection can arrive in the meantime.

use crate::config::Config;
use crate::edit::{EditPhase, StatusEditController, StatusUpdateTicket};
use crate::status_client::{StatusUpdater, UpdateStatusError};
use hotspot_common::{project, HotspotRecord, MetadataSnapshot, OverlayToggle, RecordId, Status};
use tracing::{debug, info};

/// Callback that asks the selection provider to clear the panel.
pub type ClearSelection = Box<dyn FnMut() + Send>;

/// Placeholder shown in the status selector for `Status::Undefined`.
pub const SELECT_STATUS_PLACEHOLDER: &str = "Select Status";

/// A status update that has been started but not yet applied.
///
/// Only [`Panel::begin_confirm`] creates one, and [`PendingUpdate::send`]
/// consumes it, so each confirm issues at most one request.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingUpdate {
    ticket: StatusUpdateTicket,
    /// Selection generation the request was issued under
    generation: u64,
}

impl PendingUpdate {
    pub fn ticket(&self) -> &StatusUpdateTicket {
        &self.ticket
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Perform the request.
    pub async fn send(self, updater: &dyn StatusUpdater) -> UpdateResolution {
        let result = updater
            .update_status(self.ticket.record_id, self.ticket.status)
            .await;
        UpdateResolution {
            pending: self,
            result,
        }
    }
}

/// Outcome of a [`PendingUpdate`], ready to hand back to [`Panel::resolve`].
#[derive(Debug)]
pub struct UpdateResolution {
    pub pending: PendingUpdate,
    pub result: Result<(), UpdateStatusError>,
}

pub struct Panel {
    server: String,
    selection: Option<HotspotRecord>,
    generation: u64,
    snapshot: MetadataSnapshot,
    editor: StatusEditController,
    overlay: OverlayToggle,
    on_clear: ClearSelection,
}

impl Panel {
    pub fn new<F>(config: &Config, selection: Option<HotspotRecord>, on_clear: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let server = config.server_base().to_string();
        let snapshot = project(selection.as_ref(), &server);
        Self {
            server,
            selection,
            generation: 0,
            snapshot,
            editor: StatusEditController::new(),
            overlay: OverlayToggle::new(),
            on_clear: Box::new(on_clear),
        }
    }

    // -- Selection --

    /// Selection-changed event.
    ///
    /// The snapshot is always recomputed from scratch. When the record
    /// identity changes the staged edit, the error message and the overlay are
    /// reset too, and responses to requests issued for the old record are
    /// ignored when they arrive.
    pub fn select(&mut self, selection: Option<HotspotRecord>) {
        let previous = self.record_id();
        let next = selection.as_ref().map(|r| r.record_id);

        self.snapshot = project(selection.as_ref(), &self.server);
        self.selection = selection;

        if previous != next {
            self.generation += 1;
            self.editor.reset();
            self.overlay.reset();
            match next {
                Some(id) => info!("Selected record {}", id),
                None => info!("Selection cleared"),
            }
        } else {
            debug!("Selection refreshed for record {:?}", next);
        }
    }

    pub fn selection(&self) -> Option<&HotspotRecord> {
        self.selection.as_ref()
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.selection.as_ref().map(|r| r.record_id)
    }

    pub fn snapshot(&self) -> &MetadataSnapshot {
        &self.snapshot
    }

    /// Ask the selection provider to close the panel.
    pub fn close(&mut self) {
        debug!("Close requested");
        (self.on_clear)();
    }

    // -- Status edit --

    pub fn status_options() -> Vec<(Status, &'static str)> {
        Status::ALL
            .into_iter()
            .map(|status| match status {
                Status::Undefined => (status, SELECT_STATUS_PLACEHOLDER),
                _ => (status, status.label()),
            })
            .collect()
    }

    pub fn stage_candidate(&mut self, status: Status) {
        self.editor.stage_candidate(status);
    }

    pub fn candidate(&self) -> Status {
        self.editor.candidate()
    }

    pub fn error_message(&self) -> &str {
        self.editor.error_message()
    }

    pub fn edit_phase(&self) -> EditPhase {
        self.editor.phase()
    }

    /// Start confirming the staged candidate.
    ///
    /// `None` means nothing will be sent: no record is selected, or a request
    /// for this selection is already in flight.
    pub fn begin_confirm(&mut self) -> Option<PendingUpdate> {
        let ticket = self.editor.begin(self.record_id())?;
        info!(
            "Submitting status {} for record {}",
            ticket.status.as_str(),
            ticket.record_id
        );
        Some(PendingUpdate {
            ticket,
            generation: self.generation,
        })
    }

    /// Apply a finished request. Returns `false` if it was issued for a
    /// selection that is no longer current or is not the request in flight,
    /// in which case nothing changes.
    pub fn resolve(&mut self, resolution: UpdateResolution) -> bool {
        let UpdateResolution { pending, result } = resolution;
        if pending.generation != self.generation {
            debug!(
                "Dropping stale status response for record {} (generation {} != {})",
                pending.ticket.record_id, pending.generation, self.generation
            );
            return false;
        }
        match self.editor.finish(&pending.ticket, &result, &self.snapshot) {
            Some(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            None => false,
        }
    }

    /// Begin, send and resolve in one go. Returns whether a request was sent.
    pub async fn confirm(&mut self, updater: &dyn StatusUpdater) -> bool {
        let Some(pending) = self.begin_confirm() else {
            return false;
        };
        let resolution = pending.send(updater).await;
        self.resolve(resolution);
        true
    }

    // -- Overlay --

    /// The detection overlay only exists for records the detector flagged.
    pub fn overlay_available(&self) -> bool {
        self.selection.as_ref().is_some_and(|r| r.is_hotspot)
    }

    pub fn toggle_overlay(&mut self) {
        if self.overlay_available() {
            self.overlay.toggle();
        }
    }

    pub fn overlay_label(&self) -> &'static str {
        self.overlay.label()
    }

    pub fn is_showing_overlay(&self) -> bool {
        self.overlay.is_showing_overlay()
    }

    /// RGB image to show: masked or raw depending on the overlay.
    pub fn rgb_image(&self) -> Option<&str> {
        self.overlay.visible_image(&self.snapshot)
    }

    pub fn ir_image(&self) -> Option<&str> {
        self.snapshot.ir_image.as_deref()
    }
}
