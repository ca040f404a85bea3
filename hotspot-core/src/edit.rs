//! Pending status edit and its reconciliation with the server.

use crate::status_client::{StatusUpdater, UpdateStatusError};
use hotspot_common::{MetadataSnapshot, RecordId, Status};
use tracing::{debug, info, warn};

/// Shown for every failed update, whatever the cause.
pub const STATUS_UPDATE_FAILED: &str = "Error: Could not change status";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditPhase {
    /// Nothing staged, or the last edit went through
    #[default]
    Idle,
    /// A candidate is picked (or the last submit failed) and can be confirmed
    Staged,
    /// A request is in flight
    Submitting,
}

/// One status update request: the record it targets and the status it sends.
///
/// Only obtainable from [`StatusEditController::begin`], and only the ticket
/// currently in flight is accepted by [`StatusEditController::finish`].
#[derive(Debug, PartialEq, Eq)]
pub struct StatusUpdateTicket {
    pub record_id: RecordId,
    pub status: Status,
    seq: u64,
}

/// Owns the candidate status and the inline error message.
#[derive(Clone, Debug, Default)]
pub struct StatusEditController {
    candidate: Status,
    error_message: String,
    phase: EditPhase,
    /// Sequence number of the ticket in flight
    in_flight: Option<u64>,
    next_seq: u64,
}

impl StatusEditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&self) -> Status {
        self.candidate
    }

    /// Empty when there is nothing to report.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn phase(&self) -> EditPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == EditPhase::Submitting
    }

    /// Record the operator's pick. Never touches the network.
    ///
    /// Staging while a request is in flight only changes what the next
    /// confirm will send.
    pub fn stage_candidate(&mut self, status: Status) {
        debug!("Staged candidate status {}", status.as_str());
        self.candidate = status;
        self.error_message.clear();
        if self.phase != EditPhase::Submitting {
            self.phase = EditPhase::Staged;
        }
    }

    /// Move to `Submitting` and hand out the request to send.
    ///
    /// Returns `None` without side effects when no record is selected or a
    /// request is already in flight.
    pub fn begin(&mut self, record_id: Option<RecordId>) -> Option<StatusUpdateTicket> {
        let Some(record_id) = record_id else {
            debug!("Confirm ignored: no record selected");
            return None;
        };
        if self.is_submitting() {
            warn!(
                "Confirm ignored: an update for record {} is still in flight",
                record_id
            );
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.phase = EditPhase::Submitting;
        self.in_flight = Some(seq);
        Some(StatusUpdateTicket {
            record_id,
            status: self.candidate,
            seq,
        })
    }

    /// Apply the outcome of `ticket` and return the snapshot to display.
    ///
    /// Only a confirmed success changes the displayed status. Returns `None`
    /// and changes nothing if `ticket` is not the request currently in flight
    /// (already finished, or the editor was reset since).
    pub fn finish(
        &mut self,
        ticket: &StatusUpdateTicket,
        result: &Result<(), UpdateStatusError>,
        snapshot: &MetadataSnapshot,
    ) -> Option<MetadataSnapshot> {
        if !self.is_submitting() || self.in_flight != Some(ticket.seq) {
            debug!(
                "Ignoring resolution for record {}: not the request in flight",
                ticket.record_id
            );
            return None;
        }
        self.in_flight = None;

        let snapshot = match result {
            Ok(()) => {
                info!(
                    "Record {} status updated to {}",
                    ticket.record_id,
                    ticket.status.as_str()
                );
                self.phase = EditPhase::Idle;
                self.error_message.clear();
                snapshot.with_status(ticket.status)
            }
            Err(e) => {
                warn!("Record {} status update failed: {}", ticket.record_id, e);
                self.phase = EditPhase::Staged;
                self.error_message = STATUS_UPDATE_FAILED.to_string();
                snapshot.clone()
            }
        };
        Some(snapshot)
    }

    /// Send the staged candidate for `record_id` and return the snapshot to
    /// display afterwards.
    pub async fn confirm(
        &mut self,
        updater: &dyn StatusUpdater,
        snapshot: &MetadataSnapshot,
        record_id: Option<RecordId>,
    ) -> MetadataSnapshot {
        let Some(ticket) = self.begin(record_id) else {
            return snapshot.clone();
        };
        let result = updater.update_status(ticket.record_id, ticket.status).await;
        self.finish(&ticket, &result, snapshot)
            .unwrap_or_else(|| snapshot.clone())
    }

    /// Drop any staged edit, error and in-flight request, e.g. when the
    /// selection moves on. Sequence numbers keep counting so tickets issued
    /// before the reset stay invalid.
    pub fn reset(&mut self) {
        *self = Self {
            next_seq: self.next_seq,
            ..Self::default()
        };
    }
}
