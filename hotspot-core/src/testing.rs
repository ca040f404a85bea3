//! Test doubles shared by the unit tests.

use crate::status_client::{StatusUpdater, UpdateStatusError};
use hotspot_common::{RecordId, Status};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    Ok,
    Reject(u16),
    Unreachable,
}

/// Records every update call and answers with a configurable outcome.
pub struct RecordingUpdater {
    calls: Mutex<Vec<(RecordId, Status)>>,
    outcome: Mutex<Outcome>,
}

impl RecordingUpdater {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(outcome),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Outcome::Ok)
    }

    pub fn rejecting(status: u16) -> Self {
        Self::new(Outcome::Reject(status))
    }

    pub fn unreachable() -> Self {
        Self::new(Outcome::Unreachable)
    }

    pub fn set_outcome_ok(&self) {
        *self.outcome.lock().unwrap() = Outcome::Ok;
    }

    pub fn calls(&self) -> Vec<(RecordId, Status)> {
        self.calls.lock().unwrap().clone()
    }
}

/// A real `reqwest::Error`, produced without touching the network.
pub fn network_error() -> reqwest::Error {
    reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err()
}

#[async_trait::async_trait]
impl StatusUpdater for RecordingUpdater {
    async fn update_status(
        &self,
        record_id: RecordId,
        status: Status,
    ) -> Result<(), UpdateStatusError> {
        self.calls.lock().unwrap().push((record_id, status));
        let outcome = *self.outcome.lock().unwrap();
        match outcome {
            Outcome::Ok => Ok(()),
            Outcome::Reject(status) => Err(UpdateStatusError::Rejected { status }),
            Outcome::Unreachable => Err(UpdateStatusError::Network(network_error())),
        }
    }
}
