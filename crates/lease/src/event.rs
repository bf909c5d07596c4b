// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structured events emitted by the update coordinator
//!
//! Events are observability data only: they never influence control flow,
//! and a store error is not an event (it propagates to the caller as an
//! error instead).

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One classified step of an update call. `attempt` is 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateEvent {
    /// Conditional write applied; the call succeeded
    LeaseUpdated {
        partition: String,
        owner: Option<String>,
        attempt: u32,
    },
    /// Write lost the race against another host; retrying against the
    /// competitor's state
    WriteContested {
        partition: String,
        attempt: u32,
        competing_owner: Option<String>,
    },
    /// The lease record disappeared; the caller may re-acquire
    LeaseGone { partition: String, attempt: u32 },
    /// Structural conflict reported by the store; terminal
    OwnershipConflict { partition: String, attempt: u32 },
    /// Retry budget exhausted while the record stayed contested
    AttemptsExhausted { partition: String, attempts: u32 },
    /// The mutator declined to write; deliberate no-op
    MutationAborted { partition: String },
    /// The caller cancelled before the attempt was issued
    UpdateCancelled { partition: String, attempt: u32 },
}

impl UpdateEvent {
    /// Get the event name for pattern matching
    /// Format: "category:action"
    pub fn name(&self) -> String {
        match self {
            UpdateEvent::LeaseUpdated { .. } => "lease:updated".to_string(),
            UpdateEvent::WriteContested { .. } => "lease:contested".to_string(),
            UpdateEvent::LeaseGone { .. } => "lease:gone".to_string(),
            UpdateEvent::OwnershipConflict { .. } => "lease:conflict".to_string(),
            UpdateEvent::AttemptsExhausted { .. } => "lease:exhausted".to_string(),
            UpdateEvent::MutationAborted { .. } => "lease:aborted".to_string(),
            UpdateEvent::UpdateCancelled { .. } => "lease:cancelled".to_string(),
        }
    }
}

/// Receives coordinator events as they happen
pub trait EventSink: Send + Sync {
    fn emit(&self, event: UpdateEvent);
}

/// Sink that drops every event; the default when none is injected
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: UpdateEvent) {}
}

/// Sink that records events for assertions in tests
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<UpdateEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events
    pub fn events(&self) -> Vec<UpdateEvent> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Get recorded event names, in emission order
    pub fn names(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(UpdateEvent::name)
            .collect()
    }

    /// Clear recorded events
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: UpdateEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
