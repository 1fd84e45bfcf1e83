//! Availability lookup bookkeeping.
//!
//! Every change to the event date triggers one fetch of that date's slot
//! list. Responses can arrive out of order under a slow network, so each
//! lookup is issued against a ticket from [`AvailabilityTracker`] and only
//! the newest ticket's response is applied.

use chrono::NaiveDate;
use tracing::debug;

use crate::types::SlotStatus;

/// User-facing message when the availability fetch itself fails
pub const AVAILABILITY_FETCH_ERROR: &str = "Failed to check availability. Please try again.";

/// Identifies one availability lookup; must accompany its response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTicket {
    token: u64,
    date: NaiveDate,
}

impl LookupTicket {
    /// The date this lookup was issued for
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Orders overlapping lookups: last request wins, stale responses are dropped
#[derive(Debug, Default)]
pub struct AvailabilityTracker {
    counter: u64,
    latest: Option<u64>,
}

impl AvailabilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lookup for a date, superseding any outstanding one
    pub fn begin(&mut self, date: NaiveDate) -> LookupTicket {
        self.counter += 1;
        self.latest = Some(self.counter);
        LookupTicket {
            token: self.counter,
            date,
        }
    }

    /// Whether the response for this ticket may be applied.
    ///
    /// True only for the newest outstanding ticket, once; anything older was
    /// superseded by a later `begin` and must be discarded.
    pub fn accept(&mut self, ticket: &LookupTicket) -> bool {
        if self.latest == Some(ticket.token) {
            self.latest = None;
            true
        } else {
            debug!(date = %ticket.date, "Discarding stale availability response");
            false
        }
    }

    /// Reject every outstanding response, e.g. when the wizard resets
    pub fn invalidate(&mut self) {
        self.latest = None;
    }

    pub fn has_pending(&self) -> bool {
        self.latest.is_some()
    }
}

/// Reconcile a previously selected slot against a fresh slot list.
///
/// Returns the slot name when the selection appears in the list flagged
/// unavailable. A selection missing from the list is not a conflict; the
/// backend may return a partial list.
pub fn reconcile_selection(selected: Option<&str>, slots: &[SlotStatus]) -> Option<String> {
    let selected = selected?;
    slots
        .iter()
        .find(|s| s.slot == selected && !s.is_available)
        .map(|s| s.slot.clone())
}

/// Slot data for the currently selected date, plus any blocking conflict
#[derive(Debug, Clone, Default)]
pub struct AvailabilitySnapshot {
    slots: Vec<SlotStatus>,
    conflict: Option<String>,
}

impl AvailabilitySnapshot {
    /// Replace the slot list and recompute the conflict for a selection
    pub fn apply(&mut self, slots: Vec<SlotStatus>, selected: Option<&str>) {
        self.conflict = reconcile_selection(selected, &slots);
        self.slots = slots;
    }

    /// Forget slot data and conflicts, e.g. after a date change
    pub fn clear(&mut self) {
        self.slots.clear();
        self.conflict = None;
    }

    /// Clear only the conflict, e.g. after the user reselects a slot
    pub fn clear_conflict(&mut self) {
        self.conflict = None;
    }

    pub fn slots(&self) -> &[SlotStatus] {
        &self.slots
    }

    /// The slot name blocking advancement, when the selection went unavailable
    pub fn conflict(&self) -> Option<&str> {
        self.conflict.as_deref()
    }

    pub fn is_blocking(&self) -> bool {
        self.conflict.is_some()
    }
}
