use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::availability::{
    AvailabilitySnapshot, AvailabilityTracker, LookupTicket, AVAILABILITY_FETCH_ERROR,
};
use crate::client::BookingApi;
use crate::error::{BookingError, BookingResult};
use crate::pricing::{PriceQuote, ServiceCatalog};
use crate::types::{
    BookingConfirmation, BookingDraft, BookingReferral, BookingRequest, EventType, PaymentMethod,
    Session, SlotStatus, VenueContext, CASH_PAYMENT_TRX_ID,
};
use crate::validation;

/// The five wizard panels in fixed linear order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    BookingInfo,
    Contact,
    Services,
    Payment,
    Summary,
}

impl WizardStep {
    /// All steps in walk order
    pub fn all() -> [WizardStep; 5] {
        [
            WizardStep::BookingInfo,
            WizardStep::Contact,
            WizardStep::Services,
            WizardStep::Payment,
            WizardStep::Summary,
        ]
    }

    /// 1-based position shown in the step indicator
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::BookingInfo => 1,
            WizardStep::Contact => 2,
            WizardStep::Services => 3,
            WizardStep::Payment => 4,
            WizardStep::Summary => 5,
        }
    }

    /// Panel title shown in the step header
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BookingInfo => "Booking Information",
            WizardStep::Contact => "Contact Details",
            WizardStep::Services => "Additional Services",
            WizardStep::Payment => "Payment Method",
            WizardStep::Summary => "Booking Summary",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::BookingInfo => Some(WizardStep::Contact),
            WizardStep::Contact => Some(WizardStep::Services),
            WizardStep::Services => Some(WizardStep::Payment),
            WizardStep::Payment => Some(WizardStep::Summary),
            WizardStep::Summary => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::BookingInfo => None,
            WizardStep::Contact => Some(WizardStep::BookingInfo),
            WizardStep::Services => Some(WizardStep::Contact),
            WizardStep::Payment => Some(WizardStep::Services),
            WizardStep::Summary => Some(WizardStep::Payment),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A single draft mutation, routed through [`reduce`]
#[derive(Debug, Clone, PartialEq)]
pub enum DraftAction {
    SetEventType(EventType),
    SetEventDate(NaiveDate),
    SetTimeSlot(String),
    SetGuests(u32),
    SetFullName(String),
    SetEmail(String),
    SetPhoneNumber(String),
    SetAlternativePhone(String),
    SetSpecialRequirements(String),
    ToggleService(String),
    SetPaymentMethod(PaymentMethod),
    SetTransactionId(String),
}

/// Pure reducer: one action applied to a draft yields the next draft.
///
/// Changing the event date clears any chosen slot, since slot availability is
/// date-scoped. Phone fields are stored in their normalized form, matching
/// what the phone input renders back to the user.
pub fn reduce(mut draft: BookingDraft, action: DraftAction) -> BookingDraft {
    match action {
        DraftAction::SetEventType(event_type) => draft.event_type = Some(event_type),
        DraftAction::SetEventDate(date) => {
            if draft.event_date != Some(date) {
                draft.time_slot = None;
            }
            draft.event_date = Some(date);
        }
        DraftAction::SetTimeSlot(slot) => draft.time_slot = Some(slot),
        DraftAction::SetGuests(guests) => draft.guests = Some(guests),
        DraftAction::SetFullName(name) => draft.full_name = name,
        DraftAction::SetEmail(email) => draft.email = email,
        DraftAction::SetPhoneNumber(phone) => {
            draft.phone_number = validation::normalize_phone(&phone);
        }
        DraftAction::SetAlternativePhone(phone) => {
            draft.alternative_phone = validation::normalize_phone(&phone);
        }
        DraftAction::SetSpecialRequirements(text) => draft.special_requirements = text,
        DraftAction::ToggleService(id) => {
            if !draft.services.remove(&id) {
                draft.services.insert(id);
            }
        }
        DraftAction::SetPaymentMethod(method) => draft.payment_method = Some(method),
        DraftAction::SetTransactionId(trx_id) => draft.transaction_id = trx_id,
    }
    draft
}

/// Wizard lifecycle: in progress until a submission succeeds
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    InProgress,
    Confirmed(BookingConfirmation),
}

/// Owns one booking attempt: the draft, the current step, and the
/// collaborators needed to price, check availability, and submit.
///
/// All mutation goes through `&mut self`; embedders drive it from a single
/// logical owner.
pub struct BookingWizard {
    venue: VenueContext,
    session: Session,
    catalog: ServiceCatalog,
    api: Arc<dyn BookingApi + Send + Sync>,
    draft: BookingDraft,
    step: WizardStep,
    state: WizardState,
    tracker: AvailabilityTracker,
    snapshot: AvailabilitySnapshot,
}

impl BookingWizard {
    /// Create a wizard for one venue, pre-seeding contact fields from the
    /// session profile when present
    pub fn new(
        venue: VenueContext,
        session: Session,
        catalog: ServiceCatalog,
        api: Arc<dyn BookingApi + Send + Sync>,
    ) -> Self {
        let draft = Self::seeded_draft(&session);

        info!(
            draft_id = %draft.id,
            venue_id = venue.venue_id,
            venue = %venue.name,
            "Booking wizard started"
        );

        Self {
            venue,
            session,
            catalog,
            api,
            draft,
            step: WizardStep::BookingInfo,
            state: WizardState::InProgress,
            tracker: AvailabilityTracker::new(),
            snapshot: AvailabilitySnapshot::default(),
        }
    }

    fn seeded_draft(session: &Session) -> BookingDraft {
        let mut draft = BookingDraft::new();
        if let Some(profile) = session.profile() {
            if let Some(name) = &profile.full_name {
                draft.full_name = name.clone();
            }
            if let Some(email) = &profile.email {
                draft.email = email.clone();
            }
            if let Some(phone) = &profile.phone {
                draft.phone_number = validation::normalize_phone(phone);
            }
        }
        draft
    }

    /// Seed date and slot handed over from the referring page.
    ///
    /// The referral also defaults the event type to Wedding when none is
    /// chosen yet, matching how the booking form opens from a venue page.
    pub fn apply_referral(&mut self, referral: &BookingReferral) {
        if self.draft.event_type.is_none() {
            self.draft.event_type = Some(EventType::Wedding);
        }
        if let Some(date) = referral.event_date {
            self.draft.event_date = Some(date);
        }
        if let Some(slot) = &referral.time_slot {
            self.draft.time_slot = Some(slot.clone());
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn venue(&self) -> &VenueContext {
        &self.venue
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    /// Slot list and conflict from the most recent applied lookup
    pub fn availability(&self) -> &AvailabilitySnapshot {
        &self.snapshot
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.state, WizardState::Confirmed(_))
    }

    /// First unmet requirement blocking a step's exit, if any
    pub fn first_blocker(&self, step: WizardStep) -> Option<String> {
        match step {
            WizardStep::BookingInfo => {
                if self.draft.event_type.is_none() {
                    return Some("Event type is required".to_string());
                }
                if let Err(e) = validation::validate_event_date(
                    "event_date",
                    self.draft.event_date,
                    Utc::now().date_naive(),
                ) {
                    return Some(e.to_string());
                }
                if let Err(e) = validation::validate_guests(self.draft.guests) {
                    return Some(e.to_string());
                }
                if self.draft.time_slot.is_none() {
                    return Some("Time slot is required".to_string());
                }
                self.snapshot
                    .conflict()
                    .map(|slot| BookingError::availability_conflict(slot).to_string())
            }
            WizardStep::Contact => {
                if let Err(e) = validation::non_empty("full_name", &self.draft.full_name) {
                    return Some(e.to_string());
                }
                if let Err(e) = validation::validate_email("email", &self.draft.email) {
                    return Some(e.to_string());
                }
                if let Err(e) = validation::validate_phone("phone_number", &self.draft.phone_number)
                {
                    return Some(e.to_string());
                }
                validation::validate_optional_phone(
                    "alternative_phone",
                    &self.draft.alternative_phone,
                )
                .err()
                .map(|e| e.to_string())
            }
            WizardStep::Services => {
                if self.draft.payment_method.is_none() {
                    return Some("Payment method is required".to_string());
                }
                None
            }
            WizardStep::Payment => match self.draft.payment_method {
                None => Some("Payment method is required".to_string()),
                Some(method)
                    if method.requires_transaction_id()
                        && self.draft.transaction_id.trim().is_empty() =>
                {
                    Some("Transaction ID is required for bank transfer".to_string())
                }
                Some(_) => None,
            },
            WizardStep::Summary => None,
        }
    }

    /// Whether a step's mandatory fields all pass
    pub fn step_complete(&self, step: WizardStep) -> bool {
        self.first_blocker(step).is_none()
    }

    /// Move forward one step if the current step's requirements are met;
    /// otherwise stay put. Returns the step the wizard is on afterwards.
    pub fn advance(&mut self) -> WizardStep {
        if let Some(reason) = self.first_blocker(self.step) {
            debug!(draft_id = %self.draft.id, step = %self.step, %reason, "Advance blocked");
            return self.step;
        }

        if let Some(next) = self.step.next() {
            info!(draft_id = %self.draft.id, from = %self.step, to = %next, "Step advanced");
            self.step = next;
        }
        self.step
    }

    /// Move back one step; a no-op on the first step
    pub fn retreat(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Route one action through the reducer.
    ///
    /// A date change drops the availability snapshot and invalidates any
    /// in-flight lookup; choosing a slot clears a standing conflict.
    pub fn apply(&mut self, action: DraftAction) {
        let date_changed = matches!(
            &action,
            DraftAction::SetEventDate(date) if self.draft.event_date != Some(*date)
        );
        let slot_chosen = matches!(&action, DraftAction::SetTimeSlot(_));

        self.draft = reduce(self.draft.clone(), action);

        if date_changed {
            self.snapshot.clear();
            self.tracker.invalidate();
        }
        if slot_chosen {
            self.snapshot.clear_conflict();
        }
    }

    /// Begin a tracked availability lookup for the drafted date.
    ///
    /// Returns `None` when no date is chosen yet. Pair with
    /// [`apply_availability`](Self::apply_availability) for embedders that
    /// drive their own scheduling; [`refresh_availability`](Self::refresh_availability)
    /// wraps both around the API client.
    pub fn begin_availability_lookup(&mut self) -> Option<LookupTicket> {
        let date = self.draft.event_date?;
        Some(self.tracker.begin(date))
    }

    /// Apply a lookup response if its ticket is still the newest.
    ///
    /// Returns `true` when the snapshot was updated; stale responses are
    /// discarded without touching state.
    pub fn apply_availability(&mut self, ticket: &LookupTicket, slots: Vec<SlotStatus>) -> bool {
        if !self.tracker.accept(ticket) {
            return false;
        }

        self.snapshot.apply(slots, self.draft.time_slot.as_deref());
        if let Some(slot) = self.snapshot.conflict() {
            warn!(draft_id = %self.draft.id, %slot, "Chosen slot no longer available");
        }
        true
    }

    /// Fetch availability for the drafted date and reconcile the chosen slot.
    ///
    /// On failure the prior slot data is kept and a retryable error with a
    /// user-facing message is returned.
    pub async fn refresh_availability(&mut self) -> BookingResult<&[SlotStatus]> {
        let ticket = self.begin_availability_lookup().ok_or_else(|| {
            BookingError::validation_error("event_date", "Event date is required")
        })?;

        match self
            .api
            .fetch_availability(self.venue.venue_id, ticket.date())
            .await
        {
            Ok(slots) => {
                self.apply_availability(&ticket, slots);
                Ok(self.snapshot.slots())
            }
            Err(e) => {
                warn!(
                    draft_id = %self.draft.id,
                    date = %ticket.date(),
                    error = %e,
                    "Availability lookup failed"
                );
                Err(BookingError::network_error(AVAILABILITY_FETCH_ERROR))
            }
        }
    }

    /// Price the current draft against the venue and catalog
    pub fn quote(&self) -> PriceQuote {
        self.catalog.quote(
            self.venue.base_price,
            self.draft.services.iter().map(String::as_str),
        )
    }

    /// Assemble and validate the wire request from the current draft.
    ///
    /// Cash bookings record the `CASH-PAYMENT` sentinel as their transaction
    /// id; bank transfers require one from the user.
    pub fn build_request(&self) -> BookingResult<BookingRequest> {
        let event_type = self.draft.event_type.ok_or_else(|| {
            BookingError::validation_error("event_type", "Event type is required")
        })?;
        let event_date = validation::validate_event_date(
            "event_date",
            self.draft.event_date,
            Utc::now().date_naive(),
        )?;
        let slot = self.draft.time_slot.clone().ok_or_else(|| {
            BookingError::validation_error("time_slot", "Time slot is required")
        })?;
        let payment_method = self.draft.payment_method.ok_or_else(|| {
            BookingError::validation_error("payment_method", "Payment method is required")
        })?;

        validation::non_empty("full_name", &self.draft.full_name)?;
        validation::validate_email("email", &self.draft.email)?;
        let phone_primary = validation::validate_phone("phone_number", &self.draft.phone_number)?;
        validation::validate_optional_phone("alternative_phone", &self.draft.alternative_phone)?;
        validation::validate_guests(self.draft.guests)?;

        let trx_id = match payment_method {
            PaymentMethod::BankTransfer => {
                let trx_id = self.draft.transaction_id.trim();
                if trx_id.is_empty() {
                    return Err(BookingError::validation_error(
                        "transaction_id",
                        "Transaction ID is required for bank transfer",
                    ));
                }
                trx_id.to_string()
            }
            PaymentMethod::Cash => CASH_PAYMENT_TRX_ID.to_string(),
        };

        let request = BookingRequest {
            venue_id: self.venue.venue_id,
            event_date,
            slot,
            event_type: event_type.as_str().to_string(),
            special_requirements: self.compose_special_requirements(),
            fullname: self.draft.full_name.trim().to_string(),
            email: self.draft.email.trim().to_string(),
            phone_primary,
            facility_ids: Vec::new(),
            amount: self.quote().total,
            payment_method,
            trx_id,
        };
        request.validate()?;

        Ok(request)
    }

    /// Free-text notes joined with the selected service titles, the shape the
    /// backend stores verbatim
    fn compose_special_requirements(&self) -> String {
        let notes = self.draft.special_requirements.trim();
        let titles = self
            .catalog
            .titles_for(self.draft.services.iter().map(String::as_str));

        if titles.is_empty() {
            return notes.to_string();
        }

        let services = format!("Services: {}", titles.join(", "));
        if notes.is_empty() {
            services
        } else {
            format!("{} | {}", notes, services)
        }
    }

    /// Submit the booking. Only permitted on the Summary step.
    ///
    /// A missing session token yields [`BookingError::AuthRequired`] with the
    /// draft intact, so the caller can route the user through login and retry.
    /// Failed submissions also keep the draft; there are no automatic retries.
    pub async fn submit(&mut self) -> BookingResult<BookingConfirmation> {
        if self.is_confirmed() {
            return Err(BookingError::step_blocked(
                self.step.title(),
                "Booking already confirmed",
            ));
        }
        if self.step != WizardStep::Summary {
            return Err(BookingError::step_blocked(
                self.step.title(),
                "Submission is only available from the summary step",
            ));
        }

        let token = self.session.token().ok_or(BookingError::AuthRequired)?;
        let request = self.build_request()?;

        info!(
            draft_id = %self.draft.id,
            venue_id = request.venue_id,
            slot = %request.slot,
            amount = %request.amount,
            payment_method = %request.payment_method,
            "Submitting booking"
        );

        match self.api.create_booking(&request, token).await {
            Ok(confirmation) => {
                info!(
                    draft_id = %self.draft.id,
                    booking_id = ?confirmation.booking_id,
                    "Booking confirmed"
                );
                self.state = WizardState::Confirmed(confirmation.clone());
                Ok(confirmation)
            }
            Err(e) => {
                warn!(draft_id = %self.draft.id, error = %e, "Booking submission failed");
                Err(e)
            }
        }
    }

    /// Discard the draft and start over at the first step.
    ///
    /// Outstanding availability lookups are invalidated so no late response
    /// can touch the fresh draft. Profile pre-seeding is re-applied; referral
    /// seeding is not, since the referral belongs to the original page visit.
    pub fn reset(&mut self) {
        info!(draft_id = %self.draft.id, "Wizard reset");
        self.draft = Self::seeded_draft(&self.session);
        self.step = WizardStep::BookingInfo;
        self.state = WizardState::InProgress;
        self.snapshot.clear();
        self.tracker.invalidate();
    }
}
