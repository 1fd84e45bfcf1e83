use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{BookingError, BookingResult};

/// Transaction id recorded for cash bookings, which have no bank reference
pub const CASH_PAYMENT_TRX_ID: &str = "CASH-PAYMENT";

/// Slot names venues book against; the availability endpoint reports against these
pub const STANDARD_TIME_SLOTS: [&str; 6] = [
    "9:00 AM - 12:00 PM",
    "12:00 PM - 3:00 PM",
    "3:00 PM - 6:00 PM",
    "6:00 PM - 9:00 PM",
    "9:00 PM - 12:00 AM",
    "Full Day",
];

/// Event categories a venue can be booked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Corporate,
    Birthday,
    Conference,
    Engagement,
    Other,
}

impl EventType {
    /// All selectable event types, in presentation order
    pub fn all() -> [EventType; 6] {
        [
            EventType::Wedding,
            EventType::Corporate,
            EventType::Birthday,
            EventType::Conference,
            EventType::Engagement,
            EventType::Other,
        ]
    }

    /// Name sent over the wire and shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Corporate => "Corporate",
            EventType::Birthday => "Birthday",
            EventType::Conference => "Conference",
            EventType::Engagement => "Engagement",
            EventType::Other => "Other",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method for the booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Bank transfer with a user-supplied transaction reference
    BankTransfer,
    /// Cash on arrival; a sentinel transaction id is recorded
    Cash,
}

impl PaymentMethod {
    /// Wire name expected by the booking endpoint
    pub fn wire_name(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::Cash => "cash",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Cash => "Cash",
        }
    }

    /// Whether advancing past the payment step needs a user-entered transaction id
    pub fn requires_transaction_id(&self) -> bool {
        matches!(self, PaymentMethod::BankTransfer)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Read-only venue context the wizard books against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueContext {
    /// Backend identifier of the venue
    pub venue_id: u64,
    /// Venue display name
    pub name: String,
    /// Base price per booking before add-on services
    pub base_price: Decimal,
}

impl VenueContext {
    /// Create a venue context
    pub fn new(venue_id: u64, name: impl Into<String>, base_price: Decimal) -> BookingResult<Self> {
        if base_price < Decimal::ZERO {
            return Err(BookingError::validation_error(
                "base_price",
                format!("Base price cannot be negative: {}", base_price),
            ));
        }
        Ok(Self {
            venue_id,
            name: name.into(),
            base_price,
        })
    }
}

/// Bearer token for the booking backend; wiped from memory on drop
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Contact details carried by an authenticated session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Authentication state handed to the wizard at construction.
///
/// The wizard never reaches into ambient auth state; it reads this value and
/// reacts to a missing token at submission time.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
    profile: Option<UserProfile>,
}

impl Session {
    /// Session with a token and optional profile for pre-seeding
    pub fn authenticated(token: AccessToken, profile: Option<UserProfile>) -> Self {
        Self {
            token: Some(token),
            profile,
        }
    }

    /// Session without credentials; submission will fail with `AuthRequired`
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref().filter(|t| !t.is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

/// Availability flag for one slot on one date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotStatus {
    pub slot: String,
    pub is_available: bool,
}

/// Date and slot handed in from the page that opened the wizard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingReferral {
    pub event_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
}

/// The in-progress booking record, owned by the wizard for one attempt.
///
/// Mutated exclusively through reducer actions; append-only across steps
/// except that a date change clears the selected slot.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    /// Correlation id for logs, never sent to the backend
    pub id: Uuid,
    pub event_type: Option<EventType>,
    pub event_date: Option<NaiveDate>,
    pub time_slot: Option<String>,
    pub guests: Option<u32>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub alternative_phone: String,
    pub special_requirements: String,
    pub services: BTreeSet<String>,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl BookingDraft {
    /// Empty draft for a fresh wizard mount
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: None,
            event_date: None,
            time_slot: None,
            guests: None,
            full_name: String::new(),
            email: String::new(),
            phone_number: String::new(),
            alternative_phone: String::new(),
            special_requirements: String::new(),
            services: BTreeSet::new(),
            payment_method: None,
            transaction_id: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_service(&self, service_id: &str) -> bool {
        self.services.contains(service_id)
    }
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// Wire request for `POST /bookings`, validated before the call is issued
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    pub venue_id: u64,
    pub event_date: NaiveDate,
    #[validate(length(min = 1, message = "Time slot is required"))]
    pub slot: String,
    #[validate(length(min = 1, message = "Event type is required"))]
    pub event_type: String,
    pub special_requirements: String,
    #[validate(length(min = 1, message = "Full name is required"))]
    pub fullname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_primary: String,
    pub facility_ids: Vec<u64>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[validate(length(min = 1, message = "Transaction id is required"))]
    pub trx_id: String,
}

/// Backend acknowledgement of a created booking.
///
/// The schema is owned by the backend; all fields are optional so unknown
/// payload shapes still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
