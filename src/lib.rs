//! # Venue Booking Flow
//!
//! The booking wizard engine of a venue marketplace, featuring:
//!
//! - **Five-Step Wizard**: Booking info, contact, services, payment, and summary panels with per-step exit checks
//! - **Pure Reducer**: All draft mutation flows through `(draft, action) -> draft`
//! - **Availability Reconciliation**: Date-scoped slot lookups with last-request-wins ordering
//! - **Pricing Calculator**: Decimal base-plus-services arithmetic with a 5% tax line
//! - **Field Validators**: Phone normalization to `+92-XXX-XXXXXXX`, email and required-field rules
//! - **API Seam**: Async trait over the booking backend with HTTP and mock implementations
//! - **Venue Discovery**: Typed search filters and server-driven paging for the venue listing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use venue_booking_flow::{BookingFlowBuilder, DraftAction, EventType, PaymentMethod};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a wizard with development defaults (mock API, sample venue)
//!     let mut wizard = BookingFlowBuilder::development().build()?;
//!
//!     wizard.apply(DraftAction::SetEventType(EventType::Wedding));
//!     wizard.apply(DraftAction::SetEventDate(
//!         Utc::now().date_naive() + Duration::days(30),
//!     ));
//!     wizard.apply(DraftAction::SetGuests(250));
//!     wizard.refresh_availability().await?;
//!     wizard.apply(DraftAction::SetTimeSlot("Full Day".to_string()));
//!     wizard.advance();
//!
//!     wizard.apply(DraftAction::SetFullName("Ali Khan".to_string()));
//!     wizard.apply(DraftAction::SetEmail("ali@example.com".to_string()));
//!     wizard.apply(DraftAction::SetPhoneNumber("03001234567".to_string()));
//!     wizard.advance();
//!
//!     wizard.apply(DraftAction::ToggleService("catering".to_string()));
//!     wizard.apply(DraftAction::SetPaymentMethod(PaymentMethod::Cash));
//!     wizard.advance();
//!     wizard.advance();
//!
//!     println!("Total: {}", wizard.quote().total);
//!     let confirmation = wizard.submit().await?;
//!     println!("Booked: {:?}", confirmation.booking_id);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - [`types`]: Core data structures and enums
//! - [`error`]: Error handling and result types
//! - [`validation`]: Per-field validators and the phone normalizer
//! - [`wizard`]: Step machine, reducer, and the booking wizard controller
//! - [`pricing`]: Service catalog and quote arithmetic
//! - [`availability`]: Slot lookup tracking and reconciliation
//! - [`client`]: Booking backend abstractions and implementations
//! - [`venues`]: Venue search filters and paging
//! - [`builder`]: Builder pattern for easy configuration
//!
//! ## Features
//!
//! - `default`: HTTP client support
//! - `http-client`: reqwest-based implementation of the booking API
//!
//! ## Booking Flow
//!
//! 1. **Booking Info**: Choose event type, date, guest count, and a time slot
//! 2. **Availability**: Each date change triggers a slot lookup; stale responses are discarded
//! 3. **Contact**: Collect and validate name, email, and normalized phone numbers
//! 4. **Services & Payment**: Pick add-on services and a payment method
//! 5. **Summary**: Review the quote, then submit the validated request with the session token
//!
//! ## Security
//!
//! - Session tokens are zeroized from memory on drop
//! - Submission requires an explicit authenticated session; nothing is read from ambient state
//! - Requests are validated before any network call is issued

pub mod availability;
pub mod builder;
pub mod client;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;
pub mod venues;
pub mod wizard;

// Re-export commonly used types for convenience
pub use availability::{
    AvailabilitySnapshot, AvailabilityTracker, LookupTicket, AVAILABILITY_FETCH_ERROR,
};
pub use builder::BookingFlowBuilder;
pub use client::{ApiConfig, BookingApi, MockBookingApi};
pub use error::{BookingError, BookingResult};
pub use pricing::{format_amount, PriceLine, PriceQuote, Service, ServiceCatalog, TAX_RATE};
pub use types::{
    AccessToken, BookingConfirmation, BookingDraft, BookingReferral, BookingRequest, EventType,
    PaymentMethod, Session, SlotStatus, UserProfile, VenueContext, CASH_PAYMENT_TRX_ID,
    STANDARD_TIME_SLOTS,
};
pub use venues::{CapacityBand, Pager, VenueListing, VenueQuery, VenueSort, VenueSummary};
pub use wizard::{reduce, BookingWizard, DraftAction, WizardState, WizardStep};

#[cfg(feature = "http-client")]
pub use client::HttpBookingApi;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        name: NAME,
        version: VERSION,
        features: get_enabled_features(),
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

/// Get list of enabled features
fn get_enabled_features() -> Vec<&'static str> {
    let mut features = Vec::new();

    #[cfg(feature = "http-client")]
    features.push("http-client");

    features
}

/// Prelude module for common imports
pub mod prelude {
    pub use crate::builder::BookingFlowBuilder;
    pub use crate::client::{BookingApi, MockBookingApi};
    pub use crate::error::{BookingError, BookingResult};
    pub use crate::types::{
        BookingDraft, BookingReferral, EventType, PaymentMethod, Session, VenueContext,
    };
    pub use crate::wizard::{BookingWizard, DraftAction, WizardState, WizardStep};
}
