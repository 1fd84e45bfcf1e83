use rust_decimal_macros::dec;
use std::sync::Arc;

use crate::client::{ApiConfig, BookingApi, MockBookingApi};
use crate::error::{BookingError, BookingResult};
use crate::pricing::ServiceCatalog;
use crate::types::{AccessToken, BookingReferral, Session, VenueContext};
use crate::wizard::BookingWizard;

#[cfg(feature = "http-client")]
use crate::client::HttpBookingApi;

/// Builder for assembling a configured booking wizard
pub struct BookingFlowBuilder {
    venue: Option<VenueContext>,
    session: Session,
    catalog: ServiceCatalog,
    api: Option<Arc<dyn BookingApi + Send + Sync>>,
    api_config: Option<ApiConfig>,
    referral: Option<BookingReferral>,
}

impl BookingFlowBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            venue: None,
            session: Session::anonymous(),
            catalog: ServiceCatalog::standard(),
            api: None,
            api_config: None,
            referral: None,
        }
    }

    /// Set the venue being booked
    pub fn with_venue(mut self, venue: VenueContext) -> Self {
        self.venue = Some(venue);
        self
    }

    /// Set the authentication session
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Replace the standard add-on service catalog
    pub fn with_catalog(mut self, catalog: ServiceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set a custom API client implementation
    pub fn with_api(mut self, api: Arc<dyn BookingApi + Send + Sync>) -> Self {
        self.api = Some(api);
        self
    }

    /// Configure the HTTP client built when no custom API is supplied
    pub fn with_api_config(mut self, config: ApiConfig) -> Self {
        self.api_config = Some(config);
        self
    }

    /// Pre-seed date and slot from the referring page
    pub fn with_referral(mut self, referral: BookingReferral) -> Self {
        self.referral = Some(referral);
        self
    }

    /// Create a development configuration wired against the mock API
    pub fn development() -> Self {
        let venue = VenueContext {
            venue_id: 1,
            name: "Demo Banquet Hall".to_string(),
            base_price: dec!(100000),
        };

        Self::new()
            .with_venue(venue)
            .with_session(Session::authenticated(AccessToken::new("dev-token"), None))
            .with_api(Arc::new(MockBookingApi::new()))
    }

    /// Build the wizard
    pub fn build(self) -> BookingResult<BookingWizard> {
        // Validate required configuration
        let venue = self.venue.ok_or_else(|| BookingError::ConfigurationError {
            message: "Venue context is required".to_string(),
        })?;

        let api = match self.api {
            Some(api) => api,
            None => default_api(self.api_config)?,
        };

        let mut wizard = BookingWizard::new(venue, self.session, self.catalog, api);
        if let Some(referral) = &self.referral {
            wizard.apply_referral(referral);
        }

        Ok(wizard)
    }
}

impl Default for BookingFlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http-client")]
fn default_api(config: Option<ApiConfig>) -> BookingResult<Arc<dyn BookingApi + Send + Sync>> {
    let api = HttpBookingApi::new(config.unwrap_or_default())?;
    Ok(Arc::new(api))
}

#[cfg(not(feature = "http-client"))]
fn default_api(_config: Option<ApiConfig>) -> BookingResult<Arc<dyn BookingApi + Send + Sync>> {
    Err(BookingError::ConfigurationError {
        message: "No API client supplied and the http-client feature is disabled".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventType;
    use crate::wizard::WizardStep;
    use chrono::{Duration, Utc};

    #[test]
    fn test_builder_creation() {
        let builder = BookingFlowBuilder::new();
        assert!(builder.venue.is_none());
        assert!(builder.api.is_none());
        assert!(builder.referral.is_none());
    }

    #[test]
    fn test_build_requires_venue() {
        let result = BookingFlowBuilder::new()
            .with_api(Arc::new(MockBookingApi::new()))
            .build();
        assert!(matches!(
            result,
            Err(BookingError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_development_config() {
        let builder = BookingFlowBuilder::development();
        assert!(builder.venue.is_some());
        assert!(builder.api.is_some());
        assert!(builder.session.has_token());
    }

    #[test]
    fn test_build_development_wizard() {
        let wizard = BookingFlowBuilder::development()
            .build()
            .expect("Failed to build development wizard");

        assert_eq!(wizard.step(), WizardStep::BookingInfo);
        assert_eq!(wizard.venue().name, "Demo Banquet Hall");
        assert!(!wizard.catalog().services().is_empty());
    }

    #[test]
    fn test_referral_seeds_draft() {
        let referral = BookingReferral {
            event_date: Some(Utc::now().date_naive() + Duration::days(14)),
            time_slot: Some("Full Day".to_string()),
        };

        let wizard = BookingFlowBuilder::development()
            .with_referral(referral.clone())
            .build()
            .expect("Failed to build wizard");

        assert_eq!(wizard.draft().event_type, Some(EventType::Wedding));
        assert_eq!(wizard.draft().event_date, referral.event_date);
        assert_eq!(wizard.draft().time_slot, referral.time_slot);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = ServiceCatalog::new(Vec::new());
        let wizard = BookingFlowBuilder::development()
            .with_catalog(catalog)
            .build()
            .expect("Failed to build wizard");

        assert!(wizard.catalog().services().is_empty());
    }
}
