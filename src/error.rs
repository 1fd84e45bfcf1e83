use thiserror::Error;

/// Main error type for the booking flow crate
#[derive(Error, Debug)]
pub enum BookingError {
    /// Per-field validation errors
    #[error("Validation failed: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Selected slot became unavailable for the chosen date
    #[error("The slot \"{slot}\" is not available on this date.")]
    AvailabilityConflict { slot: String },

    /// Step exit predicate rejected an advance
    #[error("Step blocked: {step} - {reason}")]
    StepBlocked { step: String, reason: String },

    /// Network/HTTP errors
    #[error("Network error: {message}")]
    NetworkError { message: String },

    /// Submission attempted without an authenticated session
    #[error("Authentication required: no active session token")]
    AuthRequired,

    /// Backend rejected the booking request
    #[error("Booking rejected: HTTP {status} - {message}")]
    SubmissionRejected { status: u16, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Result type alias for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// Create a validation error
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an availability conflict for a named slot
    pub fn availability_conflict(slot: impl Into<String>) -> Self {
        Self::AvailabilityConflict { slot: slot.into() }
    }

    /// Create a step blocked error
    pub fn step_blocked(step: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StepBlocked {
            step: step.into(),
            reason: reason.into(),
        }
    }

    /// Create a network error
    pub fn network_error(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Create a submission rejected error
    pub fn submission_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::SubmissionRejected {
            status,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration_error(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Check if a user-initiated retry could succeed without changing input
    pub fn is_retryable(&self) -> bool {
        match self {
            BookingError::NetworkError { .. } | BookingError::InternalError { .. } => true,
            BookingError::SubmissionRejected { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if error is permanent until the input itself changes
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            BookingError::ValidationError { .. }
                | BookingError::ConfigurationError { .. }
                | BookingError::SerializationError { .. }
                | BookingError::AuthRequired
        )
    }

    /// Get error code for external systems
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::ValidationError { .. } => "VALIDATION_ERROR",
            BookingError::AvailabilityConflict { .. } => "AVAILABILITY_CONFLICT",
            BookingError::StepBlocked { .. } => "STEP_BLOCKED",
            BookingError::NetworkError { .. } => "NETWORK_ERROR",
            BookingError::AuthRequired => "AUTH_REQUIRED",
            BookingError::SubmissionRejected { .. } => "SUBMISSION_REJECTED",
            BookingError::ConfigurationError { .. } => "CONFIGURATION_ERROR",
            BookingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BookingError::InternalError { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for BookingError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError {
            field: "multiple".to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "http-client")]
impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkError {
            message: err.to_string(),
        }
    }
}
