//! # Pipeline Errors
//!
//! Every failure of a guidance request maps onto a [`ResponseStatus`] so
//! an outer transport can answer without inspecting error internals.
//! Build failures inside the measure engine never reach this type; they
//! are logged and the affected option is omitted.

use tariff_content::ContentError;
use tariff_core::TariffError;
use tariff_measures::MeasureError;
use thiserror::Error;

/// Outcome class of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    /// The commodity or another upstream resource does not exist.
    NotFound,
    /// The request itself is malformed.
    Validation,
    /// Anything else: upstream data or content is inconsistent or
    /// unavailable.
    Internal,
}

impl ResponseStatus {
    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Validation => 400,
            Self::Internal => 500,
        }
    }
}

/// Errors raised while answering a guidance request.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Resource not found upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Measure assembly or synthesis failed.
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// A content store failed.
    #[error(transparent)]
    Content(#[from] ContentError),
}

impl From<TariffError> for PipelineError {
    fn from(err: TariffError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl PipelineError {
    /// Outcome class.
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::NotFound(_) => ResponseStatus::NotFound,
            Self::Validation(_) => ResponseStatus::Validation,
            Self::Measure(_) | Self::Content(_) => ResponseStatus::Internal,
        }
    }

    /// HTTP-equivalent status code.
    pub fn status_code(&self) -> u16 {
        self.status().status_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(PipelineError::NotFound("0302110000".into()).status_code(), 404);
        assert_eq!(PipelineError::Validation("bad".into()).status_code(), 400);
        let inconsistent = PipelineError::from(MeasureError::InconsistentConfiguration {
            document_code: "C669".into(),
            count: 2,
        });
        assert_eq!(inconsistent.status(), ResponseStatus::Internal);
        assert_eq!(inconsistent.status_code(), 500);
    }

    #[test]
    fn invalid_codes_are_validation_errors() {
        let err: PipelineError = tariff_core::CountryCode::new("GBR").unwrap_err().into();
        assert_eq!(err.status(), ResponseStatus::Validation);
        assert!(err.to_string().starts_with("validation error:"));
    }
}
