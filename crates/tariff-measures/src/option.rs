//! # Measure Options
//!
//! A measure option is one trader-facing way to satisfy a measure. Options
//! are grouped into [`MeasureOptions`]: within a group the trader needs
//! only one option; separate groups are independent alternative sets.

use serde::{Deserialize, Serialize};

/// Threshold refinement, decided by the condition variant and, for
/// weight/volume/unit thresholds, the unit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThresholdSubtype {
    /// Value of the shipment.
    Price,
    /// Value per measurement unit.
    PricePerUnit,
    /// Mass.
    Weight,
    /// Volume.
    Volume,
    /// Item count or other unit.
    Unit,
}

impl ThresholdSubtype {
    /// Stable identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "PRICE",
            Self::PricePerUnit => "PRICE_PER_UNIT",
            Self::Weight => "WEIGHT",
            Self::Volume => "VOLUME",
            Self::Unit => "UNIT",
        }
    }
}

impl std::fmt::Display for ThresholdSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One way to satisfy a measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureOption {
    /// Present a certificate or licence.
    Certificate {
        /// Document code.
        certificate_code: String,
        /// Rendered description.
        description: String,
    },
    /// Declare the goods out of scope.
    Exception {
        /// Document code.
        certificate_code: String,
        /// Rendered description.
        description: String,
    },
    /// Stay on the exempt side of a threshold.
    Threshold {
        /// What is measured.
        subtype: ThresholdSubtype,
        /// Rendered description.
        description: String,
    },
    /// Present both of two certificates.
    MultiCertificate {
        /// `"<code1> & <code2>"`.
        certificate_code: String,
        /// Joined description; absent when both source texts are blank.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Declare an exception and stay under a threshold.
    ExceptionAndThreshold {
        /// Document code of the exception.
        certificate_code: String,
        /// What the threshold measures.
        subtype: ThresholdSubtype,
        /// Joined description.
        description: String,
    },
}

impl MeasureOption {
    /// Type tag, as serialised.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Certificate { .. } => "CERTIFICATE",
            Self::Exception { .. } => "EXCEPTION",
            Self::Threshold { .. } => "THRESHOLD",
            Self::MultiCertificate { .. } => "MULTI_CERTIFICATE",
            Self::ExceptionAndThreshold { .. } => "EXCEPTION_AND_THRESHOLD",
        }
    }

    /// Rendered description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Certificate { description, .. }
            | Self::Exception { description, .. }
            | Self::Threshold { description, .. }
            | Self::ExceptionAndThreshold { description, .. } => Some(description),
            Self::MultiCertificate { description, .. } => description.as_deref(),
        }
    }

    /// Certificate code, where the option has one.
    pub fn certificate_code(&self) -> Option<&str> {
        match self {
            Self::Certificate {
                certificate_code, ..
            }
            | Self::Exception {
                certificate_code, ..
            }
            | Self::MultiCertificate {
                certificate_code, ..
            }
            | Self::ExceptionAndThreshold {
                certificate_code, ..
            } => Some(certificate_code),
            Self::Threshold { .. } => None,
        }
    }
}

/// One alternative set of options for a measure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureOptions {
    /// Options in presentation order.
    pub options: Vec<MeasureOption>,
}

impl MeasureOptions {
    /// Wrap a list of options.
    pub fn new(options: Vec<MeasureOption>) -> Self {
        Self { options }
    }

    /// Whether the group holds no option.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_serialise_with_type_tag() {
        let option = MeasureOption::Threshold {
            subtype: ThresholdSubtype::Volume,
            description: "d".into(),
        };
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(json["type"], "THRESHOLD");
        assert_eq!(json["subtype"], "VOLUME");
        assert_eq!(option.type_tag(), "THRESHOLD");
    }

    #[test]
    fn multi_certificate_without_description_omits_field() {
        let option = MeasureOption::MultiCertificate {
            certificate_code: "C669 & C670".into(),
            description: None,
        };
        let json = serde_json::to_value(&option).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(option.description(), None);
        assert_eq!(option.certificate_code(), Some("C669 & C670"));
    }

    #[test]
    fn thresholds_have_no_certificate_code() {
        let option = MeasureOption::Threshold {
            subtype: ThresholdSubtype::Price,
            description: "d".into(),
        };
        assert_eq!(option.certificate_code(), None);
        assert_eq!(option.description(), Some("d"));
    }
}
