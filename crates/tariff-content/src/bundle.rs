//! # Content Bundles
//!
//! A content bundle is a single YAML or JSON file holding everything the
//! in-memory adapters serve: document descriptions, guidance steps,
//! headers, super-headers and prohibition descriptions. Every section is
//! optional and defaults to empty.
//!
//! ```yaml
//! documents:
//!   - document_code: C669
//!     trade_type: IMPORT
//!     locale: en
//!     description: You need a catch certificate.
//! super_headers:
//!   - { id: 1, order_index: 1, description: Before you buy, user_types: [IMPORTER], locale: en }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::documents::{DocumentDescription, InMemoryDocumentStore};
use crate::error::ContentError;
use crate::guidance::{GuidanceStep, InMemoryGuidanceStore, NavigationHeader, NavigationSuperHeader};
use crate::prohibitions::{ProhibitionDescription, ProhibitionSnapshot};

/// All content served by the in-memory adapters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBundle {
    /// Document description overrides.
    #[serde(default)]
    pub documents: Vec<DocumentDescription>,
    /// Guidance steps.
    #[serde(default)]
    pub steps: Vec<GuidanceStep>,
    /// Navigation headers.
    #[serde(default)]
    pub headers: Vec<NavigationHeader>,
    /// Navigation super-headers.
    #[serde(default)]
    pub super_headers: Vec<NavigationSuperHeader>,
    /// Prohibition descriptions.
    #[serde(default)]
    pub prohibitions: Vec<ProhibitionDescription>,
}

impl ContentBundle {
    /// Load a bundle from disk. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let shown = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: shown.clone(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let bundle = if is_json {
            Self::from_json(&raw)
        } else {
            Self::from_yaml(&raw)
        }
        .map_err(|reason| ContentError::Parse {
            path: shown.clone(),
            reason,
        })?;
        tracing::info!(
            path = %shown,
            documents = bundle.documents.len(),
            steps = bundle.steps.len(),
            headers = bundle.headers.len(),
            super_headers = bundle.super_headers.len(),
            prohibitions = bundle.prohibitions.len(),
            "loaded content bundle"
        );
        Ok(bundle)
    }

    /// Parse a bundle from YAML text.
    pub fn from_yaml(raw: &str) -> Result<Self, String> {
        serde_yaml::from_str(raw).map_err(|e| e.to_string())
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }

    /// Split the bundle into its three in-memory adapters.
    pub fn into_adapters(self) -> (InMemoryDocumentStore, InMemoryGuidanceStore, ProhibitionSnapshot) {
        (
            InMemoryDocumentStore::new(self.documents),
            InMemoryGuidanceStore::new(self.steps, self.headers, self.super_headers),
            ProhibitionSnapshot::new(self.prohibitions),
        )
    }
}
