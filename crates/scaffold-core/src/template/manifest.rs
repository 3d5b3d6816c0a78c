//! Template manifest types and parsing
//!
//! A template root may carry a `scaffold.yaml` describing the template and
//! gating optional resources behind feature names (the add-on corpus ships
//! an about dialog, a preferences dialog, a toolbar button and sidebar
//! support as opt-ins). The manifest is optional: without one, every file
//! in the tree is emitted.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScaffoldError};

/// Manifest file name, looked up at the template root. Never emitted
/// into the output tree.
pub const MANIFEST_FILE: &str = "scaffold.yaml";

/// Template root manifest (`scaffold.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    #[serde(default)]
    pub version: Option<String>,

    /// Feature name -> template-relative paths emitted only when the
    /// feature is selected. Paths use forward slashes.
    #[serde(default)]
    pub features: BTreeMap<String, Vec<String>>,
}

impl ScaffoldManifest {
    /// Load the manifest from a template root, if present
    pub fn load(template_dir: &Path) -> Result<Option<Self>> {
        let path = template_dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| ScaffoldError::io(&path, e))?;
        let manifest = serde_yaml::from_str(&content).map_err(|e| ScaffoldError::Manifest {
            path: path.clone(),
            source: e,
        })?;
        Ok(Some(manifest))
    }

    /// Reject selected features the manifest does not declare. The error
    /// carries the declared feature names so the report is actionable.
    pub fn validate_features(&self, selected: &[String]) -> Result<()> {
        for feature in selected {
            if !self.features.contains_key(feature) {
                return Err(ScaffoldError::UnknownFeature {
                    feature: feature.clone(),
                    available: self.feature_names().map(String::from).collect(),
                });
            }
        }
        Ok(())
    }

    /// Whether a template-relative path should be emitted given the
    /// selected features. Files not gated by any feature are always
    /// emitted.
    pub fn includes(&self, rel_path: &str, selected: &[String]) -> bool {
        let mut gated = false;
        for (feature, files) in &self.features {
            if files.iter().any(|f| f == rel_path) {
                if selected.iter().any(|s| s == feature) {
                    return true;
                }
                gated = true;
            }
        }
        !gated
    }

    /// Declared feature names, sorted
    pub fn feature_names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }
}
