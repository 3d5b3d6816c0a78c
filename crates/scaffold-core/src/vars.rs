//! Substitution map construction
//!
//! Substitution values come from two places: `--set key=value` flags and an
//! optional YAML (or JSON) vars file. Flags win over file entries. Keys are
//! validated when inserted so that a bad key fails the run up front rather
//! than surfacing as an unresolved token later.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScaffoldError};

/// Key/value table applied to templates
#[derive(Debug, Clone, Default)]
pub struct Vars {
    map: BTreeMap<String, String>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key/value pair, validating the key
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        if !is_valid_key(key) {
            return Err(ScaffoldError::InvalidKey {
                key: key.to_string(),
            });
        }
        self.map.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Insert from a raw `key=value` CLI argument
    pub fn insert_pair(&mut self, arg: &str) -> Result<()> {
        let (key, value) = arg.split_once('=').ok_or_else(|| ScaffoldError::MalformedPair {
            arg: arg.to_string(),
        })?;
        self.insert(key, value)
    }

    /// Load a vars file. YAML and JSON both parse (JSON is valid YAML):
    /// `{"slug": "myextension"}` and `slug: myextension` are equivalent.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
        let raw: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str(&content)
            .map_err(|e| ScaffoldError::Manifest {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut vars = Self::new();
        for (key, value) in raw {
            let value = scalar_to_string(&value).ok_or_else(|| ScaffoldError::InvalidValue {
                key: key.clone(),
            })?;
            vars.insert(&key, value)?;
        }
        Ok(vars)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// Keys must embed cleanly into generated identifiers and preference keys
/// (`extensions.<slug>.boolpref`), so only identifier characters are allowed
fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Stringify YAML scalars; mappings and sequences are rejected
fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
