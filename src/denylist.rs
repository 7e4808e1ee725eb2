//! Known fake-GPS applications, kept as data so the list can change without
//! touching the detector.

use crate::error::DenylistError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_DENYLIST: &str = include_str!("../data/fake_gps_apps.json");

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Mapping of reverse-domain application identifier to metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct Denylist {
    apps: BTreeMap<String, AppInfo>,
}

impl Denylist {
    pub fn empty() -> Self {
        Self {
            apps: BTreeMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DenylistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, DenylistError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, package: &str, info: AppInfo) {
        self.apps.insert(package.to_string(), info);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AppInfo)> {
        self.apps.iter().map(|(package, info)| (package.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        // The embedded list is checked by `embedded_list_parses`.
        Self::from_json(DEFAULT_DENYLIST).unwrap_or_else(|e| {
            log::error!("embedded denylist is invalid: {e}");
            Self::empty()
        })
    }
}
