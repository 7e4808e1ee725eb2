use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The verdict handed back to callers: `{"isMock": bool}`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_mock: bool,
}

impl DetectionResult {
    pub fn new(is_mock: bool) -> Self {
        Self { is_mock }
    }
}

/// Which check produced a positive verdict.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Signal {
    LegacySetting,
    MockFix { provider: String },
    MockProvider { name: String },
    FakeGpsApp { package: String, name: String },
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::LegacySetting => write!(f, "mock locations allowed in developer settings"),
            Signal::MockFix { provider } => write!(f, "last {provider} fix came from a mock provider"),
            Signal::MockProvider { name } => write!(f, "mock location provider registered: {name}"),
            Signal::FakeGpsApp { package, name } => {
                write!(f, "fake GPS app installed: {name} ({package})")
            }
        }
    }
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub is_mock: bool,
    pub signal: Option<Signal>,
    pub platform: String,
    pub checked_at: DateTime<Utc>,
}

impl Report {
    pub fn new(signal: Option<Signal>, platform: &str, checked_at: DateTime<Utc>) -> Self {
        Self {
            is_mock: signal.is_some(),
            signal,
            platform: platform.to_string(),
            checked_at,
        }
    }
}
