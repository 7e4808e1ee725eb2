//! Heuristic mock-location detection.
//!
//! Four weak signals are checked in a fixed order and the first positive one
//! wins. Collaborator failures make a single check inconclusive and never
//! abort the run.

use crate::denylist::Denylist;
use crate::error::{DetectError, Panicked, PlatformError};
use crate::location::{Fix, GPS_PROVIDER, NETWORK_PROVIDER};
use crate::platform::{LocationRegistry, Platform};
use crate::result::{DetectionResult, Signal};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Highest API level (Android 5.1) where mock locations are a global toggle.
pub const LEGACY_SDK_MAX: u32 = 22;

pub const MOCK_LOCATION_SETTING: &str = "mock_location";

const SUSPICIOUS_PROVIDER_MARKERS: [&str; 2] = ["mock", "test"];

/// Why a check produced no signal.
#[derive(Debug)]
enum Inconclusive {
    NoSignal(&'static str),
    Failed(PlatformError),
}

impl fmt::Display for Inconclusive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconclusive::NoSignal(reason) => write!(f, "no signal ({reason})"),
            Inconclusive::Failed(PlatformError::PermissionDenied(reason)) => {
                write!(f, "denied ({reason})")
            }
            Inconclusive::Failed(err) => write!(f, "failed ({err})"),
        }
    }
}

pub struct MockLocationDetector {
    platform: Arc<dyn Platform>,
    denylist: Denylist,
}

impl MockLocationDetector {
    pub fn new(platform: Arc<dyn Platform>, denylist: Denylist) -> Self {
        Self { platform, denylist }
    }

    pub fn detect(&self) -> Result<DetectionResult, DetectError> {
        Ok(DetectionResult::new(self.evaluate()?.is_some()))
    }

    /// Run the checks and report which one fired, if any. A panicking
    /// collaborator is reported as `DetectError::Unexpected`.
    pub fn evaluate(&self) -> Result<Option<Signal>, DetectError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.run_checks())).unwrap_or_else(|payload| {
            let source = Panicked(panic_message(payload.as_ref()));
            log::error!("mock location check failed: {source}");
            Err(DetectError::Unexpected {
                message: source.to_string(),
                source: Box::new(source),
            })
        })
    }

    fn run_checks(&self) -> Result<Option<Signal>, DetectError> {
        let sdk = self.platform.sdk_level().map_err(DetectError::Tier)?;
        log::debug!("platform sdk level {sdk}");

        if sdk <= LEGACY_SDK_MAX {
            return Ok(self.check_legacy_setting());
        }

        let locations = self.platform.locations();
        let signal = check_mock_fix(&*locations)
            .or_else(|| check_provider_names(&*locations))
            .or_else(|| self.check_installed_apps());
        Ok(signal)
    }

    fn check_legacy_setting(&self) -> Option<Signal> {
        match self.platform.secure_int(MOCK_LOCATION_SETTING, 0) {
            Ok(0) => None,
            Ok(_) => Some(Signal::LegacySetting),
            Err(e) => {
                log::debug!("legacy setting check inconclusive: {}", Inconclusive::Failed(e));
                None
            }
        }
    }

    fn check_installed_apps(&self) -> Option<Signal> {
        self.denylist.iter().find_map(|(package, info)| {
            match self.platform.is_installed(package) {
                Ok(true) => Some(Signal::FakeGpsApp {
                    package: package.to_string(),
                    name: info.name.clone(),
                }),
                Ok(false) => None,
                Err(e) => {
                    log::debug!("lookup of {package} inconclusive: {}", Inconclusive::Failed(e));
                    None
                }
            }
        })
    }
}

fn check_mock_fix(locations: &dyn LocationRegistry) -> Option<Signal> {
    match last_known_fix(locations) {
        Ok(fix) if fix.is_mock => Some(Signal::MockFix {
            provider: fix.provider,
        }),
        Ok(_) => None,
        Err(reason) => {
            log::debug!("mock fix check inconclusive: {reason}");
            None
        }
    }
}

/// Last cached fix, preferring the satellite provider over the network one.
fn last_known_fix(locations: &dyn LocationRegistry) -> Result<Fix, Inconclusive> {
    let mut any_enabled = false;
    for provider in [GPS_PROVIDER, NETWORK_PROVIDER] {
        if !locations
            .is_provider_enabled(provider)
            .map_err(Inconclusive::Failed)?
        {
            continue;
        }
        any_enabled = true;
        if let Some(fix) = locations
            .last_known_fix(provider)
            .map_err(Inconclusive::Failed)?
        {
            return Ok(fix);
        }
    }

    if any_enabled {
        Err(Inconclusive::NoSignal("no cached fix"))
    } else {
        Err(Inconclusive::NoSignal("no enabled provider"))
    }
}

fn check_provider_names(locations: &dyn LocationRegistry) -> Option<Signal> {
    let providers = match locations.all_providers() {
        Ok(providers) => providers,
        Err(e) => {
            log::debug!("provider name check inconclusive: {}", Inconclusive::Failed(e));
            return None;
        }
    };

    providers
        .into_iter()
        .find(|name| is_suspicious_provider(name))
        .map(|name| Signal::MockProvider { name })
}

fn is_suspicious_provider(name: &str) -> bool {
    let lower = name.to_lowercase();
    SUSPICIOUS_PROVIDER_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
