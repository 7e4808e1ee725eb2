//! Narrow capabilities the detector needs from the operating system.

pub mod android;
#[cfg(test)]
pub mod fake;

use crate::error::PlatformError;
use crate::location::Fix;

pub trait PlatformInfo {
    /// API level of the running OS, compared once against the legacy threshold.
    fn sdk_level(&self) -> Result<u32, PlatformError>;
}

pub trait SettingsStore {
    fn secure_int(&self, key: &str, default: i32) -> Result<i32, PlatformError>;
}

pub trait LocationRegistry {
    fn all_providers(&self) -> Result<Vec<String>, PlatformError>;
    fn is_provider_enabled(&self, name: &str) -> Result<bool, PlatformError>;
    fn last_known_fix(&self, name: &str) -> Result<Option<Fix>, PlatformError>;
}

impl<T: LocationRegistry + ?Sized> LocationRegistry for &T {
    fn all_providers(&self) -> Result<Vec<String>, PlatformError> {
        (**self).all_providers()
    }

    fn is_provider_enabled(&self, name: &str) -> Result<bool, PlatformError> {
        (**self).is_provider_enabled(name)
    }

    fn last_known_fix(&self, name: &str) -> Result<Option<Fix>, PlatformError> {
        (**self).last_known_fix(name)
    }
}

pub trait LocationService {
    /// A registry view for one detection run. Every query made through the
    /// view sees the same snapshot of the location service.
    fn locations(&self) -> Box<dyn LocationRegistry + '_>;
}

pub trait AppRegistry {
    fn is_installed(&self, package: &str) -> Result<bool, PlatformError>;
}

/// The full capability set handed to the detector.
pub trait Platform:
    PlatformInfo + SettingsStore + LocationService + AppRegistry + Send + Sync
{
}

impl<T> Platform for T where
    T: PlatformInfo + SettingsStore + LocationService + AppRegistry + Send + Sync
{
}
