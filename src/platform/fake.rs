use super::{AppRegistry, LocationRegistry, LocationService, PlatformInfo, SettingsStore};
use crate::error::PlatformError;
use crate::location::Fix;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct Calls {
    pub settings: AtomicUsize,
    pub views: AtomicUsize,
    pub providers: AtomicUsize,
    pub enabled: AtomicUsize,
    pub fixes: AtomicUsize,
    pub apps: AtomicUsize,
}

impl Calls {
    pub fn location(&self) -> usize {
        self.views.load(Ordering::SeqCst)
            + self.providers.load(Ordering::SeqCst)
            + self.enabled.load(Ordering::SeqCst)
            + self.fixes.load(Ordering::SeqCst)
    }

    pub fn apps(&self) -> usize {
        self.apps.load(Ordering::SeqCst)
    }
}

/// In-memory device with call counters.
#[derive(Default)]
pub struct FakeDevice {
    pub sdk: u32,
    pub tier_fails: bool,
    pub mock_setting: i32,
    pub providers: Vec<String>,
    pub providers_fail: bool,
    pub enabled: HashSet<String>,
    pub fixes: HashMap<String, Fix>,
    pub location_denied: bool,
    pub installed: HashSet<String>,
    pub apps_fail: HashSet<String>,
    pub panic_on_apps: bool,
    pub calls: Calls,
}

impl FakeDevice {
    pub fn modern() -> Self {
        Self {
            sdk: 33,
            providers: vec!["passive".into(), "gps".into(), "network".into(), "fused".into()],
            ..Self::default()
        }
    }

    pub fn legacy(sdk: u32, mock_setting: i32) -> Self {
        Self {
            sdk,
            mock_setting,
            ..Self::modern()
        }
    }

    pub fn enable(mut self, provider: &str) -> Self {
        self.enabled.insert(provider.to_string());
        self
    }

    pub fn with_fix(mut self, provider: &str, is_mock: bool) -> Self {
        self.fixes.insert(
            provider.to_string(),
            Fix::new(provider, -33.92, 18.42, Some(12.0), is_mock),
        );
        self
    }

    pub fn with_provider(mut self, name: &str) -> Self {
        self.providers.push(name.to_string());
        self
    }

    pub fn install(mut self, package: &str) -> Self {
        self.installed.insert(package.to_string());
        self
    }
}

impl PlatformInfo for FakeDevice {
    fn sdk_level(&self) -> Result<u32, PlatformError> {
        if self.tier_fails {
            return Err(PlatformError::Unavailable("getprop".into()));
        }
        Ok(self.sdk)
    }
}

impl SettingsStore for FakeDevice {
    fn secure_int(&self, _key: &str, _default: i32) -> Result<i32, PlatformError> {
        self.calls.settings.fetch_add(1, Ordering::SeqCst);
        Ok(self.mock_setting)
    }
}

impl LocationService for FakeDevice {
    fn locations(&self) -> Box<dyn LocationRegistry + '_> {
        self.calls.views.fetch_add(1, Ordering::SeqCst);
        Box::new(self)
    }
}

impl LocationRegistry for FakeDevice {
    fn all_providers(&self) -> Result<Vec<String>, PlatformError> {
        self.calls.providers.fetch_add(1, Ordering::SeqCst);
        if self.providers_fail {
            return Err(PlatformError::Unavailable("location".into()));
        }
        Ok(self.providers.clone())
    }

    fn is_provider_enabled(&self, name: &str) -> Result<bool, PlatformError> {
        self.calls.enabled.fetch_add(1, Ordering::SeqCst);
        Ok(self.enabled.contains(name))
    }

    fn last_known_fix(&self, name: &str) -> Result<Option<Fix>, PlatformError> {
        self.calls.fixes.fetch_add(1, Ordering::SeqCst);
        if self.location_denied {
            return Err(PlatformError::PermissionDenied(
                "ACCESS_FINE_LOCATION not granted".into(),
            ));
        }
        Ok(self.fixes.get(name).cloned())
    }
}

impl AppRegistry for FakeDevice {
    fn is_installed(&self, package: &str) -> Result<bool, PlatformError> {
        self.calls.apps.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_apps {
            panic!("package manager died");
        }
        if self.apps_fail.contains(package) {
            return Err(PlatformError::Unavailable("package".into()));
        }
        Ok(self.installed.contains(package))
    }
}
