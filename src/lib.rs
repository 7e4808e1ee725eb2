//! Detect whether an Android device is reporting a mock (fake GPS) location.
//!
//! ```no_run
//! use mock_loc::{Denylist, MockLocation, MockLocationDetector, Shell, ShellPlatform};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), mock_loc::DetectError> {
//! let platform = Arc::new(ShellPlatform::new(Shell::Local));
//! let checker = MockLocation::device(MockLocationDetector::new(platform, Denylist::default()));
//! if checker.check_mock_location().await?.is_mock {
//!     eprintln!("mock location detected");
//! }
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod denylist;
pub mod detector;
pub mod error;
pub mod location;
pub mod platform;
pub mod result;

pub use checker::MockLocation;
pub use denylist::{AppInfo, Denylist};
pub use detector::{MockLocationDetector, LEGACY_SDK_MAX};
pub use error::{DenylistError, DetectError, Panicked, PlatformError};
pub use location::Fix;
pub use platform::android::{CommandOutput, CommandRunner, Shell, ShellPlatform};
pub use platform::Platform;
pub use result::{DetectionResult, Report, Signal};
