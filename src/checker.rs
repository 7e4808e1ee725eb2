use crate::detector::MockLocationDetector;
use crate::error::DetectError;
use crate::result::{DetectionResult, Signal};
use std::sync::Arc;

/// Caller-facing entry point. Detection itself is synchronous; the async
/// surface only moves it onto the blocking pool. A cancelled task is
/// reported as `DetectError::Unexpected`, same as a panicking collaborator.
#[derive(Clone)]
pub enum MockLocation {
    Device(Arc<MockLocationDetector>),
    /// Context without location services, always genuine.
    Fallback,
}

impl MockLocation {
    pub fn device(detector: MockLocationDetector) -> Self {
        MockLocation::Device(Arc::new(detector))
    }

    pub async fn check_mock_location(&self) -> Result<DetectionResult, DetectError> {
        Ok(DetectionResult::new(self.explain().await?.is_some()))
    }

    pub async fn explain(&self) -> Result<Option<Signal>, DetectError> {
        let detector = match self {
            MockLocation::Fallback => return Ok(None),
            MockLocation::Device(detector) => Arc::clone(detector),
        };

        match tokio::task::spawn_blocking(move || detector.evaluate()).await {
            Ok(result) => result,
            Err(source) => {
                let message = source.to_string();
                log::error!("mock location check failed: {message}");
                Err(DetectError::Unexpected {
                    message,
                    source: Box::new(source),
                })
            }
        }
    }
}
