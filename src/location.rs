use serde::{Deserialize, Serialize};

pub const GPS_PROVIDER: &str = "gps";
pub const NETWORK_PROVIDER: &str = "network";

/// A cached position fix as reported by a location provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Fix {
    pub provider: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
    pub is_mock: bool,
}

impl Fix {
    pub fn new(provider: &str, lat: f64, lon: f64, acc: Option<f64>, is_mock: bool) -> Self {
        Self {
            provider: provider.to_string(),
            latitude: lat,
            longitude: lon,
            accuracy_m: acc,
            is_mock,
        }
    }

    /// Parse the body of Android's `Location.toString()`, e.g.
    /// `Location[gps 37.421998,-122.084000 hAcc=5.0 et=+1h2m mock]`.
    pub fn parse(text: &str) -> Option<Self> {
        let start = text.find("Location[")? + "Location[".len();
        let end = text.rfind(']').filter(|&end| end >= start)?;
        let body = &text[start..end];

        let mut tokens = body.split_whitespace();
        let provider = tokens.next()?;
        let (lat, lon) = tokens.next()?.split_once(',')?;
        let latitude = lat.parse().ok()?;
        let longitude = lon.parse().ok()?;

        let mut accuracy = None;
        let mut is_mock = false;
        for token in tokens {
            if token == "mock" {
                is_mock = true;
            } else if let Some(value) = token
                .strip_prefix("hAcc=")
                .or_else(|| token.strip_prefix("acc="))
            {
                accuracy = value.parse().ok();
            }
        }

        Some(Self::new(provider, latitude, longitude, accuracy, is_mock))
    }
}
