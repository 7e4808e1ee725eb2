use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mock-loc")]
#[command(about = "Report whether the device's location comes from a mock GPS source")]
#[command(version = "mock-loc 0.1.0\nPlatforms: android (on-device), adb (host), fallback")]
pub struct Args {
    #[arg(long, value_enum, default_value = "plain")]
    pub format: Format,

    #[arg(long, value_enum, default_value = "auto")]
    pub platform: Platform,

    /// Device serial passed to `adb -s`
    #[arg(long)]
    pub serial: Option<String>,

    /// JSON file mapping fake GPS app identifiers to metadata
    #[arg(long, env = "MOCK_LOC_DENYLIST")]
    pub denylist: Option<PathBuf>,

    /// Print which check fired along with the verdict
    #[arg(long)]
    pub explain: bool,

    #[arg(long)]
    pub verbose: bool,
}

#[derive(Clone, ValueEnum)]
pub enum Format {
    Json,
    Env,
    Plain,
}

#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum Platform {
    Auto,
    Android,
    Adb,
    Fallback,
}

impl Platform {
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Auto => "auto",
            Platform::Android => "android",
            Platform::Adb => "adb",
            Platform::Fallback => "fallback",
        }
    }
}
