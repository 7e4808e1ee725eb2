mod args;

use args::{Args, Format, Platform};
use chrono::Utc;
use clap::Parser;
use mock_loc::{
    Denylist, DenylistError, MockLocation, MockLocationDetector, Report, Shell, ShellPlatform,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let platform = resolve_platform(args.platform.clone());
    let checker = match build_checker(&platform, &args) {
        Ok(checker) => checker,
        Err(e) => {
            eprintln!("mock-loc: {}", e);
            process::exit(1);
        }
    };

    let signal = match checker.explain().await {
        Ok(signal) => signal,
        Err(e) => {
            eprintln!("mock-loc: {}", e);
            process::exit(1);
        }
    };
    let report = Report::new(signal, platform.name(), Utc::now());

    match args.format {
        Format::Json => {
            let json = if args.explain {
                serde_json::to_string(&report)
            } else {
                serde_json::to_string(&mock_loc::DetectionResult::new(report.is_mock))
            };
            match json {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("mock-loc: {}", e);
                    process::exit(1);
                }
            }
        }
        Format::Env => {
            println!("IS_MOCK={}", u8::from(report.is_mock));
            if args.explain {
                if let Some(signal) = &report.signal {
                    println!("SIGNAL=\"{}\"", signal);
                }
                println!("PLATFORM={}", report.platform);
                println!("TS={}", report.checked_at.to_rfc3339());
            }
        }
        Format::Plain => match (&report.signal, args.explain) {
            (Some(signal), true) => println!("mock ({})", signal),
            (Some(_), false) => println!("mock"),
            (None, _) => println!("genuine"),
        },
    }
}

fn resolve_platform(requested: Platform) -> Platform {
    match requested {
        Platform::Auto => {
            #[cfg(target_os = "android")]
            {
                Platform::Android
            }
            #[cfg(not(target_os = "android"))]
            {
                Platform::Fallback
            }
        }
        other => other,
    }
}

fn build_checker(platform: &Platform, args: &Args) -> Result<MockLocation, DenylistError> {
    let shell = match platform {
        Platform::Android => Shell::Local,
        Platform::Adb => Shell::Adb {
            serial: args.serial.clone(),
        },
        Platform::Fallback | Platform::Auto => {
            log::debug!("no location services on this platform; reporting genuine");
            return Ok(MockLocation::Fallback);
        }
    };

    let denylist = match &args.denylist {
        Some(path) => Denylist::from_path(path)?,
        None => Denylist::default(),
    };
    log::debug!("checking {} known fake GPS apps", denylist.len());

    let platform = Arc::new(ShellPlatform::new(shell));
    Ok(MockLocation::device(MockLocationDetector::new(
        platform, denylist,
    )))
}
