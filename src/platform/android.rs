//! Android collaborators backed by the platform's own shell tools
//! (`getprop`, `settings`, `dumpsys`, `pm`), run either on the device itself
//! or from a host through `adb shell`.

use super::{AppRegistry, LocationRegistry, LocationService, PlatformInfo, SettingsStore};
use crate::error::PlatformError;
use crate::location::Fix;
use std::cell::OnceCell;
use std::io;
use std::process::Command;

const PROVIDERS_ALLOWED_SETTING: &str = "location_providers_allowed";
const MOCK_TAG: &str = " [mock]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Runs one platform tool, e.g. `["pm", "path", "com.example"]`.
pub trait CommandRunner: Send + Sync {
    fn output(&self, args: &[&str]) -> Result<CommandOutput, PlatformError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    Local,
    Adb { serial: Option<String> },
}

impl Shell {
    fn command(&self, args: &[&str]) -> Command {
        match self {
            Shell::Local => {
                let mut command = Command::new(args[0]);
                command.args(&args[1..]);
                command
            }
            Shell::Adb { serial } => {
                let mut command = Command::new("adb");
                if let Some(serial) = serial {
                    command.arg("-s").arg(serial);
                }
                command.arg("shell").args(args);
                command
            }
        }
    }
}

impl CommandRunner for Shell {
    fn output(&self, args: &[&str]) -> Result<CommandOutput, PlatformError> {
        log::debug!("running `{}` via {self:?}", args.join(" "));
        let output = self.command(args).output().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PlatformError::Unavailable(args.join(" ")),
            _ => PlatformError::Io(e),
        })?;
        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn is_denial(output: &str) -> bool {
    output.contains("Permission Denial") || output.contains("SecurityException")
}

pub struct ShellPlatform<R = Shell> {
    runner: R,
}

impl<R: CommandRunner> ShellPlatform<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run a tool and return its status and stdout. A non-zero exit is not
    /// an error here so callers can decide what it means.
    fn run(&self, args: &[&str]) -> Result<(i32, String), PlatformError> {
        let output = self.runner.output(args)?;
        if is_denial(&output.stdout) || is_denial(&output.stderr) {
            return Err(PlatformError::PermissionDenied(args.join(" ")));
        }
        Ok((output.status, output.stdout))
    }

    fn run_ok(&self, args: &[&str]) -> Result<String, PlatformError> {
        let (status, stdout) = self.run(args)?;
        if status != 0 {
            return Err(PlatformError::Command {
                command: args.join(" "),
                status,
                stderr: stdout.trim().to_string(),
            });
        }
        Ok(stdout)
    }

    fn location_dump(&self) -> Result<LocationDump, PlatformError> {
        let output = self.run_ok(&["dumpsys", "location"])?;
        Ok(LocationDump::parse(&output))
    }
}

impl<R: CommandRunner> PlatformInfo for ShellPlatform<R> {
    fn sdk_level(&self) -> Result<u32, PlatformError> {
        let output = self.run_ok(&["getprop", "ro.build.version.sdk"])?;
        output.trim().parse().map_err(|_| PlatformError::Parse {
            command: "getprop ro.build.version.sdk".into(),
            output: output.trim().to_string(),
        })
    }
}

impl<R: CommandRunner> SettingsStore for ShellPlatform<R> {
    fn secure_int(&self, key: &str, default: i32) -> Result<i32, PlatformError> {
        let output = self.run_ok(&["settings", "get", "secure", key])?;
        parse_setting_int(&output, default).ok_or_else(|| PlatformError::Parse {
            command: format!("settings get secure {key}"),
            output: output.trim().to_string(),
        })
    }
}

impl<R: CommandRunner> LocationService for ShellPlatform<R> {
    fn locations(&self) -> Box<dyn LocationRegistry + '_> {
        Box::new(LocationView {
            platform: self,
            dump: OnceCell::new(),
        })
    }
}

impl<R: CommandRunner> AppRegistry for ShellPlatform<R> {
    fn is_installed(&self, package: &str) -> Result<bool, PlatformError> {
        let (_, stdout) = self.run(&["pm", "path", package])?;
        Ok(stdout
            .lines()
            .any(|line| line.trim().starts_with("package:")))
    }
}

/// One `dumpsys location` snapshot, read on first use.
struct LocationView<'a, R> {
    platform: &'a ShellPlatform<R>,
    dump: OnceCell<LocationDump>,
}

impl<R: CommandRunner> LocationView<'_, R> {
    fn dump(&self) -> Result<&LocationDump, PlatformError> {
        if let Some(dump) = self.dump.get() {
            return Ok(dump);
        }
        let dump = self.platform.location_dump()?;
        Ok(self.dump.get_or_init(|| dump))
    }
}

impl<R: CommandRunner> LocationRegistry for LocationView<'_, R> {
    fn all_providers(&self) -> Result<Vec<String>, PlatformError> {
        Ok(self.dump()?.providers.iter().map(ProviderState::label).collect())
    }

    fn is_provider_enabled(&self, name: &str) -> Result<bool, PlatformError> {
        if let Some(enabled) = self.dump()?.provider(name).and_then(|p| p.enabled) {
            return Ok(enabled);
        }
        let allowed = self
            .platform
            .run_ok(&["settings", "get", "secure", PROVIDERS_ALLOWED_SETTING])?;
        Ok(allowed.trim().split(',').any(|p| p.trim() == name))
    }

    fn last_known_fix(&self, name: &str) -> Result<Option<Fix>, PlatformError> {
        let provider = self
            .dump()?
            .provider(name)
            .ok_or_else(|| PlatformError::ProviderNotFound(name.to_string()))?;
        Ok(provider.last_fix.clone().map(|mut fix| {
            fix.is_mock |= provider.mock;
            fix
        }))
    }
}

fn parse_setting_int(output: &str, default: i32) -> Option<i32> {
    match output.trim() {
        "" | "null" => Some(default),
        value => value.parse().ok(),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ProviderState {
    name: String,
    /// Replaced through `addTestProvider`, shown as `gps provider [mock]:`.
    mock: bool,
    enabled: Option<bool>,
    last_fix: Option<Fix>,
}

impl ProviderState {
    fn label(&self) -> String {
        if self.mock {
            format!("{}{MOCK_TAG}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    ProviderList,
    LastKnown,
}

struct SectionState {
    kind: Section,
    indent: usize,
    child_indent: Option<usize>,
}

/// What `dumpsys location` says about registered providers.
#[derive(Debug, Default)]
struct LocationDump {
    providers: Vec<ProviderState>,
}

impl LocationDump {
    fn parse(output: &str) -> Self {
        let mut dump = Self::default();
        let mut current: Option<usize> = None;
        let mut provider_indent = 0;
        let mut section: Option<SectionState> = None;

        for line in output.lines() {
            let indent = line.len() - line.trim_start().len();
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if section.as_ref().is_some_and(|s| indent <= s.indent) {
                section = None;
            }

            let kind = match trimmed {
                "Active Providers:" | "All Providers:" => Some(Section::ProviderList),
                "Last Known Locations:" => Some(Section::LastKnown),
                _ => None,
            };
            if let Some(kind) = kind {
                section = Some(SectionState {
                    kind,
                    indent,
                    child_indent: None,
                });
                current = None;
                continue;
            }

            if let Some(state) = section.as_mut() {
                let child_indent = *state.child_indent.get_or_insert(indent);
                if indent != child_indent {
                    continue;
                }
                let Some((name, rest)) = trimmed.split_once(':') else {
                    continue;
                };
                let name = name.trim();
                if name.is_empty() || name.contains(' ') {
                    continue;
                }
                let index = dump.entry(name, false);
                if state.kind == Section::LastKnown {
                    if let Some(fix) = Fix::parse(rest) {
                        dump.providers[index].last_fix = Some(fix);
                    }
                }
                continue;
            }

            if let Some((name, mock)) = provider_header(trimmed) {
                current = Some(dump.entry(name, mock));
                provider_indent = indent;
                continue;
            }

            if indent <= provider_indent {
                current = None;
            }

            let Some(index) = current else { continue };
            if let Some(rest) = trimmed.strip_prefix("last location=") {
                if let Some(fix) = Fix::parse(rest) {
                    dump.providers[index].last_fix = Some(fix);
                }
            } else if let Some(value) = trimmed.strip_prefix("enabled=") {
                dump.providers[index].enabled = match value {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                };
            }
        }

        dump
    }

    fn entry(&mut self, name: &str, mock: bool) -> usize {
        if let Some(index) = self.providers.iter().position(|p| p.name == name) {
            self.providers[index].mock |= mock;
            return index;
        }
        self.providers.push(ProviderState {
            name: name.to_string(),
            mock,
            enabled: None,
            last_fix: None,
        });
        self.providers.len() - 1
    }

    fn provider(&self, name: &str) -> Option<&ProviderState> {
        self.providers.iter().find(|p| p.name == name)
    }
}

/// `gps provider:` or `gps provider [mock]:`
fn provider_header(line: &str) -> Option<(&str, bool)> {
    let head = line.strip_suffix(':')?;
    let (head, mock) = match head.strip_suffix(MOCK_TAG) {
        Some(head) => (head, true),
        None => (head, false),
    };
    let name = head.strip_suffix(" provider")?;
    if name.is_empty() || name.contains(' ') {
        return None;
    }
    Some((name, mock))
}
