use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use cross_xdg::BaseDirs;
use nu_ansi_term::Color;

use crate::loops::Matching;

/// Everything the engine needs to know, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    /// Pause after every instruction. Zero disables the pause.
    pub delay: Duration,
    pub matching: Matching,
}

impl EngineConfig {
    pub fn new(delay: Duration, matching: Matching) -> Self {
        Self { delay, matching }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_matching(mut self, matching: Matching) -> Self {
        self.matching = matching;
        self
    }
}

/// Supported tape cell widths, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellWidth {
    #[default]
    W8,
    W16,
    W32,
    W64,
}

impl CellWidth {
    pub fn bits(self) -> u32 {
        match self {
            CellWidth::W8 => 8,
            CellWidth::W16 => 16,
            CellWidth::W32 => 32,
            CellWidth::W64 => 64,
        }
    }
}

impl fmt::Display for CellWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for CellWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "8" => Ok(CellWidth::W8),
            "16" => Ok(CellWidth::W16),
            "32" => Ok(CellWidth::W32),
            "64" => Ok(CellWidth::W64),
            other => Err(format!("unsupported cell width '{other}' (expected 8, 16, 32 or 64)")),
        }
    }
}

/// Colors used by the live view.
#[derive(Debug, Clone, PartialEq)]
pub struct Colors {
    pub cursor: Color,
    pub step: Color,
    pub output: Color,
    pub dim: Color,
}

impl Default for Colors {
    fn default() -> Self {
        use crate::theme::catppuccin::Mocha as P;

        Self {
            cursor: P::RED,
            step: P::RED,
            output: P::TEXT,
            dim: P::SURFACE2,
        }
    }
}

/// Settings read from `bf.toml`.
///
/// The file lives at `$BF_CONFIG` when set, otherwise in the XDG config
/// home. Only the `[run]` and `[colors]` sections are read:
///
/// ```toml
/// [run]
/// delay_ms = 25
/// cell_width = 16
/// matching = "balanced"
///
/// [colors]
/// cursor = "#f38ba8"
/// step = "yellow"
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub delay_ms: Option<u64>,
    pub cell_width: Option<CellWidth>,
    pub matching: Option<Matching>,
    pub colors: Colors,
}

impl Settings {
    /// Load settings from the default location, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load() -> Self {
        config_path()
            .and_then(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        Some(Self::parse(&content))
    }

    /// Parse the small TOML subset used by `bf.toml`. Unknown keys and
    /// malformed values are ignored.
    pub fn parse(content: &str) -> Self {
        let sections = parse_sections(content);
        let mut settings = Settings::default();

        if let Some(run) = sections.get("run") {
            settings.delay_ms = run.get("delay_ms").and_then(|v| v.parse().ok());
            settings.cell_width = run.get("cell_width").and_then(|v| v.parse().ok());
            settings.matching = run.get("matching").and_then(|v| v.parse().ok());
        }

        if let Some(colors) = sections.get("colors") {
            macro_rules! set {
                ($field:ident) => {
                    if let Some(v) = colors.get(stringify!($field)).and_then(|s| parse_color(s)) {
                        settings.colors.$field = v;
                    }
                };
            }

            set!(cursor);
            set!(step);
            set!(output);
            set!(dim);
        }

        settings
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("BF_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    // On Windows: resolves to C:\Users\<user>\.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

type Section = HashMap<String, String>;

fn parse_sections(content: &str) -> HashMap<String, Section> {
    let mut sections: HashMap<String, Section> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            current = Some(line[1..line.len() - 1].trim().to_string());
            continue;
        }
        let Some(section) = current.as_ref() else { continue };
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            // Accept quoted or unquoted
            let val = if val_raw.starts_with('"') && val_raw.ends_with('"') && val_raw.len() >= 2 {
                val_raw[1..val_raw.len() - 1].to_string()
            } else {
                val_raw.to_string()
            };
            sections.entry(section.clone()).or_default().insert(key, val);
        }
    }

    sections
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        return None;
    }

    let name = s.to_ascii_lowercase();
    Some(match name.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "purple" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "lightgray" | "light_gray" => Color::LightGray,
        "darkgray" | "dark_grey" | "darkgrey" | "dark_gray" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightmagenta" | "light_magenta" => Color::LightMagenta,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        _ => return None,
    })
}
