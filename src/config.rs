use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cross_xdg::BaseDirs;
use nu_ansi_term::Color;

/// Where the debug trace goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TraceTarget {
    /// Share stdout with the program; `.` output is shown as `print:` lines.
    Stdout,
    /// Keep stdout for program output only.
    Stderr,
}

impl TraceTarget {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stdout" => Some(TraceTarget::Stdout),
            "stderr" => Some(TraceTarget::Stderr),
            _ => None,
        }
    }
}

/// Interpreter settings resolved from `bf.toml` and the environment.
/// Command-line flags are layered on top by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub debug: bool,
    pub trace: TraceTarget,
    pub color: bool,
    pub cell_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            trace: TraceTarget::Stdout,
            color: true,
            cell_color: Color::Yellow,
        }
    }
}

impl Settings {
    /// Defaults, then the config file, then `BF_DEBUG` / `BF_TRACE` / `NO_COLOR`.
    pub fn load() -> Self {
        let mut settings = config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::from_toml_str(&content))
            .unwrap_or_default();
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Read the `[interpreter]` table of a config file. Unknown keys and
    /// unparsable values keep their defaults.
    pub fn from_toml_str(content: &str) -> Self {
        // Very small hand-rolled parser: only `key = value` pairs inside [interpreter].
        let mut in_section = false;
        let mut map: HashMap<String, String> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_section = section.trim() == "interpreter";
                continue;
            }
            if !in_section {
                continue;
            }
            if let Some((key, val_raw)) = line.split_once('=') {
                let val_raw = val_raw.trim();
                // Accept quoted or unquoted
                let val = val_raw
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(val_raw);
                map.insert(key.trim().to_string(), val.to_string());
            }
        }

        let mut cfg = Settings::default();
        if let Some(v) = map.get("debug").and_then(|s| parse_bool(s)) {
            cfg.debug = v;
        }
        if let Some(v) = map.get("trace").and_then(|s| TraceTarget::parse(s)) {
            cfg.trace = v;
        }
        if let Some(v) = map.get("color").and_then(|s| parse_bool(s)) {
            cfg.color = v;
        }
        if let Some(v) = map.get("cell_color").and_then(|s| parse_color(s)) {
            cfg.cell_color = v;
        }
        cfg
    }

    /// Overlay environment variables looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("BF_DEBUG").and_then(|s| parse_bool(&s)) {
            self.debug = v;
        }
        if let Some(v) = var("BF_TRACE").and_then(|s| TraceTarget::parse(&s)) {
            self.trace = v;
        }
        if var("NO_COLOR").is_some() {
            self.color = false;
        }
    }
}

/// `BF_CONFIG` if set, otherwise `$XDG_CONFIG_HOME/bf.toml`.
fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var("BF_CONFIG") {
        return Some(PathBuf::from(explicit));
    }

    // On Linux: resolves to /home/<user>/.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
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
        "gray" | "grey" | "darkgray" | "dark_gray" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightyellow" | "light_yellow" => Color::LightYellow,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightmagenta" | "light_magenta" => Color::LightMagenta,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        _ => return None,
    })
}
