//! User configuration — scroll tuning, frame rate and keybindings.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/folio/config.toml` (default
//! `~/.config/folio/config.toml`).  Every field is optional; missing values
//! fall back to the built-in defaults and out-of-range values are sanitized
//! after load.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::easing::Easing;
use crate::core::scroller::ScrollTiming;
use crate::error::{read_toml, FolioResult};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    PrevSection,
    NextSection,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::PrevSection,
        Action::NextSection,
        Action::Quit,
    ];

    /// Key used in the `[keys]` table.
    pub fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Named keys, as `(config name, display glyph, code)`.  The first entry
/// for a code is used when writing it back out.
const NAMED_KEYS: &[(&str, &str, KeyCode)] = &[
    ("Up", "↑", KeyCode::Up),
    ("Down", "↓", KeyCode::Down),
    ("Left", "←", KeyCode::Left),
    ("Right", "→", KeyCode::Right),
    ("Enter", "Enter", KeyCode::Enter),
    ("Return", "Enter", KeyCode::Enter),
    ("Esc", "Esc", KeyCode::Esc),
    ("Escape", "Esc", KeyCode::Esc),
    ("Tab", "Tab", KeyCode::Tab),
    ("BackTab", "S-Tab", KeyCode::BackTab),
    ("Backspace", "Bksp", KeyCode::Backspace),
    ("Home", "Home", KeyCode::Home),
    ("End", "End", KeyCode::End),
    ("PageUp", "PgUp", KeyCode::PageUp),
    ("PgUp", "PgUp", KeyCode::PageUp),
    ("PageDown", "PgDn", KeyCode::PageDown),
    ("PgDn", "PgDn", KeyCode::PageDown),
    ("Space", "Space", KeyCode::Char(' ')),
];

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Only CTRL/ALT/SHIFT take part in matching.  Uppercase characters
    /// and BackTab carry an implicit SHIFT that is ignored here.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut wanted = self.modifiers & MODIFIER_MASK;
        let mut got = event.modifiers & MODIFIER_MASK;
        if matches!(self.code, KeyCode::Char(c) if c.is_uppercase())
            || self.code == KeyCode::BackTab
        {
            wanted.remove(KeyModifiers::SHIFT);
            got.remove(KeyModifiers::SHIFT);
        }
        self.code == event.code && wanted == got
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    fn code_name(&self, glyph: bool) -> String {
        if let Some((name, display, _)) = NAMED_KEYS.iter().find(|(_, _, c)| *c == self.code) {
            return if glyph { display } else { name }.to_string();
        }
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// User-friendly display string (e.g. `"Ctrl+c"`, `"↓"`).
    pub fn display(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.code_name(true))
    }

    /// Config-file form (e.g. `"Ctrl+c"`, `"Down"`).
    pub fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.code_name(false))
    }

    /// Parse `"Ctrl+c"`, `"Alt+Up"`, `"j"`, `"PageDown"`, `"F5"`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        // A bare "+" is the plus key, not an empty modifier list.
        let (mods, key) = match s.rsplit_once('+') {
            Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = if let Some((_, _, code)) = NAMED_KEYS
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(key))
        {
            *code
        } else if key.len() > 1 && (key.starts_with('F') || key.starts_with('f')) {
            KeyCode::F(key[1..].parse().ok()?)
        } else {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        };

        Some(Self { code, modifiers })
    }
}

// ───────────────────────────────────────── keymap ────────────

/// Resolved action → bindings table.
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for Keymap {
    fn default() -> Self {
        let p = KeyBind::plain;
        let ch = |c| KeyBind::plain(KeyCode::Char(c));
        let ctrl = |c| KeyBind::new(KeyCode::Char(c), KeyModifiers::CONTROL);

        let bindings = HashMap::from([
            (Action::ScrollUp, vec![p(KeyCode::Up), ch('k')]),
            (Action::ScrollDown, vec![p(KeyCode::Down), ch('j')]),
            (Action::PageUp, vec![p(KeyCode::PageUp), ctrl('u')]),
            (Action::PageDown, vec![p(KeyCode::PageDown), ctrl('d'), ch(' ')]),
            (Action::Top, vec![p(KeyCode::Home), ch('g')]),
            (Action::Bottom, vec![p(KeyCode::End), ch('G')]),
            (Action::PrevSection, vec![p(KeyCode::BackTab), ch('[')]),
            (Action::NextSection, vec![p(KeyCode::Tab), ch(']')]),
            (Action::Quit, vec![ch('q'), p(KeyCode::Esc)]),
        ]);
        Self { bindings }
    }
}

impl Keymap {
    /// Defaults with the `[keys]` overrides applied.  Unknown actions and
    /// unparsable keys are skipped with a warning.
    pub fn from_overrides(overrides: &BTreeMap<String, Vec<String>>) -> Self {
        let mut keymap = Self::default();
        for (name, keys) in overrides {
            let Some(action) = Action::from_config_key(name) else {
                warn!(action = %name, "unknown action in [keys]; skipping");
                continue;
            };
            let parsed: Vec<KeyBind> = keys
                .iter()
                .filter_map(|k| {
                    let bind = KeyBind::parse(k);
                    if bind.is_none() {
                        warn!(action = %name, key = %k, "unparsable key binding; skipping");
                    }
                    bind
                })
                .collect();
            if !parsed.is_empty() {
                keymap.bind(action, parsed);
            }
        }
        keymap
    }

    /// Replace `action`'s bindings, removing those keys from every other
    /// action so one key never maps to two actions.
    pub fn bind(&mut self, action: Action, binds: Vec<KeyBind>) {
        for (other, existing) in self.bindings.iter_mut() {
            if *other != action {
                existing.retain(|b| !binds.contains(b));
            }
        }
        self.bindings.insert(action, binds);
    }

    /// Action bound to a key event.  The binding with the most modifiers
    /// wins when several match.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(action, binds)| binds.iter().map(move |b| (*action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    pub fn bindings(&self, action: Action) -> &[KeyBind] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First binding only, for the status bar.
    pub fn short_binding(&self, action: Action) -> String {
        self.bindings(action)
            .first()
            .map(KeyBind::display)
            .unwrap_or_else(|| "?".into())
    }

    pub fn to_config_map(&self) -> BTreeMap<String, Vec<String>> {
        Action::ALL
            .iter()
            .map(|&action| {
                (
                    action.config_key().to_string(),
                    self.bindings(action)
                        .iter()
                        .map(KeyBind::to_config_string)
                        .collect(),
                )
            })
            .collect()
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Gap left above a section after a smooth scroll (fixed header height).
    pub header_offset_px: f64,
    /// Distance below the scroll offset used as the scroll-spy probe line.
    pub spy_lookahead_px: f64,
    pub ms_per_px: f64,
    pub max_duration_ms: u64,
    pub easing: Easing,
    /// Pixel height of one terminal row.
    pub row_height_px: f64,
    /// Distance moved by a single line scroll or wheel notch.
    pub line_step_px: f64,
    /// Manual scrolling cancels an in-flight smooth scroll.
    pub interrupt_on_input: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset_px: 80.0,
            spy_lookahead_px: 120.0,
            ms_per_px: 0.5,
            max_duration_ms: 1000,
            easing: Easing::QuadInOut,
            row_height_px: 20.0,
            line_step_px: 20.0,
            interrupt_on_input: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub frame_ms: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { frame_ms: 16 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scroll: ScrollConfig,
    pub frame: FrameConfig,
    /// Raw `[keys]` table; resolved through [`Keymap::from_overrides`].
    pub keys: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    /// Load from the default location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> FolioResult<Self> {
        Self::load_from_path(config_path())
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let parsed: Self = read_toml(path)?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = ScrollConfig::default();
        let s = &mut self.scroll;
        let non_negative = |v: f64, fallback: f64| if v.is_finite() && v >= 0.0 { v } else { fallback };
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };

        s.header_offset_px = non_negative(s.header_offset_px, defaults.header_offset_px);
        s.spy_lookahead_px = non_negative(s.spy_lookahead_px, defaults.spy_lookahead_px);
        s.ms_per_px = non_negative(s.ms_per_px, defaults.ms_per_px);
        s.row_height_px = positive(s.row_height_px, defaults.row_height_px);
        s.line_step_px = positive(s.line_step_px, defaults.line_step_px);
        // Keep this bounded for predictable UX.
        s.max_duration_ms = s.max_duration_ms.min(10_000);
        self.frame.frame_ms = self.frame.frame_ms.clamp(1, 250);
        self
    }

    pub fn keymap(&self) -> Keymap {
        Keymap::from_overrides(&self.keys)
    }

    pub fn timing(&self) -> ScrollTiming {
        ScrollTiming {
            header_offset: self.scroll.header_offset_px,
            ms_per_px: self.scroll.ms_per_px,
            max_duration_ms: self.scroll.max_duration_ms as f64,
            easing: self.scroll.easing,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame.frame_ms)
    }

    /// Effective configuration as TOML, with the resolved keymap written
    /// out in full.
    pub fn to_toml(&self) -> FolioResult<String> {
        let mut effective = self.clone();
        effective.keys = self.keymap().to_config_map();
        Ok(toml::to_string_pretty(&effective)?)
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("folio").join("config.toml")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("folio_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from_path(unique_temp_path("missing.toml"))
            .expect("missing config should fall back");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timing(), ScrollTiming::default());
    }

    #[test]
    fn partial_overrides_are_applied_and_sanitized() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
[scroll]
header_offset_px = 40.0
ms_per_px = -3.0
easing = "cubic-in-out"

[frame]
frame_ms = 0

[keys]
quit = ["x"]
"#,
        )
        .expect("write config");

        let config = AppConfig::load_from_path(&path).expect("config should parse");
        let _ = fs::remove_file(&path);

        assert_eq!(config.scroll.header_offset_px, 40.0);
        assert_eq!(config.scroll.ms_per_px, 0.5);
        assert_eq!(config.scroll.easing, Easing::CubicInOut);
        assert_eq!(config.scroll.spy_lookahead_px, 120.0);
        assert_eq!(config.frame.frame_ms, 1);

        let keymap = config.keymap();
        assert_eq!(
            keymap.match_key(key(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(keymap.match_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[scroll\nheader_offset_px = ").expect("write config");
        let result = AppConfig::load_from_path(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(crate::error::FolioError::Parse { .. })));
    }

    #[test]
    fn keybind_parse_and_format() {
        let b = KeyBind::parse("Ctrl+d").expect("ctrl combo");
        assert_eq!(b, KeyBind::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert_eq!(b.to_config_string(), "Ctrl+d");

        let b = KeyBind::parse("pagedown").expect("named key");
        assert_eq!(b.code, KeyCode::PageDown);
        assert_eq!(b.display(), "PgDn");
        assert_eq!(b.to_config_string(), "PageDown");

        assert_eq!(KeyBind::parse("F5").map(|b| b.code), Some(KeyCode::F(5)));
        assert_eq!(KeyBind::parse("+").map(|b| b.code), Some(KeyCode::Char('+')));
        assert_eq!(
            KeyBind::parse("Alt++"),
            Some(KeyBind::new(KeyCode::Char('+'), KeyModifiers::ALT))
        );
        assert!(KeyBind::parse("Hyper+x").is_none());
        assert!(KeyBind::parse("xyz").is_none());
    }

    #[test]
    fn uppercase_binding_ignores_shift() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.match_key(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::Bottom)
        );
        assert_eq!(
            keymap.match_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::PrevSection)
        );
    }

    #[test]
    fn rebinding_steals_key_from_other_actions() {
        let mut keymap = Keymap::default();
        keymap.bind(Action::Quit, vec![KeyBind::plain(KeyCode::Char('j'))]);
        assert_eq!(
            keymap.match_key(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(keymap.bindings(Action::ScrollDown), [KeyBind::plain(KeyCode::Down)]);
    }

    #[test]
    fn effective_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml().expect("serialise");
        assert!(text.contains("quad-in-out"));
        let back: AppConfig = toml::from_str(&text).expect("parse back");
        assert_eq!(back.scroll, config.scroll);
        assert_eq!(back.keymap(), config.keymap());
    }
}
