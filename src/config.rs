use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// User overlay location, before `~` expansion.
const USER_CONFIG_PATH: &str = "~/.config/opsh/config.toml";

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub builtins: BuiltinsConfig,
}

/// How the front end prints a parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AstFormat {
    /// Indented multi-line dump
    #[default]
    Tree,
    /// Single line with explicit grouping
    Line,
    /// Pretty-printed JSON
    Json,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub show_tokens: bool,
    #[serde(default)]
    pub show_ast: bool,
    #[serde(default)]
    pub ast_format: AstFormat,
    /// Run the parsed tree through the executor.
    #[serde(default)]
    pub execute: bool,
    /// Lines that end the session when typed on their own.
    #[serde(default)]
    pub exit_words: Vec<String>,
    /// Empty disables persistent history.
    #[serde(default)]
    pub history_file: String,
    /// Empty disables the log file.
    #[serde(default)]
    pub log_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_prompt() -> String {
    "opsh> ".into()
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            show_tokens: false,
            show_ast: false,
            ast_format: AstFormat::default(),
            execute: false,
            exit_words: Vec::new(),
            history_file: String::new(),
            log_file: String::new(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// History file with `~` expanded, if configured.
    pub fn history_path(&self) -> Option<PathBuf> {
        expand_path(&self.history_file)
    }

    /// Log file with `~` expanded, if configured.
    pub fn log_path(&self) -> Option<PathBuf> {
        expand_path(&self.log_file)
    }
}

fn expand_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(PathBuf::from(shellexpand::tilde(raw).into_owned()))
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct BuiltinsConfig {
    #[serde(default)]
    pub enabled: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    builtins: BuiltinsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    prompt: Option<String>,
    show_tokens: Option<bool>,
    show_ast: Option<bool>,
    ast_format: Option<AstFormat>,
    execute: Option<bool>,
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    exit_words: Vec<String>,
    #[serde(default)]
    remove_exit_words: Vec<String>,
    history_file: Option<String>,
    log_file: Option<String>,
    log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct BuiltinsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    enabled: Vec<String>,
    #[serde(default)]
    remove_enabled: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

fn set_if<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge the overlay from `path`, or from ~/.config/opsh/config.toml
    ///    when no path is given (skipped if it does not exist)
    ///
    /// User config merges with defaults: lists extend, scalars override.
    /// Set `replace = true` in a section to replace its lists entirely.
    /// Use `remove_<field>` lists to subtract specific items from defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let mut config = Self::default_config();
        let overlay = match path {
            Some(p) => Self::load_overlay(p),
            None => {
                let user = PathBuf::from(shellexpand::tilde(USER_CONFIG_PATH).into_owned());
                Self::load_overlay(&user)
            }
        };
        if let Some(overlay) = overlay {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load an overlay file. Missing files are silently skipped;
    /// unreadable or malformed ones are reported and skipped.
    fn load_overlay(path: &Path) -> Option<ConfigOverlay> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                eprintln!("opsh: cannot read {}: {e}", path.display());
                return None;
            }
        };
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("opsh: config parse error in {}: {e}", path.display());
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        let s = overlay.settings;
        set_if(&mut self.settings.prompt, s.prompt);
        set_if(&mut self.settings.show_tokens, s.show_tokens);
        set_if(&mut self.settings.show_ast, s.show_ast);
        set_if(&mut self.settings.ast_format, s.ast_format);
        set_if(&mut self.settings.execute, s.execute);
        set_if(&mut self.settings.history_file, s.history_file);
        set_if(&mut self.settings.log_file, s.log_file);
        set_if(&mut self.settings.log_level, s.log_level);
        merge_list(
            &mut self.settings.exit_words,
            s.exit_words,
            &s.remove_exit_words,
            s.replace,
        );

        // Builtins
        let b = overlay.builtins;
        merge_list(
            &mut self.builtins.enabled,
            b.enabled,
            &b.remove_enabled,
            b.replace,
        );
    }

    /// Render the merged configuration as TOML (for `--dump-config`).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert_eq!(config.settings.prompt, "opsh> ");
        assert!(config.settings.show_ast);
        assert!(!config.settings.show_tokens);
        assert!(config.settings.execute);
        assert_eq!(config.settings.ast_format, AstFormat::Tree);
        assert!(!config.builtins.enabled.is_empty());
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default_config();
        assert!(config.settings.exit_words.contains(&"-1".to_string()));
        assert!(config.settings.exit_words.contains(&"quit".to_string()));
        assert!(config.builtins.enabled.contains(&"echo".to_string()));
        assert!(config.builtins.enabled.contains(&"help".to_string()));
    }

    #[test]
    fn empty_file_uses_struct_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.settings.prompt, "opsh> ");
        assert_eq!(config.settings.log_level, "info");
        assert!(config.builtins.enabled.is_empty());
    }

    #[test]
    fn paths_expand_tilde() {
        let config = Config::default_config();
        let history = config.settings.history_path().unwrap();
        assert!(!history.to_string_lossy().starts_with('~'));
        assert!(history.ends_with("history"));
    }

    #[test]
    fn empty_path_disables() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            history_file = ""
            log_file = "  "
        "#,
        );
        assert_eq!(config.settings.history_path(), None);
        assert_eq!(config.settings.log_path(), None);
    }

    // ── Merge semantics ──

    #[test]
    fn overlay_overrides_scalars() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            prompt = "$ "
            show_tokens = true
            ast_format = "json"
            execute = false
        "#,
        );
        assert_eq!(config.settings.prompt, "$ ");
        assert!(config.settings.show_tokens);
        assert_eq!(config.settings.ast_format, AstFormat::Json);
        assert!(!config.settings.execute);
        // Untouched scalars keep defaults
        assert!(config.settings.show_ast);
    }

    #[test]
    fn overlay_rejects_unknown_format() {
        let result: Result<ConfigOverlay, _> = toml::from_str(
            r#"
            [settings]
            ast_format = "xml"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn format_names_match_between_cli_and_file() {
        for format in AstFormat::value_variants() {
            let cli_name = format.to_possible_value().unwrap().get_name().to_string();
            let file_name = toml::Value::try_from(format).unwrap();
            assert_eq!(file_name.as_str(), Some(cli_name.as_str()));
        }
        assert_eq!(AstFormat::from_str("line", false), Ok(AstFormat::Line));
    }

    #[test]
    fn overlay_removes_builtin() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [builtins]
            remove_enabled = ["cd", "environ"]
        "#,
        );
        assert!(!config.builtins.enabled.contains(&"cd".to_string()));
        assert!(!config.builtins.enabled.contains(&"environ".to_string()));
        assert!(config.builtins.enabled.contains(&"echo".to_string()));
    }

    #[test]
    fn overlay_replace_builtins() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [builtins]
            replace = true
            enabled = ["echo"]
        "#,
        );
        assert_eq!(config.builtins.enabled, vec!["echo"]);
    }

    #[test]
    fn overlay_extends_exit_words_without_duplicates() {
        let mut config = Config::default_config();
        config.apply_overlay_str(
            r#"
            [settings]
            exit_words = ["bye", "quit"]
        "#,
        );
        assert!(config.settings.exit_words.contains(&"bye".to_string()));
        let quits = config
            .settings
            .exit_words
            .iter()
            .filter(|w| *w == "quit")
            .count();
        assert_eq!(quits, 1);
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let original = Config::default_config();
        let mut config = Config::default_config();
        config.apply_overlay_str("");
        assert_eq!(config.builtins.enabled, original.builtins.enabled);
        assert_eq!(config.settings.exit_words, original.settings.exit_words);
        assert_eq!(config.settings.prompt, original.settings.prompt);
    }

    #[test]
    fn load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!("opsh-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[settings]\nprompt = \"% \"\n").unwrap();
        let config = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.settings.prompt, "% ");
        assert!(!config.builtins.enabled.is_empty());
    }

    #[test]
    fn load_missing_path_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/opsh/config.toml")));
        assert_eq!(config.settings.prompt, "opsh> ");
    }

    #[test]
    fn dump_round_trips() {
        let config = Config::default_config();
        let text = config.to_toml().unwrap();
        let reparsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(reparsed.builtins.enabled, config.builtins.enabled);
        assert_eq!(reparsed.settings.ast_format, config.settings.ast_format);
    }
}
