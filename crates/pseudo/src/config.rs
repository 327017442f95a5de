//! Configuration system for pseudo.
//!
//! Loads config from:
//! 1. Global: ~/.config/pseudo/config.toml
//! 2. Per-project: .pseudo/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [generate]
//! indent_size = 4
//! indent_char = "tab"
//! include_comments = false
//! strict_mode = true
//!
//! [defaults]
//! source = "auto"
//! target = "python"
//! ```

use anyhow::Context;
use pseudo_syntax::{GenerateOptions, IndentChar, SourceTag, TargetTag};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generation settings. Unset keys fall through to the next layer.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GenerateConfig {
    pub indent_size: Option<usize>,
    pub indent_char: Option<IndentChar>,
    pub include_comments: Option<bool>,
    pub strict_mode: Option<bool>,
}

/// Languages used when the command line names none.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Source tag name, or "auto" to detect.
    pub source: Option<String>,
    /// Target tag name.
    pub target: Option<String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PseudoConfig {
    pub generate: GenerateConfig,
    pub defaults: DefaultsConfig,
}

impl PseudoConfig {
    /// Load configuration for a project.
    ///
    /// Loads global config from ~/.config/pseudo/config.toml,
    /// then merges with per-project config from .pseudo/config.toml.
    pub fn load(root: &Path) -> Self {
        Self::load_layers(Self::global_config_path().as_deref(), root)
    }

    fn load_layers(global: Option<&Path>, root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global) = global.and_then(Self::load_file) {
            config = config.merge(global);
        }

        let project_path = root.join(".pseudo").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    /// Get the global config path.
    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("pseudo").join("config.toml"))
    }

    /// Load config from a file path. A missing file is silent; a malformed
    /// one is skipped with a warning.
    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring invalid config");
                None
            }
        }
    }

    /// Merge another config into this one. Keys set in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            generate: GenerateConfig {
                indent_size: other.generate.indent_size.or(self.generate.indent_size),
                indent_char: other.generate.indent_char.or(self.generate.indent_char),
                include_comments: other
                    .generate
                    .include_comments
                    .or(self.generate.include_comments),
                strict_mode: other.generate.strict_mode.or(self.generate.strict_mode),
            },
            defaults: DefaultsConfig {
                source: other.defaults.source.or(self.defaults.source),
                target: other.defaults.target.or(self.defaults.target),
            },
        }
    }

    /// Generation options with every unset key at its default.
    pub fn generate_options(&self) -> GenerateOptions {
        let defaults = GenerateOptions::default();
        let generate = &self.generate;
        GenerateOptions {
            indent_size: generate.indent_size.unwrap_or(defaults.indent_size),
            indent_char: generate.indent_char.unwrap_or(defaults.indent_char),
            include_comments: generate
                .include_comments
                .unwrap_or(defaults.include_comments),
            strict_mode: generate.strict_mode.unwrap_or(defaults.strict_mode),
        }
    }

    /// Configured source tag; `None` means detect.
    pub fn source(&self) -> anyhow::Result<Option<SourceTag>> {
        parse_source(self.defaults.source.as_deref())
            .context("invalid [defaults] source in config")
    }

    /// Configured target tag, if any.
    pub fn target(&self) -> anyhow::Result<Option<TargetTag>> {
        self.defaults
            .target
            .as_deref()
            .map(str::parse::<TargetTag>)
            .transpose()
            .context("invalid [defaults] target in config")
    }
}

/// Parse a source name, where "auto" (or nothing) means detect.
pub fn parse_source(name: Option<&str>) -> anyhow::Result<Option<SourceTag>> {
    match name {
        None => Ok(None),
        Some(name) if name.trim().eq_ignore_ascii_case("auto") => Ok(None),
        Some(name) => Ok(Some(name.parse()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = PseudoConfig::default();
        assert_eq!(config.generate_options(), GenerateOptions::default());
        assert_eq!(config.source().unwrap(), None);
        assert_eq!(config.target().unwrap(), None);
    }

    #[test]
    fn test_load_project_config() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir.path().join(".pseudo"),
            r#"
[generate]
indent_size = 4
indent_char = "tab"
include_comments = false

[defaults]
target = "py"
"#,
        );

        let config = PseudoConfig::load_layers(None, dir.path());
        let options = config.generate_options();
        assert_eq!(options.indent_size, 4);
        assert_eq!(options.indent_char, IndentChar::Tab);
        assert!(!options.include_comments);
        assert!(!options.strict_mode); // default
        assert_eq!(config.target().unwrap(), Some(TargetTag::Python));
    }

    #[test]
    fn test_project_overrides_global_per_key() {
        let global_dir = TempDir::new().unwrap();
        let global = write_config(
            global_dir.path(),
            r#"
[generate]
indent_size = 8
strict_mode = true

[defaults]
target = "go"
"#,
        );
        let project = TempDir::new().unwrap();
        write_config(
            &project.path().join(".pseudo"),
            r#"
[generate]
indent_size = 3
"#,
        );

        let config = PseudoConfig::load_layers(Some(&global), project.path());
        let options = config.generate_options();
        assert_eq!(options.indent_size, 3);
        assert!(options.strict_mode, "unset in project, kept from global");
        assert_eq!(config.target().unwrap(), Some(TargetTag::Go));
    }

    #[test]
    fn test_invalid_config_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_config(&dir.path().join(".pseudo"), "[generate\nindent_size = ");
        let config = PseudoConfig::load_layers(None, dir.path());
        assert_eq!(config, PseudoConfig::default());
    }

    #[test]
    fn test_source_auto_means_detect() {
        assert_eq!(parse_source(Some("auto")).unwrap(), None);
        assert_eq!(parse_source(Some("AUTO")).unwrap(), None);
        assert_eq!(
            parse_source(Some("english")).unwrap(),
            Some(SourceTag::Natural)
        );
        assert!(parse_source(Some("cobol")).is_err());
    }

    #[test]
    fn test_unknown_target_is_an_error() {
        let config = PseudoConfig {
            defaults: DefaultsConfig {
                target: Some("rust".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.target().is_err());
    }
}
