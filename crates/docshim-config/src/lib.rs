//! Configuration management for docshim.
//!
//! Parses `docshim.toml` with serde and discovers the file in the current
//! directory or its parents when no path is given. CLI settings are applied
//! during load via [`CliSettings`].
//!
//! `output.dir` and component `class` values expand `$VAR`, `${VAR}` and
//! `${VAR:-default}` from the environment.
//!
//! ```toml
//! [render]
//! format = "json"
//! pretty = true
//!
//! [output]
//! dir = "${BUILD_DIR:-out}"
//!
//! [components.Note]
//! element = "aside"
//! class = "note"
//! ```

mod expand;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docshim.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override JSON pretty-printing.
    pub pretty: Option<bool>,
}

/// Output format for rendered documents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// HTML fragment.
    #[default]
    Html,
    /// JSON tree of target primitives.
    Json,
}

impl OutputFormat {
    /// File extension for written documents.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rendering options.
    pub render: RenderConfig,
    /// Output location (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Caller component overrides keyed by component name.
    pub components: BTreeMap<String, ComponentOverride>,

    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Rendering options.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output format.
    pub format: OutputFormat,
    /// Pretty-print JSON output.
    pub pretty: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Resolved output configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory for rendered files. `None` writes to stdout.
    pub dir: Option<PathBuf>,
}

/// Replace a component with a plain host element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentOverride {
    /// Host element name (e.g. `aside`).
    pub element: String,
    /// Class tokens set on the element.
    pub class: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// A referenced environment variable could not be read.
    #[error("Cannot expand `{var}` in {field}: {source}")]
    EnvVar {
        /// Config field path (e.g. `output.dir`).
        field: String,
        /// Variable name.
        var: String,
        /// Lookup failure.
        source: std::env::VarError,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `docshim.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, or if
    /// reading, parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(dir) = &settings.output_dir {
            self.output_resolved.dir = Some(dir.clone());
        }
        if let Some(format) = settings.format {
            self.render.format = format;
        }
        if let Some(pretty) = settings.pretty {
            self.render.pretty = pretty;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    fn expand_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(dir) = &mut self.output.dir {
            *dir = expand::expand_vars(dir, "output.dir")?;
        }
        for (name, component) in &mut self.components {
            if let Some(class) = &mut component.class {
                *class = expand::expand_vars(class, &format!("components.{name}.class"))?;
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        self.output_resolved = OutputConfig {
            dir: self.output.dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dir.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Validation(
                "output.dir cannot be empty".to_owned(),
            ));
        }

        for (name, component) in &self.components {
            if name.is_empty() {
                return Err(ConfigError::Validation(
                    "component names cannot be empty".to_owned(),
                ));
            }
            if !is_element_name(&component.element) {
                return Err(ConfigError::Validation(format!(
                    "components.{name}.element must be a non-empty element name, got {:?}",
                    component.element
                )));
            }
        }

        Ok(())
    }
}

/// ASCII letter followed by ASCII alphanumerics or hyphens.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.render.format, OutputFormat::Html);
        assert!(!config.render.pretty);
        assert!(config.components.is_empty());
        assert_eq!(config.output_resolved.dir, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.render.format, OutputFormat::Html);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
format = "json"
pretty = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.format, OutputFormat::Json);
        assert!(config.render.pretty);
    }

    #[test]
    fn test_parse_unknown_format() {
        let toml = r#"
[render]
format = "pdf"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_parse_components() {
        let toml = r#"
[components.Note]
element = "aside"
class = "note"

[components.Frame]
element = "figure"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.components.get("Note"),
            Some(&ComponentOverride {
                element: "aside".to_owned(),
                class: Some("note".to_owned()),
            })
        );
        assert_eq!(config.components["Frame"].class, None);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[output]
dir = "site/html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.output_resolved.dir,
            Some(PathBuf::from("/project/site/html"))
        );
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let toml = r#"
[output]
dir = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("output.dir"));
    }

    #[test]
    fn test_validate_bad_element() {
        let toml = r#"
[components.Note]
element = "<script>"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("components.Note.element"));
    }

    #[test]
    fn test_element_names() {
        assert!(is_element_name("aside"));
        assert!(is_element_name("h2"));
        assert!(is_element_name("my-widget"));
        assert!(!is_element_name(""));
        assert!(!is_element_name("2col"));
        assert!(!is_element_name("a b"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            format: Some(OutputFormat::Json),
            ..CliSettings::default()
        });
        assert_eq!(config.output_resolved.dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.render.format, OutputFormat::Json);
        assert!(!config.render.pretty);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshim.toml");
        std::fs::write(
            &path,
            r#"
[render]
format = "json"

[output]
dir = "out"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.render.format, OutputFormat::Json);
        assert_eq!(config.output_resolved.dir, Some(dir.path().join("out")));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshim.toml");
        std::fs::write(&path, "[render]\npretty = false\n").unwrap();

        let settings = CliSettings {
            pretty: Some(true),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(config.render.pretty);
    }

    #[test]
    fn test_load_expands_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshim.toml");
        std::fs::write(
            &path,
            r#"
[output]
dir = "${DOCSHIM_TEST_LOAD_UNSET:-site}/html"

[components.Note]
element = "aside"
class = "note $DOCSHIM_TEST_LOAD_THEME"
"#,
        )
        .unwrap();
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("DOCSHIM_TEST_LOAD_THEME", "dark");
        }

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.output_resolved.dir, Some(dir.path().join("site/html")));
        assert_eq!(config.components["Note"].class.as_deref(), Some("note dark"));
        unsafe {
            std::env::remove_var("DOCSHIM_TEST_LOAD_THEME");
        }
    }

    #[test]
    fn test_load_unset_variable_names_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshim.toml");
        std::fs::write(
            &path,
            "[components.Tip]\nelement = \"aside\"\nclass = \"${DOCSHIM_TEST_LOAD_MISSING}\"\n",
        )
        .unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        let ConfigError::EnvVar { field, var, .. } = &err else {
            panic!("expected env var error, got {err:?}");
        };
        assert_eq!(field, "components.Tip.class");
        assert_eq!(var, "DOCSHIM_TEST_LOAD_MISSING");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/docshim.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_unknown_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docshim.toml");
        std::fs::write(&path, "[server]\nport = 1\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
