//! CLI configuration loaded from `.hvyc/config.toml`.
//!
//! Every section and field is optional; omitted values fall back to the
//! defaults below. Values are validated into domain types by
//! [`CliConfig::compiler_settings`] and [`CliConfig::template_name`] before any
//! generation work starts.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use generator::{CompilerSettings, ImportRemapping, SolcVersion, TemplateName};
use serde::Deserialize;

/// Config file consulted when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_PATH: &str = ".hvyc/config.toml";

/// Compiler release the bundled template targets.
pub(crate) const DEFAULT_SOLC_VERSION: &str = "0.8.4";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    pub solc: SolcConfig,
    pub templates: TemplatesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SolcConfig {
    /// Executable name on `PATH`, or a path to it.
    pub binary: String,
    pub version: String,
    /// `prefix=target` import remappings.
    pub remappings: Vec<String>,
}

impl Default for SolcConfig {
    fn default() -> Self {
        Self {
            binary: compiler::DEFAULT_SOLC_BINARY.to_string(),
            version: DEFAULT_SOLC_VERSION.to_string(),
            remappings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TemplatesConfig {
    /// On-disk template directory, relative to the working directory.
    pub dir: Option<PathBuf>,
    pub name: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            name: renderer::DEFAULT_TEMPLATE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    pub format: LogFormat,
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from `explicit`, else from
    /// [`DEFAULT_CONFIG_PATH`] if it exists, else returns defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validated compiler version and remappings.
    pub fn compiler_settings(&self) -> anyhow::Result<CompilerSettings> {
        let version: SolcVersion = self
            .solc
            .version
            .parse()
            .map_err(|e: String| anyhow!("Configuration error: {e}"))?;
        let remappings = self
            .solc
            .remappings
            .iter()
            .map(|r| r.parse::<ImportRemapping>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow!("Configuration error: {e}"))?;
        Ok(CompilerSettings {
            version,
            remappings,
        })
    }

    /// Validated template name.
    pub fn template_name(&self) -> anyhow::Result<TemplateName> {
        TemplateName::new(self.templates.name.clone())
            .ok_or_else(|| anyhow!("Configuration error: template name must not be empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_yields_defaults() {
        let config = CliConfig::parse("").expect("parse");
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.solc.binary, "solc");
        assert_eq!(config.templates.name, "hvy_template.sol.j2");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn full_file_is_parsed_and_validated() {
        let config = CliConfig::parse(
            r#"
            [solc]
            binary = "/usr/local/bin/solc-0.8.4"
            version = "0.8.4"
            remappings = ["@openzeppelin=/home/me/node_modules/@openzeppelin"]

            [templates]
            dir = "templates"
            name = "custom.sol.j2"

            [logging]
            format = "json"
            filter = "debug,compiler=trace"
            "#,
        )
        .expect("parse");

        let settings = config.compiler_settings().expect("settings");
        assert_eq!(settings.version, SolcVersion::new(0, 8, 4));
        assert_eq!(settings.remappings.len(), 1);
        assert_eq!(settings.remappings[0].prefix(), "@openzeppelin");
        assert_eq!(
            config.template_name().expect("name").as_str(),
            "custom.sol.j2"
        );
        assert_eq!(config.templates.dir, Some(PathBuf::from("templates")));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::parse("[solc]\nversoin = \"0.8.4\"\n").is_err());
    }

    #[test]
    fn invalid_values_are_configuration_errors() {
        let bad_version = CliConfig::parse("[solc]\nversion = \"latest\"\n").expect("parse");
        let err = bad_version.compiler_settings().expect_err("bad version");
        assert!(err.to_string().starts_with("Configuration error"));

        let bad_remap =
            CliConfig::parse("[solc]\nremappings = [\"@openzeppelin\"]\n").expect("parse");
        assert!(bad_remap.compiler_settings().is_err());

        let blank_name = CliConfig::parse("[templates]\nname = \"\"\n").expect("parse");
        assert!(blank_name.template_name().is_err());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.toml");
        assert!(CliConfig::load(Some(&missing)).is_err());

        let present = dir.path().join("config.toml");
        std::fs::write(&present, "[logging]\nfilter = \"warn\"\n").expect("write");
        let config = CliConfig::load(Some(&present)).expect("load");
        assert_eq!(config.logging.filter, "warn");
    }
}
