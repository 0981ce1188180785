//! Inputs handed to the core by the host: plugin options and build context.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};
use crate::settings::Settings;

/// One configured path alias.
///
/// The first alias (in configuration order) whose symbol occurs anywhere in a
/// script specifier wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasInfo {
    pub symbol: String,
    pub path: PathBuf,
}

impl AliasInfo {
    pub fn new(symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            symbol: symbol.into(),
            path: path.into(),
        }
    }
}

/// User-facing plugin options.
#[derive(Debug, Clone, Default)]
pub struct PluginOptions {
    /// Bundler output directory. Required.
    pub output_dir: Option<PathBuf>,
    /// Extra stylesheet suffixes used in the source tree (e.g. `scss`)
    pub additional_wxss_suffixes: Vec<String>,
    /// Generated-artifact locations
    pub settings: Settings,
}

impl PluginOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            ..Self::default()
        }
    }

    pub fn with_wxss_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.additional_wxss_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// The configured output directory, or a configuration error.
    pub fn require_output_dir(&self) -> Result<&PathBuf> {
        match &self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir),
            _ => Err(ConfigurationError::MissingOutputDir.into()),
        }
    }
}

/// What the host build tool knows about the project.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    /// Mini-program root directory
    pub src_dir: Option<PathBuf>,
    /// Path aliases, in the host's configuration order
    pub aliases: Vec<AliasInfo>,
}

impl BuildContext {
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: Some(src_dir.into()),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.aliases.push(AliasInfo::new(symbol, path));
        self
    }
}

/// Validated view of the build context used by the analyzers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub src_dir: PathBuf,
    pub aliases: Vec<AliasInfo>,
}

impl SystemInfo {
    pub fn new(src_dir: impl Into<PathBuf>, aliases: Vec<AliasInfo>) -> Self {
        Self {
            src_dir: src_dir.into(),
            aliases,
        }
    }

    /// Extract system info from a host build context.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingSourceRoot` when the context has no
    /// (or an empty) source root.
    pub fn from_context(context: &BuildContext) -> Result<Self> {
        let src_dir = match &context.src_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => return Err(ConfigurationError::MissingSourceRoot.into()),
        };

        Ok(Self {
            src_dir,
            aliases: context.aliases.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn missing_output_dir_is_configuration_error() {
        let options = PluginOptions::default();
        assert!(matches!(
            options.require_output_dir(),
            Err(Error::Configuration(ConfigurationError::MissingOutputDir))
        ));

        let empty = PluginOptions::new("");
        assert!(empty.require_output_dir().is_err());
    }

    #[test]
    fn system_info_requires_source_root() {
        let err = SystemInfo::from_context(&BuildContext::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::MissingSourceRoot)
        ));
    }

    #[test]
    fn system_info_keeps_alias_order() {
        let context = BuildContext::new("/project/src")
            .with_alias("@", "/project/src")
            .with_alias("@@", "/project/lib");

        let info = SystemInfo::from_context(&context).unwrap();
        let symbols: Vec<_> = info.aliases.iter().map(|a| a.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["@", "@@"]);
    }
}
