//! # wxdep-config
//!
//! Configuration for the wxdep dependency tracker: the [`WxdepConfig`]
//! structure, file discovery with layered loading ([`ConfigDiscovery`]) and
//! validation ([`SchemaValidator`], [`FsValidator`]).

pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use config::{AliasEntry, ConfigOverrides, WxdepConfig};
pub use discovery::{CONFIG_FILE_NAMES, ConfigDiscovery, ENV_PREFIX, discover};
pub use error::{ConfigError, Result};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_fs, validate_schema};
