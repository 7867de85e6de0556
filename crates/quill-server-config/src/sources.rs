// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::ServerConfigLayer;
use crate::sections::{AuthzConfigLayer, DenialPolicy, LogFormat, LoggingConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<ServerConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(ServerConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/quill/server.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(ServerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: ServerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: QUILL_SERVER_<SECTION>_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ServerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		load_from_lookup(&|name: &str| std::env::var(name).ok())
	}
}

/// Build a layer from an arbitrary variable lookup.
pub(crate) fn load_from_lookup(
	lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<ServerConfigLayer, ConfigError> {
	let env = Env { lookup };
	Ok(ServerConfigLayer {
		authz: Some(load_authz_from_env(&env)?),
		logging: Some(load_logging_from_env(&env)?),
	})
}

struct Env<'a> {
	lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl Env<'_> {
	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn bool(&self, name: &str) -> Option<bool> {
		self
			.var(name)
			.map(|v| v.eq_ignore_ascii_case("true") || v == "1")
	}

	fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
	where
		T: FromStr<Err = String>,
	{
		match self.var(name) {
			Some(v) => v.parse().map(Some).map_err(|message| ConfigError::InvalidValue {
				key: name.to_string(),
				message,
			}),
			None => Ok(None),
		}
	}
}

fn load_authz_from_env(env: &Env<'_>) -> Result<AuthzConfigLayer, ConfigError> {
	const ROLES_KEY: &str = "QUILL_SERVER_AUTHZ_ROLE_PERMISSIONS";

	let role_permissions = match env.var(ROLES_KEY) {
		Some(json) => Some(
			serde_json::from_str::<BTreeMap<String, Vec<String>>>(&json).map_err(|e| {
				ConfigError::InvalidValue {
					key: ROLES_KEY.to_string(),
					message: format!("expected a JSON object of role to permission list: {e}"),
				}
			})?,
		),
		None => None,
	};

	Ok(AuthzConfigLayer {
		denial_policy: env.parsed::<DenialPolicy>("QUILL_SERVER_AUTHZ_DENIAL_POLICY")?,
		audit_decisions: env.bool("QUILL_SERVER_AUTHZ_AUDIT_DECISIONS"),
		role_permissions,
	})
}

fn load_logging_from_env(env: &Env<'_>) -> Result<LoggingConfigLayer, ConfigError> {
	Ok(LoggingConfigLayer {
		level: env.var("QUILL_SERVER_LOG_LEVEL"),
		format: env.parsed::<LogFormat>("QUILL_SERVER_LOG_FORMAT")?,
	})
}
