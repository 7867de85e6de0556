// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Centralized configuration management for the Quill authorization engine.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`QUILL_SERVER_*`)
//! - Tracing subscriber installation driven by the logging section
//!
//! # Usage
//!
//! ```ignore
//! use quill_server_config::{init_tracing, load_config};
//!
//! let config = load_config()?;
//! init_tracing(&config.logging)?;
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;
pub mod telemetry;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};
pub use telemetry::init_tracing;

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConfig {
	pub authz: AuthzConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`QUILL_SERVER_*`)
/// 2. Config file (`/etc/quill/server.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<ServerConfig, ConfigError> {
	let mut merged = ServerConfigLayer::default();
	merged.merge(EnvSource.load()?);
	finalize(merged)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let authz = layer.authz.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&authz, &logging)?;

	info!(
		denial_policy = %authz.denial_policy,
		audit_decisions = authz.audit_decisions,
		role_overrides = authz.role_permissions.len(),
		log_level = %logging.level,
		"Server configuration loaded"
	);

	Ok(ServerConfig { authz, logging })
}

/// Validate cross-field configuration rules.
fn validate_config(authz: &AuthzConfig, logging: &LoggingConfig) -> Result<(), ConfigError> {
	if logging.level.trim().is_empty() {
		return Err(ConfigError::Validation(
			"logging.level must not be blank".to_string(),
		));
	}

	for (role, permissions) in &authz.role_permissions {
		if role.trim().is_empty() {
			return Err(ConfigError::Validation(
				"authz.role_permissions contains an empty role name".to_string(),
			));
		}
		if let Some(blank) = permissions.iter().find(|p| p.trim().is_empty()) {
			return Err(ConfigError::Validation(format!(
				"authz.role_permissions.{role} contains a blank permission {blank:?}"
			)));
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeMap;
	use std::io::Write;

	#[test]
	fn test_defaults_finalize_cleanly() {
		let config = finalize(ServerConfigLayer::default()).unwrap();
		assert_eq!(config, ServerConfig::default());
		assert_eq!(config.logging.level, "info");
		assert_eq!(config.authz.denial_policy, DenialPolicy::NotFound);
	}

	#[test]
	fn test_blank_log_level_rejected() {
		let logging = LoggingConfig {
			level: "  ".to_string(),
			..Default::default()
		};
		let result = validate_config(&AuthzConfig::default(), &logging);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_blank_role_permission_rejected() {
		let authz = AuthzConfig {
			role_permissions: BTreeMap::from([(
				"writer".to_string(),
				vec!["posts:create".to_string(), "".to_string()],
			)]),
			..Default::default()
		};
		let err = validate_config(&authz, &LoggingConfig::default()).unwrap_err();
		assert!(err.to_string().contains("authz.role_permissions.writer"));
	}

	#[test]
	fn test_file_overrides_defaults() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[authz]\ndenial_policy = \"forbidden\"").unwrap();

		let config = load_from_sources(vec![
			Box::new(TomlSource::new(file.path())),
			Box::new(DefaultsSource),
		])
		.unwrap();
		assert_eq!(config.authz.denial_policy, DenialPolicy::Forbidden);
		assert!(config.authz.audit_decisions);
	}
}
