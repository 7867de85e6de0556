// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization engine settings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a denied decision is reported to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialPolicy {
	/// Report denials exactly like a missing resource.
	#[default]
	NotFound,
	/// Report denials as forbidden.
	Forbidden,
}

impl fmt::Display for DenialPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DenialPolicy::NotFound => f.write_str("not_found"),
			DenialPolicy::Forbidden => f.write_str("forbidden"),
		}
	}
}

impl FromStr for DenialPolicy {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"not_found" | "notfound" | "404" => Ok(DenialPolicy::NotFound),
			"forbidden" | "403" => Ok(DenialPolicy::Forbidden),
			other => Err(format!("expected 'not_found' or 'forbidden', got '{other}'")),
		}
	}
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthzConfigLayer {
	pub denial_policy: Option<DenialPolicy>,
	pub audit_decisions: Option<bool>,
	/// Per-role permission presets, keyed by role name.
	pub role_permissions: Option<BTreeMap<String, Vec<String>>>,
}

impl AuthzConfigLayer {
	pub fn merge(&mut self, other: AuthzConfigLayer) {
		if other.denial_policy.is_some() {
			self.denial_policy = other.denial_policy;
		}
		if other.audit_decisions.is_some() {
			self.audit_decisions = other.audit_decisions;
		}
		if let Some(roles) = other.role_permissions {
			// Overrides are per role, not per map.
			self
				.role_permissions
				.get_or_insert_with(BTreeMap::new)
				.extend(roles);
		}
	}

	pub fn finalize(self) -> AuthzConfig {
		AuthzConfig {
			denial_policy: self.denial_policy.unwrap_or_default(),
			audit_decisions: self.audit_decisions.unwrap_or(true),
			role_permissions: self.role_permissions.unwrap_or_default(),
		}
	}
}

/// Resolved authorization settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzConfig {
	pub denial_policy: DenialPolicy,
	pub audit_decisions: bool,
	/// Role name to raw permission strings. Roles not listed keep their
	/// built-in preset.
	pub role_permissions: BTreeMap<String, Vec<String>>,
}

impl Default for AuthzConfig {
	fn default() -> Self {
		AuthzConfigLayer::default().finalize()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_hide_denials_and_audit() {
		let config = AuthzConfig::default();
		assert_eq!(config.denial_policy, DenialPolicy::NotFound);
		assert!(config.audit_decisions);
		assert!(config.role_permissions.is_empty());
	}

	#[test]
	fn merge_overrides_roles_individually() {
		let mut base = AuthzConfigLayer {
			role_permissions: Some(BTreeMap::from([
				("writer".to_string(), vec!["posts:create".to_string()]),
				("editor".to_string(), vec!["posts:edit".to_string()]),
			])),
			..Default::default()
		};
		base.merge(AuthzConfigLayer {
			denial_policy: Some(DenialPolicy::Forbidden),
			role_permissions: Some(BTreeMap::from([(
				"writer".to_string(),
				vec!["posts:edit_own".to_string()],
			)])),
			..Default::default()
		});

		let config = base.finalize();
		assert_eq!(config.denial_policy, DenialPolicy::Forbidden);
		assert_eq!(config.role_permissions["writer"], vec!["posts:edit_own"]);
		assert_eq!(config.role_permissions["editor"], vec!["posts:edit"]);
	}

	#[test]
	fn denial_policy_parses_aliases() {
		assert_eq!("403".parse::<DenialPolicy>(), Ok(DenialPolicy::Forbidden));
		assert_eq!("NOT_FOUND".parse::<DenialPolicy>(), Ok(DenialPolicy::NotFound));
		assert!("teapot".parse::<DenialPolicy>().is_err());
	}
}
