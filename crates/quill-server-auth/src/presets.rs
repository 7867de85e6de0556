// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default permission sets per member role.

use quill_server_config::AuthzConfig;
use tracing::debug;

use crate::error::AuthError;
use crate::permission::{Permission, PermissionAction, PermissionResource, PermissionSet};
use crate::types::MemberRole;

/// Maps each [`MemberRole`] to the permissions it grants by default.
///
/// A member's effective permissions are the preset of their role united with
/// any explicit grants on the membership itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePresets {
	admin: PermissionSet,
	editor: PermissionSet,
	writer: PermissionSet,
	contributor: PermissionSet,
}

impl Default for RolePresets {
	fn default() -> Self {
		Self::builtin()
	}
}

impl RolePresets {
	/// The built-in presets.
	pub fn builtin() -> Self {
		use PermissionAction::*;
		use PermissionResource::*;

		let admin: PermissionSet = PermissionResource::all()
			.iter()
			.flat_map(|r| {
				PermissionAction::all()
					.iter()
					.map(move |a| Permission::any(*r, *a))
			})
			.collect();

		let mut editor: PermissionSet = [Posts, Pages, Categories]
			.into_iter()
			.flat_map(|r| [Create, Edit, Destroy, Publish].map(|a| Permission::any(r, a)))
			.collect();
		editor.insert(Permission::any(Authors, Edit));

		let writer: PermissionSet = [
			Permission::posts(Create),
			Permission::posts(Edit).own(),
			Permission::posts(Destroy).own(),
			Permission::posts(Publish).own(),
		]
		.into_iter()
		.collect();

		let contributor: PermissionSet = [Permission::posts(Create), Permission::posts(Edit).own()]
			.into_iter()
			.collect();

		Self {
			admin,
			editor,
			writer,
			contributor,
		}
	}

	/// Built-in presets with the configured per-role overrides applied.
	///
	/// An override replaces the role's preset wholesale. Unknown role names and
	/// malformed permission strings are rejected.
	pub fn from_config(config: &AuthzConfig) -> Result<Self, AuthError> {
		let mut presets = Self::builtin();
		for (role_name, raw) in &config.role_permissions {
			let role: MemberRole = role_name.parse()?;
			let permissions = PermissionSet::parse_all(raw)?;
			debug!(role = %role, count = permissions.len(), "overriding role preset");
			*presets.slot_mut(role) = permissions;
		}
		Ok(presets)
	}

	pub fn for_role(&self, role: MemberRole) -> &PermissionSet {
		match role {
			MemberRole::Admin => &self.admin,
			MemberRole::Editor => &self.editor,
			MemberRole::Writer => &self.writer,
			MemberRole::Contributor => &self.contributor,
		}
	}

	fn slot_mut(&mut self, role: MemberRole) -> &mut PermissionSet {
		match role {
			MemberRole::Admin => &mut self.admin,
			MemberRole::Editor => &mut self.editor,
			MemberRole::Writer => &mut self.writer,
			MemberRole::Contributor => &mut self.contributor,
		}
	}

	/// Effective permissions for a membership.
	pub fn effective(&self, role: Option<MemberRole>, grants: &PermissionSet) -> PermissionSet {
		match role {
			Some(role) => self.for_role(role).union(grants),
			None => grants.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::BTreeMap;

	#[test]
	fn every_role_has_a_preset() {
		let presets = RolePresets::builtin();
		for role in MemberRole::all() {
			assert!(!presets.for_role(*role).is_empty(), "{role} has no preset");
		}
	}

	#[test]
	fn admin_has_every_workspace_wide_permission_but_no_own_variants() {
		let admin = RolePresets::builtin().for_role(MemberRole::Admin).clone();
		assert!(admin.contains(Permission::posts(PermissionAction::Destroy)));
		assert!(admin.contains(Permission::any(
			PermissionResource::Subscribers,
			PermissionAction::Create
		)));
		assert!(!admin.contains(Permission::posts(PermissionAction::Edit).own()));
	}

	#[test]
	fn contributor_only_edits_own_posts() {
		let contributor = RolePresets::builtin()
			.for_role(MemberRole::Contributor)
			.clone();
		assert!(contributor.contains(Permission::posts(PermissionAction::Create)));
		assert!(contributor.contains(Permission::posts(PermissionAction::Edit).own()));
		assert!(!contributor.contains(Permission::posts(PermissionAction::Edit)));
		assert!(!contributor.contains(Permission::posts(PermissionAction::Destroy).own()));
	}

	#[test]
	fn effective_unites_role_and_grants() {
		let presets = RolePresets::builtin();
		let grants = PermissionSet::parse_all(["newsletters:edit"]).unwrap();
		let effective = presets.effective(Some(MemberRole::Contributor), &grants);
		assert!(effective.contains(Permission::posts(PermissionAction::Create)));
		assert!(effective.contains(Permission::any(
			PermissionResource::Newsletters,
			PermissionAction::Edit
		)));

		assert_eq!(presets.effective(None, &grants), grants);
	}

	#[test]
	fn config_override_replaces_preset() {
		let config = AuthzConfig {
			role_permissions: BTreeMap::from([(
				"writer".to_string(),
				vec!["posts:edit".to_string()],
			)]),
			..Default::default()
		};
		let presets = RolePresets::from_config(&config).unwrap();
		let writer = presets.for_role(MemberRole::Writer);
		assert_eq!(writer.len(), 1);
		assert!(writer.contains(Permission::posts(PermissionAction::Edit)));
		assert_eq!(
			presets.for_role(MemberRole::Editor),
			RolePresets::builtin().for_role(MemberRole::Editor)
		);
	}

	#[test]
	fn config_with_unknown_role_fails() {
		let config = AuthzConfig {
			role_permissions: BTreeMap::from([("owner".to_string(), vec![])]),
			..Default::default()
		};
		assert!(matches!(
			RolePresets::from_config(&config),
			Err(AuthError::UnknownRole(_))
		));
	}

	#[test]
	fn config_with_malformed_permission_fails() {
		let config = AuthzConfig {
			role_permissions: BTreeMap::from([(
				"writer".to_string(),
				vec!["posts:create_own".to_string()],
			)]),
			..Default::default()
		};
		assert!(matches!(
			RolePresets::from_config(&config),
			Err(AuthError::Permission(_))
		));
	}
}
