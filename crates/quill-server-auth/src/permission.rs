// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Closed permission vocabulary.
//!
//! Permissions are stored as strings of the form `"<resource>:<action>"` with an
//! optional `_own` suffix on the action (`"posts:edit_own"`). Inside the crate
//! they are always parsed into a [`Permission`] triple so a typo can never be
//! mistaken for a valid grant: an unknown resource or action is a
//! [`PermissionParseError`], not a silently unmatched string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const OWN_SUFFIX: &str = "_own";

/// Resource families a permission can be granted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionResource {
	Posts,
	Pages,
	Categories,
	Authors,
	Members,
	Newsletters,
	Subscribers,
}

impl PermissionResource {
	pub fn all() -> &'static [PermissionResource] {
		&[
			PermissionResource::Posts,
			PermissionResource::Pages,
			PermissionResource::Categories,
			PermissionResource::Authors,
			PermissionResource::Members,
			PermissionResource::Newsletters,
			PermissionResource::Subscribers,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PermissionResource::Posts => "posts",
			PermissionResource::Pages => "pages",
			PermissionResource::Categories => "categories",
			PermissionResource::Authors => "authors",
			PermissionResource::Members => "members",
			PermissionResource::Newsletters => "newsletters",
			PermissionResource::Subscribers => "subscribers",
		}
	}
}

/// Operations a permission can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionAction {
	Create,
	Edit,
	Destroy,
	Publish,
}

impl PermissionAction {
	pub fn all() -> &'static [PermissionAction] {
		&[
			PermissionAction::Create,
			PermissionAction::Edit,
			PermissionAction::Destroy,
			PermissionAction::Publish,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PermissionAction::Create => "create",
			PermissionAction::Edit => "edit",
			PermissionAction::Destroy => "destroy",
			PermissionAction::Publish => "publish",
		}
	}

	/// Whether an `_own` variant of this action exists.
	///
	/// Creation has none: there is no existing resource to be the author of.
	pub fn supports_own_scope(&self) -> bool {
		!matches!(self, PermissionAction::Create)
	}
}

/// How far a permission reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionScope {
	/// Every resource of the family in the workspace.
	Any,
	/// Only resources the acting user authored.
	Own,
}

/// A single grant: `(resource, action, scope)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
	pub resource: PermissionResource,
	pub action: PermissionAction,
	pub scope: PermissionScope,
}

impl Permission {
	/// A workspace-wide grant.
	pub const fn any(resource: PermissionResource, action: PermissionAction) -> Self {
		Self {
			resource,
			action,
			scope: PermissionScope::Any,
		}
	}

	/// The own-scoped variant of this permission.
	pub const fn own(self) -> Self {
		Self {
			scope: PermissionScope::Own,
			..self
		}
	}

	pub const fn posts(action: PermissionAction) -> Self {
		Self::any(PermissionResource::Posts, action)
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.resource.as_str(), self.action.as_str())?;
		if self.scope == PermissionScope::Own {
			f.write_str(OWN_SUFFIX)?;
		}
		Ok(())
	}
}

/// Error produced when a permission string does not follow the
/// `"<resource>:<action>[_own]"` convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionParseError {
	#[error("permission '{0}' is missing the ':' separator")]
	MissingSeparator(String),

	#[error("permission '{input}' names unknown resource '{resource}'")]
	UnknownResource { input: String, resource: String },

	#[error("permission '{input}' names unknown action '{action}'")]
	UnknownAction { input: String, action: String },

	#[error("permission '{0}' has an own scope on an action that has no owner")]
	OwnScopeNotAllowed(String),
}

impl FromStr for Permission {
	type Err = PermissionParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (resource, action) = s
			.split_once(':')
			.ok_or_else(|| PermissionParseError::MissingSeparator(s.to_string()))?;

		let resource = PermissionResource::all()
			.iter()
			.copied()
			.find(|r| r.as_str() == resource)
			.ok_or_else(|| PermissionParseError::UnknownResource {
				input: s.to_string(),
				resource: resource.to_string(),
			})?;

		let (action, scope) = match action.strip_suffix(OWN_SUFFIX) {
			Some(base) => (base, PermissionScope::Own),
			None => (action, PermissionScope::Any),
		};

		let action = PermissionAction::all()
			.iter()
			.copied()
			.find(|a| a.as_str() == action)
			.ok_or_else(|| PermissionParseError::UnknownAction {
				input: s.to_string(),
				action: action.to_string(),
			})?;

		if scope == PermissionScope::Own && !action.supports_own_scope() {
			return Err(PermissionParseError::OwnScopeNotAllowed(s.to_string()));
		}

		Ok(Self {
			resource,
			action,
			scope,
		})
	}
}

impl Serialize for Permission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Permission {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}

/// The set of permissions a member holds in one workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse a list of permission strings, failing on the first malformed one.
	pub fn parse_all<I, S>(raw: I) -> Result<Self, PermissionParseError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		raw.into_iter()
			.map(|s| s.as_ref().parse::<Permission>())
			.collect::<Result<BTreeSet<_>, _>>()
			.map(Self)
	}

	pub fn contains(&self, permission: Permission) -> bool {
		self.0.contains(&permission)
	}

	pub fn insert(&mut self, permission: Permission) -> bool {
		self.0.insert(permission)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Permission> {
		self.0.iter()
	}

	/// Union of two sets.
	pub fn union(&self, other: &PermissionSet) -> PermissionSet {
		Self(self.0.union(&other.0).copied().collect())
	}
}

impl FromIterator<Permission> for PermissionSet {
	fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl Extend<Permission> for PermissionSet {
	fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
		self.0.extend(iter);
	}
}
