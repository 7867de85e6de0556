// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for workspace authorization.
//!
//! This module defines the foundational types used throughout the auth system:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs for each entity kind
//!   ([`UserId`], [`WorkspaceId`], [`MemberId`], [`AuthorId`], [`PageId`],
//!   [`PostId`]) preventing accidental mixing
//! - **Member roles**: The named roles a workspace member can hold ([`MemberRole`])
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(WorkspaceId, "Unique identifier for a workspace.");
define_id_type!(MemberId, "Unique identifier for a workspace membership.");
define_id_type!(AuthorId, "Unique identifier for an author identity.");
define_id_type!(PageId, "Unique identifier for a page (blog).");
define_id_type!(PostId, "Unique identifier for a post.");

// =============================================================================
// Member Roles
// =============================================================================

/// Named roles within a workspace.
///
/// A role only selects a default permission preset; the workspace owner is
/// not a role and bypasses permission checks entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
	/// Full control over workspace content and people.
	Admin,
	/// Manages all content in the workspace.
	Editor,
	/// Writes and publishes their own posts.
	Writer,
	/// Drafts posts for others to publish.
	Contributor,
}

impl MemberRole {
	/// Returns all available member roles.
	pub fn all() -> &'static [MemberRole] {
		&[
			MemberRole::Admin,
			MemberRole::Editor,
			MemberRole::Writer,
			MemberRole::Contributor,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			MemberRole::Admin => "admin",
			MemberRole::Editor => "editor",
			MemberRole::Writer => "writer",
			MemberRole::Contributor => "contributor",
		}
	}
}

impl fmt::Display for MemberRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown member role: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for MemberRole {
	type Err = UnknownRoleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		MemberRole::all()
			.iter()
			.copied()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| UnknownRoleError(s.to_string()))
	}
}
