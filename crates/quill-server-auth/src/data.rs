// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Entity records as seen through the collaborator interfaces.
//!
//! Persistence lives elsewhere; these are the shapes the resolvers hand back.
//!
//! - [`Workspace`] - tenant boundary with a single owner
//! - [`Member`] - a user's membership in a workspace, with role and grants
//! - [`Author`] - a byline identity, optionally linked to a member
//! - [`Page`] - a blog inside a workspace
//! - [`Post`] - content on a page, written by one or more authors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permission::PermissionSet;
use crate::types::{AuthorId, MemberId, MemberRole, PageId, PostId, UserId, WorkspaceId};

/// A tenant owning pages, members and newsletters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
	pub id: WorkspaceId,
	/// The user with unconditional control over the workspace.
	pub owner_id: UserId,
	pub name: String,
	pub slug: String,
	pub created_at: DateTime<Utc>,
}

impl Workspace {
	pub fn new(owner_id: UserId, name: impl Into<String>, slug: impl Into<String>) -> Self {
		Self {
			id: WorkspaceId::generate(),
			owner_id,
			name: name.into(),
			slug: slug.into(),
			created_at: Utc::now(),
		}
	}
}

/// A user's membership in a workspace.
///
/// At most one exists per (user, workspace) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
	pub id: MemberId,
	pub workspace_id: WorkspaceId,
	pub user_id: UserId,
	pub role: Option<MemberRole>,
	/// Explicit grants on top of the role preset.
	pub permissions: PermissionSet,
	/// The author identity linked to this member, if any.
	pub author_id: Option<AuthorId>,
	pub created_at: DateTime<Utc>,
}

impl Member {
	pub fn new(workspace_id: WorkspaceId, user_id: UserId) -> Self {
		Self {
			id: MemberId::generate(),
			workspace_id,
			user_id,
			role: None,
			permissions: PermissionSet::new(),
			author_id: None,
			created_at: Utc::now(),
		}
	}

	pub fn with_role(mut self, role: MemberRole) -> Self {
		self.role = Some(role);
		self
	}

	pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
		self.permissions = permissions;
		self
	}
}

/// A content-authoring identity in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
	pub id: AuthorId,
	pub workspace_id: WorkspaceId,
	/// `None` for guest bylines.
	pub member_id: Option<MemberId>,
	pub name: String,
}

impl Author {
	pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
		Self {
			id: AuthorId::generate(),
			workspace_id,
			member_id: None,
			name: name.into(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
	pub id: PageId,
	pub workspace_id: WorkspaceId,
	pub name: String,
}

impl Page {
	pub fn new(workspace_id: WorkspaceId, name: impl Into<String>) -> Self {
		Self {
			id: PageId::generate(),
			workspace_id,
			name: name.into(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
	pub id: PostId,
	pub page_id: PageId,
	pub title: String,
	pub author_ids: Vec<AuthorId>,
}

impl Post {
	pub fn new(page_id: PageId, title: impl Into<String>) -> Self {
		Self {
			id: PostId::generate(),
			page_id,
			title: title.into(),
			author_ids: Vec::new(),
		}
	}

	pub fn with_author(mut self, author_id: AuthorId) -> Self {
		if !self.author_ids.contains(&author_id) {
			self.author_ids.push(author_id);
		}
		self
	}
}
