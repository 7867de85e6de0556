// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Type definitions for ability evaluation.
//!
//! This module defines the data the rules evaluate over:
//!
//! - [`SubjectAttrs`]: The acting user and their membership in the relevant workspace
//! - [`ResourceAttrs`]: The target resource with every association a rule needs
//! - [`Action`]: The operation being attempted
//!
//! # Design Principles
//!
//! 1. **Immutable evaluation**: All attributes are resolved before rules run
//! 2. **No storage access**: Rules are pure functions over these values
//! 3. **Explicit subject**: The acting user is a parameter, never ambient state

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::permission::PermissionSet;
use crate::types::{AuthorId, MemberId, PageId, PostId, UserId, WorkspaceId};

/// Actions that can be checked against resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
	/// Full control over the resource.
	Manage,
	Create,
	Edit,
	Destroy,
}

impl Action {
	pub fn all() -> &'static [Action] {
		&[Action::Manage, Action::Create, Action::Edit, Action::Destroy]
	}
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			Action::Manage => "manage",
			Action::Create => "create",
			Action::Edit => "edit",
			Action::Destroy => "destroy",
		};
		f.write_str(s)
	}
}

/// Kinds of resources with ability rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
	Workspace,
	Member,
	Author,
	Post,
}

impl ResourceType {
	pub fn all() -> &'static [ResourceType] {
		&[
			ResourceType::Workspace,
			ResourceType::Member,
			ResourceType::Author,
			ResourceType::Post,
		]
	}
}

impl fmt::Display for ResourceType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			ResourceType::Workspace => "workspace",
			ResourceType::Member => "member",
			ResourceType::Author => "author",
			ResourceType::Post => "post",
		};
		f.write_str(s)
	}
}

/// A user's standing inside one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipAttr {
	pub workspace_id: WorkspaceId,
	/// Effective permissions (role preset plus explicit grants).
	pub permissions: PermissionSet,
	/// The member's own author identity in this workspace.
	pub author_id: Option<AuthorId>,
}

/// Attributes describing the subject (user) requesting access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectAttrs {
	pub user_id: UserId,
	pub memberships: Vec<MembershipAttr>,
}

impl SubjectAttrs {
	/// Creates a subject with no memberships.
	pub fn new(user_id: UserId) -> Self {
		Self {
			user_id,
			memberships: Vec::new(),
		}
	}

	/// Builder: add a membership.
	pub fn with_membership(mut self, membership: MembershipAttr) -> Self {
		self.memberships.push(membership);
		self
	}

	/// Returns the membership for the given workspace, if any.
	pub fn membership(&self, workspace_id: WorkspaceId) -> Option<&MembershipAttr> {
		self
			.memberships
			.iter()
			.find(|m| m.workspace_id == workspace_id)
	}

	/// Returns the permissions held in the given workspace, if a member.
	pub fn permissions_in(&self, workspace_id: WorkspaceId) -> Option<&PermissionSet> {
		self.membership(workspace_id).map(|m| &m.permissions)
	}

	/// Returns the subject's own author identity in the given workspace.
	pub fn author_in(&self, workspace_id: WorkspaceId) -> Option<AuthorId> {
		self.membership(workspace_id).and_then(|m| m.author_id)
	}
}

/// The owning workspace of a resource, as rules need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkspaceAttrs {
	pub workspace_id: WorkspaceId,
	pub owner_user_id: UserId,
}

impl WorkspaceAttrs {
	pub fn is_owner(&self, user_id: UserId) -> bool {
		self.owner_user_id == user_id
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAttrs {
	pub member_id: MemberId,
	pub workspace: WorkspaceAttrs,
	pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAttrs {
	pub author_id: AuthorId,
	pub workspace: WorkspaceAttrs,
	/// The user behind the author's linked member; `None` for guest bylines.
	pub member_user_id: Option<UserId>,
}

/// A post, or a post about to be created on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostAttrs {
	/// `None` when checking creation of a post that does not exist yet.
	pub post_id: Option<PostId>,
	pub page_id: PageId,
	pub workspace: WorkspaceAttrs,
	pub author_ids: Vec<AuthorId>,
}

/// Attributes describing the resource being accessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAttrs {
	Workspace(WorkspaceAttrs),
	Member(MemberAttrs),
	Author(AuthorAttrs),
	Post(PostAttrs),
}

impl ResourceAttrs {
	/// Creates resource attributes for a workspace.
	pub fn workspace(workspace_id: WorkspaceId, owner_user_id: UserId) -> Self {
		Self::Workspace(WorkspaceAttrs {
			workspace_id,
			owner_user_id,
		})
	}

	/// Creates resource attributes for a member record.
	pub fn member(member_id: MemberId, workspace: WorkspaceAttrs, user_id: UserId) -> Self {
		Self::Member(MemberAttrs {
			member_id,
			workspace,
			user_id,
		})
	}

	/// Creates resource attributes for an author.
	pub fn author(
		author_id: AuthorId,
		workspace: WorkspaceAttrs,
		member_user_id: Option<UserId>,
	) -> Self {
		Self::Author(AuthorAttrs {
			author_id,
			workspace,
			member_user_id,
		})
	}

	/// Creates resource attributes for an existing post.
	pub fn post(
		post_id: PostId,
		page_id: PageId,
		workspace: WorkspaceAttrs,
		author_ids: Vec<AuthorId>,
	) -> Self {
		Self::Post(PostAttrs {
			post_id: Some(post_id),
			page_id,
			workspace,
			author_ids,
		})
	}

	/// Creates resource attributes for a post not yet created on a page.
	pub fn new_post(page_id: PageId, workspace: WorkspaceAttrs) -> Self {
		Self::Post(PostAttrs {
			post_id: None,
			page_id,
			workspace,
			author_ids: Vec::new(),
		})
	}

	pub fn resource_type(&self) -> ResourceType {
		match self {
			ResourceAttrs::Workspace(_) => ResourceType::Workspace,
			ResourceAttrs::Member(_) => ResourceType::Member,
			ResourceAttrs::Author(_) => ResourceType::Author,
			ResourceAttrs::Post(_) => ResourceType::Post,
		}
	}

	/// The workspace the resource belongs to.
	pub fn workspace_attrs(&self) -> WorkspaceAttrs {
		match self {
			ResourceAttrs::Workspace(w) => *w,
			ResourceAttrs::Member(m) => m.workspace,
			ResourceAttrs::Author(a) => a.workspace,
			ResourceAttrs::Post(p) => p.workspace,
		}
	}

	/// Identifier of the resource for logs and audit entries.
	pub fn resource_id(&self) -> String {
		match self {
			ResourceAttrs::Workspace(w) => w.workspace_id.to_string(),
			ResourceAttrs::Member(m) => m.member_id.to_string(),
			ResourceAttrs::Author(a) => a.author_id.to_string(),
			ResourceAttrs::Post(p) => match p.post_id {
				Some(id) => id.to_string(),
				None => format!("new@{}", p.page_id),
			},
		}
	}
}
