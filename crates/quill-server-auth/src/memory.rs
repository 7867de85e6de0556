// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! In-memory implementation of the collaborator traits.
//!
//! Used by tests and for local wiring without a database. Permissions are
//! composed from [`RolePresets`] and each member's explicit grants.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::data::{Author, Member, Page, Post, Workspace};
use crate::error::{AuthError, Result};
use crate::permission::PermissionSet;
use crate::presets::RolePresets;
use crate::resolver::{PermissionStore, ResourceResolver};
use crate::types::{AuthorId, MemberId, PageId, PostId, UserId, WorkspaceId};

#[derive(Default)]
struct Inner {
	workspaces: HashMap<WorkspaceId, Workspace>,
	members: HashMap<MemberId, Member>,
	authors: HashMap<AuthorId, Author>,
	pages: HashMap<PageId, Page>,
	posts: HashMap<PostId, Post>,
}

impl Inner {
	fn find_member(&self, workspace_id: WorkspaceId, user_id: UserId) -> Option<&Member> {
		self
			.members
			.values()
			.find(|m| m.workspace_id == workspace_id && m.user_id == user_id)
	}
}

/// Directory of workspaces, members, authors, pages and posts held in memory.
#[derive(Default)]
pub struct InMemoryDirectory {
	presets: RolePresets,
	inner: RwLock<Inner>,
}

impl InMemoryDirectory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_presets(presets: RolePresets) -> Self {
		Self {
			presets,
			inner: RwLock::default(),
		}
	}

	pub async fn insert_workspace(&self, workspace: Workspace) {
		self
			.inner
			.write()
			.await
			.workspaces
			.insert(workspace.id, workspace);
	}

	/// Add a membership. A user can be a member of a workspace only once.
	///
	/// Authors are attached afterwards with [`InMemoryDirectory::link_author`].
	pub async fn insert_member(&self, member: Member) -> Result<()> {
		if let Some(author_id) = member.author_id {
			return Err(AuthError::Conflict(format!(
				"member {} arrives linked to author {author_id}; use link_author",
				member.id
			)));
		}
		let mut inner = self.inner.write().await;
		if !inner.workspaces.contains_key(&member.workspace_id) {
			return Err(AuthError::Integrity(format!(
				"member {} references missing workspace {}",
				member.id, member.workspace_id
			)));
		}
		if inner
			.find_member(member.workspace_id, member.user_id)
			.is_some()
		{
			return Err(AuthError::Conflict(format!(
				"user {} is already a member of workspace {}",
				member.user_id, member.workspace_id
			)));
		}
		debug!(member_id = %member.id, workspace_id = %member.workspace_id, "member added");
		inner.members.insert(member.id, member);
		Ok(())
	}

	pub async fn insert_author(&self, author: Author) {
		self.inner.write().await.authors.insert(author.id, author);
	}

	/// Link an author to a member, both ways.
	pub async fn link_author(&self, member_id: MemberId, author_id: AuthorId) -> Result<()> {
		let mut inner = self.inner.write().await;
		let member_workspace = inner
			.members
			.get(&member_id)
			.map(|m| m.workspace_id)
			.ok_or_else(|| AuthError::not_found(crate::ability::ResourceType::Member, member_id))?;
		let author = inner
			.authors
			.get_mut(&author_id)
			.ok_or_else(|| AuthError::not_found(crate::ability::ResourceType::Author, author_id))?;
		if author.workspace_id != member_workspace {
			return Err(AuthError::Conflict(format!(
				"author {author_id} and member {member_id} belong to different workspaces"
			)));
		}
		let previous_member = author.member_id.replace(member_id);

		// An author belongs to at most one member and a member has at most one
		// author, so both previous partners lose their link.
		if let Some(previous) = previous_member.filter(|id| *id != member_id) {
			if let Some(member) = inner.members.get_mut(&previous) {
				member.author_id = None;
			}
		}
		let previous_author = inner
			.members
			.get_mut(&member_id)
			.and_then(|member| member.author_id.replace(author_id));
		if let Some(previous) = previous_author.filter(|id| *id != author_id) {
			if let Some(author) = inner.authors.get_mut(&previous) {
				author.member_id = None;
			}
		}
		debug!(member_id = %member_id, author_id = %author_id, "author linked");
		Ok(())
	}

	pub async fn insert_page(&self, page: Page) {
		self.inner.write().await.pages.insert(page.id, page);
	}

	pub async fn insert_post(&self, post: Post) {
		self.inner.write().await.posts.insert(post.id, post);
	}

	/// Replace a member's explicit grants.
	pub async fn set_permissions(&self, member_id: MemberId, permissions: PermissionSet) -> Result<()> {
		let mut inner = self.inner.write().await;
		let member = inner
			.members
			.get_mut(&member_id)
			.ok_or_else(|| AuthError::not_found(crate::ability::ResourceType::Member, member_id))?;
		member.permissions = permissions;
		Ok(())
	}
}

#[async_trait]
impl PermissionStore for InMemoryDirectory {
	async fn permissions_for(
		&self,
		workspace_id: WorkspaceId,
		user_id: UserId,
	) -> Result<Option<PermissionSet>> {
		let inner = self.inner.read().await;
		Ok(inner
			.find_member(workspace_id, user_id)
			.map(|m| self.presets.effective(m.role, &m.permissions)))
	}

	async fn member_of(&self, workspace_id: WorkspaceId, user_id: UserId) -> Result<Option<Member>> {
		let inner = self.inner.read().await;
		Ok(inner.find_member(workspace_id, user_id).cloned())
	}
}

#[async_trait]
impl ResourceResolver for InMemoryDirectory {
	async fn workspace(&self, id: WorkspaceId) -> Result<Option<Workspace>> {
		Ok(self.inner.read().await.workspaces.get(&id).cloned())
	}

	async fn member(&self, id: MemberId) -> Result<Option<Member>> {
		Ok(self.inner.read().await.members.get(&id).cloned())
	}

	async fn author(&self, id: AuthorId) -> Result<Option<Author>> {
		Ok(self.inner.read().await.authors.get(&id).cloned())
	}

	async fn page(&self, id: PageId) -> Result<Option<Page>> {
		Ok(self.inner.read().await.pages.get(&id).cloned())
	}

	async fn post(&self, id: PostId) -> Result<Option<Post>> {
		Ok(self.inner.read().await.posts.get(&id).cloned())
	}
}
