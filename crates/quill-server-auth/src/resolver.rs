// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Collaborator contracts and the [`Ability`] service.
//!
//! The engine in [`crate::ability`] never touches storage. This module defines
//! what it needs from the outside world:
//!
//! - [`PermissionStore`]: a user's permissions and membership in a workspace
//! - [`ResourceResolver`]: records and their associations
//!
//! [`AbilityLoader`] resolves a [`ResourceRef`] into the attributes the rules
//! evaluate, and [`Ability`] ties loading, evaluation and auditing together.
//! Nothing is cached: every call re-reads its collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use quill_server_config::{AuthzConfig, DenialPolicy};
use tracing::{debug, instrument, warn};

use crate::ability::{
	self, Action, MembershipAttr, ResourceAttrs, ResourceType, SubjectAttrs, WorkspaceAttrs,
};
use crate::audit::{AuditEventType, AuditLogEntry, AuditSink, TracingAuditSink};
use crate::authorize::AuthorizationError;
use crate::data::{Author, Member, Page, Post, Workspace};
use crate::error::{AuthError, Result};
use crate::permission::PermissionSet;
use crate::types::{AuthorId, MemberId, PageId, PostId, UserId, WorkspaceId};

/// Source of workspace-scoped permissions.
#[async_trait]
pub trait PermissionStore: Send + Sync {
	/// Effective permissions of `user_id` in the workspace, or `None` when the
	/// user is not a member.
	async fn permissions_for(
		&self,
		workspace_id: WorkspaceId,
		user_id: UserId,
	) -> Result<Option<PermissionSet>>;

	/// The user's member record in the workspace.
	async fn member_of(&self, workspace_id: WorkspaceId, user_id: UserId) -> Result<Option<Member>>;
}

/// Source of resource records.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
	async fn workspace(&self, id: WorkspaceId) -> Result<Option<Workspace>>;
	async fn member(&self, id: MemberId) -> Result<Option<Member>>;
	async fn author(&self, id: AuthorId) -> Result<Option<Author>>;
	async fn page(&self, id: PageId) -> Result<Option<Page>>;
	async fn post(&self, id: PostId) -> Result<Option<Post>>;

	/// Authors credited on a post.
	async fn post_authors(&self, post: &Post) -> Result<Vec<AuthorId>> {
		Ok(post.author_ids.clone())
	}
}

/// A resource named by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceRef {
	Workspace(WorkspaceId),
	Member(MemberId),
	Author(AuthorId),
	Post(PostId),
	/// A post that would be created on the given page.
	NewPost(PageId),
}

impl ResourceRef {
	pub fn resource_type(&self) -> ResourceType {
		match self {
			ResourceRef::Workspace(_) => ResourceType::Workspace,
			ResourceRef::Member(_) => ResourceType::Member,
			ResourceRef::Author(_) => ResourceType::Author,
			ResourceRef::Post(_) | ResourceRef::NewPost(_) => ResourceType::Post,
		}
	}

	pub fn id(&self) -> String {
		match self {
			ResourceRef::Workspace(id) => id.to_string(),
			ResourceRef::Member(id) => id.to_string(),
			ResourceRef::Author(id) => id.to_string(),
			ResourceRef::Post(id) => id.to_string(),
			ResourceRef::NewPost(page_id) => format!("new@{page_id}"),
		}
	}
}

/// Builds evaluation attributes from the collaborators.
pub struct AbilityLoader<'a> {
	store: &'a dyn PermissionStore,
	resolver: &'a dyn ResourceResolver,
}

impl<'a> AbilityLoader<'a> {
	pub fn new(store: &'a dyn PermissionStore, resolver: &'a dyn ResourceResolver) -> Self {
		Self { store, resolver }
	}

	/// Resolve a resource and every association its rule reads.
	pub async fn load_resource(&self, resource: ResourceRef) -> Result<ResourceAttrs> {
		match resource {
			ResourceRef::Workspace(id) => {
				let workspace = self
					.resolver
					.workspace(id)
					.await?
					.ok_or_else(|| AuthError::not_found(ResourceType::Workspace, id))?;
				Ok(ResourceAttrs::Workspace(workspace_attrs(&workspace)))
			}
			ResourceRef::Member(id) => {
				let member = self
					.resolver
					.member(id)
					.await?
					.ok_or_else(|| AuthError::not_found(ResourceType::Member, id))?;
				let workspace = self
					.owning_workspace(member.workspace_id, "member", id)
					.await?;
				Ok(ResourceAttrs::member(id, workspace, member.user_id))
			}
			ResourceRef::Author(id) => {
				let author = self
					.resolver
					.author(id)
					.await?
					.ok_or_else(|| AuthError::not_found(ResourceType::Author, id))?;
				let workspace = self
					.owning_workspace(author.workspace_id, "author", id)
					.await?;
				let member_user_id = match author.member_id {
					Some(member_id) => Some(self.linked_member_user(&author, member_id).await?),
					None => None,
				};
				Ok(ResourceAttrs::author(id, workspace, member_user_id))
			}
			ResourceRef::Post(id) => {
				let post = self
					.resolver
					.post(id)
					.await?
					.ok_or_else(|| AuthError::not_found(ResourceType::Post, id))?;
				let page = self.resolver.page(post.page_id).await?.ok_or_else(|| {
					AuthError::Integrity(format!("post {id} references missing page {}", post.page_id))
				})?;
				let workspace = self
					.owning_workspace(page.workspace_id, "page", page.id)
					.await?;
				let author_ids = self.resolver.post_authors(&post).await?;
				Ok(ResourceAttrs::post(id, page.id, workspace, author_ids))
			}
			ResourceRef::NewPost(page_id) => {
				// The page is what the caller names here, so a missing page is a
				// not-found rather than an integrity problem.
				let page = self
					.resolver
					.page(page_id)
					.await?
					.ok_or_else(|| AuthError::not_found(ResourceType::Post, format!("new@{page_id}")))?;
				let workspace = self
					.owning_workspace(page.workspace_id, "page", page_id)
					.await?;
				Ok(ResourceAttrs::new_post(page_id, workspace))
			}
		}
	}

	/// Resolve the subject's standing in the resource's workspace.
	///
	/// The owner bypasses every permission check, so nothing is read for them.
	pub async fn load_subject(&self, user_id: UserId, workspace: &WorkspaceAttrs) -> Result<SubjectAttrs> {
		let subject = SubjectAttrs::new(user_id);
		if workspace.is_owner(user_id) {
			return Ok(subject);
		}

		let Some(permissions) = self
			.store
			.permissions_for(workspace.workspace_id, user_id)
			.await?
		else {
			return Ok(subject);
		};

		// A member without a linked author simply has no own-author.
		let author_id = self
			.store
			.member_of(workspace.workspace_id, user_id)
			.await?
			.and_then(|member| member.author_id);

		Ok(subject.with_membership(MembershipAttr {
			workspace_id: workspace.workspace_id,
			permissions,
			author_id,
		}))
	}

	async fn owning_workspace(
		&self,
		workspace_id: WorkspaceId,
		owner_kind: &str,
		owner_id: impl std::fmt::Display,
	) -> Result<WorkspaceAttrs> {
		let workspace = self.resolver.workspace(workspace_id).await?.ok_or_else(|| {
			AuthError::Integrity(format!(
				"{owner_kind} {owner_id} references missing workspace {workspace_id}"
			))
		})?;
		Ok(workspace_attrs(&workspace))
	}

	async fn linked_member_user(&self, author: &Author, member_id: MemberId) -> Result<UserId> {
		let member = self.resolver.member(member_id).await?.ok_or_else(|| {
			AuthError::Integrity(format!(
				"author {} references missing member {member_id}",
				author.id
			))
		})?;
		if member.workspace_id != author.workspace_id {
			return Err(AuthError::Integrity(format!(
				"author {} and its member {member_id} belong to different workspaces",
				author.id
			)));
		}
		Ok(member.user_id)
	}
}

fn workspace_attrs(workspace: &Workspace) -> WorkspaceAttrs {
	WorkspaceAttrs {
		workspace_id: workspace.id,
		owner_user_id: workspace.owner_id,
	}
}

/// Loads attributes, evaluates the rules, and records the decision.
#[derive(Clone)]
pub struct Ability {
	store: Arc<dyn PermissionStore>,
	resolver: Arc<dyn ResourceResolver>,
	audit: Option<Arc<dyn AuditSink>>,
	denial_policy: DenialPolicy,
}

impl Ability {
	/// An ability with the default denial policy and no audit sink.
	pub fn new(store: Arc<dyn PermissionStore>, resolver: Arc<dyn ResourceResolver>) -> Self {
		Self {
			store,
			resolver,
			audit: None,
			denial_policy: DenialPolicy::default(),
		}
	}

	/// An ability wired from configuration: audit decisions to tracing when
	/// enabled.
	pub fn from_config(
		store: Arc<dyn PermissionStore>,
		resolver: Arc<dyn ResourceResolver>,
		config: &AuthzConfig,
	) -> Self {
		let ability = Self::new(store, resolver).with_denial_policy(config.denial_policy);
		if config.audit_decisions {
			ability.with_audit_sink(Arc::new(TracingAuditSink))
		} else {
			ability
		}
	}

	pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
		self.audit = Some(sink);
		self
	}

	pub fn with_denial_policy(mut self, policy: DenialPolicy) -> Self {
		self.denial_policy = policy;
		self
	}

	pub fn denial_policy(&self) -> DenialPolicy {
		self.denial_policy
	}

	/// Decide whether `user_id` may perform `action` on `resource`.
	///
	/// `Ok(false)` is a denial. `Err` means the resource does not exist or the
	/// collaborators returned inconsistent data.
	#[instrument(
		skip(self),
		fields(user_id = %user_id, action = %action, resource_type = %resource.resource_type())
	)]
	pub async fn can(&self, user_id: UserId, action: Action, resource: ResourceRef) -> Result<bool> {
		// Only creation can target a post that does not exist yet.
		if let ResourceRef::NewPost(_) = resource {
			if action != Action::Create {
				return Err(AuthError::not_found(ResourceType::Post, resource.id()));
			}
		}

		let loader = AbilityLoader::new(self.store.as_ref(), self.resolver.as_ref());

		let loaded = match loader.load_resource(resource).await {
			Ok(attrs) => loader
				.load_subject(user_id, &attrs.workspace_attrs())
				.await
				.map(|subject| (subject, attrs)),
			Err(err) => Err(err),
		};

		let (subject, attrs) = match loaded {
			Ok(loaded) => loaded,
			Err(err) => {
				if err.is_fatal() {
					warn!(error = %err, "authorization aborted");
					self.record(
						AuditLogEntry::builder(AuditEventType::IntegrityViolation)
							.actor(user_id)
							.resource(resource.resource_type().to_string(), resource.id())
							.action(action.to_string())
							.details(serde_json::json!({ "error": err.to_string() })),
					);
				}
				return Err(err);
			}
		};

		let allowed = ability::can(&subject, action, &attrs);
		debug!(allowed, "decision");

		let event_type = if allowed {
			AuditEventType::AccessGranted
		} else {
			AuditEventType::AccessDenied
		};
		self.record(
			AuditLogEntry::builder(event_type)
				.actor(user_id)
				.workspace(attrs.workspace_attrs().workspace_id)
				.resource(attrs.resource_type().to_string(), attrs.resource_id())
				.action(action.to_string()),
		);

		Ok(allowed)
	}

	/// Negation of [`Ability::can`]; errors pass through unchanged.
	pub async fn cannot(&self, user_id: UserId, action: Action, resource: ResourceRef) -> Result<bool> {
		self.can(user_id, action, resource).await.map(|allowed| !allowed)
	}

	/// Like [`Ability::can`], but shaped for request handlers.
	pub async fn authorize(
		&self,
		user_id: UserId,
		action: Action,
		resource: ResourceRef,
	) -> std::result::Result<(), AuthorizationError> {
		match self.can(user_id, action, resource).await? {
			true => Ok(()),
			false => Err(AuthorizationError::denied(self.denial_policy)),
		}
	}

	fn record(&self, entry: crate::audit::AuditLogBuilder) {
		if let Some(sink) = &self.audit {
			sink.record(entry.build());
		}
	}
}
