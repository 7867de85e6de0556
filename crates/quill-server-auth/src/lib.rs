// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workspace-scoped authorization for Quill.
//!
//! This crate provides:
//! - A closed permission vocabulary (`posts:edit`, `posts:edit_own`, ...)
//! - Role presets composed with explicit per-member grants
//! - Pure ability rules over pre-resolved attributes ([`ability`])
//! - The [`Ability`] service that loads attributes from async collaborators,
//!   evaluates the rules and audits the decision
//! - Mapping of denials to client-facing errors ([`AuthorizationError`])
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use quill_server_auth::{Ability, Action, InMemoryDirectory, ResourceRef};
//!
//! let directory = Arc::new(InMemoryDirectory::new());
//! let ability = Ability::new(directory.clone(), directory);
//! ability.authorize(user_id, Action::Edit, ResourceRef::Post(post_id)).await?;
//! ```

pub mod ability;
pub mod audit;
pub mod authorize;
pub mod data;
pub mod error;
pub mod memory;
pub mod permission;
pub mod presets;
pub mod resolver;
pub mod types;

pub use ability::{
	can, cannot, has_rule, Action, AuthorAttrs, MemberAttrs, MembershipAttr, PostAttrs,
	ResourceAttrs, ResourceType, SubjectAttrs, WorkspaceAttrs, RULES,
};
pub use audit::{
	AuditEventType, AuditLogBuilder, AuditLogEntry, AuditSink, MemoryAuditSink, TracingAuditSink,
};
pub use authorize::{check_authorization, AuthorizationError, ErrorBody};
pub use data::{Author, Member, Page, Post, Workspace};
pub use error::{AuthError, Result};
pub use memory::InMemoryDirectory;
pub use permission::{
	Permission, PermissionAction, PermissionParseError, PermissionResource, PermissionScope,
	PermissionSet,
};
pub use presets::RolePresets;
pub use quill_server_config::DenialPolicy;
pub use resolver::{Ability, AbilityLoader, PermissionStore, ResourceRef, ResourceResolver};
pub use types::{
	AuthorId, MemberId, MemberRole, PageId, PostId, UnknownRoleError, UserId, WorkspaceId,
};
