// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workspace-scoped ability evaluation.
//!
//! [`can`] decides whether a subject may perform an [`Action`] on a resource
//! described by [`ResourceAttrs`]. Rules are pure; loading the attributes is
//! the job of [`crate::resolver`].

pub mod engine;
pub mod policies;
pub mod types;

pub use engine::{can, cannot, has_rule, RULES};
pub use types::{
	Action, AuthorAttrs, MemberAttrs, MembershipAttr, PostAttrs, ResourceAttrs, ResourceType,
	SubjectAttrs, WorkspaceAttrs,
};
