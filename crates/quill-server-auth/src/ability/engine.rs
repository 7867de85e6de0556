// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ability evaluation engine.
//!
//! This module contains the [`can`] function that evaluates access decisions.
//! Evaluation is two-phase:
//!
//! 1. **Registry check**: the `(resource type, action)` pair must appear in
//!    [`RULES`]; anything else is denied without consulting a rule
//! 2. **Resource-specific policy**: Delegates to the rule set for the resource
//!
//! Decisions are pure functions of their inputs, with no side effects beyond
//! tracing, so repeated calls with the same inputs always agree.

use super::policies::{author, member, post, workspace};
use super::types::{Action, ResourceAttrs, ResourceType, SubjectAttrs};
use tracing::{debug, instrument};

/// Every `(resource type, action)` pair that has a rule.
///
/// Pairs not listed here are denied. Adding a rule to a policy module without
/// registering it here leaves it unreachable.
pub const RULES: &[(ResourceType, Action)] = &[
	(ResourceType::Workspace, Action::Manage),
	(ResourceType::Member, Action::Manage),
	(ResourceType::Author, Action::Edit),
	(ResourceType::Post, Action::Create),
	(ResourceType::Post, Action::Edit),
	(ResourceType::Post, Action::Destroy),
];

/// Returns true if a rule is registered for the pair.
pub fn has_rule(resource_type: ResourceType, action: Action) -> bool {
	RULES
		.iter()
		.any(|&(t, a)| t == resource_type && a == action)
}

/// Evaluates whether a subject is allowed to perform an action on a resource.
///
/// # Tracing
///
/// This function is instrumented with tracing. The decision is logged at
/// debug level along with the user, action and resource type.
#[instrument(
    level = "debug",
    skip(subject, resource),
    fields(
        user_id = %subject.user_id,
        action = %action,
        resource_type = %resource.resource_type(),
    )
)]
pub fn can(subject: &SubjectAttrs, action: Action, resource: &ResourceAttrs) -> bool {
	if !has_rule(resource.resource_type(), action) {
		debug!("no rule registered, denying");
		return false;
	}

	let allowed = match resource {
		ResourceAttrs::Workspace(attrs) => workspace::evaluate(subject, action, attrs),
		ResourceAttrs::Member(attrs) => member::evaluate(subject, action, attrs),
		ResourceAttrs::Author(attrs) => author::evaluate(subject, action, attrs),
		ResourceAttrs::Post(attrs) => post::evaluate(subject, action, attrs),
	};

	debug!(allowed, "ability decision");
	allowed
}

/// Negation of [`can`].
pub fn cannot(subject: &SubjectAttrs, action: Action, resource: &ResourceAttrs) -> bool {
	!can(subject, action, resource)
}
