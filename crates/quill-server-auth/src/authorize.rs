// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning decisions into caller-facing errors.
//!
//! The engine answers with a boolean. Request handlers need an error they can
//! return, and that error must not reveal why access failed. Under
//! [`DenialPolicy::NotFound`] a denial is reported exactly like a resource
//! that does not exist.

use http::StatusCode;
use quill_server_config::DenialPolicy;
use serde::Serialize;
use tracing::instrument;

use crate::ability::{self, Action, ResourceAttrs, SubjectAttrs};
use crate::error::AuthError;

/// Error returned to callers when an authorization check does not pass.
///
/// `Display` renders the client-safe message, so a denial under
/// [`DenialPolicy::NotFound`] prints exactly like a missing resource. The
/// underlying [`AuthError`] of an internal failure is only reachable through
/// [`std::error::Error::source`].
#[derive(Debug)]
pub enum AuthorizationError {
	Denied { policy: DenialPolicy },
	NotFound,
	Internal(AuthError),
}

/// JSON body for an authorization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
	pub error: &'static str,
	pub message: &'static str,
}

impl AuthorizationError {
	pub fn denied(policy: DenialPolicy) -> Self {
		Self::Denied { policy }
	}

	pub fn status_code(&self) -> StatusCode {
		match self {
			AuthorizationError::Denied {
				policy: DenialPolicy::NotFound,
			}
			| AuthorizationError::NotFound => StatusCode::NOT_FOUND,
			AuthorizationError::Denied {
				policy: DenialPolicy::Forbidden,
			} => StatusCode::FORBIDDEN,
			AuthorizationError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	/// Message safe to show a client. Never names the permission involved.
	pub fn message(&self) -> &'static str {
		self.body().message
	}

	/// Client-safe body; depends only on the status code.
	pub fn body(&self) -> ErrorBody {
		match self.status_code() {
			StatusCode::NOT_FOUND => ErrorBody {
				error: "not_found",
				message: "Resource not found",
			},
			StatusCode::FORBIDDEN => ErrorBody {
				error: "forbidden",
				message: "Insufficient permissions",
			},
			_ => ErrorBody {
				error: "internal_error",
				message: "Internal server error",
			},
		}
	}
}

impl std::fmt::Display for AuthorizationError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.message())
	}
}

impl std::error::Error for AuthorizationError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			AuthorizationError::Internal(err) => Some(err),
			_ => None,
		}
	}
}

impl From<AuthError> for AuthorizationError {
	fn from(err: AuthError) -> Self {
		match err {
			AuthError::ResourceNotFound { .. } => AuthorizationError::NotFound,
			other => AuthorizationError::Internal(other),
		}
	}
}

/// Check a decision and map a denial according to `policy`.
#[instrument(
	skip(subject, resource),
	fields(
		user_id = %subject.user_id,
		action = %action,
		resource_type = %resource.resource_type(),
	)
)]
pub fn check_authorization(
	subject: &SubjectAttrs,
	action: Action,
	resource: &ResourceAttrs,
	policy: DenialPolicy,
) -> Result<(), AuthorizationError> {
	if ability::can(subject, action, resource) {
		tracing::debug!("Authorization check passed");
		Ok(())
	} else {
		tracing::info!("authorization denied");
		Err(AuthorizationError::denied(policy))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{PostId, UserId, WorkspaceId};

	fn workspace_resource(owner: UserId) -> ResourceAttrs {
		ResourceAttrs::workspace(WorkspaceId::generate(), owner)
	}

	#[test]
	fn allowed_check_is_ok() {
		let owner = UserId::generate();
		let result = check_authorization(
			&SubjectAttrs::new(owner),
			Action::Manage,
			&workspace_resource(owner),
			DenialPolicy::NotFound,
		);
		assert!(result.is_ok());
	}

	#[test]
	fn denial_under_not_found_policy_matches_missing_resource() {
		let err = check_authorization(
			&SubjectAttrs::new(UserId::generate()),
			Action::Manage,
			&workspace_resource(UserId::generate()),
			DenialPolicy::NotFound,
		)
		.unwrap_err();

		let missing: AuthorizationError = AuthError::not_found(
			crate::ability::ResourceType::Post,
			PostId::generate(),
		)
		.into();

		assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
		assert_eq!(err.status_code(), missing.status_code());
		assert_eq!(err.body(), missing.body());
	}

	#[test]
	fn display_does_not_distinguish_denial_from_missing_resource() {
		let denied = AuthorizationError::denied(DenialPolicy::NotFound);
		let missing = AuthorizationError::NotFound;
		assert_eq!(denied.to_string(), missing.to_string());
		assert_eq!(denied.to_string(), "Resource not found");
		assert_eq!(
			AuthorizationError::denied(DenialPolicy::Forbidden).to_string(),
			"Insufficient permissions"
		);
	}

	#[test]
	fn internal_display_hides_detail_but_keeps_source() {
		use std::error::Error;

		let err: AuthorizationError =
			AuthError::Integrity("post references missing page".to_string()).into();
		assert_eq!(err.to_string(), "Internal server error");
		let source = err.source().expect("internal errors carry their cause");
		assert!(source.to_string().contains("missing page"));
	}

	#[test]
	fn denial_under_forbidden_policy_is_403() {
		let err = check_authorization(
			&SubjectAttrs::new(UserId::generate()),
			Action::Manage,
			&workspace_resource(UserId::generate()),
			DenialPolicy::Forbidden,
		)
		.unwrap_err();
		assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
		assert_eq!(err.body().message, "Insufficient permissions");
	}

	#[test]
	fn integrity_errors_are_internal() {
		let err: AuthorizationError = AuthError::Integrity("post without page".to_string()).into();
		assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
		assert!(!err.body().message.contains("page"));
	}
}
