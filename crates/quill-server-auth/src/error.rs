// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised by the authorization layer.
//!
//! A denial is never an error: it is a `false` decision. The variants here are
//! either a requested resource that does not exist, or a broken contract in
//! the data the collaborators returned.

use crate::ability::ResourceType;
use crate::permission::PermissionParseError;
use crate::types::UnknownRoleError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
	/// The resource named by the caller does not exist.
	#[error("{resource_type:?} {id} not found")]
	ResourceNotFound {
		resource_type: ResourceType,
		id: String,
	},

	/// A resource exists but a required association is missing.
	#[error("integrity violation: {0}")]
	Integrity(String),

	#[error(transparent)]
	Permission(#[from] PermissionParseError),

	#[error(transparent)]
	UnknownRole(#[from] UnknownRoleError),

	#[error("conflict: {0}")]
	Conflict(String),

	/// Failure inside a collaborator (storage, network).
	#[error("store error: {0}")]
	Store(String),
}

impl AuthError {
	pub fn not_found(resource_type: ResourceType, id: impl ToString) -> Self {
		Self::ResourceNotFound {
			resource_type,
			id: id.to_string(),
		}
	}

	/// True for errors that indicate corrupt data rather than a bad request.
	pub fn is_fatal(&self) -> bool {
		!matches!(self, AuthError::ResourceNotFound { .. })
	}
}

pub type Result<T> = std::result::Result<T, AuthError>;
