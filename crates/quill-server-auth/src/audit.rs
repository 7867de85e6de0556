// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit logging for authorization decisions.
//!
//! Every decision made through [`crate::Ability`] can be recorded as an
//! [`AuditLogEntry`] and handed to an [`AuditSink`]. Entries carry ids and
//! names only, never permission sets.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{UserId, WorkspaceId};

/// Types of events that can be recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	/// Access to a resource was granted.
	AccessGranted,
	/// Access to a resource was denied.
	AccessDenied,
	/// A resolver returned data that breaks an association invariant.
	IntegrityViolation,
}

impl std::fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			AuditEventType::AccessGranted => "access_granted",
			AuditEventType::AccessDenied => "access_denied",
			AuditEventType::IntegrityViolation => "integrity_violation",
		};
		write!(f, "{s}")
	}
}

/// An entry in the audit log recording an authorization event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
	/// Unique identifier for this audit entry.
	pub id: Uuid,
	/// When the event occurred.
	pub timestamp: DateTime<Utc>,
	/// The type of event.
	pub event_type: AuditEventType,
	/// The user who attempted the action.
	pub actor_user_id: Option<UserId>,
	/// The workspace the resource belongs to, once resolved.
	pub workspace_id: Option<WorkspaceId>,
	/// The type of resource affected (e.g., "post", "author").
	pub resource_type: Option<String>,
	/// The ID of the resource affected.
	pub resource_id: Option<String>,
	/// The action that was checked.
	pub action: String,
	/// Additional event-specific details.
	pub details: serde_json::Value,
}

impl AuditLogEntry {
	/// Create a new audit log builder for the given event type.
	pub fn builder(event_type: AuditEventType) -> AuditLogBuilder {
		AuditLogBuilder::new(event_type)
	}
}

/// Builder for constructing audit log entries with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditLogBuilder {
	event_type: AuditEventType,
	actor_user_id: Option<UserId>,
	workspace_id: Option<WorkspaceId>,
	resource_type: Option<String>,
	resource_id: Option<String>,
	action: Option<String>,
	details: serde_json::Value,
}

impl AuditLogBuilder {
	/// Create a new builder for the given event type.
	pub fn new(event_type: AuditEventType) -> Self {
		Self {
			event_type,
			actor_user_id: None,
			workspace_id: None,
			resource_type: None,
			resource_id: None,
			action: None,
			details: serde_json::Value::Null,
		}
	}

	/// Set the user who attempted the action.
	pub fn actor(mut self, user_id: UserId) -> Self {
		self.actor_user_id = Some(user_id);
		self
	}

	pub fn workspace(mut self, workspace_id: WorkspaceId) -> Self {
		self.workspace_id = Some(workspace_id);
		self
	}

	/// Set the resource type and ID affected by this event.
	pub fn resource(
		mut self,
		resource_type: impl Into<String>,
		resource_id: impl Into<String>,
	) -> Self {
		self.resource_type = Some(resource_type.into());
		self.resource_id = Some(resource_id.into());
		self
	}

	/// Set the action that was checked.
	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	/// Set additional event-specific details.
	pub fn details(mut self, details: serde_json::Value) -> Self {
		self.details = details;
		self
	}

	/// Build the audit log entry.
	pub fn build(self) -> AuditLogEntry {
		AuditLogEntry {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type: self.event_type,
			actor_user_id: self.actor_user_id,
			workspace_id: self.workspace_id,
			resource_type: self.resource_type,
			resource_id: self.resource_id,
			action: self.action.unwrap_or_else(|| self.event_type.to_string()),
			details: self.details,
		}
	}
}

/// Destination for audit entries.
pub trait AuditSink: Send + Sync {
	fn record(&self, entry: AuditLogEntry);
}

/// Writes entries as structured tracing events on the `quill::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
	fn record(&self, entry: AuditLogEntry) {
		let actor = entry.actor_user_id.map(|id| id.to_string());
		let workspace = entry.workspace_id.map(|id| id.to_string());
		match entry.event_type {
			AuditEventType::AccessGranted => tracing::debug!(
				target: "quill::audit",
				event = %entry.event_type,
				actor = actor.as_deref(),
				workspace = workspace.as_deref(),
				resource_type = entry.resource_type.as_deref(),
				resource_id = entry.resource_id.as_deref(),
				action = %entry.action,
				"authorization granted"
			),
			AuditEventType::AccessDenied => tracing::info!(
				target: "quill::audit",
				event = %entry.event_type,
				actor = actor.as_deref(),
				workspace = workspace.as_deref(),
				resource_type = entry.resource_type.as_deref(),
				resource_id = entry.resource_id.as_deref(),
				action = %entry.action,
				"authorization denied"
			),
			AuditEventType::IntegrityViolation => tracing::error!(
				target: "quill::audit",
				event = %entry.event_type,
				actor = actor.as_deref(),
				resource_type = entry.resource_type.as_deref(),
				resource_id = entry.resource_id.as_deref(),
				action = %entry.action,
				details = %entry.details,
				"authorization aborted on integrity violation"
			),
		}
	}
}

/// Keeps entries in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
	entries: Arc<Mutex<Vec<AuditLogEntry>>>,
}

impl MemoryAuditSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of everything recorded so far.
	pub fn entries(&self) -> Vec<AuditLogEntry> {
		self
			.entries
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.clone()
	}
}

impl AuditSink for MemoryAuditSink {
	fn record(&self, entry: AuditLogEntry) {
		self
			.entries
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.push(entry);
	}
}
