// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Workspace access policies.

use crate::ability::{Action, SubjectAttrs, WorkspaceAttrs};

/// Only the owner manages a workspace.
pub fn evaluate(subject: &SubjectAttrs, action: Action, workspace: &WorkspaceAttrs) -> bool {
	match action {
		Action::Manage => workspace.is_owner(subject.user_id),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{UserId, WorkspaceId};

	fn workspace_owned_by(owner: UserId) -> WorkspaceAttrs {
		WorkspaceAttrs {
			workspace_id: WorkspaceId::generate(),
			owner_user_id: owner,
		}
	}

	#[test]
	fn owner_can_manage() {
		let owner = UserId::generate();
		let subject = SubjectAttrs::new(owner);
		assert!(evaluate(&subject, Action::Manage, &workspace_owned_by(owner)));
	}

	#[test]
	fn other_user_cannot_manage() {
		let subject = SubjectAttrs::new(UserId::generate());
		let workspace = workspace_owned_by(UserId::generate());
		assert!(!evaluate(&subject, Action::Manage, &workspace));
	}

	#[test]
	fn owner_gets_nothing_beyond_manage() {
		let owner = UserId::generate();
		let subject = SubjectAttrs::new(owner);
		let workspace = workspace_owned_by(owner);
		assert!(!evaluate(&subject, Action::Edit, &workspace));
		assert!(!evaluate(&subject, Action::Destroy, &workspace));
		assert!(!evaluate(&subject, Action::Create, &workspace));
	}
}
