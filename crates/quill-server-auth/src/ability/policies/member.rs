// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Member record access policies.

use crate::ability::{Action, MemberAttrs, SubjectAttrs};

/// The workspace owner manages every member record, including their own.
pub fn evaluate(subject: &SubjectAttrs, action: Action, member: &MemberAttrs) -> bool {
	match action {
		Action::Manage => member.workspace.is_owner(subject.user_id),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ability::WorkspaceAttrs;
	use crate::{MemberId, UserId, WorkspaceId};

	fn member_of(owner: UserId, user: UserId) -> MemberAttrs {
		MemberAttrs {
			member_id: MemberId::generate(),
			workspace: WorkspaceAttrs {
				workspace_id: WorkspaceId::generate(),
				owner_user_id: owner,
			},
			user_id: user,
		}
	}

	#[test]
	fn owner_manages_other_members() {
		let owner = UserId::generate();
		let member = member_of(owner, UserId::generate());
		assert!(evaluate(&SubjectAttrs::new(owner), Action::Manage, &member));
	}

	#[test]
	fn owner_manages_own_membership_row() {
		let owner = UserId::generate();
		let member = member_of(owner, owner);
		assert!(evaluate(&SubjectAttrs::new(owner), Action::Manage, &member));
	}

	#[test]
	fn member_cannot_manage_self() {
		let user = UserId::generate();
		let member = member_of(UserId::generate(), user);
		assert!(!evaluate(&SubjectAttrs::new(user), Action::Manage, &member));
	}
}
