// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Author access policies.

use crate::ability::{Action, AuthorAttrs, SubjectAttrs};

/// Authors are edited by the workspace owner or by the user behind them.
pub fn evaluate(subject: &SubjectAttrs, action: Action, author: &AuthorAttrs) -> bool {
	match action {
		Action::Edit => {
			author.workspace.is_owner(subject.user_id)
				|| author.member_user_id == Some(subject.user_id)
		}
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ability::WorkspaceAttrs;
	use crate::{AuthorId, UserId, WorkspaceId};

	fn author(owner: UserId, member_user: Option<UserId>) -> AuthorAttrs {
		AuthorAttrs {
			author_id: AuthorId::generate(),
			workspace: WorkspaceAttrs {
				workspace_id: WorkspaceId::generate(),
				owner_user_id: owner,
			},
			member_user_id: member_user,
		}
	}

	#[test]
	fn owner_edits_any_author() {
		let owner = UserId::generate();
		let subject = SubjectAttrs::new(owner);
		assert!(evaluate(&subject, Action::Edit, &author(owner, None)));
		assert!(evaluate(
			&subject,
			Action::Edit,
			&author(owner, Some(UserId::generate()))
		));
	}

	#[test]
	fn linked_user_edits_own_author() {
		let user = UserId::generate();
		let attrs = author(UserId::generate(), Some(user));
		assert!(evaluate(&SubjectAttrs::new(user), Action::Edit, &attrs));
	}

	#[test]
	fn guest_byline_only_editable_by_owner() {
		let attrs = author(UserId::generate(), None);
		assert!(!evaluate(
			&SubjectAttrs::new(UserId::generate()),
			Action::Edit,
			&attrs
		));
	}

	#[test]
	fn linked_user_cannot_destroy_author() {
		let user = UserId::generate();
		let attrs = author(UserId::generate(), Some(user));
		assert!(!evaluate(&SubjectAttrs::new(user), Action::Destroy, &attrs));
	}
}
