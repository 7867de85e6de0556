// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Post access policies.
//!
//! Create, edit and destroy share one rule: the workspace owner always passes,
//! otherwise the member needs the workspace-wide permission, or for edit and
//! destroy the `_own` variant plus an author identity on the post.

use tracing::trace;

use crate::ability::{Action, PostAttrs, SubjectAttrs};
use crate::permission::{Permission, PermissionAction};

pub fn evaluate(subject: &SubjectAttrs, action: Action, post: &PostAttrs) -> bool {
	let (permission, try_own) = match action {
		Action::Create => (PermissionAction::Create, false),
		_ if post.post_id.is_none() => return false,
		Action::Edit => (PermissionAction::Edit, true),
		Action::Destroy => (PermissionAction::Destroy, true),
		_ => return false,
	};
	generic_rule(subject, post, Permission::posts(permission), try_own)
}

fn generic_rule(
	subject: &SubjectAttrs,
	post: &PostAttrs,
	permission: Permission,
	try_own: bool,
) -> bool {
	let workspace = &post.workspace;
	if workspace.is_owner(subject.user_id) {
		trace!("workspace owner bypasses permission checks");
		return true;
	}

	let Some(membership) = subject.membership(workspace.workspace_id) else {
		trace!("subject has no membership in the post's workspace");
		return false;
	};

	if membership.permissions.contains(permission) {
		return true;
	}

	if !try_own || !membership.permissions.contains(permission.own()) {
		return false;
	}

	// Without an author identity the own check can never pass.
	match membership.author_id {
		Some(author_id) => post.author_ids.contains(&author_id),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ability::{MembershipAttr, WorkspaceAttrs};
	use crate::permission::PermissionSet;
	use crate::{AuthorId, PageId, PostId, UserId, WorkspaceId};

	struct Fixture {
		owner: UserId,
		workspace: WorkspaceAttrs,
	}

	impl Fixture {
		fn new() -> Self {
			let owner = UserId::generate();
			Self {
				owner,
				workspace: WorkspaceAttrs {
					workspace_id: WorkspaceId::generate(),
					owner_user_id: owner,
				},
			}
		}

		fn member(&self, permissions: &[&str], author_id: Option<AuthorId>) -> SubjectAttrs {
			SubjectAttrs::new(UserId::generate()).with_membership(MembershipAttr {
				workspace_id: self.workspace.workspace_id,
				permissions: PermissionSet::parse_all(permissions).unwrap(),
				author_id,
			})
		}

		fn post(&self, author_ids: Vec<AuthorId>) -> PostAttrs {
			PostAttrs {
				post_id: Some(PostId::generate()),
				page_id: PageId::generate(),
				workspace: self.workspace,
				author_ids,
			}
		}
	}

	mod owner {
		use super::*;

		#[test]
		fn owner_passes_every_post_action_without_membership() {
			let fx = Fixture::new();
			let subject = SubjectAttrs::new(fx.owner);
			let post = fx.post(vec![]);
			assert!(evaluate(&subject, Action::Create, &post));
			assert!(evaluate(&subject, Action::Edit, &post));
			assert!(evaluate(&subject, Action::Destroy, &post));
		}

		#[test]
		fn owner_cannot_manage_posts() {
			let fx = Fixture::new();
			assert!(!evaluate(
				&SubjectAttrs::new(fx.owner),
				Action::Manage,
				&fx.post(vec![])
			));
		}
	}

	mod create {
		use super::*;

		#[test]
		fn requires_create_permission() {
			let fx = Fixture::new();
			let post = fx.post(vec![]);
			assert!(evaluate(&fx.member(&["posts:create"], None), Action::Create, &post));
			assert!(!evaluate(&fx.member(&["posts:edit"], None), Action::Create, &post));
		}

		#[test]
		fn unsaved_post_only_supports_create() {
			let fx = Fixture::new();
			let unsaved = PostAttrs {
				post_id: None,
				..fx.post(vec![])
			};
			let editor = fx.member(&["posts:create", "posts:edit", "posts:destroy"], None);
			for subject in [SubjectAttrs::new(fx.owner), editor] {
				assert!(evaluate(&subject, Action::Create, &unsaved));
				assert!(!evaluate(&subject, Action::Edit, &unsaved));
				assert!(!evaluate(&subject, Action::Destroy, &unsaved));
			}
		}

		#[test]
		fn authoring_does_not_grant_create() {
			let fx = Fixture::new();
			let author = AuthorId::generate();
			let post = fx.post(vec![author]);
			let subject = fx.member(&["posts:edit_own"], Some(author));
			assert!(!evaluate(&subject, Action::Create, &post));
		}
	}

	mod edit {
		use super::*;

		#[test]
		fn workspace_wide_permission_covers_any_post() {
			let fx = Fixture::new();
			let subject = fx.member(&["posts:edit"], None);
			assert!(evaluate(&subject, Action::Edit, &fx.post(vec![AuthorId::generate()])));
		}

		#[test]
		fn own_permission_covers_authored_posts_only() {
			let fx = Fixture::new();
			let author = AuthorId::generate();
			let subject = fx.member(&["posts:edit_own"], Some(author));
			assert!(evaluate(
				&subject,
				Action::Edit,
				&fx.post(vec![AuthorId::generate(), author])
			));
			assert!(!evaluate(
				&subject,
				Action::Edit,
				&fx.post(vec![AuthorId::generate()])
			));
		}

		#[test]
		fn own_permission_without_author_denies() {
			let fx = Fixture::new();
			let subject = fx.member(&["posts:edit_own"], None);
			assert!(!evaluate(&subject, Action::Edit, &fx.post(vec![AuthorId::generate()])));
			assert!(!evaluate(&subject, Action::Edit, &fx.post(vec![])));
		}

		#[test]
		fn authorship_alone_is_not_enough() {
			let fx = Fixture::new();
			let author = AuthorId::generate();
			let subject = fx.member(&[], Some(author));
			assert!(!evaluate(&subject, Action::Edit, &fx.post(vec![author])));
		}

		#[test]
		fn membership_in_another_workspace_does_not_count() {
			let fx = Fixture::new();
			let other = Fixture::new();
			let author = AuthorId::generate();
			let subject = other.member(&["posts:edit", "posts:edit_own"], Some(author));
			assert!(!evaluate(&subject, Action::Edit, &fx.post(vec![author])));
		}
	}

	mod destroy {
		use super::*;

		#[test]
		fn edit_permissions_do_not_grant_destroy() {
			let fx = Fixture::new();
			let author = AuthorId::generate();
			let subject = fx.member(&["posts:edit", "posts:edit_own"], Some(author));
			assert!(!evaluate(&subject, Action::Destroy, &fx.post(vec![author])));
		}

		#[test]
		fn destroy_own_covers_authored_posts() {
			let fx = Fixture::new();
			let author = AuthorId::generate();
			let subject = fx.member(&["posts:destroy_own"], Some(author));
			assert!(evaluate(&subject, Action::Destroy, &fx.post(vec![author])));
			assert!(!evaluate(&subject, Action::Destroy, &fx.post(vec![])));
		}
	}
}
