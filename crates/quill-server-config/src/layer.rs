// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

use serde::{Deserialize, Serialize};

use crate::sections::{AuthzConfigLayer, LoggingConfigLayer};

/// One source's view of the configuration; every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfigLayer {
	pub authz: Option<AuthzConfigLayer>,
	pub logging: Option<LoggingConfigLayer>,
}

impl ServerConfigLayer {
	/// Merge a higher-precedence layer on top of this one.
	pub fn merge(&mut self, other: ServerConfigLayer) {
		merge_section(&mut self.authz, other.authz, AuthzConfigLayer::merge);
		merge_section(&mut self.logging, other.logging, LoggingConfigLayer::merge);
	}
}

fn merge_section<T: Default>(into: &mut Option<T>, from: Option<T>, merge: fn(&mut T, T)) {
	if let Some(from) = from {
		merge(into.get_or_insert_with(T::default), from);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sections::{DenialPolicy, LogFormat};

	#[test]
	fn later_layer_wins_field_by_field() {
		let mut base = ServerConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("debug".to_string()),
				format: Some(LogFormat::Json),
			}),
			..Default::default()
		};
		base.merge(ServerConfigLayer {
			authz: Some(AuthzConfigLayer {
				denial_policy: Some(DenialPolicy::Forbidden),
				..Default::default()
			}),
			logging: Some(LoggingConfigLayer {
				level: Some("warn".to_string()),
				format: None,
			}),
		});

		let logging = base.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("warn"));
		assert_eq!(logging.format, Some(LogFormat::Json));
		assert_eq!(
			base.authz.unwrap().denial_policy,
			Some(DenialPolicy::Forbidden)
		);
	}

	#[test]
	fn empty_layer_changes_nothing() {
		let mut base = ServerConfigLayer {
			logging: Some(LoggingConfigLayer {
				level: Some("trace".to_string()),
				format: None,
			}),
			..Default::default()
		};
		let before = base.clone();
		base.merge(ServerConfigLayer::default());
		assert_eq!(base, before);
	}
}
