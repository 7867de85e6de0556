// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.
//!
//! Each section comes in two shapes: a `*Layer` with every field optional, as
//! read from a single source, and the resolved `*Config` produced by
//! `finalize` once all layers are merged.

mod authz;
mod logging;

pub use authz::{AuthzConfig, AuthzConfigLayer, DenialPolicy};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
