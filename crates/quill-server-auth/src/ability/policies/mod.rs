// Copyright (c) 2025 Quill Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Per-resource rule sets.

pub mod author;
pub mod member;
pub mod post;
pub mod workspace;
