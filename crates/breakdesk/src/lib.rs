// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command implementations behind the `breakdesk` binary.

pub mod serve;
pub mod show_config;
