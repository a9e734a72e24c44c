// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations for the `minijava` binary.

pub mod check;
pub mod fmt;
