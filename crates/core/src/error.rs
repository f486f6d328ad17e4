// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type for the tracker's caller-visible failure mode.

use thiserror::Error;

/// Errors the tracker can raise to a caller.
///
/// Construction-time argument validation is the only caller-visible
/// failure mode. Logger failures and cleanup-sweep errors are swallowed
/// internally (logged, not propagated) and never appear here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
