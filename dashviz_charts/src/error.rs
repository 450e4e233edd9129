// Copyright 2026 the Dashviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors from the fallible surfaces of the crate: payload parsing and configuration.
///
/// Rendering, animation and hover never fail; they clamp or default instead.
#[derive(Error, Debug)]
pub enum ChartError {
    /// The backend payload or configuration was not valid JSON of the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A palette or style entry could not be parsed as a CSS color.
    #[error("Invalid color {value:?}: {reason}")]
    InvalidColor {
        /// The offending input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A configuration value is outside its accepted range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for [`ChartError`].
pub type Result<T> = std::result::Result<T, ChartError>;
