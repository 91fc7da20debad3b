// SPDX-License-Identifier: LGPL-3.0-or-later

//! Configuration errors.
//!
//! Fatal conditions detected while a module validates its input bank and
//! settings. They are returned from `Module::initialize` and mirrored to
//! the module's event sink.

use thiserror::Error;

/// Fatal configuration error raised by `Module::initialize`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A second-order section needs exactly three taps per array.
    #[error("filter section requires {expected} feedforward and {expected} feedback taps, got {feedforward} and {feedback}")]
    TapCount {
        expected: usize,
        feedforward: usize,
        feedback: usize,
    },
    /// Channel spacing cannot be derived from fewer than two channels.
    #[error("specific-loudness input requires more than one channel, got {got}")]
    TooFewChannels { got: usize },
    /// Loudness is integrated per ear for one or two ears only.
    #[error("ear count must be 1 or 2, got {got}")]
    EarCount { got: usize },
}

/// Result alias for configuration paths.
pub type ConfigResult<T> = Result<T, ConfigError>;
