// Copyright 2025 the plotguide Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input-validation errors shared by all components.

extern crate alloc;

use alloc::string::String;

/// Errors returned when a caller hands a component invalid input.
///
/// Every variant names the offending argument so the message can be surfaced directly.
/// These are never retried: the caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A range is reversed, contains `NaN`, or is unbounded where a finite range is required.
    #[error("invalid range for `{argument}`: {reason}")]
    InvalidRange {
        /// The argument that carried the range.
        argument: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// A break request cannot be satisfied as written.
    #[error("invalid break request for `{argument}`: {reason}")]
    InvalidBreakRequest {
        /// The argument that carried the request.
        argument: &'static str,
        /// What is wrong with it.
        reason: String,
    },
    /// An explicit category order is malformed.
    #[error("invalid categories: {reason}")]
    InvalidCategories {
        /// What is wrong with the order.
        reason: String,
    },
}

impl Error {
    /// Shorthand for [`Error::InvalidRange`].
    pub fn invalid_range(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            argument,
            reason: reason.into(),
        }
    }

    /// Shorthand for [`Error::InvalidBreakRequest`].
    pub fn invalid_breaks(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidBreakRequest {
            argument,
            reason: reason.into(),
        }
    }

    /// Returns the offending argument name, if the variant carries one.
    pub fn argument(&self) -> Option<&'static str> {
        match self {
            Self::InvalidRange { argument, .. } | Self::InvalidBreakRequest { argument, .. } => {
                Some(*argument)
            }
            Self::InvalidCategories { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use super::*;

    #[test]
    fn message_names_the_argument() {
        let err = Error::invalid_breaks("count", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid break request for `count`: must be at least 1"
        );
        assert_eq!(err.argument(), Some("count"));
    }
}
