// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the record store

use chrono::NaiveDate;
use std::io;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A required field was missing or a value failed validation.
///
/// Raised at construction or commit time; an entity carrying one of these
/// problems never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Serial number value was empty or absent
    #[error("serial number value is required")]
    EmptySerialNumber,

    /// A serial number image was supplied without a value
    #[error("serial number image set without a serial number value")]
    SerialImageWithoutValue,

    /// Wish title was empty or absent
    #[error("item title is required")]
    EmptyItemTitle,

    /// Non-numeric input to an integer attribute
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber {
        /// Attribute label
        field: &'static str,
        /// Rejected input
        value: String,
    },

    /// Currency amount could not be parsed
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Purchase date lies after today
    #[error("purchase date {0} is in the future")]
    FutureDate(NaiveDate),

    /// Attribute label not known to the draft editor
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
}

/// Library error
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid entity
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Enumeration label not recognised
    #[error("invalid {kind} value: {value:?}")]
    InvalidEnumValue {
        /// Enumeration name
        kind: &'static str,
        /// Rejected label
        value: String,
    },

    /// Persisted data is corrupt or from an incompatible layout
    #[error("failed to decode {collection}: {message}")]
    Decode {
        /// Collection (or entity) being decoded
        collection: String,
        /// Underlying decoder message
        message: String,
    },

    /// Records could not be serialized
    #[error("failed to encode {collection}: {message}")]
    Encode {
        /// Collection (or entity) being encoded
        collection: String,
        /// Underlying encoder message
        message: String,
    },

    /// Saving a collection failed
    #[error("failed to persist {collection}")]
    Persistence {
        /// Collection being written
        collection: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Reading a collection failed for a reason other than absence
    #[error("failed to read {collection}: {source}")]
    Read {
        /// Collection being read
        collection: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The collection could not be read at load time; writes are refused
    /// so the stored data is not replaced by sample records
    #[error("{collection} could not be read when loading; refusing to overwrite it")]
    Unavailable {
        /// Collection that was not loaded
        collection: String,
    },

    /// Positional address outside the collection
    #[error("position {index} is out of range for a list of {len}")]
    IndexOutOfRange {
        /// Requested position (0-based)
        index: usize,
        /// Collection length
        len: usize,
    },

    /// A move to history failed and could not be rolled back on disk
    #[error("moving wish to history left it in both lists on disk: {cause}; rollback failed: {rollback}")]
    MoveIncomplete {
        /// Failure of the removal from the current list
        cause: Box<Error>,
        /// Failure of the compensating removal from history
        rollback: Box<Error>,
    },
}

impl Error {
    /// Build a decode error for a collection from any displayable cause
    pub fn decode(collection: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::Decode {
            collection: collection.into(),
            message: cause.to_string(),
        }
    }

    /// Build a persistence error for a collection
    pub fn persistence(collection: impl Into<String>, source: io::Error) -> Self {
        Self::Persistence {
            collection: collection.into(),
            source,
        }
    }

    /// Build a read error for a collection
    pub fn read(collection: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            collection: collection.into(),
            source,
        }
    }

    /// Attach a collection name to codec errors
    #[must_use]
    pub fn in_collection(self, name: &str) -> Self {
        match self {
            Self::Decode { message, .. } => Self::Decode {
                collection: name.to_string(),
                message,
            },
            Self::Encode { message, .. } => Self::Encode {
                collection: name.to_string(),
                message,
            },
            other => other,
        }
    }

    /// True for errors caused by corrupt persisted data
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}
