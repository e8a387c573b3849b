use std::fmt;

use thiserror::Error;

use crate::{models::thermal::ghe::core::GeometryError, support::numeric::TableError};

/// The kinds of named input object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Properties,
    ResponseFactors,
    Array,
    Borehole,
    System,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Properties => "borehole properties",
            Self::ResponseFactors => "response factors",
            Self::Array => "borehole array",
            Self::Borehole => "single borehole",
            Self::System => "heat exchanger system",
        })
    }
}

/// A problem found while loading heat exchanger input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{kind} object has a blank name")]
    BlankName { kind: ObjectKind },

    #[error("{kind} object name {name:?} is used more than once")]
    DuplicateName { kind: ObjectKind, name: String },

    /// A reference names an object that does not exist, or a single
    /// borehole already claimed by another system.
    #[error("{kind} object {name:?} referenced by {referenced_by:?} not found")]
    NotFound {
        kind: ObjectKind,
        name: String,
        referenced_by: String,
    },

    #[error("response factors {name:?} have an uneven number of values ({count})")]
    UnevenPairs { name: String, count: usize },

    #[error("response factors {name:?} do not form a valid table: {source}")]
    InvalidTable { name: String, source: TableError },

    #[error("{kind} object {name:?} is invalid: {source}")]
    InvalidParameter {
        kind: ObjectKind,
        name: String,
        source: GeometryError,
    },

    #[error(
        "system {system:?} declares {declared} boreholes but array {array:?} has {found}"
    )]
    ArrayCountMismatch {
        system: String,
        array: String,
        declared: usize,
        found: usize,
    },

    #[error(
        "system {system:?} declares {declared} boreholes but lists {found} single boreholes"
    )]
    BoreholeCountMismatch {
        system: String,
        declared: usize,
        found: usize,
    },

    #[error(
        "system {system:?} requires both response factor sets or a borehole description"
    )]
    NoBoreholeSource { system: String },
}

/// Every error found in one load pass. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct InputErrors(Vec<InputError>);

impl InputErrors {
    /// Returns `Err` if any errors were collected.
    pub(super) fn check(errors: Vec<InputError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    #[must_use]
    pub fn errors(&self) -> &[InputError] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} input error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InputErrors {}

impl IntoIterator for InputErrors {
    type Item = InputError;
    type IntoIter = std::vec::IntoIter<InputError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
