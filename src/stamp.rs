//! Validation of the version metadata stamped into the build.
use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;

use crate::constants::{GIT_REVISION, GIT_VERSION};

/// Value the build script falls back to when nothing better is known.
pub(crate) const PLACEHOLDER: &str = "unknown";

/// One of the build-injected constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StampField {
    GitVersion,
    GitRevision,
}

impl StampField {
    /// All fields, in declaration order.
    pub(crate) const ALL: [Self; 2] = [Self::GitVersion, Self::GitRevision];

    /// Name of the constant this field is read from.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::GitVersion => "GIT_VERSION",
            Self::GitRevision => "GIT_REVISION",
        }
    }
}

impl fmt::Display for StampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StampError {
    #[error("build stamp incomplete: {}", describe(.fields, "is empty"))]
    Empty { fields: Vec<StampField> },

    #[error("build stamp uses placeholders: {}", describe(.fields, "is `unknown`"))]
    Placeholder { fields: Vec<StampField> },
}

impl StampError {
    /// Fields that caused the error.
    pub(crate) fn fields(&self) -> &[StampField] {
        match self {
            Self::Empty { fields } | Self::Placeholder { fields } => fields,
        }
    }
}

fn describe(fields: &[StampField], problem: &str) -> String {
    fields
        .iter()
        .map(|field| format!("{field} {problem}"))
        .join(", ")
}

/// Version metadata of a build.
///
/// Renders as `<version>, revision <revision>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct BuildStamp<'a> {
    version: &'a str,
    revision: &'a str,
}

impl BuildStamp<'static> {
    /// Stamp compiled into this binary.
    pub(crate) fn current() -> Self {
        Self::new(GIT_VERSION, GIT_REVISION)
    }
}

impl<'a> BuildStamp<'a> {
    pub(crate) fn new(version: &'a str, revision: &'a str) -> Self {
        Self { version, revision }
    }

    pub(crate) fn get(&self, field: StampField) -> &'a str {
        match field {
            StampField::GitVersion => self.version,
            StampField::GitRevision => self.revision,
        }
    }

    /// Every field that is empty. All fields are inspected.
    pub(crate) fn empty_fields(&self) -> Vec<StampField> {
        self.fields_where(str::is_empty)
    }

    /// Every field that still holds the [`PLACEHOLDER`].
    pub(crate) fn placeholder_fields(&self) -> Vec<StampField> {
        self.fields_where(|value| value == PLACEHOLDER)
    }

    fn fields_where(&self, pred: impl Fn(&str) -> bool) -> Vec<StampField> {
        StampField::ALL
            .into_iter()
            .filter(|field| pred(self.get(*field)))
            .collect()
    }

    /// Fail if any field is empty.
    pub(crate) fn validate(&self) -> Result<(), StampError> {
        let fields = self.empty_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(StampError::Empty { fields })
        }
    }

    /// Like [`validate`](Self::validate), but placeholders are rejected as well.
    ///
    /// Empty fields are reported first.
    pub(crate) fn validate_strict(&self) -> Result<(), StampError> {
        self.validate()?;

        let fields = self.placeholder_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(StampError::Placeholder { fields })
        }
    }
}

impl fmt::Display for BuildStamp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, revision {}", self.version, self.revision)
    }
}
