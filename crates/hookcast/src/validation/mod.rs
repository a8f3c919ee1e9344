//! Document Validation
//!
//! Decodes untyped JSON (e.g. a decoded request body) into the typed
//! document and insert models. The models derive `Deserialize` with their
//! defaults attached; [`parse`] runs them through `serde_path_to_error` and
//! turns the first failure into a [`ValidationError`] carrying the dotted
//! path of the offending field.
//!
//! Unknown fields are ignored.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A model decoded from an untyped JSON document.
///
/// `check` runs after decoding, for rules spanning several fields.
pub trait Document: DeserializeOwned {
    fn check(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Validate `value` as a `T`, starting at the document root.
pub fn parse<T: Document>(value: &Value) -> Result<T, ValidationError> {
    serde_path_to_error::deserialize::<_, T>(value)
        .map_err(ValidationError::from_serde)
        .and_then(|doc| doc.check().map(|()| doc))
        .inspect_err(|e| {
            tracing::debug!(path = %e.path, reason = e.reason.code(), "Document rejected");
        })
}

/// `deserialize_with` for optional document fields.
///
/// Paired with `#[serde(default)]`: an absent field is `None`, an explicit
/// `null` is a wrong type. Nullable storage columns use plain `Option`.
pub(crate) fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Location of a field inside a document, rendered as
/// `container.sections[2].fields[0].name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn key(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&serde_path_to_error::Path> for FieldPath {
    fn from(path: &serde_path_to_error::Path) -> Self {
        path.iter()
            .fold(Self::root(), |acc, segment| match segment {
                serde_path_to_error::Segment::Seq { index } => acc.index(*index),
                other => acc.key(&other.to_string()),
            })
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, "$")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationReason {
    /// Required field absent
    Missing,
    /// Present but not of the expected type
    WrongType { expected: String },
    /// String outside the allowed literal set
    InvalidEnumValue { allowed: Vec<String>, found: String },
    /// Number outside the accepted range
    OutOfRange { min: i64, found: i64 },
    /// Valid on its own but contradicts another field
    Inconsistent { detail: &'static str },
}

impl ValidationReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::WrongType { .. } => "wrong_type",
            Self::InvalidEnumValue { .. } => "invalid_enum_value",
            Self::OutOfRange { .. } => "out_of_range",
            Self::Inconsistent { .. } => "inconsistent",
        }
    }
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::WrongType { expected } => write!(f, "wrong_type (expected {})", expected),
            Self::InvalidEnumValue { allowed, found } => write!(
                f,
                "invalid_enum_value (got {:?}, expected one of {})",
                found,
                allowed.join(", ")
            ),
            Self::OutOfRange { min, found } => {
                write!(f, "out_of_range (got {}, minimum {})", found, min)
            }
            Self::Inconsistent { detail } => write!(f, "inconsistent ({})", detail),
        }
    }
}

/// A rejected document: where and why
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{path}: {reason}")]
pub struct ValidationError {
    pub path: FieldPath,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(path: FieldPath, reason: ValidationReason) -> Self {
        Self { path, reason }
    }

    pub fn missing(path: FieldPath) -> Self {
        Self::new(path, ValidationReason::Missing)
    }

    pub fn wrong_type(path: FieldPath, expected: impl Into<String>) -> Self {
        Self::new(
            path,
            ValidationReason::WrongType {
                expected: expected.into(),
            },
        )
    }

    pub fn out_of_range(path: FieldPath, min: i64, found: i64) -> Self {
        Self::new(path, ValidationReason::OutOfRange { min, found })
    }

    pub fn inconsistent(path: FieldPath, detail: &'static str) -> Self {
        Self::new(path, ValidationReason::Inconsistent { detail })
    }

    /// Classify a serde failure by the message serde's `de::Error`
    /// constructors produce. Quoted names are the backtick-delimited
    /// tokens: the field of `missing_field`, and the variant followed by the
    /// expected variants of `unknown_variant`.
    fn from_serde(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = FieldPath::from(err.path());
        let message = err.into_inner().to_string();
        let mut quoted = message.split('`').skip(1).step_by(2);

        if message.starts_with("missing field") {
            // Reported at the enclosing object; point at the field itself.
            let field = quoted.next().unwrap_or_default();
            return Self::missing(path.key(field));
        }

        if message.starts_with("unknown variant") {
            let found = quoted.next().unwrap_or_default().to_string();
            return Self::new(
                path,
                ValidationReason::InvalidEnumValue {
                    allowed: quoted.map(str::to_string).collect(),
                    found,
                },
            );
        }

        let expected = message
            .split_once(", expected ")
            .map_or(message.as_str(), |(_, expected)| expected);
        Self::wrong_type(path, expected)
    }
}
