//! Dotted paths for export locations and module addresses
//!
//! Provides [`DottedPath`], the non-empty segment sequence used both for
//! declared export paths (`keras.layers.Dense`) and defining-module paths
//! (`tf_keras.src.layers.core.dense`).

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Non-empty dotted path of identifier segments
///
/// The last segment is the *export name*; everything before it is the
/// *containing namespace*.
///
/// # Examples
/// - `["keras", "layers", "Dense"]` → `keras.layers.Dense`
/// - `["tf_keras", "src", "losses"]` → `tf_keras.src.losses`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DottedPath(Vec<String>);

impl DottedPath {
    /// Create path from segments, validating every segment
    ///
    /// # Errors
    /// Returns error if there are no segments or any segment is not an identifier
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        for seg in &segments {
            validate_segment(seg)?;
        }
        Ok(Self(segments))
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (always at least one)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First segment
    #[inline]
    #[must_use]
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    /// Last segment (the export name for export paths)
    #[inline]
    #[must_use]
    pub fn last(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Containing namespace: every segment but the last
    ///
    /// `None` for single-segment paths, which have no containing namespace.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// First `len` segments as a path
    ///
    /// `None` if `len` is zero or longer than the path.
    #[must_use]
    pub fn prefix(&self, len: usize) -> Option<Self> {
        if len == 0 || len > self.0.len() {
            None
        } else {
            Some(Self(self.0[..len].to_vec()))
        }
    }

    /// Append a segment, returning new path
    ///
    /// # Errors
    /// Returns error if the segment is not an identifier
    pub fn child(&self, segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();
        validate_segment(&segment)?;
        let mut new = self.clone();
        new.0.push(segment);
        Ok(new)
    }

    /// Insert `offset` immediately after the first segment
    ///
    /// `tf_keras.layers` spliced with `api._v2.keras` becomes
    /// `tf_keras.api._v2.keras.layers`.
    #[must_use]
    pub fn splice_after_first(&self, offset: &[String]) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + offset.len());
        segments.push(self.0[0].clone());
        segments.extend(offset.iter().cloned());
        segments.extend(self.0[1..].iter().cloned());
        Self(segments)
    }

    /// Replace the first segment with `prefix + first`
    #[must_use]
    pub fn with_prefixed_first(&self, prefix: &str) -> Self {
        let mut new = self.clone();
        new.0[0] = format!("{prefix}{}", new.0[0]);
        new
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Join segments with custom separator
    #[inline]
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

/// Check that a segment is a valid identifier
///
/// # Errors
/// `EmptySegment` for `""`, `InvalidSegment` for anything that is not
/// ASCII alphanumerics/underscore or that starts with a digit.
pub fn validate_segment(seg: &str) -> Result<(), PathError> {
    let mut chars = seg.chars();
    match chars.next() {
        None => Err(PathError::EmptySegment),
        Some(c) if c.is_ascii_digit() => Err(PathError::InvalidSegment(seg.to_string())),
        Some(_) if seg.contains(|c: char| !c.is_ascii_alphanumeric() && c != '_') => {
            Err(PathError::InvalidSegment(seg.to_string()))
        }
        Some(_) => Ok(()),
    }
}

impl Display for DottedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for DottedPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        Self::new(s.split('.'))
    }
}

impl TryFrom<String> for DottedPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DottedPath> for String {
    fn from(path: DottedPath) -> Self {
        path.to_string()
    }
}

/// Errors related to dotted paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No segments at all
    #[error("dotted path cannot be empty")]
    Empty,

    /// Empty segment in path (`a..b`, `.a`, `a.`)
    #[error("path contains empty segment")]
    EmptySegment,

    /// Invalid segment characters
    #[error("invalid segment: {0} (must be an identifier)")]
    InvalidSegment(String),
}
