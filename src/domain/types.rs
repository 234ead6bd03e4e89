//! Strongly-typed value objects used by the list query model.
//!
//! These wrappers enforce basic invariants (1-based pages, bounded page
//! sizes, trimmed search text) so that once a value reaches a [`ListQuery`]
//! it can be treated as trusted.
//!
//! [`ListQuery`]: crate::domain::query::ListQuery
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest page size any list screen may request.
pub const MAX_PAGE_SIZE: usize = 200;

/// Page size used when neither the location nor configuration provide one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Query keys owned by the model itself; filter dimensions may not reuse them.
pub const RESERVED_KEYS: [&str; 3] = ["page", "take", "search"];

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided page number is zero.
    #[error("page must be greater than zero")]
    NonPositivePage,
    /// Provided page size is outside `1..=max`.
    #[error("page size must be between 1 and {max}, got {value}")]
    PageSizeOutOfRange { value: usize, max: usize },
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Filter dimension key collides with a model field.
    #[error("reserved query key: {0}")]
    ReservedKey(String),
    /// Provided value failed codec validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// 1-based page number.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Creates a page number ensuring it is at least one.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositivePage)
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageNumber {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageNumber> for usize {
    fn from(value: PageNumber) -> Self {
        value.0
    }
}

/// Number of rows requested per page, bounded by [`MAX_PAGE_SIZE`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Creates a page size within `1..=MAX_PAGE_SIZE`.
    pub fn new(value: usize) -> Result<Self, TypeConstraintError> {
        Self::bounded(value, MAX_PAGE_SIZE)
    }

    /// Creates a page size within `1..=max`, where `max` is itself capped at
    /// [`MAX_PAGE_SIZE`].
    pub fn bounded(value: usize, max: usize) -> Result<Self, TypeConstraintError> {
        let max = max.min(MAX_PAGE_SIZE);
        if (1..=max).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::PageSizeOutOfRange { value, max })
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Display for PageSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TypeConstraintError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.0
    }
}

/// Committed free-text search, trimmed and never blank.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct SearchText(String);

impl SearchText {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Returns `None` for blank input instead of an error.
    pub fn parse(value: &str) -> Option<Self> {
        Self::new(value).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Deref for SearchText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for SearchText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for SearchText {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SearchText {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchText> for String {
    fn from(value: SearchText) -> Self {
        value.0
    }
}

/// Checks that a filter dimension key is usable as a query key.
pub fn validate_dimension_key(key: &str) -> Result<(), TypeConstraintError> {
    if key.trim().is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if RESERVED_KEYS.contains(&key) {
        return Err(TypeConstraintError::ReservedKey(key.to_string()));
    }
    Ok(())
}
