//! Value-Typed Identifiers (Poka-Yoke)
//!
//! Branch names, label names and method identities are compared by value,
//! never by reference. They are intentionally NOT interchangeable so a label
//! can't be looked up where a branch name is expected.

use std::fmt;
use std::sync::Arc;

/// Name of a decision point, unique within its method (e.g. `"Branch 3"`)
///
/// Backed by `Arc<str>` so cloning into every path of a synthesis run is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(Arc<str>);

impl BranchName {
    /// Create a new branch name
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BranchName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for BranchName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Control-flow label (e.g. `"L1524"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelName(Arc<str>);

impl LabelName {
    /// Create a new label name
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Get the name as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LabelName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LabelName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for LabelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A method under analysis, identified by its class and method name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId {
    class_name: String,
    method_name: String,
}

impl MethodId {
    /// Create a new method identity
    #[must_use]
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    /// Get the class name
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Get the method name
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.method_name
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.method_name)
    }
}
