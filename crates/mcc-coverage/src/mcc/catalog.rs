//! Decision Catalog
//!
//! Handles to registered decision points, as supplied by the branch
//! registration collaborator. Obligations carry these handles so goals can
//! report source lines and check that every step belongs to their method.

use super::{BranchName, MethodId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered decision point
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecisionHandle {
    /// Registry-wide decision id
    pub id: u32,
    /// Declaring class
    pub class_name: String,
    /// Declaring method
    pub method_name: String,
    /// Source line, when debug information was available
    pub line_number: Option<u32>,
}

impl DecisionHandle {
    /// Create a new handle without line information
    #[must_use]
    pub fn new(id: u32, class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            id,
            class_name: class_name.into(),
            method_name: method_name.into(),
            line_number: None,
        }
    }

    /// Attach a source line
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line_number = Some(line);
        self
    }

    /// Whether this decision is declared by `class_name.method_name`
    #[must_use]
    pub fn belongs_to(&self, class_name: &str, method_name: &str) -> bool {
        self.class_name == class_name && self.method_name == method_name
    }
}

impl fmt::Display for DecisionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{} ({}.{}", self.id, self.class_name, self.method_name)?;
        if let Some(line) = self.line_number {
            write!(f, ":{line}")?;
        }
        f.write_str(")")
    }
}

/// Name → handle lookup, scoped per method
#[derive(Debug, Clone, Default)]
pub struct DecisionCatalog {
    entries: HashMap<MethodId, HashMap<BranchName, Arc<DecisionHandle>>>,
}

impl DecisionCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the handle for a branch of `method`
    pub fn register(&mut self, method: &MethodId, branch: BranchName, handle: DecisionHandle) {
        let _ = self
            .entries
            .entry(method.clone())
            .or_default()
            .insert(branch, Arc::new(handle));
    }

    /// Handle for a branch of `method`
    #[must_use]
    pub fn get(&self, method: &MethodId, branch: &BranchName) -> Option<&Arc<DecisionHandle>> {
        self.entries.get(method).and_then(|by_name| by_name.get(branch))
    }

    /// Number of registered decisions across all methods
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    /// Whether nothing has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(HashMap::is_empty)
    }
}
