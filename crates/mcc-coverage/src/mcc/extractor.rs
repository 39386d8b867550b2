//! Branch Descriptor Extraction
//!
//! Turns a method's ordered token stream into one [`BranchDescriptor`] per
//! distinct decision. Labels are resolved positionally:
//!
//! - *where*: nearest label at or before the decision
//! - *true*: the decision's jump target
//! - *false*: the next token if it is a label (straight fall-through),
//!   otherwise the enclosing label

use super::{BranchName, InstructionToken, LabelName, TokenParser};
use std::collections::HashSet;

/// Per-decision label triple, derived once from the first occurrence of a branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDescriptor {
    /// Branch name
    pub branch_name: BranchName,
    /// Enclosing control-flow label
    pub label_where: Option<LabelName>,
    /// Label the true edge jumps to
    pub label_true: Option<LabelName>,
    /// Label the false edge continues at
    pub label_false: Option<LabelName>,
}

/// Nearest label token at or before `index`, scanning backward
#[must_use]
pub fn label_for_where(tokens: &[InstructionToken], index: usize) -> Option<LabelName> {
    let end = index.checked_add(1)?.min(tokens.len());
    tokens[..end]
        .iter()
        .rev()
        .find_map(InstructionToken::as_label)
        .cloned()
}

/// Fall-through label of the decision at `index`
///
/// An explicit `false_label` on the decision wins. Otherwise the following
/// token's label when it is a label, else the enclosing block's label.
#[must_use]
pub fn label_for_false(tokens: &[InstructionToken], index: usize) -> Option<LabelName> {
    if let Some(explicit) = tokens
        .get(index)
        .and_then(InstructionToken::as_decision)
        .and_then(|d| d.false_label.clone())
    {
        return Some(explicit);
    }
    match tokens.get(index + 1).and_then(InstructionToken::as_label) {
        Some(next) => Some(next.clone()),
        None => label_for_where(tokens, index),
    }
}

/// Extract descriptors from typed tokens; first occurrence of a name wins
#[must_use]
pub fn extract(tokens: &[InstructionToken]) -> Vec<BranchDescriptor> {
    let mut seen: HashSet<&BranchName> = HashSet::new();
    let mut descriptors = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        let Some(decision) = token.as_decision() else {
            continue;
        };
        if !seen.insert(&decision.name) {
            continue;
        }
        descriptors.push(BranchDescriptor {
            branch_name: decision.name.clone(),
            label_where: label_for_where(tokens, index),
            label_true: decision.true_label.clone(),
            label_false: label_for_false(tokens, index),
        });
    }

    descriptors
}

/// Extract descriptors from the textual rendering, skipping malformed tokens
#[must_use]
pub fn extract_from_text<S: AsRef<str>>(parser: &TokenParser, lines: &[S]) -> Vec<BranchDescriptor> {
    extract(&parser.parse_stream(lines))
}
