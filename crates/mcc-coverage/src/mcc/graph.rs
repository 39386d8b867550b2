//! Branch Graph (Truth Table)
//!
//! Cross-references descriptors by label: a decision's true/false successor is
//! the other decision whose enclosing label equals the edge's target label.
//! When no decision owns that label the edge leaves the decision subgraph and
//! the successor is [`Successor::NotAvailable`].

use super::{BranchDescriptor, BranchName, LabelName, Outcome};
use std::collections::HashMap;

/// Target of a decision edge
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Successor {
    /// The edge leads straight to another decision
    Branch(BranchName),
    /// The edge leaves the decision subgraph
    NotAvailable,
}

impl Successor {
    /// The successor branch, if any
    #[inline]
    #[must_use]
    pub fn branch(&self) -> Option<&BranchName> {
        match self {
            Self::Branch(name) => Some(name),
            Self::NotAvailable => None,
        }
    }
}

/// One truth-table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
    /// Branch name
    pub branch_name: BranchName,
    /// Successor when the condition holds
    pub true_successor: Successor,
    /// Successor when the condition fails
    pub false_successor: Successor,
}

impl BranchNode {
    /// Successor for the given outcome
    #[inline]
    #[must_use]
    pub fn successor(&self, outcome: Outcome) -> &Successor {
        match outcome {
            Outcome::True => &self.true_successor,
            Outcome::False => &self.false_successor,
        }
    }
}

/// Decision graph of one method, nodes in program order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchGraph {
    nodes: Vec<BranchNode>,
    index: HashMap<BranchName, usize>,
}

impl BranchGraph {
    /// Build the graph from descriptors
    ///
    /// The label index is built once; each descriptor then resolves its two
    /// edges against it. A decision never succeeds itself.
    #[must_use]
    pub fn build(descriptors: &[BranchDescriptor]) -> Self {
        let mut owners: HashMap<&LabelName, Vec<usize>> = HashMap::new();
        for (idx, descriptor) in descriptors.iter().enumerate() {
            if let Some(label) = &descriptor.label_where {
                owners.entry(label).or_default().push(idx);
            }
        }

        let resolve = |own: usize, target: Option<&LabelName>| -> Successor {
            target
                .and_then(|label| owners.get(label))
                .and_then(|candidates| {
                    candidates
                        .iter()
                        .map(|&idx| &descriptors[idx].branch_name)
                        .find(|name| **name != descriptors[own].branch_name)
                })
                .map_or(Successor::NotAvailable, |name| Successor::Branch(name.clone()))
        };

        let nodes: Vec<BranchNode> = descriptors
            .iter()
            .enumerate()
            .map(|(idx, descriptor)| BranchNode {
                branch_name: descriptor.branch_name.clone(),
                true_successor: resolve(idx, descriptor.label_true.as_ref()),
                false_successor: resolve(idx, descriptor.label_false.as_ref()),
            })
            .collect();

        Self::from_nodes(nodes)
    }

    /// Build directly from truth-table rows (later duplicates are dropped)
    #[must_use]
    pub fn from_nodes(nodes: impl IntoIterator<Item = BranchNode>) -> Self {
        let mut graph = Self::default();
        for node in nodes {
            if graph.index.contains_key(&node.branch_name) {
                continue;
            }
            let _ = graph
                .index
                .insert(node.branch_name.clone(), graph.nodes.len());
            graph.nodes.push(node);
        }
        graph
    }

    /// Rows in program order
    #[must_use]
    pub fn nodes(&self) -> &[BranchNode] {
        &self.nodes
    }

    /// Look up a row by branch name
    #[must_use]
    pub fn node(&self, name: &BranchName) -> Option<&BranchNode> {
        self.index.get(name).map(|&idx| &self.nodes[idx])
    }

    /// Successor branch of `name` for `outcome`, `None` when the edge exits
    #[must_use]
    pub fn successor(&self, name: &BranchName, outcome: Outcome) -> Option<&BranchName> {
        self.node(name).and_then(|node| node.successor(outcome).branch())
    }

    /// Whether the graph holds a decision of this name
    #[must_use]
    pub fn contains(&self, name: &BranchName) -> bool {
        self.index.contains_key(name)
    }

    /// Branch names in program order
    pub fn branch_names(&self) -> impl Iterator<Item = &BranchName> {
        self.nodes.iter().map(|node| &node.branch_name)
    }

    /// Number of decisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no decisions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
