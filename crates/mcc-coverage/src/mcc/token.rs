//! Instruction Tokens
//!
//! The instrumentation collaborator hands over one token per instruction or
//! label, in program order. Decisions carry their own edge labels so the
//! extractor never scans strings; [`TokenParser`] still accepts the older
//! textual rendering:
//!
//! ```text
//! LABEL L1524
//! I17 Branch 3 IF_ICMPGE L1524 - jump to L1890
//! LABEL L1890
//! ```

use super::{BranchName, LabelName};
use crate::result::{MccError, MccResult};
use regex::Regex;
use std::fmt;

const BRANCH_MARKER: &str = "Branch";
const LABEL_MARKER: &str = "LABEL";

/// Recognized comparison opcodes of a decision instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComparisonOpcode {
    /// Any `IF_`-prefixed compare-and-jump (`IF_ICMPGE`, `IF_ACMPNE`, ...)
    IfCompare(String),
    /// `IFGT`
    Ifgt,
    /// `IFGE`
    Ifge,
    /// `IFLE`
    Ifle,
    /// `IFLT`
    Iflt,
    /// `ICMPGT`
    Icmpgt,
    /// `ICMPLT`
    Icmplt,
}

impl ComparisonOpcode {
    /// Parse a mnemonic, returning `None` for anything outside the fixed set
    #[must_use]
    pub fn parse(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "IFGT" => Some(Self::Ifgt),
            "IFGE" => Some(Self::Ifge),
            "IFLE" => Some(Self::Ifle),
            "IFLT" => Some(Self::Iflt),
            "ICMPGT" => Some(Self::Icmpgt),
            "ICMPLT" => Some(Self::Icmplt),
            m if m.len() > 3 && m.starts_with("IF_") => Some(Self::IfCompare(m.to_string())),
            _ => None,
        }
    }

    /// Get the mnemonic
    #[must_use]
    pub fn mnemonic(&self) -> &str {
        match self {
            Self::IfCompare(m) => m,
            Self::Ifgt => "IFGT",
            Self::Ifge => "IFGE",
            Self::Ifle => "IFLE",
            Self::Iflt => "IFLT",
            Self::Icmpgt => "ICMPGT",
            Self::Icmplt => "ICMPLT",
        }
    }
}

impl fmt::Display for ComparisonOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A binary decision instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionToken {
    /// Branch name, unique per method
    pub name: BranchName,
    /// Comparison opcode, when known
    pub opcode: Option<ComparisonOpcode>,
    /// Jump target taken when the condition holds
    pub true_label: Option<LabelName>,
    /// Explicit fall-through label; derived from neighbouring tokens when `None`
    pub false_label: Option<LabelName>,
}

impl DecisionToken {
    /// Create a decision with no edges
    #[must_use]
    pub fn new(name: impl Into<BranchName>) -> Self {
        Self {
            name: name.into(),
            opcode: None,
            true_label: None,
            false_label: None,
        }
    }

    /// Set the jump target of the true edge
    #[must_use]
    pub fn jump_to(mut self, label: impl Into<LabelName>) -> Self {
        self.true_label = Some(label.into());
        self
    }

    /// Set an explicit false-edge label
    #[must_use]
    pub fn fall_through_to(mut self, label: impl Into<LabelName>) -> Self {
        self.false_label = Some(label.into());
        self
    }

    /// Set the comparison opcode
    #[must_use]
    pub fn with_opcode(mut self, opcode: ComparisonOpcode) -> Self {
        self.opcode = Some(opcode);
        self
    }
}

/// One instruction-stream token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionToken {
    /// A decision point
    Decision(DecisionToken),
    /// A control-flow label
    Label(LabelName),
}

impl InstructionToken {
    /// Create a label token
    #[must_use]
    pub fn label(name: impl Into<LabelName>) -> Self {
        Self::Label(name.into())
    }

    /// Create a decision token whose true edge jumps to `true_label`
    #[must_use]
    pub fn decision(name: impl Into<BranchName>, true_label: impl Into<LabelName>) -> Self {
        Self::Decision(DecisionToken::new(name).jump_to(true_label))
    }

    /// Whether this token is a decision
    #[inline]
    #[must_use]
    pub fn is_decision(&self) -> bool {
        matches!(self, Self::Decision(_))
    }

    /// The label, if this is a label token
    #[inline]
    #[must_use]
    pub fn as_label(&self) -> Option<&LabelName> {
        match self {
            Self::Label(label) => Some(label),
            Self::Decision(_) => None,
        }
    }

    /// The decision, if this is a decision token
    #[inline]
    #[must_use]
    pub fn as_decision(&self) -> Option<&DecisionToken> {
        match self {
            Self::Decision(decision) => Some(decision),
            Self::Label(_) => None,
        }
    }
}

impl From<DecisionToken> for InstructionToken {
    fn from(decision: DecisionToken) -> Self {
        Self::Decision(decision)
    }
}

/// Parser for the textual token rendering
///
/// Patterns are compiled once; share one parser per session.
#[derive(Debug, Clone)]
pub struct TokenParser {
    opcode: Regex,
    jump_target: Regex,
    label: Regex,
}

impl TokenParser {
    /// Compile the token patterns
    pub fn new() -> MccResult<Self> {
        Ok(Self {
            opcode: Regex::new(r"IF_[A-Z]+|IFGT|IFGE|IFLE|IFLT|ICMPGT|ICMPLT")?,
            jump_target: Regex::new(r"jump to\s*(\S+)")?,
            label: Regex::new(r"LABEL\s*(\S+)")?,
        })
    }

    /// Whether the text renders a decision instruction
    #[inline]
    #[must_use]
    pub fn is_decision(text: &str) -> bool {
        text.contains(BRANCH_MARKER)
    }

    /// Branch name and opcode: the text between the branch marker and the
    /// first recognized comparison opcode
    #[must_use]
    pub fn branch_name(&self, text: &str) -> Option<(BranchName, ComparisonOpcode)> {
        let start = text.find(BRANCH_MARKER)?;
        let rest = &text[start..];
        let found = self.opcode.find(rest)?;
        let opcode = ComparisonOpcode::parse(found.as_str())?;
        let name = rest[..found.start()].trim();
        Some((BranchName::new(name), opcode))
    }

    /// Jump target: the text after the `jump to` marker
    #[must_use]
    pub fn label_for_true(&self, text: &str) -> Option<LabelName> {
        self.jump_target
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| LabelName::new(m.as_str()))
    }

    /// Parse one token
    ///
    /// A decision without a jump target is still a decision; it just has no
    /// true edge.
    pub fn parse(&self, text: &str) -> MccResult<InstructionToken> {
        if Self::is_decision(text) {
            let (name, opcode) = self
                .branch_name(text)
                .ok_or_else(|| MccError::malformed_token(text, "no recognized comparison opcode"))?;
            let true_label = self.label_for_true(text);
            if true_label.is_none() {
                tracing::warn!(token = text, branch = %name, "decision token has no jump target");
            }
            return Ok(InstructionToken::Decision(DecisionToken {
                name,
                opcode: Some(opcode),
                true_label,
                false_label: None,
            }));
        }

        let label = if text.contains(LABEL_MARKER) {
            self.label
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map_or("", |m| m.as_str())
        } else {
            text.trim()
        };
        if label.is_empty() {
            return Err(MccError::malformed_token(text, "empty label"));
        }
        Ok(InstructionToken::label(label))
    }

    /// Parse a token stream, logging and skipping malformed tokens
    pub fn parse_stream<I, S>(&self, lines: I) -> Vec<InstructionToken>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| match self.parse(line.as_ref()) {
                Ok(token) => Some(token),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping malformed instruction token");
                    None
                }
            })
            .collect()
    }
}
