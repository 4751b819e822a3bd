//! Deduplication keys for saturation.
//!
//! Saturation keeps applying rules until a pass adds nothing new. Without a
//! stable notion of "the same node" the engine would loop forever on rules
//! that re-derive identical results, so the parser records a `NodeKey` for
//! every node it has accepted.
//!
//! The key combines span, dimension, producing rule and a dimension-specific
//! value key. Including the rule name keeps distinct derivations of the same
//! value apart.

use crate::{Dimension, Node, TokenKind};

/// Hashable identity of a node in the stash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct NodeKey {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) dim: Dimension,
    pub(crate) rule_name: &'static str,
    pub(crate) kind_key: NodeKindKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum NodeKindKey {
    /// Bits of an `f64` payload.
    Number(u64),
    Ordinal(i64),
    Quantity(u64, &'static str),
    /// Debug rendering of a time expression.
    TimeExpr(String),
    Text(String),
}

impl NodeKey {
    pub(crate) fn from_node(node: &Node) -> Self {
        let kind_key = match &node.token.kind {
            TokenKind::Numeral(d) => NodeKindKey::Number(d.value.to_bits()),
            TokenKind::Percentage(d) => NodeKindKey::Number(d.value.to_bits()),
            TokenKind::Ordinal(d) => NodeKindKey::Ordinal(d.value),
            TokenKind::Quantity(d) => NodeKindKey::Quantity(d.value.to_bits(), d.unit),
            TokenKind::TimeExpr(expr) => NodeKindKey::TimeExpr(format!("{:?}", expr)),
            TokenKind::PhoneNumber(d) => NodeKindKey::Text(d.digits.clone()),
            TokenKind::Email(d) => NodeKindKey::Text(d.address.clone()),
            TokenKind::RegexMatch(groups) => NodeKindKey::Text(groups.first().cloned().unwrap_or_default()),
        };

        NodeKey {
            start: node.range.start,
            end: node.range.end,
            dim: node.token.dim,
            rule_name: node.rule_name,
            kind_key,
        }
    }
}
