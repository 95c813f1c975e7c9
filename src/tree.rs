//! Input tree model
//!
//! A [`Tree`] is a labeled node with ordered children and an optional
//! AND/OR relation combining them. Trees are read from JSON, either bare or
//! wrapped in a `{"root_node": ...}` request envelope.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::InputError;

/// Logical relation between a node and its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    #[serde(alias = "AND", alias = "And")]
    And,
    #[serde(alias = "OR", alias = "Or")]
    Or,
}

impl RelationType {
    /// Upper-case marker label
    pub fn label(self) -> &'static str {
        match self {
            RelationType::And => "AND",
            RelationType::Or => "OR",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node of the input tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    /// Display label
    pub name: String,

    /// Ordered children; empty for a leaf
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Tree>,

    /// How the children combine, if at all
    #[serde(
        default,
        alias = "relationType",
        skip_serializing_if = "Option::is_none"
    )]
    pub relation_type: Option<RelationType>,
}

/// `children: null` means the same thing as a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Tree>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Tree>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a diagram request: the tree under `root_node`
#[derive(Debug, Clone, Deserialize)]
struct DiagramRequest {
    #[serde(alias = "rootNode")]
    root_node: Tree,
}

impl Tree {
    /// Create a leaf
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: vec![],
            relation_type: None,
        }
    }

    /// Create an internal node without a relation
    pub fn node(name: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            name: name.into(),
            children,
            relation_type: None,
        }
    }

    /// Set the relation combining this node's children
    pub fn with_relation(mut self, relation: RelationType) -> Self {
        self.relation_type = Some(relation);
        self
    }

    /// A node without children is a leaf, whatever its relation type says
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Relation type, only when there are children for it to combine
    pub fn effective_relation(&self) -> Option<RelationType> {
        if self.is_leaf() {
            None
        } else {
            self.relation_type
        }
    }

    /// Number of leaves in this subtree
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Tree::leaf_count).sum()
        }
    }

    /// Parse a tree from JSON, accepting either a bare tree or a
    /// `{"root_node": ...}` envelope
    pub fn from_json(source: &str) -> Result<Self, InputError> {
        let value: serde_json::Value = serde_json::from_str(source)?;
        let is_envelope = value
            .as_object()
            .is_some_and(|obj| obj.contains_key("root_node") || obj.contains_key("rootNode"));

        if is_envelope {
            let request: DiagramRequest = serde_json::from_value(value)?;
            Ok(request.root_node)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }
}
