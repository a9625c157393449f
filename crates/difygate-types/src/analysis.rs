//! Five-forces analysis types: the question tree the client walks, the
//! answers it records, and the report built from them.
//!
//! Tree JSON shape:
//!
//! ```json
//! {"five_forces": [{"category": "Industry rivalry", "force": "competition",
//!   "nodes": [{"id": "q1", "question": "...",
//!              "choices": [{"label": "...", "next": "q2"}]}]}]}
//! ```
//!
//! A choice without `next` (or with an empty one) ends its category.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Node every category starts from unless it names another.
pub const DEFAULT_START_NODE: &str = "q1";

/// The competitive force a category examines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Force {
    Competition,
    BuyerPower,
    SupplierPower,
    NewEntrants,
    Substitutes,
}

impl fmt::Display for Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Force::Competition => "competition",
            Force::BuyerPower => "buyer power",
            Force::SupplierPower => "supplier power",
            Force::NewEntrants => "new entrants",
            Force::Substitutes => "substitutes",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl Choice {
    /// Id of the follow-up node, if this choice does not end the category.
    pub fn next_node(&self) -> Option<&str> {
        self.next.as_deref().filter(|id| !id.trim().is_empty())
    }
}

/// One question. A node without choices ends its category when reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionNode {
    pub id: String,
    pub question: String,

    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceCategory {
    /// Heading shown to the user.
    pub category: String,
    pub force: Force,

    #[serde(default = "default_start")]
    pub start: String,

    pub nodes: Vec<QuestionNode>,
}

fn default_start() -> String {
    DEFAULT_START_NODE.to_string()
}

impl ForceCategory {
    pub fn node(&self, id: &str) -> Option<&QuestionNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// The whole question tree, one category per force.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceTree {
    pub five_forces: Vec<ForceCategory>,
}

impl ForceTree {
    /// Parse and check a tree document.
    ///
    /// Rejects trees with no categories, a category with no nodes, or
    /// duplicate node ids within a category. Dangling `next` ids are allowed
    /// and end the category when followed.
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let tree: ForceTree =
            serde_json::from_str(json).map_err(|e| AnalysisError::InvalidTree(e.to_string()))?;
        tree.check()?;
        Ok(tree)
    }

    fn check(&self) -> Result<(), AnalysisError> {
        if self.five_forces.is_empty() {
            return Err(AnalysisError::InvalidTree("no categories".to_string()));
        }
        for category in &self.five_forces {
            if category.nodes.is_empty() {
                return Err(AnalysisError::InvalidTree(format!(
                    "category '{}' has no questions",
                    category.category
                )));
            }
            let mut seen = HashSet::new();
            for node in &category.nodes {
                if !seen.insert(node.id.as_str()) {
                    return Err(AnalysisError::InvalidTree(format!(
                        "duplicate node id '{}' in '{}'",
                        node.id, category.category
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A question and the label the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedAnswer {
    pub question: String,
    pub answer: String,
}

/// Verdict for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub category: String,
    pub force: Force,
    pub summary: String,
    pub details: String,
    pub answers: Vec<RecordedAnswer>,
}

/// Result of a completed walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub categories: Vec<CategoryAnalysis>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub overall_summary: String,
}
