//! Five-forces business analysis: walk a question tree per force, then
//! score the answers into a per-force verdict and an overall summary.
//!
//! Runs entirely in the client. The default tree is compiled in; a custom
//! one can be loaded with [`ForceTree::from_json`].

pub mod scoring;
pub mod walker;

use difygate_types::analysis::ForceTree;
use difygate_types::error::AnalysisError;

pub use walker::{FiveForcesAnalysis, PendingQuestion};

const BUILTIN_TREE: &str = include_str!("five_forces.json");

/// The compiled-in question tree.
pub fn builtin_tree() -> Result<ForceTree, AnalysisError> {
    ForceTree::from_json(BUILTIN_TREE)
}

#[cfg(test)]
mod tests {
    use difygate_types::analysis::Force;

    use super::*;

    #[test]
    fn test_builtin_tree_covers_every_force_once() {
        let tree = builtin_tree().unwrap();
        let forces: Vec<Force> = tree.five_forces.iter().map(|c| c.force).collect();
        assert_eq!(
            forces,
            vec![
                Force::Competition,
                Force::BuyerPower,
                Force::SupplierPower,
                Force::NewEntrants,
                Force::Substitutes,
            ]
        );
    }

    #[test]
    fn test_builtin_tree_links_resolve() {
        let tree = builtin_tree().unwrap();
        for category in &tree.five_forces {
            assert!(category.node(&category.start).is_some(), "{}", category.category);
            for node in &category.nodes {
                for choice in &node.choices {
                    if let Some(next) = choice.next_node() {
                        assert!(category.node(next).is_some(), "dangling {next}");
                    }
                }
            }
        }
    }
}
