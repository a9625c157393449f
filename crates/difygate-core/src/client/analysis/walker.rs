//! Question-tree walker.
//!
//! Categories are visited in tree order. Each starts at its `start` node and
//! follows the `next` of every picked choice. Picking a choice with no
//! `next`, or reaching a node that is missing or has no choices, moves on to
//! the next category.

use difygate_types::analysis::{
    AnalysisReport, ForceCategory, ForceTree, QuestionNode, RecordedAnswer,
};
use difygate_types::error::AnalysisError;

use super::scoring::build_report;

/// The question waiting for an answer.
#[derive(Debug, Clone, Copy)]
pub struct PendingQuestion<'a> {
    pub category: &'a ForceCategory,
    pub node: &'a QuestionNode,
    /// 1-based index of the category.
    pub position: usize,
    pub total: usize,
}

/// One run through the questionnaire.
#[derive(Debug, Clone)]
pub struct FiveForcesAnalysis {
    tree: ForceTree,
    category: usize,
    node: String,
    answers: Vec<Vec<RecordedAnswer>>,
}

impl FiveForcesAnalysis {
    pub fn new(tree: ForceTree) -> Self {
        let answers = vec![Vec::new(); tree.five_forces.len()];
        let node = tree
            .five_forces
            .first()
            .map(|c| c.start.clone())
            .unwrap_or_default();
        let mut analysis = Self {
            tree,
            category: 0,
            node,
            answers,
        };
        analysis.settle();
        analysis
    }

    pub fn tree(&self) -> &ForceTree {
        &self.tree
    }

    /// `None` once every category is done.
    pub fn current(&self) -> Option<PendingQuestion<'_>> {
        let category = self.tree.five_forces.get(self.category)?;
        let node = category.node(&self.node)?;
        Some(PendingQuestion {
            category,
            node,
            position: self.category + 1,
            total: self.tree.five_forces.len(),
        })
    }

    /// Record the choice at `index` (0-based) for the current question.
    pub fn select(&mut self, index: usize) -> Result<(), AnalysisError> {
        let pending = self.current().ok_or(AnalysisError::Finished)?;
        let choice = pending
            .node
            .choices
            .get(index)
            .ok_or(AnalysisError::ChoiceOutOfRange {
                index,
                count: pending.node.choices.len(),
            })?;

        let answer = RecordedAnswer {
            question: pending.node.question.clone(),
            answer: choice.label.clone(),
        };
        let next = choice.next_node().map(str::to_string);

        self.answers[self.category].push(answer);
        match next {
            Some(id) => self.node = id,
            None => self.finish_category(),
        }
        self.settle();
        Ok(())
    }

    /// Answer from typed input: a 1-based choice number or a label
    /// (case-insensitive).
    pub fn answer(&mut self, input: &str) -> Result<(), AnalysisError> {
        let pending = self.current().ok_or(AnalysisError::Finished)?;
        let input = input.trim();

        let index = match input.parse::<usize>() {
            Ok(number) => number.checked_sub(1).ok_or(AnalysisError::ChoiceOutOfRange {
                index: 0,
                count: pending.node.choices.len(),
            })?,
            Err(_) => pending
                .node
                .choices
                .iter()
                .position(|c| c.label.eq_ignore_ascii_case(input))
                .ok_or_else(|| AnalysisError::UnknownChoice(input.to_string()))?,
        };
        self.select(index)
    }

    pub fn is_complete(&self) -> bool {
        self.category >= self.tree.five_forces.len()
    }

    /// Fraction of categories finished, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.tree.five_forces.len();
        if total == 0 {
            return 1.0;
        }
        self.category.min(total) as f64 / total as f64
    }

    /// Answers recorded so far, per category in tree order.
    pub fn answers(&self) -> &[Vec<RecordedAnswer>] {
        &self.answers
    }

    /// The scored report, once complete.
    pub fn report(&self) -> Option<AnalysisReport> {
        self.is_complete()
            .then(|| build_report(&self.tree, &self.answers))
    }

    /// Drop all answers and start over on the same tree.
    pub fn restart(&mut self) {
        *self = Self::new(self.tree.clone());
    }

    fn finish_category(&mut self) {
        self.category += 1;
        if let Some(next) = self.tree.five_forces.get(self.category) {
            self.node = next.start.clone();
        }
    }

    /// Skip past nodes that cannot take an answer.
    fn settle(&mut self) {
        while !self.is_complete() {
            let answerable = self
                .tree
                .five_forces
                .get(self.category)
                .and_then(|c| c.node(&self.node))
                .is_some_and(|n| !n.choices.is_empty());
            if answerable {
                break;
            }
            self.finish_category();
        }
    }
}
