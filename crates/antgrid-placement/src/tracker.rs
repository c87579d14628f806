//! Elite solution bookkeeping across iterations.

use antgrid_core::ResultSelection;
use serde::Serialize;

use crate::assignment::Assignment;

/// A complete assignment together with its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EliteSolution {
    pub assignment: Assignment,
    /// Distinct nodes used by `assignment`.
    pub node_count: usize,
    /// 1-based iteration that produced it.
    pub iteration: u32,
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ColonyOutcome {
    Feasible(EliteSolution),
    /// No agent produced a complete assignment (under the selection policy).
    Infeasible,
}

impl ColonyOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, ColonyOutcome::Feasible(_))
    }

    pub fn solution(&self) -> Option<&EliteSolution> {
        match self {
            ColonyOutcome::Feasible(solution) => Some(solution),
            ColonyOutcome::Infeasible => None,
        }
    }
}

/// Tracks the best-of-iteration candidate and the best solution of the run.
///
/// Candidates are offered during an iteration; the run's elite only changes
/// in [`finish_iteration`](Self::finish_iteration).
#[derive(Debug, Clone)]
pub struct SolutionTracker {
    selection: ResultSelection,
    iteration: u32,
    candidate: Option<EliteSolution>,
    last_iteration: Option<EliteSolution>,
    best: Option<EliteSolution>,
}

impl SolutionTracker {
    pub fn new(selection: ResultSelection) -> Self {
        Self {
            selection,
            iteration: 0,
            candidate: None,
            last_iteration: None,
            best: None,
        }
    }

    /// Forget everything, as at the start of a run.
    pub fn reset(&mut self) {
        *self = Self::new(self.selection);
    }

    /// Open iteration `iteration` (1-based) with no candidate.
    pub fn begin_iteration(&mut self, iteration: u32) {
        self.iteration = iteration;
        self.candidate = None;
    }

    /// Offer one agent's assignment. Incomplete assignments are ignored;
    /// a complete one replaces the candidate only if it uses strictly fewer
    /// distinct nodes. Returns whether it was kept.
    pub fn offer(&mut self, assignment: &Assignment) -> bool {
        if !assignment.is_complete() {
            return false;
        }
        let node_count = assignment.distinct_nodes();
        if self
            .candidate
            .as_ref()
            .is_some_and(|current| node_count >= current.node_count)
        {
            return false;
        }
        self.candidate = Some(EliteSolution {
            assignment: assignment.clone(),
            node_count,
            iteration: self.iteration,
        });
        true
    }

    /// Close the iteration, promote its candidate if it beats the run's best,
    /// and return the candidate for the pheromone update.
    pub fn finish_iteration(&mut self) -> Option<&Assignment> {
        self.last_iteration = self.candidate.take();

        if let Some(candidate) = &self.last_iteration {
            let improves = self
                .best
                .as_ref()
                .is_none_or(|best| candidate.node_count < best.node_count);
            if improves {
                self.best = Some(candidate.clone());
            }
        }

        self.last_iteration.as_ref().map(|c| &c.assignment)
    }

    pub fn best(&self) -> Option<&EliteSolution> {
        self.best.as_ref()
    }

    pub fn best_node_count(&self) -> Option<usize> {
        self.best.as_ref().map(|b| b.node_count)
    }

    pub fn last_iteration(&self) -> Option<&EliteSolution> {
        self.last_iteration.as_ref()
    }

    /// The run's result under the configured selection policy.
    pub fn outcome(&self) -> ColonyOutcome {
        let chosen = match self.selection {
            ResultSelection::BestEver => self.best.as_ref(),
            ResultSelection::FinalIteration => self.last_iteration.as_ref(),
        };
        chosen
            .cloned()
            .map_or(ColonyOutcome::Infeasible, ColonyOutcome::Feasible)
    }
}
