//! Workload → node assignments produced by agents.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One agent's placement of every workload, in workload order.
///
/// `None` marks a workload the agent could not place anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    slots: Vec<Option<usize>>,
}

impl Assignment {
    /// An assignment with every workload unplaced.
    pub fn unassigned(workloads: usize) -> Self {
        Self {
            slots: vec![None; workloads],
        }
    }

    pub fn from_slots(slots: Vec<Option<usize>>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn node_for(&self, workload: usize) -> Option<usize> {
        self.slots.get(workload).copied().flatten()
    }

    pub fn set(&mut self, workload: usize, node: usize) {
        self.slots[workload] = Some(node);
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    /// `(workload, node)` pairs for every placed workload.
    pub fn placed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(workload, node)| node.map(|n| (workload, n)))
    }

    /// True when every workload has a node.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Number of unique nodes used.
    pub fn distinct_nodes(&self) -> usize {
        self.slots.iter().flatten().collect::<HashSet<_>>().len()
    }

    /// Node per workload, or `None` if any workload is unplaced.
    pub fn to_complete(&self) -> Option<Vec<usize>> {
        self.slots.iter().copied().collect()
    }
}
