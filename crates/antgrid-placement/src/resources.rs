//! Scalar CPU/memory model for nodes and workloads.
//!
//! A [`ResourceModel`] is built once per run and never mutated: node
//! capacities are the original allocatable figures, and each workload's
//! demand is already the sum over its containers. Agents work on a private
//! copy of the capacities (see [`ResourceModel::fresh_capacities`]).

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;

/// A CPU (millicores) / memory (bytes) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu: u64,
    pub memory: u64,
}

impl Resources {
    pub const fn new(cpu: u64, memory: u64) -> Self {
        Self { cpu, memory }
    }

    /// Whether `demand` fits into `self` on both dimensions.
    pub fn fits(&self, demand: &Resources) -> bool {
        demand.cpu <= self.cpu && demand.memory <= self.memory
    }

    pub fn saturating_sub(&self, other: &Resources) -> Resources {
        Resources {
            cpu: self.cpu.saturating_sub(other.cpu),
            memory: self.memory.saturating_sub(other.memory),
        }
    }

    pub fn saturating_add(&self, other: &Resources) -> Resources {
        Resources {
            cpu: self.cpu.saturating_add(other.cpu),
            memory: self.memory.saturating_add(other.memory),
        }
    }
}

/// Immutable capacities and demands for one optimization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceModel {
    capacities: Vec<Resources>,
    demands: Vec<Resources>,
}

impl ResourceModel {
    pub fn new(capacities: Vec<Resources>, demands: Vec<Resources>) -> Self {
        Self {
            capacities,
            demands,
        }
    }

    /// Build a model from `(cpu, memory)` tuples.
    pub fn from_pairs(nodes: &[(u64, u64)], workloads: &[(u64, u64)]) -> Self {
        let to_resources = |&(cpu, memory): &(u64, u64)| Resources::new(cpu, memory);
        Self::new(
            nodes.iter().map(to_resources).collect(),
            workloads.iter().map(to_resources).collect(),
        )
    }

    pub fn node_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn workload_count(&self) -> usize {
        self.demands.len()
    }

    pub fn capacity(&self, node: usize) -> Resources {
        self.capacities[node]
    }

    pub fn demand(&self, workload: usize) -> Resources {
        self.demands[workload]
    }

    /// A private working copy of the original capacities.
    pub fn fresh_capacities(&self) -> Vec<Resources> {
        self.capacities.clone()
    }

    /// Total demand placed on each node by `assignment`. Unassigned slots
    /// and out-of-range node indices are ignored.
    pub fn node_usage(&self, assignment: &Assignment) -> Vec<Resources> {
        let mut usage = vec![Resources::default(); self.node_count()];
        for (workload, node) in assignment.placed() {
            if let (Some(slot), Some(demand)) = (usage.get_mut(node), self.demands.get(workload)) {
                *slot = slot.saturating_add(demand);
            }
        }
        usage
    }

    /// Whether no node is loaded beyond its original capacity.
    pub fn respects_capacity(&self, assignment: &Assignment) -> bool {
        if assignment.placed().any(|(_, node)| node >= self.node_count()) {
            return false;
        }
        self.node_usage(assignment)
            .iter()
            .zip(&self.capacities)
            .all(|(used, capacity)| capacity.fits(used))
    }
}
