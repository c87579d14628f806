//! Type conversions between problem manifests and the optimizer's model.
//!
//! Bridges `antgrid_core::{NodeSpec, WorkloadSpec, Problem}` to
//! [`ResourceModel`], and maps a finished [`Assignment`] back to named
//! bindings the host can act on.

use antgrid_core::{NodeSpec, Problem, WorkloadSpec};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::error::{PlacementError, PlacementResult};
use crate::resources::{ResourceModel, Resources};

/// One workload bound to one node, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub workload: String,
    pub node: String,
}

/// Sum of the CPU and memory requests of every container in `workload`.
pub fn workload_demand(workload: &WorkloadSpec) -> Resources {
    workload
        .containers
        .iter()
        .fold(Resources::default(), |total, container| {
            total.saturating_add(&Resources::new(container.cpu_millis, container.memory_bytes))
        })
}

/// Allocatable CPU and memory of `node`.
pub fn node_capacity(node: &NodeSpec) -> Resources {
    Resources::new(node.cpu_millis, node.memory_bytes)
}

/// Build the run's resource model, preserving node and workload order.
pub fn problem_to_model(problem: &Problem) -> ResourceModel {
    ResourceModel::new(
        problem.nodes.iter().map(node_capacity).collect(),
        problem.workloads.iter().map(workload_demand).collect(),
    )
}

/// Map a complete assignment to `(workload, node)` name pairs.
pub fn assignment_to_bindings(
    problem: &Problem,
    assignment: &Assignment,
) -> PlacementResult<Vec<Binding>> {
    if assignment.len() != problem.workloads.len() {
        return Err(PlacementError::InvalidAssignment(format!(
            "{} slots for {} workloads",
            assignment.len(),
            problem.workloads.len()
        )));
    }

    problem
        .workloads
        .iter()
        .enumerate()
        .map(|(index, workload)| {
            let node = assignment.node_for(index).ok_or_else(|| {
                PlacementError::InvalidAssignment(format!("workload {} is unplaced", workload.name))
            })?;
            let node = problem.nodes.get(node).ok_or_else(|| {
                PlacementError::InvalidAssignment(format!("node index {node} out of range"))
            })?;
            Ok(Binding {
                workload: workload.name.clone(),
                node: node.name.clone(),
            })
        })
        .collect()
}
