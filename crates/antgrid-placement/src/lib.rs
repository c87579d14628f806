//! antgrid placement: ant-colony bin-packing of workloads onto nodes.
//!
//! Given node capacities and workload demands (CPU and memory), the colony
//! searches for a feasible assignment that uses as few distinct nodes as
//! possible. It does NOT discover nodes or apply bindings; callers convert
//! their own objects into a [`ResourceModel`] and act on the returned
//! [`Assignment`].
//!
//! # Components
//!
//! - **`resources`** - Scalar capacity/demand model
//! - **`pheromone`** - Workload × node desirability matrix and derived row statistics
//! - **`colony`** - Agent construction heuristic and the iteration loop
//! - **`tracker`** - Best-of-iteration and best-ever solutions
//! - **`convert`** - Conversions from problem manifests and back to named bindings

pub mod assignment;
pub mod colony;
pub mod convert;
pub mod error;
pub mod pheromone;
pub mod resources;
pub mod tracker;

pub use assignment::Assignment;
pub use colony::{ColonyReport, ColonyRunner, IterationSummary, RANDOM_ATTEMPTS, solve};
pub use convert::{
    Binding, assignment_to_bindings, node_capacity, problem_to_model, workload_demand,
};
pub use error::{PlacementError, PlacementResult};
pub use pheromone::{PHEROMONE_FLOOR, PheromoneMatrix};
pub use resources::{ResourceModel, Resources};
pub use tracker::{ColonyOutcome, EliteSolution, SolutionTracker};
