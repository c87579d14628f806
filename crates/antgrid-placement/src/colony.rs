//! Colony runner. Drives agents over iterations and updates pheromones.
//!
//! Each iteration has two phases:
//! 1. **Construction**: every agent builds a full [`Assignment`] against its
//!    own copy of node capacities, reading the pheromone matrix only. With
//!    `parallel` set, agents run on the rayon pool.
//! 2. **Update**: after all agents have finished, the iteration's best
//!    complete assignment decays and reinforces the matrix once.
//!
//! Agents get their own RNG, seeded from the run's random source in agent
//! order before construction starts. A run is therefore reproducible from
//! its seed whether or not agents run in parallel.

use std::time::{Duration, Instant};

use antgrid_core::ColonyConfig;
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assignment::Assignment;
use crate::error::{PlacementError, PlacementResult};
use crate::pheromone::PheromoneMatrix;
use crate::resources::{ResourceModel, Resources};
use crate::tracker::{ColonyOutcome, SolutionTracker};

/// Random nodes an agent tries before falling back to a linear scan.
pub const RANDOM_ATTEMPTS: usize = 3;

/// What happened in one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationSummary {
    /// 1-based.
    pub iteration: u32,
    /// Distinct nodes of the iteration's best complete assignment.
    pub best_node_count: Option<usize>,
    /// Agents that placed every workload.
    pub feasible_ants: u32,
    /// Best count of the run so far, including this iteration.
    pub best_ever_node_count: Option<usize>,
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColonyReport {
    pub outcome: ColonyOutcome,
    pub iterations: Vec<IterationSummary>,
    /// Set when the run hit `max_duration_ms` before its last iteration.
    pub stopped_early: bool,
}

/// Owns the pheromone matrix and elite tracking for one optimization run.
pub struct ColonyRunner<'a> {
    model: &'a ResourceModel,
    config: ColonyConfig,
    pheromones: PheromoneMatrix,
    tracker: SolutionTracker,
}

impl<'a> ColonyRunner<'a> {
    /// Validate `config` and the problem size, and set up a uniform matrix.
    pub fn new(model: &'a ResourceModel, config: ColonyConfig) -> PlacementResult<Self> {
        config.validate()?;
        if model.node_count() == 0 {
            return Err(PlacementError::NoNodes);
        }
        if model.workload_count() == 0 {
            return Err(PlacementError::NoWorkloads);
        }

        Ok(Self {
            pheromones: PheromoneMatrix::new(model.workload_count(), model.node_count()),
            tracker: SolutionTracker::new(config.selection),
            model,
            config,
        })
    }

    pub fn pheromones(&self) -> &PheromoneMatrix {
        &self.pheromones
    }

    /// Run all configured iterations, drawing randomness from `rng`.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ColonyReport {
        self.pheromones =
            PheromoneMatrix::new(self.model.workload_count(), self.model.node_count());
        self.tracker.reset();
        self.pheromones.refresh_derived(self.config.ants, rng);

        info!(
            nodes = self.model.node_count(),
            workloads = self.model.workload_count(),
            iterations = self.config.iterations,
            ants = self.config.ants,
            parallel = self.config.parallel,
            "starting colony run"
        );

        let started = Instant::now();
        let budget = self.config.max_duration_ms.map(Duration::from_millis);
        let mut iterations = Vec::new();
        let mut stopped_early = false;

        for iteration in 1..=self.config.iterations {
            if iteration > 1 && budget.is_some_and(|b| started.elapsed() >= b) {
                warn!(
                    completed = iteration - 1,
                    configured = self.config.iterations,
                    "colony run hit its time budget"
                );
                stopped_early = true;
                break;
            }
            iterations.push(self.run_iteration(iteration, rng));
        }

        let outcome = self.tracker.outcome();
        match &outcome {
            ColonyOutcome::Feasible(solution) => {
                debug_assert!(self.model.respects_capacity(&solution.assignment));
                info!(
                    node_count = solution.node_count,
                    found_in = solution.iteration,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "colony run found a placement"
                );
            }
            ColonyOutcome::Infeasible => {
                warn!(
                    workloads = self.model.workload_count(),
                    "colony run found no feasible placement"
                );
            }
        }

        ColonyReport {
            outcome,
            iterations,
            stopped_early,
        }
    }

    /// One construction phase followed by one pheromone update.
    pub fn run_iteration<R: Rng + ?Sized>(
        &mut self,
        iteration: u32,
        rng: &mut R,
    ) -> IterationSummary {
        self.tracker.begin_iteration(iteration);

        let seeds: Vec<u64> = (0..self.config.ants).map(|_| rng.next_u64()).collect();
        let assignments: Vec<Assignment> = if self.config.parallel {
            seeds
                .par_iter()
                .enumerate()
                .map(|(ant, &seed)| self.construct_with_seed(ant, seed))
                .collect()
        } else {
            seeds
                .iter()
                .enumerate()
                .map(|(ant, &seed)| self.construct_with_seed(ant, seed))
                .collect()
        };

        let mut feasible_ants = 0;
        for assignment in &assignments {
            if assignment.is_complete() {
                feasible_ants += 1;
            }
            self.tracker.offer(assignment);
        }

        let elite = self.tracker.finish_iteration();
        self.pheromones
            .decay_and_reinforce(elite, self.config.decay_ratio, self.config.raise_ratio);
        self.pheromones.refresh_derived(self.config.ants, rng);

        let summary = IterationSummary {
            iteration,
            best_node_count: self.tracker.last_iteration().map(|s| s.node_count),
            feasible_ants,
            best_ever_node_count: self.tracker.best_node_count(),
        };
        debug!(
            iteration,
            best = ?summary.best_node_count,
            best_ever = ?summary.best_ever_node_count,
            feasible_ants,
            "iteration finished"
        );
        summary
    }

    fn construct_with_seed(&self, ant: usize, seed: u64) -> Assignment {
        self.construct_assignment(ant as u32, &mut SmallRng::seed_from_u64(seed))
    }

    /// Build one agent's assignment against a fresh copy of node capacities.
    ///
    /// Workloads that fit nowhere are left unplaced and the agent moves on.
    pub fn construct_assignment<R: Rng + ?Sized>(&self, ant: u32, rng: &mut R) -> Assignment {
        let mut remaining = self.model.fresh_capacities();
        let mut assignment = Assignment::unassigned(self.model.workload_count());

        for workload in 0..self.model.workload_count() {
            let demand = self.model.demand(workload);
            if let Some(node) = self.select_node(ant, workload, &demand, &remaining, rng) {
                remaining[node] = remaining[node].saturating_sub(&demand);
                assignment.set(workload, node);
            }
        }

        assignment
    }

    /// Exploit the preferred node, else try random nodes, else scan in order.
    fn select_node<R: Rng + ?Sized>(
        &self,
        ant: u32,
        workload: usize,
        demand: &Resources,
        remaining: &[Resources],
        rng: &mut R,
    ) -> Option<usize> {
        let preferred = self.pheromones.preferred_node(workload);
        let exploit = ant <= self.pheromones.exploitation_threshold(workload);
        if exploit && remaining[preferred].fits(demand) {
            return Some(preferred);
        }

        for _ in 0..RANDOM_ATTEMPTS {
            let node = rng.gen_range(0..remaining.len());
            if remaining[node].fits(demand) {
                return Some(node);
            }
        }

        remaining.iter().position(|free| free.fits(demand))
    }
}

/// Run a colony over `model`, seeding from `config.seed` or OS entropy.
pub fn solve(model: &ResourceModel, config: &ColonyConfig) -> PlacementResult<ColonyReport> {
    let mut runner = ColonyRunner::new(model, config.clone())?;
    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    Ok(runner.run(&mut rng))
}
