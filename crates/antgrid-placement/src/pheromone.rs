//! Pheromone matrix: per (workload, node) desirability scores.
//!
//! Cells start at `1.0` and change only through
//! [`PheromoneMatrix::decay_and_reinforce`], which is always followed by
//! [`PheromoneMatrix::refresh_derived`]. Between those calls the matrix and
//! its derived statistics are read-only, so agents of one iteration can read
//! it concurrently.
//!
//! The update is multiplicative: every cell decays, then the elite
//! assignment's cells are raised. Only the ratio of a row's maximum to its
//! sum reaches the agents, through the exploitation threshold.

use rand::Rng;

use crate::assignment::Assignment;

/// Smallest value a cell may take. Decay never drives a cell to zero.
pub const PHEROMONE_FLOOR: f64 = f64::MIN_POSITIVE;

/// A `workloads × nodes` grid stored row-major, plus derived row statistics.
#[derive(Debug, Clone)]
pub struct PheromoneMatrix {
    workloads: usize,
    nodes: usize,
    cells: Vec<f64>,
    preferred: Vec<usize>,
    thresholds: Vec<u32>,
}

impl PheromoneMatrix {
    /// A uniform matrix with every cell at `1.0`.
    ///
    /// Derived statistics are zeroed until the first
    /// [`refresh_derived`](Self::refresh_derived).
    pub fn new(workloads: usize, nodes: usize) -> Self {
        Self {
            workloads,
            nodes,
            cells: vec![1.0; workloads * nodes],
            preferred: vec![0; workloads],
            thresholds: vec![0; workloads],
        }
    }

    pub fn workload_count(&self) -> usize {
        self.workloads
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn get(&self, workload: usize, node: usize) -> f64 {
        self.cells[workload * self.nodes + node]
    }

    pub fn row(&self, workload: usize) -> &[f64] {
        let start = workload * self.nodes;
        &self.cells[start..start + self.nodes]
    }

    /// Node currently holding the row maximum for `workload`.
    pub fn preferred_node(&self, workload: usize) -> usize {
        self.preferred[workload]
    }

    /// Highest agent index that still tries the preferred node first.
    pub fn exploitation_threshold(&self, workload: usize) -> u32 {
        self.thresholds[workload]
    }

    /// Decay every cell, then raise the cells chosen by `elite`.
    ///
    /// With no elite this is a pure decay step. Unplaced slots and node
    /// indices outside the matrix are skipped.
    pub fn decay_and_reinforce(
        &mut self,
        elite: Option<&Assignment>,
        decay_ratio: f64,
        raise_ratio: f64,
    ) {
        for cell in &mut self.cells {
            *cell = (*cell * decay_ratio).max(PHEROMONE_FLOOR);
        }

        let Some(elite) = elite else { return };
        for (workload, node) in elite.placed() {
            if workload < self.workloads && node < self.nodes {
                let cell = &mut self.cells[workload * self.nodes + node];
                *cell = (*cell * raise_ratio).min(f64::MAX);
            }
        }
    }

    /// Recompute the preferred node and exploitation threshold of every row.
    ///
    /// When several columns share the row maximum the preferred node is drawn
    /// uniformly among them; a uniform row is the usual case.
    pub fn refresh_derived<R: Rng + ?Sized>(&mut self, ant_count: u32, rng: &mut R) {
        if self.nodes == 0 {
            return;
        }

        for workload in 0..self.workloads {
            let row = &self.cells[workload * self.nodes..(workload + 1) * self.nodes];

            let max = row.iter().copied().fold(f64::MIN, f64::max);
            let sum: f64 = row.iter().sum();

            let ties: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|&(_, &value)| value == max)
                .map(|(node, _)| node)
                .collect();
            let preferred = match ties.as_slice() {
                [only] => *only,
                _ => ties[rng.gen_range(0..ties.len())],
            };

            let share = if sum.is_finite() && sum > 0.0 { max / sum } else { 1.0 };
            let threshold = (f64::from(ant_count) * share).round();

            self.preferred[workload] = preferred;
            self.thresholds[workload] = threshold.clamp(0.0, f64::from(ant_count)) as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    #[test]
    fn new_matrix_is_uniform() {
        let m = PheromoneMatrix::new(3, 4);
        assert!((0..3).all(|w| m.row(w).iter().all(|&v| v == 1.0)));
        assert_eq!(m.row(2).len(), 4);
    }

    #[test]
    fn decay_then_raise_is_multiplicative() {
        let mut m = PheromoneMatrix::new(2, 3);
        let elite = Assignment::from_slots(vec![Some(1), Some(2)]);

        m.decay_and_reinforce(Some(&elite), 0.5, 3.0);

        assert_eq!(m.get(0, 0), 0.5);
        assert_eq!(m.get(0, 1), 1.5);
        assert_eq!(m.get(1, 2), 1.5);
        assert_eq!(m.get(1, 0), 0.5);
    }

    #[test]
    fn missing_elite_only_decays() {
        let mut m = PheromoneMatrix::new(2, 2);
        m.decay_and_reinforce(None, 0.25, 2.0);
        assert!(m.row(0).iter().chain(m.row(1)).all(|&v| v == 0.25));
    }

    #[test]
    fn unplaced_elite_slot_is_skipped() {
        let mut m = PheromoneMatrix::new(2, 2);
        let elite = Assignment::from_slots(vec![None, Some(0)]);
        m.decay_and_reinforce(Some(&elite), 0.5, 2.0);

        assert_eq!(m.row(0), &[0.5, 0.5]);
        assert_eq!(m.row(1), &[1.0, 0.5]);
    }

    #[test]
    fn cells_stay_positive_under_long_decay() {
        let mut m = PheromoneMatrix::new(2, 3);
        let elite = Assignment::from_slots(vec![Some(0), Some(0)]);
        for _ in 0..5000 {
            m.decay_and_reinforce(Some(&elite), 0.1, 1.01);
        }
        assert!((0..2).all(|w| m.row(w).iter().all(|&v| v > 0.0)));
    }

    #[test]
    fn refresh_prefers_row_maximum() {
        let mut m = PheromoneMatrix::new(1, 4);
        let elite = Assignment::from_slots(vec![Some(2)]);
        m.decay_and_reinforce(Some(&elite), 0.5, 4.0);
        m.refresh_derived(10, &mut rng());

        // Row is [0.5, 0.5, 2.0, 0.5]: share 2.0 / 3.5.
        assert_eq!(m.preferred_node(0), 2);
        assert_eq!(m.exploitation_threshold(0), 6);
    }

    #[test]
    fn uniform_row_threshold_is_ants_over_nodes() {
        let mut m = PheromoneMatrix::new(1, 4);
        m.refresh_derived(20, &mut rng());
        assert_eq!(m.exploitation_threshold(0), 5);
        assert!(m.preferred_node(0) < 4);
    }

    #[test]
    fn uniform_rows_do_not_always_prefer_node_zero() {
        let mut m = PheromoneMatrix::new(64, 4);
        m.refresh_derived(8, &mut rng());

        let preferred: Vec<usize> = (0..64).map(|w| m.preferred_node(w)).collect();
        assert!(preferred.iter().any(|&n| n != 0), "tie-break biased to node 0");
    }

    #[test]
    fn tie_break_stays_within_tied_columns() {
        let mut m = PheromoneMatrix::new(1, 4);
        m.decay_and_reinforce(Some(&Assignment::from_slots(vec![Some(1)])), 0.5, 2.0);
        m.decay_and_reinforce(Some(&Assignment::from_slots(vec![Some(3)])), 0.5, 2.0);
        assert_eq!(m.row(0), &[0.25, 0.5, 0.25, 0.5]);

        let mut r = rng();
        let mut seen = [false; 4];
        for _ in 0..64 {
            m.refresh_derived(4, &mut r);
            seen[m.preferred_node(0)] = true;
            assert_eq!(m.exploitation_threshold(0), 1);
        }
        assert_eq!(seen, [false, true, false, true]);
    }

    #[test]
    fn refresh_on_empty_node_set_is_noop() {
        let mut m = PheromoneMatrix::new(2, 0);
        m.refresh_derived(5, &mut rng());
        assert_eq!(m.exploitation_threshold(0), 0);
    }
}
