use std::path::Path;

use antgrid_core::{ColonyConfig, Problem};
use antgrid_placement::{
    Binding, ColonyOutcome, ColonyReport, assignment_to_bindings, problem_to_model,
};
use tracing::info;

/// Command-line values that take precedence over the problem's `[colony]` table.
#[derive(Debug, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub iterations: Option<u32>,
    pub ants: Option<u32>,
    pub sequential: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: ColonyConfig) -> ColonyConfig {
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(iterations) = self.iterations {
            config = config.with_iterations(iterations);
        }
        if let Some(ants) = self.ants {
            config = config.with_ants(ants);
        }
        if self.sequential {
            config = config.with_parallel(false);
        }
        config
    }
}

pub fn solve(path: &str, overrides: &Overrides, format: &str) -> anyhow::Result<()> {
    info!(path, "loading problem");
    let problem = Problem::from_file(Path::new(path))?;
    let (report, bindings) = run(&problem, overrides)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&render_json(&report, &bindings))?),
        _ => println!("{}", render_text(&report, &bindings)),
    }

    if bindings.is_none() {
        anyhow::bail!(
            "no feasible placement for {} workloads on {} nodes",
            problem.workloads.len(),
            problem.nodes.len()
        );
    }
    Ok(())
}

/// Solve `problem` and map a feasible result to named bindings.
pub fn run(
    problem: &Problem,
    overrides: &Overrides,
) -> anyhow::Result<(ColonyReport, Option<Vec<Binding>>)> {
    let config = overrides.apply(problem.colony.clone());
    info!(
        nodes = problem.nodes.len(),
        workloads = problem.workloads.len(),
        iterations = config.iterations,
        ants = config.ants,
        seed = ?config.seed,
        parallel = config.parallel,
        "solving problem"
    );
    let model = problem_to_model(problem);
    let report = antgrid_placement::solve(&model, &config)?;

    let bindings = match &report.outcome {
        ColonyOutcome::Feasible(solution) => {
            Some(assignment_to_bindings(problem, &solution.assignment)?)
        }
        ColonyOutcome::Infeasible => None,
    };
    Ok((report, bindings))
}

fn render_text(report: &ColonyReport, bindings: &Option<Vec<Binding>>) -> String {
    let (Some(solution), Some(bindings)) = (report.outcome.solution(), bindings) else {
        return format!("✗ No feasible placement after {} iterations", report.iterations.len());
    };

    let mut out = format!(
        "✓ Placed {} workloads on {} nodes (found in iteration {})",
        bindings.len(),
        solution.node_count,
        solution.iteration
    );
    if report.stopped_early {
        out.push_str("\n  Stopped early: time budget reached");
    }
    for binding in bindings {
        out.push_str(&format!("\n  {} → {}", binding.workload, binding.node));
    }
    out
}

fn render_json(report: &ColonyReport, bindings: &Option<Vec<Binding>>) -> serde_json::Value {
    serde_json::json!({
        "feasible": report.outcome.is_feasible(),
        "node_count": report.outcome.solution().map(|s| s.node_count),
        "found_in_iteration": report.outcome.solution().map(|s| s.iteration),
        "iterations_run": report.iterations.len(),
        "stopped_early": report.stopped_early,
        "bindings": bindings,
    })
}
