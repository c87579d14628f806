use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "antgrid",
    about = "antgrid: pack workloads onto as few nodes as possible",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the colony on a problem file and print the bindings.
    ///
    /// The file lists [[nodes]] and [[workloads]] and may carry a [colony]
    /// table; flags given here override that table.
    Solve {
        /// Problem file (.toml or .json)
        #[arg(short, long, default_value = "antgrid.toml")]
        problem: String,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Number of iterations
        #[arg(short, long)]
        iterations: Option<u32>,
        /// Agents per iteration
        #[arg(short, long)]
        ants: Option<u32>,
        /// Build agents one after another instead of on the thread pool
        #[arg(long)]
        sequential: bool,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Write an example problem file
    Init {
        #[arg(short, long, default_value = "antgrid.toml")]
        path: String,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("antgrid=info".parse()?)
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            problem,
            seed,
            iterations,
            ants,
            sequential,
            format,
        } => {
            let overrides = commands::solve::Overrides {
                seed,
                iterations,
                ants,
                sequential,
            };
            commands::solve::solve(&problem, &overrides, &format)
        }
        Commands::Init { path, force } => commands::init::init(&path, force),
    }
}
