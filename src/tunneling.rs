use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use cnspace::{
    config::Params,
    observables,
    potential::Potential,
    sim::Simulation,
};

// a single packet incident on a rectangular barrier

#[derive(Parser, Debug)]
#[command(about = "Evolve a packet incident on a rectangular potential barrier")]
struct Cli {
    /// YAML parameter file; built-in defaults are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every `stride`-th time point
    #[arg(short, long, default_value_t = 100)]
    stride: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let params = match cli.config.as_ref() {
        Some(path) => Params::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Params::tunneling(),
    };
    let mut sim = Simulation::new(params)?;
    let x_far = match *sim.potential() {
        Potential::TunnelingBarrier { x1, width, .. } => x1 + width,
        Potential::InfiniteSquareWell { .. } => 0.0,
    };
    let x_end = sim.grid().length() / 2.0;
    sim.solve()?;
    let traj = sim.trajectory().context("no trajectory after solve")?;

    let x = sim.grid().x();
    let t = sim.grid().t();
    let norm = observables::norm(x, traj.psi())?;
    let ex = observables::expected_position(x, traj.psi())?;
    // strictly past the barrier
    let transmitted
        = observables::probability_in(x, traj.psi(), x_far + sim.grid().dx(), x_end)?;

    println!("{:>10} {:>12} {:>12} {:>12}", "t", "norm", "<x>", "P(T)");
    for k in (0..traj.completed()).step_by(cli.stride.max(1)) {
        println!(
            "{:>10.4} {:>12.8} {:>12.5} {:>12.5e}",
            t[k], norm[k], ex[k], transmitted[k],
        );
    }
    Ok(())
}
