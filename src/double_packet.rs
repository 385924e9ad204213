use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use cnspace::{ config::Params, observables, sim::Simulation };

// two counter-propagating packets in an infinite square well

#[derive(Parser, Debug)]
#[command(about = "Evolve a superposition of two packets in an infinite square well")]
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
        None => Params::double_packet(),
    };
    let mut sim = Simulation::new(params)?;
    sim.solve()?;
    let traj = sim.trajectory().context("no trajectory after solve")?;

    let x = sim.grid().x();
    let t = sim.grid().t();
    let norm = observables::norm(x, traj.psi())?;
    let ex = observables::expected_position(x, traj.psi())?;
    let var = observables::position_variance(x, traj.psi())?;

    println!("{:>10} {:>12} {:>12} {:>12}", "t", "norm", "<x>", "var(x)");
    for k in (0..traj.completed()).step_by(cli.stride.max(1)) {
        println!("{:>10.4} {:>12.8} {:>12.5} {:>12.5}", t[k], norm[k], ex[k], var[k]);
    }
    Ok(())
}
