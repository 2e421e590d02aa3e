use clap::Parser;
use pendulum_lab::cli::args::{CommandsEnum, PendulumLabArgs};
use pendulum_lab::cli::run::{run_simulation, run_sine_table, show_parameters};
use pendulum_lab::simulations::common::Problem;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: PendulumLabArgs = PendulumLabArgs::parse();

    env_logger::builder().filter_level(args.log_level).init();

    match &args.command {
        Some(CommandsEnum::Exponential(sim_args)) => {
            run_simulation(Problem::Exponential, sim_args)?;
        }
        Some(CommandsEnum::Pendulum(sim_args)) => {
            run_simulation(Problem::Pendulum, sim_args)?;
        }
        Some(CommandsEnum::DampedPendulum(sim_args)) => {
            run_simulation(Problem::DampedPendulum, sim_args)?;
        }
        Some(CommandsEnum::DoublePendulum(sim_args)) => {
            run_simulation(Problem::DoublePendulum, sim_args)?;
        }
        Some(CommandsEnum::Sine(sine_args)) => {
            run_sine_table(sine_args.save)?;
        }
        Some(CommandsEnum::Params(show_args)) => {
            show_parameters(show_args, std::io::stdout().lock())?;
        }
        None => {
            log::warn!("No command given, see --help");
        }
    }
    Ok(())
}
