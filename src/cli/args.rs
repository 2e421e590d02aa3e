use clap::{Args, Parser, Subcommand};

use crate::simulations::common::{IntegrationMethod, Problem};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct PendulumLabArgs {
    /// Verbosity of the diagnostics written to stderr.
    #[clap(long, global = true, default_value = "info")]
    pub log_level: log::LevelFilter,

    #[command(subcommand)]
    pub command: Option<CommandsEnum>,
}

#[derive(Debug, Subcommand)]
pub enum CommandsEnum {
    /// Exponential growth, y' = k y.
    Exponential(SimulationArgs),
    /// Undamped single pendulum.
    Pendulum(SimulationArgs),
    /// Driven, damped single pendulum.
    DampedPendulum(SimulationArgs),
    /// Double pendulum with equal masses and rods.
    DoublePendulum(SimulationArgs),
    /// Tabulate sin(x) over one period.
    Sine(SineArgs),
    /// Print the resolved parameters of a problem without running it.
    Params(ShowParamsArgs),
}

#[derive(Debug, Args)]
pub struct SimulationArgs {
    /// Parameter file; defaults to `params/<problem>.prm`.
    pub params_path: Option<String>,

    #[clap(long, short, value_enum, default_value_t = IntegrationMethod::Rk4)]
    pub method: IntegrationMethod,

    /// Write the table and diagnostics under `out/` instead of stdout.
    #[clap(long, short)]
    pub save: bool,

    #[clap(long, short)]
    pub date_time_out: bool,
}

#[derive(Debug, Args)]
pub struct SineArgs {
    #[clap(long, short)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct ShowParamsArgs {
    #[clap(value_enum)]
    pub problem: Problem,

    pub params_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        PendulumLabArgs::command().debug_assert();
    }

    #[test]
    fn parse_simulation_subcommand() {
        let args = PendulumLabArgs::parse_from([
            "pendulum-lab",
            "double-pendulum",
            "my.prm",
            "--method",
            "euler",
            "--save",
        ]);
        match args.command {
            Some(CommandsEnum::DoublePendulum(sim)) => {
                assert_eq!(sim.params_path.as_deref(), Some("my.prm"));
                assert_eq!(sim.method, IntegrationMethod::Euler);
                assert!(sim.save);
                assert!(!sim.date_time_out);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn parse_params_subcommand() {
        let args = PendulumLabArgs::parse_from(["pendulum-lab", "params", "damped-pendulum"]);
        match args.command {
            Some(CommandsEnum::Params(show)) => {
                assert_eq!(show.problem, Problem::DampedPendulum);
                assert!(show.params_path.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
