use std::io::{self, Write};

use serde::Serialize;

use crate::core::{
    file_io::{
        build_output_path_with_date_time, extract_base_name, maybe_date_time_string,
        serialize_to_json, FilePrefix,
    },
    output::SampleWriter,
    parameters::ParameterSet,
    simulation::RunSummary,
    stopwatch::Stopwatch,
};
use crate::simulations::{
    common::{IntegrationMethod, Problem},
    sine::write_sine_table,
};

use super::args::{ShowParamsArgs, SimulationArgs};

/// Everything needed to reproduce a saved run.
#[derive(Serialize, Debug)]
pub struct RunRecord<'a> {
    pub problem: Problem,
    pub method: IntegrationMethod,
    pub parameters: &'a ParameterSet,
    pub summary: RunSummary,
}

/// Defaults for the problem, overridden by the parameter file if it exists.
pub fn resolve_parameters(problem: Problem, params_path: &str) -> ParameterSet {
    let mut params = problem.default_parameters();
    let report = params.load_from_path(params_path);
    if !report.parse_errors.is_empty() {
        log::debug!(
            "Skipped {} malformed line(s) in {}",
            report.parse_errors.len(),
            params_path
        );
    }
    params
}

pub fn run_simulation(
    problem: Problem,
    args: &SimulationArgs,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let params_path = args
        .params_path
        .clone()
        .unwrap_or_else(|| problem.default_params_path());

    let mut stopwatch = Stopwatch::new(problem.name());
    let params = resolve_parameters(problem, &params_path);
    log::info!(
        "Simulating {} with {:?} using {}",
        problem.name(),
        args.method,
        params_path
    );

    let summary = if args.save {
        let file_prefix = FilePrefix {
            directory_path: build_output_path_with_date_time(
                &params_path,
                problem.name(),
                &maybe_date_time_string(args.date_time_out),
            )?,
            file_base: extract_base_name(&params_path).to_owned(),
        };
        stopwatch.record_split("setup");

        let mut writer = SampleWriter::new(file_prefix.create_file_with_suffix(".dat")?);
        let summary = problem.simulate(&params, args.method, &mut writer)?;
        stopwatch.record_split("simulation");

        serialize_to_json(
            &file_prefix.with_suffix(".json"),
            &RunRecord {
                problem,
                method: args.method,
                parameters: &params,
                summary,
            },
        )?;
        stopwatch.display(&mut file_prefix.create_file_with_suffix("_diagnostics.txt")?)?;
        log::info!("Wrote {:?}", file_prefix.with_suffix(".dat"));
        summary
    } else {
        stopwatch.record_split("setup");
        let stdout = io::stdout();
        let mut writer = SampleWriter::new(stdout.lock());
        let summary = problem.simulate(&params, args.method, &mut writer)?;
        stopwatch.record_split("simulation");
        summary
    };

    log::info!(
        "{} steps, {} samples, final time {} ({:?} elapsed)",
        summary.steps,
        summary.samples,
        summary.t_final,
        stopwatch.total_elapsed()
    );
    Ok(summary)
}

pub fn run_sine_table(save: bool) -> Result<usize, Box<dyn std::error::Error>> {
    let rows = if save {
        let file_prefix = FilePrefix {
            directory_path: build_output_path_with_date_time("sine", "sine", &None)?,
            file_base: "sine".to_owned(),
        };
        write_sine_table(&mut SampleWriter::new(
            file_prefix.create_file_with_suffix(".dat")?,
        ))?
    } else {
        let stdout = io::stdout();
        write_sine_table(&mut SampleWriter::new(stdout.lock()))?
    };
    log::info!("Wrote {} rows", rows);
    Ok(rows)
}

pub fn show_parameters<W: Write>(
    args: &ShowParamsArgs,
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let params_path = args
        .params_path
        .clone()
        .unwrap_or_else(|| args.problem.default_params_path());
    let params = resolve_parameters(args.problem, &params_path);
    let mut writer = SampleWriter::new(writer);
    writer.write_parameters(&params)?;
    writer.flush()?;
    Ok(())
}
