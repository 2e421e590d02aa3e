pub mod file_io;
pub mod ode_solvers;
pub mod output;
pub mod parameters;
pub mod simulation;
pub mod stopwatch;
