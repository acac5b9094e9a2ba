mod results;
mod simulator;

pub use results::{EquityResult, SimulationResults};
pub use simulator::{
    approx_equity, calc_equity, flop_equity, preflop_equity, turn_equity, Simulator,
    SimulatorError, Stage,
};
