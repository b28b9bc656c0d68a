pub mod compute;
pub mod config;
pub mod control;
pub mod density;
pub mod error;
pub mod forcefield;
pub mod integrators;
pub mod interface;
pub mod ions;
pub mod launcher;
pub mod output;
pub mod parallel;
pub mod prelude;
pub mod schedule;
pub mod simulation;
pub mod species;
pub mod thermostat;
pub mod utils;

pub use config::SimulationConfig;
pub use control::{ChargeParams, Control};
pub use error::{Error, Result};
pub use forcefield::{ForceField, ForceFieldTrait};
pub use integrators::*;
pub use interface::Interface;
pub use ions::Ions;
pub use launcher::Launcher;
pub use simulation::{RunSummary, Simulation, System};
pub use species::Species;
pub use thermostat::{ChainSpec, ThermostatChain};
