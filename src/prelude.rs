pub use super::config::{SimulationConfig, SpeciesConfig};
pub use super::control::{ChargeParams, Control};
pub use super::forcefield::{ForceField, ForceFieldTrait, NoInteraction, SlabElectrolyte};
pub use super::interface::{Interface, Wall};
pub use super::ions::Ions;
pub use super::launcher::Launcher;
pub use super::output::{FileRecorder, NullRecorder, Recorder};
pub use super::parallel::{Communicator, Serial, Worker};
pub use super::simulation::{RunSummary, Simulation, System};
pub use super::species::Species;
pub use super::thermostat::{ChainSpec, ThermostatChain};
pub use super::{Error, Result};
