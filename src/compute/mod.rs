mod kinetic_energy;
mod temperature;

pub use kinetic_energy::kinetic_energy;
pub use temperature::temperature;

use crate::{
    forcefield::{ForceTally, Interaction, NUM_INTERACTIONS},
    ThermostatChain,
};

/// Energies of the system at one step
#[derive(Clone, Debug, PartialEq)]
pub struct EnergySample {
    pub step: usize,
    pub kinetic: f64,
    /// Potential energy of each interaction category, indexed by `Interaction::index`
    pub potential: [f64; NUM_INTERACTIONS],
    /// Energy stored in the thermostat chain
    pub thermostat: f64,
    pub temperature: f64,
}
impl EnergySample {
    pub fn new(
        step: usize,
        kinetic: f64,
        temperature: f64,
        tally: &ForceTally,
        chain: &ThermostatChain,
    ) -> Self {
        Self {
            step,
            kinetic,
            potential: Interaction::ALL.map(|k| tally.energy(k)),
            thermostat: chain.energy(),
            temperature,
        }
    }
    pub fn potential(&self, kind: Interaction) -> f64 {
        self.potential[kind.index()]
    }
    pub fn potential_energy(&self) -> f64 {
        self.potential.iter().sum()
    }
    /// Kinetic plus potential energy of the ions
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential_energy()
    }
    /// Total energy including the thermostat chain, conserved by the dynamics
    pub fn extended(&self) -> f64 {
        self.total() + self.thermostat
    }
    pub fn is_finite(&self) -> bool {
        self.kinetic.is_finite() && self.potential.iter().all(|e| e.is_finite()) && self.thermostat.is_finite()
    }
}
