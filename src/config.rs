use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use crate::{
    forcefield::{ForceField, SlabElectrolyte},
    simulation::System,
    thermostat::ChainSpec,
    ChargeParams, Control, Error, Interface, Ions, Result, Species, ThermostatChain,
};

/// One ion species and how many ions of it to insert
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SpeciesConfig {
    #[serde(flatten)]
    pub species: Species,
    pub count: usize,
}

/// Everything read from a configuration file
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SimulationConfig {
    pub interface: Interface,
    pub species: Vec<SpeciesConfig>,
    pub thermostat: ChainSpec,
    #[serde(default)]
    pub control: Control,
    #[serde(default)]
    pub charge: ChargeParams,
    /// Lennard-Jones energy scale of the excluded-volume interactions
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}
fn default_epsilon() -> f64 {
    1.0
}
fn default_workers() -> usize {
    1
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.interface.validate()?;
        self.control.validate()?;
        for s in &self.species {
            s.species.validate()?;
        }
        if self.workers == 0 {
            return Err(Error::NoWorkers);
        }
        if !(self.epsilon > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "epsilon should be positive, found {}",
                self.epsilon
            )));
        }
        let counterions = self.charge.counterions(self.interface.mesh_points())?;
        if counterions > 0 && self.species.is_empty() {
            return Err(Error::InvalidConfig(String::from(
                "at least one species is needed to size the counterions",
            )));
        }
        if counterions + self.num_ions() == 0 {
            return Err(Error::EmptySystem);
        }
        Ok(())
    }

    /// Number of salt ions, not counting counterions
    pub fn num_ions(&self) -> usize {
        self.species.iter().map(|s| s.count).sum()
    }

    /// Counterions take the diameter and mass of the first species carrying
    /// a charge of the same sign, or of the first species otherwise
    fn counterion_species(&self) -> Option<Species> {
        let valency = self.charge.valency_counterion;
        let template = self
            .species
            .iter()
            .map(|s| &s.species)
            .find(|s| s.valency.signum() == valency.signum())
            .or_else(|| self.species.first().map(|s| &s.species))?;
        Some(Species {
            name: String::from("counterion"),
            valency,
            diameter: template.diameter,
            mass: template.mass,
        })
    }

    /// Place the ions and draw their velocities, both from `seed`
    pub fn build(&self) -> Result<System> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let mut table: Vec<Species> = self.species.iter().map(|s| s.species.clone()).collect();
        let counterions = self.charge.counterions(self.interface.mesh_points())?;
        if counterions > 0 {
            if let Some(species) = self.counterion_species() {
                table.push(species);
            }
        }

        let mut ions = Ions::new(table);
        for (idx, s) in self.species.iter().enumerate() {
            ions.add_random_ions(&self.interface, idx, s.count, &mut rng)?;
        }
        if counterions > 0 {
            ions.add_random_ions(&self.interface, self.species.len(), counterions, &mut rng)?;
            info!("Added {} counterions to neutralize the walls", counterions);
        }

        let net_charge = ions.net_charge() + self.charge.wall_charge(self.interface.mesh_points());
        if net_charge.abs() > 1e-9 {
            warn!("System is not electroneutral, net charge {}", net_charge);
        }

        ions.set_temperature(self.thermostat.temperature, &mut rng);
        let chain = ThermostatChain::new(&self.thermostat, ions.num_ions())?;

        Ok(System {
            ions,
            interface: self.interface.clone(),
            chain,
            force_field: ForceField::from(SlabElectrolyte::new(self.epsilon)),
            control: self.control.clone(),
            charge: self.charge,
        })
    }
}
