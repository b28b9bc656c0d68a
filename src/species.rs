use serde::Deserialize;

use crate::{Error, Result};

/// Properties shared by every ion of one kind
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Species {
    pub name: String,
    /// Charge in units of the elementary charge
    pub valency: i32,
    /// Lennard-Jones diameter, in nm
    pub diameter: f64,
    #[serde(default = "default_mass")]
    pub mass: f64,
}
fn default_mass() -> f64 {
    1.0
}
impl Species {
    pub fn new(name: &str, valency: i32, diameter: f64, mass: f64) -> Result<Self> {
        let species = Self {
            name: String::from(name),
            valency,
            diameter,
            mass,
        };
        species.validate()?;
        Ok(species)
    }
    pub fn validate(&self) -> Result<()> {
        if !(self.mass > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "mass of {} should be positive, found {}",
                self.name, self.mass
            )));
        }
        if !(self.diameter > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "diameter of {} should be positive, found {}",
                self.name, self.diameter
            )));
        }
        Ok(())
    }
    pub fn charge(&self) -> f64 {
        self.valency as f64
    }
}
