use serde::Deserialize;

use crate::{Error, Result};

/// Run parameters, fixed for the whole run
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Control {
    pub timestep: f64,
    pub steps: usize,
    /// Energies are sampled at step 1 and every `extra_compute` steps
    pub extra_compute: usize,
    pub movie_start: usize,
    pub movie_freq: usize,
    /// First step of production, when density sampling begins
    pub hit_equilibrium: usize,
    /// Density profiles are sampled every `freq` production steps
    pub freq: usize,
    /// The running density profile is written every `write_density` steps
    pub write_density: usize,
    pub bins: usize,
    pub verbose: bool,
}
impl Default for Control {
    fn default() -> Self {
        Self {
            timestep: 0.001,
            steps: 20000,
            extra_compute: 100,
            movie_start: 1,
            movie_freq: 100,
            hit_equilibrium: 1000,
            freq: 10,
            write_density: 10000,
            bins: 100,
            verbose: false,
        }
    }
}
impl Control {
    pub fn validate(&self) -> Result<()> {
        if !(self.timestep > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "timestep should be positive, found {}",
                self.timestep
            )));
        }
        let intervals = [
            ("extra_compute", self.extra_compute),
            ("movie_freq", self.movie_freq),
            ("freq", self.freq),
            ("write_density", self.write_density),
            ("bins", self.bins),
        ];
        for (name, value) in intervals {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} should be at least 1", name)));
            }
        }
        Ok(())
    }
}

/// Parameters describing the charge of the confining walls
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChargeParams {
    /// Charge carried by each mesh point of a wall, in e
    pub charge_meshpoint: f64,
    /// Valency of the counterions neutralizing the walls
    pub valency_counterion: i32,
}
impl Default for ChargeParams {
    fn default() -> Self {
        Self {
            charge_meshpoint: 0.0,
            valency_counterion: 1,
        }
    }
}
impl ChargeParams {
    /// Net charge of both walls, in e
    pub fn wall_charge(&self, mesh_points: usize) -> f64 {
        2.0 * self.charge_meshpoint * mesh_points as f64
    }
    /// Number of counterions needed to neutralize both walls
    pub fn counterions(&self, mesh_points: usize) -> Result<usize> {
        let wall_charge = self.wall_charge(mesh_points);
        if wall_charge == 0.0 {
            return Ok(0);
        }
        if self.valency_counterion == 0 || wall_charge * self.valency_counterion as f64 > 0.0 {
            return Err(Error::InvalidConfig(format!(
                "counterions of valency {} cannot neutralize a wall charge of {}",
                self.valency_counterion, wall_charge
            )));
        }
        let count = (wall_charge / self.valency_counterion as f64).abs();
        if (count - count.round()).abs() > 1e-9 {
            return Err(Error::InvalidConfig(format!(
                "wall charge {} is not a multiple of the counterion valency {}",
                wall_charge, self.valency_counterion
            )));
        }
        Ok(count.round() as usize)
    }
}
