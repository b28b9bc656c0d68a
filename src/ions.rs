use rand::Rng;
use rand_distr::StandardNormal;

use crate::{compute, utils, Error, Interface, Result, Species};

const MAX_PLACEMENT_ATTEMPTS: usize = 100_000;

/// Ion properties during simulation, not including forces.
///
/// Every worker holds an identical full copy, kept consistent by applying the
/// same deterministic updates to the same reduced forces.
#[derive(Clone, Debug, PartialEq)]
pub struct Ions {
    pub positions: Vec<[f64; 3]>,
    pub velocities: Vec<[f64; 3]>,
    species: Vec<usize>,
    species_table: Vec<Species>,
}
impl Ions {
    pub fn new(species_table: Vec<Species>) -> Self {
        Ions {
            positions: Vec::new(),
            velocities: Vec::new(),
            species: Vec::new(),
            species_table,
        }
    }
    pub fn num_ions(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    pub fn positions(&self) -> &Vec<[f64; 3]> {
        &self.positions
    }
    pub fn velocities(&self) -> &Vec<[f64; 3]> {
        &self.velocities
    }
    pub fn species(&self, idx: usize) -> &Species {
        &self.species_table[self.species[idx]]
    }
    pub fn species_index(&self, idx: usize) -> usize {
        self.species[idx]
    }
    pub fn mass(&self, idx: usize) -> f64 {
        self.species(idx).mass
    }
    pub fn charge(&self, idx: usize) -> f64 {
        self.species(idx).charge()
    }
    pub fn diameter(&self, idx: usize) -> f64 {
        self.species(idx).diameter
    }
    /// Sum of all ion charges, in e
    pub fn net_charge(&self) -> f64 {
        (0..self.num_ions()).map(|i| self.charge(i)).sum()
    }

    pub fn add_ions(&mut self, species: usize, coords: Vec<[f64; 3]>) {
        let num_ions = coords.len();
        self.species.reserve(num_ions);
        self.velocities.reserve(num_ions);
        self.positions.reserve(num_ions);

        for coord in coords {
            self.species.push(species);
            self.velocities.push([0.0, 0.0, 0.0]);
            self.positions.push(coord);
        }
    }

    /// Insert ions at random positions inside the slab, rejecting any
    /// position that overlaps an ion already present
    pub fn add_random_ions<R: Rng>(
        &mut self,
        interface: &Interface,
        species: usize,
        num_ions: usize,
        rng: &mut R,
    ) -> Result<()> {
        let diameter = self.species_table[species].diameter;
        let zmax = 0.5 * (interface.lz() - diameter);
        if zmax <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "{} ions of diameter {} do not fit in a slab of width {}",
                self.species_table[species].name,
                diameter,
                interface.lz()
            )));
        }

        for index in 0..num_ions {
            let mut placed = None;
            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let coord = [
                    (rng.gen::<f64>() - 0.5) * interface.lx(),
                    (rng.gen::<f64>() - 0.5) * interface.ly(),
                    (2.0 * rng.gen::<f64>() - 1.0) * zmax,
                ];
                let overlaps = (0..self.num_ions()).any(|j| {
                    let contact = 0.5 * (diameter + self.diameter(j));
                    let r = interface.minimum_image(&coord, &self.positions[j]);
                    utils::norm_squared(&r) < contact * contact
                });
                if !overlaps {
                    placed = Some(coord);
                    break;
                }
            }
            match placed {
                Some(coord) => self.add_ions(species, vec![coord]),
                None => {
                    return Err(Error::Placement {
                        species: self.species_table[species].name.clone(),
                        index,
                    })
                }
            }
        }
        Ok(())
    }

    /// Draw Maxwell-Boltzmann velocities at the given temperature, remove the
    /// centre-of-mass drift and rescale to the exact temperature.
    ///
    /// A non-positive temperature leaves every ion at rest.
    pub fn set_temperature<R: Rng>(&mut self, temperature: f64, rng: &mut R) {
        if temperature <= 0.0 || self.is_empty() {
            self.velocities.iter_mut().for_each(|v| *v = [0.0; 3]);
            return;
        }
        for i in 0..self.num_ions() {
            let sigma = (temperature / self.mass(i)).sqrt();
            self.velocities[i] = [
                sigma * rng.sample::<f64, _>(StandardNormal),
                sigma * rng.sample::<f64, _>(StandardNormal),
                sigma * rng.sample::<f64, _>(StandardNormal),
            ];
        }

        if self.num_ions() > 1 {
            let total_mass: f64 = (0..self.num_ions()).map(|i| self.mass(i)).sum();
            let mut momentum = [0.0; 3];
            for i in 0..self.num_ions() {
                momentum = utils::add_scaled(&momentum, self.mass(i), &self.velocities[i]);
            }
            let drift = utils::scale(1.0 / total_mass, &momentum);
            self.velocities
                .iter_mut()
                .for_each(|v| *v = utils::add_scaled(v, -1.0, &drift));
        }

        let current = compute::temperature(self);
        if current > 0.0 {
            let factor = (temperature / current).sqrt();
            self.velocities
                .iter_mut()
                .for_each(|v| *v = utils::scale(factor, v));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn salt() -> Vec<Species> {
        vec![
            Species::new("Na", 1, 0.474, 1.0).unwrap(),
            Species::new("Cl", -1, 0.474, 2.0).unwrap(),
        ]
    }

    #[test]
    fn random_ions_do_not_overlap() {
        let interface = Interface::new(4.0, 4.0, 3.0, 78.5).unwrap();
        let mut ions = Ions::new(salt());
        let mut rng = StdRng::seed_from_u64(7);
        ions.add_random_ions(&interface, 0, 20, &mut rng).unwrap();
        ions.add_random_ions(&interface, 1, 20, &mut rng).unwrap();

        assert_eq!(ions.num_ions(), 40);
        assert_eq!(ions.net_charge(), 0.0);
        for i in 0..ions.num_ions() {
            assert!(interface.contains(&ions.positions[i], ions.diameter(i)));
            for j in 0..i {
                let r = interface.minimum_image(&ions.positions[i], &ions.positions[j]);
                assert!(utils::norm_squared(&r).sqrt() >= 0.474 - 1e-12);
            }
        }
    }

    #[test]
    fn same_seed_same_ions() {
        let interface = Interface::new(4.0, 4.0, 3.0, 78.5).unwrap();
        let build = || {
            let mut ions = Ions::new(salt());
            let mut rng = StdRng::seed_from_u64(11);
            ions.add_random_ions(&interface, 0, 5, &mut rng).unwrap();
            ions.set_temperature(1.0, &mut rng);
            ions
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn velocities_match_target_temperature() {
        let mut ions = Ions::new(salt());
        ions.add_ions(0, vec![[0.0; 3]; 10]);
        ions.add_ions(1, vec![[1.0; 3]; 10]);
        ions.set_temperature(1.5, &mut StdRng::seed_from_u64(3));

        assert_relative_eq!(compute::temperature(&ions), 1.5, epsilon = 1e-12);
        let mut momentum = [0.0; 3];
        for i in 0..ions.num_ions() {
            momentum = utils::add_scaled(&momentum, ions.mass(i), &ions.velocities[i]);
        }
        assert!(utils::norm_squared(&momentum) < 1e-20);
    }

    #[test]
    fn zero_temperature_means_rest() {
        let mut ions = Ions::new(salt());
        ions.add_ions(0, vec![[0.0; 3]; 3]);
        ions.set_temperature(0.0, &mut StdRng::seed_from_u64(3));
        assert!(ions.velocities.iter().all(|v| *v == [0.0; 3]));
    }
}
