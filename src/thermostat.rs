use serde::Deserialize;

use crate::{Error, Result};

/// One link of a Nose-Hoover chain
#[derive(Clone, Debug, PartialEq)]
pub struct Thermostat {
    /// Friction coordinate
    pub xi: f64,
    /// Auxiliary position
    pub eta: f64,
    /// Target temperature, in energy units
    pub temperature: f64,
    /// Thermostat mass; zero means the link is not coupled
    pub mass: f64,
    pub dof: f64,
}
impl Thermostat {
    pub fn new(mass: f64, temperature: f64, dof: f64) -> Self {
        Self {
            xi: 0.0,
            eta: 0.0,
            temperature,
            mass,
            dof,
        }
    }
    /// A link that never moves
    pub fn uncoupled(temperature: f64, dof: f64) -> Self {
        Self::new(0.0, temperature, dof)
    }
    pub fn is_coupled(&self) -> bool {
        self.mass > 0.0
    }

    /// Half-step propagation of the auxiliary position
    pub fn update_eta(&mut self, dt: f64) {
        if !self.is_coupled() {
            return;
        }
        self.eta += 0.5 * dt * self.xi;
    }

    /// Half-step propagation of the friction coordinate, driven by `twice_ke`
    /// (twice the kinetic energy of whatever this link thermostats) and damped
    /// by the next link's friction
    fn update_xi(&mut self, twice_ke: f64, dt: f64, xi_next: f64) {
        let force = (twice_ke - self.dof * self.temperature) / self.mass;
        self.xi = self.xi * (-0.5 * dt * xi_next).exp()
            + 0.5 * dt * force * (-0.25 * dt * xi_next).exp();
    }

    /// Kinetic plus potential energy of the link
    pub fn energy(&self) -> f64 {
        if !self.is_coupled() {
            return 0.0;
        }
        0.5 * self.mass * self.xi * self.xi + self.dof * self.temperature * self.eta
    }
}

/// Parameters used to build a chain
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ChainSpec {
    /// Number of links, L + 1, including the terminating uncoupled link
    pub chain_length: usize,
    pub temperature: f64,
    /// Mass Q of the link coupled to the ions
    pub mass: f64,
}

/// Nose-Hoover chain coupled to the ion kinetic energy.
///
/// Only built through `new` and `uncoupled`, so it always has at least one link.
///
/// Replicated on every worker: each worker applies the same updates driven by
/// the same kinetic energy, so the chain is never communicated.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermostatChain {
    links: Vec<Thermostat>,
}
impl ThermostatChain {
    /// Build a chain of `chain_length` links for `num_ions` ions.
    ///
    /// A single link is uncoupled and leaves the dynamics microcanonical.
    /// Otherwise the first link has mass `mass` and `3N` degrees of freedom,
    /// the middle links mass `mass / 3N` and one degree of freedom, and the
    /// last link is uncoupled and terminates the chain.
    pub fn new(spec: &ChainSpec, num_ions: usize) -> Result<Self> {
        if spec.chain_length == 0 {
            return Err(Error::InvalidConfig(String::from(
                "thermostat chain length should be at least 1",
            )));
        }
        if spec.temperature < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "temperature should not be negative, found {}",
                spec.temperature
            )));
        }
        let dof = 3.0 * num_ions as f64;
        if spec.chain_length == 1 {
            return Ok(Self::uncoupled(spec.temperature, num_ions));
        }
        if !(spec.mass > 0.0) || dof == 0.0 {
            return Err(Error::InvalidConfig(format!(
                "thermostat mass should be positive, found {}",
                spec.mass
            )));
        }

        let mut links = Vec::with_capacity(spec.chain_length);
        links.push(Thermostat::new(spec.mass, spec.temperature, dof));
        while links.len() < spec.chain_length - 1 {
            links.push(Thermostat::new(spec.mass / dof, spec.temperature, 1.0));
        }
        links.push(Thermostat::uncoupled(spec.temperature, dof));
        Ok(Self { links })
    }
    /// A chain that exerts no friction
    pub fn uncoupled(temperature: f64, num_ions: usize) -> Self {
        Self {
            links: vec![Thermostat::uncoupled(temperature, 3.0 * num_ions as f64)],
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
    pub fn links(&self) -> &Vec<Thermostat> {
        &self.links
    }
    /// The link coupled to the ions
    pub fn main(&self) -> &Thermostat {
        &self.links[0]
    }
    pub fn temperature(&self) -> f64 {
        self.links[0].temperature
    }
    pub fn is_coupled(&self) -> bool {
        self.links.iter().any(|l| l.is_coupled())
    }

    /// Half-step update of link `j`'s friction: link 0 is driven by the ion
    /// kinetic energy, link `j > 0` by the kinetic energy of link `j - 1`.
    ///
    /// `j` must be less than `len()`.
    pub fn update_chain_xi(&mut self, j: usize, dt: f64, particle_ke: f64) {
        if !self.links[j].is_coupled() {
            return;
        }
        let xi_next = self.links.get(j + 1).map_or(0.0, |l| l.xi);
        let twice_ke = if j == 0 {
            2.0 * particle_ke
        } else {
            let prev = &self.links[j - 1];
            prev.mass * prev.xi * prev.xi
        };
        self.links[j].update_xi(twice_ke, dt, xi_next);
    }
    pub fn update_eta(&mut self, dt: f64) {
        self.links.iter_mut().for_each(|l| l.update_eta(dt));
    }
    /// Update frictions from the outermost link inwards
    pub fn reverse_pass(&mut self, dt: f64, particle_ke: f64) {
        for j in (0..self.links.len()).rev() {
            self.update_chain_xi(j, dt, particle_ke);
        }
    }
    /// Update frictions from the innermost link outwards
    pub fn forward_pass(&mut self, dt: f64, particle_ke: f64) {
        for j in 0..self.links.len() {
            self.update_chain_xi(j, dt, particle_ke);
        }
    }

    /// Velocity scaling over half a step due to the friction of the first link
    pub fn expfac(&self, dt: f64) -> f64 {
        (-0.5 * dt * self.links[0].xi).exp()
    }
    /// Energy stored in the chain; conserved together with the ion energy
    pub fn energy(&self) -> f64 {
        self.links.iter().map(|l| l.energy()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spec(chain_length: usize) -> ChainSpec {
        ChainSpec {
            chain_length,
            temperature: 1.0,
            mass: 2.0,
        }
    }

    #[test]
    fn chain_layout() {
        let chain = ThermostatChain::new(&spec(5), 10).unwrap();
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.links()[0].mass, 2.0);
        assert_eq!(chain.links()[0].dof, 30.0);
        for link in &chain.links()[1..4] {
            assert_relative_eq!(link.mass, 2.0 / 30.0);
            assert_eq!(link.dof, 1.0);
        }
        assert!(!chain.links()[4].is_coupled());

        let nve = ThermostatChain::new(&spec(1), 10).unwrap();
        assert_eq!(nve.len(), 1);
        assert!(!nve.is_coupled());
        assert!(ThermostatChain::new(&spec(0), 10).is_err());
    }

    #[test]
    fn chains_always_have_a_main_link() {
        for length in 1..6 {
            let chain = ThermostatChain::new(&spec(length), 3).unwrap();
            assert!(!chain.is_empty());
            assert_eq!(chain.main().temperature, 1.0);
            assert_eq!(chain.expfac(0.01), 1.0);
        }
        let uncoupled = ThermostatChain::uncoupled(2.0, 0);
        assert_eq!(uncoupled.len(), 1);
        assert_eq!(uncoupled.temperature(), 2.0);
    }

    #[test]
    fn hot_ions_raise_friction() {
        let mut chain = ThermostatChain::new(&spec(3), 10).unwrap();
        // target kinetic energy is dof * T / 2 = 15
        chain.forward_pass(0.01, 30.0);
        assert!(chain.main().xi > 0.0);
        assert!(chain.expfac(0.01) < 1.0);

        let mut cold = ThermostatChain::new(&spec(3), 10).unwrap();
        cold.forward_pass(0.01, 5.0);
        assert!(cold.main().xi < 0.0);
    }

    #[test]
    fn uncoupled_chain_never_moves() {
        let mut chain = ThermostatChain::uncoupled(1.0, 4);
        for _ in 0..10 {
            chain.reverse_pass(0.01, 100.0);
            chain.update_eta(0.01);
            chain.forward_pass(0.01, 100.0);
        }
        assert_eq!(chain.main().xi, 0.0);
        assert_eq!(chain.expfac(0.01), 1.0);
        assert_eq!(chain.energy(), 0.0);
    }

    #[test]
    fn forward_then_backward_restores_friction() {
        let mut chain = ThermostatChain::new(&spec(4), 8).unwrap();
        for _ in 0..5 {
            chain.forward_pass(0.005, 17.0);
        }
        let before = chain.clone();

        chain.forward_pass(0.005, 9.0);
        assert_ne!(chain, before);
        chain.reverse_pass(-0.005, 9.0);

        for (a, b) in chain.links().iter().zip(before.links()) {
            assert_relative_eq!(a.xi, b.xi, epsilon = 1e-12);
        }
    }
}
