use crate::{compute, Interface, Ions, ThermostatChain};

/// Velocity-Verlet integrator coupled to a Nose-Hoover chain.
///
/// A step is split around the force computation: `pre_force` moves the ions
/// to their new positions, `post_force` completes the velocities with the
/// forces at those positions. The chain is updated with the outer-to-inner
/// pass before and the inner-to-outer pass after, which keeps the step
/// time-reversible.
#[derive(Clone, Debug)]
pub struct NoseHooverVerlet {
    timestep: f64,
    chain: ThermostatChain,
    particle_ke: f64,
    expfac: f64,
}
impl NoseHooverVerlet {
    pub fn new(timestep: f64, chain: ThermostatChain) -> Self {
        Self {
            timestep,
            chain,
            particle_ke: 0.0,
            expfac: 1.0,
        }
    }
    pub fn timestep(&self) -> f64 {
        self.timestep
    }
    pub fn chain(&self) -> &ThermostatChain {
        &self.chain
    }
    /// Kinetic energy of the ions after the last completed step
    pub fn particle_ke(&self) -> f64 {
        self.particle_ke
    }

    /// Record the kinetic energy of the initial velocities
    pub fn init(&mut self, ions: &Ions) {
        self.particle_ke = compute::kinetic_energy(ions);
        self.expfac = self.chain.expfac(self.timestep);
    }

    /// Thermostat half-step, velocity half-kick and position update
    pub fn pre_force(&mut self, ions: &mut Ions, forces: &[[f64; 3]], interface: &Interface) {
        let dt = self.timestep;
        self.chain.reverse_pass(dt, self.particle_ke);
        self.chain.update_eta(dt);
        self.expfac = self.chain.expfac(dt);

        Self::half_kick(ions, forces, dt, self.expfac);
        Self::drift(ions, dt, interface);
    }

    /// Velocity half-kick with the new forces and thermostat half-step
    pub fn post_force(&mut self, ions: &mut Ions, forces: &[[f64; 3]]) {
        let dt = self.timestep;
        // xi_0 has not changed since pre_force
        self.expfac = self.chain.expfac(dt);
        Self::half_kick(ions, forces, dt, self.expfac);

        self.particle_ke = compute::kinetic_energy(ions);
        self.chain.update_eta(dt);
        self.chain.forward_pass(dt, self.particle_ke);
    }

    /// `v <- v * expfac + dt/2 * F/m * sqrt(expfac)`
    fn half_kick(ions: &mut Ions, forces: &[[f64; 3]], dt: f64, expfac: f64) {
        let kick = 0.5 * dt * expfac.sqrt();
        for i in 0..ions.num_ions() {
            let scale = kick / ions.mass(i);
            let v = &mut ions.velocities[i];
            v[0] = v[0] * expfac + scale * forces[i][0];
            v[1] = v[1] * expfac + scale * forces[i][1];
            v[2] = v[2] * expfac + scale * forces[i][2];
        }
    }

    /// `x <- x + dt * v`, wrapped into the periodic directions
    fn drift(ions: &mut Ions, dt: f64, interface: &Interface) {
        for (x, v) in ions.positions.iter_mut().zip(ions.velocities.iter()) {
            x[0] += dt * v[0];
            x[1] += dt * v[1];
            x[2] += dt * v[2];
            interface.wrap(x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{thermostat::ChainSpec, Species};
    use approx::assert_relative_eq;

    fn free_ion(velocity: [f64; 3]) -> (Ions, Interface) {
        let mut ions = Ions::new(vec![Species::new("A", 0, 1.0, 2.0).unwrap()]);
        ions.add_ions(0, vec![[0.0; 3]]);
        ions.velocities[0] = velocity;
        (ions, Interface::new(10.0, 10.0, 10.0, 78.5).unwrap())
    }

    #[test]
    fn free_flight_without_thermostat() {
        let (mut ions, interface) = free_ion([1.0, -2.0, 0.5]);
        let mut verlet = NoseHooverVerlet::new(0.1, ThermostatChain::uncoupled(1.0, 1));
        verlet.init(&ions);
        let forces = vec![[0.0; 3]];
        for _ in 0..10 {
            verlet.pre_force(&mut ions, &forces, &interface);
            verlet.post_force(&mut ions, &forces);
        }
        assert_relative_eq!(ions.positions[0][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ions.positions[0][1], -2.0, epsilon = 1e-12);
        assert_relative_eq!(ions.positions[0][2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(verlet.particle_ke(), 0.5 * 2.0 * 5.25);
    }

    #[test]
    fn constant_force_is_integrated_exactly() {
        let (mut ions, interface) = free_ion([0.0; 3]);
        let mut verlet = NoseHooverVerlet::new(0.01, ThermostatChain::uncoupled(1.0, 1));
        verlet.init(&ions);
        // a = F/m = 1
        let forces = vec![[0.0, 0.0, 2.0]];
        for _ in 0..100 {
            verlet.pre_force(&mut ions, &forces, &interface);
            verlet.post_force(&mut ions, &forces);
        }
        assert_relative_eq!(ions.velocities[0][2], 1.0, epsilon = 1e-12);
        assert_relative_eq!(ions.positions[0][2], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn periodic_directions_wrap() {
        let (mut ions, interface) = free_ion([80.0, 0.0, 0.0]);
        let mut verlet = NoseHooverVerlet::new(0.1, ThermostatChain::uncoupled(1.0, 1));
        verlet.init(&ions);
        verlet.pre_force(&mut ions, &[[0.0; 3]], &interface);
        assert_relative_eq!(ions.positions[0][0], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn thermostat_cools_hot_ions() {
        let (mut ions, interface) = free_ion([3.0, 3.0, 3.0]);
        let spec = ChainSpec {
            chain_length: 3,
            temperature: 1.0,
            mass: 1.0,
        };
        let mut verlet = NoseHooverVerlet::new(0.01, ThermostatChain::new(&spec, 1).unwrap());
        verlet.init(&ions);
        let initial = verlet.particle_ke();
        let forces = vec![[0.0; 3]];
        for _ in 0..50 {
            verlet.pre_force(&mut ions, &forces, &interface);
            verlet.post_force(&mut ions, &forces);
        }
        assert!(verlet.particle_ke() < initial);
        assert!(verlet.chain().main().xi > 0.0);
    }
}
