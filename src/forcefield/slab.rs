use std::f64::consts::PI;

use super::{Contributions, ForceFieldTrait, Interaction};
use crate::{interface::Wall, parallel::Domain, utils, ChargeParams, Interface, Ions};

/// Cutoff of the purely repulsive Lennard-Jones potential, in units of sigma^2
const WCA_CUTOFF2: f64 = 1.259_921_049_894_873_2; // 2^(1/3)

/// Electrolyte confined between two charged walls.
///
/// Ions repel each other at contact through a Lennard-Jones potential truncated
/// and shifted at its minimum (WCA) and interact through bare Coulomb forces,
/// using the minimum image along the periodic x and y directions. Each wall
/// excludes ions through a WCA interaction with a dummy ion placed directly
/// behind it, and acts on them with the field of a uniformly charged plane.
#[derive(Clone, Debug)]
pub struct SlabElectrolyte {
    epsilon: f64,
}
impl SlabElectrolyte {
    /// `epsilon` is the Lennard-Jones energy scale, in units of kT
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// WCA force magnitude over r and the potential energy, given r^2 and sigma
    fn wca(&self, r2: f64, sigma: f64) -> Option<(f64, f64)> {
        let sigma2 = sigma * sigma;
        if r2 >= WCA_CUTOFF2 * sigma2 {
            return None;
        }
        // U(r) = 4 eps ((sig/r)^12 - (sig/r)^6) + eps
        // f(r) / r = 48 eps / r^2 ((sig/r)^12 - 0.5 (sig/r)^6)
        let s6 = (sigma2 / r2).powi(3);
        let f_over_r = 48.0 * self.epsilon / r2 * s6 * (s6 - 0.5);
        let energy = 4.0 * self.epsilon * s6 * (s6 - 1.0) + self.epsilon;
        Some((f_over_r, energy))
    }

    fn ion_ion(&self, ions: &Ions, interface: &Interface, i: usize, out: &mut Contributions) {
        let lb = interface.bjerrum_length();
        let posi = &ions.positions[i];
        let qi = ions.charge(i);
        let di = ions.diameter(i);

        let mut force = [0.0; 3];
        let mut energy = 0.0;
        for j in 0..ions.num_ions() {
            if i == j {
                continue;
            }
            // r_ij = r_i - r_j, so a positive f_over_r pushes i away from j
            let r = interface.minimum_image(posi, &ions.positions[j]);
            let r2 = utils::norm_squared(&r);

            let mut f_over_r = 0.0;
            if let Some((f, u)) = self.wca(r2, 0.5 * (di + ions.diameter(j))) {
                f_over_r += f;
                energy += 0.5 * u;
            }

            let qq = lb * qi * ions.charge(j);
            if qq != 0.0 {
                let dist = r2.sqrt();
                f_over_r += qq / (r2 * dist);
                energy += 0.5 * qq / dist;
            }

            force = utils::add_scaled(&force, f_over_r, &r);
        }
        out.add(Interaction::IonIon, i, force, energy);
    }

    fn ion_wall(&self, ions: &Ions, interface: &Interface, i: usize, wall: Wall, out: &mut Contributions) {
        let kind = match wall {
            Wall::Left => Interaction::LeftWall,
            Wall::Right => Interaction::RightWall,
        };
        let di = ions.diameter(i);
        let dummy_z = interface.wall_position(wall) + 0.5 * di * wall.outward();
        let dz = ions.positions[i][2] - dummy_z;

        if let Some((f_over_r, u)) = self.wca(dz * dz, di) {
            out.add(kind, i, [0.0, 0.0, f_over_r * dz], u);
        }
    }

    fn wall_coulomb(
        &self,
        ions: &Ions,
        interface: &Interface,
        i: usize,
        wall: Wall,
        surface_charge: f64,
        out: &mut Contributions,
    ) {
        let kind = match wall {
            Wall::Left => Interaction::LeftWallCoulomb,
            Wall::Right => Interaction::RightWallCoulomb,
        };
        // Field of an infinite plane: U = -2 pi lB q s |z - z_wall|
        let prefactor = 2.0 * PI * interface.bjerrum_length() * ions.charge(i) * surface_charge;
        let dz = ions.positions[i][2] - interface.wall_position(wall);
        out.add(kind, i, [0.0, 0.0, prefactor * dz.signum()], -prefactor * dz.abs());
    }
}

impl ForceFieldTrait for SlabElectrolyte {
    fn evaluate(
        &self,
        ions: &Ions,
        interface: &Interface,
        domain: &Domain,
        charge: &ChargeParams,
        out: &mut Contributions,
    ) {
        out.clear();
        let surface_charge = interface.surface_charge_density(charge.charge_meshpoint);

        for i in domain.range() {
            self.ion_ion(ions, interface, i, out);
            for wall in [Wall::Left, Wall::Right] {
                self.ion_wall(ions, interface, i, wall, out);
                if surface_charge != 0.0 {
                    self.wall_coulomb(ions, interface, i, wall, surface_charge, out);
                }
            }
        }
    }
}
