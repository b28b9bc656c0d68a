use serde::Deserialize;

use crate::{Error, Result};

/// Bjerrum length in vacuum at room temperature, in nm
pub const VACUUM_BJERRUM_LENGTH: f64 = 56.0;

/// One of the two confining walls
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}
impl Wall {
    /// Sign of the outward normal along z
    pub fn outward(&self) -> f64 {
        match self {
            Wall::Left => -1.0,
            Wall::Right => 1.0,
        }
    }
}

/// Slab confinement: two planar walls at `z = -lz/2` and `z = lz/2`,
/// periodic along x and y.
///
/// Read-only during integration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Interface {
    lx: f64,
    ly: f64,
    lz: f64,
    /// Relative permittivity of the confined medium
    dielectric: f64,
    /// Number of charged mesh points discretizing each wall
    #[serde(default)]
    mesh_points: usize,
}
impl Interface {
    /// Create a new interface from box lengths (nm) and the medium's dielectric constant
    pub fn new(lx: f64, ly: f64, lz: f64, dielectric: f64) -> Result<Self> {
        let interface = Self {
            lx,
            ly,
            lz,
            dielectric,
            mesh_points: 0,
        };
        interface.validate()?;
        Ok(interface)
    }
    pub fn with_mesh_points(mut self, mesh_points: usize) -> Self {
        self.mesh_points = mesh_points;
        self
    }
    pub fn validate(&self) -> Result<()> {
        if !(self.lx > 0.0 && self.ly > 0.0 && self.lz > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "box lengths should be positive, found {} x {} x {}",
                self.lx, self.ly, self.lz
            )));
        }
        if !(self.dielectric > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "dielectric constant should be positive, found {}",
                self.dielectric
            )));
        }
        Ok(())
    }

    // Getters
    pub fn lx(&self) -> f64 {
        self.lx
    }
    pub fn ly(&self) -> f64 {
        self.ly
    }
    pub fn lz(&self) -> f64 {
        self.lz
    }
    pub fn dielectric(&self) -> f64 {
        self.dielectric
    }
    pub fn mesh_points(&self) -> usize {
        self.mesh_points
    }
    pub fn area(&self) -> f64 {
        self.lx * self.ly
    }
    pub fn bjerrum_length(&self) -> f64 {
        VACUUM_BJERRUM_LENGTH / self.dielectric
    }
    /// z coordinate of a wall
    pub fn wall_position(&self, wall: Wall) -> f64 {
        0.5 * self.lz * wall.outward()
    }
    /// Surface charge density of each wall, in e per nm^2
    pub fn surface_charge_density(&self, charge_meshpoint: f64) -> f64 {
        charge_meshpoint * self.mesh_points as f64 / self.area()
    }

    /// Check whether a point of the given diameter fits between the walls
    pub fn contains(&self, coord: &[f64; 3], diameter: f64) -> bool {
        let half = 0.5 * self.lz - 0.5 * diameter;
        coord[2] >= -half && coord[2] <= half
    }

    /// Map a coordinate back into the periodic x and y range
    pub fn wrap(&self, coord: &mut [f64; 3]) {
        for (i, l) in [self.lx, self.ly].into_iter().enumerate() {
            if coord[i] > 0.5 * l {
                coord[i] -= l;
            } else if coord[i] < -0.5 * l {
                coord[i] += l;
            }
        }
    }

    /// Separation vector `a - b` with the minimum image convention along x and y
    pub fn minimum_image(&self, a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
        let mut r = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
        for (i, l) in [self.lx, self.ly].into_iter().enumerate() {
            if r[i] > 0.5 * l {
                r[i] -= l;
            } else if r[i] < -0.5 * l {
                r[i] += l;
            }
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_degenerate_boxes() {
        assert!(Interface::new(0.0, 1.0, 1.0, 78.5).is_err());
        assert!(Interface::new(1.0, 1.0, 1.0, -2.0).is_err());
    }

    #[test]
    fn walls_and_charge() {
        let interface = Interface::new(4.0, 5.0, 3.0, 78.5).unwrap().with_mesh_points(10);
        assert_eq!(interface.wall_position(Wall::Left), -1.5);
        assert_eq!(interface.wall_position(Wall::Right), 1.5);
        assert_relative_eq!(interface.surface_charge_density(-0.02), -0.01);
        assert_relative_eq!(interface.bjerrum_length(), 56.0 / 78.5);
    }

    #[test]
    fn wrapping_and_minimum_image() {
        let interface = Interface::new(10.0, 10.0, 3.0, 78.5).unwrap();
        let mut coord = [5.5, -6.0, 1.0];
        interface.wrap(&mut coord);
        assert_relative_eq!(coord[0], -4.5);
        assert_relative_eq!(coord[1], 4.0);
        assert_eq!(coord[2], 1.0);

        let r = interface.minimum_image(&[4.5, 0.0, 1.0], &[-4.5, 0.0, -1.0]);
        assert_relative_eq!(r[0], -1.0);
        assert_relative_eq!(r[2], 2.0);
    }

    #[test]
    fn containment_accounts_for_diameter() {
        let interface = Interface::new(10.0, 10.0, 3.0, 78.5).unwrap();
        assert!(interface.contains(&[0.0, 0.0, 1.0], 1.0));
        assert!(!interface.contains(&[0.0, 0.0, 1.2], 1.0));
    }
}
