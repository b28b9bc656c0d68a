use std::ops::Range;

use crate::parallel::Domain;

/// Interaction categories, each reduced and reported separately
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interaction {
    /// Lennard-Jones and Coulomb interactions between ions
    IonIon,
    /// Excluded volume of the left wall
    LeftWall,
    /// Excluded volume of the right wall
    RightWall,
    /// Field of the left wall's surface charge
    LeftWallCoulomb,
    /// Field of the right wall's surface charge
    RightWallCoulomb,
}
pub const NUM_INTERACTIONS: usize = 5;
impl Interaction {
    pub const ALL: [Interaction; NUM_INTERACTIONS] = [
        Interaction::IonIon,
        Interaction::LeftWall,
        Interaction::RightWall,
        Interaction::LeftWallCoulomb,
        Interaction::RightWallCoulomb,
    ];
    pub fn index(&self) -> usize {
        match self {
            Interaction::IonIon => 0,
            Interaction::LeftWall => 1,
            Interaction::RightWall => 2,
            Interaction::LeftWallCoulomb => 3,
            Interaction::RightWallCoulomb => 4,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::IonIon => "ion-ion",
            Interaction::LeftWall => "ion-left-wall",
            Interaction::RightWall => "ion-right-wall",
            Interaction::LeftWallCoulomb => "left-wall-coulomb",
            Interaction::RightWallCoulomb => "right-wall-coulomb",
        }
    }
}

/// Partial forces and energies computed by one worker, covering only the
/// ions of its domain. Index 0 of each vector is the domain's lower bound.
#[derive(Clone, Debug)]
pub struct Contributions {
    range: Range<usize>,
    forces: [Vec<[f64; 3]>; NUM_INTERACTIONS],
    energies: [Vec<f64>; NUM_INTERACTIONS],
}
impl Contributions {
    pub fn new(domain: &Domain) -> Self {
        let len = domain.len();
        Self {
            range: domain.range(),
            forces: std::array::from_fn(|_| vec![[0.0; 3]; len]),
            energies: std::array::from_fn(|_| vec![0.0; len]),
        }
    }
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }
    pub fn forces(&self, kind: Interaction) -> &Vec<[f64; 3]> {
        &self.forces[kind.index()]
    }
    pub fn energies(&self, kind: Interaction) -> &Vec<f64> {
        &self.energies[kind.index()]
    }
    pub fn clear(&mut self) {
        self.forces
            .iter_mut()
            .for_each(|f| f.iter_mut().for_each(|x| *x = [0.0; 3]));
        self.energies
            .iter_mut()
            .for_each(|e| e.iter_mut().for_each(|x| *x = 0.0));
    }
    /// Add a force and an energy to ion `i`, given by its global index
    pub fn add(&mut self, kind: Interaction, i: usize, force: [f64; 3], energy: f64) {
        let local = i - self.range.start;
        let f = &mut self.forces[kind.index()][local];
        f[0] += force[0];
        f[1] += force[1];
        f[2] += force[2];
        self.energies[kind.index()][local] += energy;
    }
}

/// Forces and energies of every ion after the reduction, identical on every worker
#[derive(Clone, Debug, PartialEq)]
pub struct ForceTally {
    forces: [Vec<[f64; 3]>; NUM_INTERACTIONS],
    energies: [Vec<f64>; NUM_INTERACTIONS],
    total_forces: Vec<[f64; 3]>,
}
impl ForceTally {
    pub fn new(num_ions: usize) -> Self {
        Self {
            forces: std::array::from_fn(|_| vec![[0.0; 3]; num_ions]),
            energies: std::array::from_fn(|_| vec![0.0; num_ions]),
            total_forces: vec![[0.0; 3]; num_ions],
        }
    }
    pub fn num_ions(&self) -> usize {
        self.total_forces.len()
    }
    pub fn forces(&self, kind: Interaction) -> &Vec<[f64; 3]> {
        &self.forces[kind.index()]
    }
    pub fn energies(&self, kind: Interaction) -> &Vec<f64> {
        &self.energies[kind.index()]
    }
    /// Force on every ion summed over all categories
    pub fn total_forces(&self) -> &Vec<[f64; 3]> {
        &self.total_forces
    }
    pub fn energy(&self, kind: Interaction) -> f64 {
        self.energies[kind.index()].iter().sum()
    }
    pub fn potential_energy(&self) -> f64 {
        Interaction::ALL.iter().map(|k| self.energy(*k)).sum()
    }

    pub(crate) fn forces_mut(&mut self, kind: Interaction) -> &mut Vec<[f64; 3]> {
        &mut self.forces[kind.index()]
    }
    pub(crate) fn energies_mut(&mut self, kind: Interaction) -> &mut Vec<f64> {
        &mut self.energies[kind.index()]
    }
    /// Recompute the summed forces, always adding categories in the same order
    pub(crate) fn sum_categories(&mut self) {
        for i in 0..self.total_forces.len() {
            let mut total = [0.0; 3];
            for kind in Interaction::ALL {
                let f = self.forces[kind.index()][i];
                total[0] += f[0];
                total[1] += f[1];
                total[2] += f[2];
            }
            self.total_forces[i] = total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_all() {
        for (i, kind) in Interaction::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn contributions_are_local_to_the_domain() {
        let domain = Domain::new(10, 3, 1).unwrap();
        let mut partial = Contributions::new(&domain);
        assert_eq!(partial.forces(Interaction::IonIon).len(), domain.len());

        partial.add(Interaction::LeftWall, domain.lower_bound(), [1.0, 0.0, 0.0], 2.0);
        partial.add(Interaction::LeftWall, domain.lower_bound(), [1.0, 0.0, 0.0], 2.0);
        assert_eq!(partial.forces(Interaction::LeftWall)[0], [2.0, 0.0, 0.0]);
        assert_eq!(partial.energies(Interaction::LeftWall)[0], 4.0);

        partial.clear();
        assert_eq!(partial.energies(Interaction::LeftWall)[0], 0.0);
    }
}
