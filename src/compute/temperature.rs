use super::kinetic_energy;
use crate::Ions;

/// Instantaneous temperature, in energy units, from `3N` degrees of freedom
pub fn temperature(ions: &Ions) -> f64 {
    if ions.is_empty() {
        return 0.0;
    }
    2.0 * kinetic_energy(ions) / (3.0 * ions.num_ions() as f64)
}
