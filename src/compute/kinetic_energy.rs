use crate::{utils, Ions};

/// Total kinetic energy of the ions.
///
/// Computed from the replicated velocities, so every worker obtains the same
/// value without communicating.
pub fn kinetic_energy(ions: &Ions) -> f64 {
    0.5 * ions
        .velocities
        .iter()
        .enumerate()
        .map(|(i, v)| ions.mass(i) * utils::norm_squared(v))
        .sum::<f64>()
}
