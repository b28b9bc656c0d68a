use super::Communicator;
use crate::{
    forcefield::{Contributions, ForceTally, Interaction, NUM_INTERACTIONS},
    Error, Result,
};

/// Number of `f64` values exchanged per ion: three force components and one
/// energy for each interaction category
const VALUES_PER_ION: usize = 4 * NUM_INTERACTIONS;

/// Combine every worker's partial contributions into full-length forces and
/// energies, identical on every worker.
///
/// Each worker scatters its own range into a zero-padded full-length buffer;
/// a single all-reduce then sums the disjoint pieces. `exchange` is scratch
/// space reused between calls.
pub fn reduce_contributions<C>(
    comm: &C,
    partial: &Contributions,
    exchange: &mut Vec<f64>,
    tally: &mut ForceTally,
) -> Result<()>
where
    C: Communicator + ?Sized,
{
    let num_ions = tally.num_ions();
    let range = partial.range();
    if range.end > num_ions {
        return Err(Error::Desynchronized(format!(
            "partial range {:?} exceeds {} ions",
            range, num_ions
        )));
    }

    // Layout: all force blocks (3 * N per category), then all energy blocks (N per category)
    let force_block = 3 * num_ions;
    let energy_offset = NUM_INTERACTIONS * force_block;
    exchange.clear();
    exchange.resize(VALUES_PER_ION * num_ions, 0.0);

    for kind in Interaction::ALL {
        let k = kind.index();
        let forces = partial.forces(kind);
        let energies = partial.energies(kind);
        for (local, i) in range.clone().enumerate() {
            let base = k * force_block + 3 * i;
            exchange[base..base + 3].copy_from_slice(&forces[local]);
            exchange[energy_offset + k * num_ions + i] = energies[local];
        }
    }

    comm.all_reduce_sum(exchange)?;

    for kind in Interaction::ALL {
        let k = kind.index();
        for (i, f) in tally.forces_mut(kind).iter_mut().enumerate() {
            let base = k * force_block + 3 * i;
            *f = [exchange[base], exchange[base + 1], exchange[base + 2]];
        }
        let energies = &exchange[energy_offset + k * num_ions..energy_offset + (k + 1) * num_ions];
        tally.energies_mut(kind).copy_from_slice(energies);
    }
    tally.sum_categories();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::{Domain, Serial};

    #[test]
    fn serial_reduction_copies_the_partial_result() {
        let domain = Domain::new(3, 1, 0).unwrap();
        let mut partial = Contributions::new(&domain);
        partial.add(Interaction::IonIon, 1, [1.0, 2.0, 3.0], 0.5);
        partial.add(Interaction::RightWall, 1, [0.0, 0.0, -1.0], 0.25);
        partial.add(Interaction::LeftWallCoulomb, 2, [0.0, 0.0, 4.0], -1.0);

        let mut tally = ForceTally::new(3);
        let mut exchange = Vec::new();
        reduce_contributions(&Serial, &partial, &mut exchange, &mut tally).unwrap();

        assert_eq!(tally.forces(Interaction::IonIon)[1], [1.0, 2.0, 3.0]);
        assert_eq!(tally.total_forces()[1], [1.0, 2.0, 2.0]);
        assert_eq!(tally.total_forces()[2], [0.0, 0.0, 4.0]);
        assert_eq!(tally.total_forces()[0], [0.0; 3]);
        assert_eq!(tally.energy(Interaction::RightWall), 0.25);
        assert_eq!(tally.potential_energy(), -0.25);
    }

    #[test]
    fn mismatched_tally_is_rejected() {
        let domain = Domain::new(4, 1, 0).unwrap();
        let partial = Contributions::new(&domain);
        let mut tally = ForceTally::new(2);
        let result = reduce_contributions(&Serial, &partial, &mut Vec::new(), &mut tally);
        assert!(matches!(result, Err(Error::Desynchronized(_))));
    }
}
