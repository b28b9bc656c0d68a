pub mod contributions;
pub mod none;
pub mod slab;

pub use contributions::{Contributions, ForceTally, Interaction, NUM_INTERACTIONS};
pub use none::NoInteraction;
pub use slab::SlabElectrolyte;

use enum_dispatch::enum_dispatch;

use crate::{parallel::Domain, ChargeParams, Interface, Ions};

/// Partitioned force and energy evaluation.
///
/// Implementations fill `out` for the ions of `domain` only, reading the full
/// (replicated) ion array, and never modify ion state.
#[enum_dispatch]
pub trait ForceFieldTrait {
    fn evaluate(
        &self,
        ions: &Ions,
        interface: &Interface,
        domain: &Domain,
        charge: &ChargeParams,
        out: &mut Contributions,
    );
}

#[enum_dispatch(ForceFieldTrait)]
#[derive(Clone, Debug)]
pub enum ForceField {
    SlabElectrolyte,
    NoInteraction,
}
