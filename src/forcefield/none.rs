use super::{Contributions, ForceFieldTrait};
use crate::{parallel::Domain, ChargeParams, Interface, Ions};

/// Ions that do not interact with anything
#[derive(Clone, Debug, Default)]
pub struct NoInteraction {}
impl NoInteraction {
    pub fn new() -> Self {
        Self {}
    }
}
impl ForceFieldTrait for NoInteraction {
    fn evaluate(
        &self,
        _ions: &Ions,
        _interface: &Interface,
        _domain: &Domain,
        _charge: &ChargeParams,
        out: &mut Contributions,
    ) {
        out.clear();
    }
}
