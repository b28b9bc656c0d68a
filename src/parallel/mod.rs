pub mod comm;
mod domain;
mod message;
mod worker;

pub use comm::reduce_contributions;
pub use domain::Domain;
pub(crate) use message::{M2W, W2M};
pub use worker::Worker;

use crate::Result;

/// Rank of the worker that owns console and file output
pub const REPORTER_RANK: usize = 0;

/// Collective operations shared by a fixed group of workers.
///
/// Every worker must issue the same sequence of collective calls; a call
/// blocks until all workers have made it.
pub trait Communicator {
    fn rank(&self) -> usize;
    fn size(&self) -> usize;
    /// Replace `buffer` on every worker by the element-wise sum over all workers
    fn all_reduce_sum(&self, buffer: &mut [f64]) -> Result<()>;

    fn is_reporter(&self) -> bool {
        self.rank() == REPORTER_RANK
    }
}

/// A group of one
#[derive(Clone, Copy, Debug, Default)]
pub struct Serial;
impl Communicator for Serial {
    fn rank(&self) -> usize {
        0
    }
    fn size(&self) -> usize {
        1
    }
    fn all_reduce_sum(&self, _buffer: &mut [f64]) -> Result<()> {
        Ok(())
    }
}
