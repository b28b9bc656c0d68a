use std::{cell::Cell, sync::mpsc};

use log::debug;

use super::{Communicator, M2W, W2M};
use crate::{Error, Result};

/// Channels for communication between one worker thread and the manager
pub struct Worker {
    rank: usize,
    size: usize,
    rx: mpsc::Receiver<M2W>,
    tx: mpsc::Sender<W2M>,
    completed: Cell<bool>,
}
impl Worker {
    pub(crate) fn new(
        rank: usize,
        size: usize,
        rx: mpsc::Receiver<M2W>,
        tx: mpsc::Sender<W2M>,
    ) -> Self {
        Self {
            rank,
            size,
            rx,
            tx,
            completed: Cell::new(false),
        }
    }
    /// Mark the worker's run as successful; reported to the manager on drop
    pub(crate) fn complete(&self) {
        self.completed.set(true);
    }
    fn send(&self, message: W2M) -> Result<()> {
        self.tx.send(message).map_err(|_| Error::Disconnected)
    }
    fn recv(&self) -> Result<M2W> {
        self.rx.recv().map_err(|_| Error::Disconnected)
    }
}
impl Communicator for Worker {
    fn rank(&self) -> usize {
        self.rank
    }
    fn size(&self) -> usize {
        self.size
    }
    fn all_reduce_sum(&self, buffer: &mut [f64]) -> Result<()> {
        self.send(W2M::Reduce {
            rank: self.rank,
            data: buffer.to_vec(),
        })?;
        match self.recv()? {
            M2W::Reduced(sum) => {
                if sum.len() != buffer.len() {
                    return Err(Error::Desynchronized(format!(
                        "worker {} expected {} values, received {}",
                        self.rank,
                        buffer.len(),
                        sum.len()
                    )));
                }
                buffer.copy_from_slice(&sum);
                Ok(())
            }
        }
    }
}
impl Drop for Worker {
    // Also runs while unwinding from a panic
    fn drop(&mut self) {
        debug!("worker {} exiting, completed: {}", self.rank, self.completed.get());
        let _ = self.tx.send(W2M::Exited {
            rank: self.rank,
            completed: self.completed.get(),
        });
    }
}
