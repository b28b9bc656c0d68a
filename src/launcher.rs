use std::{sync::mpsc, thread};

use log::{debug, error};

use crate::{
    parallel::{Communicator, Worker, M2W, W2M},
    Error, Result,
};

/// Main app, used to run a function through a fixed group of parallel workers.
///
/// Each worker runs on its own thread with a `Worker` communicator; the
/// calling thread acts as the manager that performs the reductions.
pub struct Launcher {
    num_workers: usize,
}
impl Launcher {
    pub fn new(num_workers: usize) -> Result<Self> {
        if num_workers == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(Self { num_workers })
    }
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run `f` once on every worker and return the results in rank order.
    ///
    /// If any worker fails, the others are disconnected at their next
    /// collective call and the first root-cause error is returned.
    pub fn run<F, R>(&self, f: F) -> Result<Vec<R>>
    where
        F: Fn(&Worker) -> Result<R> + Sync,
        R: Send,
    {
        let (tx, rx) = mpsc::channel();
        let mut to_workers = Vec::with_capacity(self.num_workers);
        let mut workers = Vec::with_capacity(self.num_workers);
        for rank in 0..self.num_workers {
            let (tx2, rx2) = mpsc::channel();
            to_workers.push(tx2);
            workers.push(Worker::new(rank, self.num_workers, rx2, tx.clone()));
        }
        drop(tx);

        thread::scope(|s| {
            let f = &f;
            let handles: Vec<_> = workers
                .into_iter()
                .map(|worker| {
                    s.spawn(move || {
                        debug!("worker {} started", worker.rank());
                        let result = f(&worker);
                        if result.is_ok() {
                            worker.complete();
                        }
                        result
                    })
                })
                .collect();

            let relay_error = handle_messages(rx, to_workers, self.num_workers);

            let mut results = Vec::with_capacity(self.num_workers);
            let mut first_error: Option<Error> = relay_error;
            for (rank, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(Ok(r)) => results.push(r),
                    Ok(Err(e)) => first_error = pick_root_cause(first_error, e),
                    Err(_) => first_error = pick_root_cause(first_error, Error::WorkerPanicked(rank)),
                }
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(results),
            }
        })
    }
}

/// Disconnects caused by another worker's failure are only symptoms
fn pick_root_cause(current: Option<Error>, new: Error) -> Option<Error> {
    match current {
        None => Some(new),
        Some(Error::Disconnected) if !matches!(new, Error::Disconnected) => Some(new),
        Some(e) => Some(e),
    }
}

/// Relay reductions until every worker has exited.
///
/// Returns an error if the collectives desynchronized. On any failure the
/// channels to the workers are dropped, which disconnects every worker still
/// waiting on a reduction.
fn handle_messages(
    rx: mpsc::Receiver<W2M>,
    mut to_workers: Vec<mpsc::Sender<M2W>>,
    num_workers: usize,
) -> Option<Error> {
    let mut pending: Vec<Option<Vec<f64>>> = (0..num_workers).map(|_| None).collect();
    let mut exited = vec![false; num_workers];
    let mut failure: Option<Error> = None;

    // Ends once every worker (and so every sender) is gone
    for message in rx.iter() {
        match message {
            W2M::Exited { rank, completed } => {
                exited[rank] = true;
                if failure.is_some() {
                    continue;
                }
                if !completed {
                    error!("worker {} failed, stopping all workers", rank);
                    failure = Some(Error::WorkerFailed(rank));
                    to_workers.clear();
                } else if pending.iter().any(|p| p.is_some()) {
                    failure = Some(Error::Desynchronized(format!(
                        "worker {} finished while a reduction was in progress",
                        rank
                    )));
                    to_workers.clear();
                }
            }
            W2M::Reduce { rank, data } => {
                if failure.is_some() {
                    continue;
                }
                if exited.iter().any(|&e| e) || pending[rank].is_some() {
                    failure = Some(Error::Desynchronized(format!(
                        "worker {} issued a reduction the others did not",
                        rank
                    )));
                    to_workers.clear();
                    continue;
                }
                pending[rank] = Some(data);
                if pending.iter().all(|p| p.is_some()) {
                    match sum_in_rank_order(&mut pending) {
                        Ok(sum) => {
                            for tx in &to_workers {
                                // A closed receiver means that worker already
                                // failed; its Exited message follows
                                let _ = tx.send(M2W::Reduced(sum.clone()));
                            }
                        }
                        Err(e) => {
                            failure = Some(e);
                            to_workers.clear();
                        }
                    }
                }
            }
        }
    }

    // A failed worker is reported by its own error, not by the manager
    match failure {
        Some(Error::WorkerFailed(_)) => None,
        other => other,
    }
}

fn sum_in_rank_order(pending: &mut [Option<Vec<f64>>]) -> Result<Vec<f64>> {
    let mut buffers = pending.iter_mut().map(|p| p.take().unwrap_or_default());
    let mut sum = buffers.next().unwrap_or_default();
    for (rank, buffer) in buffers.enumerate() {
        if buffer.len() != sum.len() {
            return Err(Error::Desynchronized(format!(
                "worker {} sent {} values, worker 0 sent {}",
                rank + 1,
                buffer.len(),
                sum.len()
            )));
        }
        sum.iter_mut().zip(buffer).for_each(|(s, b)| *s += b);
    }
    Ok(sum)
}
