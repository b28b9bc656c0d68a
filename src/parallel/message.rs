/// Worker-to-Manager messages
#[derive(Debug)]
pub enum W2M {
    /// A worker's contribution to an all-reduce
    Reduce { rank: usize, data: Vec<f64> },
    /// A worker has left the run, successfully or not
    Exited { rank: usize, completed: bool },
}

/// Manager-to-Worker messages
#[derive(Debug)]
pub enum M2W {
    /// Element-wise sum of every worker's `Reduce` buffer
    Reduced(Vec<f64>),
}
