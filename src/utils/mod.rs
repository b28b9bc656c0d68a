/// Small vector computations on `[T; 3]` coordinates
pub mod computations;

pub use computations::*;
