mod verlet;

pub use verlet::NoseHooverVerlet;
