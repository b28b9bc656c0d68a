use crate::{Interface, Ions};

/// Mean density of one bin with its statistical error
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinStats {
    /// Centre of the bin along z
    pub z: f64,
    pub positive: f64,
    pub positive_error: f64,
    pub negative: f64,
    pub negative_error: f64,
}

/// Running means of the cation and anion number densities across the slab
#[derive(Clone, Debug, PartialEq)]
pub struct DensityProfile {
    zlo: f64,
    width: f64,
    bin_volume: f64,
    samples: usize,
    mean_positive: Vec<f64>,
    mean_sq_positive: Vec<f64>,
    mean_negative: Vec<f64>,
    mean_sq_negative: Vec<f64>,
}
impl DensityProfile {
    pub fn new(interface: &Interface, bins: usize) -> Self {
        let bins = bins.max(1);
        let width = interface.lz() / bins as f64;
        Self {
            zlo: -0.5 * interface.lz(),
            width,
            bin_volume: interface.area() * width,
            samples: 0,
            mean_positive: vec![0.0; bins],
            mean_sq_positive: vec![0.0; bins],
            mean_negative: vec![0.0; bins],
            mean_sq_negative: vec![0.0; bins],
        }
    }
    pub fn bins(&self) -> usize {
        self.mean_positive.len()
    }
    pub fn samples(&self) -> usize {
        self.samples
    }
    pub fn bin_width(&self) -> f64 {
        self.width
    }
    fn bin_of(&self, z: f64) -> usize {
        let b = ((z - self.zlo) / self.width).floor();
        (b.max(0.0) as usize).min(self.bins() - 1)
    }

    /// Add the current configuration to the running means
    pub fn accumulate(&mut self, ions: &Ions) {
        let mut positive = vec![0.0; self.bins()];
        let mut negative = vec![0.0; self.bins()];
        for i in 0..ions.num_ions() {
            let b = self.bin_of(ions.positions[i][2]);
            let q = ions.charge(i);
            if q > 0.0 {
                positive[b] += 1.0;
            } else if q < 0.0 {
                negative[b] += 1.0;
            }
        }

        self.samples += 1;
        let n = self.samples as f64;
        let update = |mean: &mut f64, value: f64| *mean += (value - *mean) / n;
        for b in 0..self.bins() {
            let rho_p = positive[b] / self.bin_volume;
            let rho_n = negative[b] / self.bin_volume;
            update(&mut self.mean_positive[b], rho_p);
            update(&mut self.mean_sq_positive[b], rho_p * rho_p);
            update(&mut self.mean_negative[b], rho_n);
            update(&mut self.mean_sq_negative[b], rho_n * rho_n);
        }
    }

    /// Mean densities with error bars (standard error of the mean)
    pub fn finalize(&self) -> Vec<BinStats> {
        let n = self.samples.max(1) as f64;
        let error = |mean: f64, mean_sq: f64| ((mean_sq - mean * mean).max(0.0) / n).sqrt();
        (0..self.bins())
            .map(|b| BinStats {
                z: self.zlo + (b as f64 + 0.5) * self.width,
                positive: self.mean_positive[b],
                positive_error: error(self.mean_positive[b], self.mean_sq_positive[b]),
                negative: self.mean_negative[b],
                negative_error: error(self.mean_negative[b], self.mean_sq_negative[b]),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Species;
    use approx::assert_relative_eq;

    fn setup() -> (Ions, Interface) {
        let interface = Interface::new(2.0, 2.0, 4.0, 78.5).unwrap();
        let mut ions = Ions::new(vec![
            Species::new("+", 1, 0.5, 1.0).unwrap(),
            Species::new("-", -1, 0.5, 1.0).unwrap(),
        ]);
        ions.add_ions(0, vec![[0.0, 0.0, -1.5], [0.5, 0.0, -1.2]]);
        ions.add_ions(1, vec![[0.0, 0.0, 1.5]]);
        (ions, interface)
    }

    #[test]
    fn densities_land_in_the_right_bins() {
        let (ions, interface) = setup();
        let mut profile = DensityProfile::new(&interface, 4);
        profile.accumulate(&ions);
        let stats = profile.finalize();

        // bins are 1 nm wide and 4 nm^3 in volume
        assert_relative_eq!(stats[0].z, -1.5);
        assert_relative_eq!(stats[0].positive, 0.5);
        assert_relative_eq!(stats[3].negative, 0.25);
        assert_eq!(stats[1].positive, 0.0);
        assert_eq!(stats[0].positive_error, 0.0);
    }

    #[test]
    fn running_mean_and_error() {
        let (mut ions, interface) = setup();
        let mut profile = DensityProfile::new(&interface, 4);
        profile.accumulate(&ions);
        ions.positions[0][2] = 1.2;
        ions.positions[1][2] = 1.3;
        profile.accumulate(&ions);

        let stats = profile.finalize();
        assert_eq!(profile.samples(), 2);
        assert_relative_eq!(stats[0].positive, 0.25);
        assert_relative_eq!(stats[3].positive, 0.25);
        // values 0.5 and 0: variance 0.0625 over 2 samples
        assert_relative_eq!(stats[0].positive_error, (0.0625f64 / 2.0).sqrt());
    }
}
