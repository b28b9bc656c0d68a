use crate::Control;

/// Decides which sampling hooks fire at a given step.
///
/// Every predicate depends only on the step number and the run parameters, so
/// all workers take the same branches.
#[derive(Clone, Debug)]
pub struct Schedule {
    extra_compute: usize,
    movie_start: usize,
    movie_freq: usize,
    hit_equilibrium: usize,
    freq: usize,
    write_density: usize,
}
impl Schedule {
    pub fn new(control: &Control) -> Self {
        Self {
            extra_compute: control.extra_compute.max(1),
            movie_start: control.movie_start,
            movie_freq: control.movie_freq.max(1),
            hit_equilibrium: control.hit_equilibrium,
            freq: control.freq.max(1),
            write_density: control.write_density.max(1),
        }
    }
    pub fn samples_energy(&self, num: usize) -> bool {
        num == 1 || num % self.extra_compute == 0
    }
    pub fn writes_movie(&self, num: usize) -> bool {
        num >= self.movie_start && num % self.movie_freq == 0
    }
    pub fn samples_density(&self, num: usize) -> bool {
        num >= self.hit_equilibrium && num % self.freq == 0
    }
    /// Whether the running density profile is written out after sampling
    pub fn writes_density(&self, num: usize) -> bool {
        self.samples_density(num) && num % self.write_density == 0
    }
}

/// Completion percentage that reports only when its rounded value changes
#[derive(Clone, Debug)]
pub struct Progress {
    steps: usize,
    verbose: bool,
    previous: Option<f64>,
}
impl Progress {
    pub fn new(steps: usize, verbose: bool) -> Self {
        Self {
            steps,
            verbose,
            previous: None,
        }
    }
    /// Fraction complete after step `num`, if its rounded percentage changed
    pub fn update(&mut self, num: usize) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        let percent = num as f64 / self.steps as f64 * 100.0;
        // whole percents, or tenths when verbose
        let percent = if self.verbose {
            (percent * 10.0).round() / 10.0
        } else {
            percent.round()
        };
        if self.previous == Some(percent) {
            return None;
        }
        self.previous = Some(percent);
        Some(percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(extra_compute: usize) -> Schedule {
        Schedule::new(&Control {
            steps: 20,
            extra_compute,
            movie_start: 4,
            movie_freq: 4,
            hit_equilibrium: 10,
            freq: 3,
            write_density: 6,
            ..Control::default()
        })
    }

    #[test]
    fn energy_sampling_steps() {
        let s = schedule(5);
        let steps: Vec<usize> = (1..=20).filter(|&n| s.samples_energy(n)).collect();
        assert_eq!(steps, vec![1, 5, 10, 15, 20]);
    }

    #[test]
    fn movie_and_density_steps() {
        let s = schedule(5);
        let movie: Vec<usize> = (1..=20).filter(|&n| s.writes_movie(n)).collect();
        assert_eq!(movie, vec![4, 8, 12, 16, 20]);
        let density: Vec<usize> = (1..=20).filter(|&n| s.samples_density(n)).collect();
        assert_eq!(density, vec![12, 15, 18]);
        let written: Vec<usize> = (1..=20).filter(|&n| s.writes_density(n)).collect();
        assert_eq!(written, vec![12, 18]);
    }

    #[test]
    fn progress_reports_only_changes() {
        let mut progress = Progress::new(1000, false);
        let reports: Vec<f64> = (1..=1000).filter_map(|n| progress.update(n)).collect();
        assert_eq!(reports.len(), 101);
        assert_eq!(reports.first(), Some(&0.0));
        assert_eq!(reports.last(), Some(&1.0));

        let mut verbose = Progress::new(1000, true);
        assert_eq!((1..=1000).filter_map(|n| verbose.update(n)).count(), 1000);
    }
}
