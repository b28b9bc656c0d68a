use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{error, info};

use crate::{
    compute::EnergySample,
    density::{BinStats, DensityProfile},
    forcefield::Interaction,
    simulation::RunSummary,
    Interface, Ions, Result,
};

/// Sampling hooks called by the simulation on the reporting worker.
///
/// Hooks return nothing: what they do with the data never affects the run.
pub trait Recorder {
    fn energy(&mut self, _sample: &EnergySample) {}
    fn movie_frame(&mut self, _step: usize, _ions: &Ions, _interface: &Interface) {}
    fn density(&mut self, _step: usize, _profile: &DensityProfile) {}
    fn progress(&mut self, _fraction: f64) {}
    fn finish(&mut self, _summary: &RunSummary, _ions: &Ions) {}
}

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;
impl Recorder for NullRecorder {}

/// Writes energies, movie frames and density profiles under one directory
pub struct FileRecorder {
    dir: PathBuf,
    energy: BufWriter<File>,
    movie: BufWriter<File>,
}
impl FileRecorder {
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        let mut energy = BufWriter::new(File::create(dir.join("energy.dat"))?);
        write!(energy, "# step kinetic")?;
        for kind in Interaction::ALL {
            write!(energy, " {}", kind.name())?;
        }
        writeln!(energy, " potential thermostat total extended temperature")?;
        let movie = BufWriter::new(File::create(dir.join("movie.xyz"))?);
        Ok(Self {
            dir: dir.to_path_buf(),
            energy,
            movie,
        })
    }

    fn write_energy(&mut self, s: &EnergySample) -> io::Result<()> {
        write!(self.energy, "{} {:.10e}", s.step, s.kinetic)?;
        for e in s.potential {
            write!(self.energy, " {:.10e}", e)?;
        }
        writeln!(
            self.energy,
            " {:.10e} {:.10e} {:.10e} {:.10e} {:.6}",
            s.potential_energy(),
            s.thermostat,
            s.total(),
            s.extended(),
            s.temperature
        )
    }
    fn write_frame(&mut self, step: usize, ions: &Ions, interface: &Interface) -> io::Result<()> {
        writeln!(self.movie, "{}", ions.num_ions())?;
        writeln!(
            self.movie,
            "step {} box {} {} {}",
            step,
            interface.lx(),
            interface.ly(),
            interface.lz()
        )?;
        for i in 0..ions.num_ions() {
            let p = ions.positions[i];
            writeln!(
                self.movie,
                "{} {:.6} {:.6} {:.6}",
                ions.species(i).name,
                p[0],
                p[1],
                p[2]
            )?;
        }
        Ok(())
    }
    fn write_density(&self, name: &str, stats: &[BinStats]) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(self.dir.join(name))?);
        writeln!(w, "# z positive positive_error negative negative_error")?;
        for b in stats {
            writeln!(
                w,
                "{:.6} {:.8e} {:.8e} {:.8e} {:.8e}",
                b.z, b.positive, b.positive_error, b.negative, b.negative_error
            )?;
        }
        w.flush()
    }
    fn write_final(&mut self, summary: &RunSummary, ions: &Ions) -> io::Result<()> {
        self.energy.flush()?;
        self.movie.flush()?;
        self.write_density("density_profile.dat", &summary.density)?;

        let mut w = BufWriter::new(File::create(self.dir.join("final_configuration.dat"))?);
        for i in 0..ions.num_ions() {
            let p = ions.positions[i];
            writeln!(w, "{} {:.10} {:.10} {:.10}", ions.species(i).name, p[0], p[1], p[2])?;
        }
        w.flush()
    }
}
impl Recorder for FileRecorder {
    fn energy(&mut self, sample: &EnergySample) {
        if let Err(e) = self.write_energy(sample) {
            error!("could not write energies at step {}: {}", sample.step, e);
        }
    }
    fn movie_frame(&mut self, step: usize, ions: &Ions, interface: &Interface) {
        if let Err(e) = self.write_frame(step, ions, interface) {
            error!("could not write movie frame at step {}: {}", step, e);
        }
    }
    fn density(&mut self, step: usize, profile: &DensityProfile) {
        let name = format!("density_profile_{}.dat", step);
        if let Err(e) = self.write_density(&name, &profile.finalize()) {
            error!("could not write density profile at step {}: {}", step, e);
        }
    }
    fn progress(&mut self, fraction: f64) {
        info!("{:.1}% complete", fraction * 100.0);
    }
    fn finish(&mut self, summary: &RunSummary, ions: &Ions) {
        if let Err(e) = self.write_final(summary, ions) {
            error!("could not write final results to {}: {}", self.dir.display(), e);
        }
    }
}
