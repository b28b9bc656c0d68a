use log::info;

use crate::{
    compute::{self, EnergySample},
    density::{BinStats, DensityProfile},
    forcefield::{Contributions, ForceField, ForceFieldTrait, ForceTally},
    integrators::NoseHooverVerlet,
    output::Recorder,
    parallel::{reduce_contributions, Communicator, Domain},
    schedule::{Progress, Schedule},
    ChargeParams, Control, Error, Interface, Ions, Result, ThermostatChain,
};

/// Everything needed to start a run
#[derive(Clone, Debug)]
pub struct System {
    pub ions: Ions,
    pub interface: Interface,
    pub chain: ThermostatChain,
    pub force_field: ForceField,
    pub control: Control,
    pub charge: ChargeParams,
}

/// What a finished run reports
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    pub timestep: f64,
    pub energy_samples: usize,
    pub density_samples: usize,
    pub last_energy: Option<EnergySample>,
    /// Mean density profile with error bars
    pub density: Vec<BinStats>,
}
impl RunSummary {
    /// Length of the simulated trajectory, in reduced time units of
    /// `nm * sqrt(m / kT)` with `m` the unit of species mass
    pub fn simulated_time(&self) -> f64 {
        self.steps as f64 * self.timestep
    }
}

/// The simulation replica held by each worker.
///
/// Ions and the thermostat chain are replicated: every worker applies the
/// same updates to them, driven only by reduced forces and by the kinetic
/// energy of the replicated velocities. Only forces and energies are
/// exchanged, once per step.
pub struct Simulation<'a, C: Communicator + ?Sized> {
    ions: Ions,
    interface: Interface,
    force_field: ForceField,
    charge: ChargeParams,
    control: Control,
    integrator: NoseHooverVerlet,
    schedule: Schedule,
    domain: Domain,
    comm: &'a C,
    partial: Contributions,
    exchange: Vec<f64>,
    tally: ForceTally,
    density: DensityProfile,
}
impl<'a, C: Communicator + ?Sized> Simulation<'a, C> {
    /// Create a new simulation on one worker of `comm`
    pub fn new(system: System, comm: &'a C) -> Result<Self> {
        system.control.validate()?;
        system.interface.validate()?;
        let num_ions = system.ions.num_ions();
        let domain = Domain::new(num_ions, comm.size(), comm.rank())?;
        if system.chain.is_empty() {
            return Err(Error::InvalidConfig(String::from(
                "thermostat chain should have at least one link",
            )));
        }

        Ok(Self {
            partial: Contributions::new(&domain),
            exchange: Vec::with_capacity(4 * crate::forcefield::NUM_INTERACTIONS * num_ions),
            tally: ForceTally::new(num_ions),
            density: DensityProfile::new(&system.interface, system.control.bins),
            schedule: Schedule::new(&system.control),
            integrator: NoseHooverVerlet::new(system.control.timestep, system.chain),
            ions: system.ions,
            interface: system.interface,
            force_field: system.force_field,
            charge: system.charge,
            control: system.control,
            domain,
            comm,
        })
    }

    // Getters
    pub fn ions(&self) -> &Ions {
        &self.ions
    }
    pub fn chain(&self) -> &ThermostatChain {
        self.integrator.chain()
    }

    /// Evaluate this worker's share of the forces and reduce them over all workers
    pub fn compute_forces(&mut self) -> Result<()> {
        self.force_field.evaluate(
            &self.ions,
            &self.interface,
            &self.domain,
            &self.charge,
            &mut self.partial,
        );
        reduce_contributions(self.comm, &self.partial, &mut self.exchange, &mut self.tally)
    }

    /// Energies of the current configuration, from the last reduction
    pub fn energy_sample(&self, step: usize) -> EnergySample {
        EnergySample::new(
            step,
            self.integrator.particle_ke(),
            compute::temperature(&self.ions),
            &self.tally,
            self.integrator.chain(),
        )
    }

    /// One velocity-Verlet step. Collective: every worker must call it.
    fn step(&mut self) -> Result<()> {
        self.integrator
            .pre_force(&mut self.ions, self.tally.total_forces(), &self.interface);
        self.compute_forces()?;
        self.integrator
            .post_force(&mut self.ions, self.tally.total_forces());
        Ok(())
    }

    /// Run every configured step, calling the hooks of `recorder` on the reporting worker
    pub fn run(&mut self, recorder: &mut dyn Recorder) -> Result<RunSummary> {
        let reporter = self.comm.is_reporter();
        self.compute_forces()?;
        self.integrator.init(&self.ions);
        if reporter {
            self.initial_output();
        }

        let mut energy_samples = 0;
        let mut last_energy = None;
        let mut progress = Progress::new(self.control.steps, self.control.verbose);

        for num in 1..=self.control.steps {
            self.step()?;

            if self.schedule.samples_energy(num) {
                energy_samples += 1;
                let sample = self.energy_sample(num);
                if !sample.is_finite() {
                    return Err(Error::NumericalInstability { step: num });
                }
                if reporter {
                    recorder.energy(&sample);
                }
                last_energy = Some(sample);
            }

            if reporter && self.schedule.writes_movie(num) {
                recorder.movie_frame(num, &self.ions, &self.interface);
            }

            if self.schedule.samples_density(num) {
                self.density.accumulate(&self.ions);
                if reporter && self.schedule.writes_density(num) {
                    recorder.density(num, &self.density);
                }
            }

            if reporter {
                if let Some(fraction) = progress.update(num) {
                    recorder.progress(fraction);
                }
            }
        }

        let summary = RunSummary {
            steps: self.control.steps,
            timestep: self.control.timestep,
            energy_samples,
            density_samples: self.density.samples(),
            last_energy,
            density: self.density.finalize(),
        };
        if reporter {
            self.final_output(&summary);
            recorder.finish(&summary, &self.ions);
        }
        Ok(summary)
    }

    fn initial_output(&self) {
        let sample = self.energy_sample(0);
        info!("Propagation of ions using molecular dynamics begins");
        info!("Time step in the simulation {}", self.control.timestep);
        info!("Total number of simulation steps {}", self.control.steps);
        info!("Workers {}, ions {}", self.comm.size(), self.ions.num_ions());
        if self.control.verbose {
            info!("Initial ion kinetic energy {}", sample.kinetic);
            info!("Initial potential energy {}", sample.potential_energy());
            info!("Initial system energy {}", sample.total());
            info!("Chain length (L+1) {}", self.chain().len());
            info!("Main thermostat temperature {}", self.chain().main().temperature);
            info!("Main thermostat mass {}", self.chain().main().mass);
            info!("Number of bins used for density profiles {}", self.density.bins());
            info!("Production begins at {}", self.control.hit_equilibrium);
            info!("Sampling frequency {}", self.control.freq);
            info!("Extra computation every {} steps", self.control.extra_compute);
            info!("Write density profile every {}", self.control.write_density);
        }
    }

    fn final_output(&self, summary: &RunSummary) {
        if self.control.verbose {
            info!("Number of samples used to compute energy {}", summary.energy_samples);
            info!("Number of samples used to get density profile {}", summary.density_samples);
        }
        info!(
            "Dynamics of ions simulated for {} reduced time units (nm sqrt(m/kT))",
            summary.simulated_time()
        );
    }
}
