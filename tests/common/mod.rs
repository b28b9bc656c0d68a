#![allow(dead_code)]

use slabmd::{compute::EnergySample, output::Recorder, RunSummary, SimulationConfig};

/// Salt solution between weakly charged walls
pub fn salt_config(steps: usize, workers: usize) -> SimulationConfig {
    let json = format!(
        r#"{{
            "interface": {{ "lx": 5.0, "ly": 5.0, "lz": 4.0, "dielectric": 78.5, "mesh_points": 2 }},
            "species": [
                {{ "name": "Na", "valency": 1, "diameter": 0.5, "count": 9 }},
                {{ "name": "Cl", "valency": -1, "diameter": 0.6, "mass": 1.5, "count": 11 }}
            ],
            "thermostat": {{ "chain_length": 5, "temperature": 1.0, "mass": 1.0 }},
            "control": {{ "timestep": 0.001, "steps": {}, "extra_compute": 10, "hit_equilibrium": 10, "freq": 5, "bins": 20 }},
            "charge": {{ "charge_meshpoint": -0.5, "valency_counterion": 1 }},
            "workers": {},
            "seed": 2024
        }}"#,
        steps, workers
    );
    serde_json::from_str(&json).unwrap()
}

/// Keeps every energy sample
#[derive(Default)]
pub struct EnergyLog {
    pub samples: Vec<EnergySample>,
    pub finished: bool,
}
impl Recorder for EnergyLog {
    fn energy(&mut self, sample: &EnergySample) {
        self.samples.push(sample.clone());
    }
    fn finish(&mut self, _summary: &RunSummary, _ions: &slabmd::Ions) {
        self.finished = true;
    }
}
