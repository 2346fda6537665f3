use numpy::ndarray::{Array2, Array3};
use numpy::{IntoPyArray, PyArray2, PyArray3};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::core::particle::DIM;
use crate::core::{Simulation, Snapshot};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// ReactGas: Python-facing wrapper around the Rust Simulation core.
///
/// Trajectory getters return arrays indexed `[particle, step, ...]` with
/// `steps_taken + 1` entries per particle (entry 0 is the initial state).
#[pyclass]
pub struct ReactGas {
    sim: Simulation,
}

impl ReactGas {
    fn per_step<T, F>(&self, f: F) -> Array2<T>
    where
        T: Clone + Default,
        F: Fn(&Snapshot) -> T,
    {
        let n = self.sim.num_particles();
        let len = self.sim.steps_taken() + 1;
        let mut arr = Array2::<T>::default((n, len));
        for (i, p) in self.sim.particles().iter().enumerate() {
            for (s, snap) in p.history().iter().enumerate() {
                arr[[i, s]] = f(snap);
            }
        }
        arr
    }

    fn per_step_vec<F>(&self, f: F) -> Array3<f64>
    where
        F: Fn(&Snapshot) -> [f64; DIM],
    {
        let n = self.sim.num_particles();
        let len = self.sim.steps_taken() + 1;
        let mut arr = Array3::<f64>::zeros((n, len, DIM));
        for (i, p) in self.sim.particles().iter().enumerate() {
            for (s, snap) in p.history().iter().enumerate() {
                for (k, x) in f(snap).into_iter().enumerate() {
                    arr[[i, s, k]] = x;
                }
            }
        }
        arr
    }
}

#[pymethods]
impl ReactGas {
    /// Place `num_particles` disks at random non-overlapping positions.
    ///
    /// Errors: raises ValueError on invalid parameters or when the box cannot be packed.
    #[new]
    #[pyo3(signature = (
        num_particles=100,
        box_size=200.0,
        radius=1.0,
        mass=1.2e-23,
        reactivity=1.0,
        max_speed=20.0,
        total_time=10.0,
        steps=1000,
        seed=None,
        max_placement_attempts=1_000_000
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        num_particles: usize,
        box_size: f64,
        radius: f64,
        mass: f64,
        reactivity: f64,
        max_speed: f64,
        total_time: f64,
        steps: usize,
        seed: Option<u64>,
        max_placement_attempts: usize,
    ) -> PyResult<Self> {
        let cfg = SimulationConfig {
            num_particles,
            box_size,
            radius,
            mass,
            reactivity,
            max_speed,
            total_time,
            steps,
            seed,
            max_placement_attempts,
        };
        let sim = Simulation::new(&cfg).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance one step; returns (elastic collisions, merges).
    fn step(&mut self) -> PyResult<(usize, usize)> {
        let r = self.sim.step().map_err(py_err)?;
        Ok((r.elastic, r.merged))
    }

    /// Advance `steps` steps (releases the GIL during computation).
    fn run(&mut self, py: Python<'_>, steps: usize) -> PyResult<(usize, usize)> {
        let r = py.detach(|| self.sim.run(steps)).map_err(py_err)?;
        Ok((r.elastic, r.merged))
    }

    #[getter]
    fn steps_taken(&self) -> usize {
        self.sim.steps_taken()
    }

    #[getter]
    fn dt(&self) -> f64 {
        self.sim.dt()
    }

    #[getter]
    fn box_size(&self) -> f64 {
        self.sim.box_size()
    }

    /// Positions, shape (N, S+1, 2).
    fn get_positions<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.per_step_vec(|s| s.position).into_pyarray(py)
    }

    /// Velocities, shape (N, S+1, 2).
    fn get_velocities<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray3<f64>> {
        self.per_step_vec(|s| s.velocity).into_pyarray(py)
    }

    /// Speeds |v|, shape (N, S+1).
    fn get_speeds<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<f64>> {
        self.per_step(|s| s.speed).into_pyarray(py)
    }

    /// Alive flags, shape (N, S+1).
    fn get_alive<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<bool>> {
        self.per_step(|s| s.alive).into_pyarray(py)
    }

    /// Species codes (0 = A, 1 = B), shape (N, S+1).
    fn get_species<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<u8>> {
        self.per_step(|s| s.species.code()).into_pyarray(py)
    }

    /// Current species colours, one hex string per particle.
    fn get_colors(&self) -> Vec<&'static str> {
        self.sim
            .particles()
            .iter()
            .map(|p| p.species().color())
            .collect()
    }

    /// Elastic collision counters per particle.
    fn get_collision_counts(&self) -> Vec<u64> {
        self.sim.collision_counts()
    }

    /// Total kinetic energy at history index `step`.
    fn total_energy(&self, step: usize) -> PyResult<f64> {
        self.sim.total_energy(step).map_err(py_err)
    }

    /// Effective temperature at history index `step`.
    fn temperature(&self, step: usize) -> PyResult<f64> {
        self.sim.temperature(step).map_err(py_err)
    }

    /// (alive A, alive B, dead) at history index `step`.
    fn population(&self, step: usize) -> PyResult<(usize, usize, usize)> {
        let p = self.sim.population(step).map_err(py_err)?;
        Ok((p.a, p.b, p.dead))
    }
}

/// The reactgas Python module entry point.
#[pymodule]
fn reactgas(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ReactGas>()?;
    m.add("K_BOLTZMANN", crate::core::K_BOLTZMANN)?;
    Ok(())
}
