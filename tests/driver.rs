use reactgas::error::{Error, Result};
use reactgas::{Simulation, SimulationConfig, K_BOLTZMANN};

fn config(seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_particles: 50,
        box_size: 100.0,
        radius: 1.0,
        mass: 1.2e-23,
        reactivity: 0.5,
        max_speed: 20.0,
        total_time: 1.0,
        steps: 100,
        seed: Some(seed),
        max_placement_attempts: 100_000,
    }
}

/// Initial placement never produces a colliding pair.
#[test]
fn placement_has_no_overlaps() -> Result<()> {
    let cfg = SimulationConfig {
        num_particles: 150,
        ..config(4242)
    };
    let sim = Simulation::new(&cfg)?;
    let ps = sim.particles();
    for i in 0..ps.len() {
        for j in (i + 1)..ps.len() {
            let dx = ps[j].position[0] - ps[i].position[0];
            let dy = ps[j].position[1] - ps[i].position[1];
            let gap = (dx * dx + dy * dy).sqrt() - 1.1 * (ps[i].radius() + ps[j].radius());
            assert!(gap >= 0.0, "particles {i} and {j} overlap (gap {gap})");
            assert!(!ps[i].is_colliding(&ps[j]));
        }
    }
    Ok(())
}

/// After S steps every history holds S + 1 entries.
#[test]
fn history_length_matches_steps() -> Result<()> {
    let cfg = config(1);
    let mut sim = Simulation::new(&cfg)?;
    for p in sim.particles() {
        assert_eq!(p.history().len(), 1);
    }
    sim.run(37)?;
    assert_eq!(sim.steps_taken(), 37);
    for p in sim.particles() {
        assert_eq!(p.history().len(), 38);
    }
    assert!(matches!(
        sim.total_energy(38),
        Err(Error::StepOutOfRange { step: 38, len: 38 })
    ));
    Ok(())
}

/// A fixed seed reproduces the run bit for bit.
#[test]
fn fixed_seed_replays_exactly() -> Result<()> {
    let cfg = config(9001);
    let mut a = Simulation::new(&cfg)?;
    let mut b = Simulation::new(&cfg)?;
    let ra = a.run(cfg.steps)?;
    let rb = b.run(cfg.steps)?;
    assert_eq!(ra, rb);
    for (pa, pb) in a.particles().iter().zip(b.particles()) {
        assert_eq!(pa.history(), pb.history());
        assert_eq!(pa.collision_count(), pb.collision_count());
    }

    let c = Simulation::new(&config(9002))?;
    assert_ne!(a.particles()[0].history()[0], c.particles()[0].history()[0]);
    Ok(())
}

/// The energy view is the plain sum of m/2 |v|^2 over the recorded speeds.
#[test]
fn energy_and_temperature_views() -> Result<()> {
    let cfg = config(77);
    let mut sim = Simulation::new(&cfg)?;
    sim.run(20)?;
    let t = sim.steps_taken();

    let mut expected = 0.0;
    for p in sim.particles() {
        expected += p.mass() / 2.0 * p.history()[t].speed.powi(2);
    }
    assert_eq!(sim.total_energy(t)?, expected);

    let n = sim.num_particles() as f64;
    let temp = sim.temperature(t)?;
    assert!((temp - expected / (n * K_BOLTZMANN)).abs() <= 1e-9 * temp);
    Ok(())
}

/// An impossible packing fails with a clear error instead of spinning forever.
#[test]
fn overcrowded_box_reports_packing_failure() {
    let cfg = SimulationConfig {
        num_particles: 500,
        box_size: 20.0,
        max_placement_attempts: 2_000,
        ..config(6)
    };
    let err = Simulation::new(&cfg).unwrap_err();
    assert!(matches!(err, Error::PackingFailed { .. }));
    assert!(err.to_string().contains("cannot pack particles"));
}
