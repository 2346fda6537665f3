use reactgas::error::Result;
use reactgas::{Particle, Population, Simulation, SimulationConfig, Species};

fn reactive_gas(reactivity: f64, seed: u64) -> SimulationConfig {
    SimulationConfig {
        num_particles: 60,
        box_size: 80.0,
        radius: 1.0,
        mass: 1.0,
        reactivity,
        max_speed: 20.0,
        total_time: 3.0,
        steps: 300,
        seed: Some(seed),
        max_placement_attempts: 100_000,
    }
}

/// Fully reactive A+A pair on contact: one B survivor and one dead remnant.
#[test]
fn fully_reactive_pair_merges() -> Result<()> {
    let ps = vec![
        Particle::new(0, [45.0, 50.0], [5.0, 0.0], 1.0, 1.0, 1.0)?,
        Particle::new(1, [47.5, 50.0], [-5.0, 0.0], 1.0, 1.0, 1.0)?,
    ];
    let mut sim = Simulation::from_particles(ps, 100.0, 0.05, Some(5))?;
    let report = sim.step()?;
    assert_eq!(report.merged, 1);
    assert_eq!(report.elastic, 0);

    let (survivor, remnant) = (&sim.particles()[0], &sim.particles()[1]);
    assert!(survivor.is_alive());
    assert_eq!(survivor.species(), Species::B);
    assert_eq!(survivor.mass(), 2.0);
    assert!((survivor.radius() - 2f64.sqrt()).abs() < 1e-12);
    assert!(survivor.velocity[0].abs() < 1e-12 && survivor.velocity[1].abs() < 1e-12);

    assert!(!remnant.is_alive());
    assert_eq!(remnant.mass(), 1.0);
    assert_eq!(remnant.velocity, [-5.0, 0.0]);

    assert_eq!(sim.population(0)?, Population { a: 2, b: 0, dead: 0 });
    assert_eq!(sim.population(1)?, Population { a: 0, b: 1, dead: 1 });
    assert!(!remnant.history()[1].alive);
    Ok(())
}

/// B never reverts to A and dead particles never come back.
#[test]
fn species_and_death_are_monotonic() -> Result<()> {
    let cfg = reactive_gas(0.5, 2024);
    let mut sim = Simulation::new(&cfg)?;
    let report = sim.run(cfg.steps)?;
    assert!(report.merged > 0, "expected at least one merge");

    for p in sim.particles() {
        for w in p.history().windows(2) {
            if w[0].species == Species::B {
                assert_eq!(w[1].species, Species::B, "particle {} reverted to A", p.id);
            }
            if !w[0].alive {
                assert!(!w[1].alive, "particle {} came back to life", p.id);
            }
        }
    }

    for t in 0..=sim.steps_taken() {
        let pop = sim.population(t)?;
        assert_eq!(pop.a + pop.b + pop.dead, cfg.num_particles);
        // every merge makes exactly one B and one remnant, and B never dies
        assert_eq!(pop.b, pop.dead, "step {t}: {pop:?}");
    }
    Ok(())
}

/// Merges move mass onto survivors without creating or losing any.
#[test]
fn alive_mass_is_conserved() -> Result<()> {
    let cfg = reactive_gas(1.0, 31);
    let mut sim = Simulation::new(&cfg)?;
    sim.run(cfg.steps)?;

    let alive_mass: f64 = sim
        .particles()
        .iter()
        .filter(|p| p.is_alive())
        .map(|p| p.mass())
        .sum();
    assert!((alive_mass - cfg.num_particles as f64 * cfg.mass).abs() < 1e-9);

    let last = sim.population(sim.steps_taken())?;
    assert!(last.b > 0);
    Ok(())
}

/// Reactivity zero keeps the gas pure A.
#[test]
fn zero_reactivity_never_reacts() -> Result<()> {
    let cfg = reactive_gas(0.0, 8);
    let mut sim = Simulation::new(&cfg)?;
    let report = sim.run(cfg.steps)?;
    assert_eq!(report.merged, 0);
    let last = sim.population(sim.steps_taken())?;
    assert_eq!(last, Population { a: cfg.num_particles, b: 0, dead: 0 });
    Ok(())
}
