use rand::rngs::StdRng;
use rand::SeedableRng;
use rcscatter::units::{CM, DEG, ELECTRON_MASS, GEV, M, MEV, PROTON_MASS};
use rcscatter::{
    q2_max, DiscreteProcess, FireOutcome, FiringPolicy, ScatterState, ScatteringConfig, ScatteringProcess, StepLimit,
    Stepper, TargetGas, Track, TrackFate,
};

fn hall_a_config() -> ScatteringConfig {
    ScatteringConfig {
        vertex_z: 7.5 * CM,
        photon_cutoff: 1.0 * MEV,
        theta_central: 17.5 * DEG,
        target: Some(TargetGas::H3),
        ..ScatteringConfig::default()
    }
}

#[test]
fn test_proton_like_primary_through_vertex() {
    let stepper = Stepper::new(1.5 * M);
    let mut sampled = 0;
    let mut escaped = 0;

    for seed in 0..50u64 {
        let mut process = ScatteringProcess::new(hall_a_config()).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let track = Track::primary([0.0, 0.0, -12.5 * CM], 1.0 * GEV, PROTON_MASS);
        let e_pre = track.total_energy();

        let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
        let outcome = stepper.transport(track, &mut processes, &mut rng).unwrap();
        assert_eq!(process.state(), ScatterState::Fired);

        let last = *process.last_outcome().unwrap();
        if let Some(k) = last.kinematics() {
            sampled += 1;
            let theta = k.window.theta;
            assert!(theta >= 12.5 * DEG - 1e-12 && theta <= 22.5 * DEG + 1e-12);
            assert!(k.window.q2 >= 0.0 && k.window.q2 <= q2_max(theta, e_pre));
            assert!(k.post_energy < e_pre);
            assert!(k.vertex.nu >= k.window.q2 / (2.0 * PROTON_MASS));

            let d = k.direction;
            let norm = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
            assert_eq!(outcome.interactions, 1);
        }

        match last {
            FireOutcome::Scattered(k) => {
                escaped += 1;
                assert!(k.post_energy > PROTON_MASS);
                assert_eq!(outcome.fate, TrackFate::Escaped);
                assert_eq!(outcome.track.direction, k.direction);
                let kinetic = outcome.track.kinetic_energy;
                assert!(kinetic > 0.0);
                assert!((kinetic - (k.post_energy - PROTON_MASS)).abs() < 1e-9);
            }
            FireOutcome::BelowRestMass(k) => {
                assert!(k.post_energy <= PROTON_MASS);
                assert_eq!(outcome.fate, TrackFate::Killed);
                assert!((outcome.track.z() - 7.5 * CM).abs() < 1e-9);
            }
            FireOutcome::NonConvergent { .. } => {
                assert_eq!(outcome.fate, TrackFate::Killed);
            }
        }
    }

    println!("{} of 50 sampled, {} left the vertex alive", sampled, escaped);
    assert!(sampled >= 45, "only {} of 50 seeds converged", sampled);
}

#[test]
fn test_electron_beam_loses_energy_and_leaves_at_angle() {
    let mut process = ScatteringProcess::new(hall_a_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(2017);
    let track = Track::primary([0.0, 0.0, -12.5 * CM], 1.0 * GEV, ELECTRON_MASS);

    let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
    let outcome = Stepper::new(1.5 * M).transport(track, &mut processes, &mut rng).unwrap();

    if let Some(FireOutcome::Scattered(k)) = process.last_outcome() {
        assert!(outcome.track.kinetic_energy < 1.0 * GEV);
        assert!((outcome.track.total_energy() - k.post_energy).abs() < 1e-9);
        // leaves through the downstream end plane of the world
        assert!((outcome.track.z() - 1.5 * M).abs() < 1e-6);
        let transverse = outcome.track.position[0].hypot(outcome.track.position[1]);
        let expected = (1.5 * M - 7.5 * CM) * k.window.theta.tan();
        assert!((transverse - expected).abs() < 1e-6 * expected);
    }
}

#[test]
fn test_track_past_vertex_is_never_scattered() {
    let mut process = ScatteringProcess::new(hall_a_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let track = Track::primary([0.0, 0.0, 8.0 * CM], 1.0 * GEV, PROTON_MASS);

    assert_eq!(process.proposed_step_limit(&track).limit, StepLimit::Unlimited);

    let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
    let outcome = Stepper::new(1.5 * M).transport(track.clone(), &mut processes, &mut rng).unwrap();
    assert_eq!(outcome.fate, TrackFate::Escaped);
    assert_eq!(outcome.interactions, 0);
    assert_eq!(outcome.track.direction, track.direction);
    assert_eq!(outcome.track.kinetic_energy, track.kinetic_energy);
    assert_eq!(process.state(), ScatterState::Idle);
    assert!(process.last_outcome().is_none());
}

#[test]
fn test_secondary_passes_untouched() {
    let mut process = ScatteringProcess::new(hall_a_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let secondary = Track::new(7, [0.0, 0.0, -10.0 * CM], [0.0, 0.0, 1.0], 50.0 * MEV, ELECTRON_MASS);

    let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
    let outcome = Stepper::new(1.5 * M).transport(secondary, &mut processes, &mut rng).unwrap();
    assert_eq!(outcome.interactions, 0);
    assert_eq!(process.state(), ScatterState::Idle);
}

#[test]
fn test_only_first_primary_of_run_scatters() {
    let mut process = ScatteringProcess::new(hall_a_config()).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let stepper = Stepper::new(1.5 * M);

    let mut interactions = Vec::new();
    let mut deflected = Vec::new();
    for _ in 0..3 {
        let track = Track::primary([0.0, 0.0, -12.5 * CM], 1.0 * GEV, ELECTRON_MASS);
        let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
        let outcome = stepper.transport(track, &mut processes, &mut rng).unwrap();
        interactions.push(outcome.interactions);
        deflected.push(outcome.track.direction != [0.0, 0.0, 1.0]);
    }

    // Every primary is stopped at the vertex, only the first is changed
    assert_eq!(interactions, vec![1, 1, 1]);
    assert_eq!(&deflected[1..], &[false, false]);
}

#[test]
fn test_once_per_track_scatters_every_primary() {
    let config = ScatteringConfig {
        firing_policy: FiringPolicy::OncePerTrack,
        ..hall_a_config()
    };
    let mut process = ScatteringProcess::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let stepper = Stepper::new(1.5 * M);

    for _ in 0..5 {
        let track = Track::primary([0.0, 0.0, -12.5 * CM], 1.0 * GEV, ELECTRON_MASS);
        let mut processes: [&mut dyn DiscreteProcess; 1] = [&mut process];
        let outcome = stepper.transport(track, &mut processes, &mut rng).unwrap();
        let changed = outcome.fate == TrackFate::Killed || outcome.track.direction != [0.0, 0.0, 1.0];
        assert!(changed);
    }
}
