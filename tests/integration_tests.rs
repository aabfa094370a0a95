use approx::{assert_abs_diff_eq, assert_relative_eq};
use nozzle_simulation::{
    bell_nozzle, errors::NozzleError, interpolate, pressure_ratio, thrust, write_point_table,
    FlightProfile, MissionConfig, StageOptimizer, StandardAtmosphere, ATMOSPHERE_TOP,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const K: f64 = 1.22;
const P1: f64 = 30.0e6;
const AT: f64 = 0.126;

// Helper function to build the reference mission
fn reference_mission() -> MissionConfig {
    MissionConfig::default()
}

#[test]
fn test_sea_level_reference() {
    println!("INTEGRATION TEST: Sea level reference state");

    let atmosphere = StandardAtmosphere::new();
    let profile = atmosphere.evaluate(&[0.0]);

    assert_abs_diff_eq!(profile.pressure[0], 101_325.0, epsilon = 1e-9);
    assert_abs_diff_eq!(profile.temperature[0], 288.15, epsilon = 1e-9);
}

#[test]
fn test_random_altitudes_pressure_monotonic() {
    println!("INTEGRATION TEST: Pressure never rises with altitude");

    let atmosphere = StandardAtmosphere::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mut altitudes: Vec<f64> = (0..2_000)
        .map(|_| rng.gen_range(0.0..=ATMOSPHERE_TOP))
        .collect();
    altitudes.sort_by(|a, b| a.total_cmp(b));

    let profile = atmosphere.evaluate(&altitudes);
    for i in 1..altitudes.len() {
        assert!(
            profile.pressure[i] <= profile.pressure[i - 1],
            "Pressure rose between {:.1} m and {:.1} m",
            altitudes[i - 1],
            altitudes[i]
        );
        assert!(profile.density[i] > 0.0);
    }
}

#[test]
fn test_random_expansion_ratios_monotonic() {
    println!("INTEGRATION TEST: Pressure ratio drops with expansion ratio");

    let mut rng = StdRng::seed_from_u64(7);
    let mut ratios: Vec<f64> = (0..200).map(|_| rng.gen_range(1.5..1000.0)).collect();
    ratios.sort_by(|a, b| a.total_cmp(b));
    ratios.dedup();

    let mut previous = f64::INFINITY;
    for epsilon in ratios {
        let ratio = pressure_ratio(epsilon, K).expect("Supersonic solution should exist");
        assert!(ratio > 0.0 && ratio < 1.0);
        assert!(
            ratio < previous,
            "Pressure ratio should strictly drop, got {} after {} at eps = {}",
            ratio,
            previous,
            epsilon
        );
        previous = ratio;
    }
}

#[test]
fn test_unit_expansion_ratio_is_fatal() {
    println!("INTEGRATION TEST: eps = 1 has no supersonic exit");

    match pressure_ratio(1.0, K) {
        Err(NozzleError::NumericalConvergence(message)) => println!("Rejected: {}", message),
        other => panic!("Expected a convergence error, got {:?}", other),
    }
}

#[test]
fn test_thrust_falls_with_ambient_pressure() {
    println!("INTEGRATION TEST: Thrust against ambient pressure");

    let exit_pressure = P1 * pressure_ratio(50.0, K).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let low = rng.gen_range(0.0..100_000.0);
        let high = low + rng.gen_range(1.0..10_000.0);
        let thrust_low = thrust(P1, AT, K, exit_pressure, low, 50.0);
        let thrust_high = thrust(P1, AT, K, exit_pressure, high, 50.0);
        assert!(
            thrust_high < thrust_low,
            "Thrust should drop from {} Pa to {} Pa",
            low,
            high
        );
    }
}

#[test]
fn test_reference_flight_profile() {
    println!("INTEGRATION TEST: Reference three-segment flight");

    let mission = reference_mission();
    let engine = mission.engine.engine();
    let profile = FlightProfile::evaluate(&engine, &StandardAtmosphere::new(), &mission.segments)
        .expect("Reference flight should evaluate");

    let sea_level = &profile.samples[0];
    println!(
        "Sea level thrust: {:.3} MN, Isp {:.1} s",
        sea_level.thrust / 1e6,
        sea_level.specific_impulse
    );
    assert_relative_eq!(sea_level.thrust, 6.469e6, max_relative = 1e-3);

    let top = profile.samples.last().unwrap();
    assert_eq!(top.altitude, 120_000.0);
    assert!(top.thrust > sea_level.thrust);
    assert!(top.specific_impulse > sea_level.specific_impulse);
}

#[test]
fn test_reference_nozzles_close_at_exit_radius() {
    println!("INTEGRATION TEST: Nozzle exit radius for each stage");

    let mission = reference_mission();
    let throat_radius_mm = mission.engine.engine().throat_radius() * 1000.0;

    for segment in &mission.segments {
        let nozzle = bell_nozzle(K, segment.expansion_ratio, throat_radius_mm, 80)
            .expect("Contour should build");
        let expected = segment.expansion_ratio.sqrt() * throat_radius_mm;

        println!(
            "eps = {}: length {:.1} mm, exit radius {:.1} mm",
            segment.expansion_ratio,
            nozzle.angles.length,
            nozzle.exit_radius()
        );
        assert_relative_eq!(nozzle.exit_radius(), expected, max_relative = 1e-3);

        let mut table = Vec::new();
        let rows = write_point_table(&nozzle.contour, &mut table).unwrap();
        assert_eq!(rows, 300);
    }
}

#[test]
fn test_interpolation_contract() {
    println!("INTEGRATION TEST: Linear interpolation");

    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, 10.0, 20.0, 30.0];

    assert_abs_diff_eq!(interpolate(&xs, &ys, 1.5).unwrap(), 15.0, epsilon = 1e-12);
    assert_eq!(interpolate(&xs, &ys, -1.0).unwrap(), 0.0);
    assert_eq!(interpolate(&xs, &ys, 4.0).unwrap(), 30.0);
    assert!(matches!(
        interpolate(&[0.0, 0.0, 1.0], &[0.0, 1.0, 2.0], 0.5),
        Err(NozzleError::Configuration(_))
    ));
}

#[test]
fn test_staging_breakpoints() {
    println!("INTEGRATION TEST: Staging breakpoints up to 120 km");

    let mission = reference_mission();
    let optimizer = StageOptimizer::new(mission.staging);
    let breakpoints = optimizer
        .find_breakpoints(K, P1, AT, 120_000.0)
        .expect("Stage search should succeed");

    for breakpoint in &breakpoints {
        println!(
            "  h = {:>9.1} m -> eps = {:.1}",
            breakpoint.altitude, breakpoint.expansion_ratio
        );
    }

    assert_eq!(breakpoints[0].altitude, 0.0);
    for pair in breakpoints.windows(2) {
        assert!(pair[1].altitude > pair[0].altitude);
        assert!(
            (pair[1].expansion_ratio - pair[0].expansion_ratio).abs() / pair[0].expansion_ratio
                > mission.staging.change_threshold
        );
    }
}
