use battleship_advisor::{simulate_game, AdvisorConfig, SearchBudget, TOTAL_FLEET_AREA};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn simulated_game_sinks_the_fleet() {
    let config = AdvisorConfig {
        budget: SearchBudget::nodes(2_000),
        ..AdvisorConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(42);
    let report = simulate_game(&mut rng, &config).unwrap();

    assert!(report.fleet_sunk);
    assert_eq!(report.hits, TOTAL_FLEET_AREA);
    assert!(report.shots >= TOTAL_FLEET_AREA && report.shots <= 100);
    assert_eq!(
        report.exact_turns + report.partial_turns + report.fallback_turns,
        report.shots
    );
}

#[test]
fn sim_binary_smoke() {
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "1000"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["seed"], 1);
    assert_eq!(v["fleet_sunk"], true);
}
