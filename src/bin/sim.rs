use battleship_advisor::{simulate_game, AdvisorConfig, SearchBudget};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [node_budget]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let mut config = AdvisorConfig::default();
    if let Some(nodes) = args.get(2) {
        config.budget = SearchBudget::nodes(nodes.parse()?);
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let report = simulate_game(&mut rng, &config)?;

    let result = json!({
        "seed": seed,
        "shots": report.shots,
        "hits": report.hits,
        "fleet_sunk": report.fleet_sunk,
        "turns": {
            "exact": report.exact_turns,
            "partial": report.partial_turns,
            "fallback": report.fallback_turns,
        },
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
