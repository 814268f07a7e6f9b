//! Roll random encounters for a party.
//!
//! Run with:
//! `cargo run -p dnd35-core --example roll_encounter -- <difficulty> <environment> <level>...`
//!
//! For example `-- hard forest 3 4 4 5`. With no arguments a party of four
//! 3rd level characters gets a challenging encounter anywhere. Set
//! `DND35_SEED` to repeat a roll.

use dnd35_core::testing::seeded_rng;
use dnd35_core::{generate_encounter, Difficulty, Environment, RuleBook, RulesConfig};

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let difficulty = match args.first() {
        Some(arg) => match Difficulty::all()
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(arg))
        {
            Some(d) => d,
            None => usage(&format!("unknown difficulty {arg:?}")),
        },
        None => Difficulty::Challenging,
    };

    let environment = match args.get(1) {
        Some(arg) => match Environment::all()
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(arg))
        {
            Some(e) => e,
            None => usage(&format!("unknown environment {arg:?}")),
        },
        None => Environment::Any,
    };

    let mut party = Vec::new();
    for arg in args.iter().skip(2) {
        match arg.parse::<u32>() {
            Ok(level) if level > 0 => party.push(level),
            _ => usage(&format!("bad party level {arg:?}")),
        }
    }
    if party.is_empty() {
        party = vec![3, 3, 3, 3];
    }

    let config = match RulesConfig::from_env() {
        Ok(config) => config,
        Err(e) => usage(&e.to_string()),
    };
    let book = RuleBook::new(config);

    let seed = std::env::var("DND35_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let mut rng = seeded_rng(seed);

    let encounter = generate_encounter(&book, &party, difficulty, environment, &mut rng);

    println!(
        "=== {} encounter ({}) ===",
        encounter.difficulty.name(),
        encounter.environment.name()
    );
    println!("Party levels: {party:?}");
    println!(
        "Target CR {}  Budget {} XP  Spent {} XP",
        encounter.target_challenge_rating, encounter.budget, encounter.spent
    );
    if encounter.monsters.is_empty() {
        println!("Nothing shows up.");
    }
    for monster in &encounter.monsters {
        println!("  - {} (CR {})", monster.name, monster.challenge_rating);
    }
    println!(
        "Encounter level {}  Treasure {} gp",
        encounter.encounter_level, encounter.treasure_gp
    );
    println!("Seed: {seed}");
}

fn usage(problem: &str) -> ! {
    eprintln!("{problem}");
    eprintln!("usage: roll_encounter [difficulty] [environment] [party levels...]");
    std::process::exit(2);
}
