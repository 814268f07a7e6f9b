//! Print full character sheets for the sample characters.
//!
//! Run with: `cargo run -p dnd35-core --example character_sheet`
//! Set `DND35_HP_POLICY=max` (or `rolled`) to change how hit points are
//! counted, and `RUST_LOG=dnd35_core=debug` to see engine logs.

use dnd35_core::testing::{sample_fighter, sample_fighter_wizard, sample_wizard};
use dnd35_core::{
    derive_stats, validate_build, CharacterBuild, DerivedStats, RuleBook, RulesConfig,
};

fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = match RulesConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Bad configuration: {e}");
            std::process::exit(1);
        }
    };
    let book = RuleBook::new(config);

    for build in [sample_fighter(), sample_wizard(), sample_fighter_wizard()] {
        match derive_stats(&build, &book) {
            Ok(stats) => print_sheet(&build, &stats),
            Err(e) => {
                eprintln!("{}: {e}", build.name);
                continue;
            }
        }

        match validate_build(&build, &book) {
            Ok(report) if report.valid => println!("  Build is legal"),
            Ok(report) => {
                println!("  Problems:");
                for violation in &report.violations {
                    println!("    - {violation}");
                }
            }
            Err(e) => println!("  Could not validate: {e}"),
        }
        println!();
    }
}

fn print_sheet(build: &CharacterBuild, stats: &DerivedStats) {
    let classes: Vec<String> = build
        .classes
        .iter()
        .map(|c| format!("{} {}", c.class, c.level))
        .collect();

    println!("=== {} ===", build.name);
    println!("  {} {} (level {})", build.race.name(), classes.join("/"), stats.character_level);

    let scores = &stats.abilities;
    let mods = &stats.modifiers;
    println!(
        "  STR {} ({:+})  DEX {} ({:+})  CON {} ({:+})  \
         INT {} ({:+})  WIS {} ({:+})  CHA {} ({:+})",
        scores.strength,
        mods.strength,
        scores.dexterity,
        mods.dexterity,
        scores.constitution,
        mods.constitution,
        scores.intelligence,
        mods.intelligence,
        scores.wisdom,
        mods.wisdom,
        scores.charisma,
        mods.charisma
    );
    println!(
        "  HP {}  AC {} (touch {}, flat-footed {})  Init {:+}  Speed {} ft.",
        stats.hit_points,
        stats.armor_class.total,
        stats.armor_class.touch,
        stats.armor_class.flat_footed,
        stats.initiative,
        stats.speed
    );
    println!(
        "  Fort {:+}  Ref {:+}  Will {:+}",
        stats.saves.fortitude, stats.saves.reflex, stats.saves.will
    );

    let full_attack: Vec<String> = stats
        .attacks
        .melee_full_attack
        .iter()
        .map(|b| format!("{b:+}"))
        .collect();
    println!(
        "  BAB {:+}  Melee {}  Ranged {:+}  Grapple {:+}",
        stats.attacks.base_attack_bonus,
        full_attack.join("/"),
        stats.attacks.ranged,
        stats.attacks.grapple
    );
    for weapon in &stats.weapons {
        println!("    {} {} ({})", weapon.name, weapon.damage, weapon.critical);
    }
    println!(
        "  Load: {} ({:.1} lb of {} lb)",
        stats.encumbrance.load.name(),
        stats.encumbrance.carried_weight,
        stats.encumbrance.capacity.heavy
    );

    println!(
        "  Skills ({} of {} points):",
        stats.skill_points.spent, stats.skill_points.available
    );
    for (skill, line) in stats.skills.iter().filter(|(_, line)| line.ranks > 0) {
        println!("    {skill} {:+} ({} ranks)", line.total, line.ranks);
    }

    println!("  Feats: {}", build.feats.join(", "));

    for (class, slots) in &stats.spell_slots {
        let per_day: Vec<String> = slots.per_day.iter().map(u32::to_string).collect();
        println!(
            "  {class} spells per day (caster level {}): {}",
            slots.caster_level,
            per_day.join("/")
        );
    }

    if stats.xp_penalty > 0 {
        println!("  Multiclass XP penalty: {}%", stats.xp_penalty);
    }
}
