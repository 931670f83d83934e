//! The `quickmath init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quickmath.toml").exists() {
        println!("quickmath.toml already exists, skipping.");
    } else {
        std::fs::write("quickmath.toml", SAMPLE_CONFIG)?;
        println!("Created quickmath.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust tiers or penalty in quickmath.toml");
    println!("  2. Run: quickmath validate");
    println!("  3. Run: quickmath play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quickmath configuration

# Question amounts offered on the start screen, each with its own best score.
tiers = [10, 25, 50, 99]

# Seconds added to the final time for every wrong answer.
penalty_secs = 0.5

# Timer granularity in milliseconds.
tick_ms = 100

# Operands are drawn from 0 up to (but not including) this bound.
operand_bound = 9

# Pause after the last answer before results are shown.
reveal_delay_ms = 600

# Seconds of 3, 2, 1, GO! before a round (0 to skip).
countdown_secs = 3

# Where best scores are kept. ${VAR} references are expanded.
scores_path = "${HOME}/.config/quickmath/best_scores.json"
"#;
