//! The `quickmath generate` command.

use std::path::PathBuf;

use anyhow::Result;

use quickmath_core::equation::EquationFactory;
use quickmath_core::rng::QuizRng;
use quickmath_core::round::RoundBuilder;
use quickmath_store::load_config_from;

pub fn execute(
    questions: u32,
    seed: Option<u64>,
    format: String,
    answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(questions >= 1, "--questions must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let builder = RoundBuilder::new(EquationFactory::new(config.operand_bound));
    let equations = builder.build(questions, &mut QuizRng::new(seed));

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&equations)?),
        "text" => {
            for (i, equation) in equations.iter().enumerate() {
                if answers {
                    let verdict = if equation.is_correct { "true" } else { "false" };
                    println!("{:>3}. {equation}  ({verdict})", i + 1);
                } else {
                    println!("{:>3}. {equation}", i + 1);
                }
            }
            if answers {
                println!(
                    "\n{} true, {} false",
                    equations.correct_count(),
                    equations.incorrect_count()
                );
            }
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
