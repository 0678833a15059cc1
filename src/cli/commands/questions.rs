//! `questions` command: print the configured question pool.

use crate::cli::args::QuestionsArgs;
use crate::config;
use crate::error::TruthwireError;

/// Prints the question pool, one numbered line each.
///
/// # Errors
///
/// Returns an error if a given configuration file fails to load.
pub fn run(args: &QuestionsArgs) -> Result<(), TruthwireError> {
    let config = match &args.config {
        Some(path) => config::load(path)?,
        None => config::defaults(),
    };

    for (i, question) in config.questions.iter().enumerate() {
        println!("{:2}. {question}", i + 1);
    }
    Ok(())
}
