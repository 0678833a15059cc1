//! `validate` command: check configuration files without running.

use crate::cli::args::ValidateArgs;
use crate::config;
use crate::error::TruthwireError;

/// Validates each given file, reporting per-file results.
///
/// # Errors
///
/// Returns the first encountered configuration error after all files have
/// been checked, so every file gets a report.
pub fn run(args: &ValidateArgs) -> Result<(), TruthwireError> {
    let mut first_error = None;

    for path in &args.files {
        match config::load(path) {
            Ok(config) => {
                println!(
                    "ok: {} ({} questions, countdown {}s)",
                    path.display(),
                    config.questions.len(),
                    config.countdown_secs
                );
            }
            Err(e) => {
                eprintln!("error: {}: {e}", path.display());
                first_error.get_or_insert(e);
            }
        }
    }

    first_error.map_or(Ok(()), |e| Err(e.into()))
}
