//! Interactive run configuration
//!
//! The batch tool's entire external control surface: two blocking prompt
//! loops (generation mode, then difficulty tier) that re-prompt on invalid
//! input until a valid selection is made. Parsing is separated from the I/O
//! loop so selections are unit-testable.

use crate::batch::RunConfig;
use crate::profile::{GenerationMode, Tier};
use std::io::{BufRead, Write};

/// Parse a generation mode selection ("1" or "2")
pub fn parse_mode(input: &str) -> Option<GenerationMode> {
    match input.trim() {
        "1" => Some(GenerationMode::Synthetic),
        "2" => Some(GenerationMode::OnsetDriven),
        _ => None,
    }
}

/// Parse a difficulty tier selection ("1", "2" or "3")
pub fn parse_tier(input: &str) -> Option<Tier> {
    match input.trim() {
        "1" => Some(Tier::Easy),
        "2" => Some(Tier::Medium),
        "3" => Some(Tier::Hard),
        _ => None,
    }
}

/// Collect the run configuration from stdin, once per run
pub fn collect_run_config() -> std::io::Result<RunConfig> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    collect_from(&mut stdin.lock(), &mut stdout.lock())
}

/// Collect the run configuration from arbitrary reader/writer pairs
pub fn collect_from<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> std::io::Result<RunConfig> {
    writeln!(
        output,
        "Define the settings used for every missing beatmap in this run:"
    )?;

    let mode = prompt_until_valid(
        input,
        output,
        "  Generation mode: [1] Random  [2] Beat Analysis (slow): ",
        parse_mode,
    )?;

    writeln!(output, "  Difficulty:")?;
    for (index, tier) in Tier::ALL.iter().enumerate() {
        writeln!(output, "    [{}] - {}", index + 1, tier.label())?;
    }
    let tier = prompt_until_valid(input, output, "  Select difficulty: ", parse_tier)?;

    Ok(RunConfig { mode, tier })
}

/// Re-prompt until the parser accepts a line.
///
/// EOF on the input is surfaced as an error; there is no valid selection to
/// fall back to.
fn prompt_until_valid<R: BufRead, W: Write, T>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> std::io::Result<T> {
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed before a valid selection was made",
            ));
        }

        match parse(&line) {
            Some(value) => return Ok(value),
            None => writeln!(output, "  ERROR: invalid option, try again.")?,
        }
    }
}
