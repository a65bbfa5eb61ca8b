//! Write a matching configuration to a JSON file
//!
//! Writes the defaults, or a validated copy of an existing file with any
//! missing fields filled in. The output can be edited and passed to
//! `match_color --config`.
//!
//! ```text
//! cargo run --example generate_config -- config/match.json
//! cargo run --example generate_config -- config/match.json --from old.json
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use pigment_match::{MatchConfig, MatchError};

#[derive(Debug, Parser)]
#[command(name = "generate_config", about = "Write a pigment matching configuration")]
struct Args {
    /// Destination JSON file
    output: PathBuf,

    /// Existing configuration to validate and complete
    #[arg(long)]
    from: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    match run(&args) {
        Ok(config) => print_summary(&args, &config),
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            eprintln!("  ({})", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<MatchConfig, MatchError> {
    let config = match &args.from {
        Some(path) => MatchConfig::from_json_file(path)?,
        None => MatchConfig::default(),
    };

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            MatchError::io(format!("creating directory {}", parent.display()), e)
        })?;
    }
    config.to_json_file(&args.output)?;
    Ok(config)
}

fn print_summary(args: &Args, config: &MatchConfig) {
    let search = &config.search;
    eprintln!("Configuration saved to {}", args.output.display());
    eprintln!("  Exact match below ΔE {:.1}", config.exact_match_threshold);
    eprintln!(
        "  Pairs from the {} closest, 1/{} steps; triples from the {} closest, {} splits",
        search.pair_shortlist,
        search.pair_ratio_steps,
        search.triple_shortlist,
        search.triple_splits.len()
    );
    eprintln!(
        "  Tint up to {:.1}% {:?}, shade up to {:.1}% {:?}",
        search.tint_step * search.tint_steps as f64 * 100.0,
        config.references.white_id,
        search.tint_step * search.shade_steps as f64 * 100.0,
        config.references.black_id
    );
}
