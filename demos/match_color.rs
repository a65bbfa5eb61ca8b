//! Command-line interface for pigment_match
//!
//! Ranks pre-made paints and computes a mixing recipe for a target color.
//!
//! ```text
//! cargo run --example match_color -- "#6B8E23" --catalog paints.json --in-stock white,black,cad-yellow
//! RUST_LOG=pigment_match=debug cargo run --example match_color -- "#6B8E23"
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use pigment_match::{
    Catalog, Inventory, MatchConfig, MatchError, Pigment, PigmentMatcher, RankedPigment,
    RecipeMatch, Rgb,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "match_color", about = "Find paints and mixing recipes for a target color")]
struct Args {
    /// Target color as #RRGGBB
    target: String,

    /// JSON catalog: [{"id", "display_name", "color": "#RRGGBB", "role"?}]
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON engine configuration (see generate_config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated ids of pigments in stock
    #[arg(long, value_delimiter = ',')]
    in_stock: Option<Vec<String>>,

    /// Number of ranked paints to show
    #[arg(long)]
    limit: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    ranking: Vec<RankedPigment>,
    recipe: Option<RecipeMatch>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e.user_message());
        eprintln!("  ({})", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), MatchError> {
    let config = match &args.config {
        Some(path) => MatchConfig::from_json_file(path)?,
        None => MatchConfig::default(),
    };
    let matcher = PigmentMatcher::with_config(config)?;

    let catalog = match &args.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::new(builtin_catalog())?,
    };
    let inventory = args.in_stock.as_ref().map(Inventory::from_ids);

    let ranking = matcher.rank_hex(&args.target, catalog.pigments(), inventory.as_ref(), args.limit)?;
    let recipe = matcher.recipe_hex(&args.target, catalog.pigments(), inventory.as_ref())?;
    let report = Report { ranking, recipe };

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| MatchError::serialization("serializing report", e))?;
        println!("{}", json);
    } else {
        print_report(&args.target, &report);
    }
    Ok(())
}

fn print_report(target: &str, report: &Report) {
    println!("Target: {}", target.to_uppercase());
    println!();

    if report.ranking.is_empty() {
        println!("No paints in stock.");
        return;
    }

    println!("Closest paints:");
    for (rank, ranked) in report.ranking.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {}  ΔE {:>6.2}  {:>5.1}%",
            rank + 1,
            ranked.pigment.display_name,
            hex(ranked.pigment.color),
            ranked.distance,
            ranked.accuracy
        );
    }

    if let Some(recipe) = &report.recipe {
        println!();
        println!(
            "Recipe ({:?}): {}  ΔE {:.2}  {:.1}%",
            recipe.kind, recipe.achieved_hex, recipe.distance, recipe.accuracy
        );
        for entry in &recipe.recipe {
            println!("  {:>5} parts {}", entry.parts, entry.pigment.display_name);
        }
    }
}

fn hex(color: Rgb) -> String {
    pigment_match::ColorConverter::new().rgb_to_hex(color)
}

fn builtin_catalog() -> Vec<Pigment> {
    [
        ("white", "Titanium White", (255, 255, 255)),
        ("black", "Ivory Black", (0, 0, 0)),
        ("cad-yellow", "Cadmium Yellow", (255, 246, 0)),
        ("cad-red", "Cadmium Red", (227, 0, 34)),
        ("ultramarine", "Ultramarine Blue", (18, 10, 143)),
        ("phthalo-green", "Phthalo Green", (18, 53, 36)),
        ("burnt-sienna", "Burnt Sienna", (233, 116, 81)),
        ("yellow-ochre", "Yellow Ochre", (203, 157, 6)),
        ("alizarin", "Alizarin Crimson", (227, 38, 54)),
        ("cerulean", "Cerulean Blue", (42, 82, 190)),
        ("dioxazine", "Dioxazine Purple", (91, 44, 111)),
        ("raw-umber", "Raw Umber", (130, 102, 68)),
    ]
    .into_iter()
    .map(|(id, name, (r, g, b))| Pigment::new(id, name, Rgb::new(r, g, b)))
    .collect()
}
