use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::Path;

// Use library instead of local modules
use receipt_points::{Receipt, RuleEngine, VERSION};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("score") => {
            let json = args.iter().skip(2).any(|a| a == "--json");
            match args.iter().skip(2).find(|a| a.as_str() != "--json") {
                Some(path) => run_score(Path::new(path), json),
                None => bail!("usage: receipt-points score <receipt.json> [--json]"),
            }
        }
        Some("rules") => {
            print_rules();
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn run_score(path: &Path, json: bool) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read receipt file: {:?}", path))?;
    let receipt = Receipt::from_json(&bytes).context("Failed to parse receipt JSON")?;

    let engine = RuleEngine::new();
    let breakdown = engine
        .breakdown(&receipt)
        .with_context(|| format!("Cannot compute points for {:?}", path))?;

    if json {
        let output = serde_json::json!({
            "contributions": &breakdown.contributions,
            "points": breakdown.total(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("🧾 {} ({} items, total {})", receipt.retailer, receipt.items.len(), receipt.total);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for contribution in &breakdown.contributions {
        println!("{:>6}  {}", contribution.points, contribution.rule.code());
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{:>6}  points", breakdown.total());

    Ok(())
}

fn print_rules() {
    let engine = RuleEngine::new();
    println!("📋 {} scoring rules", engine.rule_count());
    for rule in receipt_points::ScoringRule::ALL {
        println!("  {:<24} {}", rule.code(), rule.description());
    }
}

fn print_usage() {
    println!("receipt-points {}", VERSION);
    println!();
    println!("Usage:");
    println!("  receipt-points score <receipt.json>   Print the points breakdown for a receipt");
    println!("      --json                            Print the breakdown as JSON");
    println!("  receipt-points rules                  List the scoring rules");
    println!();
    println!("Run the HTTP service with: cargo run --bin receipt-server");
}
