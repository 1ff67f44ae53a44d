//! # Command Line
//!
//! `checkout` subcommands and their output.
//!
//! ```text
//! checkout [--config <path>] <command>
//!
//!   items                                     list the shop's items
//!   catalog [--selected <id>...]              promotions with selected/disabled flags
//!   price --item <id>... --promo <id>...      subtotal, discount and net
//!         [--points <n>]
//!   session [<script>] [--points <n>]         run session steps (stdin by default)
//!   draft <file> [--id <n>]                   validate a promotion draft
//!   config                                    print the effective configuration
//! ```
//!
//! Every subcommand runs against a fresh session; nothing is persisted
//! between invocations.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use cartwise_core::{Points, PricingOutcome, PromotionDraft, PromotionOption};

use crate::commands::{self, cart::CartResponse};
use crate::config::CheckoutConfig;
use crate::error::ApiResult;
use crate::script::Step;
use crate::state::{CatalogState, CheckoutState};

#[derive(Debug, Parser)]
#[command(name = "checkout")]
#[command(about = "Price a cart against the promotion catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to checkout.toml (default: platform config directory)
    #[arg(long, global = true, env = "CARTWISE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the item catalog
    Items,

    /// List promotions and whether each can still be chosen
    Catalog {
        /// Promotion ids to select before listing
        #[arg(long = "selected", value_name = "ID")]
        selected: Vec<u32>,
    },

    /// Price a cart
    Price {
        /// Item ids to put in the cart
        #[arg(long = "item", value_name = "ID", required = true)]
        items: Vec<u32>,

        /// Promotion ids to apply, one per group
        #[arg(long = "promo", value_name = "ID")]
        promos: Vec<u32>,

        /// Loyalty points balance (default from config)
        #[arg(long, value_parser = parse_points)]
        points: Option<Points>,
    },

    /// Run one checkout session from a step script
    Session {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        /// Loyalty points balance (default from config)
        #[arg(long, value_parser = parse_points)]
        points: Option<Points>,
    },

    /// Validate a promotion draft (JSON) without adding it to the catalog
    Draft {
        /// Draft file
        path: PathBuf,

        /// Id to give the promotion
        #[arg(long, default_value_t = 1)]
        id: u32,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Whole, non-negative points no larger than `Points::MAX_WHOLE`.
fn parse_points(s: &str) -> Result<Points, String> {
    let whole: u64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a whole non-negative number", s))?;
    Points::checked_from_whole(whole)
        .ok_or_else(|| format!("at most {} points are accepted", Points::MAX_WHOLE))
}

/// Loaded configuration and catalog shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub catalog: CatalogState,
    pub config: CheckoutConfig,
    pub points: Points,
}

impl Context {
    /// Fails when the configured balance is out of range.
    pub fn new(config: CheckoutConfig, catalog: CatalogState) -> Result<Self> {
        let points = config.points()?;
        Ok(Context {
            catalog,
            config,
            points,
        })
    }

    fn symbol(&self) -> &str {
        &self.config.display.currency_symbol
    }
}

/// Runs one subcommand, writing its report to `out`. `input` feeds
/// `session` when no script file is given.
pub fn run(
    command: Commands,
    ctx: &Context,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Commands::Items => print_items(ctx, out),
        Commands::Catalog { selected } => print_catalog(ctx, &selected, out),
        Commands::Price {
            items,
            promos,
            points,
        } => print_price(ctx, &items, &promos, points.unwrap_or(ctx.points), out),
        Commands::Session { script, points } => {
            let points = points.unwrap_or(ctx.points);
            match script {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("Failed to open script {}", path.display()))?;
                    run_session(ctx, points, BufReader::new(file), out)
                }
                None => run_session(ctx, points, input, out),
            }
        }
        Commands::Draft { path, id } => print_draft(&path, id, out),
        Commands::Config => {
            write!(out, "{}", ctx.config.to_toml()?)?;
            Ok(())
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

fn print_items(ctx: &Context, out: &mut impl Write) -> Result<()> {
    for item in commands::cart::list_items(&ctx.catalog) {
        writeln!(
            out,
            "{:>3}  {:<12} {:<12} {:>12}",
            item.id.to_string(),
            item.name,
            item.category.to_string(),
            item.unit_price.display_with(ctx.symbol())
        )?;
    }
    Ok(())
}

fn print_catalog(ctx: &Context, selected: &[u32], out: &mut impl Write) -> Result<()> {
    let checkout = CheckoutState::new(ctx.points);
    let mut listed = commands::promotion::list_promotions(&checkout, &ctx.catalog);
    for &id in selected {
        listed = commands::promotion::select_promotion(&checkout, &ctx.catalog, id)?;
    }

    write_options(&listed, out)?;
    for rejected in ctx.catalog.rejected() {
        writeln!(out, "  rejected: {}", rejected)?;
    }
    Ok(())
}

fn write_options(options: &[PromotionOption], out: &mut impl Write) -> Result<()> {
    for option in options {
        writeln!(out, "{}", format_option(option))?;
    }
    Ok(())
}

fn format_option(option: &PromotionOption) -> String {
    let mark = if option.selected {
        "[x]"
    } else if option.disabled {
        "[-]"
    } else {
        "[ ]"
    };
    format!(
        "{} {:>3}  {:<20} {:<18} {}",
        mark,
        option.id.to_string(),
        option.group.to_string(),
        option.campaign.to_string(),
        option.name
    )
}

// =============================================================================
// Pricing
// =============================================================================

fn print_price(
    ctx: &Context,
    items: &[u32],
    promos: &[u32],
    points: Points,
    out: &mut impl Write,
) -> Result<()> {
    let checkout = CheckoutState::new(points);
    for &id in items {
        commands::cart::add_to_cart(&checkout, &ctx.catalog, id)?;
    }
    for &id in promos {
        commands::promotion::select_promotion(&checkout, &ctx.catalog, id)?;
    }

    let quote = commands::pricing::quote(&checkout)?;
    write_outcome(ctx, &quote.outcome, out)
}

fn write_outcome(ctx: &Context, outcome: &PricingOutcome, out: &mut impl Write) -> Result<()> {
    let symbol = ctx.symbol();
    match outcome {
        PricingOutcome::Unset => writeln!(out, "unset")?,
        PricingOutcome::Priced(result) => {
            writeln!(out, "subtotal  {:>12}", result.subtotal.display_with(symbol))?;
            for c in &result.contributions {
                writeln!(
                    out,
                    "  #{:<3} {:<18} -{}",
                    c.promotion_id.to_string(),
                    c.campaign.to_string(),
                    c.amount.display_with(symbol)
                )?;
            }
            writeln!(out, "discount  {:>12}", result.discount.display_with(symbol))?;
            writeln!(out, "net       {:>12}", result.net.display_with(symbol))?;
        }
    }
    Ok(())
}

// =============================================================================
// Session
// =============================================================================

enum StepReport {
    Cart(CartResponse),
    Promotions(Vec<PromotionOption>),
    Quote(PricingOutcome),
}

/// Applies every step to one session. A failed step is reported with its
/// line number and the session carries on from the state it left.
fn run_session(
    ctx: &Context,
    points: Points,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let checkout = CheckoutState::new(points);

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read session script")?;
        let number = index + 1;

        let step = match Step::parse_line(&line) {
            Ok(Some(step)) => step,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "line {}: {}", number, err)?;
                continue;
            }
        };

        match apply_step(ctx, &checkout, step) {
            Ok(StepReport::Cart(cart)) => writeln!(
                out,
                "cart  {} items  {}  {} selected",
                cart.item_count,
                cart.subtotal.display_with(ctx.symbol()),
                cart.selected_promotions
            )?,
            Ok(StepReport::Promotions(options)) => write_options(&options, out)?,
            Ok(StepReport::Quote(outcome)) => write_outcome(ctx, &outcome, out)?,
            Err(err) => writeln!(out, "line {}: {}", number, err)?,
        }
    }
    Ok(())
}

fn apply_step(ctx: &Context, checkout: &CheckoutState, step: Step) -> ApiResult<StepReport> {
    use commands::{cart, pricing, promotion};

    let catalog = &ctx.catalog;
    Ok(match step {
        Step::Toggle(id) => StepReport::Cart(cart::toggle_item(checkout, catalog, id)?),
        Step::Add(id) => StepReport::Cart(cart::add_to_cart(checkout, catalog, id)?),
        Step::Remove(id) => StepReport::Cart(cart::remove_from_cart(checkout, id)?),
        Step::Clear => StepReport::Cart(cart::clear_cart(checkout)),
        Step::Cart => StepReport::Cart(cart::get_cart(checkout)),
        Step::Select(id) => {
            StepReport::Promotions(promotion::select_promotion(checkout, catalog, id)?)
        }
        Step::Deselect(id) => {
            StepReport::Promotions(promotion::deselect_promotion(checkout, catalog, id))
        }
        Step::Promos => StepReport::Promotions(promotion::list_promotions(checkout, catalog)),
        Step::Quote => StepReport::Quote(pricing::quote(checkout)?.outcome),
    })
}

// =============================================================================
// Draft
// =============================================================================

fn print_draft(path: &Path, id: u32, out: &mut impl Write) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    let draft: PromotionDraft = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse draft {}", path.display()))?;

    let promotion = commands::promotion::preview_draft(&draft, id)?;
    writeln!(
        out,
        "#{}  {}  {}  {}",
        promotion.id(),
        promotion.group(),
        promotion.kind(),
        promotion.name()
    )?;
    writeln!(out, "{}", serde_json::to_string_pretty(promotion.campaign())?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;

    fn context() -> Context {
        let mut config = CheckoutConfig::default();
        config.display.currency_symbol = "THB ".to_string();
        let catalog = CatalogState::load(&CatalogConfig::default()).unwrap();
        Context::new(config, catalog).unwrap()
    }

    fn run_with_input(args: &[&str], input: &str) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(cli.command, &context(), &mut input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn run_args(args: &[&str]) -> Result<String> {
        run_with_input(args, "")
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "checkout", "price", "--item", "1", "--item", "2", "--promo", "3", "--points", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Price {
                items,
                promos,
                points,
            } => {
                assert_eq!(items, vec![1, 2]);
                assert_eq!(promos, vec![3]);
                assert_eq!(points, Some(Points::from_whole(10)));
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["checkout", "items", "--config", "/tmp/c.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_price_requires_items() {
        assert!(Cli::try_parse_from(["checkout", "price", "--promo", "1"]).is_err());
    }

    #[test]
    fn test_points_flag_rejects_negative_and_oversized() {
        assert!(
            Cli::try_parse_from(["checkout", "price", "--item", "1", "--points=-1000"]).is_err()
        );

        let too_many = (Points::MAX_WHOLE + 1).to_string();
        assert!(
            Cli::try_parse_from(["checkout", "price", "--item", "1", "--points", &too_many])
                .is_err()
        );

        let most = Points::MAX_WHOLE.to_string();
        let cli = Cli::try_parse_from(["checkout", "session", "--points", &most]).unwrap();
        match cli.command {
            Commands::Session { points, .. } => {
                assert_eq!(points, Points::checked_from_whole(Points::MAX_WHOLE));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_context_rejects_oversized_config_points() {
        let mut config = CheckoutConfig::default();
        config.customer.points = Points::MAX_WHOLE + 1;
        let catalog = CatalogState::load(&CatalogConfig::default()).unwrap();
        assert!(Context::new(config, catalog).is_err());
    }

    #[test]
    fn test_items_lists_catalog() {
        let out = run_args(&["checkout", "items"]).unwrap();
        assert_eq!(out.lines().count(), 8);
        assert!(out.contains("Sneakers"));
    }

    #[test]
    fn test_price_report() {
        let out = run_args(&["checkout", "price", "--item", "1", "--promo", "2"]).unwrap();
        assert!(out.contains("subtotal"));
        assert!(out.contains("THB 270.00"));
    }

    #[test]
    fn test_price_without_promotions_is_unset() {
        let out = run_args(&["checkout", "price", "--item", "1"]).unwrap();
        assert_eq!(out.trim(), "unset");
    }

    #[test]
    fn test_price_conflict_is_an_error() {
        let err = run_args(&["checkout", "price", "--item", "1", "--promo", "1", "--promo", "2"])
            .unwrap_err();
        assert!(err.to_string().contains("GroupConflict"));
    }

    #[test]
    fn test_points_flag_overrides_config() {
        let out = run_args(&[
            "checkout", "price", "--item", "7", "--item", "8", "--promo", "4", "--points", "0",
        ])
        .unwrap();
        assert!(out.contains("net       "));
        assert!(out.contains("THB 950.00"));
    }

    #[test]
    fn test_catalog_marks_selection() {
        let out = run_args(&["checkout", "catalog", "--selected", "1"]).unwrap();
        assert!(out.lines().any(|l| l.starts_with("[x]   1")));
        assert!(out.lines().any(|l| l.starts_with("[-]   2")));
        assert!(out.lines().any(|l| l.starts_with("[ ]   3")));
    }

    #[test]
    fn test_session_cart_edits_clear_selection() {
        let script = "\
# Tops and Bottoms, 10% off
toggle 1
toggle 2
select 2
quote
toggle 2
quote
";
        let out = run_with_input(&["checkout", "session"], script).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "cart  1 items  THB 300.00  0 selected");
        assert_eq!(lines[1], "cart  2 items  THB 650.00  0 selected");
        assert!(lines.iter().any(|l| l.starts_with("[x]   2")));
        assert!(lines.contains(&"net         THB 585.00"));
        assert_eq!(
            &lines[lines.len() - 2..],
            ["cart  1 items  THB 300.00  0 selected", "unset"]
        );
    }

    #[test]
    fn test_session_reports_failed_steps_and_continues() {
        let script = "\
add 1
add 1
select 9
frobnicate
remove 4
cart
clear
cart
";
        let out = run_with_input(&["checkout", "session"], script).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[1].starts_with("line 2: "));
        assert!(lines[2].starts_with("line 3: [NotFound]"));
        assert_eq!(lines[3], "line 4: Unknown step: frobnicate");
        assert!(lines[4].starts_with("line 5: "));
        assert_eq!(lines[5], "cart  1 items  THB 300.00  0 selected");
        assert_eq!(lines[6], "cart  0 items  THB 0.00  0 selected");
        assert_eq!(lines[7], lines[6]);
    }

    #[test]
    fn test_session_deselect_and_points() {
        let script = "\
add 7
add 8
select 4
deselect 4
promos
select 4
quote
";
        let out = run_with_input(&["checkout", "session", "--points", "100"], script).unwrap();
        assert!(out.lines().any(|l| l.starts_with("[ ]   4")));
        // Half of a 100-point balance.
        assert!(out.contains("net         THB 900.00"));
    }

    #[test]
    fn test_session_reads_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.txt");
        std::fs::write(&path, "add 4\nselect 1\nquote\n").unwrap();

        let out = run_args(&["checkout", "session", path.to_str().unwrap()]).unwrap();
        assert!(out.contains("net        THB 1950.00"));

        let missing = dir.path().join("missing.txt");
        assert!(run_args(&["checkout", "session", missing.to_str().unwrap()]).is_err());
    }

    #[test]
    fn test_draft_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{
                "name": "Points bonanza",
                "details": "Redeem up to 20% of points",
                "group": "OnTop",
                "campaign": "DiscountByPoints",
                "payload": { "percentage": 20 }
            }"#,
        )
        .unwrap();

        let out = run_args(&["checkout", "draft", path.to_str().unwrap(), "--id", "10"]).unwrap();
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("#10  "));
        assert!(first.ends_with("Points bonanza"));
        assert!(out.contains("\"kind\": \"discountByPoints\""));
    }

    #[test]
    fn test_draft_preview_rejects_incomplete_draft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.json");
        std::fs::write(
            &path,
            r#"{ "name": "No campaign", "details": "", "group": "Coupon", "payload": {} }"#,
        )
        .unwrap();

        let err = run_args(&["checkout", "draft", path.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("ValidationError"));
    }

    #[test]
    fn test_config_prints_toml() {
        let out = run_args(&["checkout", "config"]).unwrap();
        let parsed: CheckoutConfig = toml::from_str(&out).unwrap();
        assert_eq!(parsed, context().config);
    }
}
