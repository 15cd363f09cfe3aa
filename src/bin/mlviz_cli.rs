//! Terminal front-end for the dashboard core.
//!
//! Examples:
//!   mlviz-cli render
//!   mlviz-cli render --category supervised --type classification
//!   mlviz-cli project --category all --type dimensionality
//!   mlviz-cli replay actions.jsonl
//!   mlviz-cli --seed 42 dump
//!
//! Settings are read from `<config dir>/mlviz/config.json` when that file
//! exists; override with `--config path`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use mlviz::prelude::*;
use mlviz::presenter::display_subtitle;
use tracing::{debug, info};

fn usage() -> ! {
    eprintln!("mlviz-cli (ML algorithm dashboard in the terminal)");
    eprintln!("Usage: mlviz-cli [--seed N] [--config path] <command> [args]\n");
    eprintln!("Commands:");
    eprintln!("  render [--category C] [--type T]   Print the dashboard");
    eprintln!("  project --category C --type T      Print visible algorithm ids");
    eprintln!("  replay <actions.jsonl>             Apply actions, print the dashboard");
    eprintln!("  dump                               Print the dashboard as JSON");
    eprintln!("  paths                              Show the default config path\n");
    eprintln!("Categories: all | supervised | unsupervised");
    eprintln!("Types:      all | regression | classification | clustering | dimensionality");
    process::exit(1);
}

struct Globals {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args() -> (Globals, Vec<String>) {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let mut globals = Globals {
        seed: None,
        config: None,
    };

    loop {
        match args.first().map(String::as_str) {
            Some("--seed") if args.len() >= 2 => {
                let seed = args[1]
                    .parse()
                    .unwrap_or_else(|_| fail("--seed must be an unsigned integer"));
                globals.seed = Some(seed);
                args.drain(0..2);
            }
            Some("--config") if args.len() >= 2 => {
                globals.config = Some(PathBuf::from(&args[1]));
                args.drain(0..2);
            }
            Some("--seed") | Some("--config") => usage(),
            _ => break,
        }
    }

    if args.is_empty() {
        usage();
    }
    (globals, args)
}

fn fail(msg: &str) -> ! {
    eprintln!("{msg}");
    process::exit(1);
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mlviz").join("config.json"))
}

fn load_config(globals: &Globals) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut cfg = match &globals.config {
        Some(path) => DashboardConfig::load(path)?,
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "using default config");
                DashboardConfig::load(&path)?
            }
            None => DashboardConfig::default(),
        },
    };
    if let Some(seed) = globals.seed {
        cfg = cfg.with_seed(seed);
    }
    Ok(cfg)
}

/// `--category C` / `--type T` pairs after the subcommand.
fn parse_filters(rest: &[String]) -> Result<FilterState, VizError> {
    let mut filters = FilterState::default();
    let mut it = rest.iter();
    while let Some(flag) = it.next() {
        let Some(value) = it.next() else { usage() };
        match flag.as_str() {
            "--category" => filters.category = value.parse()?,
            "--type" => filters.algorithm_type = value.parse()?,
            _ => usage(),
        }
    }
    Ok(filters)
}

fn apply_filters(dash: &mut Dashboard, filters: FilterState) {
    dash.select_category(filters.category);
    dash.select_type(filters.algorithm_type);
}

fn replay(dash: &mut Dashboard, path: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut applied = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let action: UserAction = serde_json::from_str(line)
            .map_err(|e| format!("{}:{}: {e}", path.display(), lineno + 1))?;
        dash.dispatch(action)
            .map_err(|e| format!("{}:{}: {e}", path.display(), lineno + 1))?;
        applied += 1;
    }
    Ok(applied)
}

fn print_filter_row(name: &str, buttons: &[mlviz::projector::FilterButton]) {
    let row: Vec<String> = buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.caption)
            } else {
                format!(" {} ", b.caption)
            }
        })
        .collect();
    println!("{name:<10}{}", row.join(" "));
}

fn print_card(card: &AlgorithmCard) {
    println!("== {} ==", card.name);
    println!("   {}", display_subtitle(card));
    if card.loading.is_loading() {
        println!("   (loading)");
    }

    let datasets: Vec<String> = card
        .dataset
        .buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("*{}", b.name)
            } else {
                b.name.clone()
            }
        })
        .collect();
    println!("   datasets: {}", datasets.join(", "));
    println!(
        "   {} ({} samples, {}): {}",
        card.dataset.name,
        card.dataset.samples,
        card.dataset.source,
        card.dataset.features.join(", ")
    );
    println!(
        "   epochs: {} of {:?}",
        card.epochs.current, card.epochs.choices
    );

    let series: Vec<String> = card
        .chart
        .series
        .iter()
        .map(|s| format!("{} ({})", s.label, s.points.len()))
        .collect();
    println!("   {} chart: {}", card.chart.kind.label(), series.join(", "));

    if card.table.is_empty() {
        println!("   no iterations");
    } else {
        let header = card.table.header();
        let widths: Vec<usize> = header.iter().map(|h| h.len().max(8)).collect();
        let line: Vec<String> = header
            .iter()
            .zip(&widths)
            .map(|(h, &w)| format!("{h:>w$}"))
            .collect();
        println!("   {}", line.join("  "));
        for row in &card.table.rows {
            let mut cells = vec![format!("{:>w$}", row.epoch, w = widths[0])];
            cells.extend(
                row.cells
                    .iter()
                    .zip(&widths[1..])
                    .map(|(c, &w)| format!("{c:>w$}")),
            );
            println!("   {}", cells.join("  "));
        }
    }
    println!();
}

fn print_view(view: &DashboardView) {
    print_filter_row("Category", &view.filter_bar.category);
    print_filter_row("Type", &view.filter_bar.algorithm_type);
    println!();
    if view.cards.is_empty() {
        println!("No algorithms match the selected filters.");
        return;
    }
    for card in &view.cards {
        print_card(card);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let (globals, args) = parse_args();
    let cmd = args[0].as_str();
    let rest = &args[1..];

    if cmd == "paths" {
        match default_config_path() {
            Some(p) => println!("Config file: {}", p.display()),
            None => println!("Config file: (no config directory on this platform)"),
        }
        return Ok(());
    }

    let config = load_config(&globals)?;
    let mut dash = Dashboard::with_config(config)?;

    match cmd {
        "render" => {
            let filters = parse_filters(rest)?;
            apply_filters(&mut dash, filters);
            print_view(&dash.render()?);
        }
        "project" => {
            if rest.is_empty() {
                usage();
            }
            let filters = parse_filters(rest)?;
            apply_filters(&mut dash, filters);
            for algo in dash.visible() {
                println!("{}", algo.id);
            }
        }
        "replay" => {
            let Some(path) = rest.first() else { usage() };
            let applied = replay(&mut dash, Path::new(path))?;
            info!(applied, version = dash.store().version(), "replay finished");
            print_view(&dash.render()?);
        }
        "dump" => {
            let view = dash.render()?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        _ => usage(),
    }

    Ok(())
}
