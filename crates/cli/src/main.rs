use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Attraction, Category};
use filter_engine::{AnnotatedAttraction, FilterAction, FilterState};
use sources::{DEFAULT_BASE_URL, SourceConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;
use viewer::MapViewer;

/// Heritage Map - filtered attraction viewer
#[derive(Parser)]
#[command(name = "heritage-map")]
#[command(about = "Browse English Heritage properties and associated attractions with filters", long_about = None)]
struct Cli {
    /// Base URL of the attraction backend
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read ehproperties.json and assocattractions.json from this directory instead
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attractions visible under the given filter changes
    Show {
        /// Filter change, applied in order (e.g. popular=on, category:castle=on, ehProperty=off)
        #[arg(long = "set", value_name = "ACTION")]
        actions: Vec<FilterAction>,

        /// Also list hidden attractions
        #[arg(long)]
        all: bool,

        /// Print the annotated records as JSON
        #[arg(long)]
        json: bool,

        /// Show which rules made each attraction visible
        #[arg(long)]
        explain: bool,
    },

    /// Print map markers for the visible attractions as JSON
    Markers {
        /// Filter change, applied in order
        #[arg(long = "set", value_name = "ACTION")]
        actions: Vec<FilterAction>,
    },

    /// List the category filters
    Categories,

    /// Show counts per ownership tag and category
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // The category list is static; everything else needs the data.
    if let Commands::Categories = cli.command {
        handle_categories();
        return Ok(());
    }

    let mut viewer = build_viewer(&cli)?;
    let start = Instant::now();
    let loaded = viewer
        .load()
        .await
        .context("Failed to load attraction lists")?;
    eprintln!(
        "{} Loaded {} attractions in {:?}",
        "✓".green(),
        loaded,
        start.elapsed()
    );

    match cli.command {
        Commands::Show {
            actions,
            all,
            json,
            explain,
        } => handle_show(&mut viewer, &actions, all, json, explain)?,
        Commands::Markers { actions } => handle_markers(&mut viewer, &actions)?,
        Commands::Summary => handle_summary(&viewer),
        Commands::Categories => {}
    }

    Ok(())
}

fn build_viewer(cli: &Cli) -> Result<MapViewer> {
    match &cli.data_dir {
        Some(dir) => Ok(MapViewer::from_data_dir(dir)),
        None => {
            let config = SourceConfig::new(cli.base_url.clone())
                .with_timeout(Duration::from_secs(cli.timeout_secs));
            MapViewer::from_config(&config)
        }
    }
}

/// Handle the 'show' command
fn handle_show(
    viewer: &mut MapViewer,
    actions: &[FilterAction],
    all: bool,
    json: bool,
    explain: bool,
) -> Result<()> {
    debug!("Applying {} filter actions", actions.len());
    viewer.apply_all(actions);

    let annotated: Vec<AnnotatedAttraction<'_>> = viewer
        .filtered()
        .into_iter()
        .filter(|a| all || a.visible)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&annotated)?);
        return Ok(());
    }

    print_filters(viewer.filters());
    println!();

    let visible = annotated.iter().filter(|a| a.visible).count();
    println!(
        "{}",
        format!("Showing {} of {} attractions:", visible, viewer.attractions().len())
            .bold()
            .blue()
    );
    for entry in &annotated {
        print_attraction(entry.attraction, entry.visible);
        if explain && entry.visible {
            let rules = viewer.explain_record(entry.attraction);
            println!("     {} {}", "matched:".dimmed(), rules.join(", "));
        }
    }
    Ok(())
}

/// Handle the 'markers' command
fn handle_markers(viewer: &mut MapViewer, actions: &[FilterAction]) -> Result<()> {
    viewer.apply_all(actions);
    let markers = viewer.markers();
    println!("{}", serde_json::to_string_pretty(&markers)?);
    Ok(())
}

/// Handle the 'categories' command
fn handle_categories() {
    println!("{}", "Categories:".bold().blue());
    for category in Category::ALL {
        println!("{}{:<14} {}", "• ".green(), category.id(), category.label());
    }
}

/// Handle the 'summary' command
fn handle_summary(viewer: &MapViewer) {
    let summary = viewer.summary();

    println!("{}", "Attractions:".bold().blue());
    println!("{}Total: {}", "• ".green(), summary.total);
    println!("{}Popular: {}", "• ".green(), summary.popular);

    println!("By ownership:");
    for (ownership, count) in &summary.by_ownership {
        println!("  - {}: {}", ownership, count);
    }

    println!("By category:");
    for (category, count) in &summary.by_category {
        println!("  - {}: {}", category.label(), count);
    }
}

/// Print the current value of every filter
fn print_filters(filters: &FilterState) {
    let switch = |on: bool| if on { "on".green() } else { "off".dimmed() };
    let ownership = filters.ownership();

    println!("{}", "Filters:".bold().blue());
    println!("{}EH properties: {}", "• ".cyan(), switch(ownership.eh_property));
    println!(
        "{}Associated attractions: {}",
        "• ".cyan(),
        switch(ownership.assoc_attraction)
    );
    println!("{}Most popular: {}", "• ".cyan(), switch(filters.popular()));

    let labels = filters.categories().selected_labels();
    let categories = if labels.is_empty() {
        "none".dimmed().to_string()
    } else {
        labels.join(", ")
    };
    println!("{}Categories: {}", "• ".cyan(), categories);
    if filters.is_all_off() {
        println!("  {}", "(no filters set, showing everything)".dimmed());
    }
}

/// Print one attraction line
fn print_attraction(attraction: &Attraction, visible: bool) {
    let mark = if visible { "✓".green() } else { "✗".red() };
    let popular = if attraction.popular { " ★".yellow().to_string() } else { String::new() };
    let categories = if attraction.categories.is_empty() {
        String::new()
    } else {
        format!(" [{}]", attraction.categories.join(", "))
    };
    println!(
        "  {} {} {}{}{} ({})",
        mark,
        attraction.id,
        attraction.name,
        popular,
        categories,
        attraction.ownership
    );
}
