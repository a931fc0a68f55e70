use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use depviz::config::Config;
use depviz::export::{self, ExportData, ExportFormat};
use depviz::graph::{DependencyGraph, GraphBuilder};
use depviz::render::{dot, text, tree, RenderError, TreeStyle};
use depviz::{logging, source};

#[derive(Parser)]
#[command(name = "depviz")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Package dependency graph explorer with load-order resolution", long_about = None)]
struct Cli {
    /// Path to the key,value configuration file
    #[arg(short, long, default_value = "config.csv", global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print listing, load order, tree and diagram
    Graph {
        /// Skip writing the diagram image
        #[arg(long)]
        no_image: bool,
    },
    /// Print only the load order
    Order,
    /// Write the graph in a machine-readable format
    Export {
        /// Output format (json, csv, dot)
        #[arg(short, long, default_value = "json")]
        format: ExportFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match &cli.command {
        Some(Commands::Version) => {
            println!("depviz v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Commands::Graph { no_image }) => run_graph(&load_config(&cli.config)?, !no_image),
        None => run_graph(&load_config(&cli.config)?, true),
        Some(Commands::Order) => run_order(&load_config(&cli.config)?),
        Some(Commands::Export { format, output }) => {
            run_export(&load_config(&cli.config)?, *format, output.as_deref())
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load(path).with_context(|| format!("Failed to load config from {}", path.display()))
}

fn build_graph(config: &Config) -> Result<DependencyGraph> {
    let source = source::open(config.test_mode, &config.repo_url)
        .context("Could not build dependency graph")?;
    let graph = GraphBuilder::new(config.max_depth)
        .build(&config.package_name, source.as_ref())
        .context("Could not build dependency graph")?;

    if graph.is_empty() {
        bail!(
            "Could not build dependency graph: package '{}' was not found",
            config.package_name
        );
    }
    Ok(graph)
}

fn run_graph(config: &Config, write_image: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Configuration loaded:")?;
    write!(out, "{config}")?;

    writeln!(out, "\nBuilding dependency graph...")?;
    let graph = build_graph(config)?;

    writeln!(out, "\nFull dependency graph (package -> [deps]):")?;
    text::write_listing(&graph, &mut out)?;

    writeln!(out, "\nTopological order (loading order):")?;
    let order = graph.topological_order();
    text::write_order(&order, &mut out)?;

    let style = if config.ascii_output {
        TreeStyle::Ascii
    } else {
        TreeStyle::Unicode
    };
    writeln!(out, "\nDependency tree:")?;
    tree::write_tree(
        &graph,
        &config.package_name,
        config.max_depth.saturating_add(1),
        style,
        &mut out,
    )?;

    let diagram = dot::to_dot(&graph);
    writeln!(out, "\nGraphviz diagram:")?;
    write!(out, "{diagram}")?;
    out.flush()?;

    if write_image && !config.output_image.is_empty() {
        let output = Path::new(&config.output_image);
        match dot::render_image(&diagram, output, dot::DEFAULT_TOOL) {
            Ok(()) => writeln!(out, "\nDiagram image written to {}", output.display())?,
            Err(RenderError::ToolNotFound(tool)) => {
                warn!("'{}' is not installed, skipping image output", tool);
            }
            Err(e) => return Err(e).context("Failed to render diagram image"),
        }
    }

    Ok(())
}

fn run_order(config: &Config) -> Result<()> {
    let graph = build_graph(config)?;
    let order = graph.topological_order();
    if order.is_cycle() {
        warn!("Dependency graph of '{}' contains a cycle", config.package_name);
    }
    println!("{}", text::order_line(&order));
    Ok(())
}

fn run_export(config: &Config, format: ExportFormat, output: Option<&Path>) -> Result<()> {
    let graph = build_graph(config)?;
    let order = graph.topological_order();
    let data = ExportData::new(&config.package_name, config.max_depth, &graph, &order);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(format, &data, &mut writer)?;
            writer.flush()?;
            info!("Exported {} to {}", format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export::export(format, &data, &mut writer)?;
        }
    }
    Ok(())
}
