//! Wiki-Path: shortest paths through a crawled graph
//!
//! Reads the graph artifact written by `wiki-ripple` and prints the shortest
//! chain of links between two articles.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wiki_ripple::graph::{format_path, LinkGraph, PathQuery};
use wiki_ripple::output::{load_graph, print_statistics, GraphStatistics};
use wiki_ripple::GraphFileError;

/// Find shortest path between two pages
#[derive(Parser, Debug)]
#[command(name = "wiki-path")]
#[command(version)]
#[command(about = "Find shortest path between two pages", long_about = None)]
struct Cli {
    /// Starting page
    #[arg(long = "from", value_name = "PAGE", requires = "to")]
    from: Option<String>,

    /// Finishing page
    #[arg(long, value_name = "PAGE", requires = "from")]
    to: Option<String>,

    /// Graph file written by wiki-ripple
    #[arg(short, long, value_name = "FILE", default_value = "wiki.json")]
    graph: PathBuf,

    /// Print graph statistics
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result_graph = match load_graph(&cli.graph) {
        Ok(graph) => graph,
        Err(GraphFileError::NotFound(path)) => {
            tracing::debug!("No graph at {}", path);
            println!("Database not found");
            return ExitCode::FAILURE;
        }
        Err(e @ GraphFileError::Malformed { .. }) => {
            tracing::debug!("{}", e);
            println!("Error in json file");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            println!("Failed to read {}: {}", cli.graph.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if cli.stats {
        print_statistics(&GraphStatistics::from_graph(&result_graph));
        println!();
    }

    let graph = LinkGraph::from_result_graph(&result_graph);
    tracing::info!(
        "Loaded {} vertices and {} edges ({} dangling links pruned)",
        graph.vertex_count(),
        graph.edge_count(),
        graph.pruned_links()
    );

    let (Some(from), Some(to)) = (cli.from, cli.to) else {
        return ExitCode::SUCCESS;
    };

    match graph.shortest_path(&from, &to) {
        PathQuery::Found(path) => {
            println!("Shortest path from {} to {} is:", from, to);
            println!("{}", format_path(&path));
            ExitCode::SUCCESS
        }
        PathQuery::NoPath => {
            println!("No path from {} to {} in this graph.", from, to);
            ExitCode::SUCCESS
        }
        PathQuery::VertexNotFound => {
            println!(
                "Vertex {} or {} not found. Check the spelling and try again.",
                from, to
            );
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("wiki_ripple=debug,wiki_path=debug,info"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
