//! Convograph CLI: rank solutions from observed characteristics.
//!
//! Usage:
//!   convograph rank --observe Anxiety=3 --observe Insomnia [--top N]
//!   convograph dump [--json]
//!   convograph mentions "I have been so worried lately"

use clap::{ArgAction, Args, Parser, Subcommand};
use convograph::{load_catalogs, Config, ContextGraph, NodeKey, RankingMode};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "convograph",
    version,
    about = "Weighted recommendation graph for conversations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Characteristic catalog (line format, or .yaml)
    #[arg(long, global = true)]
    characteristics: Option<PathBuf>,
    /// Solution catalog (line format, or .yaml)
    #[arg(long, global = true)]
    solutions: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print solutions ranked by accumulated weight
    Rank {
        #[command(flatten)]
        graph: GraphArgs,
        /// Only print the first N solutions
        #[arg(long)]
        top: Option<usize>,
        /// Leave disabled solutions out of the ranking
        #[arg(long)]
        exclude_disabled: bool,
        /// Keep disabled solutions in the ranking, whatever the config says
        #[arg(long, conflicts_with = "exclude_disabled")]
        include_disabled: bool,
    },
    /// Print every node and edge of the graph
    Dump {
        #[command(flatten)]
        graph: GraphArgs,
        /// Emit a JSON snapshot instead of the text rendering
        #[arg(long)]
        json: bool,
    },
    /// List the characteristics mentioned in a piece of text
    Mentions {
        /// Text to scan
        text: String,
    },
}

/// Events applied to a fresh graph before it is printed
#[derive(Args)]
struct GraphArgs {
    /// Observe a characteristic, NAME or NAME=AMOUNT
    #[arg(long, value_parser = parse_observation)]
    observe: Vec<Observation>,
    /// Disable a solution node
    #[arg(long)]
    disable_solution: Vec<String>,
    /// Disable a characteristic node
    #[arg(long)]
    disable_characteristic: Vec<String>,
    /// Disable an edge, CHARACTERISTIC:SOLUTION
    #[arg(long, value_parser = parse_edge)]
    disable_edge: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
struct Observation {
    characteristic: String,
    amount: Option<f64>,
}

fn parse_observation(arg: &str) -> Result<Observation, String> {
    let (name, amount) = match arg.rsplit_once('=') {
        Some((name, amount)) => {
            let amount = amount
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid amount '{}': {}", amount, e))?;
            if !amount.is_finite() {
                return Err(format!("amount must be finite, got {}", amount));
            }
            (name, Some(amount))
        }
        None => (arg, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("characteristic name is empty".to_string());
    }
    Ok(Observation {
        characteristic: name.to_string(),
        amount,
    })
}

fn parse_edge(arg: &str) -> Result<(String, String), String> {
    match arg.split_once(':') {
        Some((ch, sol)) if !ch.trim().is_empty() && !sol.trim().is_empty() => {
            Ok((ch.trim().to_string(), sol.trim().to_string()))
        }
        _ => Err(format!("expected CHARACTERISTIC:SOLUTION, got '{}'", arg)),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve catalog paths from flags, then config, and build the graph
fn open_graph(cli: &Cli, config: &Config) -> Result<ContextGraph, String> {
    let characteristics = cli
        .characteristics
        .clone()
        .or_else(|| config.characteristics.clone())
        .ok_or("no characteristic catalog (use --characteristics or set it in the config)")?;
    let solutions = cli
        .solutions
        .clone()
        .or_else(|| config.solutions.clone())
        .ok_or("no solution catalog (use --solutions or set it in the config)")?;

    let (characteristics, solutions) =
        load_catalogs(&characteristics, &solutions).map_err(|e| e.to_string())?;
    Ok(ContextGraph::new(characteristics, solutions))
}

/// Controls first, then observations in the order given
fn apply(graph: &mut ContextGraph, args: &GraphArgs, config: &Config) -> Result<(), String> {
    for name in &args.disable_solution {
        graph
            .set_node_enabled(NodeKey::Solution(name), false)
            .map_err(|e| e.to_string())?;
    }
    for name in &args.disable_characteristic {
        graph
            .set_node_enabled(NodeKey::Characteristic(name), false)
            .map_err(|e| e.to_string())?;
    }
    for (characteristic, solution) in &args.disable_edge {
        graph
            .set_edge_enabled(characteristic.as_str(), solution.as_str(), false)
            .map_err(|e| e.to_string())?;
    }
    for observation in &args.observe {
        let amount = observation.amount.unwrap_or(config.default_increment);
        graph
            .increment(observation.characteristic.as_str(), amount)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// A ranking flag wins over the config
fn ranking_mode(exclude_disabled: bool, include_disabled: bool, config: &Config) -> RankingMode {
    if exclude_disabled {
        RankingMode::ExcludeDisabled
    } else if include_disabled {
        RankingMode::IncludeDisabled
    } else {
        config.ranking
    }
}

fn cmd_rank(graph: &ContextGraph, top: Option<usize>, mode: RankingMode) -> i32 {
    let ranking = graph.ranking_with(mode);
    if ranking.is_empty() {
        println!("No solutions to rank.");
        return 0;
    }
    println!("{:>4}  {:<24}  {:>10}  {}", "RANK", "SOLUTION", "WEIGHT", "STATE");
    println!("{}", "-".repeat(52));
    for (i, entry) in ranking
        .iter()
        .take(top.unwrap_or(usize::MAX))
        .enumerate()
    {
        println!(
            "{:>4}  {:<24}  {:>10.3}  {}",
            i + 1,
            entry.solution.name,
            entry.weight,
            if entry.enabled { "enabled" } else { "disabled" }
        );
    }
    0
}

fn cmd_dump(graph: &ContextGraph, json: bool) -> i32 {
    if !json {
        print!("{}", graph);
        return 0;
    }
    match serde_json::to_string_pretty(&graph.snapshot()) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_mentions(graph: &ContextGraph, text: &str) -> i32 {
    let mentioned = graph.characteristics().mentioned_in(text);
    if mentioned.is_empty() {
        println!("No characteristics mentioned.");
        return 0;
    }
    for characteristic in mentioned {
        println!("{}", characteristic.name);
    }
    0
}

fn run(cli: &Cli) -> Result<i32, String> {
    let config = Config::discover(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let mut graph = open_graph(cli, &config)?;
    let code = match &cli.command {
        Commands::Rank {
            graph: args,
            top,
            exclude_disabled,
            include_disabled,
        } => {
            apply(&mut graph, args, &config)?;
            let mode = ranking_mode(*exclude_disabled, *include_disabled, &config);
            cmd_rank(&graph, *top, mode)
        }
        Commands::Dump { graph: args, json } => {
            apply(&mut graph, args, &config)?;
            cmd_dump(&graph, *json)
        }
        Commands::Mentions { text } => cmd_mentions(&graph, text),
    };
    Ok(code)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };
    std::process::exit(code);
}
