//! Tree Diagram CLI
//!
//! Usage:
//!   tree-diagram [OPTIONS] [FILE]
//!
//! Options:
//!   -o, --output <FILE>      Write SVG here instead of stdout
//!   -c, --config <FILE>      Geometry/limits/SVG configuration (TOML format)
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!   -d, --debug              Log every node position
//!   --log-level <LEVEL>      off, error, warn, info, debug, trace
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{debug, info, LevelFilter};

use tree_diagram::{render_with_config, RenderConfig, Stylesheet, Tree};

#[derive(Parser, Debug)]
#[command(name = "tree-diagram")]
#[command(about = "Render AND/OR labeled trees as SVG diagrams")]
struct Cli {
    /// Input JSON tree (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output SVG file (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Configuration file with [geometry], [limits] and [svg] sections (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: log every node position
    #[arg(short, long)]
    debug: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let mut log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            cli.log_level
        );
        LevelFilter::Warn
    });
    if cli.debug {
        log_level = log_level.max(LevelFilter::Debug);
    }

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(cli:?; "Parsed arguments");

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    if let Err(message) = run(&cli) {
        eprintln!("{message}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_file(path)
            .map_err(|e| format!("Error loading config '{}': {}", path.display(), e))?,
        None => RenderConfig::default(),
    };

    if let Some(path) = &cli.stylesheet {
        let stylesheet = Stylesheet::from_file(path)
            .map_err(|e| format!("Error loading stylesheet '{}': {}", path.display(), e))?;
        config = config.with_stylesheet(stylesheet);
    }
    config = config.with_debug(cli.debug);

    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Error reading file '{}': {}", path.display(), e))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("Error reading from stdin: {}", e))?;
            buffer
        }
    };

    let tree = Tree::from_json(&source).map_err(|e| format!("Error: {}", e))?;
    let diagram = render_with_config(&tree, &config).map_err(|e| format!("Error: {}", e))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &diagram.markup)
                .map_err(|e| format!("Error writing '{}': {}", path.display(), e))?;
            info!(
                output = path.display().to_string(),
                width = diagram.width,
                height = diagram.height;
                "SVG written"
            );
        }
        None => println!("{}", diagram.markup),
    }

    Ok(())
}

fn print_intro() {
    println!(
        r#"Tree Diagram - Render AND/OR labeled trees as SVG

USAGE:
    tree-diagram [OPTIONS] [FILE]
    echo '<json>' | tree-diagram

OPTIONS:
    -o, --output       Write SVG to a file instead of stdout
    -c, --config       Geometry, limits and SVG options (TOML file)
    -s, --stylesheet   Custom color palette (TOML file)
    -d, --debug        Log node positions
    --log-level        off, error, warn, info, debug, trace
    -h, --help         Print help

INPUT:
    {{"name": "login", "relation_type": "and",
      "children": [{{"name": "password"}}, {{"name": "otp"}}]}}

    A {{"root_node": ...}} wrapper is accepted too. relation_type is
    "and" or "or"; nodes without children are drawn as circles."#
    );
}
