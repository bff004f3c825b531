//! sqlscalar - inspect and evaluate scalar functions from the command line

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use log::info;
use sqlscalar::expression::{normalize_symbol, Functions, Literal, Symbol, TypeChecker};
use sqlscalar::metadata::{TableContext, TableMetadata};
use sqlscalar::types::Value;
use std::path::PathBuf;

/// Scalar expression core: function registry, constant folding and table metadata
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered function signatures
    Functions {
        /// Only show signatures of this function
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Fold a function call over JSON literal arguments
    Eval {
        /// Function name
        name: String,

        /// Arguments as JSON literals, e.g. '"cratedata"' 6
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show the columns, primary keys and routing of a table mapping
    Columns {
        /// Path to a JSON table mapping
        #[arg(short, long)]
        mapping: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Functions { name } => list_functions(name.as_deref()),
        Command::Eval { name, args } => eval(&name, &args),
        Command::Columns { mapping } => show_columns(mapping),
    }
}

fn list_functions(name: Option<&str>) -> Result<()> {
    let functions = Functions::builtin()?;
    for info in functions.signatures() {
        if name.map_or(true, |n| n == info.name()) {
            println!("{}", info);
        }
    }
    Ok(())
}

fn eval(name: &str, raw_args: &[String]) -> Result<()> {
    let functions = Functions::builtin()?;

    let arguments = raw_args
        .iter()
        .map(|raw| -> Result<Symbol> {
            let json: serde_json::Value = serde_json::from_str(raw)
                .with_context(|| format!("Invalid JSON literal: {}", raw))?;
            Ok(Symbol::Literal(Literal::new(Value::from_json(&json))))
        })
        .collect::<Result<Vec<_>>>()?;

    let function = TypeChecker::new(&functions).bind(name, arguments)?;
    info!("evaluating {}", function.info);

    match normalize_symbol(&functions, function.into())? {
        Symbol::Literal(lit) => println!("{}", lit.value),
        other => println!("{}", other),
    }
    Ok(())
}

fn show_columns(path: PathBuf) -> Result<()> {
    let table = TableContext::from_path(&path)?;

    println!("table: {}", table.name());
    for column in table.all_visible_columns() {
        let data_type = table
            .declared_type(&column)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "object".to_string());
        let routing = if table.is_routing_column(&column) {
            " (routing)"
        } else {
            ""
        };
        println!("  {} {}{}", column, data_type, routing);
    }
    println!(
        "primary keys: {}",
        table.primary_key_columns_or_default().join(", ")
    );
    Ok(())
}
