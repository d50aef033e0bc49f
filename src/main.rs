//! Varline - named variables, derived values and formulas from the command line

mod config;
mod error;
mod report;

use anyhow::Context;
use error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use varline_core::{Book, ContextBindings};
use varline_engine::engine::{evaluate, format_number};

fn print_usage() {
    eprintln!("Usage: varline [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Definitions file (.vars or .toml)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -x, --execute <NAME>      Execute a formula (can be repeated)");
    eprintln!("  -s, --set <NAME=VALUE>    Supply a context value (can be repeated)");
    eprintln!("  -e, --eval <EXPR>         Evaluate a bare arithmetic expression");
    eprintln!("  --config <FILE>           Load settings from this TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Without a FILE or configured definitions, a payroll sample is used.");
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    help: bool,
    file_path: Option<PathBuf>,
    execute: Vec<String>,
    bindings: Vec<(String, String)>,
    expressions: Vec<String>,
    config_file: Option<PathBuf>,
    no_config: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let mut value = || -> Result<String> {
            i += 1;
            args.get(i)
                .cloned()
                .ok_or_else(|| AppError::MissingValue(flag.to_string()))
        };
        match flag {
            "-h" | "--help" => options.help = true,
            "-x" | "--execute" => {
                let name = value()?;
                options.execute.push(name.trim().to_uppercase());
            }
            "-s" | "--set" => {
                let binding = value()?;
                let Some((name, val)) = binding.split_once('=') else {
                    return Err(AppError::InvalidBinding(binding));
                };
                options.bindings.push((name.trim().to_string(), val.to_string()));
            }
            "-e" | "--eval" => {
                let expr = value()?;
                options.expressions.push(expr);
            }
            "--config" => options.config_file = Some(PathBuf::from(value()?)),
            "--no-config" => options.no_config = true,
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(AppError::UnknownOption(arg.to_string()));
            }
            arg => {
                if options.file_path.is_some() {
                    return Err(AppError::UnexpectedArgument(arg.to_string()));
                }
                options.file_path = Some(PathBuf::from(arg));
            }
        }
        i += 1;
    }

    Ok(options)
}

/// Returns false when any evaluation or execution failed.
fn run(options: Options) -> anyhow::Result<bool> {
    let (config, warnings) = if options.no_config {
        (config::Config::default(), Vec::new())
    } else {
        config::load_config(options.config_file.as_ref())
    };
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let mut ok = true;

    for expr in &options.expressions {
        match evaluate(expr) {
            Ok(value) => println!("{}", format_number(value)),
            Err(err) => {
                println!("#ERR {}", err);
                ok = false;
            }
        }
    }

    let book = match options.file_path.as_ref().or(config.definitions.as_ref()) {
        Some(path) => Book::load_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Book::payroll_sample(),
    };

    if options.execute.is_empty() {
        if options.expressions.is_empty() {
            print!("{}", report::render_book(&book, &book.resolve()));
        }
        return Ok(ok);
    }

    let mut context: ContextBindings = config.context.clone();
    context.extend(options.bindings.iter().cloned());

    for name in &options.execute {
        match book.execute_formula(name, &context) {
            Ok(value) => println!("{} = {}", name, format_number(value)),
            Err(err) => {
                println!("{}: #ERR {}", name, err);
                ok = false;
            }
        }
    }

    Ok(ok)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };
    if options.help {
        print_usage();
        return;
    }

    match run(options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
