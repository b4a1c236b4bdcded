//! Gridsync - command-line front end for the remote spreadsheet client

mod commands;
mod config_path;

use std::env;
use std::path::PathBuf;

use commands::Command;

fn print_usage() {
    eprintln!("Usage: gridsync [OPTIONS] <COMMAND> [ARGS]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  address <A1>                       Print the column and row of a label");
    eprintln!("  address <col> <row>                Print the A1 label of coordinates");
    eprintln!("  column <n|letters>                 Convert a column number to letters or back");
    eprintln!("  list                               List accessible spreadsheets");
    eprintln!("  show <spreadsheet> [sheet]         Print the sheets, or one sheet's values");
    eprintln!("  get <spreadsheet> <sheet> <A1>     Print one cell");
    eprintln!("  set <spreadsheet> <sheet> <A1> <value>");
    eprintln!("                                     Write one cell");
    eprintln!("  create <title>                     Create a spreadsheet");
    eprintln!("  export <spreadsheet> <format>      Write an export to stdout");
    eprintln!("                                     (csv, xlsx, ods, pdf, html, tsv)");
    eprintln!();
    eprintln!("A spreadsheet is given by id, URL or title; a sheet by title or 0-based index.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>    Load settings from this TOML file");
    eprintln!("  --ignore-quota     Do not pace requests against the local quota");
    eprintln!("  -h, --help         Print help");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<PathBuf> = None;
    let mut ignore_quota = false;
    let mut words: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_file = Some(PathBuf::from(&args[i]));
            }
            "--ignore-quota" => ignore_quota = true,
            // Negative indices and values are arguments, not options.
            arg if arg.starts_with('-') && arg.parse::<f64>().is_err() => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
            _ => words.push(args[i].to_string()),
        }
        i += 1;
    }

    if words.is_empty() {
        print_usage();
        std::process::exit(1);
    }

    let command = match Command::parse(&words) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    let result = if command.is_offline() {
        command.run_offline()
    } else {
        config_path::load_config(config_file.as_deref()).and_then(|mut config| {
            if ignore_quota {
                config.quota.ignore_quota = true;
            }
            command.run(&config)
        })
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
