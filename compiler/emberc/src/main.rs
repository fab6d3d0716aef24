//! Ember CLI

use emberc::commands::{check_file, lex_file, parse_file, run_file, RunOptions};
use emberc::CliError;

fn main() {
    emberc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: ember run <file> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  --strict            Assigning to an undeclared name is an error");
                eprintln!("  --max-depth=<n>     Call depth limit, or 'none' (default: 10000)");
                eprintln!("  --exports           Run as a module and print module.exports");
                std::process::exit(1);
            }
            RunOptions::parse(&args[2..]).and_then(|options| run_file(&options))
        }
        "check" => with_path(&args, "check", check_file),
        "parse" => with_path(&args, "parse", parse_file),
        "lex" => with_path(&args, "lex", lex_file),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("ember {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        emberc::reporting::report(&err);
        std::process::exit(1);
    }
}

/// Run a single-file command, printing its usage when the path is missing.
fn with_path(
    args: &[String],
    command: &str,
    handler: fn(&str) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let Some(path) = args.get(2) else {
        eprintln!("Usage: ember {command} <file>");
        std::process::exit(1);
    };
    handler(path)
}

fn print_usage() {
    println!("Ember scripting language");
    println!();
    println!("Usage: ember <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>       Run a script");
    println!("  check <file>     Lex and parse a file (no execution)");
    println!("  parse <file>     Parse and display statement info");
    println!("  lex <file>       Tokenize and display tokens");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Run options:");
    println!("  --strict            Assigning to an undeclared name is an error");
    println!("  --max-depth=<n>     Call depth limit, or 'none' (default: 10000)");
    println!("  --exports           Run as a module and print module.exports");
    println!();
    println!("Logging: set EMBER_LOG (or RUST_LOG), e.g. EMBER_LOG=ember_eval=debug");
}
