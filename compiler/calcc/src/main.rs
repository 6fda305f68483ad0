//! calc CLI

use calcc::commands::{disasm_file, eval_expr, run_file};

fn main() {
    calcc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: calc run <file.calc>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: calc eval <expression>");
                eprintln!("Example: calc eval \"1 + 2 * 3\"");
                std::process::exit(1);
            }
            eval_expr(&args[2..].join(" "));
        }
        "disasm" => {
            if args.len() < 3 {
                eprintln!("Usage: calc disasm <file.calc>");
                std::process::exit(1);
            }
            disasm_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("calc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("calc"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("calc: expression language with pattern matching");
    println!();
    println!("Usage: calc <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.calc>      Run a program");
    println!("  eval <expression>    Evaluate an expression and print the results");
    println!("  disasm <file.calc>   Print compiled instructions");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable logging, e.g. RUST_LOG=calc_eval=debug");
    println!();
    println!("Examples:");
    println!("  calc eval \"fact = match((0) -> 1, (n) -> n * fact(n - 1)); fact(10)\"");
    println!("  calc run examples.calc");
    println!("  calc disasm examples.calc");
}
