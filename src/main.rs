mod environment;
mod error;
mod expr;
mod interpreter;
mod lox;
mod native_functions;
mod parser;
mod resolver;
mod scanner;
mod stmt;
mod token;
mod value;

use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::exit;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        writeln!(io::stderr(), "Usage: {} <command> <filename>", args[0]).ok();
        exit(64);
    }

    let command = &args[1];
    let filename = &args[2];

    let source = match read_source(filename) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{err:#}");
            exit(74);
        }
    };

    match command.as_str() {
        "tokenize" => lox::tokenize(source),
        "parse" => lox::parse(source),
        "evaluate" => lox::evaluate(source),
        "run" => lox::run(source),
        _ => {
            writeln!(io::stderr(), "Unknown command: {}", command).ok();
            exit(64);
        }
    }

    if error::had_error() {
        exit(65);
    }
    if error::had_runtime_error() {
        exit(70);
    }
}

fn read_source(filename: &str) -> Result<String> {
    fs::read_to_string(filename).with_context(|| format!("Failed to read file {filename}"))
}
