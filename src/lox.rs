use crate::error;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// Dumps the token stream, one token per line.
pub fn tokenize(source: String) {
    let scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    for token in tokens {
        println!("{}", token);
    }
}

/// Parses a single expression and prints its parenthesized form.
pub fn parse(source: String) {
    let scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    let mut parser = Parser::new(tokens);
    if let Ok(expr) = parser.expression() {
        println!("{expr}");
    }
}

/// Evaluates a single expression and prints its display form. No resolver
/// runs here, so every variable reference is a global.
pub fn evaluate(source: String) {
    let scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    let mut parser = Parser::new(tokens);
    if let Ok(expr) = parser.expression() {
        let mut interpreter = Interpreter::new();
        match interpreter.evaluate(&expr) {
            Ok(evaluated) => println!("{evaluated}"),
            Err(err) => error::runtime_error(err),
        }
    }
}

/// The full pipeline: scan, parse, resolve, interpret. Execution never
/// starts if any static error was reported along the way.
pub fn run(source: String) {
    let scanner = Scanner::new(source);
    let tokens = scanner.scan_tokens();
    let mut parser = Parser::new(tokens);
    let statements = parser.parse();

    if error::had_error() {
        return;
    }

    let resolver = Resolver::new();
    let locals = resolver.resolve(&statements);

    // Stop if there was a resolution error.
    if error::had_error() {
        return;
    }

    let mut interpreter = Interpreter::new_with_resolver(locals);
    interpreter.interpret(&statements);
}
