use crate::token::{Token, TokenType};
use crate::value::object::Object;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Everything that can stop the pipeline. `Return` is not a failure — it is
/// the unwind used by `return` statements and is caught at the function-call
/// boundary in `Function::call`. It shares the enum so statement execution
/// threads a single `Result` through every exit path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error")]
    ParseError,

    #[error("{1}")]
    RuntimeError(Token, String),

    #[error("return")]
    Return(Object),
}

static HAD_ERROR: AtomicBool = AtomicBool::new(false);
static HAD_RUNTIME_ERROR: AtomicBool = AtomicBool::new(false);

/// Reports a static error with no offending token, e.g. from the scanner.
pub fn error(line: usize, message: String) {
    report(line, "".to_string(), message);
}

/// Reports a static error at a token, the form the parser and resolver use.
pub fn error_token(token: &Token, message: String) {
    if token.token_type == TokenType::EOF {
        report(token.line, " at end".to_string(), message);
    } else {
        report(token.line, format!(" at '{}'", token.lexeme), message);
    }
}

fn report(line: usize, wh: String, message: String) {
    eprintln!("[line {}] Error{}: {}", line, wh, message);
    HAD_ERROR.store(true, Ordering::Relaxed);
}

/// Prints a runtime error in the `message` / `[line N]` form and flags the
/// process for exit code 70.
pub fn runtime_error(error: Error) {
    if let Error::RuntimeError(token, message) = error {
        eprintln!("{message}\n[line {}]", token.line);
    }
    HAD_RUNTIME_ERROR.store(true, Ordering::Relaxed);
}

pub fn had_error() -> bool {
    HAD_ERROR.load(Ordering::Relaxed)
}

pub fn had_runtime_error() -> bool {
    HAD_RUNTIME_ERROR.load(Ordering::Relaxed)
}
