use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::value::object::Object;

/// Anything a call expression can invoke. The interpreter is passed in so
/// user-defined bodies can execute; arity is checked by the caller before
/// `call` runs, so implementations may index `args` freely.
pub trait Callable {
    fn arity(&self) -> usize;
    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Error>;
}
