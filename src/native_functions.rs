use crate::environment::{Environment, MutableEnvironment};
use crate::value::function::Function;
use crate::value::object::Object;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

/// The global environment every program starts from, pre-populated with
/// the native functions the interpreter exposes to user code.
pub fn globals() -> MutableEnvironment {
    let env = Environment::new();
    env.borrow_mut().define(
        "clock".to_string(),
        Object::Function(Rc::new(Function::Native {
            name: "clock",
            arity: 0,
            func: clock,
        })),
    );
    env
}

/// Seconds since the Unix epoch, the interpreter's only time source.
fn clock(_args: &[Object]) -> Object {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64();
    Object::Number(timestamp)
}
