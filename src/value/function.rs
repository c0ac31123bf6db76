use crate::environment::{Environment, MutableEnvironment};
use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::stmt::FunctionDeclaration;
use crate::value::callable::Callable;
use crate::value::object::Object;
use crate::value::object::Object::Nil;
use std::fmt::Display;
use std::rc::Rc;

/// The runtime representation of a function. Natives are implemented in
/// the host; user-defined functions pair their declaration with the
/// environment chain that was active where they were declared.
#[derive(Clone, Debug)]
pub enum Function {
    Native {
        name: &'static str,
        arity: usize,
        func: fn(&[Object]) -> Object,
    },
    UserDefined {
        /// Whether this function is a class's `init` method. The name alone
        /// can't tell us: users are free to define a plain function called
        /// init.
        is_initializer: bool,

        declaration: Rc<FunctionDeclaration>,

        /// The lexical scope surrounding the declaration — the environment
        /// active when the function was declared, not when it is called.
        closure: MutableEnvironment,
    },
}

impl Function {
    pub fn new(
        declaration: Rc<FunctionDeclaration>,
        closure: MutableEnvironment,
        is_initializer: bool,
    ) -> Self {
        Function::UserDefined {
            is_initializer,
            declaration,
            closure,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Function::Native { name, .. } => name,
            Function::UserDefined { declaration, .. } => &declaration.name.lexeme,
        }
    }

    /// A method bound to an instance: the same declaration, with the
    /// closure wrapped in one extra scope where `this` is the instance the
    /// method was accessed from. The returned function carries that little
    /// world with it wherever the value flows.
    pub fn bind(&self, instance: &Object) -> Function {
        match self {
            Function::UserDefined {
                is_initializer,
                declaration,
                closure,
            } => {
                let scope = Environment::new_enclosing(closure);
                scope.borrow_mut().define("this".into(), instance.clone());
                Function::new(Rc::clone(declaration), scope, *is_initializer)
            }
            Function::Native { .. } => self.clone(),
        }
    }

    /// An initializer's result is always the bound instance, sitting at
    /// depth 0 of the closure `bind` built.
    fn bound_this(
        declaration: &FunctionDeclaration,
        closure: &MutableEnvironment,
    ) -> Result<Object, Error> {
        closure.borrow().get_at(0, "this").ok_or_else(|| {
            Error::RuntimeError(
                declaration.name.clone(),
                "Undefined variable 'this'.".to_string(),
            )
        })
    }
}

impl Callable for Function {
    fn arity(&self) -> usize {
        match self {
            Function::Native { arity, .. } => *arity,
            Function::UserDefined { declaration, .. } => declaration.params.len(),
        }
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Error> {
        match self {
            Function::Native { func, .. } => Ok(func(&args)),
            Function::UserDefined {
                is_initializer,
                declaration,
                closure,
            } => {
                // Each call gets its own environment chained from the
                // closure, otherwise recursion would break: simultaneous
                // calls to the same function need their own parameter
                // bindings even though they share one declaration.
                let scope = Environment::new_enclosing(closure);
                for (param, arg) in declaration.params.iter().zip(args) {
                    scope.borrow_mut().define(param.lexeme.clone(), arg);
                }

                match interpreter.execute_block(&declaration.body, scope) {
                    // A return anywhere in the body unwinds to exactly here.
                    Err(Error::Return(value)) => {
                        if *is_initializer {
                            Self::bound_this(declaration, closure)
                        } else {
                            Ok(value)
                        }
                    }
                    Err(other) => Err(other),
                    Ok(()) => {
                        if *is_initializer {
                            Self::bound_this(declaration, closure)
                        } else {
                            // A body that runs off its end produces nil.
                            Ok(Nil)
                        }
                    }
                }
            }
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Function::Native { .. } => f.write_str("<native fn>"),
            Function::UserDefined { declaration, .. } => {
                f.write_fmt(format_args!("<fn {}>", declaration.name.lexeme))
            }
        }
    }
}
