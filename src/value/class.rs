use crate::error::Error;
use crate::interpreter::Interpreter;
use crate::value::callable::Callable;
use crate::value::function::Function;
use crate::value::instance::Instance;
use crate::value::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The runtime representation of a class declaration. The class stores the
/// behaviour; its instances store the state. Methods are owned by the
/// class and reached through instances of it (or of a subclass).
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub superclass: Option<Rc<Class>>,
    methods: HashMap<String, Function>,
}

impl Class {
    pub fn new(
        name: String,
        superclass: Option<Rc<Class>>,
        methods: HashMap<String, Function>,
    ) -> Self {
        Self {
            name,
            superclass,
            methods,
        }
    }

    /// Walks the inheritance chain innermost class first, so a subclass
    /// method shadows the superclass's method of the same name.
    pub fn find_method(&self, name: &str) -> Option<Function> {
        if let Some(method) = self.methods.get(name) {
            return Some(method.clone());
        }

        self.superclass
            .as_ref()
            .and_then(|superclass| superclass.find_method(name))
    }
}

impl Callable for Rc<Class> {
    /// If the class has an initializer, its arity is how many arguments
    /// the class itself takes; without one the arity is zero.
    fn arity(&self) -> usize {
        match self.find_method("init") {
            Some(initializer) => initializer.arity(),
            None => 0,
        }
    }

    /// Calling a class instantiates it. If an `init` method exists it is
    /// bound to the fresh instance and invoked with the arguments; its
    /// result is discarded — the call always produces the instance.
    fn call(&self, interpreter: &mut Interpreter, args: Vec<Object>) -> Result<Object, Error> {
        let instance = Object::Instance(Rc::new(RefCell::new(Instance::new(Rc::clone(self)))));

        if let Some(initializer) = self.find_method("init") {
            initializer.bind(&instance).call(interpreter, args)?;
        }

        Ok(instance)
    }
}
