use crate::error::Error;
use crate::token::Token;
use crate::value::class::Class;
use crate::value::object::Object;
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

/// The runtime representation of an instance of a Lox class. Fields are
/// the state stored directly on the instance; properties are everything a
/// get expression can produce, which also includes the class's methods.
#[derive(Debug)]
pub struct Instance {
    klass: Rc<Class>,
    fields: HashMap<String, Object>,
}

impl Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} instance", self.klass.name)
    }
}

impl Instance {
    pub fn new(klass: Rc<Class>) -> Self {
        Self {
            klass,
            fields: HashMap::new(),
        }
    }

    /// Property lookup: a field shadows a method of the same name; a
    /// method is returned bound to this instance. `instance` is this same
    /// instance as a value, needed because binding stores it in the
    /// method's closure. Silently producing nil for a missing property
    /// would mask bugs, so it is a runtime error instead.
    pub fn get(&self, name: &Token, instance: &Object) -> Result<Object, Error> {
        if let Some(field) = self.fields.get(&name.lexeme) {
            return Ok(field.clone());
        }

        if let Some(method) = self.klass.find_method(&name.lexeme) {
            return Ok(Object::Function(Rc::new(method.bind(instance))));
        }

        Err(Error::RuntimeError(
            name.clone(),
            format!("Undefined property '{}'.", name.lexeme),
        ))
    }

    /// Lox freely creates new fields on instances, so there is no need to
    /// check whether the key is already present.
    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }
}
