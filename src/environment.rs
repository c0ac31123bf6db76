use crate::error::Error;
use crate::token::Token;
use crate::value::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A scope in the chain, shared by whoever holds it: the interpreter while
/// the scope is live, and any closure that captured it. Capture is a clone
/// of the head `Rc` — the maps themselves are never copied, so a closure
/// keeps seeing definitions added to its captured scopes afterwards.
pub type MutableEnvironment = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Object>,
    enclosing: Option<MutableEnvironment>,
}

impl Environment {
    /// The global scope: the root of every chain, with no parent.
    pub fn new() -> MutableEnvironment {
        Rc::new(RefCell::new(Self {
            values: HashMap::new(),
            enclosing: None,
        }))
    }

    /// A new local scope nested inside the given outer one.
    pub fn new_enclosing(enclosing: &MutableEnvironment) -> MutableEnvironment {
        Rc::new(RefCell::new(Self {
            values: HashMap::new(),
            enclosing: Some(Rc::clone(enclosing)),
        }))
    }

    /// A new variable is always declared in the current innermost scope,
    /// and re-declaring one overwrites without complaint.
    pub fn define(&mut self, name: String, value: Object) {
        self.values.insert(name, value);
    }

    /// The key difference between assign and define is that assign is not
    /// allowed to create a new binding: assigning a name that exists in no
    /// scope on the chain is a runtime error.
    pub fn assign(&mut self, name: &Token, value: Object) -> Result<(), Error> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            return Ok(());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow_mut().assign(name, value),
            None => Err(Error::RuntimeError(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            )),
        }
    }

    pub fn get(&self, name: &Token) -> Result<Object, Error> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }

        match &self.enclosing {
            Some(outer) => outer.borrow().get(name),
            None => Err(Error::RuntimeError(
                name.clone(),
                format!("Undefined variable '{}'.", name.lexeme),
            )),
        }
    }

    /// Reads from the scope exactly `distance` hops up the chain. The
    /// resolver guarantees both the scope and the binding exist; `None`
    /// means that guarantee was broken and the caller turns it into an
    /// undefined-variable error.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Object> {
        if distance == 0 {
            return self.values.get(name).cloned();
        }
        match &self.enclosing {
            Some(outer) => outer.borrow().get_at(distance - 1, name),
            None => None,
        }
    }

    /// Writes into the scope exactly `distance` hops up the chain, the
    /// mirror of `get_at`.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Object) {
        if distance == 0 {
            self.values.insert(name.to_string(), value);
            return;
        }
        if let Some(outer) = &self.enclosing {
            outer.borrow_mut().assign_at(distance - 1, name, value);
        }
    }
}
