use crate::environment::{Environment, MutableEnvironment};
use crate::error;
use crate::error::Error;
use crate::expr::{Expr, ExprId};
use crate::native_functions;
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::Token;
use crate::token::TokenType::*;
use crate::value::class::Class;
use crate::value::function::Function;
use crate::value::object::Object;
use crate::value::object::Object::*;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

/// The interpreter is the last step. It takes the AST produced by the
/// parser and recursively traverses it, post-order: each node evaluates
/// its children before doing its own work. The two node types are handled
/// in separate methods — Stmt in `execute`, Expr in `evaluate`.
pub struct Interpreter {
    /// A fixed reference to the outermost global environment.
    globals: MutableEnvironment,

    /// The current environment; changes as execution enters and exits
    /// local scopes.
    environment: MutableEnvironment,

    /// The resolver's side table. A reference with an entry reads the
    /// local chain at exactly that depth; one without is a global.
    locals: HashMap<ExprId, usize>,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Self::new_with_resolver(HashMap::new())
    }

    pub fn new_with_resolver(locals: HashMap<ExprId, usize>) -> Interpreter {
        let globals = native_functions::globals();
        Self {
            environment: Rc::clone(&globals),
            globals,
            locals,
        }
    }

    /// Runs a whole program. A runtime error aborts it; the error is
    /// reported and the process flagged for a failing exit code.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            match self.execute(statement) {
                Ok(()) => continue,
                Err(error) => {
                    error::runtime_error(error);
                    break;
                }
            }
        }
    }

    /// Executes the statements against the given environment, restoring
    /// the previous one on every exit path — including the `return`
    /// unwind and runtime errors — so closures capturing the chain always
    /// see it well-formed.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: MutableEnvironment,
    ) -> Result<(), Error> {
        let previous = mem::replace(&mut self.environment, environment);
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        self.environment = previous;
        result
    }

    /// The statement analogue of evaluate(). Statements produce no value,
    /// so the success type is unit.
    fn execute(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(())
            }
            Stmt::Print { expression } => {
                let evaluated = self.evaluate(expression)?;
                println!("{evaluated}");
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block { statements } => {
                let scope = Environment::new_enclosing(&self.environment);
                self.execute_block(statements, scope)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                // The condition re-evaluates before every iteration.
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                // A loop variable declared in the initializer lives in a
                // scope wrapping exactly the loop; any other initializer
                // runs in the surrounding scope. The resolver opens the
                // same scope under the same condition.
                let scoped = matches!(initializer.as_deref(), Some(Stmt::Var { .. }));
                let previous = Rc::clone(&self.environment);
                if scoped {
                    self.environment = Environment::new_enclosing(&previous);
                }
                let result = self.execute_for(
                    initializer.as_deref(),
                    condition.as_ref(),
                    increment.as_ref(),
                    body,
                );
                self.environment = previous;
                result
            }
            Stmt::Function { decl } => {
                // A function declaration converts the compile-time
                // representation to its runtime one, closing over the
                // surrounding environment where it is declared.
                let function =
                    Function::new(Rc::clone(decl), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(
                    decl.name.lexeme.clone(),
                    Object::Function(Rc::new(function)),
                );
                Ok(())
            }
            Stmt::Return { value, .. } => {
                let return_value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Nil,
                };

                // A return can sit arbitrarily deep inside the body it
                // exits. The unwind rides the error channel up through
                // every enclosing statement to the code that began
                // executing the body, in Function::call.
                Err(Error::Return(return_value))
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods),
        }
    }

    fn execute_for(
        &mut self,
        initializer: Option<&Stmt>,
        condition: Option<&Expr>,
        increment: Option<&Expr>,
        body: &Stmt,
    ) -> Result<(), Error> {
        if let Some(initializer) = initializer {
            self.execute(initializer)?;
        }
        loop {
            // An absent condition loops until something unwinds.
            if let Some(condition) = condition {
                if !self.evaluate(condition)?.is_truthy() {
                    return Ok(());
                }
            }
            self.execute(body)?;
            if let Some(increment) = increment {
                self.evaluate(increment)?;
            }
        }
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDeclaration>],
    ) -> Result<(), Error> {
        let superclass_object = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Object::Class(class) => Some(class),
                _ => {
                    let blame = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };
                    return Err(Error::RuntimeError(
                        blame.clone(),
                        "Superclass must be a class.".to_string(),
                    ));
                }
            },
            None => None,
        };

        // Defined first, assigned after construction: the two-step dance
        // lets methods refer to the class by name.
        self.environment
            .borrow_mut()
            .define(name.lexeme.clone(), Nil);

        // Methods of a subclass close over one extra scope where `super`
        // is bound to the superclass object.
        let previous = Rc::clone(&self.environment);
        if let Some(class) = &superclass_object {
            self.environment = Environment::new_enclosing(&previous);
            self.environment
                .borrow_mut()
                .define("super".to_string(), Object::Class(Rc::clone(class)));
        }

        let mut method_table = HashMap::new();
        for method in methods {
            let is_initializer = method.name.lexeme == "init";
            let function = Function::new(
                Rc::clone(method),
                Rc::clone(&self.environment),
                is_initializer,
            );
            method_table.insert(method.name.lexeme.clone(), function);
        }

        let class = Class::new(name.lexeme.clone(), superclass_object, method_table);

        if superclass.is_some() {
            self.environment = previous;
        }

        self.environment
            .borrow_mut()
            .assign(name, Object::Class(Rc::new(class)))
    }

    /// Evaluates an Expr tree node and produces a value. Each kind of
    /// expression has a chunk of code here that knows how to evaluate it.
    pub fn evaluate(&mut self, expression: &Expr) -> Result<Object, Error> {
        match expression {
            Expr::Literal { value } => Ok(value.clone()),
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::Unary { operator, right } => {
                let value = self.evaluate(right)?;
                match (&operator.token_type, value) {
                    (MINUS, Number(n)) => Ok(Number(-n)),
                    (BANG, value) => Ok(Boolean(!value.is_truthy())),
                    _ => Err(Error::RuntimeError(
                        operator.clone(),
                        "Operand must be a number.".to_string(),
                    )),
                }
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                match (&operator.token_type, left, right) {
                    (STAR, Number(left), Number(right)) => Ok(Number(left * right)),
                    // Division by zero is IEEE-754: infinity or NaN, no trap.
                    (SLASH, Number(left), Number(right)) => Ok(Number(left / right)),
                    (MINUS, Number(left), Number(right)) => Ok(Number(left - right)),
                    (PLUS, Number(left), Number(right)) => Ok(Number(left + right)),
                    (PLUS, String(left), String(right)) => Ok(String(left + right.as_str())),
                    (GREATER, Number(left), Number(right)) => Ok(Boolean(left > right)),
                    (GREATER_EQUAL, Number(left), Number(right)) => Ok(Boolean(left >= right)),
                    (LESS, Number(left), Number(right)) => Ok(Boolean(left < right)),
                    (LESS_EQUAL, Number(left), Number(right)) => Ok(Boolean(left <= right)),
                    (BANG_EQUAL, left, right) => Ok(Boolean(!left.is_equal(&right))),
                    (EQUAL_EQUAL, left, right) => Ok(Boolean(left.is_equal(&right))),
                    (PLUS, _, _) => Err(Error::RuntimeError(
                        operator.clone(),
                        "Operands must be two numbers or two strings.".to_string(),
                    )),
                    _ => Err(Error::RuntimeError(
                        operator.clone(),
                        "Operands must be numbers.".to_string(),
                    )),
                }
            }
            Expr::Variable { id, name } => self.look_up_variable(name, *id),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                match self.locals.get(id) {
                    Some(distance) => {
                        self.environment.borrow_mut().assign_at(
                            *distance,
                            &name.lexeme,
                            value.clone(),
                        );
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }
                // Assignment nests inside other expressions, so it has a
                // value: the one assigned.
                Ok(value)
            }
            Expr::Logical {
                operator,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;

                // The left value decides whether to short-circuit; only
                // then does the right operand evaluate. The result is the
                // operand itself with its own truthiness, never a coerced
                // Boolean: `"hi" or 2` is "hi", `nil or "yes"` is "yes".
                if operator.token_type == OR {
                    if left.is_truthy() {
                        return Ok(left);
                    }
                } else if !left.is_truthy() {
                    return Ok(left);
                }

                self.evaluate(right)
            }
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;

                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                callee.call(self, args, paren)
            }
            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                match &object {
                    Object::Instance(instance) => instance.borrow().get(name, &object),
                    _ => Err(Error::RuntimeError(
                        name.clone(),
                        "Only instances have properties.".to_string(),
                    )),
                }
            }
            Expr::Set {
                object,
                name,
                value,
            } => {
                let object = self.evaluate(object)?;
                let Object::Instance(instance) = object else {
                    return Err(Error::RuntimeError(
                        name.clone(),
                        "Only instances have fields.".to_string(),
                    ));
                };

                let value = self.evaluate(value)?;
                instance.borrow_mut().set(name, value.clone());
                Ok(value)
            }
            Expr::This { id, keyword } => self.look_up_variable(keyword, *id),
            Expr::Super { id, keyword, method } => self.evaluate_super(*id, keyword, method),
        }
    }

    fn look_up_variable(&self, name: &Token, id: ExprId) -> Result<Object, Error> {
        match self.locals.get(&id) {
            Some(distance) => self
                .environment
                .borrow()
                .get_at(*distance, &name.lexeme)
                .ok_or_else(|| undefined_variable(name, &name.lexeme)),
            None => self.globals.borrow().get(name),
        }
    }

    fn evaluate_super(
        &mut self,
        id: ExprId,
        keyword: &Token,
        method: &Token,
    ) -> Result<Object, Error> {
        let distance = *self
            .locals
            .get(&id)
            .ok_or_else(|| undefined_variable(keyword, "super"))?;

        let superclass = self
            .environment
            .borrow()
            .get_at(distance, "super")
            .ok_or_else(|| undefined_variable(keyword, "super"))?;
        let Object::Class(superclass) = superclass else {
            return Err(Error::RuntimeError(
                keyword.clone(),
                "Superclass must be a class.".to_string(),
            ));
        };

        // `this` is always bound one scope inside the one holding `super`.
        let object = self
            .environment
            .borrow()
            .get_at(distance - 1, "this")
            .ok_or_else(|| undefined_variable(keyword, "this"))?;

        match superclass.find_method(&method.lexeme) {
            Some(found) => Ok(Object::Function(Rc::new(found.bind(&object)))),
            None => Err(Error::RuntimeError(
                method.clone(),
                format!("Undefined property '{}'.", method.lexeme),
            )),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn undefined_variable(token: &Token, name: &str) -> Error {
    Error::RuntimeError(token.clone(), format!("Undefined variable '{}'.", name))
}
