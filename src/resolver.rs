use crate::error;
use crate::expr::{Expr, ExprId};
use crate::stmt::{FunctionDeclaration, Stmt};
use crate::token::Token;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

/// What kind of function body is currently being resolved. `Initializer`
/// is a method literally named `init`; it may not return a value.
#[derive(Clone, Copy, Debug, PartialEq)]
enum FunctionType {
    None,
    Function,
    Method,
    Initializer,
}

/// Whether the resolver is inside a class body, and if so whether that
/// class has a superclass — `super` is only legal in the latter.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ClassType {
    None,
    Class,
    Subclass,
}

/// After the parser produces the syntax tree but before the interpreter
/// executes it, a single walk over the tree resolves every variable it
/// contains: each reference is pinned to the number of scopes between it
/// and the scope that declares the name. The walk visits each node once,
/// so it is O(n), and it is where Lox's static errors are detected.
pub struct Resolver {
    /// The stack of scopes currently in scope, innermost last. Each entry
    /// maps a name to whether its initializer has finished resolving
    /// (false = declared, true = defined).
    ///
    /// Only local block scopes live here. Top-level variables are more
    /// dynamic in Lox and are not tracked; a name found in no scope on the
    /// stack is assumed to be global.
    scopes: Vec<HashMap<String, bool>>,

    /// The side table of resolved references, keyed by node identity.
    /// Absence means "look the name up in globals at runtime".
    resolved: HashMap<ExprId, usize>,

    current_function: FunctionType,
    current_class: ClassType,
}

impl Resolver {
    pub fn new() -> Resolver {
        Self {
            scopes: Vec::new(),
            resolved: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
        }
    }

    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<ExprId, usize> {
        self.resolve_all(statements);
        self.resolved
    }

    fn resolve_all(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_statement(statement);
        }
    }

    /// The statement half of the walk. Every place where a variable is
    /// declared, read or written, and every place where a scope begins or
    /// ends, does its bookkeeping here; everything else recurses blindly.
    /// Unlike execution there is no control flow — both branches of an `if`
    /// and the body of a `while` resolve exactly once, because any of them
    /// could run.
    fn resolve_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block { statements } => {
                self.begin_scope();
                self.resolve_all(statements);
                self.end_scope();
            }
            Stmt::Var { name, initializer } => {
                // Binding splits into declare then define, so that an
                // initializer mentioning the name being bound is caught
                // while the name is still in the declared state.
                self.declare(name);
                if let Some(expr) = initializer {
                    self.resolve_expression(expr);
                }
                self.define(name);
            }
            Stmt::Function { decl } => {
                // Defined eagerly, which lets the function recursively
                // refer to itself inside its own body.
                self.declare(&decl.name);
                self.define(&decl.name);
                self.resolve_function(decl, FunctionType::Function);
            }
            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.resolve_class(name, superclass.as_ref(), methods),
            Stmt::Expression { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expression(condition);
                self.resolve_statement(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_statement(else_branch);
                }
            }
            Stmt::Print { expression } => {
                self.resolve_expression(expression);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    error::error_token(keyword, "Can't return from top-level code.".to_string());
                }
                if let Some(expr) = value {
                    if self.current_function == FunctionType::Initializer {
                        error::error_token(
                            keyword,
                            "Can't return a value from an initializer.".to_string(),
                        );
                    }
                    self.resolve_expression(expr);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expression(condition);
                self.resolve_statement(body);
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                // A scope is opened only when the initializer declares a
                // variable, matching the interpreter's scoping of the loop.
                let scoped = matches!(initializer.as_deref(), Some(Stmt::Var { .. }));
                if scoped {
                    self.begin_scope();
                }
                if let Some(init) = initializer {
                    self.resolve_statement(init);
                }
                if let Some(condition) = condition {
                    self.resolve_expression(condition);
                }
                if let Some(increment) = increment {
                    self.resolve_expression(increment);
                }
                self.resolve_statement(body);
                if scoped {
                    self.end_scope();
                }
            }
        }
    }

    fn resolve_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDeclaration>],
    ) {
        let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

        self.declare(name);
        self.define(name);

        if let Some(superclass) = superclass {
            if let Expr::Variable {
                name: super_name, ..
            } = superclass
            {
                if super_name.lexeme == name.lexeme {
                    error::error_token(
                        super_name,
                        "A class can't inherit from itself.".to_string(),
                    );
                }
            }
            self.current_class = ClassType::Subclass;
            self.resolve_expression(superclass);

            // The scope that methods of a subclass capture `super` from.
            self.begin_scope();
            self.define_name("super");
        }

        // Every method body resolves inside a scope where `this` is defined.
        self.begin_scope();
        self.define_name("this");

        for method in methods {
            let declaration = if method.name.lexeme == "init" {
                FunctionType::Initializer
            } else {
                FunctionType::Method
            };
            self.resolve_function(method, declaration);
        }

        self.end_scope();
        if superclass.is_some() {
            self.end_scope();
        }

        self.current_class = enclosing_class;
    }

    /// The expression half of the walk.
    fn resolve_expression(&mut self, expression: &Expr) {
        match expression {
            Expr::Variable { id, name } => {
                // It's a static error if an initializer mentions the
                // variable being initialized, e.g. var a = a;
                if self.scopes.last().and_then(|scope| scope.get(&name.lexeme)) == Some(&false) {
                    error::error_token(
                        name,
                        "Can't read local variable in its own initializer.".to_string(),
                    );
                }
                self.resolve_local(*id, name);
            }
            Expr::Assign { id, name, value } => {
                self.resolve_expression(value);
                self.resolve_local(*id, name);
            }
            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    error::error_token(keyword, "Can't use 'this' outside of a class.".to_string());
                    return;
                }
                self.resolve_local(*id, keyword);
            }
            Expr::Super { id, keyword, .. } => match self.current_class {
                ClassType::None => {
                    error::error_token(
                        keyword,
                        "Can't use 'super' outside of a class.".to_string(),
                    );
                }
                ClassType::Class => {
                    error::error_token(
                        keyword,
                        "Can't use 'super' in a class with no superclass.".to_string(),
                    );
                }
                ClassType::Subclass => self.resolve_local(*id, keyword),
            },
            Expr::Binary { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }
            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expression(callee);
                for argument in arguments {
                    self.resolve_expression(argument);
                }
            }
            Expr::Get { object, .. } => {
                // Properties are looked up dynamically; only the object
                // expression has anything to resolve.
                self.resolve_expression(object);
            }
            Expr::Set { object, value, .. } => {
                self.resolve_expression(value);
                self.resolve_expression(object);
            }
            Expr::Grouping { expression } => {
                self.resolve_expression(expression);
            }
            Expr::Literal { .. } => {
                // No variables, no subexpressions, no work.
            }
            Expr::Logical { left, right, .. } => {
                self.resolve_expression(left);
                self.resolve_expression(right);
            }
            Expr::Unary { right, .. } => {
                self.resolve_expression(right);
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Adds the name to the innermost scope, shadowing any outer binding,
    /// marked "not ready yet" until `define` flips it. Declaring the same
    /// local twice in one scope is a static error; globals are exempt
    /// because the scope stack does not track them.
    fn declare(&mut self, name: &Token) {
        if let Some(innermost_scope) = self.scopes.last_mut() {
            if innermost_scope.contains_key(&name.lexeme) {
                error::error_token(
                    name,
                    "Already a variable with this name in this scope.".to_string(),
                );
            }
            innermost_scope.insert(name.lexeme.clone(), false);
        }
    }

    /// Marks the name as fully initialized and available for use.
    fn define(&mut self, name: &Token) {
        if let Some(innermost_scope) = self.scopes.last_mut() {
            innermost_scope.insert(name.lexeme.clone(), true);
        }
    }

    /// `define` for the implicit names (`this`, `super`) that have no token.
    fn define_name(&mut self, name: &str) {
        if let Some(innermost_scope) = self.scopes.last_mut() {
            innermost_scope.insert(name.to_string(), true);
        }
    }

    /// Starting at the innermost scope and working outwards, records the
    /// number of scopes between the reference and the declaration. A name
    /// found nowhere on the stack is left unrecorded: the interpreter will
    /// consult globals.
    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.resolved.insert(id, distance);
                return;
            }
        }
    }

    /// Unlike the interpreter, which touches a function body only when the
    /// function is called, static analysis traverses into the body right at
    /// the declaration: a fresh scope, the parameters defined in it, then
    /// the body.
    fn resolve_function(&mut self, function: &FunctionDeclaration, declaration: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, declaration);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_all(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }
}
