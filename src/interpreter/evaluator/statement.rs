use std::{cell::RefCell, rc::Rc};

use rustc_hash::FxHashMap;

use crate::{
    ast::{ClassDef, Expr, FunctionDef, Statement},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::{
            class::StaticClass, core::Value, enumeration::StaticEnum, properties::Properties,
        },
    },
};

impl Context {
    /// Evaluates `let`/`const`, binding the initialiser (or null) in the
    /// current scope. The statement's value is the bound value.
    pub(in crate::interpreter::evaluator) fn exec_var_declaration(&mut self,
                                                                   identifier: &str,
                                                                   constant: bool,
                                                                   value: Option<&Expr>,
                                                                   env: &Environment)
                                                                   -> EvalResult<Flow> {
        let value = match value {
            Some(expr) => normal!(self.eval_expr(expr, env)),
            None => Value::Null,
        };
        Ok(Flow::Normal(env.declare(identifier, value, constant)))
    }

    /// Evaluates an `if` statement.
    ///
    /// The chosen branch runs in a fresh child scope; without a matching
    /// branch the statement yields null.
    pub(in crate::interpreter::evaluator) fn exec_if(&mut self,
                                                      test: &Expr,
                                                      body: &[Statement],
                                                      alternate: Option<&[Statement]>,
                                                      env: &Environment)
                                                      -> EvalResult<Flow> {
        let condition = normal!(self.eval_expr(test, env));

        if condition.is_true() {
            self.exec_block(body, &env.child())
        } else if let Some(alternate) = alternate {
            self.exec_block(alternate, &env.child())
        } else {
            Ok(Flow::Normal(Value::Null))
        }
    }

    /// Evaluates a `while` loop.
    ///
    /// Each iteration runs in its own loop scope. `break` ends the loop,
    /// `continue` goes back to the test and `return` leaves the loop with
    /// the enclosing function. The loop's value is the value of the last
    /// completed iteration, or null when the body never ran.
    pub(in crate::interpreter::evaluator) fn exec_while(&mut self,
                                                         test: &Expr,
                                                         body: &[Statement],
                                                         env: &Environment)
                                                         -> EvalResult<Flow> {
        let mut last = Value::Null;

        loop {
            let condition = normal!(self.eval_expr(test, env));
            if !condition.is_true() {
                break;
            }

            match self.exec_block(body, &env.loop_scope())? {
                Flow::Normal(value) => last = value,
                Flow::Break => break,
                Flow::Continue => {},
                flow @ Flow::Return(_) => return Ok(flow),
            }
        }

        Ok(Flow::Normal(last))
    }

    /// Evaluates a class declaration and binds the resulting static class.
    ///
    /// Static field initialisers run once, in declaration order, in the
    /// declaring scope. The declaration itself yields null.
    pub(in crate::interpreter::evaluator) fn exec_class_declaration(&mut self,
                                                                     def: &ClassDef,
                                                                     env: &Environment)
                                                                     -> EvalResult<Flow> {
        let mut static_fields = Properties::new();
        for (name, initialiser) in &def.static_fields {
            let value = normal!(self.eval_expr(initialiser, env));
            static_fields.insert(name.clone(), value);
        }

        let class = StaticClass { name:           def.name.clone(),
                                  fields:         def.fields.clone(),
                                  static_fields:  RefCell::new(static_fields),
                                  methods:        method_table(&def.methods),
                                  static_methods: method_table(&def.static_methods),
                                  closure:        env.clone(), };

        env.declare(def.name.clone(), Value::StaticClass(Rc::new(class)), false);
        Ok(Flow::Normal(Value::Null))
    }

    /// Binds a static enum under `name`. Yields null.
    pub(in crate::interpreter::evaluator) fn exec_enum_declaration(name: &str,
                                                                    members: &[String],
                                                                    env: &Environment)
                                                                    -> Flow {
        let enumeration = StaticEnum { name:    name.to_string(),
                                       members: members.to_vec(), };
        env.declare(name, Value::StaticEnum(Rc::new(enumeration)), false);
        Flow::Normal(Value::Null)
    }
}

/// Indexes methods by name; a later declaration replaces an earlier one.
fn method_table(methods: &[Rc<FunctionDef>]) -> FxHashMap<String, Rc<FunctionDef>> {
    methods.iter()
           .map(|def| (def.name.clone(), Rc::clone(def)))
           .collect()
}
