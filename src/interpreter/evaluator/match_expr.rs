use crate::{
    ast::{Expr, MatchCase, Statement},
    interpreter::{
        environment::Environment,
        evaluator::core::{Context, EvalResult, Flow},
        value::core::Value,
    },
};

/// Outcome of testing one pattern against the scrutinee.
enum PatternMatch {
    /// The pattern did not match.
    Miss,
    /// The pattern matched without binding anything.
    Hit,
    /// A tagged-enum pattern matched; bind the payload to the name.
    Bind(String, Value),
}

impl Context {
    /// Evaluates a `match` expression.
    ///
    /// The scrutinee is evaluated once into a child of the enclosing scope.
    /// Arms are tried in declared order and the first matching arm runs in
    /// its own scope; the default body runs only when no arm matched. With
    /// neither, the result is null.
    pub(in crate::interpreter::evaluator) fn eval_match(&mut self,
                                                         value: &Expr,
                                                         cases: &[MatchCase],
                                                         default: Option<&[Statement]>,
                                                         env: &Environment)
                                                         -> EvalResult<Flow> {
        let scope = env.child();
        let scrutinee = normal!(self.eval_expr(value, &scope));

        for case in cases {
            for pattern in &case.patterns {
                let outcome = match self.match_pattern(pattern, &scrutinee, &scope)? {
                    Ok(outcome) => outcome,
                    Err(flow) => return Ok(flow),
                };

                let binding = match outcome {
                    PatternMatch::Miss => continue,
                    PatternMatch::Hit => None,
                    PatternMatch::Bind(name, payload) => Some((name, payload)),
                };

                let case_scope = scope.child();
                if let Some((name, payload)) = binding {
                    case_scope.declare(name, payload, false);
                }
                return self.exec_block(&case.body, &case_scope);
            }
        }

        match default {
            Some(body) => self.exec_block(body, &scope.child()),
            None => Ok(Flow::Normal(Value::Null)),
        }
    }

    /// Tests a single pattern.
    ///
    /// A call with exactly one identifier argument over an enum member is a
    /// destructuring pattern: it matches a tagged scrutinee of the same
    /// member and binds the payload. When the callee turns out not to be an
    /// enum member, the call goes ahead with the callee already evaluated.
    /// Every other pattern is evaluated and compared structurally. The inner
    /// `Err` carries a non-normal flow raised while evaluating the pattern.
    fn match_pattern(&mut self,
                     pattern: &Expr,
                     scrutinee: &Value,
                     scope: &Environment)
                     -> EvalResult<Result<PatternMatch, Flow>> {
        let candidate = if let Expr::Call { callee,
                                            arguments,
                                            line, } = pattern
                           && let [argument @ Expr::Identifier { name: binding, .. }] =
                               arguments.as_slice()
        {
            let callee = match self.eval_expr(callee, scope)? {
                Flow::Normal(value) => value,
                flow => return Ok(Err(flow)),
            };

            if let Value::Enum(member) = &callee {
                let outcome = match scrutinee {
                    Value::Enum(candidate) if candidate.same_member(member) => {
                        candidate.tagged
                                 .as_ref()
                                 .map_or(PatternMatch::Miss, |payload| {
                                     PatternMatch::Bind(binding.clone(), payload.clone())
                                 })
                    },
                    _ => PatternMatch::Miss,
                };
                return Ok(Ok(outcome));
            }

            let argument = match self.eval_expr(argument, scope)? {
                Flow::Normal(value) => value,
                flow => return Ok(Err(flow)),
            };
            self.call_value(&callee, vec![argument], scope, *line)?
        } else {
            match self.eval_expr(pattern, scope)? {
                Flow::Normal(value) => value,
                flow => return Ok(Err(flow)),
            }
        };

        Ok(Ok(if candidate == *scrutinee {
                  PatternMatch::Hit
              } else {
                  PatternMatch::Miss
              }))
    }
}
