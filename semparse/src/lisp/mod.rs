//  Library for the Semparse semantic parser.
// Copyright (C) 2021 Charles Johnson
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

mod environment;
mod procedures;
mod reader;

pub use self::environment::{Environment, SharedEnvironment};
pub use self::procedures::{standard_environment, Lambda, Primitive, Procedure};
pub use self::reader::{atom, read, tokenize};
use crate::{
    errors::{SemparseError, SemparseResult},
    execute::Execute,
    value::Value,
};
use log::debug;
use std::rc::Rc;

/// Interpreter for meanings written as fully parenthesised prefix expressions.
///
/// Each evaluator owns its own root scope, so `define` in one evaluator is never
/// visible to another. Clones and evaluators made `with_environment` share the scope they
/// were given. A root scope that binds a lambda outlives its evaluators (see [`Lambda`]).
#[derive(Debug, Clone)]
pub struct Evaluator {
    global: SharedEnvironment,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            global: standard_environment(),
        }
    }

    pub fn with_environment(global: SharedEnvironment) -> Self {
        Self {
            global,
        }
    }

    pub fn environment(&self) -> &SharedEnvironment {
        &self.global
    }

    pub fn evaluate(&self, expression: &Value) -> SemparseResult<Value> {
        eval(expression, &self.global)
    }

    /// Reads a program then evaluates it.
    pub fn run(&self, program: &str) -> SemparseResult<Value> {
        debug!("run({})", program);
        self.evaluate(&read(program)?)
    }
}

impl Execute for Evaluator {
    fn execute(&self, meaning: &Value) -> SemparseResult<Value> {
        self.evaluate(meaning)
    }
}

/// Evaluates an expression in a scope.
pub fn eval(expression: &Value, env: &SharedEnvironment) -> SemparseResult<Value> {
    match expression {
        Value::Symbol(symbol) => env.borrow().lookup(symbol),
        Value::List(items) => match items.split_first() {
            None => Ok(Value::empty_list()),
            Some((head, rest)) => match head.as_symbol() {
                Some("quote") => quote(expression, rest),
                Some("if") => conditional(expression, rest, env),
                Some("define") => define(expression, rest, env),
                Some("set!") => assign(expression, rest, env),
                Some("lambda") => lambda(expression, rest, env),
                _ => application(head, rest, env),
            },
        },
        atom => Ok(atom.clone()),
    }
}

/// Evaluates expressions in order and returns the value of the last one.
pub fn eval_sequence(expressions: &[Value], env: &SharedEnvironment) -> SemparseResult<Value> {
    expressions.iter().try_fold(Value::Nil, |_, expression| eval(expression, env))
}

fn malformed(form: &'static str, expression: &Value) -> SemparseError {
    SemparseError::MalformedSpecialForm {
        form,
        expression: expression.to_string(),
    }
}

fn quote(expression: &Value, rest: &[Value]) -> SemparseResult<Value> {
    match rest {
        [quoted] => Ok(quoted.clone()),
        _ => Err(malformed("quote", expression)),
    }
}

fn conditional(
    expression: &Value,
    rest: &[Value],
    env: &SharedEnvironment,
) -> SemparseResult<Value> {
    match rest {
        [test, consequence, alternative] => {
            if eval(test, env)?.is_truthy() {
                eval(consequence, env)
            } else {
                eval(alternative, env)
            }
        },
        _ => Err(malformed("if", expression)),
    }
}

fn define(expression: &Value, rest: &[Value], env: &SharedEnvironment) -> SemparseResult<Value> {
    match rest {
        [Value::Symbol(symbol), value] => {
            let value = eval(value, env)?;
            env.borrow_mut().define(symbol.as_str(), value);
            Ok(Value::Nil)
        },
        _ => Err(malformed("define", expression)),
    }
}

fn assign(expression: &Value, rest: &[Value], env: &SharedEnvironment) -> SemparseResult<Value> {
    match rest {
        [Value::Symbol(symbol), value] => {
            let value = eval(value, env)?;
            env.borrow_mut().assign(symbol, value)?;
            Ok(Value::Nil)
        },
        _ => Err(malformed("set!", expression)),
    }
}

fn lambda(expression: &Value, rest: &[Value], env: &SharedEnvironment) -> SemparseResult<Value> {
    let (parameters, body) = match rest.split_first() {
        Some((parameters, body)) if !body.is_empty() => (parameters, body),
        _ => return Err(malformed("lambda", expression)),
    };
    let parameters = match parameters {
        Value::Symbol(single) => vec![single.clone()],
        Value::List(names) => names
            .iter()
            .map(|name| name.as_symbol().map(String::from))
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| malformed("lambda", expression))?,
        _ => return Err(malformed("lambda", expression)),
    };
    Ok(Value::Procedure(Procedure::Lambda(Rc::new(Lambda::new(
        parameters,
        body.to_vec(),
        env.clone(),
    )))))
}

fn application(head: &Value, rest: &[Value], env: &SharedEnvironment) -> SemparseResult<Value> {
    let operator = eval(head, env)?;
    let arguments = rest
        .iter()
        .map(|argument| eval(argument, env))
        .collect::<SemparseResult<Vec<Value>>>()?;
    match operator {
        Value::Procedure(procedure) => procedure.call(&arguments),
        other => Err(SemparseError::NotAProcedure {
            value: other.to_string(),
        }),
    }
}
