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

use super::{
    environment::{Environment, SharedEnvironment},
    eval_sequence,
};
use crate::{
    errors::{SemparseError, SemparseResult},
    value::Value,
};
use lazy_static::lazy_static;
use maplit::hashmap;
use std::{collections::HashMap, f64::consts, fmt, rc::Rc};

pub type PrimitiveFn = fn(&[Value]) -> SemparseResult<Value>;

/// Something that can be applied to arguments.
#[derive(Clone)]
pub enum Procedure {
    Primitive(Primitive),
    Lambda(Rc<Lambda>),
}

/// A procedure implemented in Rust.
#[derive(Clone, Copy)]
pub struct Primitive {
    pub name: &'static str,
    function: PrimitiveFn,
}

/// A procedure built by a `lambda` form. It closes over the scope it was built in.
///
/// The captured scope is held strongly. A lambda bound in the scope it captured, as
/// `(define f (lambda ...))` at the top level does, forms a reference cycle with that scope,
/// and neither is freed until the binding is replaced.
pub struct Lambda {
    parameters: Vec<String>,
    body: Vec<Value>,
    environment: SharedEnvironment,
}

impl Lambda {
    pub fn new(parameters: Vec<String>, body: Vec<Value>, environment: SharedEnvironment) -> Self {
        Self {
            parameters,
            body,
            environment,
        }
    }
}

impl Procedure {
    pub fn call(&self, arguments: &[Value]) -> SemparseResult<Value> {
        match self {
            Procedure::Primitive(primitive) => (primitive.function)(arguments),
            Procedure::Lambda(lambda) => {
                if lambda.parameters.len() != arguments.len() {
                    return Err(SemparseError::WrongArgumentCount {
                        procedure: format!("{:?}", self),
                        expected: "as many as its parameters",
                        given: arguments.len(),
                    });
                }
                let mut scope = Environment::child_of(&lambda.environment);
                for (parameter, argument) in lambda.parameters.iter().zip(arguments) {
                    scope.define(parameter.as_str(), argument.clone());
                }
                eval_sequence(&lambda.body, &scope.share())
            },
        }
    }
}

impl PartialEq for Procedure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Procedure::Primitive(a), Procedure::Primitive(b)) => a.name == b.name,
            (Procedure::Lambda(a), Procedure::Lambda(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Procedure::Primitive(primitive) => write!(f, "#<procedure {}>", primitive.name),
            Procedure::Lambda(lambda) => {
                write!(f, "#<lambda ({})>", lambda.parameters.join(" "))
            },
        }
    }
}

lazy_static! {
    static ref CONSTANTS: HashMap<&'static str, f64> = hashmap! {
        "PI" => consts::PI,
        "E" => consts::E,
        "LN2" => consts::LN_2,
        "LN10" => consts::LN_10,
        "LOG2E" => consts::LOG2_E,
        "LOG10E" => consts::LOG10_E,
        "SQRT2" => consts::SQRT_2,
        "SQRT1_2" => consts::FRAC_1_SQRT_2,
    };
}

const PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("+", add),
    ("-", subtract),
    ("*", multiply),
    ("/", divide),
    ("**", power),
    ("pow", power),
    (">", greater_than),
    ("<", less_than),
    (">=", greater_or_equal),
    ("<=", less_or_equal),
    ("=", equal),
    ("eq?", equal),
    ("equal?", equal),
    ("append", append),
    ("apply", apply),
    ("begin", begin),
    ("car", car),
    ("cdr", cdr),
    ("cons", cons),
    ("length", length),
    ("list", list),
    ("map", map),
    ("not", not),
    ("null?", is_null),
    ("number?", is_number),
    ("procedure?", is_procedure),
    ("symbol?", is_symbol),
    ("abs", abs),
    ("max", max),
    ("min", min),
    ("sin", sin),
    ("cos", cos),
    ("tan", tan),
    ("asin", asin),
    ("acos", acos),
    ("atan", atan),
    ("atan2", atan2),
    ("exp", exp),
    ("log", log),
    ("sqrt", sqrt),
    ("floor", floor),
    ("ceil", ceil),
    ("round", round),
];

/// A root scope holding the numeric constants and every primitive procedure.
pub fn standard_environment() -> SharedEnvironment {
    let mut env = Environment::default();
    for (name, value) in CONSTANTS.iter() {
        env.define(*name, Value::Float(*value));
    }
    for &(name, function) in PRIMITIVES {
        env.define(
            name,
            Value::Procedure(Procedure::Primitive(Primitive {
                name,
                function,
            })),
        );
    }
    env.share()
}

fn arity(procedure: &str, arguments: &[Value], expected: usize) -> SemparseResult<()> {
    if arguments.len() == expected {
        Ok(())
    } else {
        Err(SemparseError::WrongArgumentCount {
            procedure: procedure.to_string(),
            expected: match expected {
                1 => "1",
                2 => "2",
                _ => "a different number of",
            },
            given: arguments.len(),
        })
    }
}

fn number(procedure: &str, value: &Value) -> SemparseResult<f64> {
    value.as_f64().ok_or_else(|| SemparseError::WrongArgumentType {
        procedure: procedure.to_string(),
        expected: "a number",
        given: value.to_string(),
    })
}

fn list_argument<'a>(procedure: &str, value: &'a Value) -> SemparseResult<&'a [Value]> {
    value.as_list().ok_or_else(|| SemparseError::WrongArgumentType {
        procedure: procedure.to_string(),
        expected: "a list",
        given: value.to_string(),
    })
}

fn procedure_argument<'a>(procedure: &str, value: &'a Value) -> SemparseResult<&'a Procedure> {
    value.as_procedure().ok_or_else(|| SemparseError::WrongArgumentType {
        procedure: procedure.to_string(),
        expected: "a procedure",
        given: value.to_string(),
    })
}

/// Integer arithmetic while both sides are integers and the result fits, floating point otherwise.
fn combine(
    procedure: &str,
    left: &Value,
    right: &Value,
    integer: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> SemparseResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        if let Some(result) = integer(*a, *b) {
            return Ok(Value::Int(result));
        }
    }
    Ok(Value::Float(float(number(procedure, left)?, number(procedure, right)?)))
}

fn fold(
    procedure: &str,
    identity: Value,
    arguments: &[Value],
    integer: fn(i64, i64) -> Option<i64>,
    float: fn(f64, f64) -> f64,
) -> SemparseResult<Value> {
    arguments.iter().try_fold(identity, |total, argument| {
        combine(procedure, &total, argument, integer, float)
    })
}

fn add(arguments: &[Value]) -> SemparseResult<Value> {
    fold("+", Value::Int(0), arguments, i64::checked_add, |a, b| a + b)
}

fn multiply(arguments: &[Value]) -> SemparseResult<Value> {
    fold("*", Value::Int(1), arguments, i64::checked_mul, |a, b| a * b)
}

fn subtract(arguments: &[Value]) -> SemparseResult<Value> {
    match arguments {
        [] => arity("-", arguments, 1).map(|_| Value::Nil),
        [only] => combine("-", &Value::Int(0), only, i64::checked_sub, |a, b| a - b),
        [first, rest @ ..] => fold("-", first.clone(), rest, i64::checked_sub, |a, b| a - b),
    }
}

fn divide(arguments: &[Value]) -> SemparseResult<Value> {
    arity("/", arguments, 2)?;
    match (&arguments[0], &arguments[1]) {
        (Value::Int(_), Value::Int(0)) => Err(SemparseError::DivisionByZero),
        (left, right) => combine(
            "/",
            left,
            right,
            |a, b| match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                _ => None,
            },
            |a, b| a / b,
        ),
    }
}

fn power(arguments: &[Value]) -> SemparseResult<Value> {
    arity("**", arguments, 2)?;
    combine(
        "**",
        &arguments[0],
        &arguments[1],
        |a, b| {
            if b < 0 || b > i64::from(u32::MAX) {
                None
            } else {
                a.checked_pow(b as u32)
            }
        },
        f64::powf,
    )
}

fn compare(
    procedure: &str,
    arguments: &[Value],
    holds: fn(f64, f64) -> bool,
) -> SemparseResult<Value> {
    arity(procedure, arguments, 2)?;
    Ok(Value::Bool(holds(
        number(procedure, &arguments[0])?,
        number(procedure, &arguments[1])?,
    )))
}

fn greater_than(arguments: &[Value]) -> SemparseResult<Value> {
    compare(">", arguments, |a, b| a > b)
}

fn less_than(arguments: &[Value]) -> SemparseResult<Value> {
    compare("<", arguments, |a, b| a < b)
}

fn greater_or_equal(arguments: &[Value]) -> SemparseResult<Value> {
    compare(">=", arguments, |a, b| a >= b)
}

fn less_or_equal(arguments: &[Value]) -> SemparseResult<Value> {
    compare("<=", arguments, |a, b| a <= b)
}

fn equal(arguments: &[Value]) -> SemparseResult<Value> {
    arity("=", arguments, 2)?;
    Ok(Value::Bool(arguments[0] == arguments[1]))
}

/// Appends a single element to the end of a list.
fn append(arguments: &[Value]) -> SemparseResult<Value> {
    arity("append", arguments, 2)?;
    let mut items = list_argument("append", &arguments[0])?.to_vec();
    items.push(arguments[1].clone());
    Ok(Value::List(items))
}

fn apply(arguments: &[Value]) -> SemparseResult<Value> {
    arity("apply", arguments, 2)?;
    let procedure = procedure_argument("apply", &arguments[0])?;
    procedure.call(list_argument("apply", &arguments[1])?)
}

fn begin(arguments: &[Value]) -> SemparseResult<Value> {
    Ok(arguments.last().cloned().unwrap_or(Value::Nil))
}

fn car(arguments: &[Value]) -> SemparseResult<Value> {
    arity("car", arguments, 1)?;
    list_argument("car", &arguments[0])?.first().cloned().ok_or_else(|| {
        SemparseError::WrongArgumentType {
            procedure: "car".to_string(),
            expected: "a non-empty list",
            given: arguments[0].to_string(),
        }
    })
}

fn cdr(arguments: &[Value]) -> SemparseResult<Value> {
    arity("cdr", arguments, 1)?;
    let items = list_argument("cdr", &arguments[0])?;
    Ok(Value::List(items.iter().skip(1).cloned().collect()))
}

fn cons(arguments: &[Value]) -> SemparseResult<Value> {
    arity("cons", arguments, 2)?;
    let mut items = vec![arguments[0].clone()];
    items.extend_from_slice(list_argument("cons", &arguments[1])?);
    Ok(Value::List(items))
}

fn length(arguments: &[Value]) -> SemparseResult<Value> {
    arity("length", arguments, 1)?;
    Ok(Value::Int(list_argument("length", &arguments[0])?.len() as i64))
}

fn list(arguments: &[Value]) -> SemparseResult<Value> {
    Ok(Value::List(arguments.to_vec()))
}

fn map(arguments: &[Value]) -> SemparseResult<Value> {
    arity("map", arguments, 2)?;
    let procedure = procedure_argument("map", &arguments[0])?;
    list_argument("map", &arguments[1])?
        .iter()
        .map(|item| procedure.call(std::slice::from_ref(item)))
        .collect::<SemparseResult<Vec<Value>>>()
        .map(Value::List)
}

fn not(arguments: &[Value]) -> SemparseResult<Value> {
    arity("not", arguments, 1)?;
    Ok(Value::Bool(!arguments[0].is_truthy()))
}

fn is_null(arguments: &[Value]) -> SemparseResult<Value> {
    arity("null?", arguments, 1)?;
    Ok(Value::Bool(match &arguments[0] {
        Value::Nil => true,
        Value::List(items) => items.is_empty(),
        _ => false,
    }))
}

fn is_number(arguments: &[Value]) -> SemparseResult<Value> {
    arity("number?", arguments, 1)?;
    Ok(Value::Bool(arguments[0].is_number()))
}

fn is_procedure(arguments: &[Value]) -> SemparseResult<Value> {
    arity("procedure?", arguments, 1)?;
    Ok(Value::Bool(arguments[0].is_procedure()))
}

fn is_symbol(arguments: &[Value]) -> SemparseResult<Value> {
    arity("symbol?", arguments, 1)?;
    Ok(Value::Bool(arguments[0].is_symbol()))
}

fn abs(arguments: &[Value]) -> SemparseResult<Value> {
    arity("abs", arguments, 1)?;
    match &arguments[0] {
        Value::Int(i) => Ok(i.checked_abs().map_or(Value::Float((*i as f64).abs()), Value::Int)),
        other => Ok(Value::Float(number("abs", other)?.abs())),
    }
}

fn extremum(
    procedure: &str,
    arguments: &[Value],
    keep_left: fn(f64, f64) -> bool,
) -> SemparseResult<Value> {
    let (first, rest) = arguments.split_first().ok_or(SemparseError::WrongArgumentCount {
        procedure: procedure.to_string(),
        expected: "at least 1",
        given: 0,
    })?;
    rest.iter().try_fold(first.clone(), |best, argument| {
        Ok(if keep_left(number(procedure, &best)?, number(procedure, argument)?) {
            best
        } else {
            argument.clone()
        })
    })
}

fn max(arguments: &[Value]) -> SemparseResult<Value> {
    extremum("max", arguments, |a, b| a >= b)
}

fn min(arguments: &[Value]) -> SemparseResult<Value> {
    extremum("min", arguments, |a, b| a <= b)
}

fn unary(procedure: &str, arguments: &[Value], function: fn(f64) -> f64) -> SemparseResult<Value> {
    arity(procedure, arguments, 1)?;
    Ok(Value::Float(function(number(procedure, &arguments[0])?)))
}

fn sin(arguments: &[Value]) -> SemparseResult<Value> {
    unary("sin", arguments, f64::sin)
}

fn cos(arguments: &[Value]) -> SemparseResult<Value> {
    unary("cos", arguments, f64::cos)
}

fn tan(arguments: &[Value]) -> SemparseResult<Value> {
    unary("tan", arguments, f64::tan)
}

fn asin(arguments: &[Value]) -> SemparseResult<Value> {
    unary("asin", arguments, f64::asin)
}

fn acos(arguments: &[Value]) -> SemparseResult<Value> {
    unary("acos", arguments, f64::acos)
}

fn atan(arguments: &[Value]) -> SemparseResult<Value> {
    unary("atan", arguments, f64::atan)
}

fn atan2(arguments: &[Value]) -> SemparseResult<Value> {
    arity("atan2", arguments, 2)?;
    Ok(Value::Float(number("atan2", &arguments[0])?.atan2(number("atan2", &arguments[1])?)))
}

fn exp(arguments: &[Value]) -> SemparseResult<Value> {
    unary("exp", arguments, f64::exp)
}

fn log(arguments: &[Value]) -> SemparseResult<Value> {
    unary("log", arguments, f64::ln)
}

fn sqrt(arguments: &[Value]) -> SemparseResult<Value> {
    unary("sqrt", arguments, f64::sqrt)
}

fn floor(arguments: &[Value]) -> SemparseResult<Value> {
    unary("floor", arguments, f64::floor)
}

fn ceil(arguments: &[Value]) -> SemparseResult<Value> {
    unary("ceil", arguments, f64::ceil)
}

fn round(arguments: &[Value]) -> SemparseResult<Value> {
    unary("round", arguments, f64::round)
}

#[cfg(test)]
mod tests {
    use super::{add, divide, power, standard_environment, subtract};
    use crate::{errors::SemparseError, lisp::Evaluator, value::Value};

    #[test]
    fn subtraction_of_one_argument_negates() {
        assert_eq!(subtract(&[Value::from(3)]), Ok(Value::from(-3)));
        assert_eq!(subtract(&[Value::from(3), Value::from(5)]), Ok(Value::from(-2)));
    }

    #[test]
    fn integer_overflow_falls_back_to_floats() {
        let result = add(&[Value::from(i64::MAX), Value::from(1)]).unwrap();
        assert!(matches!(result, Value::Float(_)));
    }

    #[test]
    fn inexact_division_gives_a_float() {
        assert_eq!(divide(&[Value::from(6), Value::from(3)]), Ok(Value::Int(2)));
        assert_eq!(divide(&[Value::from(1), Value::from(2)]), Ok(Value::Float(0.5)));
        assert_eq!(
            divide(&[Value::from(1), Value::from(0)]),
            Err(SemparseError::DivisionByZero)
        );
    }

    #[test]
    fn overflowing_division_gives_a_float() {
        assert_eq!(
            divide(&[Value::Int(i64::MIN), Value::Int(-1)]),
            Ok(Value::Float(-(i64::MIN as f64)))
        );
        assert_eq!(
            Evaluator::new().run("(/ -9223372036854775808 -1)"),
            Ok(Value::Float(9_223_372_036_854_775_808.0))
        );
    }

    #[test]
    fn negative_exponents_give_floats() {
        assert_eq!(power(&[Value::from(2), Value::from(10)]), Ok(Value::Int(1024)));
        assert_eq!(power(&[Value::from(2), Value::from(-1)]), Ok(Value::Float(0.5)));
    }

    #[test]
    fn arithmetic_rejects_symbols() {
        assert!(matches!(
            add(&[Value::from(1), Value::from("one")]),
            Err(SemparseError::WrongArgumentType { .. })
        ));
    }

    #[test]
    fn standard_environment_has_constants_and_primitives() {
        let env = standard_environment();
        let env = env.borrow();
        assert_eq!(env.lookup("PI"), Ok(Value::Float(std::f64::consts::PI)));
        assert!(env.lookup("+").unwrap().is_procedure());
        assert!(env.lookup("symbol?").unwrap().is_procedure());
    }
}
