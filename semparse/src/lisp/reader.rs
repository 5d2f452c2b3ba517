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

use crate::{
    errors::{SemparseError, SemparseResult},
    value::Value,
};
use std::collections::VecDeque;

/// Splits a program into parentheses and whitespace separated atoms.
pub fn tokenize(program: &str) -> VecDeque<String> {
    program
        .replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Reads exactly one expression from a program.
pub fn read(program: &str) -> SemparseResult<Value> {
    let mut tokens = tokenize(program);
    let expression = read_from_tokens(&mut tokens)?;
    if tokens.is_empty() {
        Ok(expression)
    } else {
        Err(SemparseError::TrailingInput {
            remaining: tokens.into_iter().collect::<Vec<_>>().join(" "),
        })
    }
}

fn read_from_tokens(tokens: &mut VecDeque<String>) -> SemparseResult<Value> {
    let token = tokens.pop_front().ok_or(SemparseError::UnexpectedEof)?;
    match token.as_str() {
        "(" => {
            let mut items = Vec::new();
            loop {
                match tokens.front().map(String::as_str) {
                    Some(")") => {
                        tokens.pop_front();
                        return Ok(Value::List(items));
                    },
                    Some(_) => items.push(read_from_tokens(tokens)?),
                    None => {
                        return Err(SemparseError::MissingSymbol {
                            symbol: ")",
                        })
                    },
                }
            }
        },
        ")" => Err(SemparseError::MissingSymbol {
            symbol: "(",
        }),
        _ => Ok(atom(&token)),
    }
}

/// Numbers become numbers, `#t` and `#f` become booleans, everything else is a symbol.
pub fn atom(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Int(i);
    }
    if token.chars().any(|c| c.is_ascii_digit()) {
        if let Ok(x) = token.parse::<f64>() {
            if x.is_finite() {
                return Value::Float(x);
            }
        }
    }
    match token {
        "#t" => Value::Bool(true),
        "#f" => Value::Bool(false),
        _ => Value::Symbol(token.to_string()),
    }
}
