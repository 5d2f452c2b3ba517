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

use crate::{errors::SemparseResult, value::Value};

/// Turns a meaning into its output (denotation).
pub trait Execute {
    fn execute(&self, meaning: &Value) -> SemparseResult<Value>;
}

impl<F> Execute for F
where
    F: Fn(&Value) -> SemparseResult<Value>,
{
    fn execute(&self, meaning: &Value) -> SemparseResult<Value> {
        self(meaning)
    }
}
