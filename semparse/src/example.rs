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

use crate::value::Value;

/// A training or evaluation sentence with its gold meaning, its gold output, or both.
#[derive(Clone, Debug, PartialEq)]
pub struct Example {
    pub input: String,
    pub meaning: Option<Value>,
    pub output: Option<Value>,
}

impl Example {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            meaning: None,
            output: None,
        }
    }

    pub fn with_meaning(mut self, meaning: impl Into<Value>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<Value>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.input.split_whitespace()
    }
}
