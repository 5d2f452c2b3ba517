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

use crate::derivation::Derivation;
use std::{collections::HashMap, rc::Rc};

/// Derivations of one span, grouped by category in the order they were found.
pub type Cell = HashMap<String, Vec<Rc<Derivation>>>;

/// Triangular table of partial parses addressed by span length and start position.
#[derive(Debug)]
pub struct Chart {
    /// `cells[length - 1][start]`
    cells: Vec<Vec<Cell>>,
}

impl Chart {
    pub fn new(token_count: usize) -> Self {
        Self {
            cells: (1..=token_count)
                .map(|length| vec![Cell::new(); token_count - length + 1])
                .collect(),
        }
    }

    pub fn token_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, length: usize, start: usize) -> &Cell {
        &self.cells[length - 1][start]
    }

    /// Every derivation of `category` over the span, or nothing.
    pub fn derivations(&self, length: usize, start: usize, category: &str) -> &[Rc<Derivation>] {
        self.cell(length, start).get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, length: usize, start: usize, derivation: Derivation) {
        self.cells[length - 1][start]
            .entry(derivation.category().to_string())
            .or_default()
            .push(Rc::new(derivation));
    }

    /// Takes the derivations of `category` over the span, leaving the chart without them.
    pub fn take(&mut self, length: usize, start: usize, category: &str) -> Vec<Rc<Derivation>> {
        self.cells[length - 1][start].remove(category).unwrap_or_default()
    }
}
