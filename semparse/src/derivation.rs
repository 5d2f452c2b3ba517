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

use crate::{rule::Rule, value::Value};
use std::{fmt, rc::Rc};

#[derive(Debug)]
pub enum Children {
    /// The tokens matched by a lexical rule.
    Terminals(Vec<String>),
    /// The two sub-derivations combined by a binary rule.
    Pair(Rc<Derivation>, Rc<Derivation>),
}

/// A node of a parse tree. Its meaning is computed once, when it is built.
#[derive(Debug)]
pub struct Derivation {
    rule: Rc<Rule>,
    children: Children,
    meaning: Value,
}

impl Derivation {
    pub fn terminal(rule: Rc<Rule>, tokens: Vec<String>) -> Self {
        let meaning = rule.semantics().meaning(&[]);
        Self {
            rule,
            children: Children::Terminals(tokens),
            meaning,
        }
    }

    pub fn pair(rule: Rc<Rule>, left: Rc<Derivation>, right: Rc<Derivation>) -> Self {
        let meaning = rule.semantics().meaning(&[left.meaning.clone(), right.meaning.clone()]);
        Self {
            rule,
            children: Children::Pair(left, right),
            meaning,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn category(&self) -> &str {
        self.rule.lhs()
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn meaning(&self) -> &Value {
        &self.meaning
    }

    /// Recomputes the meaning from the rules of the whole tree.
    pub fn compute_meaning(&self) -> Value {
        match &self.children {
            Children::Terminals(_) => self.rule.semantics().meaning(&[]),
            Children::Pair(left, right) => self
                .rule
                .semantics()
                .meaning(&[left.compute_meaning(), right.compute_meaning()]),
        }
    }

    /// The tokens covered by this derivation, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a str>) {
        match &self.children {
            Children::Terminals(tokens) => leaves.extend(tokens.iter().map(String::as_str)),
            Children::Pair(left, right) => {
                left.collect_leaves(leaves);
                right.collect_leaves(leaves);
            },
        }
    }

    /// Visits every node, parents before children.
    pub fn walk(&self, visit: &mut impl FnMut(&Derivation)) {
        visit(self);
        if let Children::Pair(left, right) = &self.children {
            left.walk(visit);
            right.walk(visit);
        }
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.children {
            Children::Terminals(tokens) => write!(f, "({}, {})", self.category(), tokens.join(" ")),
            Children::Pair(left, right) => {
                write!(f, "({}, {} {})", self.category(), left, right)
            },
        }
    }
}
