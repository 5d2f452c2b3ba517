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

/// Labels starting with this are categories, anything else is a terminal.
pub const CATEGORY_SIGIL: char = '$';
/// Categories whose name ends with this hold operator meanings.
pub const OPERATOR_SUFFIX: &str = "Op";
pub const START_CATEGORY: &str = "$E";
pub const DEFAULT_ETA: f64 = 0.1;
pub const DEFAULT_EPOCHS: usize = 20;
pub const DEFAULT_SEED: u64 = 60;
/// Added to the score of every derivation that doesn't match the gold label.
pub const LOSS_AUGMENTATION: f64 = 1.0;
/// Feature name used for the unary minus so it isn't confused with subtraction.
pub const UNARY_MINUS: &str = "~";
