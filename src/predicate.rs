// Copyright 2023 RisingWave Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Turns a [`Split`]'s `ChunkRange` into a bound SQL predicate (spec §4.5).
//!
//! The first chunk of a table's emission is `start == None`, and is bound with
//! `col <= end AND NOT (col = end)` rather than a plain `col < end`: this lets
//! a database optimizer use an index equality plan on the boundary value
//! instead of a computed upper bound.

use crate::key::KeyValue;
use crate::split::Split;

/// Builds the full query text for `split` and the bind parameters for its
/// placeholders, in positional order.
///
/// | `start`  | `end`    | predicate                              | binds        |
/// |----------|----------|-----------------------------------------|--------------|
/// | `None`   | `None`   | *(no `WHERE`)*                           | `[]`         |
/// | `None`   | `Some E` | `col <= ? AND NOT (col = ?)`              | `[E, E]`     |
/// | `Some S` | `None`   | `col >= ?`                                | `[S]`        |
/// | `Some S` | `Some E` | `col >= ? AND NOT (col = ?) AND col <= ?` | `[S, E, E]`  |
pub fn generate(split: &Split) -> (String, Vec<KeyValue>) {
    let base = split.query.clone();
    let col = quote_ident(&split.key_name);

    match (&split.start, &split.end) {
        (None, None) => (base, Vec::new()),
        (None, Some(end)) => (
            format!("{base} WHERE {col} <= ? AND NOT ({col} = ?)"),
            vec![end.clone(), end.clone()],
        ),
        (Some(start), None) => (
            format!("{base} WHERE {col} >= ?"),
            vec![start.clone()],
        ),
        (Some(start), Some(end)) => (
            format!("{base} WHERE {col} >= ? AND NOT ({col} = ?) AND {col} <= ?"),
            vec![start.clone(), end.clone(), end.clone()],
        ),
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
