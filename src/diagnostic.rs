// Copyright (c) 2018 Fabian Schuiki

//! Suggestions for handles that cannot be reduced.

use grammar::{Grammar, RuleId};

/// The Levenshtein distance between two strings, counted in characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..b.len() + 1).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag
            } else {
                diag.min(above).min(row[j]) + 1
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// Find the rule whose right-hand side is closest to `handle`.
///
/// Distances are measured between `handle` and the space-joined right-hand
/// side of every rule. Ties go to the rule visited first in store order.
/// Returns `None` only if the grammar has no rules.
pub fn nearest_rule(grammar: &Grammar, handle: &str) -> Option<(RuleId, usize)> {
    let mut best: Option<(RuleId, usize)> = None;
    for (id, rule) in grammar.alternatives() {
        let distance = edit_distance(handle, &rule.rhs_string());
        match best {
            Some((_, d)) if d <= distance => (),
            _ => best = Some((id, distance)),
        }
    }
    best
}
