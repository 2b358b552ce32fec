//! Autocomplete ranking for food and exercise names.

use crate::tables::ReferenceTables;

pub const FOOD_SUGGESTION_LIMIT: usize = 30;
pub const EXERCISE_SUGGESTION_LIMIT: usize = 20;

/// Lowercases, folds full-width parentheses, then drops whitespace and
/// parentheses.
pub fn normalize_name(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            other => other,
        })
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect()
}

/// Orders `pool` by how well each name matches `query`: prefix matches
/// first, then earlier substring position, then closer length. Names that
/// do not contain the query are dropped. Ties keep pool order.
pub fn rank<'a>(query: &str, pool: &[&'a str], limit: usize) -> Vec<&'a str> {
    let q = normalize_name(query);
    let q_len = q.chars().count() as f64;

    let mut scored: Vec<(f64, &'a str)> = pool
        .iter()
        .filter_map(|name| {
            let normalized = normalize_name(name);
            let byte_pos = normalized.find(&q)?;
            let position = normalized[..byte_pos].chars().count() as f64;
            let prefix_boost = if byte_pos == 0 { -1000.0 } else { 0.0 };
            let length_gap = (normalized.chars().count() as f64 - q_len).abs() * 0.01;
            Some((prefix_boost + position + length_gap, *name))
        })
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}

/// Precise names followed by unit-conversion names, without repeats.
pub fn food_pool(tables: &ReferenceTables) -> Vec<&str> {
    let mut pool: Vec<&str> = Vec::new();
    for name in tables.precise.names().chain(tables.unit_conversions.names()) {
        if !pool.contains(&name) {
            pool.push(name);
        }
    }
    pool
}

pub fn suggest_foods<'a>(tables: &'a ReferenceTables, query: &str) -> Vec<&'a str> {
    rank(query, &food_pool(tables), FOOD_SUGGESTION_LIMIT)
}

/// Ranked exercise names with their MET values.
pub fn suggest_exercises<'a>(tables: &'a ReferenceTables, query: &str) -> Vec<(&'a str, f64)> {
    let pool: Vec<&str> = tables.exercises.iter().map(|(name, _)| name).collect();
    rank(query, &pool, EXERCISE_SUGGESTION_LIMIT)
        .into_iter()
        .filter_map(|name| tables.exercises.get(name).map(|met| (name, met)))
        .collect()
}
