//! Pure filters and aggregations over student/faculty records.
//!
//! Kept separate from persistence on purpose: ordering, tie-breaks and
//! numeric edge cases are worth testing without a database. Every function
//! here takes a snapshot of records in the store's natural (insertion)
//! order and never mutates it.

use crate::entity::{faculty, student};

/// Students whose age equals `age` exactly, in natural order.
pub fn students_with_age(students: &[student::Model], age: i32) -> Vec<student::Model> {
    students.iter().filter(|s| s.age == age).cloned().collect()
}

/// Students with `min <= age <= max` inclusive, in natural order.
pub fn students_in_age_range(
    students: &[student::Model],
    min: i32,
    max: i32,
) -> Vec<student::Model> {
    students
        .iter()
        .filter(|s| s.age >= min && s.age <= max)
        .cloned()
        .collect()
}

/// Arithmetic mean of the ages; `0.0` for an empty set.
pub fn average_age(students: &[student::Model]) -> f64 {
    if students.is_empty() {
        return 0.0;
    }
    let sum: i64 = students.iter().map(|s| i64::from(s.age)).sum();
    sum as f64 / students.len() as f64
}

/// The `n` most recently created students, newest first.
///
/// Identity is assigned monotonically at creation, so "newest" is the
/// largest id.
pub fn last_n(students: &[student::Model], n: usize) -> Vec<student::Model> {
    let mut sorted: Vec<student::Model> = students.to_vec();
    sorted.sort_by(|a, b| b.id.cmp(&a.id));
    sorted.truncate(n);
    sorted
}

/// Names beginning with `letter` (case-insensitive), upper-cased and
/// sorted ascending.
pub fn names_starting_with(students: &[student::Model], letter: char) -> Vec<String> {
    let mut names: Vec<String> = students
        .iter()
        .filter(|s| {
            s.name
                .chars()
                .next()
                .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
        })
        .map(|s| s.name.to_uppercase())
        .collect();
    names.sort();
    names
}

/// The longest faculty name; ties resolve to the first one encountered in
/// natural order. Empty input yields an empty string.
pub fn longest_faculty_name(faculties: &[faculty::Model]) -> String {
    // A strict `>` keeps the first maximum; `Iterator::max_by_key` would
    // keep the last.
    let mut longest: Option<&str> = None;
    for f in faculties {
        if longest.is_none_or(|best| f.name.chars().count() > best.chars().count()) {
            longest = Some(&f.name);
        }
    }
    longest.unwrap_or_default().to_string()
}

/// Faculties matching the given color and/or name, exact match.
///
/// When both are supplied a faculty must match both (AND). With neither,
/// every faculty matches.
pub fn filter_faculties(
    faculties: &[faculty::Model],
    color: Option<&str>,
    name: Option<&str>,
) -> Vec<faculty::Model> {
    faculties
        .iter()
        .filter(|f| color.is_none_or(|c| f.color == c))
        .filter(|f| name.is_none_or(|n| f.name == n))
        .cloned()
        .collect()
}
