//! Positional placeholder lists

/// `n` positional placeholders joined with commas, for `IN (...)` clauses
///
/// ```
/// use rowmap_core::sql::question_marks;
/// assert_eq!(question_marks(3), "?,?,?");
/// assert_eq!(question_marks(0), "");
/// ```
pub fn question_marks(n: usize) -> String {
    vec!["?"; n].join(",")
}
