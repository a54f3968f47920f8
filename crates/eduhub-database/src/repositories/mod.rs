//! PostgreSQL repository implementations for all EduHub entities.

pub mod branch;
pub mod principal;

pub use branch::PgBranchRepository;
pub use principal::PgPrincipalRepository;

const LIKE_ESCAPE: &str = " ESCAPE '\\'";

/// `%term%` with `\`, `%` and `_` in the term escaped for `ILIKE ... ESCAPE '\'`,
/// so a search matches the literal substring like the memory stores do.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
