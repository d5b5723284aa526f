//! Substring search patterns for `LIKE` filters.

use sea_orm::sea_query::LikeExpr;

/// Escape character for patterns built here. Needs no quoting on any backend.
pub const LIKE_ESCAPE: char = '!';

/// Escape `LIKE` metacharacters so `term` matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(c);
    }
    out
}

/// `%term%` over a lowercased column; `term` is lowercased and escaped.
pub fn contains_ci(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(&term.to_lowercase()))).escape(LIKE_ESCAPE)
}
