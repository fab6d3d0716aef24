//! Grammar rules, split by syntactic category.
//!
//! - `stmt`: statements, declarations, function bodies
//! - `expr`: expressions, from assignment down to primaries

mod expr;
mod stmt;
