//! Comma-delimited text parsing.
//!
//! The first record is the header and defines the row arity. Quoted fields
//! may contain commas, newlines, and `""` escapes. Short rows are padded with
//! empty strings; extra cells are ignored.

mod parser;
mod row;

pub use parser::{parse, parse_strict, ParseError};
pub use row::Row;
