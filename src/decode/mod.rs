pub mod lexer;
mod parser;

pub use lexer::{Lexer, Token};
pub(crate) use parser::parse_document;

use crate::options::ParseOptions;
use crate::value::Value;
use crate::Result;

pub fn from_str(input: &str, options: &ParseOptions) -> Result<Value> {
    from_slice(input.as_bytes(), options)
}

/// Parse raw bytes. String literals must hold valid UTF-8; bytes outside
/// them are only ever matched against ASCII.
pub fn from_slice(input: &[u8], options: &ParseOptions) -> Result<Value> {
    parse_document(input, options, None)
}
