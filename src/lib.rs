//! Reference-counted JSON values.
//!
//! Documents parse into shared [`Value`] handles: objects are open-addressing
//! hash tables keyed by interned strings, arrays grow by half their size, and
//! every string literal of a document goes through one [`StringPool`] so
//! repeated keys share a buffer.
//!
//! ```
//! let value = rcjson::parse(r#"{"name": "rcjson", "tags": ["json", "rc"]}"#)?;
//! assert_eq!(value.get_string("name").unwrap(), "rcjson");
//!
//! let tags = value.get("tags").unwrap();
//! tags.push_string("intern")?;
//! assert_eq!(rcjson::to_string(&tags), r#"["json","rc","intern"]"#);
//! # Ok::<(), rcjson::Error>(())
//! ```
//!
//! The free functions here never print. A [`Context`] reports errors through
//! an [`ErrorSink`] and can share one `null`/`true`/`false` between documents.

pub mod collections;
pub mod constants;
pub mod context;
pub mod decode;
pub mod encode;
pub mod error;
pub mod intern;
mod interop;
pub mod num;
pub mod options;
pub mod text;
pub mod value;

pub use crate::collections::{ElementArray, MemberTable};
pub use crate::context::{
    Context, ErrorSink, FsReader, MemorySink, NullSink, SourceReader, StderrSink,
};
pub use crate::encode::{to_string, to_string_pretty, to_string_with_options};
pub use crate::error::{Error, ErrorKind};
pub use crate::intern::{IStr, StringPool};
pub use crate::options::{
    Indent, NonFinite, NumberFormat, ParseOptions, SerializeOptions, Style,
};
pub use crate::value::{Value, ValueType};

pub type Result<T> = std::result::Result<T, Error>;

/// Parse one complete document with the default [`ParseOptions`].
///
/// Only whitespace and comments may follow the value; anything else is the
/// syntax error `end of input expected`.
///
/// ```
/// assert!(rcjson::parse("[1] // done").is_ok());
/// let err = rcjson::parse("[1] [2]").unwrap_err();
/// assert_eq!(err.to_string(), "line 1: end of input expected");
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_slice(input.as_bytes())
}

pub fn parse_slice(input: &[u8]) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Like [`parse`], with explicit options. Trailing content is rejected the
/// same way.
pub fn parse_with_options(input: &[u8], options: &ParseOptions) -> Result<Value> {
    decode::from_slice(input, options)
}

/// Read and parse the file at `path`.
pub fn parse_from(path: &str) -> Result<Value> {
    let bytes = FsReader
        .read(path)
        .map_err(|err| Error::io(path, err.to_string()))?;
    parse_slice(&bytes)
}
