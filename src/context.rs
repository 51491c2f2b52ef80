//! Parse configuration with pluggable error reporting and file reading.
//!
//! A [`Context`] bundles [`ParseOptions`], an [`ErrorSink`] that receives
//! every error message once, and a [`SourceReader`] used by
//! [`Context::parse_from`]. It can also own shared `null`/`true`/`false`
//! values that documents parsed through it reuse.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::decode::parse_document;
use crate::options::ParseOptions;
use crate::value::Value;
use crate::{Error, Result};

/// Receives the text of every error a [`Context`] returns.
pub trait ErrorSink {
    fn report(&self, message: &str);
}

/// Loads named documents for [`Context::parse_from`].
pub trait SourceReader {
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Writes `error: <message>` to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn report(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn report(&self, _message: &str) {}
}

/// Collects messages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl ErrorSink for MemorySink {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

impl<T: ErrorSink + ?Sized> ErrorSink for Rc<T> {
    fn report(&self, message: &str) {
        (**self).report(message);
    }
}

/// Reads from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(name)
    }
}

impl<F> SourceReader for F
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self(name)
    }
}

pub(crate) struct Constants {
    pub(crate) null: Value,
    pub(crate) truth: Value,
    pub(crate) falsity: Value,
}

impl Constants {
    fn new() -> Self {
        Self {
            null: Value::null(),
            truth: Value::boolean(true),
            falsity: Value::boolean(false),
        }
    }
}

pub struct Context {
    options: ParseOptions,
    constants: Option<Constants>,
    sink: Box<dyn ErrorSink>,
    reader: Box<dyn SourceReader>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
            constants: None,
            sink: Box::new(StderrSink),
            reader: Box::new(FsReader),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Share one `null`, one `true` and one `false` across every document
    /// this context parses or builds.
    pub fn with_shared_constants(mut self, enabled: bool) -> Self {
        self.constants = enabled.then(Constants::new);
        self
    }

    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_reader(mut self, reader: impl SourceReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn has_shared_constants(&self) -> bool {
        self.constants.is_some()
    }

    /// A handle to the shared null, or a fresh one without shared constants.
    pub fn null(&self) -> Value {
        match &self.constants {
            Some(constants) => constants.null.clone(),
            None => Value::null(),
        }
    }

    pub fn boolean(&self, value: bool) -> Value {
        match (&self.constants, value) {
            (Some(constants), true) => constants.truth.clone(),
            (Some(constants), false) => constants.falsity.clone(),
            (None, _) => Value::boolean(value),
        }
    }

    /// Parse one complete document. Content after the value other than
    /// whitespace or comments is reported as `end of input expected`.
    pub fn parse(&self, input: &str) -> Result<Value> {
        self.parse_slice(input.as_bytes())
    }

    pub fn parse_slice(&self, input: &[u8]) -> Result<Value> {
        let result = parse_document(input, &self.options, self.constants.as_ref());
        self.reported(result)
    }

    /// Read `name` through the configured reader and parse it.
    pub fn parse_from(&self, name: &str) -> Result<Value> {
        let bytes = match self.reader.read(name) {
            Ok(bytes) => bytes,
            Err(err) => return self.reported(Err(Error::io(name, err.to_string()))),
        };
        self.parse_slice(&bytes)
    }

    fn reported(&self, result: Result<Value>) -> Result<Value> {
        if let Err(err) = &result {
            self.sink.report(&err.to_string());
        }
        result
    }
}
