use memchr::{memchr, memchr3, memchr_iter, memmem};
use smallvec::SmallVec;

use crate::constants::{is_json_whitespace, is_keyword, is_structural_byte, UTF8_BOM};
use crate::text::string::combine_surrogates;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    End,
    Number,
    String,
    Null,
    True,
    False,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Error,
}

/// Byte-level tokenizer with one token of state.
///
/// After [`Lexer::advance`] the current token's payload is available through
/// [`Lexer::string`] or [`Lexer::number`]. Once a token comes back as
/// [`Token::Error`] the lexer stays there and [`Lexer::error`] holds the
/// reason.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    token: Token,
    text: SmallVec<[u8; 64]>,
    number: f64,
    error: Option<Error>,
    line_comments: bool,
    block_comments: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        let pos = if input.starts_with(UTF8_BOM) {
            UTF8_BOM.len()
        } else {
            0
        };
        Self {
            input,
            pos,
            line: 1,
            token: Token::End,
            text: SmallVec::new(),
            number: 0.0,
            error: None,
            line_comments: true,
            block_comments: true,
        }
    }

    pub fn with_comments(mut self, line_comments: bool, block_comments: bool) -> Self {
        self.line_comments = line_comments;
        self.block_comments = block_comments;
        self
    }

    pub fn token(&self) -> Token {
        self.token
    }

    /// Line of the current position, starting at 1.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The current string token. Its bytes were validated when it was read.
    pub fn string(&self) -> &str {
        std::str::from_utf8(&self.text).unwrap_or_default()
    }

    pub fn number(&self) -> f64 {
        self.number
    }

    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn advance(&mut self) -> Token {
        if self.token == Token::Error {
            return Token::Error;
        }
        self.token = match self.scan() {
            Ok(token) => token,
            Err(err) => {
                self.error = Some(err);
                Token::Error
            }
        };
        self.token
    }

    fn fail(&self, message: impl Into<String>) -> Error {
        Error::lexical(self.line, message)
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn scan(&mut self) -> Result<Token, Error> {
        self.skip_trivia()?;
        let Some(byte) = self.peek() else {
            return Ok(Token::End);
        };

        if byte.is_ascii_alphabetic() {
            return self.scan_keyword();
        }
        if byte.is_ascii_digit() || byte == b'-' {
            return self.scan_number();
        }
        if byte == b'"' {
            return self.scan_string();
        }
        if is_structural_byte(byte) {
            self.pos += 1;
            return Ok(match byte {
                b'{' => Token::LeftBrace,
                b'}' => Token::RightBrace,
                b'[' => Token::LeftBracket,
                b']' => Token::RightBracket,
                b':' => Token::Colon,
                _ => Token::Comma,
            });
        }
        Err(self.fail(format!(
            "unexpected character '{}'",
            char_at(self.input, self.pos)
        )))
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        loop {
            let Some(byte) = self.peek() else {
                return Ok(());
            };
            if is_json_whitespace(byte) {
                if byte == b'\n' {
                    self.line += 1;
                }
                self.pos += 1;
                continue;
            }
            if byte != b'/' {
                return Ok(());
            }
            match self.input.get(self.pos + 1) {
                Some(b'/') => {
                    if !self.line_comments {
                        return Err(self.fail("comments are not supported"));
                    }
                    // Stop at the newline so the whitespace branch counts it.
                    let rest = &self.input[self.pos..];
                    self.pos += memchr(b'\n', rest).unwrap_or(rest.len());
                }
                Some(b'*') => {
                    if !self.block_comments {
                        return Err(self.fail("comments are not supported"));
                    }
                    let body = &self.input[self.pos + 2..];
                    let Some(end) = memmem::find(body, b"*/") else {
                        self.line += memchr_iter(b'\n', body).count();
                        self.pos = self.input.len();
                        return Err(self.fail("unexpected end of file"));
                    };
                    self.line += memchr_iter(b'\n', &body[..end]).count();
                    self.pos += 2 + end + 2;
                }
                _ => return Ok(()),
            }
        }
    }

    fn scan_keyword(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let word = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        if !is_keyword(word) {
            return Err(self.fail(format!("unknown keyword '{word}'")));
        }
        Ok(match word {
            "null" => Token::Null,
            "true" => Token::True,
            _ => Token::False,
        })
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn scan_number(&mut self) -> Result<Token, Error> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.skip_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.skip_digits();
        }

        // Only ASCII digits, signs, '.' and 'e' were consumed.
        let text = std::str::from_utf8(&self.input[start..self.pos]).unwrap_or_default();
        match text.parse::<f64>() {
            Ok(number) => {
                self.number = number;
                Ok(Token::Number)
            }
            Err(_) => Err(self.fail(format!("malformed number '{text}'"))),
        }
    }

    fn scan_string(&mut self) -> Result<Token, Error> {
        self.pos += 1;
        self.text.clear();
        loop {
            let rest = &self.input[self.pos..];
            let Some(offset) = memchr3(b'"', b'\\', b'\n', rest) else {
                self.pos = self.input.len();
                return Err(self.fail("unterminated string literal"));
            };
            self.text.extend_from_slice(&rest[..offset]);
            self.pos += offset;
            match self.input[self.pos] {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    self.scan_escape()?;
                }
                _ => return Err(self.fail("unterminated string literal")),
            }
        }
        if std::str::from_utf8(&self.text).is_err() {
            return Err(self.fail("invalid UTF-8 in string literal"));
        }
        Ok(Token::String)
    }

    /// Decode one escape; `pos` is just past the backslash.
    fn scan_escape(&mut self) -> Result<(), Error> {
        let Some(byte) = self.peek() else {
            return Err(self.fail("unterminated string literal"));
        };
        self.pos += 1;
        let decoded = match byte {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0C,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => return self.scan_unicode_escape(),
            _ => {
                let shown = char_at(self.input, self.pos - 1);
                return Err(self.fail(format!("bad escape sequence '\\{shown}'")));
            }
        };
        self.text.push(decoded);
        Ok(())
    }

    fn scan_unicode_escape(&mut self) -> Result<(), Error> {
        let unit = self.read_hex4()?;
        let ch = match unit {
            0xD800..=0xDBFF => {
                if !self.input[self.pos..].starts_with(b"\\u") {
                    return Err(self.fail(format!("expected a surrogate pair with \\u{unit:04X}")));
                }
                self.pos += 2;
                let low = self.read_hex4()?;
                combine_surrogates(unit, low).ok_or_else(|| {
                    self.fail(format!("expected a surrogate pair with \\u{unit:04X}"))
                })?
            }
            0xDC00..=0xDFFF => return Err(self.fail("unexpected low surrogate")),
            _ => char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER),
        };
        let mut buf = [0u8; 4];
        self.text
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }

    fn read_hex4(&mut self) -> Result<u16, Error> {
        let digits = self
            .input
            .get(self.pos..self.pos + 4)
            .filter(|digits| digits.iter().all(u8::is_ascii_hexdigit))
            .ok_or_else(|| self.fail("bad '\\uXXXX' sequence"))?;
        let unit = digits.iter().fold(0u16, |acc, &digit| {
            let value = match digit {
                b'0'..=b'9' => digit - b'0',
                b'a'..=b'f' => digit - b'a' + 10,
                _ => digit - b'A' + 10,
            };
            (acc << 4) | u16::from(value)
        });
        self.pos += 4;
        Ok(unit)
    }
}

/// The char starting at `pos`, for error messages.
fn char_at(input: &[u8], pos: usize) -> char {
    let end = (pos + 4).min(input.len());
    (pos + 1..=end)
        .find_map(|stop| std::str::from_utf8(&input[pos..stop]).ok())
        .and_then(|text| text.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
