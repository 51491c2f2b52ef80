use crate::collections::{ElementArray, MemberTable};
use crate::context::Constants;
use crate::decode::lexer::{Lexer, Token};
use crate::intern::{IStr, StringPool};
use crate::options::ParseOptions;
use crate::value::Value;
use crate::{Error, Result};

/// Parse one complete document.
///
/// With `constants` set, every `null`, `true` and `false` in the document
/// is a new handle to the shared value instead of a fresh allocation.
pub(crate) fn parse_document(
    input: &[u8],
    options: &ParseOptions,
    constants: Option<&Constants>,
) -> Result<Value> {
    let lexer = Lexer::new(input).with_comments(options.line_comments, options.block_comments);
    let mut parser = Parser {
        lexer,
        pool: options.intern_strings.then(StringPool::new),
        constants,
        max_depth: options.max_depth,
        depth: 0,
    };
    parser.bump()?;
    let value = parser.parse_value()?;
    if parser.lexer.token() != Token::End {
        return Err(parser.syntax("end of input expected"));
    }
    Ok(value)
}

struct Parser<'a, 'c> {
    lexer: Lexer<'a>,
    pool: Option<StringPool>,
    constants: Option<&'c Constants>,
    max_depth: usize,
    depth: usize,
}

impl<'a, 'c> Parser<'a, 'c> {
    fn syntax(&self, message: &str) -> Error {
        Error::syntax(self.lexer.line(), message)
    }

    /// Move to the next token, surfacing a lexical error as `Err`.
    fn bump(&mut self) -> Result<Token> {
        match self.lexer.advance() {
            Token::Error => Err(self
                .lexer
                .error()
                .cloned()
                .unwrap_or_else(|| self.syntax("unexpected token"))),
            token => Ok(token),
        }
    }

    fn accept(&mut self, token: Token) -> Result<bool> {
        if self.lexer.token() != token {
            return Ok(false);
        }
        self.bump()?;
        Ok(true)
    }

    fn expect(&mut self, token: Token, message: &str) -> Result<()> {
        if self.accept(token)? {
            Ok(())
        } else {
            Err(self.syntax(message))
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        let value = match self.lexer.token() {
            Token::LeftBrace => return self.nested(Self::parse_object),
            Token::LeftBracket => return self.nested(Self::parse_array),
            Token::String => Value::string(self.string_handle()?),
            Token::Number => Value::number(self.lexer.number()),
            Token::Null => self.constant(|c| &c.null, Value::null),
            Token::True => self.constant(|c| &c.truth, || Value::boolean(true)),
            Token::False => self.constant(|c| &c.falsity, || Value::boolean(false)),
            _ => return Err(self.syntax("value expected")),
        };
        self.bump()?;
        Ok(value)
    }

    fn constant(&self, shared: impl Fn(&Constants) -> &Value, fresh: impl Fn() -> Value) -> Value {
        match self.constants {
            Some(constants) => shared(constants).clone(),
            None => fresh(),
        }
    }

    fn nested(&mut self, parse: fn(&mut Self) -> Result<Value>) -> Result<Value> {
        if self.depth >= self.max_depth {
            return Err(self.syntax("maximum nesting depth exceeded"));
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.bump()?;
        let mut table = MemberTable::new();
        if self.lexer.token() != Token::RightBrace {
            loop {
                if self.lexer.token() != Token::String {
                    return Err(self.syntax("string expected"));
                }
                let key = self.string_handle()?;
                self.bump()?;
                self.expect(Token::Colon, "':' expected")?;
                let value = self.parse_value()?;
                table.put(key, value)?;
                if !self.accept(Token::Comma)? {
                    break;
                }
            }
        }
        self.expect(Token::RightBrace, "'}' expected")?;
        Ok(Value::from(table))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.bump()?;
        let mut items = ElementArray::new();
        if self.lexer.token() != Token::RightBracket {
            loop {
                items.push(self.parse_value()?)?;
                if !self.accept(Token::Comma)? {
                    break;
                }
            }
        }
        self.expect(Token::RightBracket, "']' expected")?;
        Ok(Value::from(items))
    }

    fn string_handle(&mut self) -> Result<IStr> {
        let text = self.lexer.string();
        match &mut self.pool {
            Some(pool) => pool.intern(text),
            None => Ok(IStr::new(text)),
        }
    }
}
