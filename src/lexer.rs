use crate::ast::Token;

/// Unrecognized or malformed input, with the character offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {position}")]
pub struct LexError {
    pub message: String,
    pub position: usize,
}

impl LexError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        LexError {
            message: message.into(),
            position,
        }
    }
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    token_start: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            token_start: 0,
        }
    }

    /// Character offset where the most recently returned token starts.
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// `.` is excluded so that relative segments lex as `Dot`/`DotDot`.
    fn is_identifier_start(ch: char) -> bool {
        ch.is_alphanumeric() || matches!(ch, '_' | '-')
    }

    fn is_identifier_char(ch: char) -> bool {
        ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.')
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if Self::is_identifier_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '\'' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.current_char() {
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(LexError::new(
                                format!("Invalid escape sequence '\\{other}'"),
                                self.position - 1,
                            ));
                        }
                        None => break,
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::new("Unterminated string literal", start))
    }

    /// Single-character tokens advance past themselves.
    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    /// Two-character tokens advance past both characters.
    fn double(&mut self, token: Token) -> Token {
        self.advance();
        self.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        self.token_start = self.position;

        let token = match self.current_char() {
            None => Token::Eof,
            Some('/') => self.single(Token::Slash),
            Some('|') => self.single(Token::Pipe),
            Some('{') => self.single(Token::LBrace),
            Some('}') => self.single(Token::RBrace),
            Some(',') => self.single(Token::Comma),
            Some('=') => self.single(Token::Equals),
            Some('*') => {
                if self.peek_char(1) == Some('*') {
                    self.double(Token::DoubleStar)
                } else {
                    self.single(Token::Star)
                }
            }
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.double(Token::DotDot)
                } else {
                    self.single(Token::Dot)
                }
            }
            Some('~') => {
                if self.peek_char(1) == Some('~') {
                    self.double(Token::Placeholder)
                } else {
                    return Err(LexError::new(
                        "Unexpected '~' (did you mean '~~'?)",
                        self.position,
                    ));
                }
            }
            Some('\'') => Token::String(self.read_string()?),
            Some(ch) if Self::is_identifier_start(ch) => Token::Identifier(self.read_identifier()),
            Some(ch) => {
                return Err(LexError::new(
                    format!("Unexpected character '{ch}'"),
                    self.position,
                ));
            }
        };

        Ok(token)
    }

    /// Lexes the whole input, including the trailing [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[test]
fn test_relative_operators() {
    let mut lexer = Lexer::new("/./..");
    assert_eq!(lexer.next_token(), Ok(Token::Slash));
    assert_eq!(lexer.next_token(), Ok(Token::Dot));
    assert_eq!(lexer.next_token(), Ok(Token::Slash));
    assert_eq!(lexer.next_token(), Ok(Token::DotDot));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_token_start_tracks_last_token() {
    let mut lexer = Lexer::new("/Root  {a=b}");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(lexer.token_start(), 1);
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.token_start(), 7);
}

#[test]
fn test_leading_dash_starts_identifier() {
    let mut lexer = Lexer::new("{offset=-1}");
    assert_eq!(lexer.next_token(), Ok(Token::LBrace));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("offset".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::Equals));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("-1".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::RBrace));
}
