use crate::{
    ast::{
        AttributeExpr, AttributeFilter, AttributeValue, DeepSelector, MultiSelector, Segment,
        SegmentKind, Selector, SelectorExpression, Token,
    },
    lexer::{LexError, Lexer},
};
use std::mem;

/// Errors produced while turning selector text into a [`MultiSelector`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The lexer rejected the input
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    /// A token did not fit the grammar
    #[error("Expected {expected}, found {found} at position {position}")]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        position: usize,
    },

    /// An expression that starts with neither `/` nor `**`
    #[error("Selector must start with '/' or '**' at position {position}")]
    MissingRoot { position: usize },

    /// Nothing to parse
    #[error("Empty selector")]
    Empty,
}

impl ParseError {
    /// Character offset the error points at, if it has one.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Lex(e) => Some(e.position),
            ParseError::UnexpectedToken { position, .. } | ParseError::MissingRoot { position } => {
                Some(*position)
            }
            ParseError::Empty => None,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: usize,
    recovered: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            recovered: Vec::new(),
        })
    }

    /// Errors from `|`-joined alternatives that were skipped during the last parse.
    pub fn recovered(&self) -> &[ParseError] {
        &self.recovered
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: Token, description: &'static str) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(description));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.clone(),
            position: self.current_position,
        }
    }

    /// Parse a complete, possibly `|`-joined, selector.
    ///
    /// When more than one alternative is present, an alternative that fails
    /// to parse is skipped and recorded in [`Parser::recovered`]. A lone
    /// alternative that fails is returned as the error. Lex errors are
    /// never recovered.
    pub fn parse_multi_selector(&mut self) -> Result<MultiSelector, ParseError> {
        self.recovered.clear();

        if self.check(&Token::Eof) {
            return Err(ParseError::Empty);
        }

        let mut alternatives = vec![];
        let mut failures = vec![];

        loop {
            match self.parse_selector_expression() {
                Ok(expr) if self.check(&Token::Pipe) || self.check(&Token::Eof) => {
                    alternatives.push(expr);
                }
                Ok(_) => failures.push(self.unexpected("'|' or end of input")),
                Err(e @ ParseError::Lex(_)) => return Err(e),
                Err(e) => failures.push(e),
            }

            self.synchronize()?;

            if self.check(&Token::Pipe) {
                self.advance()?;
            } else {
                break;
            }
        }

        // A lone alternative can only fail by leaving `alternatives` empty.
        if alternatives.is_empty() {
            return Err(failures.into_iter().next().unwrap_or(ParseError::Empty));
        }

        self.recovered = failures;
        Ok(MultiSelector { alternatives })
    }

    /// Skip to the next top-level `|` or the end of input.
    fn synchronize(&mut self) -> Result<(), ParseError> {
        while !self.check(&Token::Pipe) && !self.check(&Token::Eof) {
            self.advance()?;
        }
        Ok(())
    }

    fn parse_selector_expression(&mut self) -> Result<SelectorExpression, ParseError> {
        match self.current_token {
            Token::Slash => {
                self.advance()?; // consume '/'
                let root = self.parse_segment_body()?;
                let path = self.parse_path()?;
                Ok(SelectorExpression::Selector(Selector { root, path }))
            }
            Token::DoubleStar => {
                self.advance()?; // consume '**'
                self.expect(Token::Slash, "'/' after '**'")?;
                let first = self.parse_segment_body()?;
                let path = self.parse_path()?;
                Ok(SelectorExpression::Deep(DeepSelector { first, path }))
            }
            _ => Err(ParseError::MissingRoot {
                position: self.current_position,
            }),
        }
    }

    fn parse_path(&mut self) -> Result<Vec<Segment>, ParseError> {
        let mut path = vec![];
        while self.check(&Token::Slash) {
            self.advance()?;
            path.push(self.parse_segment_body()?);
        }
        Ok(path)
    }

    fn parse_segment_body(&mut self) -> Result<Segment, ParseError> {
        let kind = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(name) => SegmentKind::Named(name),
            Token::Star => SegmentKind::Wildcard,
            Token::Placeholder => SegmentKind::Placeholder,
            Token::Dot => SegmentKind::Current,
            Token::DotDot => SegmentKind::Parent,
            token => {
                self.current_token = token;
                return Err(self.unexpected("node name, '*', '~~', '.' or '..'"));
            }
        };
        self.advance()?;

        if self.check(&Token::LBrace) {
            let filter = self.parse_attribute_filter()?;
            Ok(Segment::with_filter(kind, filter))
        } else {
            Ok(Segment::new(kind))
        }
    }

    fn parse_attribute_filter(&mut self) -> Result<AttributeFilter, ParseError> {
        self.advance()?; // consume '{'

        let mut exprs = vec![self.parse_attribute_expr()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            exprs.push(self.parse_attribute_expr()?);
        }

        self.expect(Token::RBrace, "',' or '}'")?;
        Ok(AttributeFilter { exprs })
    }

    fn parse_attribute_expr(&mut self) -> Result<AttributeExpr, ParseError> {
        let key = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Identifier(key) | Token::String(key) => key,
            token => {
                self.current_token = token;
                return Err(self.unexpected("attribute name"));
            }
        };
        self.advance()?;

        self.expect(Token::Equals, "'='")?;

        let value = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Star => AttributeValue::Any,
            Token::String(value) if value == "*" => AttributeValue::Any,
            Token::Identifier(value) | Token::String(value) => AttributeValue::Literal(value),
            token => {
                self.current_token = token;
                return Err(self.unexpected("attribute value"));
            }
        };
        self.advance()?;

        Ok(AttributeExpr { key, value })
    }
}

/// Parse selector text in one call.
///
/// # Examples
///
/// ```
/// use tree_selector::parser::parse;
///
/// let ast = parse("/Root/*{type=component}|**/GrandChild1").unwrap();
/// assert_eq!(ast.alternatives.len(), 2);
/// assert_eq!(ast.to_string(), "/Root/*{type=component}|**/GrandChild1");
/// ```
pub fn parse(input: &str) -> Result<MultiSelector, ParseError> {
    let mut parser = Parser::new(Lexer::new(input))?;
    parser.parse_multi_selector()
}
