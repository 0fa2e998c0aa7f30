use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Bare identifier: node names, attribute keys and unquoted values
    ///
    /// Letters, digits, `_`, `-` and `.`, so versions and hyphenated
    /// variants lex as one token.
    ///
    /// # Examples
    /// ```text
    /// GrandChild1
    /// 3.2.0
    /// button-alt
    /// ```
    Identifier(String),

    /// Single-quoted string literal, quotes stripped
    ///
    /// # Examples
    /// ```text
    /// 'button-alt'
    /// 'it\'s'
    /// ```
    String(String),

    // Path operators
    /// Path separator `/`
    Slash,

    /// Deep traversal marker `**`
    ///
    /// # Examples
    /// ```text
    /// **/GrandChild1
    /// ```
    DoubleStar,

    /// Wildcard `*`
    ///
    /// All direct children in a path, any value in an attribute filter.
    Star,

    /// Descendant placeholder `~~`
    ///
    /// # Examples
    /// ```text
    /// /Root/~~/GrandChild2
    /// ```
    Placeholder,

    /// Current level `.`
    Dot,

    /// Parent level `..`
    DotDot,

    /// Alternation `|`
    ///
    /// # Examples
    /// ```text
    /// /Root/Child1|/Root/Child2
    /// ```
    Pipe,

    // Attribute filters
    /// Opens an attribute filter
    LBrace,

    /// Closes an attribute filter
    RBrace,

    /// Separates attribute expressions
    Comma,

    /// Separates an attribute key from its value
    Equals,

    /// End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier '{name}'"),
            Token::String(s) => write!(f, "string '{s}'"),
            Token::Slash => f.write_str("'/'"),
            Token::DoubleStar => f.write_str("'**'"),
            Token::Star => f.write_str("'*'"),
            Token::Placeholder => f.write_str("'~~'"),
            Token::Dot => f.write_str("'.'"),
            Token::DotDot => f.write_str("'..'"),
            Token::Pipe => f.write_str("'|'"),
            Token::LBrace => f.write_str("'{'"),
            Token::RBrace => f.write_str("'}'"),
            Token::Comma => f.write_str("','"),
            Token::Equals => f.write_str("'='"),
            Token::Eof => f.write_str("end of input"),
        }
    }
}
