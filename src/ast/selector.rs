use std::fmt;

/// A `|`-separated list of independent selector expressions.
///
/// Results of the alternatives are unioned by node identity.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiSelector {
    pub alternatives: Vec<SelectorExpression>,
}

/// One alternative of a [`MultiSelector`].
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorExpression {
    /// Anchored path starting at the tree root
    ///
    /// # Example
    /// ```text
    /// /Root/Child2/GrandChild1
    /// ```
    Selector(Selector),

    /// Path whose first segment is matched against every node
    ///
    /// # Example
    /// ```text
    /// **/Child2/GrandChild2
    /// ```
    Deep(DeepSelector),
}

/// Anchored selector: a root segment followed by path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub root: Segment,
    pub path: Vec<Segment>,
}

/// Deep selector introduced by `**`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepSelector {
    /// Matched against every node in the tree
    pub first: Segment,
    /// Matched as ordinary children, exactly like [`Selector::path`]
    pub path: Vec<Segment>,
}

/// A single step of a path plus its optional attribute filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub filter: Option<AttributeFilter>,
}

impl Segment {
    pub fn new(kind: SegmentKind) -> Self {
        Segment { kind, filter: None }
    }

    pub fn with_filter(kind: SegmentKind, filter: AttributeFilter) -> Self {
        Segment {
            kind,
            filter: Some(filter),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentKind {
    /// Node name (`Child1`)
    Named(String),
    /// `*`
    Wildcard,
    /// `~~`
    Placeholder,
    /// `.`
    Current,
    /// `..`
    Parent,
}

/// Conjunction of attribute expressions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeFilter {
    pub exprs: Vec<AttributeExpr>,
}

impl AttributeFilter {
    /// True when no expression can reject a node.
    pub fn is_wildcard_only(&self) -> bool {
        self.exprs
            .iter()
            .all(|expr| expr.value == AttributeValue::Any)
    }
}

/// `key=value` inside an attribute filter.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeExpr {
    pub key: String,
    pub value: AttributeValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// `*`, quoted or not: matches any value, including an absent one
    Any,
    /// Exact string, quotes already stripped
    Literal(String),
}

// Rendering back to selector text. Output re-parses to an equal AST.

impl fmt::Display for MultiSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorExpression::Selector(selector) => write!(f, "{selector}"),
            SelectorExpression::Deep(deep) => write!(f, "{deep}"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.root)?;
        for segment in &self.path {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeepSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "**/{}", self.first)?;
        for segment in &self.path {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(filter) = &self.filter {
            write!(f, "{filter}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Named(name) => f.write_str(name),
            SegmentKind::Wildcard => f.write_str("*"),
            SegmentKind::Placeholder => f.write_str("~~"),
            SegmentKind::Current => f.write_str("."),
            SegmentKind::Parent => f.write_str(".."),
        }
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, expr) in self.exprs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write_literal(f, &expr.key)?;
            f.write_str("=")?;
            match &expr.value {
                AttributeValue::Any => f.write_str("*")?,
                AttributeValue::Literal(value) => write_literal(f, value)?,
            }
        }
        f.write_str("}")
    }
}

/// Writes `text` bare when it would lex back as one identifier, quoted otherwise.
fn write_literal(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    let mut chars = text.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '-'))
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if bare {
        return f.write_str(text);
    }

    f.write_str("'")?;
    for ch in text.chars() {
        if ch == '\'' || ch == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("'")
}
