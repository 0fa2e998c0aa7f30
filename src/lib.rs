pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod selector;
pub mod tree;

pub use ast::{MultiSelector, SegmentKind, SelectorExpression, Token};
pub use evaluator::{Cursor, EvalContext, Evaluator};
pub use lexer::{LexError, Lexer};
pub use output::render_tree;
pub use parser::{ParseError, Parser};
pub use selector::{SelectError, TreeSelector};
pub use tree::{Node, NodeId, Tree};
