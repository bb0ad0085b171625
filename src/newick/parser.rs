//! Stack-based parser for parenthesised tree notation.
//!
//! This module provides the [TreeNotationParser] struct, which turns a single
//! tree string such as `(node1,(node2,node3))root;` into a [TreeNode].

use crate::error::CactusError;
use crate::model::TreeNode;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;

// =#========================================================================#=
// TREE NOTATION PARSER
// =#========================================================================$=
/// Parser for tree notation of arbitrary degree.
///
/// Unlike a grammar-driven Newick reader, it works as a small state
/// machine over a stack of sibling lists:
/// * `(` opens a new (empty) sibling list,
/// * `,` finishes the current node into the innermost list,
/// * `)` finishes the current node and marks the next finished node as the
///   owner of the innermost list,
/// * `;` finishes the root and stops; anything after it is ignored,
/// * unquoted space and newline are skipped,
/// * a single-quoted section is appended to the name verbatim (`''` is an
///   escaped quote),
/// * every other byte is part of the current name.
///
/// Branch lengths and comments are not interpreted; `:` and `[` are plain
/// name characters.
///
/// # Example
/// ```
/// use cactusgraph::newick::TreeNotationParser;
/// use cactusgraph::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(NET1,CHAIN2)NET0;");
/// let tree = TreeNotationParser::new().parse(&mut byte_parser).unwrap();
/// assert_eq!(tree.name(), "NET0");
/// assert_eq!(tree.children().unwrap().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TreeNotationParser {
    /// Open sibling lists; the bottom one receives the root
    stack: Vec<Vec<TreeNode>>,
    /// Name bytes of the node currently being read
    name: Vec<u8>,
    /// Whether the node currently being read owns the innermost list
    has_children: bool,
}

impl TreeNotationParser {
    /// Creates a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single tree from the given [ByteParser], leaving it right
    /// after the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(TreeNode)` - The root of the parsed tree
    /// * `Err(CactusError)` - `UnterminatedTree` if no `;` is reached
    pub fn parse<B: ByteSource>(&mut self, parser: &mut ByteParser<B>) -> Result<TreeNode, CactusError> {
        self.reset();

        loop {
            let Some(byte) = parser.peek() else {
                return Err(CactusError::unterminated_tree(parser));
            };

            match byte {
                b'\'' => {
                    if !parser.read_quoted_into(&mut self.name) {
                        return Err(CactusError::unterminated_tree(parser));
                    }
                    continue;
                }
                b'(' => self.stack.push(Vec::new()),
                b')' => {
                    self.finish_node();
                    self.has_children = true;
                }
                b',' => self.finish_node(),
                b';' => {
                    self.finish_node();
                    parser.next_byte();
                    break;
                }
                b' ' | b'\n' => {}
                _ => self.name.push(byte),
            }
            parser.next_byte();
        }

        // The finished root is the last node of the outermost open list
        self.stack
            .pop()
            .and_then(|mut list| list.pop())
            .ok_or_else(|| CactusError::unterminated_tree(parser))
    }

    /// Clears state left over from a previous parse.
    fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(Vec::new());
        self.name.clear();
        self.has_children = false;
    }

    /// Finishes the current node and appends it to its parent list.
    fn finish_node(&mut self) {
        let name = String::from_utf8_lossy(&self.name).into_owned();
        self.name.clear();

        let node = if self.has_children {
            let children = self.stack.pop().unwrap_or_default();
            TreeNode::with_children(name, children)
        } else {
            TreeNode::leaf(name)
        };
        self.has_children = false;

        // Unbalanced `)` may have claimed the outermost list
        match self.stack.last_mut() {
            Some(list) => list.push(node),
            None => self.stack.push(vec![node]),
        }
    }
}
