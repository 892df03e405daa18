//! Generic, read-only syntax tree handed from a tree provider to the engine.

use std::fmt;
use std::sync::Arc;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }

    /// Number of source lines the span touches.
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Node discriminator understood by metrics and rules.
///
/// Grammar kinds without a dedicated variant map to `Other`; the original
/// grammar kind is still available through [`SyntaxNode::grammar_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    NamespaceDeclaration,
    ClassDeclaration,
    StructDeclaration,
    InterfaceDeclaration,
    RecordDeclaration,
    EnumDeclaration,
    DeclarationList,
    MethodDeclaration,
    ConstructorDeclaration,
    PropertyDeclaration,
    FieldDeclaration,
    Modifier,
    Identifier,
    Block,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForEachStatement,
    SwitchStatement,
    SwitchSection,
    CaseSwitchLabel,
    TryStatement,
    CatchClause,
    CatchDeclaration,
    ThrowStatement,
    ThrowExpression,
    ConditionalExpression,
    LogicalAndExpression,
    LogicalOrExpression,
    AddExpression,
    EqualsExpression,
    NotEqualsExpression,
    GreaterThanExpression,
    LessThanExpression,
    BinaryExpression,
    InvocationExpression,
    MemberAccessExpression,
    ObjectCreationExpression,
    AwaitExpression,
    AssignmentExpression,
    LocalDeclarationStatement,
    VariableDeclaration,
    VariableDeclarator,
    StringLiteral,
    InterpolatedString,
    QueryExpression,
    Error,
    Other,
}

impl SyntaxKind {
    /// Loop constructs.
    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            SyntaxKind::ForStatement
                | SyntaxKind::ForEachStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::DoStatement
        )
    }
}

/// A node of the generic syntax tree.
///
/// Nodes share the unit's source text, so `text()` is a slice of it rather
/// than a copy.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    /// Kind name as reported by the grammar (e.g. `"method_declaration"`).
    pub grammar_kind: &'static str,
    /// Grammar field this node occupies in its parent (e.g. `"name"`).
    pub field: Option<&'static str>,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
    /// Comments immediately preceding this node, in source order.
    pub leading_comments: Vec<String>,
    source: Arc<str>,
}

impl SyntaxNode {
    pub fn new(
        kind: SyntaxKind,
        grammar_kind: &'static str,
        field: Option<&'static str>,
        span: Span,
        source: Arc<str>,
    ) -> Self {
        Self {
            kind,
            grammar_kind,
            field,
            span,
            children: Vec::new(),
            leading_comments: Vec::new(),
            source,
        }
    }

    /// Verbatim source text of this node.
    pub fn text(&self) -> &str {
        self.source
            .get(self.span.start_byte..self.span.end_byte)
            .unwrap_or("")
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Descendants (including self) with the given kind, in document order.
    pub fn descendants_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> {
        self.descendants().filter(move |n| n.kind == kind)
    }

    /// First direct child occupying the given grammar field.
    pub fn field(&self, name: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.field == Some(name))
    }

    /// First direct child of the given kind.
    pub fn child_of_kind(&self, kind: SyntaxKind) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Left operand of a binary or assignment expression.
    pub fn left(&self) -> Option<&SyntaxNode> {
        self.field("left").or_else(|| self.children.first())
    }

    /// Right operand of a binary or assignment expression.
    pub fn right(&self) -> Option<&SyntaxNode> {
        self.field("right").or_else(|| self.children.last())
    }

    /// Declared name of a declaration node.
    pub fn name(&self) -> Option<&str> {
        self.field("name")
            .or_else(|| self.child_of_kind(SyntaxKind::Identifier))
            .map(SyntaxNode::text)
    }

    /// Whether a modifier keyword (e.g. `public`, `async`) is present.
    pub fn has_modifier(&self, keyword: &str) -> bool {
        self.children
            .iter()
            .any(|c| c.kind == SyntaxKind::Modifier && c.text().trim() == keyword)
    }
}

/// Pre-order traversal over a subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A parsed source unit: root node plus the unit's full text.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: SyntaxNode,
    source: Arc<str>,
    display_name: String,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode, source: Arc<str>, display_name: impl Into<String>) -> Self {
        Self {
            root,
            source,
            display_name: display_name.into(),
        }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Full text of the unit, including leading and trailing trivia.
    pub fn full_text(&self) -> &str {
        &self.source
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Pre-order iterator over every node in the tree.
    pub fn descendants(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    /// Every node of the given kind, in document order.
    pub fn nodes_of_kind(&self, kind: SyntaxKind) -> impl Iterator<Item = &SyntaxNode> {
        self.root.descendants_of_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: usize, end: usize) -> Span {
        Span {
            start_byte: start,
            end_byte: end,
            start_line: 1,
            start_col: start + 1,
            end_line: 1,
            end_col: end + 1,
        }
    }

    fn sample() -> SyntaxNode {
        let source: Arc<str> = Arc::from("a && b");
        let mut root = SyntaxNode::new(
            SyntaxKind::LogicalAndExpression,
            "binary_expression",
            None,
            span(0, 6),
            source.clone(),
        );
        root.children.push(SyntaxNode::new(
            SyntaxKind::Identifier,
            "identifier",
            Some("left"),
            span(0, 1),
            source.clone(),
        ));
        root.children.push(SyntaxNode::new(
            SyntaxKind::Identifier,
            "identifier",
            Some("right"),
            span(5, 6),
            source,
        ));
        root
    }

    #[test]
    fn test_text_is_source_slice() {
        let node = sample();
        assert_eq!(node.text(), "a && b");
        assert_eq!(node.left().map(SyntaxNode::text), Some("a"));
        assert_eq!(node.right().map(SyntaxNode::text), Some("b"));
    }

    #[test]
    fn test_descendants_preorder() {
        let node = sample();
        let texts: Vec<_> = node.descendants().map(SyntaxNode::text).collect();
        assert_eq!(texts, vec!["a && b", "a", "b"]);
        assert_eq!(node.descendants_of_kind(SyntaxKind::Identifier).count(), 2);
    }

    #[test]
    fn test_span_line_count() {
        let s = Span {
            start_line: 3,
            end_line: 7,
            ..Span::default()
        };
        assert_eq!(s.line_count(), 5);
        assert_eq!(Span::default().line_count(), 1);
    }
}
