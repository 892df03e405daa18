//! C# tree provider using tree-sitter.
//!
//! The concrete tree-sitter tree is converted into the generic
//! [`SyntaxNode`] form: named nodes are kept, comments are attached to the
//! following sibling as leading comments, `case` keywords inside switch
//! sections become `CaseSwitchLabel` nodes, and binary expressions are
//! discriminated by operator.

use std::sync::Arc;

use tree_sitter::{Language, Parser};

use crate::analysis::{
    Diagnostic, DiagnosticSeverity, Location, ParsedUnit, Span, SyntaxKind, SyntaxNode,
    SyntaxTree, TreeProvider,
};

/// Diagnostic id for an unexpected token sequence.
pub const UNEXPECTED_SYNTAX_ID: &str = "SC1001";
/// Diagnostic id for a token the parser had to insert.
pub const MISSING_TOKEN_ID: &str = "SC1002";

const SYNTAX_CATEGORY: &str = "Syntax";
const MAX_SNIPPET_CHARS: usize = 40;

pub struct CSharpTreeProvider {
    language: Language,
}

impl CSharpTreeProvider {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }
}

impl Default for CSharpTreeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeProvider for CSharpTreeProvider {
    fn language_id(&self) -> &'static str {
        "csharp"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["cs"]
    }

    fn parse(&self, source: &str, display_name: &str) -> anyhow::Result<ParsedUnit> {
        let mut parser = self.create_parser()?;
        let ts_tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse C# source: {}", display_name))?;

        let text: Arc<str> = Arc::from(source);
        let ts_root = ts_tree.root_node();
        let root = convert_node(ts_root, None, &text);

        let mut diagnostics = Vec::new();
        collect_syntax_diagnostics(ts_root, source, display_name, &mut diagnostics);

        Ok(ParsedUnit {
            tree: SyntaxTree::new(root, text, display_name),
            diagnostics,
        })
    }
}

fn classify(node: tree_sitter::Node) -> SyntaxKind {
    match node.kind() {
        "compilation_unit" => SyntaxKind::CompilationUnit,
        "namespace_declaration" | "file_scoped_namespace_declaration" => {
            SyntaxKind::NamespaceDeclaration
        }
        "class_declaration" => SyntaxKind::ClassDeclaration,
        "struct_declaration" => SyntaxKind::StructDeclaration,
        "interface_declaration" => SyntaxKind::InterfaceDeclaration,
        "record_declaration" | "record_struct_declaration" => SyntaxKind::RecordDeclaration,
        "enum_declaration" => SyntaxKind::EnumDeclaration,
        "declaration_list" => SyntaxKind::DeclarationList,
        "method_declaration" => SyntaxKind::MethodDeclaration,
        "constructor_declaration" => SyntaxKind::ConstructorDeclaration,
        "property_declaration" => SyntaxKind::PropertyDeclaration,
        "field_declaration" => SyntaxKind::FieldDeclaration,
        "modifier" => SyntaxKind::Modifier,
        "identifier" => SyntaxKind::Identifier,
        "block" => SyntaxKind::Block,
        "if_statement" => SyntaxKind::IfStatement,
        "while_statement" => SyntaxKind::WhileStatement,
        "do_statement" => SyntaxKind::DoStatement,
        "for_statement" => SyntaxKind::ForStatement,
        "foreach_statement" => SyntaxKind::ForEachStatement,
        "switch_statement" => SyntaxKind::SwitchStatement,
        "switch_section" => SyntaxKind::SwitchSection,
        "case_switch_label" | "case_pattern_switch_label" => SyntaxKind::CaseSwitchLabel,
        "try_statement" => SyntaxKind::TryStatement,
        "catch_clause" => SyntaxKind::CatchClause,
        "catch_declaration" => SyntaxKind::CatchDeclaration,
        "throw_statement" => SyntaxKind::ThrowStatement,
        "throw_expression" => SyntaxKind::ThrowExpression,
        "conditional_expression" => SyntaxKind::ConditionalExpression,
        "binary_expression" => classify_binary(node),
        "invocation_expression" => SyntaxKind::InvocationExpression,
        "member_access_expression" => SyntaxKind::MemberAccessExpression,
        "object_creation_expression" => SyntaxKind::ObjectCreationExpression,
        "await_expression" => SyntaxKind::AwaitExpression,
        "assignment_expression" => SyntaxKind::AssignmentExpression,
        "local_declaration_statement" => SyntaxKind::LocalDeclarationStatement,
        "variable_declaration" => SyntaxKind::VariableDeclaration,
        "variable_declarator" => SyntaxKind::VariableDeclarator,
        "string_literal" | "verbatim_string_literal" | "raw_string_literal" => {
            SyntaxKind::StringLiteral
        }
        "interpolated_string_expression" => SyntaxKind::InterpolatedString,
        "query_expression" => SyntaxKind::QueryExpression,
        "ERROR" => SyntaxKind::Error,
        _ => SyntaxKind::Other,
    }
}

fn classify_binary(node: tree_sitter::Node) -> SyntaxKind {
    let operator = node
        .child_by_field_name("operator")
        .map(|op| op.kind())
        .unwrap_or("");
    match operator {
        "&&" => SyntaxKind::LogicalAndExpression,
        "||" => SyntaxKind::LogicalOrExpression,
        "+" => SyntaxKind::AddExpression,
        "==" => SyntaxKind::EqualsExpression,
        "!=" => SyntaxKind::NotEqualsExpression,
        ">" => SyntaxKind::GreaterThanExpression,
        "<" => SyntaxKind::LessThanExpression,
        _ => SyntaxKind::BinaryExpression,
    }
}

fn convert_node(
    node: tree_sitter::Node,
    field: Option<&'static str>,
    source: &Arc<str>,
) -> SyntaxNode {
    let mut converted = SyntaxNode::new(
        classify(node),
        node.kind(),
        field,
        Span::from_node(node),
        source.clone(),
    );

    let mut pending_comments: Vec<String> = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            let child_field = cursor.field_name();

            if child.kind() == "comment" {
                pending_comments.push(slice(source, child).to_string());
            } else if child.is_named() {
                let mut next = convert_node(child, child_field, source);
                next.leading_comments = std::mem::take(&mut pending_comments);
                converted.children.push(next);
            } else if child.kind() == "case" && node.kind() == "switch_section" {
                converted.children.push(SyntaxNode::new(
                    SyntaxKind::CaseSwitchLabel,
                    "case",
                    child_field,
                    Span::from_node(child),
                    source.clone(),
                ));
            }

            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }

    converted
}

fn slice<'a>(source: &'a str, node: tree_sitter::Node) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn collect_syntax_diagnostics(
    node: tree_sitter::Node,
    source: &str,
    display_name: &str,
    out: &mut Vec<Diagnostic>,
) {
    if node.is_missing() {
        out.push(syntax_diagnostic(
            MISSING_TOKEN_ID,
            format!("'{}' expected", node.kind()),
            node,
            display_name,
        ));
        return;
    }

    if node.is_error() {
        out.push(syntax_diagnostic(
            UNEXPECTED_SYNTAX_ID,
            format!("unexpected syntax '{}'", snippet(slice(source, node))),
            node,
            display_name,
        ));
        return;
    }

    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_syntax_diagnostics(child, source, display_name, out);
    }
}

fn syntax_diagnostic(
    id: &str,
    message: String,
    node: tree_sitter::Node,
    display_name: &str,
) -> Diagnostic {
    let span = Span::from_node(node);
    Diagnostic {
        id: id.to_string(),
        severity: DiagnosticSeverity::Error,
        message,
        location: Some(Location {
            line: span.start_line,
            column: span.start_col,
            file: display_name.to_string(),
        }),
        category: SYNTAX_CATEGORY.to_string(),
    }
}

fn snippet(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let mut out: String = first_line.chars().take(MAX_SNIPPET_CHARS).collect();
    if first_line.chars().count() > MAX_SNIPPET_CHARS {
        out.push_str("...");
    }
    out
}
