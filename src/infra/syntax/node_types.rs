//! Tree-sitter C# node types
//!
//! Verified against tree-sitter-c-sharp `src/node-types.json`. Only the
//! declaration-level nodes the collector walks are listed.

use crate::models::SymbolKind;

pub const COMMENT: &str = "comment";
pub const MODIFIER: &str = "modifier";
pub const IDENTIFIER: &str = "identifier";
pub const BLOCK: &str = "block";
pub const ARROW_EXPRESSION_CLAUSE: &str = "arrow_expression_clause";
pub const TYPE_PARAMETER_LIST: &str = "type_parameter_list";
pub const TYPE_PARAMETER: &str = "type_parameter";
pub const PARAMETER: &str = "parameter";
pub const VARIABLE_DECLARATION: &str = "variable_declaration";
pub const VARIABLE_DECLARATOR: &str = "variable_declarator";
pub const EXPLICIT_INTERFACE_SPECIFIER: &str = "explicit_interface_specifier";

pub const NAMESPACE_DECLARATION: &str = "namespace_declaration";
pub const FILE_SCOPED_NAMESPACE_DECLARATION: &str = "file_scoped_namespace_declaration";
pub const ENUM_DECLARATION: &str = "enum_declaration";
pub const ENUM_MEMBER_DECLARATION: &str = "enum_member_declaration";

pub const METHOD_DECLARATION: &str = "method_declaration";
pub const CONSTRUCTOR_DECLARATION: &str = "constructor_declaration";
pub const DESTRUCTOR_DECLARATION: &str = "destructor_declaration";
pub const OPERATOR_DECLARATION: &str = "operator_declaration";
pub const CONVERSION_OPERATOR_DECLARATION: &str = "conversion_operator_declaration";
pub const PROPERTY_DECLARATION: &str = "property_declaration";
pub const INDEXER_DECLARATION: &str = "indexer_declaration";
pub const EVENT_DECLARATION: &str = "event_declaration";
pub const EVENT_FIELD_DECLARATION: &str = "event_field_declaration";
pub const FIELD_DECLARATION: &str = "field_declaration";

/// Node type mapping entry
#[derive(Debug, Clone, Copy)]
pub struct NodeType {
    /// Actual tree-sitter node type
    pub node_type: &'static str,
    /// Symbol kind the declaration introduces
    pub kind: SymbolKind,
    /// Example syntax
    pub example: &'static str,
}

impl NodeType {
    const fn new(node_type: &'static str, kind: SymbolKind, example: &'static str) -> Self {
        Self {
            node_type,
            kind,
            example,
        }
    }
}

const TYPE_DECLARATIONS: &[NodeType] = &[
    NodeType::new("class_declaration", SymbolKind::Class, "class MyClass {}"),
    NodeType::new("struct_declaration", SymbolKind::Struct, "struct S {}"),
    NodeType::new("interface_declaration", SymbolKind::Interface, "interface I {}"),
    NodeType::new("record_declaration", SymbolKind::Record, "record R(int X);"),
    NodeType::new("record_struct_declaration", SymbolKind::Record, "record struct R;"),
    NodeType::new(ENUM_DECLARATION, SymbolKind::Enum, "enum E {}"),
    NodeType::new("delegate_declaration", SymbolKind::Delegate, "delegate void D();"),
];

const MEMBER_DECLARATIONS: &[NodeType] = &[
    NodeType::new(METHOD_DECLARATION, SymbolKind::Method, "void Method() {}"),
    NodeType::new(CONSTRUCTOR_DECLARATION, SymbolKind::Constructor, "MyClass() {}"),
    NodeType::new(DESTRUCTOR_DECLARATION, SymbolKind::Destructor, "~MyClass() {}"),
    NodeType::new(OPERATOR_DECLARATION, SymbolKind::Operator, "operator +(A a, A b)"),
    NodeType::new(
        CONVERSION_OPERATOR_DECLARATION,
        SymbolKind::Conversion,
        "implicit operator int(A a)",
    ),
    NodeType::new(PROPERTY_DECLARATION, SymbolKind::Property, "int P { get; }"),
    NodeType::new(INDEXER_DECLARATION, SymbolKind::Indexer, "int this[int i] { get; }"),
    NodeType::new(EVENT_DECLARATION, SymbolKind::Event, "event E X { add; remove; }"),
    NodeType::new(EVENT_FIELD_DECLARATION, SymbolKind::Event, "event EventHandler X;"),
    NodeType::new(FIELD_DECLARATION, SymbolKind::Field, "int x;"),
];

/// Symbol kind of a type declaration node
pub fn type_kind(node_type: &str) -> Option<SymbolKind> {
    TYPE_DECLARATIONS
        .iter()
        .find(|n| n.node_type == node_type)
        .map(|n| n.kind)
}

/// Symbol kind of a member declaration node
pub fn member_kind(node_type: &str) -> Option<SymbolKind> {
    MEMBER_DECLARATIONS
        .iter()
        .find(|n| n.node_type == node_type)
        .map(|n| n.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_kinds() {
        assert_eq!(type_kind("class_declaration"), Some(SymbolKind::Class));
        assert_eq!(type_kind("delegate_declaration"), Some(SymbolKind::Delegate));
        assert_eq!(type_kind(METHOD_DECLARATION), None);
    }

    #[test]
    fn test_member_kinds() {
        assert_eq!(member_kind(METHOD_DECLARATION), Some(SymbolKind::Method));
        assert_eq!(member_kind(EVENT_FIELD_DECLARATION), Some(SymbolKind::Event));
        assert_eq!(member_kind("class_declaration"), None);
    }

    #[test]
    fn test_node_types_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for node in TYPE_DECLARATIONS.iter().chain(MEMBER_DECLARATIONS) {
            assert!(seen.insert(node.node_type), "duplicate {}", node.node_type);
        }
    }
}
