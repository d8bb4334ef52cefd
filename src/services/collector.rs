//! Declaration Collector
//!
//! Walks C# syntax trees and records every type and member declaration as a
//! [`DeclarationPiece`] of its symbol. Partial types and partial methods
//! collapse into one symbol with several pieces.

use tree_sitter::Node;

use super::index::SymbolIndexBuilder;
use crate::infra::syntax::node_types::{
    self, ARROW_EXPRESSION_CLAUSE, BLOCK, CONSTRUCTOR_DECLARATION, CONVERSION_OPERATOR_DECLARATION,
    ENUM_MEMBER_DECLARATION, EVENT_FIELD_DECLARATION, EXPLICIT_INTERFACE_SPECIFIER,
    FIELD_DECLARATION, FILE_SCOPED_NAMESPACE_DECLARATION, IDENTIFIER, INDEXER_DECLARATION,
    NAMESPACE_DECLARATION, OPERATOR_DECLARATION, PARAMETER, TYPE_PARAMETER,
    TYPE_PARAMETER_LIST, VARIABLE_DECLARATION, VARIABLE_DECLARATOR,
};
use crate::infra::syntax::source::{child_of_kind, field_or_kind, has_modifier};
use crate::infra::syntax::{SourceFile, normalize_type_text};
use crate::models::{
    DeclarationPiece, DeclarationRole, Parameter, SourcePosition, Symbol, SymbolId, SymbolKind,
};

/// Lexical scope while walking: the enclosing namespace or type
#[derive(Debug, Clone, Default)]
struct Scope {
    namespace: Option<String>,
    container: Option<SymbolId>,
}

impl Scope {
    fn enter_namespace(&self, name: &str) -> Self {
        let namespace = match &self.namespace {
            Some(outer) => format!("{outer}.{name}"),
            None => name.to_string(),
        };
        Self {
            namespace: Some(namespace),
            container: None,
        }
    }

    fn enter_type(id: SymbolId) -> Self {
        Self {
            namespace: None,
            container: Some(id),
        }
    }
}

pub(crate) struct DeclarationCollector<'a> {
    file: &'a SourceFile,
    builder: &'a mut SymbolIndexBuilder,
}

impl<'a> DeclarationCollector<'a> {
    pub(crate) fn new(file: &'a SourceFile, builder: &'a mut SymbolIndexBuilder) -> Self {
        Self { file, builder }
    }

    pub(crate) fn collect(mut self) {
        let root = self.file.tree().root_node();
        self.walk_declarations(root, &Scope::default());
    }

    fn walk_declarations(&mut self, parent: Node<'_>, scope: &Scope) {
        let mut cursor = parent.walk();
        let children: Vec<Node<'_>> = parent.named_children(&mut cursor).collect();

        // A file-scoped namespace applies to the declarations after it.
        let mut scope = scope.clone();
        for child in children {
            match child.kind() {
                NAMESPACE_DECLARATION => {
                    let inner = scope.enter_namespace(&self.name_of(child));
                    if let Some(body) = child.child_by_field_name("body") {
                        self.walk_declarations(body, &inner);
                    }
                }
                FILE_SCOPED_NAMESPACE_DECLARATION => {
                    scope = scope.enter_namespace(&self.name_of(child));
                    self.walk_declarations(child, &scope);
                }
                kind => {
                    if let Some(symbol_kind) = node_types::type_kind(kind) {
                        self.visit_type(child, symbol_kind, &scope);
                    } else if let (Some(symbol_kind), Some(container)) =
                        (node_types::member_kind(kind), scope.container)
                    {
                        self.visit_member(child, symbol_kind, container);
                    }
                }
            }
        }
    }

    fn visit_type(&mut self, node: Node<'_>, kind: SymbolKind, scope: &Scope) {
        let is_partial = has_modifier(node, self.file.text(), "partial");
        let mut symbol = Symbol::new(self.name_of(node), kind)
            .with_container(scope.container)
            .with_namespace(scope.namespace.clone())
            .with_type_parameters(self.type_parameters(node))
            .partial(is_partial);
        if kind == SymbolKind::Delegate {
            symbol = symbol.with_parameters(self.parameters(node));
        }

        let role = if is_partial {
            DeclarationRole::Part
        } else {
            DeclarationRole::Whole
        };
        let Some(id) = self.builder.add(symbol, self.piece(node, role)) else {
            return;
        };

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        if kind == SymbolKind::Enum {
            self.visit_enum_members(body, id);
        } else {
            self.walk_declarations(body, &Scope::enter_type(id));
        }
    }

    fn visit_enum_members(&mut self, body: Node<'_>, container: SymbolId) {
        let mut cursor = body.walk();
        let members: Vec<Node<'_>> = body
            .named_children(&mut cursor)
            .filter(|n| n.kind() == ENUM_MEMBER_DECLARATION)
            .collect();
        for member in members {
            let symbol = Symbol::new(self.name_of(member), SymbolKind::EnumMember)
                .with_container(Some(container));
            self.builder
                .add(symbol, self.piece(member, DeclarationRole::Whole));
        }
    }

    fn visit_member(&mut self, node: Node<'_>, kind: SymbolKind, container: SymbolId) {
        match node.kind() {
            FIELD_DECLARATION | EVENT_FIELD_DECLARATION => {
                // One symbol per declarator, all sharing the declaration's comment.
                for name in self.declarator_names(node) {
                    let symbol = Symbol::new(name, kind).with_container(Some(container));
                    self.builder
                        .add(symbol, self.piece(node, DeclarationRole::Whole));
                }
            }
            _ => {
                let symbol = self.member_symbol(node, kind, container);
                let role = if symbol.is_partial_method() {
                    if has_body(node) {
                        DeclarationRole::Implementing
                    } else {
                        DeclarationRole::Defining
                    }
                } else {
                    DeclarationRole::Whole
                };
                self.builder.add(symbol, self.piece(node, role));
            }
        }
    }

    fn member_symbol(&self, node: Node<'_>, kind: SymbolKind, container: SymbolId) -> Symbol {
        let source = self.file.text();
        let (kind, name) = match node.kind() {
            CONSTRUCTOR_DECLARATION if has_modifier(node, source, "static") => {
                (SymbolKind::StaticConstructor, self.name_of(node))
            }
            OPERATOR_DECLARATION => (kind, self.operator_token(node)),
            CONVERSION_OPERATOR_DECLARATION => {
                let head = self.file.node_text(node).split("operator").next();
                let direction = if has_modifier(node, source, "explicit")
                    || head.is_some_and(|h| h.split_whitespace().any(|w| w == "explicit"))
                {
                    "explicit"
                } else {
                    "implicit"
                };
                (kind, direction.to_string())
            }
            INDEXER_DECLARATION => (kind, "this".to_string()),
            _ => (kind, self.member_name(node)),
        };

        let return_type = (kind == SymbolKind::Conversion)
            .then(|| node.child_by_field_name("type"))
            .flatten()
            .map(|t| normalize_type_text(self.file.node_text(t)));

        let is_partial = kind == SymbolKind::Method && has_modifier(node, source, "partial");

        Symbol::new(name, kind)
            .with_container(Some(container))
            .with_type_parameters(self.type_parameters(node))
            .with_parameters(self.parameters(node))
            .with_return_type(return_type)
            .partial(is_partial)
    }

    /// Member name, prefixed with `Interface#` for explicit implementations
    fn member_name(&self, node: Node<'_>) -> String {
        let name = self.name_of(node);
        match child_of_kind(node, EXPLICIT_INTERFACE_SPECIFIER) {
            Some(specifier) => {
                let interface = normalize_type_text(self.file.node_text(specifier));
                let interface = interface.trim_end_matches('.').replace('.', "#");
                format!("{interface}#{name}")
            }
            None => name,
        }
    }

    fn operator_token(&self, node: Node<'_>) -> String {
        if let Some(op) = node.child_by_field_name("operator") {
            return self.file.node_text(op).to_string();
        }
        // Token following the `operator` keyword, skipping `checked`.
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        children
            .iter()
            .position(|c| c.kind() == "operator")
            .and_then(|i| children[i + 1..].iter().find(|c| c.kind() != "checked"))
            .map(|c| self.file.node_text(*c).to_string())
            .unwrap_or_default()
    }

    fn name_of(&self, node: Node<'_>) -> String {
        field_or_kind(node, "name", IDENTIFIER)
            .map(|n| normalize_type_text(self.file.node_text(n)))
            .unwrap_or_default()
    }

    fn type_parameters(&self, node: Node<'_>) -> Vec<String> {
        let Some(list) = field_or_kind(node, "type_parameters", TYPE_PARAMETER_LIST) else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        list.named_children(&mut cursor)
            .filter(|n| n.kind() == TYPE_PARAMETER)
            .map(|n| self.name_of(n))
            .collect()
    }

    fn parameters(&self, node: Node<'_>) -> Vec<Parameter> {
        let Some(list) = node.child_by_field_name("parameters") else {
            return Vec::new();
        };
        let mut cursor = list.walk();
        let params: Vec<Node<'_>> = list
            .named_children(&mut cursor)
            .filter(|n| n.kind() == PARAMETER)
            .collect();

        params
            .into_iter()
            .map(|param| {
                let Some(ty) = param.child_by_field_name("type") else {
                    return Parameter::new(String::new(), false);
                };
                let modifiers = self
                    .file
                    .text()
                    .get(param.start_byte()..ty.start_byte())
                    .unwrap_or_default();
                let mut by_ref = modifiers
                    .split_whitespace()
                    .any(|word| matches!(word, "ref" | "out" | "in"));
                let mut type_name = normalize_type_text(self.file.node_text(ty));
                for keyword in ["ref ", "out ", "in "] {
                    if let Some(rest) = type_name.strip_prefix(keyword) {
                        type_name = rest.to_string();
                        by_ref = true;
                    }
                }
                Parameter::new(type_name, by_ref)
            })
            .collect()
    }

    fn declarator_names(&self, node: Node<'_>) -> Vec<String> {
        let Some(declaration) = child_of_kind(node, VARIABLE_DECLARATION) else {
            return Vec::new();
        };
        let mut cursor = declaration.walk();
        let declarators: Vec<Node<'_>> = declaration
            .named_children(&mut cursor)
            .filter(|n| n.kind() == VARIABLE_DECLARATOR)
            .collect();
        declarators.into_iter().map(|d| self.name_of(d)).collect()
    }

    fn piece(&self, node: Node<'_>, role: DeclarationRole) -> DeclarationPiece {
        let start = node.start_position();
        DeclarationPiece {
            position: SourcePosition {
                file: self.file.id(),
                offset: node.start_byte(),
                line: start.row,
                column: start.column,
            },
            end_offset: node.end_byte(),
            node_kind: node.kind(),
            role,
        }
    }
}

fn has_body(node: Node<'_>) -> bool {
    node.child_by_field_name("body").is_some()
        || child_of_kind(node, BLOCK).is_some()
        || child_of_kind(node, ARROW_EXPRESSION_CLAUSE).is_some()
}
