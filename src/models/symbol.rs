//! Symbol model definitions
//!
//! Types and members declared in C# sources. Symbols are owned by a
//! [`SymbolIndex`](crate::services::index::SymbolIndex); callers refer to them
//! through [`SymbolId`] handles.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Handle to a symbol in a symbol index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a declared symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    // === Types ===
    Class,
    Struct,
    Interface,
    Record,
    Enum,
    Delegate,

    // === Members ===
    Method,
    Constructor,
    StaticConstructor,
    Destructor,
    Operator,
    Conversion,
    Property,
    Indexer,
    Field,
    Event,
    EnumMember,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            Self::Class
                | Self::Struct
                | Self::Interface
                | Self::Record
                | Self::Enum
                | Self::Delegate
        )
    }

    /// Documentation ID prefix, including the colon
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Class
            | Self::Struct
            | Self::Interface
            | Self::Record
            | Self::Enum
            | Self::Delegate => "T:",
            Self::Method
            | Self::Constructor
            | Self::StaticConstructor
            | Self::Destructor
            | Self::Operator
            | Self::Conversion => "M:",
            Self::Property | Self::Indexer => "P:",
            Self::Field | Self::EnumMember => "F:",
            Self::Event => "E:",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Record => "record",
            Self::Enum => "enum",
            Self::Delegate => "delegate",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::StaticConstructor => "static_constructor",
            Self::Destructor => "destructor",
            Self::Operator => "operator",
            Self::Conversion => "conversion",
            Self::Property => "property",
            Self::Indexer => "indexer",
            Self::Field => "field",
            Self::Event => "event",
            Self::EnumMember => "enum_member",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter as written in source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Type text with whitespace normalized
    pub type_name: String,
    /// Declared with `ref`, `out` or `in`
    pub by_ref: bool,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>, by_ref: bool) -> Self {
        Self {
            type_name: type_name.into(),
            by_ref,
        }
    }
}

/// A declared type or member
#[derive(Debug, Clone)]
pub struct Symbol {
    /// Source name. Constructors carry the type name, operators their token,
    /// conversions `implicit`/`explicit`, indexers `this`.
    pub name: String,
    pub kind: SymbolKind,
    /// Containing type, `None` for top-level types
    pub container: Option<SymbolId>,
    /// Enclosing namespace of a top-level type
    pub namespace: Option<String>,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    /// Target type of a conversion operator
    pub return_type: Option<String>,
    pub is_partial: bool,
    pub(crate) pieces: Range<usize>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            container: None,
            namespace: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            is_partial: false,
            pieces: 0..0,
        }
    }

    pub fn with_container(mut self, container: Option<SymbolId>) -> Self {
        self.container = container;
        self
    }

    pub fn with_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_type_parameters(mut self, type_parameters: Vec<String>) -> Self {
        self.type_parameters = type_parameters;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_return_type(mut self, return_type: Option<String>) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn partial(mut self, is_partial: bool) -> Self {
        self.is_partial = is_partial;
        self
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    pub fn is_partial_method(&self) -> bool {
        self.kind == SymbolKind::Method && self.is_partial
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }
}
