//! Documentation ID Formatter
//!
//! Produces the canonical documentation IDs used as `<member name="...">`
//! keys: `T:Ns.Foo`1`, `M:Ns.Foo`1.Bar``1(System.Int32,``0@)`.
//!
//! Parameter types are encoded lexically from the source text. Keyword types
//! map to their `System` names, the method's own type parameters become
//! ``` ``i ``` and the containing types' type parameters `` `i ``. Other
//! names are emitted as written, since no binding is performed.

use crate::error::ResolveError;
use crate::models::{Parameter, Symbol, SymbolId, SymbolKind};
use crate::services::index::SymbolIndex;

/// Format the documentation ID of a symbol
pub fn format_id(index: &SymbolIndex, id: SymbolId) -> Result<String, ResolveError> {
    let symbol = lookup(index, id)?;
    if symbol.kind.is_type() {
        return Ok(format!("T:{}", qualified_name(index, id)?));
    }

    let container = symbol
        .container
        .ok_or(ResolveError::UnknownSymbol(id.index()))?;
    let context = TypeContext {
        outer: outer_type_parameters(index, container)?,
        method: &symbol.type_parameters,
    };

    let mut out = format!(
        "{}{}.{}",
        symbol.kind.id_prefix(),
        qualified_name(index, container)?,
        member_name(symbol)
    );
    if symbol.kind == SymbolKind::Method && symbol.arity() > 0 {
        out.push_str(&format!("``{}", symbol.arity()));
    }
    if has_parameter_list(symbol.kind) && !symbol.parameters.is_empty() {
        out.push('(');
        out.push_str(&encode_parameters(&symbol.parameters, &context));
        out.push(')');
    }
    if let (SymbolKind::Conversion, Some(target)) = (symbol.kind, &symbol.return_type) {
        out.push('~');
        out.push_str(&encode_type(target, &context));
    }
    Ok(out)
}

/// Dotted name of a type including namespace, containing types and arity
/// markers, e.g. `Ns.Outer`1.Inner`
pub fn qualified_name(index: &SymbolIndex, id: SymbolId) -> Result<String, ResolveError> {
    let mut segments = Vec::new();
    let mut namespace = None;
    let mut current = Some(id);
    while let Some(type_id) = current {
        let symbol = lookup(index, type_id)?;
        segments.push(if symbol.arity() > 0 {
            format!("{}`{}", symbol.name, symbol.arity())
        } else {
            symbol.name.clone()
        });
        namespace = symbol.namespace.as_deref();
        current = symbol.container;
    }
    if let Some(ns) = namespace {
        segments.push(ns.to_string());
    }
    segments.reverse();
    Ok(segments.join("."))
}

fn lookup(index: &SymbolIndex, id: SymbolId) -> Result<&Symbol, ResolveError> {
    index
        .symbol(id)
        .ok_or(ResolveError::UnknownSymbol(id.index()))
}

/// Type parameters of a type and all its containing types, outermost first
fn outer_type_parameters(index: &SymbolIndex, id: SymbolId) -> Result<Vec<String>, ResolveError> {
    let mut chain = Vec::new();
    let mut current = Some(id);
    while let Some(type_id) = current {
        let symbol = lookup(index, type_id)?;
        chain.push(&symbol.type_parameters);
        current = symbol.container;
    }
    Ok(chain.into_iter().rev().flatten().cloned().collect())
}

fn has_parameter_list(kind: SymbolKind) -> bool {
    matches!(
        kind,
        SymbolKind::Method
            | SymbolKind::Constructor
            | SymbolKind::Operator
            | SymbolKind::Conversion
            | SymbolKind::Indexer
    )
}

fn member_name(symbol: &Symbol) -> String {
    match symbol.kind {
        SymbolKind::Constructor => "#ctor".to_string(),
        SymbolKind::StaticConstructor => "#cctor".to_string(),
        SymbolKind::Destructor => "Finalize".to_string(),
        SymbolKind::Indexer => "Item".to_string(),
        SymbolKind::Operator => operator_name(&symbol.name, symbol.parameters.len()).to_string(),
        SymbolKind::Conversion if symbol.name == "explicit" => "op_Explicit".to_string(),
        SymbolKind::Conversion => "op_Implicit".to_string(),
        _ => symbol
            .name
            .replace('<', "{")
            .replace('>', "}")
            .replace('.', "#"),
    }
}

/// Metadata name of an overloadable operator token
fn operator_name(token: &str, arity: usize) -> &str {
    let unary = arity == 1;
    match token {
        "+" if unary => "op_UnaryPlus",
        "-" if unary => "op_UnaryNegation",
        "+" => "op_Addition",
        "-" => "op_Subtraction",
        "*" => "op_Multiply",
        "/" => "op_Division",
        "%" => "op_Modulus",
        "&" => "op_BitwiseAnd",
        "|" => "op_BitwiseOr",
        "^" => "op_ExclusiveOr",
        "<<" => "op_LeftShift",
        ">>" => "op_RightShift",
        ">>>" => "op_UnsignedRightShift",
        "==" => "op_Equality",
        "!=" => "op_Inequality",
        "<" => "op_LessThan",
        ">" => "op_GreaterThan",
        "<=" => "op_LessThanOrEqual",
        ">=" => "op_GreaterThanOrEqual",
        "!" => "op_LogicalNot",
        "~" => "op_OnesComplement",
        "++" => "op_Increment",
        "--" => "op_Decrement",
        "true" => "op_True",
        "false" => "op_False",
        other => other,
    }
}

struct TypeContext<'a> {
    /// Containing types' type parameters, outermost first
    outer: Vec<String>,
    method: &'a [String],
}

/// Encoded parameter list of a member declared inside types with the given
/// type parameters. Two spellings of the same signature (`int` and
/// `System.Int32`) encode identically.
pub(crate) fn parameter_signature(
    parameters: &[Parameter],
    outer: Vec<String>,
    method: &[String],
) -> String {
    encode_parameters(parameters, &TypeContext { outer, method })
}

fn encode_parameters(parameters: &[Parameter], context: &TypeContext<'_>) -> String {
    parameters
        .iter()
        .map(|p| {
            let mut encoded = encode_type(&p.type_name, context);
            if p.by_ref {
                encoded.push('@');
            }
            encoded
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn encode_type(text: &str, context: &TypeContext<'_>) -> String {
    match TypeParser::new(text).parse_complete() {
        Some(ty) => ty.encode(context),
        None => {
            tracing::debug!("Unparsed parameter type '{}', emitting as written", text);
            text.replace('<', "{").replace('>', "}").replace(' ', "")
        }
    }
}

/// Type reference as written in source
#[derive(Debug, Clone, PartialEq)]
enum TypeRef {
    Named(Vec<Segment>),
    Nullable(Box<TypeRef>),
    Array(Box<TypeRef>, usize),
    Pointer(Box<TypeRef>),
    Tuple(Vec<TypeRef>),
}

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    name: String,
    arguments: Vec<TypeRef>,
}

impl TypeRef {
    fn encode(&self, context: &TypeContext<'_>) -> String {
        match self {
            Self::Named(segments) => encode_named(segments, context),
            Self::Nullable(inner) if inner.is_keyword_value_type() => {
                format!("System.Nullable{{{}}}", inner.encode(context))
            }
            // Nullable reference annotation, not part of the signature.
            Self::Nullable(inner) => inner.encode(context),
            Self::Array(element, 1) => format!("{}[]", element.encode(context)),
            Self::Array(element, rank) => {
                format!("{}[{}]", element.encode(context), vec!["0:"; *rank].join(","))
            }
            Self::Pointer(inner) => format!("{}*", inner.encode(context)),
            Self::Tuple(elements) => format!(
                "System.ValueTuple{{{}}}",
                elements
                    .iter()
                    .map(|e| e.encode(context))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }

    fn is_keyword_value_type(&self) -> bool {
        match self {
            Self::Named(segments) => match segments.as_slice() {
                [single] if single.arguments.is_empty() => {
                    keyword_type(&single.name).is_some_and(|(_, is_value)| is_value)
                }
                _ => false,
            },
            _ => false,
        }
    }
}

fn encode_named(segments: &[Segment], context: &TypeContext<'_>) -> String {
    if let [single] = segments
        && single.arguments.is_empty()
    {
        if let Some((system, _)) = keyword_type(&single.name) {
            return system.to_string();
        }
        if let Some(i) = context.method.iter().position(|p| *p == single.name) {
            return format!("``{i}");
        }
        if let Some(i) = context.outer.iter().rposition(|p| *p == single.name) {
            return format!("`{i}");
        }
    }

    segments
        .iter()
        .map(|segment| {
            if segment.arguments.is_empty() {
                segment.name.clone()
            } else {
                let args: Vec<String> = segment.arguments.iter().map(|a| a.encode(context)).collect();
                format!("{}{{{}}}", segment.name, args.join(","))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// `System` name of a C# keyword type and whether it is a value type
fn keyword_type(name: &str) -> Option<(&'static str, bool)> {
    let mapped = match name {
        "bool" => ("System.Boolean", true),
        "byte" => ("System.Byte", true),
        "sbyte" => ("System.SByte", true),
        "char" => ("System.Char", true),
        "short" => ("System.Int16", true),
        "ushort" => ("System.UInt16", true),
        "int" => ("System.Int32", true),
        "uint" => ("System.UInt32", true),
        "long" => ("System.Int64", true),
        "ulong" => ("System.UInt64", true),
        "float" => ("System.Single", true),
        "double" => ("System.Double", true),
        "decimal" => ("System.Decimal", true),
        "nint" => ("System.IntPtr", true),
        "nuint" => ("System.UIntPtr", true),
        "string" => ("System.String", false),
        "object" | "dynamic" => ("System.Object", false),
        "void" => ("System.Void", false),
        _ => return None,
    };
    Some(mapped)
}

/// Recursive descent over normalized type text
struct TypeParser {
    chars: Vec<char>,
    pos: usize,
}

impl TypeParser {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn parse_complete(mut self) -> Option<TypeRef> {
        let ty = self.parse_type()?;
        self.skip_whitespace();
        (self.pos == self.chars.len()).then_some(ty)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse_type(&mut self) -> Option<TypeRef> {
        self.skip_whitespace();
        let mut ty = if self.peek() == Some('(') {
            self.parse_tuple()?
        } else {
            TypeRef::Named(self.parse_segments()?)
        };

        loop {
            if self.eat('?') {
                ty = TypeRef::Nullable(Box::new(ty));
            } else if self.eat('*') {
                ty = TypeRef::Pointer(Box::new(ty));
            } else if self.eat('[') {
                let mut rank = 1;
                while self.eat(',') {
                    rank += 1;
                }
                if !self.eat(']') {
                    return None;
                }
                ty = TypeRef::Array(Box::new(ty), rank);
            } else {
                return Some(ty);
            }
        }
    }

    fn parse_tuple(&mut self) -> Option<TypeRef> {
        self.eat('(');
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_type()?);
            // Optional element name.
            self.skip_whitespace();
            if self.peek().is_some_and(is_identifier_char) {
                self.parse_identifier()?;
            }
            if self.eat(')') {
                return Some(TypeRef::Tuple(elements));
            }
            if !self.eat(',') {
                return None;
            }
        }
    }

    fn parse_segments(&mut self) -> Option<Vec<Segment>> {
        let mut segments = Vec::new();
        loop {
            let mut name = self.parse_identifier()?;
            // `global::System.Int32` and `alias::Name`
            if self.eat(':') {
                if !self.eat(':') {
                    return None;
                }
                if name == "global" {
                    name = self.parse_identifier()?;
                } else {
                    let rest = self.parse_identifier()?;
                    name = format!("{name}.{rest}");
                }
            }

            let mut arguments = Vec::new();
            if self.eat('<') {
                loop {
                    arguments.push(self.parse_type()?);
                    if self.eat('>') {
                        break;
                    }
                    if !self.eat(',') {
                        return None;
                    }
                }
            }
            segments.push(Segment { name, arguments });

            if !self.eat('.') {
                return Some(segments);
            }
        }
    }

    fn parse_identifier(&mut self) -> Option<String> {
        self.skip_whitespace();
        self.eat('@');
        let start = self.pos;
        while self.peek().is_some_and(is_identifier_char) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.chars[start..self.pos].iter().collect())
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
