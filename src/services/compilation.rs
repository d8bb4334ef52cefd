//! Compilation snapshot
//!
//! A set of parsed source files plus the symbol index built from them. The
//! snapshot is immutable once built and can be queried from many threads.

use std::path::PathBuf;

use super::collector::DeclarationCollector;
use super::doc_id;
use super::index::{SymbolIndex, SymbolIndexBuilder};
use super::resolver::DocumentationResolver;
use crate::error::{ResolveError, SyntaxError};
use crate::infra::syntax::{SourceFile, create_parser};
use crate::models::{FileId, Symbol, SymbolId};

/// One input file
#[derive(Debug, Clone)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct Compilation {
    files: Vec<SourceFile>,
    index: SymbolIndex,
}

impl Compilation {
    /// Parse sources and index their declarations. File ordinals follow the
    /// order of `sources`.
    pub fn parse(sources: impl IntoIterator<Item = SourceText>) -> Result<Self, SyntaxError> {
        let mut parser = create_parser()?;
        let mut files = Vec::new();
        for (i, source) in sources.into_iter().enumerate() {
            let id = FileId(i as u32);
            files.push(SourceFile::parse(&mut parser, id, source.path, source.text)?);
        }

        let mut builder = SymbolIndexBuilder::new();
        for file in &files {
            tracing::debug!("Collecting declarations from {}", file.path().display());
            DeclarationCollector::new(file, &mut builder).collect();
        }

        Ok(Self {
            files,
            index: builder.build(),
        })
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.index.symbol(id)
    }

    /// Find a type by dotted name. Arity markers are optional:
    /// `Ns.Box` and ``Ns.Box`1`` both match a generic `Box<T>`.
    pub fn find_type(&self, qualified: &str) -> Option<SymbolId> {
        self.index
            .iter()
            .filter(|(_, symbol)| symbol.kind.is_type())
            .find(|(id, _)| {
                doc_id::qualified_name(&self.index, *id)
                    .is_ok_and(|name| name == qualified || strip_arity(&name) == qualified)
            })
            .map(|(id, _)| id)
    }

    /// Members of a type with the given source name, in declaration order
    pub fn members(&self, ty: SymbolId, name: &str) -> Vec<SymbolId> {
        self.index
            .members_of(ty)
            .filter(|(_, symbol)| symbol.name == name)
            .map(|(id, _)| id)
            .collect()
    }

    /// Find a symbol by its documentation ID, e.g. `M:Foo.Bar(System.Int32)`
    pub fn find_by_doc_id(&self, id: &str) -> Option<SymbolId> {
        self.index
            .iter()
            .map(|(symbol_id, _)| symbol_id)
            .find(|symbol_id| doc_id::format_id(&self.index, *symbol_id).is_ok_and(|s| s == id))
    }

    pub fn doc_id(&self, id: SymbolId) -> Result<String, ResolveError> {
        doc_id::format_id(&self.index, id)
    }

    /// Documentation XML of a symbol with default resolver options
    pub fn documentation_xml(&self, id: SymbolId) -> Result<String, ResolveError> {
        DocumentationResolver::new(self).documentation_xml(id)
    }
}

fn strip_arity(name: &str) -> String {
    name.split('.')
        .map(|segment| segment.split('`').next().unwrap_or(segment))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymbolKind;

    fn compile(sources: &[(&str, &str)]) -> Compilation {
        Compilation::parse(
            sources
                .iter()
                .map(|(path, text)| SourceText::new(*path, *text)),
        )
        .unwrap()
    }

    #[test]
    fn test_compilation_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Compilation>();
    }

    #[test]
    fn test_find_type() {
        let compilation = compile(&[(
            "a.cs",
            "namespace Acme { class Box<T> { class Lid { } } }",
        )]);

        let boxed = compilation.find_type("Acme.Box").unwrap();
        assert_eq!(compilation.find_type("Acme.Box`1"), Some(boxed));
        let lid = compilation.find_type("Acme.Box.Lid").unwrap();
        assert_eq!(compilation.symbol(lid).unwrap().container, Some(boxed));
        assert!(compilation.find_type("Box").is_none());
    }

    #[test]
    fn test_members_by_name() {
        let compilation = compile(&[(
            "a.cs",
            "class Foo { void Run() { } void Run(int x) { } int Count; }",
        )]);
        let foo = compilation.find_type("Foo").unwrap();

        let runs = compilation.members(foo, "Run");
        assert_eq!(runs.len(), 2);
        assert!(
            runs.iter()
                .all(|id| compilation.symbol(*id).unwrap().kind == SymbolKind::Method)
        );
        assert!(compilation.members(foo, "Missing").is_empty());
    }

    #[test]
    fn test_find_by_doc_id() {
        let compilation = compile(&[(
            "a.cs",
            "namespace N { class Foo { void Run(int x) { } Foo() { } } }",
        )]);

        let run = compilation.find_by_doc_id("M:N.Foo.Run(System.Int32)").unwrap();
        assert_eq!(compilation.symbol(run).unwrap().name, "Run");
        let ctor = compilation.find_by_doc_id("M:N.Foo.#ctor").unwrap();
        assert_eq!(
            compilation.symbol(ctor).unwrap().kind,
            SymbolKind::Constructor
        );
        assert!(compilation.find_by_doc_id("M:N.Foo.Run").is_none());
    }

    #[test]
    fn test_file_ordinals_follow_input_order() {
        let compilation = compile(&[("b.cs", "class B { }"), ("a.cs", "class A { }")]);
        let files: Vec<_> = compilation
            .files()
            .iter()
            .map(|f| (f.id().index(), f.path().to_path_buf()))
            .collect();
        assert_eq!(
            files,
            vec![(0, PathBuf::from("b.cs")), (1, PathBuf::from("a.cs"))]
        );
    }

    #[test]
    fn test_strip_arity() {
        assert_eq!(strip_arity("N.Outer`1.Inner`2"), "N.Outer.Inner");
        assert_eq!(strip_arity("Foo"), "Foo");
    }
}
