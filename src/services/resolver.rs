//! Documentation resolver
//!
//! Runs collect, extract, merge and assemble for one symbol. Every query
//! reads the immutable compilation and recomputes its result, so the
//! resolver can be shared across threads.

use std::path::PathBuf;

use super::assembler::assemble;
use super::compilation::Compilation;
use super::doc_id::format_id;
use super::extractor::extract;
use super::merge::{MergePolicy, merge};
use crate::error::ResolveError;
use crate::models::config::ResolverConfig;
use crate::models::{
    DeclarationPiece, MergedDocumentation, RawComment, SymbolId, UnimplementedPartialPolicy,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    pub unimplemented_partial_methods: UnimplementedPartialPolicy,
}

impl From<&ResolverConfig> for ResolverOptions {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            unimplemented_partial_methods: config.unimplemented_partial_methods,
        }
    }
}

pub struct DocumentationResolver<'c> {
    compilation: &'c Compilation,
    options: ResolverOptions,
}

impl<'c> DocumentationResolver<'c> {
    pub fn new(compilation: &'c Compilation) -> Self {
        Self::with_options(compilation, ResolverOptions::default())
    }

    pub fn with_options(compilation: &'c Compilation, options: ResolverOptions) -> Self {
        Self {
            compilation,
            options,
        }
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// Raw comments of every declaration piece, in declaration order
    pub fn raw_comments(
        &self,
        id: SymbolId,
    ) -> Result<Vec<(&'c DeclarationPiece, RawComment)>, ResolveError> {
        let pieces = self.compilation.index().collect(id)?;
        pieces
            .iter()
            .map(|piece| {
                let file = self.compilation.file(piece.file()).ok_or_else(|| {
                    ResolveError::DeclarationNotFound {
                        path: PathBuf::from(format!("<file {}>", piece.file().index())),
                        offset: piece.position.offset,
                    }
                })?;
                Ok((piece, extract(file, piece)?))
            })
            .collect()
    }

    /// Merged documentation body of a symbol, without the `<member>` wrapper
    pub fn merged_documentation(&self, id: SymbolId) -> Result<MergedDocumentation, ResolveError> {
        let symbol = self
            .compilation
            .symbol(id)
            .ok_or(ResolveError::UnknownSymbol(id.index()))?;
        let comments = self.raw_comments(id)?;
        let policy = MergePolicy::for_symbol(symbol);
        tracing::debug!(
            "Merging {} piece(s) of '{}' with {:?}",
            comments.len(),
            symbol.name,
            policy
        );
        Ok(merge(policy, &comments))
    }

    /// `<member>` XML fragment of a symbol, or the empty string when it has no
    /// documentation
    pub fn documentation_xml(&self, id: SymbolId) -> Result<String, ResolveError> {
        let symbol = self
            .compilation
            .symbol(id)
            .ok_or(ResolveError::UnknownSymbol(id.index()))?;

        if symbol.is_partial_method()
            && self.options.unimplemented_partial_methods == UnimplementedPartialPolicy::Omit
        {
            let pieces = self.compilation.index().collect(id)?;
            if !pieces.iter().any(DeclarationPiece::is_implementation) {
                tracing::debug!("Partial method '{}' has no implementation, omitted", symbol.name);
                return Ok(String::new());
            }
        }

        let documentation = self.merged_documentation(id)?;
        if documentation.is_none() {
            return Ok(String::new());
        }
        Ok(assemble(&format_id(self.compilation.index(), id)?, &documentation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::compilation::SourceText;

    const FIRST_FILE: &str = r#"
/// <summary>Summary on first file's Foo.</summary>
partial class Foo
{
    /// <summary>Summary on MethodWithNoImplementation.</summary>
    partial void MethodWithNoImplementation();

    /// <summary>Summary in file one which should be shadowed.</summary>
    partial void ImplementedMethodWithNoSummaryOnImpl();

    partial void ImplementedMethod();
}"#;

    const SECOND_FILE: &str = r#"
/// <summary>Summary on second file's Foo.</summary>
partial class Foo
{
    /// <remarks>Foo.</remarks>
    partial void ImplementedMethodWithNoSummaryOnImpl() { }

    /// <summary>Implemented method.</summary>
    partial void ImplementedMethod() { }
}"#;

    fn compile(sources: &[&str]) -> Compilation {
        Compilation::parse(
            sources
                .iter()
                .enumerate()
                .map(|(i, text)| SourceText::new(format!("file{i}.cs"), *text)),
        )
        .unwrap()
    }

    fn foo_compilation() -> Compilation {
        compile(&[FIRST_FILE, SECOND_FILE])
    }

    fn member(compilation: &Compilation, name: &str) -> SymbolId {
        let foo = compilation.find_type("Foo").unwrap();
        let members = compilation.members(foo, name);
        assert_eq!(members.len(), 1, "expected a single '{name}'");
        members[0]
    }

    #[test]
    fn test_summary_of_partial_type() {
        let compilation = foo_compilation();
        let foo = compilation.find_type("Foo").unwrap();
        assert_eq!(
            compilation.documentation_xml(foo).unwrap(),
            "<member name=\"T:Foo\">\n    <summary>Summary on first file's Foo.</summary>\n    <summary>Summary on second file's Foo.</summary>\n</member>\n"
        );
    }

    #[test]
    fn test_method_with_no_implementation_is_empty() {
        let compilation = foo_compilation();
        let method = member(&compilation, "MethodWithNoImplementation");
        assert_eq!(compilation.documentation_xml(method).unwrap(), "");
    }

    #[test]
    fn test_implementation_comment_shadows_definition() {
        let compilation = foo_compilation();
        let method = member(&compilation, "ImplementedMethodWithNoSummaryOnImpl");
        assert_eq!(
            compilation.documentation_xml(method).unwrap(),
            "<member name=\"M:Foo.ImplementedMethodWithNoSummaryOnImpl\">\n    <remarks>Foo.</remarks>\n</member>\n"
        );
    }

    #[test]
    fn test_implemented_method() {
        let compilation = foo_compilation();
        let method = member(&compilation, "ImplementedMethod");
        assert_eq!(
            compilation.documentation_xml(method).unwrap(),
            "<member name=\"M:Foo.ImplementedMethod\">\n    <summary>Implemented method.</summary>\n</member>\n"
        );
    }

    #[test]
    fn test_absent_implementation_comment_suppresses_definition() {
        let compilation = compile(&[
            "partial class Foo\n{\n    /// <summary>Definition.</summary>\n    partial void Run();\n}\n",
            "partial class Foo\n{\n    partial void Run() { }\n}\n",
        ]);
        let method = member(&compilation, "Run");
        assert_eq!(compilation.documentation_xml(method).unwrap(), "");
        assert!(
            DocumentationResolver::new(&compilation)
                .merged_documentation(method)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_defining_policy_surfaces_definition() {
        let compilation = foo_compilation();
        let method = member(&compilation, "MethodWithNoImplementation");
        let resolver = DocumentationResolver::with_options(
            &compilation,
            ResolverOptions {
                unimplemented_partial_methods: UnimplementedPartialPolicy::Defining,
            },
        );
        assert_eq!(
            resolver.documentation_xml(method).unwrap(),
            "<member name=\"M:Foo.MethodWithNoImplementation\">\n    <summary>Summary on MethodWithNoImplementation.</summary>\n</member>\n"
        );
    }

    #[test]
    fn test_implementation_spelled_with_framework_type_name() {
        let compilation = compile(&[
            "partial class Foo\n{\n    /// <summary>Definition.</summary>\n    partial void Run(int x);\n}\n",
            "partial class Foo\n{\n    partial void Run(System.Int32 x) { }\n}\n",
        ]);
        let method = member(&compilation, "Run");
        assert_eq!(
            compilation.doc_id(method).unwrap(),
            "M:Foo.Run(System.Int32)"
        );

        let resolver = DocumentationResolver::with_options(
            &compilation,
            ResolverOptions {
                unimplemented_partial_methods: UnimplementedPartialPolicy::Defining,
            },
        );
        assert_eq!(resolver.documentation_xml(method).unwrap(), "");
    }

    #[test]
    fn test_merged_documentation_without_wrapper() {
        let compilation = foo_compilation();
        let method = member(&compilation, "MethodWithNoImplementation");
        let merged = DocumentationResolver::new(&compilation)
            .merged_documentation(method)
            .unwrap();
        assert_eq!(
            merged.body(),
            Some("<summary>Summary on MethodWithNoImplementation.</summary>")
        );
    }

    #[test]
    fn test_undocumented_symbols_are_empty() {
        let compilation = compile(&[
            "partial class Bar { int x; }",
            "partial class Bar { void Run() { } }",
        ]);
        let bar = compilation.find_type("Bar").unwrap();
        assert_eq!(compilation.documentation_xml(bar).unwrap(), "");
        let x = compilation.members(bar, "x")[0];
        assert_eq!(compilation.documentation_xml(x).unwrap(), "");
    }

    #[test]
    fn test_partial_type_with_one_documented_part() {
        let compilation = compile(&[
            "partial class Bar { }",
            "/// <summary>Only here.</summary>\npartial class Bar { }",
        ]);
        let bar = compilation.find_type("Bar").unwrap();
        assert_eq!(
            compilation.documentation_xml(bar).unwrap(),
            "<member name=\"T:Bar\">\n    <summary>Only here.</summary>\n</member>\n"
        );
    }

    #[test]
    fn test_documentation_is_idempotent() {
        let compilation = foo_compilation();
        let foo = compilation.find_type("Foo").unwrap();
        let first = compilation.documentation_xml(foo).unwrap();
        let second = compilation.documentation_xml(foo).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_queries_match_sequential() {
        let compilation = foo_compilation();
        let ids: Vec<SymbolId> = compilation.index().iter().map(|(id, _)| id).collect();
        let sequential: Vec<String> = ids
            .iter()
            .map(|id| compilation.documentation_xml(*id).unwrap())
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        ids.iter()
                            .map(|id| compilation.documentation_xml(*id).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), sequential);
            }
        });
    }

    #[test]
    fn test_unknown_symbol_is_an_error() {
        let compilation = foo_compilation();
        let err = compilation.documentation_xml(SymbolId(999)).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownSymbol(999)));
        assert!(!err.is_internal());
    }

    #[test]
    fn test_options_from_config() {
        let config = ResolverConfig {
            unimplemented_partial_methods: UnimplementedPartialPolicy::Defining,
        };
        assert_eq!(
            ResolverOptions::from(&config).unimplemented_partial_methods,
            UnimplementedPartialPolicy::Defining
        );
        assert_eq!(
            ResolverOptions::default().unimplemented_partial_methods,
            UnimplementedPartialPolicy::Omit
        );
    }
}
