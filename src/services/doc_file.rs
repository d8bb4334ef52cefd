//! Documentation file writer
//!
//! Aggregates the `<member>` fragments of every documented symbol into the
//! `<doc>` XML file that ships next to an assembly.

use serde::Serialize;

use super::assembler::indent_lines;
use super::compilation::Compilation;
use super::resolver::{DocumentationResolver, ResolverOptions};
use crate::error::ResolveError;

const FRAGMENT_INDENT: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct DocumentationFile {
    pub assembly: String,
    /// Number of `<member>` elements written
    pub members: usize,
    #[serde(skip)]
    pub xml: String,
}

pub fn write_documentation_file(
    compilation: &Compilation,
    assembly_name: &str,
    options: ResolverOptions,
) -> Result<DocumentationFile, ResolveError> {
    let resolver = DocumentationResolver::with_options(compilation, options);

    let mut xml = String::from("<?xml version=\"1.0\"?>\n<doc>\n");
    xml.push_str("    <assembly>\n");
    xml.push_str(&format!("        <name>{}</name>\n", escape_text(assembly_name)));
    xml.push_str("    </assembly>\n");
    xml.push_str("    <members>\n");

    let mut members = 0;
    for (id, _) in compilation.index().iter() {
        let fragment = resolver.documentation_xml(id)?;
        if fragment.is_empty() {
            continue;
        }
        xml.push_str(&indent_lines(fragment.trim_end_matches('\n'), FRAGMENT_INDENT));
        xml.push('\n');
        members += 1;
    }

    xml.push_str("    </members>\n</doc>\n");
    tracing::debug!("Wrote {} member(s) for assembly '{}'", members, assembly_name);

    Ok(DocumentationFile {
        assembly: assembly_name.to_string(),
        members,
        xml,
    })
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UnimplementedPartialPolicy;
    use crate::services::compilation::SourceText;

    fn compile(sources: &[&str]) -> Compilation {
        Compilation::parse(
            sources
                .iter()
                .enumerate()
                .map(|(i, text)| SourceText::new(format!("file{i}.cs"), *text)),
        )
        .unwrap()
    }

    #[test]
    fn test_documentation_file_layout() {
        let compilation = compile(&[
            "/// <summary>A</summary>\npartial class Foo\n{\n    /// <summary>Run.</summary>\n    void Run() { }\n    void Quiet() { }\n}\n",
            "/// <summary>B</summary>\npartial class Foo { }\n",
        ]);

        let file =
            write_documentation_file(&compilation, "Acme", ResolverOptions::default()).unwrap();
        assert_eq!(file.members, 2);
        assert_eq!(
            file.xml,
            "<?xml version=\"1.0\"?>\n\
             <doc>\n\
             \x20   <assembly>\n\
             \x20       <name>Acme</name>\n\
             \x20   </assembly>\n\
             \x20   <members>\n\
             \x20       <member name=\"T:Foo\">\n\
             \x20           <summary>A</summary>\n\
             \x20           <summary>B</summary>\n\
             \x20       </member>\n\
             \x20       <member name=\"M:Foo.Run\">\n\
             \x20           <summary>Run.</summary>\n\
             \x20       </member>\n\
             \x20   </members>\n\
             </doc>\n"
        );
    }

    #[test]
    fn test_member_ids_for_each_kind() {
        let compilation = compile(&[r#"
namespace Acme
{
    /// <summary>Widget.</summary>
    public class Widget
    {
        /// <summary>Field.</summary>
        public int count;

        /// <summary>Constructor.</summary>
        public Widget(int count) { }

        /// <summary>Property.</summary>
        public string Name { get; set; }

        /// <summary>Event.</summary>
        public event System.EventHandler Changed;

        /// <summary>Method.</summary>
        public void Run(string text, ref int n) { }

        /// <summary>Indexer.</summary>
        public int this[int i] => i;
    }
}
"#]);

        let file =
            write_documentation_file(&compilation, "Acme", ResolverOptions::default()).unwrap();
        let names: Vec<&str> = file
            .xml
            .lines()
            .filter_map(|line| line.trim().strip_prefix("<member name=\""))
            .filter_map(|rest| rest.strip_suffix("\">"))
            .collect();
        assert_eq!(
            names,
            vec![
                "T:Acme.Widget",
                "F:Acme.Widget.count",
                "M:Acme.Widget.#ctor(System.Int32)",
                "P:Acme.Widget.Name",
                "E:Acme.Widget.Changed",
                "M:Acme.Widget.Run(System.String,System.Int32@)",
                "P:Acme.Widget.Item(System.Int32)",
            ]
        );
        assert_eq!(file.members, names.len());
    }

    #[test]
    fn test_unimplemented_partial_method_follows_options() {
        let compilation = compile(&[
            "partial class Foo\n{\n    /// <summary>Latent.</summary>\n    partial void Hook();\n}\n",
        ]);

        let omitted =
            write_documentation_file(&compilation, "Acme", ResolverOptions::default()).unwrap();
        assert_eq!(omitted.members, 0);
        assert!(!omitted.xml.contains("Hook"));

        let included = write_documentation_file(
            &compilation,
            "Acme",
            ResolverOptions {
                unimplemented_partial_methods: UnimplementedPartialPolicy::Defining,
            },
        )
        .unwrap();
        assert_eq!(included.members, 1);
        assert!(included.xml.contains("<member name=\"M:Foo.Hook\">"));
    }

    #[test]
    fn test_assembly_name_is_escaped() {
        let compilation = compile(&["class Foo { }"]);
        let file =
            write_documentation_file(&compilation, "A&B", ResolverOptions::default()).unwrap();
        assert!(file.xml.contains("<name>A&amp;B</name>"));
        assert_eq!(file.members, 0);
    }
}
