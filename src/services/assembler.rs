//! XML Assembler

use crate::models::MergedDocumentation;

const MEMBER_INDENT: usize = 4;

/// Wrap merged documentation in a `<member>` element.
///
/// `None` yields the empty string. Otherwise every body line is indented by
/// four spaces and the fragment ends with a newline.
pub fn assemble(doc_id: &str, documentation: &MergedDocumentation) -> String {
    let Some(body) = documentation.body() else {
        return String::new();
    };

    let mut xml = format!("<member name=\"{}\">\n", doc_id);
    xml.push_str(&indent_lines(body, MEMBER_INDENT));
    xml.push_str("\n</member>\n");
    xml
}

/// Prefix every line with `indent` spaces. Whitespace-only lines are kept
/// as they are.
pub fn indent_lines(content: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    content
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_empty() {
        assert_eq!(assemble("T:Foo", &MergedDocumentation::None), "");
    }

    #[test]
    fn test_single_line_body() {
        let xml = assemble(
            "M:Foo.Bar",
            &MergedDocumentation::Body("<remarks>Foo.</remarks>".to_string()),
        );
        assert_eq!(
            xml,
            "<member name=\"M:Foo.Bar\">\n    <remarks>Foo.</remarks>\n</member>\n"
        );
    }

    #[test]
    fn test_multi_line_body_keeps_blank_lines() {
        let xml = assemble(
            "T:Foo",
            &MergedDocumentation::Body("<summary>\n\nText\n</summary>".to_string()),
        );
        assert_eq!(
            xml,
            "<member name=\"T:Foo\">\n    <summary>\n\n    Text\n    </summary>\n</member>\n"
        );
    }

    #[test]
    fn test_indent_lines() {
        assert_eq!(indent_lines("a\n b", 2), "  a\n   b");
        assert_eq!(indent_lines("a\n   \nb", 8), "        a\n   \n        b");
    }
}
