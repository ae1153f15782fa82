use es_parser::{is_block_opener, parse_block_header, strip_comments, BlockHeader};

const INDENT: &str = "    ";

/// Indents the bodies of `function NAME [ ... ]` blocks by nesting depth.
///
/// Blocks opened inside a function body deepen the indentation; lines
/// outside any function block are emitted exactly as written.
pub fn indent_functions(source: &str) -> String {
    let mut output = Vec::new();
    let mut depth = 0usize;

    for raw in source.lines() {
        let trimmed = raw.trim();
        let code = strip_comments(trimmed);
        let code = code.trim();

        if depth == 0 {
            if let Some(Ok(BlockHeader::Function { name })) = parse_block_header(code) {
                output.push(format!("function {} [", name));
                depth = 1;
            } else {
                output.push(raw.to_string());
            }
            continue;
        }

        if trimmed.is_empty() {
            output.push(String::new());
            continue;
        }

        if code == "]" {
            depth -= 1;
            output.push(format!("{}{}", INDENT.repeat(depth), trimmed));
            continue;
        }

        output.push(format!("{}{}", INDENT.repeat(depth), trimmed));
        if is_block_opener(code) {
            depth += 1;
        }
    }

    let mut formatted = output.join("\n");
    if source.ends_with('\n') {
        formatted.push('\n');
    }
    formatted
}
