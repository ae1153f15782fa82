pub const DEFAULT_WIDTH: usize = 30;

/// Splits a line longer than `width` characters at the last space before
/// column `width`, or hard at `width` when there is none.
fn split_line(line: &str, width: usize) -> (String, String) {
    let chars = line.chars().collect::<Vec<_>>();
    let break_pos = chars[..width]
        .iter()
        .rposition(|ch| *ch == ' ')
        .unwrap_or(width);
    let first = chars[..break_pos].iter().collect::<String>();
    let second = chars[break_pos..].iter().collect::<String>();
    (
        first.trim_end().to_string(),
        second.trim_start().to_string(),
    )
}

/// Rewraps every line to at most `width` characters, repeating until no
/// line changes. The result always ends with a newline.
pub fn reflow(source: &str, width: usize) -> String {
    let width = width.max(1);
    let mut lines = source.lines().map(str::to_string).collect::<Vec<_>>();

    let mut changed = true;
    while changed {
        changed = false;
        let mut next = Vec::with_capacity(lines.len());
        for line in lines {
            if line.chars().count() <= width {
                next.push(line);
                continue;
            }
            let (first, second) = split_line(&line, width);
            next.push(first);
            next.push(second);
            changed = true;
        }
        lines = next;
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
