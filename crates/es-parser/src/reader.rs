use std::collections::BTreeMap;

use es_core::{EasyScriptError, FunctionDecl, ScriptProgram, Statement};

use crate::comment::strip_comments;
use crate::statement::{classify_statement, is_block_opener, parse_block_header, BlockHeader};

const BLOCK_CLOSER: &str = "]";

/// A non-blank source line with comments stripped and whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

fn clean_lines(source: &str) -> Vec<SourceLine> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = strip_comments(raw).trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(SourceLine {
                    number: index + 1,
                    text,
                })
            }
        })
        .collect()
}

struct BlockReader<'a> {
    lines: &'a [SourceLine],
    cursor: usize,
}

impl<'a> BlockReader<'a> {
    fn new(lines: &'a [SourceLine]) -> Self {
        Self { lines, cursor: 0 }
    }

    fn next_line(&mut self) -> Option<&'a SourceLine> {
        let line = self.lines.get(self.cursor)?;
        self.cursor += 1;
        Some(line)
    }

    /// Captures the lines enclosed by `opener`, counting nested openers so
    /// that only the matching `]` ends the block. The cursor resumes after it.
    fn capture_body(&mut self, opener: &SourceLine) -> Result<&'a [SourceLine], EasyScriptError> {
        let start = self.cursor;
        let mut depth = 1usize;
        while let Some(line) = self.next_line() {
            if line.text == BLOCK_CLOSER {
                depth -= 1;
                if depth == 0 {
                    return Ok(&self.lines[start..self.cursor - 1]);
                }
            } else if is_block_opener(&line.text) {
                depth += 1;
            }
        }

        Err(EasyScriptError::syntax(format!(
            "Unterminated block: '{}' has no closing ']'",
            opener.text
        ))
        .at_line(opener.number))
    }
}

/// A block whose header cannot run. Its body is dropped and the failure is
/// raised only if execution reaches the header.
fn deferred_block(message: String, line: usize) -> Statement {
    Statement::Invalid { message, line }
}

/// Parses a whole script into its top-level statements and function table.
pub fn parse_program(source: &str) -> Result<ScriptProgram, EasyScriptError> {
    let lines = clean_lines(source);
    let mut functions = BTreeMap::new();
    let main = parse_statements(&lines, Some(&mut functions))?;
    Ok(ScriptProgram {
        main: main.into(),
        functions,
    })
}

/// `functions` is `Some` only at the top level, where definitions are allowed.
fn parse_statements(
    lines: &[SourceLine],
    mut functions: Option<&mut BTreeMap<String, FunctionDecl>>,
) -> Result<Vec<Statement>, EasyScriptError> {
    let mut reader = BlockReader::new(lines);
    let mut statements = Vec::new();

    while let Some(line) = reader.next_line() {
        if line.text == BLOCK_CLOSER {
            return Err(
                EasyScriptError::syntax("Unexpected ']' without an open block").at_line(line.number)
            );
        }

        let Some(header) = parse_block_header(&line.text) else {
            statements.push(classify_statement(&line.text, line.number));
            continue;
        };
        let body_lines = reader.capture_body(line)?;
        let header = match header {
            Ok(header) => header,
            Err(error) => {
                statements.push(deferred_block(error.message, line.number));
                continue;
            }
        };

        match header {
            BlockHeader::Function { name } => {
                let Some(table) = functions.as_deref_mut() else {
                    statements.push(deferred_block(
                        format!("Function '{}' must be defined at top level", name),
                        line.number,
                    ));
                    continue;
                };
                if table.contains_key(&name) {
                    return Err(EasyScriptError::syntax(format!(
                        "Function '{}' is already defined",
                        name
                    ))
                    .at_line(line.number));
                }
                let body = parse_statements(body_lines, None)?;
                table.insert(
                    name.clone(),
                    FunctionDecl {
                        name,
                        body: body.into(),
                        line: line.number,
                    },
                );
            }
            BlockHeader::Loop { count } => {
                let body = parse_statements(body_lines, None)?;
                statements.push(Statement::Loop {
                    count,
                    body: body.into(),
                    line: line.number,
                });
            }
            BlockHeader::If { conditions } => {
                let body = parse_statements(body_lines, None)?;
                statements.push(Statement::If {
                    conditions,
                    body: body.into(),
                    line: line.number,
                });
            }
        }
    }

    Ok(statements)
}

#[cfg(test)]
mod reader_tests {
    use super::*;
    use es_core::{ErrorKind, DEFAULT_LOOP_COUNT};

    #[test]
    fn clean_lines_skips_blank_and_comment_only_lines() {
        let lines = clean_lines("let x = 1\n\n   //note//  \nprint(x) //tail//\n");
        assert_eq!(
            lines,
            vec![
                SourceLine {
                    number: 1,
                    text: "let x = 1".to_string()
                },
                SourceLine {
                    number: 4,
                    text: "print(x)".to_string()
                },
            ]
        );
    }

    #[test]
    fn parse_program_lifts_functions_out_of_main() {
        let program = parse_program(
            "greet()\nfunction greet [\n  print(\"hi\")\n]\nprint(1)\n",
        )
        .expect("program should parse");

        assert_eq!(program.main.len(), 2);
        assert!(matches!(program.main[0], Statement::Call { ref name, line: 1 } if name == "greet"));
        assert!(matches!(program.main[1], Statement::Print { line: 5, .. }));

        let greet = program.function("greet").expect("greet should be defined");
        assert_eq!(greet.line, 2);
        assert_eq!(greet.body.len(), 1);
    }

    #[test]
    fn parse_program_captures_nested_blocks_by_depth() {
        let program = parse_program(
            "loop 2 [\n  if a = 1 [\n    print(a)\n  ]\n  print(\"after\")\n]\nprint(\"done\")\n",
        )
        .expect("program should parse");

        assert_eq!(program.main.len(), 2);
        let Statement::Loop { count, body, .. } = &program.main[0] else {
            panic!("first statement should be a loop");
        };
        assert_eq!(*count, 2);
        assert_eq!(body.len(), 2);
        let Statement::If {
            conditions,
            body: if_body,
            ..
        } = &body[0]
        else {
            panic!("loop body should start with if");
        };
        assert_eq!(conditions.len(), 1);
        assert_eq!(if_body.len(), 1);
        assert!(matches!(body[1], Statement::Print { line: 5, .. }));
    }

    #[test]
    fn parse_program_defaults_loop_count() {
        let program = parse_program("loop [\nprint(1)\n]").expect("program should parse");
        assert!(matches!(
            program.main[0],
            Statement::Loop { count, .. } if count == DEFAULT_LOOP_COUNT
        ));
    }

    #[test]
    fn parse_program_keeps_unknown_lines_for_runtime() {
        let program = parse_program("if a = 1 [\nnonsense here\n]").expect("program should parse");
        let Statement::If { body, .. } = &program.main[0] else {
            panic!("expected if");
        };
        assert!(matches!(body[0], Statement::Invalid { line: 2, .. }));
    }

    #[test]
    fn parse_program_rejects_unterminated_block() {
        let error = parse_program("print(1)\nloop 3 [\nprint(2)\n").expect_err("should fail");
        assert_eq!(error.kind, ErrorKind::Syntax);
        assert_eq!(error.line, Some(2));
        assert_eq!(
            error.message,
            "Unterminated block: 'loop 3 [' has no closing ']'"
        );

        let error = parse_program("function f [\nloop [\nprint(1)\n]\n").expect_err("should fail");
        assert_eq!(error.line, Some(1));
    }

    #[test]
    fn parse_program_rejects_structural_errors() {
        let stray = parse_program("print(1)\n]").expect_err("stray closer should fail");
        assert_eq!(stray.line, Some(2));

        let duplicate =
            parse_program("function f [\n]\nfunction f [\n]").expect_err("should fail");
        assert_eq!(duplicate.message, "Function 'f' is already defined");
        assert_eq!(duplicate.line, Some(3));
    }

    #[test]
    fn parse_program_defers_unusable_block_headers() {
        let program = parse_program(
            "print(1)\nif a = 1 [\nloop many [\nprint(2)\n]\nfunction f [\n]\n]\nloop x [\n]",
        )
        .expect("program should parse");
        assert_eq!(program.main.len(), 3);

        let Statement::If { body, .. } = &program.main[1] else {
            panic!("expected if block");
        };
        assert_eq!(
            &**body,
            &[
                Statement::Invalid {
                    message: "Invalid loop count: 'many'".to_string(),
                    line: 3
                },
                Statement::Invalid {
                    message: "Function 'f' must be defined at top level".to_string(),
                    line: 6
                },
            ]
        );
        assert_eq!(
            program.main[2],
            Statement::Invalid {
                message: "Invalid loop count: 'x'".to_string(),
                line: 9
            }
        );
        assert!(program.functions.is_empty());
    }
}
