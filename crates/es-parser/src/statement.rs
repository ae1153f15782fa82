use std::sync::OnceLock;

use es_core::{
    is_identifier, strip_quotes, Condition, EasyScriptError, Statement, DEFAULT_LOOP_COUNT,
};
use regex::Regex;

const LETTER_LITERAL: &str = "letterfromsilsyn()()";

static RUN_SCRIPT: OnceLock<Regex> = OnceLock::new();
static DELAY: OnceLock<Regex> = OnceLock::new();
static PROMPT: OnceLock<Regex> = OnceLock::new();
static LET: OnceLock<Regex> = OnceLock::new();
static PRINT: OnceLock<Regex> = OnceLock::new();
static CALL: OnceLock<Regex> = OnceLock::new();
static FUNCTION_HEADER: OnceLock<Regex> = OnceLock::new();
static LOOP_HEADER: OnceLock<Regex> = OnceLock::new();
static IF_HEADER: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("statement regex must compile"))
}

fn capture<'t>(cell: &'static OnceLock<Regex>, pattern: &str, text: &'t str) -> Option<&'t str> {
    regex(cell, pattern)
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockHeader {
    Function { name: String },
    Loop { count: u64 },
    If { conditions: Vec<Condition> },
}

/// Recognizes `function NAME [`, `loop [COUNT] [` and `if COND && ... [`.
///
/// Returns `None` for lines that are not block openers, and `Some(Err(..))`
/// for opener-shaped lines whose header cannot be parsed.
pub fn parse_block_header(text: &str) -> Option<Result<BlockHeader, EasyScriptError>> {
    if !text.ends_with('[') {
        return None;
    }

    if let Some(name) = capture(&FUNCTION_HEADER, r"^function\s+(.*?)\s*\[$", text) {
        if !is_identifier(name) {
            return Some(Err(EasyScriptError::syntax(format!(
                "Invalid function name: '{}'",
                name
            ))));
        }
        return Some(Ok(BlockHeader::Function {
            name: name.to_string(),
        }));
    }

    if let Some(caps) = regex(&LOOP_HEADER, r"^loop(?:\s+(.*?))?\s*\[$").captures(text) {
        let count = match caps.get(1).map(|m| m.as_str().trim()) {
            None | Some("") => DEFAULT_LOOP_COUNT,
            Some(raw) => match raw.parse::<u64>() {
                Ok(count) => count,
                Err(_) => {
                    return Some(Err(EasyScriptError::syntax(format!(
                        "Invalid loop count: '{}'",
                        raw
                    ))))
                }
            },
        };
        return Some(Ok(BlockHeader::Loop { count }));
    }

    if let Some(raw) = capture(&IF_HEADER, r"^if\s+(.*?)\s*\[$", text) {
        return Some(parse_conditions(raw).map(|conditions| BlockHeader::If { conditions }));
    }

    None
}

pub fn is_block_opener(text: &str) -> bool {
    parse_block_header(text).is_some()
}

fn parse_conditions(raw: &str) -> Result<Vec<Condition>, EasyScriptError> {
    let mut conditions = Vec::new();
    for conjunct in split_conjuncts(raw) {
        let conjunct = conjunct.trim();
        let Some((name, value)) = conjunct.split_once('=') else {
            return Err(EasyScriptError::syntax(format!(
                "Invalid if condition: '{}'",
                conjunct
            )));
        };
        let name = name.trim();
        let value = value.trim();
        if !is_identifier(name) || value.is_empty() {
            return Err(EasyScriptError::syntax(format!(
                "Invalid if condition: '{}'",
                conjunct
            )));
        }
        conditions.push(Condition {
            name: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(conditions)
}

/// Splits on `&&` outside `"..."` and `'...'` spans.
fn split_conjuncts(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut chars = raw.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        match (quote, ch) {
            (Some(open), _) if ch == open => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '&') if matches!(chars.peek(), Some((_, '&'))) => {
                parts.push(&raw[start..index]);
                chars.next();
                start = index + 2;
            }
            (None, _) => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// Classifies one non-block line. Unrecognized shapes become
/// [`Statement::Invalid`] so the failure surfaces only if the line runs.
pub fn classify_statement(text: &str, line: usize) -> Statement {
    if let Some(path) = capture(&RUN_SCRIPT, r"^runpyfile\((.*)\)$", text) {
        return Statement::RunScript {
            path: strip_quotes(path).unwrap_or(path).to_string(),
            line,
        };
    }

    if let Some(seconds) = capture(&DELAY, r"^delay\((.*)\)$", text) {
        return Statement::Delay {
            seconds: seconds.to_string(),
            line,
        };
    }

    if text == LETTER_LITERAL {
        return Statement::Letter { line };
    }

    if let Some(prompt) = capture(&PROMPT, r"^prompt\((.*)\)$", text) {
        return Statement::Prompt {
            text: strip_quotes(prompt).unwrap_or(prompt).to_string(),
            line,
        };
    }

    if text.starts_with("let ") {
        let Some(caps) = regex(&LET, r"^let\s+([A-Za-z_]\w*)\s*=\s*(.+)$").captures(text) else {
            return Statement::Invalid {
                message: format!("Invalid let syntax: {}", text),
                line,
            };
        };
        return Statement::Let {
            name: caps[1].to_string(),
            value: caps[2].trim().to_string(),
            line,
        };
    }

    if let Some(expr) = capture(&PRINT, r"^print\((.*)\)$", text) {
        return Statement::Print {
            expr: expr.to_string(),
            line,
        };
    }

    if let Some(name) = capture(&CALL, r"^([A-Za-z_]\w*)\(\)$", text) {
        return Statement::Call {
            name: name.to_string(),
            line,
        };
    }

    Statement::Invalid {
        message: format!("Invalid syntax: {}", text),
        line,
    }
}
