use std::sync::OnceLock;

use es_core::{
    is_identifier, parse_integer_literal, strip_quotes, Condition, EasyScriptError, EsValue,
};
use regex::Regex;

use super::scope::Environment;

static ADDITIVE_EXPRESSION: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Plus,
    Minus,
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, EasyScriptError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        match ch {
            _ if ch.is_whitespace() => {}
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            _ if is_word_char(ch) => {
                let mut end = start + ch.len_utf8();
                while let Some(&(index, next)) = chars.peek() {
                    if !is_word_char(next) {
                        break;
                    }
                    end = index + next.len_utf8();
                    chars.next();
                }
                tokens.push(Token::Word(&expr[start..end]));
            }
            other => {
                return Err(EasyScriptError::syntax(format!(
                    "Unsupported operator: {}",
                    other
                )))
            }
        }
    }
    Ok(tokens)
}

fn resolve_operand(word: &str, environment: &Environment) -> Result<i64, EasyScriptError> {
    match environment.get(word) {
        Some(EsValue::Integer(value)) => Ok(*value),
        Some(EsValue::String(text)) => parse_integer_literal(text.trim()).ok_or_else(|| {
            EasyScriptError::type_error(format!(
                "Variable '{}' holds non-numeric value '{}'",
                word, text
            ))
        }),
        None if word.chars().all(|ch| ch.is_ascii_digit()) => word.parse::<i64>().map_err(|_| {
            EasyScriptError::type_error(format!("Integer literal out of range: {}", word))
        }),
        None if is_identifier(word) => Err(EasyScriptError::undefined_name(format!(
            "Variable not defined: {}",
            word
        ))),
        None => Err(EasyScriptError::type_error(format!(
            "Not a number: {}",
            word
        ))),
    }
}

/// Evaluates a quoted literal or a flat `+`/`-` chain, strictly left to right.
pub fn evaluate_expression(
    expr: &str,
    environment: &Environment,
) -> Result<EsValue, EasyScriptError> {
    let expr = expr.trim();
    if let Some(inner) = strip_quotes(expr) {
        return Ok(EsValue::String(inner.to_string()));
    }

    let tokens = tokenize(expr)?;
    if let [Token::Word(name)] = tokens.as_slice() {
        if let Some(value) = environment.get(name) {
            return Ok(value.clone());
        }
    }

    let mut tokens = tokens.into_iter();
    let mut total = match tokens.next() {
        None => return Err(EasyScriptError::syntax("Empty expression")),
        Some(Token::Word(word)) => resolve_operand(word, environment)?,
        Some(_) => {
            return Err(EasyScriptError::syntax(format!(
                "Expression must start with an operand: {}",
                expr
            )))
        }
    };

    while let Some(operator) = tokens.next() {
        let operand = match tokens.next() {
            Some(Token::Word(word)) => resolve_operand(word, environment)?,
            _ => {
                return Err(EasyScriptError::syntax(format!(
                    "Missing operand in expression: {}",
                    expr
                )))
            }
        };
        let next = match operator {
            Token::Plus => total.checked_add(operand),
            Token::Minus => total.checked_sub(operand),
            Token::Word(word) => {
                return Err(EasyScriptError::syntax(format!(
                    "Expected '+' or '-' before '{}' in expression: {}",
                    word, expr
                )))
            }
        };
        total = next.ok_or_else(|| {
            EasyScriptError::type_error(format!("Integer overflow in expression: {}", expr))
        })?;
    }

    Ok(EsValue::Integer(total))
}

/// Resolves a literal integer, a quoted string, or a variable; anything
/// else is taken verbatim as a string.
pub fn resolve_value(text: &str, environment: &Environment) -> EsValue {
    let text = text.trim();
    if let Some(value) = parse_integer_literal(text) {
        return EsValue::Integer(value);
    }
    if let Some(inner) = strip_quotes(text) {
        return EsValue::String(inner.to_string());
    }
    if let Some(value) = environment.get(text) {
        return value.clone();
    }
    EsValue::String(text.to_string())
}

/// Like [`resolve_value`], but a `+`/`-` chain is evaluated when every
/// operand is a defined variable or a canonical integer literal. Any other
/// text, including a chain whose evaluation fails, stays a literal string,
/// so `hello-world` and `2024-01-05` are kept verbatim.
pub fn resolve_let_value(text: &str, environment: &Environment) -> EsValue {
    let text = text.trim();
    if parse_integer_literal(text).is_some()
        || strip_quotes(text).is_some()
        || environment.get(text).is_some()
    {
        return resolve_value(text, environment);
    }

    let additive = ADDITIVE_EXPRESSION.get_or_init(|| {
        Regex::new(r"^\w+(?:\s*[+-]\s*\w+)+$").expect("additive regex must compile")
    });
    if additive.is_match(text) && chain_operands_resolve(text, environment) {
        if let Ok(value) = evaluate_expression(text, environment) {
            return value;
        }
    }

    EsValue::String(text.to_string())
}

fn chain_operands_resolve(text: &str, environment: &Environment) -> bool {
    let Ok(tokens) = tokenize(text) else {
        return false;
    };
    tokens.iter().all(|token| match token {
        Token::Word(word) => environment.get(word).is_some() || is_canonical_integer(word),
        Token::Plus | Token::Minus => true,
    })
}

/// `0` or digits without a leading zero.
fn is_canonical_integer(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|ch| ch.is_ascii_digit())
        && (word == "0" || !word.starts_with('0'))
}

/// An undefined left-hand variable makes the conjunct false.
pub fn condition_holds(condition: &Condition, environment: &Environment) -> bool {
    let Some(current) = environment.get(&condition.name) else {
        return false;
    };
    current.loosely_equals(&resolve_value(&condition.value, environment))
}

#[cfg(test)]
mod eval_tests {
    use super::*;
    use es_core::ErrorKind;

    fn env(entries: &[(&str, EsValue)]) -> Environment {
        let mut environment = Environment::new();
        for (name, value) in entries {
            environment.set(*name, value.clone());
        }
        environment
    }

    #[test]
    fn evaluate_expression_reduces_left_to_right() {
        let environment = env(&[("x", EsValue::from(10))]);
        assert_eq!(
            evaluate_expression("x - 3 - 2", &environment).expect("eval"),
            EsValue::from(5)
        );
        assert_eq!(
            evaluate_expression("x+4-1+100", &environment).expect("eval"),
            EsValue::from(113)
        );
        assert_eq!(
            evaluate_expression("7", &environment).expect("eval"),
            EsValue::from(7)
        );
    }

    #[test]
    fn evaluate_expression_returns_quoted_text_verbatim() {
        let environment = Environment::new();
        assert_eq!(
            evaluate_expression("\"a + b\"", &environment).expect("eval"),
            EsValue::from("a + b")
        );
        assert_eq!(
            evaluate_expression("'it''s'", &environment).expect("eval"),
            EsValue::from("it''s")
        );
    }

    #[test]
    fn evaluate_expression_returns_single_variable_unchanged() {
        let environment = env(&[("s", EsValue::from("hi"))]);
        assert_eq!(
            evaluate_expression("s", &environment).expect("eval"),
            EsValue::from("hi")
        );
    }

    #[test]
    fn evaluate_expression_coerces_numeric_strings() {
        let environment = env(&[("n", EsValue::from("41"))]);
        assert_eq!(
            evaluate_expression("n + 1", &environment).expect("eval"),
            EsValue::from(42)
        );
    }

    #[test]
    fn evaluate_expression_reports_error_kinds() {
        let environment = env(&[("s", EsValue::from("hi"))]);

        let empty = evaluate_expression("   ", &environment).expect_err("empty");
        assert_eq!(empty.kind, ErrorKind::Syntax);
        assert_eq!(empty.message, "Empty expression");

        let operator = evaluate_expression("2 * 3", &environment).expect_err("operator");
        assert_eq!(operator.kind, ErrorKind::Syntax);
        assert_eq!(operator.message, "Unsupported operator: *");

        let undefined = evaluate_expression("missing + 1", &environment).expect_err("undefined");
        assert_eq!(undefined.kind, ErrorKind::UndefinedName);

        let non_numeric = evaluate_expression("s + 1", &environment).expect_err("type");
        assert_eq!(non_numeric.kind, ErrorKind::Type);

        let bad_literal = evaluate_expression("4a + 1", &environment).expect_err("type");
        assert_eq!(bad_literal.kind, ErrorKind::Type);

        let dangling = evaluate_expression("1 +", &environment).expect_err("dangling");
        assert_eq!(dangling.kind, ErrorKind::Syntax);

        let leading = evaluate_expression("- 1", &environment).expect_err("leading");
        assert_eq!(leading.kind, ErrorKind::Syntax);

        let adjacent = evaluate_expression("1 2", &environment).expect_err("adjacent");
        assert_eq!(adjacent.kind, ErrorKind::Syntax);

        let overflow = evaluate_expression("9223372036854775807 + 1", &environment)
            .expect_err("overflow");
        assert_eq!(overflow.kind, ErrorKind::Type);
    }

    #[test]
    fn resolve_value_falls_back_to_literal_text() {
        let environment = env(&[("name", EsValue::from("Ada"))]);
        assert_eq!(resolve_value("-3", &environment), EsValue::from(-3));
        assert_eq!(resolve_value("'x'", &environment), EsValue::from("x"));
        assert_eq!(resolve_value("name", &environment), EsValue::from("Ada"));
        assert_eq!(resolve_value("other", &environment), EsValue::from("other"));
    }

    #[test]
    fn resolve_let_value_evaluates_additive_chains() {
        let environment = env(&[("n", EsValue::from(4))]);
        assert_eq!(resolve_let_value("n + 1", &environment), EsValue::from(5));
        assert_eq!(resolve_let_value("10 - n", &environment), EsValue::from(6));
        assert_eq!(
            resolve_let_value("hello world", &environment),
            EsValue::from("hello world")
        );
        assert_eq!(resolve_let_value("n", &environment), EsValue::from(4));
    }

    #[test]
    fn resolve_let_value_keeps_hyphenated_text_literal() {
        let environment = env(&[("n", EsValue::from(4)), ("s", EsValue::from("abc"))]);
        assert_eq!(
            resolve_let_value("hello-world", &environment),
            EsValue::from("hello-world")
        );
        assert_eq!(
            resolve_let_value("2024-01-05", &environment),
            EsValue::from("2024-01-05")
        );
        assert_eq!(resolve_let_value("n-world", &environment), EsValue::from("n-world"));
        assert_eq!(resolve_let_value("s + 1", &environment), EsValue::from("s + 1"));
    }

    #[test]
    fn condition_holds_compares_resolved_values() {
        let environment = env(&[
            ("a", EsValue::from(1)),
            ("b", EsValue::from("2")),
            ("c", EsValue::from(1)),
        ]);
        let condition = |name: &str, value: &str| Condition {
            name: name.to_string(),
            value: value.to_string(),
        };

        assert!(condition_holds(&condition("a", "1"), &environment));
        assert!(condition_holds(&condition("b", "2"), &environment));
        assert!(condition_holds(&condition("b", "\"2\""), &environment));
        assert!(condition_holds(&condition("a", "c"), &environment));
        assert!(!condition_holds(&condition("a", "2"), &environment));
        assert!(!condition_holds(&condition("missing", "1"), &environment));
    }
}
