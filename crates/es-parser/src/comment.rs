use std::sync::OnceLock;

use regex::Regex;

static COMMENT_SPAN: OnceLock<Regex> = OnceLock::new();

/// Removes every matched `//...//` span; an unmatched `//` is kept as text.
pub fn strip_comments(line: &str) -> String {
    let regex =
        COMMENT_SPAN.get_or_init(|| Regex::new(r"//.*?//").expect("comment regex must compile"));
    regex.replace_all(line, "").into_owned()
}

#[cfg(test)]
mod comment_tests {
    use super::*;

    #[test]
    fn strip_comments_removes_matched_pairs_only() {
        assert_eq!(strip_comments("print(x) //note//"), "print(x) ");
        assert_eq!(strip_comments("//a// let x = 1 //b//"), " let x = 1 ");
        assert_eq!(strip_comments("print(x) // open"), "print(x) // open");
        assert_eq!(strip_comments("a //b// c //d"), "a  c //d");
        assert_eq!(strip_comments("////"), "");
    }
}
