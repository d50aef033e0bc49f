//! Expression template lexing.
//!
//! Variable and formula expressions mix three kinds of text:
//!
//! - **Identifiers**: uppercase variable names such as `GROSS` or `PF_2`
//! - **Placeholders**: contextual inputs written as `{{#num_of_days}}`
//! - **Text**: numbers, operators, parentheses, whitespace and anything else
//!
//! Each expression is classified once, left to right. Substitution then works
//! on the classified tokens instead of rewriting the string, so a substituted
//! value can never be mistaken for a name or merge with neighbouring text.

use regex::Regex;
use std::sync::OnceLock;

use super::deps::is_valid_name;

/// A classified span of an expression template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateToken<'a> {
    Text(&'a str),
    Identifier(&'a str),
    Placeholder(&'a str),
}

/// Split an expression into text, identifier and placeholder tokens.
///
/// A maximal run of `[A-Za-z0-9_]` is an identifier only when the whole run
/// is a valid variable name; `2A`, `Abc` or `a_b` stay as text and are later
/// rejected by the evaluator. Adjacent text is merged into one token.
pub fn lex_template(expression: &str) -> Vec<TemplateToken<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while pos < expression.len() {
        let rest = &expression[pos..];

        if let Some(caps) = placeholder_re().captures(rest)
            && let (Some(whole), Some(name)) = (caps.get(0), caps.get(1))
        {
            push_text(&mut tokens, &expression[text_start..pos]);
            tokens.push(TemplateToken::Placeholder(name.as_str()));
            pos += whole.end();
            text_start = pos;
            continue;
        }

        let word_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if word_len > 0 {
            let word = &rest[..word_len];
            if is_valid_name(word) {
                push_text(&mut tokens, &expression[text_start..pos]);
                tokens.push(TemplateToken::Identifier(word));
                text_start = pos + word_len;
            }
            pos += word_len;
            continue;
        }

        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    push_text(&mut tokens, &expression[text_start..]);
    tokens
}

fn push_text<'a>(tokens: &mut Vec<TemplateToken<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(TemplateToken::Text(text));
    }
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"^\{\{#([^}]+)\}\}").expect("placeholder regex must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::TemplateToken::*;
    use super::*;

    #[test]
    fn test_lex_identifiers_and_text() {
        assert_eq!(
            lex_template("BASIC + DA+HRA"),
            vec![
                Identifier("BASIC"),
                Text(" + "),
                Identifier("DA"),
                Text("+"),
                Identifier("HRA"),
            ]
        );
    }

    #[test]
    fn test_lex_placeholder() {
        assert_eq!(
            lex_template("(GROSS / 30) * {{#num_of_days}}"),
            vec![
                Text("("),
                Identifier("GROSS"),
                Text(" / 30) * "),
                Placeholder("num_of_days"),
            ]
        );
    }

    #[test]
    fn test_lex_placeholder_name_may_contain_spaces() {
        assert_eq!(lex_template("{{#bonus pct}}"), vec![Placeholder("bonus pct")]);
    }

    #[test]
    fn test_lex_non_identifier_words_stay_text() {
        assert_eq!(lex_template("2A + abc"), vec![Text("2A + abc")]);
        assert_eq!(lex_template("Gross"), vec![Text("Gross")]);
        assert_eq!(lex_template("_A"), vec![Text("_A")]);
    }

    #[test]
    fn test_lex_incomplete_placeholder_is_text() {
        assert_eq!(lex_template("{{#}}"), vec![Text("{{#}}")]);
        assert_eq!(lex_template("{{#days}"), vec![Text("{{#days}")]);
        assert_eq!(
            lex_template("{{{#a}}"),
            vec![Text("{"), Placeholder("a")]
        );
    }

    #[test]
    fn test_lex_dot_before_identifier() {
        assert_eq!(lex_template("1.A"), vec![Text("1."), Identifier("A")]);
    }

    #[test]
    fn test_lex_non_ascii_text() {
        assert_eq!(lex_template("A×2"), vec![Identifier("A"), Text("×2")]);
    }

    #[test]
    fn test_lex_empty() {
        assert!(lex_template("").is_empty());
    }
}
