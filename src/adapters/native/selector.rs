//! Compound CSS selectors for the in-memory DOM.
//!
//! Supports comma-separated groups of `tag`, `*`, `.class`, `#id`, `[attr]`
//! and `[attr=value]` (value bare, single- or double-quoted). Combinators are
//! rejected.

use crate::domain::error::NotifyError;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Condition {
    Tag(String),
    Class(String),
    Id(String),
    HasAttribute(String),
    AttributeEquals(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    groups: Vec<Vec<Condition>>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn read_quoted(chars: &mut Peekable<Chars<'_>>, quote: char) -> Result<String, NotifyError> {
    let mut value = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some(escaped) => value.push(escaped),
                None => break,
            },
            Some(c) if c == quote => return Ok(value),
            Some(c) => value.push(c),
            None => break,
        }
    }
    Err(NotifyError::dom("Unterminated string in selector"))
}

fn parse_attribute(chars: &mut Peekable<Chars<'_>>) -> Result<Condition, NotifyError> {
    let name = read_ident(chars);
    if name.is_empty() {
        return Err(NotifyError::dom("Missing attribute name in selector"));
    }
    match chars.next() {
        Some(']') => Ok(Condition::HasAttribute(name)),
        Some('=') => {
            let value = match chars.peek().copied() {
                Some(quote @ ('"' | '\'')) => {
                    chars.next();
                    read_quoted(chars, quote)?
                }
                _ => read_ident(chars),
            };
            match chars.next() {
                Some(']') => Ok(Condition::AttributeEquals(name, value)),
                _ => Err(NotifyError::dom("Expected ']' in selector")),
            }
        }
        _ => Err(NotifyError::dom("Malformed attribute selector")),
    }
}

fn parse_compound(group: &str) -> Result<Vec<Condition>, NotifyError> {
    let mut chars = group.chars().peekable();
    let mut conditions = Vec::new();

    match chars.peek().copied() {
        Some('*') => {
            chars.next();
        }
        Some(c) if is_ident_char(c) => {
            conditions.push(Condition::Tag(read_ident(&mut chars).to_ascii_lowercase()));
        }
        _ => {}
    }

    while let Some(c) = chars.next() {
        let condition = match c {
            '.' => Condition::Class(read_ident(&mut chars)),
            '#' => Condition::Id(read_ident(&mut chars)),
            '[' => parse_attribute(&mut chars)?,
            other => {
                return Err(NotifyError::dom(format!(
                    "Unsupported selector syntax '{other}' in '{group}'"
                )))
            }
        };
        if matches!(&condition, Condition::Class(n) | Condition::Id(n) if n.is_empty()) {
            return Err(NotifyError::dom(format!("Empty name in selector '{group}'")));
        }
        conditions.push(condition);
    }
    Ok(conditions)
}

/// Splits on commas that are outside brackets and quotes.
fn split_groups(input: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth -= 1,
            (None, ',') if depth == 0 => {
                groups.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    groups.push(&input[start..]);
    groups
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, NotifyError> {
        let groups = split_groups(input)
            .into_iter()
            .map(str::trim)
            .map(|group| {
                if group.is_empty() {
                    Err(NotifyError::dom(format!("Empty selector group in '{input}'")))
                } else {
                    parse_compound(group)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { groups })
    }

    /// Matches an element described by its tag and an attribute lookup.
    /// Classes and ids are read from the `class` and `id` attributes.
    pub fn matches<F>(&self, tag: &str, attribute: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.groups.iter().any(|conditions| {
            conditions.iter().all(|condition| match condition {
                Condition::Tag(name) => tag.eq_ignore_ascii_case(name),
                Condition::Class(name) => attribute("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == name)),
                Condition::Id(name) => attribute("id").as_deref() == Some(name.as_str()),
                Condition::HasAttribute(name) => attribute(name).is_some(),
                Condition::AttributeEquals(name, value) => {
                    attribute(name).as_deref() == Some(value.as_str())
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(attrs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            attrs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_class_and_attribute_compound() {
        let selector = Selector::parse(".mark-notification[data-id=\"42\"]").unwrap();
        let attrs = [("class", "mark-notification btn"), ("data-id", "42")];
        assert!(selector.matches("a", lookup(&attrs)));

        let other = [("class", "mark-notification"), ("data-id", "43")];
        assert!(!selector.matches("a", lookup(&other)));
    }

    #[test]
    fn test_groups_match_any() {
        let selector = Selector::parse(".notification, .notification-box").unwrap();
        assert!(selector.matches("li", lookup(&[("class", "notification-box unread")])));
        assert!(selector.matches("div", lookup(&[("class", "notification")])));
        assert!(!selector.matches("div", lookup(&[("class", "notifications")])));
    }

    #[test]
    fn test_tag_id_and_unquoted_values() {
        let selector = Selector::parse("span#count[data-nf-id=7]").unwrap();
        let attrs = [("id", "count"), ("data-nf-id", "7")];
        assert!(selector.matches("SPAN", lookup(&attrs)));
        assert!(!selector.matches("div", lookup(&attrs)));
    }

    #[test]
    fn test_quoted_value_with_comma_and_escape() {
        let selector = Selector::parse("[data-id=\"a,\\\"b\"]").unwrap();
        assert!(selector.matches("a", lookup(&[("data-id", "a,\"b")])));
    }

    #[test]
    fn test_combinators_rejected() {
        assert!(Selector::parse(".list .item").is_err());
        assert!(Selector::parse(".list > .item").is_err());
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse(".a,").is_err());
    }
}
