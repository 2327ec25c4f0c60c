use std::borrow::Cow;

use crate::error::{Error, Result};

const DEFAULT_LEFT: &str = "{{";
const DEFAULT_RIGHT: &str = "}}";

/// Action delimiters used when parsing template source.
///
/// Handlebars only understands `{{` and `}}`, so custom delimiters are
/// rewritten into the native ones before compilation and any native `{{`
/// left in plain text is escaped so it renders literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delims {
    left: String,
    right: String,
}

impl Default for Delims {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT.to_string(),
            right: DEFAULT_RIGHT.to_string(),
        }
    }
}

impl Delims {
    /// An empty string selects the default for that side
    pub fn new(left: &str, right: &str) -> Self {
        let pick = |value: &str, fallback: &str| {
            if value.is_empty() {
                fallback.to_string()
            } else {
                value.to_string()
            }
        };

        Self {
            left: pick(left, DEFAULT_LEFT),
            right: pick(right, DEFAULT_RIGHT),
        }
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }

    pub fn is_default(&self) -> bool {
        self.left == DEFAULT_LEFT && self.right == DEFAULT_RIGHT
    }

    /// Rewrite `text` into handlebars syntax.
    ///
    /// `name` is only used to label an unclosed action.
    pub(crate) fn translate<'a>(&self, name: &str, text: &'a str) -> Result<Cow<'a, str>> {
        if self.is_default() {
            return Ok(Cow::Borrowed(text));
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find(&self.left) {
            push_literal(&mut out, &rest[..start]);

            let action = &rest[start + self.left.len()..];
            let end = action.find(&self.right).ok_or_else(|| Error::UnclosedAction {
                name: name.to_string(),
                right: self.right.clone(),
            })?;

            push_open(&mut out, true);
            out.push_str(&action[..end]);
            out.push_str(DEFAULT_RIGHT);

            rest = &action[end + self.right.len()..];
        }
        push_literal(&mut out, rest);

        Ok(Cow::Owned(out))
    }
}

fn push_literal(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(start) = rest.find(DEFAULT_LEFT) {
        out.push_str(&rest[..start]);
        push_open(out, false);
        rest = &rest[start + DEFAULT_LEFT.len()..];
    }
    out.push_str(rest);
}

/// Emit a native `{{`, either opening an action or as literal text.
///
/// Handlebars reads `\{{` as a literal `{{` and a run of n > 1 backslashes
/// before `{{` as n - 1 backslashes plus an action. Backslashes already in
/// `out` get one more, and a literal `{{` after them is split off with an
/// empty comment.
fn push_open(out: &mut String, live: bool) {
    let trailing = out.len() - out.trim_end_matches('\\').len();
    if trailing > 0 {
        out.push('\\');
        if !live {
            out.push_str("{{!}}");
        }
    }
    if !live {
        out.push('\\');
    }
    out.push_str(DEFAULT_LEFT);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_delims_borrow_source() {
        let delims = Delims::default();
        let translated = delims.translate("t", "Hello {{name}}").unwrap();

        assert!(matches!(translated, Cow::Borrowed(_)));
        assert_eq!(translated, "Hello {{name}}");
    }

    #[test]
    fn test_empty_side_falls_back_to_default() {
        let delims = Delims::new("", ">>");

        assert_eq!(delims.left(), "{{");
        assert_eq!(delims.right(), ">>");
        assert!(!delims.is_default());
        assert!(Delims::new("", "").is_default());
    }

    #[test]
    fn test_custom_delims_are_rewritten() {
        let delims = Delims::new("[[", "]]");
        let translated = delims.translate("t", "[[#if ok]]yes[[/if]] [[name]]").unwrap();

        assert_eq!(translated, "{{#if ok}}yes{{/if}} {{name}}");
    }

    #[test]
    fn test_native_braces_in_text_are_escaped() {
        let delims = Delims::new("<%", "%>");
        let translated = delims.translate("t", "{{raw}} <% name %>").unwrap();

        assert_eq!(translated, "\\{{raw}} {{ name }}");
    }

    #[test]
    fn test_backslash_before_action_stays_literal() {
        let delims = Delims::new("<%", "%>");

        assert_eq!(delims.translate("t", r"dir\<%name%>").unwrap(), r"dir\\{{name}}");
        assert_eq!(delims.translate("t", r"a\\<%n%>").unwrap(), r"a\\\{{n}}");
    }

    #[test]
    fn test_backslash_before_native_braces_stays_literal() {
        let delims = Delims::new("<%", "%>");
        let translated = delims.translate("t", r"a\{{b}} <%n%>").unwrap();

        assert_eq!(translated, r"a\\{{!}}\{{b}} {{n}}");
    }

    #[test]
    fn test_unclosed_action() {
        let delims = Delims::new("[[", "]]");
        let err = delims.translate("page", "Hello [[name").unwrap_err();

        match err {
            Error::UnclosedAction { name, right } => {
                assert_eq!(name, "page");
                assert_eq!(right, "]]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
