use once_cell::sync::Lazy;
use regex::Regex;

static QUALIFIED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"?(?P<qualifier>[A-Za-z_][A-Za-z0-9_]*)"?\s*\.\s*"?(?P<name>[A-Za-z_][A-Za-z0-9_]*|\*)"?$"#)
        .expect("qualified name pattern is valid")
});

pub struct Literal;

impl Literal {
    /// Removes one layer of matching single or double quotes. A doubled quote
    /// inside the stripped layer collapses to one.
    pub fn unquote(text: &str) -> String {
        let mut chars = text.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if first == last && (first == '\'' || first == '"') => {
                let inner = &text[1..text.len() - 1];
                let doubled = format!("{first}{first}");
                inner.replace(&doubled, &first.to_string())
            },
            _ => text.to_string(),
        }
    }

    /// Single-quoted rendering that `unquote` turns back into `value`.
    pub fn quote(value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// `table.column` and `"table"."column"` become `column`; anything else is
    /// only unquoted.
    pub fn strip_qualifier(text: &str) -> String {
        match QUALIFIED_NAME.captures(text) {
            Some(captures) => captures["name"].to_string(),
            None => Self::unquote(text),
        }
    }

    /// `"schema"."table"` becomes `schema.table`; anything else is only
    /// unquoted.
    pub fn normalize_identifier(text: &str) -> String {
        match QUALIFIED_NAME.captures(text) {
            Some(captures) => format!("{}.{}", &captures["qualifier"], &captures["name"]),
            None => Self::unquote(text),
        }
    }
}
