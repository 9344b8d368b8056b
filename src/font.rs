//! Derived stylesheet for the custom font preferences.
//!
//! The four font preferences are combined into one CSS text that replaces
//! the content of a single dedicated `<style>` element. The text is a pure
//! function of the preferences; the reconciler only writes it when it
//! differs from what the element already holds.

#[cfg(test)]
#[path = "font_test.rs"]
mod font_test;

use crate::consts::FONT_SCOPE_SELECTOR;
use crate::prefs::{Choice, FontStyle, FontWeight};

/// Font preferences after normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontPrefs {
    pub url: Option<String>,
    pub family: Option<String>,
    pub weight: Option<FontWeight>,
    pub style: Option<FontStyle>,
}

/// Stylesheet text plus anything worth telling the user about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSheet {
    pub css: String,
    pub rejected_url: Option<String>,
}

/// Whether `url` may be passed to `@import`.
pub fn is_importable(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A family name that is a plain identifier goes out bare; anything else is
/// emitted as a single-quoted CSS string with quotes, backslashes and line
/// breaks escaped, so the value cannot end the declaration.
fn family_value(family: &str) -> String {
    let is_ident = family.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_');
    if is_ident && !family.starts_with(|c: char| c.is_ascii_digit()) {
        return family.to_owned();
    }
    let mut quoted = String::with_capacity(family.len() + 2);
    quoted.push('\'');
    for c in family.chars() {
        match c {
            '\'' | '\\' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' | '\r' | '\u{c}' => quoted.push(' '),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Percent-encode the characters that could end the quoted `url('...')` string.
fn import_url(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '\'' || c == '\\' || c.is_ascii_whitespace() || c.is_ascii_control() {
            encoded.push_str(&format!("%{:02X}", u32::from(c)));
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Build the stylesheet. Empty preferences yield empty CSS.
pub fn build_sheet(prefs: &FontPrefs) -> FontSheet {
    let mut rules: Vec<String> = Vec::new();
    let mut rejected_url = None;

    if let Some(url) = &prefs.url {
        if is_importable(url) {
            rules.push(format!("@import url('{}');", import_url(url)));
        } else {
            rejected_url = Some(url.clone());
        }
    }

    let mut declarations: Vec<String> = Vec::new();
    if let Some(family) = &prefs.family {
        declarations.push(format!("  font-family: {} !important;", family_value(family)));
    }
    if let Some(weight) = prefs.weight {
        declarations.push(format!("  font-weight: {} !important;", weight.keyword()));
    }
    if let Some(style) = prefs.style {
        declarations.push(format!("  font-style: {} !important;", style.keyword()));
    }
    if !declarations.is_empty() {
        rules.push(format!("{FONT_SCOPE_SELECTOR} {{\n{}\n}}", declarations.join("\n")));
    }

    FontSheet { css: rules.join("\n"), rejected_url }
}
