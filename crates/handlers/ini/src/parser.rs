use crate::error::IniError;
use crate::section::Section;
use anymod_domain::constants::DEFAULT_SECTION;
use indexmap::IndexMap;
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use std::borrow::Cow;

#[derive(Parser)]
#[grammar = "ini.pest"]
struct IniParser;

/// Parsed sections in document order.
pub type Sections = IndexMap<String, Section>;

/// Parses an INI document.
///
/// - keys are trimmed and lowercased, values trimmed;
/// - a line indented deeper than the key above it continues that key's value, joined
///   with `\n`; other indented lines are read as headers or entries;
/// - a repeated section replaces the earlier one, a repeated key keeps the last value;
/// - fields of `[DEFAULT]` are inherited by every other section.
///
/// # Errors
/// [`IniError::Syntax`] when the grammar rejects the document, and the structural
/// variants of [`IniError`] otherwise.
pub fn parse(text: &str) -> Result<Sections, IniError> {
    let file = IniParser::parse(Rule::file, text)
        .map_err(|e| IniError::from(Box::new(e)))?
        .next()
        .ok_or(IniError::MissingSectionHeader { message: Cow::Borrowed("empty parse tree"), context: None })?;

    let mut sections: Sections = IndexMap::new();
    let mut current: Option<String> = None;
    // Key of the last entry and the indent of its line.
    let mut last: Option<(String, usize)> = None;

    for record in file.into_inner().filter(|pair| pair.as_rule() == Rule::record) {
        let line = record.line_col().0;
        let mut parts = record.into_inner();
        let indent = parts.next().map_or(0, |p| p.as_str().len());
        let Some(content) = parts.next().and_then(|p| p.into_inner().next()) else {
            continue;
        };

        if let Some((key, key_indent)) = &last
            && indent > *key_indent
            && let Some(field) =
                current.as_ref().and_then(|name| sections.get_mut(name)).and_then(|s| s.get_mut(key))
        {
            field.push('\n');
            field.push_str(content.as_str().trim());
            continue;
        }

        match content.as_rule() {
            Rule::header => {
                let name = inner_str(content).trim().to_owned();
                if name.is_empty() {
                    return Err(IniError::EmptySectionName {
                        message: Cow::Borrowed("`[]` does not name a section"),
                        context: Some(format!("line {line}").into()),
                    });
                }
                // Last one wins: drop the earlier body and move the section to the end.
                sections.shift_remove(&name);
                sections.insert(name.clone(), Section::default());
                current = Some(name);
                last = None;
            }
            Rule::entry => {
                let Some(section) = current.as_ref().and_then(|name| sections.get_mut(name)) else {
                    return Err(IniError::MissingSectionHeader {
                        message: format!("'{}' appears before any [section]", content.as_str().trim())
                            .into(),
                        context: Some(format!("line {line}").into()),
                    });
                };
                let mut inner = content.into_inner();
                let key = inner.next().map_or("", |p| p.as_str()).trim().to_ascii_lowercase();
                let value = inner.next().map_or("", |p| p.as_str()).trim().to_owned();
                section.insert(key.clone(), value);
                last = Some((key, indent));
            }
            _ => {
                return Err(IniError::MalformedLine {
                    message: format!("'{}' has no '=' or ':' and follows no key", content.as_str().trim())
                        .into(),
                    context: Some(format!("line {line}").into()),
                });
            }
        }
    }

    inherit_defaults(&mut sections);
    Ok(sections)
}

fn inner_str(pair: Pair<'_, Rule>) -> &str {
    pair.into_inner().next().map_or("", |p| p.as_str())
}

fn inherit_defaults(sections: &mut Sections) {
    let Some(defaults) = sections.get(DEFAULT_SECTION).cloned() else {
        return;
    };

    for (name, section) in sections.iter_mut() {
        if name != DEFAULT_SECTION {
            section.inherit(&defaults);
        }
    }
}
