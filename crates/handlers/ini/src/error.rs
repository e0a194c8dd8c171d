use crate::parser::Rule;
use std::borrow::Cow;

/// Reasons an INI document is rejected.
#[anymod_derive::anymod_error]
pub enum IniError {
    #[error("Syntax error{}: {source}", format_context(.context))]
    Syntax { source: Box<pest::error::Error<Rule>>, context: Option<Cow<'static, str>> },

    #[error("File contains no section headers{}: {message}", format_context(.context))]
    MissingSectionHeader { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Line is not a header, an entry or a continuation{}: {message}", format_context(.context))]
    MalformedLine { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Empty section name{}: {message}", format_context(.context))]
    EmptySectionName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

