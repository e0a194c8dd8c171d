use std::borrow::Cow;

/// Misuse of a [`JsonUnit`](crate::JsonUnit) access operation.
#[anymod_derive::anymod_error]
pub enum JsonError {
    #[error("Operation does not fit the document shape{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Key not found{}: {message}", format_context(.context))]
    KeyNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Index out of range{}: {message}", format_context(.context))]
    IndexOutOfRange { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unit is not populated{}: {message}", format_context(.context))]
    NotPopulated { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl JsonError {
    pub(crate) fn mismatch(operation: &str, shape: &str) -> Self {
        Self::TypeMismatch { message: format!("`{operation}` is not supported on {shape}").into(), context: None }
    }

    pub(crate) fn missing_key(key: &str) -> Self {
        Self::KeyNotFound { message: format!("'{key}'").into(), context: None }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { message: format!("index {index}, length {len}").into(), context: None }
    }

    pub(crate) const fn not_populated() -> Self {
        Self::NotPopulated { message: Cow::Borrowed("call populate first"), context: None }
    }
}
