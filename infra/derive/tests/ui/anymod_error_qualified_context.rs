use anymod_derive::anymod_error;

#[anymod_error]
pub enum DemoError {
    #[error("Missing{}: {message}", format_context(.context))]
    Missing {
        message: std::borrow::Cow<'static, str>,
        context: Option<std::borrow::Cow<'static, str>>,
    },
}

fn main() {}
