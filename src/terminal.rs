use dialoguer::{theme::ColorfulTheme, Input};

/// Reads one line of input for the given prompt. Empty input is allowed;
/// callers decide what a blank line means. Returns `None` when stdin closes
/// or the prompt is interrupted — that is cancellation of whatever the
/// caller was doing, never a fatal error.
pub fn prompt(message: &str) -> Option<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .allow_empty(true)
        .interact()
        .ok()
}
