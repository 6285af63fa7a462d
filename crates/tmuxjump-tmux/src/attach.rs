//! The `tmux attach` command handed to a terminal.

/// Argv of an attach command, renderable as a shell string for typing into a
/// terminal or embedding in AppleScript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachCommand {
    argv: Vec<String>,
}

impl AttachCommand {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// Space-joined argv with each word shell-quoted where needed.
    pub fn to_shell_string(&self) -> String {
        self.argv
            .iter()
            .map(|word| shell_quote(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Wraps in single quotes if the word contains whitespace, quotes, backslashes
/// or shell metacharacters. Single quotes inside are escaped as `'\''`.
fn shell_quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if word.contains(|c: char| {
        c.is_whitespace()
            || matches!(
                c,
                '\'' | '"' | '\\' | '$' | '`' | '!' | '&' | ';' | '|' | '<' | '>' | '(' | ')' | '*' | '?' | '#' | '~'
            )
    }) {
        format!("'{}'", word.replace('\'', "'\\''"))
    } else {
        word.to_string()
    }
}
