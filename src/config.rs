/// Prompt shown before every line unless configured otherwise.
pub const DEFAULT_PROMPT: &str = ">>> ";
/// Default size of the line buffer, terminator slot included.
const DEFAULT_BUFFER_SIZE: usize = 256;

/// Construction parameters of an [`Interpreter`](crate::Interpreter).
///
/// ```
/// use line_commands::InterpreterConfig;
///
/// let config = InterpreterConfig::default()
///     .with_separator(',')
///     .with_frame_end(b'0')
///     .with_prompt("$ ");
/// assert_eq!(config.max_line_len, 255);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Initial prompt string.
    pub prompt: String,
    /// Byte terminating one input line.
    pub frame_end: u8,
    /// Longest accepted line in bytes, terminator excluded.
    pub max_line_len: usize,
    /// Character separating the command and its arguments.
    pub separator: char,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            frame_end: b'\n',
            max_line_len: DEFAULT_BUFFER_SIZE - 1,
            separator: ' ',
        }
    }
}

impl InterpreterConfig {
    /// Prompt shown before each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Byte that terminates a line.
    pub fn with_frame_end(mut self, frame_end: u8) -> Self {
        self.frame_end = frame_end;
        self
    }

    /// Longest accepted line in bytes, terminator excluded. Longer lines are skipped.
    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Character separating the command name and its arguments.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}
