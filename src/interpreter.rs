use crate::builtin;
use crate::command::{CommandRegistry, Handler};
use crate::config::InterpreterConfig;
use crate::env::Session;
use crate::io_adapters::{EditorSource, FrameReader, LineSource, ReadFault};
use crate::lexer::Expression;
use crate::value::Value;
use anyhow::Context;
use std::io::{self, BufRead, Write};

/// A line-oriented command interpreter.
///
/// The interpreter reads lines from its source, splits each into a command name
/// and arguments, and calls the callback registered under that name with the
/// arguments and the output sink. A failing line never ends the session: errors
/// are reported to the diagnostic sink and the next line is read.
///
/// Example
/// ```
/// use line_commands::Interpreter;
/// use std::io::{Cursor, Write};
///
/// let mut out = Vec::new();
/// let mut sh = Interpreter::new(Cursor::new("add 1 -5 0xab\n"), &mut out);
/// sh.register_command("add", |args, out| {
///     let mut sum = 0i64;
///     for arg in args {
///         sum += arg.parse::<i64>()?;
///     }
///     writeln!(out, "{sum}")?;
///     Ok(())
/// });
/// sh.run(false).unwrap();
/// drop(sh);
/// assert_eq!(out, b"167\n");
/// ```
pub struct Interpreter<'a, S> {
    source: S,
    output: Box<dyn Write + 'a>,
    tty: Box<dyn Write + 'a>,
    diagnostics: Box<dyn Write + 'a>,
    separator: char,
    session: Session,
    registry: CommandRegistry<'a>,
}

impl<'a, R: BufRead> Interpreter<'a, FrameReader<R>> {
    /// Create an interpreter with the default configuration, reading lines from
    /// `input` and writing command output to `output`.
    pub fn new(input: R, output: impl Write + 'a) -> Self {
        Self::with_config(input, output, InterpreterConfig::default())
    }

    /// Like [`Interpreter::new`], with framing, prompt and separator taken from `config`.
    pub fn with_config(input: R, output: impl Write + 'a, config: InterpreterConfig) -> Self {
        let source = FrameReader::new(input, config.frame_end, config.max_line_len);
        Self::from_source(source, output, config)
    }
}

impl<'a> Interpreter<'a, EditorSource> {
    /// Create an interpreter reading from the terminal through a line editor.
    ///
    /// The editor renders the prompt itself, so the prompt sink is not used.
    pub fn interactive(output: impl Write + 'a, config: InterpreterConfig) -> anyhow::Result<Self> {
        let source = EditorSource::new(config.max_line_len).context("failed to start line editor")?;
        Ok(Self::from_source(source, output, config))
    }
}

impl<'a, S: LineSource> Interpreter<'a, S> {
    /// Create an interpreter over any [`LineSource`].
    ///
    /// Only the prompt and separator of `config` are used here; framing is up to the source.
    pub fn from_source(source: S, output: impl Write + 'a, config: InterpreterConfig) -> Self {
        Self {
            source,
            output: Box::new(output),
            tty: Box::new(io::sink()),
            diagnostics: Box::new(io::stderr()),
            separator: config.separator,
            session: Session::new(config.prompt),
            registry: CommandRegistry::new(),
        }
    }

    /// Echo the prompt to `tty` before each line. Prompts are discarded by default.
    pub fn prompt_sink(mut self, tty: impl Write + 'a) -> Self {
        self.tty = Box::new(tty);
        self
    }

    /// Report failing commands to `diagnostics` instead of standard error.
    pub fn diagnostic_sink(mut self, diagnostics: impl Write + 'a) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    /// Register `callback` under `name` without a description.
    ///
    /// An existing command with the same name, the built-in `help` included, is replaced.
    pub fn register_command<F>(&mut self, name: impl Into<String>, callback: F)
    where
        F: FnMut(&[Value], &mut dyn Write) -> anyhow::Result<()> + 'a,
    {
        self.register_command_with_help(name, callback, "");
    }

    /// Register `callback` under `name` with a description shown by `help`.
    pub fn register_command_with_help<F>(&mut self, name: impl Into<String>, callback: F, help: impl Into<String>)
    where
        F: FnMut(&[Value], &mut dyn Write) -> anyhow::Result<()> + 'a,
    {
        self.registry.insert(name, Handler::callback(callback), help);
    }

    /// Change the prompt shown before the next line.
    pub fn set_prompt_string(&mut self, prompt: impl Into<String>) {
        self.session.set_prompt(prompt);
    }

    /// A handle on the session state, for callbacks that change the prompt.
    pub fn session(&self) -> Session {
        self.session.clone()
    }

    /// Read and dispatch lines until the input is exhausted.
    ///
    /// Returns `Ok(())` at the end of input or when the source fails. Errors of
    /// individual commands are written to the diagnostic sink, unless
    /// `stop_on_error` is set, in which case the first one is returned.
    pub fn run(&mut self, stop_on_error: bool) -> anyhow::Result<()> {
        loop {
            let prompt = self.session.prompt();
            let line = match self.source.read_line(&prompt, &mut *self.tty) {
                Ok(line) => line,
                Err(ReadFault::LineTooLong(limit)) => {
                    log::debug!("skipped a line longer than {limit} bytes");
                    continue;
                }
                Err(ReadFault::EndOfInput) => return Ok(()),
                Err(ReadFault::Fatal(e)) => {
                    log::debug!("stopped reading: {e}");
                    return Ok(());
                }
            };

            if let Err(e) = self.execute(&line) {
                if stop_on_error {
                    return Err(e);
                }
                log::warn!("command failed: {e:#}");
                if let Err(e) = writeln!(self.diagnostics, "{e:#}") {
                    log::trace!("failed to report error: {e}");
                }
            }
        }
    }

    /// Dispatch a single line.
    ///
    /// Blank lines do nothing. Unknown commands print a notice followed by the
    /// `help` listing. Errors from the command callback are returned.
    pub fn execute(&mut self, line: &str) -> anyhow::Result<()> {
        let expression: Expression = Expression::parse(line, self.separator);
        match expression.into_parts() {
            Some((command, args)) => self.invoke(&command, &args),
            None => Ok(()),
        }
    }

    fn invoke(&mut self, command: &str, args: &[Value]) -> anyhow::Result<()> {
        match self.registry.resolve(command) {
            Ok(entry) => match &mut entry.handler {
                Handler::Callback(callback) => {
                    log::debug!("dispatching {command} with {} argument(s)", args.len());
                    callback(args, &mut *self.output)
                }
                Handler::Help => Ok(builtin::help(&self.registry, args, &mut *self.output)?),
            },
            Err(e) => {
                log::debug!("{e}");
                writeln!(self.output, "{e}")?;
                self.invoke_help()
            }
        }
    }

    /// Run whatever is registered as `help`, without arguments.
    fn invoke_help(&mut self) -> anyhow::Result<()> {
        match self.registry.resolve("help") {
            Ok(entry) => match &mut entry.handler {
                Handler::Callback(callback) => callback(&[], &mut *self.output),
                Handler::Help => Ok(builtin::help(&self.registry, &[], &mut *self.output)?),
            },
            Err(_) => Ok(()),
        }
    }
}
