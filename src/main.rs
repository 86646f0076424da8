use anyhow::{Context, Result, bail};
use argh::FromArgs;
use line_commands::io_adapters::LineSource;
use line_commands::{FromValue, Interpreter, InterpreterConfig, Value};
use std::fmt::Display;
use std::io::{self, Write};

/// Number of LEDs driven by the `led` command.
const LED_COUNT: usize = 3;

#[derive(FromArgs)]
/// Line-oriented command interpreter demo.
struct Args {
    #[argh(option, default = "' '")]
    /// character separating the command and its arguments
    separator: char,

    #[argh(option, default = "'\\n'")]
    /// character terminating a line (ASCII only)
    frame_end: char,

    #[argh(option, default = "255")]
    /// longest accepted line in bytes; longer lines are skipped
    max_line_len: usize,

    #[argh(option, default = "String::from(\">>> \")")]
    /// initial prompt string
    prompt: String,

    #[argh(switch)]
    /// stop at the first failing command
    stop_on_error: bool,

    #[argh(switch)]
    /// echo the prompt to standard output before each line
    echo_prompt: bool,

    #[argh(switch, short = 'i')]
    /// read from the terminal through a line editor
    interactive: bool,
}

impl Args {
    fn config(&self) -> Result<InterpreterConfig> {
        let frame_end = u8::try_from(self.frame_end)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("frame end {:?} is not an ASCII character", self.frame_end))?;

        Ok(InterpreterConfig::default()
            .with_separator(self.separator)
            .with_frame_end(frame_end)
            .with_max_line_len(self.max_line_len)
            .with_prompt(self.prompt.clone()))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    let config = args.config()?;

    if args.interactive {
        let mut sh = Interpreter::interactive(io::stdout(), config)?;
        register_demo_commands(&mut sh);
        sh.run(args.stop_on_error)
    } else {
        let mut sh = Interpreter::with_config(io::stdin().lock(), io::stdout(), config);
        if args.echo_prompt {
            sh = sh.prompt_sink(io::stdout());
        }
        register_demo_commands(&mut sh);
        sh.run(args.stop_on_error)
    }
}

fn register_demo_commands<S: LineSource>(sh: &mut Interpreter<'_, S>) {
    sh.register_command_with_help(
        "add",
        |args, out| {
            let mut sum = 0i64;
            for arg in args {
                let term: i64 = arg.parse().with_context(|| format!("add: bad operand '{arg}'"))?;
                sum = sum.checked_add(term).context("add: overflow")?;
            }
            writeln!(out, "{sum}")?;
            Ok(())
        },
        "adds integers (e.g: 'add 1 -5 0xab')",
    );

    let mut leds = [false; LED_COUNT];
    sh.register_command_with_help(
        "led",
        move |args, out| {
            match args {
                [] => {
                    let status: String = leds.iter().rev().map(|&on| if on { '1' } else { '0' }).collect();
                    writeln!(out, "Led status: {status}")?;
                }
                [index, state] => {
                    let index: usize = index.parse()?;
                    let Some(led) = leds.get_mut(index) else {
                        bail!("led: index {index} out of range");
                    };
                    *led = state.parse()?;
                }
                _ => bail!("usage: led <index> <0|1>"),
            }
            Ok(())
        },
        "usage: led <index> <0|1>",
    );

    sh.register_command_with_help(
        "parse",
        |args, out| {
            for arg in args {
                writeln!(out, "parsing: '{arg}'")?;
                try_as::<i32>(arg, out)?;
                try_as::<bool>(arg, out)?;
                try_as::<u8>(arg, out)?;
                try_as::<u32>(arg, out)?;
                #[cfg(feature = "float-parse")]
                {
                    try_as::<f64>(arg, out)?;
                    try_as::<f32>(arg, out)?;
                }
            }
            Ok(())
        },
        "parse arguments to several types",
    );

    let session = sh.session();
    sh.register_command_with_help(
        "ps",
        move |args, _| {
            let Some(prompt) = args.first() else {
                bail!("usage: ps <prompt>");
            };
            session.set_prompt(prompt.as_str());
            Ok(())
        },
        "change prompt string",
    );
}

fn try_as<T: FromValue + Display>(value: &Value, out: &mut dyn Write) -> io::Result<()> {
    let name = std::any::type_name::<T>();
    match value.parse::<T>() {
        Ok(parsed) => writeln!(out, "  as {name:<16}[ {parsed} ]"),
        Err(e) => writeln!(out, "  as {name:<16}[ {e} ]"),
    }
}
