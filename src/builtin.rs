use crate::command::CommandRegistry;
use crate::value::Value;
use std::io::{self, Write};

/// Width of the name column in the command listing.
const NAME_WIDTH: usize = 10;

/// The built-in `help` command.
///
/// Without arguments lists every command with its description. With arguments,
/// describes the command named by the first one.
pub(crate) fn help(registry: &CommandRegistry<'_>, args: &[Value], out: &mut dyn Write) -> io::Result<()> {
    let Some(topic) = args.first() else {
        writeln!(out, "Available functions:")?;
        for (name, help) in registry.iter() {
            writeln!(out, "{name:<NAME_WIDTH$}{help}")?;
        }
        return Ok(());
    };

    match registry.help_text(topic.as_str()) {
        Some("") => writeln!(out, "no help available"),
        Some(help) => writeln!(out, "{help}"),
        None => writeln!(out, "not a command"),
    }
}
