use crate::lexer::Line;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::cell::RefCell;
use std::io::{self, BufRead, ErrorKind, Read, Result as IoResult, Write};
use std::rc::Rc;

/// Reasons a source could not deliver the next line.
#[derive(Debug, thiserror::Error)]
pub enum ReadFault {
    /// The input is exhausted. A frame cut short by the end of input counts as exhausted too.
    #[error("end of input")]
    EndOfInput,
    /// The line was longer than the configured limit and has been skipped.
    #[error("line longer than {0} bytes")]
    LineTooLong(usize),
    /// The source failed and cannot be read any further.
    #[error("read failed: {0}")]
    Fatal(#[from] io::Error),
}

/// Where the interpreter gets its lines from.
pub trait LineSource {
    /// Show `prompt` and block until the next complete line is available.
    ///
    /// `tty` is the prompt sink of the interpreter; sources that render the
    /// prompt themselves may ignore it.
    fn read_line(&mut self, prompt: &str, tty: &mut dyn Write) -> Result<String, ReadFault>;
}

/// Reads lines delimited by a single terminator byte from any buffered reader.
///
/// At most `max_len` bytes are accepted per line (terminator excluded). Longer
/// lines are consumed up to and including their terminator and reported as
/// [`ReadFault::LineTooLong`].
pub struct FrameReader<R> {
    reader: R,
    frame_end: u8,
    max_len: usize,
}

impl<R: BufRead> FrameReader<R> {
    /// Frame `reader` on `frame_end`, accepting lines of up to `max_len` bytes.
    pub fn new(reader: R, frame_end: u8, max_len: usize) -> Self {
        Self {
            reader,
            frame_end,
            max_len,
        }
    }

    /// Read the next frame without its terminator.
    ///
    /// Like a C string buffer, the frame's text ends at its first NUL byte.
    pub fn read_frame(&mut self) -> Result<String, ReadFault> {
        let mut buf = Vec::new();
        let limit = (self.max_len as u64).saturating_add(1);
        let read = self
            .reader
            .by_ref()
            .take(limit)
            .read_until(self.frame_end, &mut buf)?;

        if read == 0 {
            return Err(ReadFault::EndOfInput);
        }
        if buf.last() == Some(&self.frame_end) {
            buf.pop();
            return Ok(buf.text().into_owned());
        }
        if buf.len() as u64 == limit {
            self.discard_frame()?;
            return Err(ReadFault::LineTooLong(self.max_len));
        }

        log::debug!("dropping {} bytes of unterminated input", buf.len());
        Err(ReadFault::EndOfInput)
    }

    /// Skip everything up to and including the next terminator.
    fn discard_frame(&mut self) -> IoResult<()> {
        loop {
            let (found, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(available) => available,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(());
                }
                match available.iter().position(|&b| b == self.frame_end) {
                    Some(i) => (true, i + 1),
                    None => (false, available.len()),
                }
            };
            self.reader.consume(used);
            if found {
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> LineSource for FrameReader<R> {
    fn read_line(&mut self, prompt: &str, tty: &mut dyn Write) -> Result<String, ReadFault> {
        if let Err(e) = tty.write_all(prompt.as_bytes()).and_then(|_| tty.flush()) {
            log::trace!("failed to emit prompt: {e}");
        }
        self.read_frame()
    }
}

/// Interactive line source backed by a rustyline editor.
///
/// The editor draws the prompt and keeps an in-memory history for the session.
/// Ctrl-C and Ctrl-D end the input.
pub struct EditorSource {
    editor: DefaultEditor,
    max_len: usize,
}

impl EditorSource {
    /// Start a line editor on the terminal, accepting lines of up to `max_len` bytes.
    pub fn new(max_len: usize) -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            max_len,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str, _tty: &mut dyn Write) -> Result<String, ReadFault> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                    log::debug!("history not updated: {e}");
                }
                if line.len() > self.max_len {
                    return Err(ReadFault::LineTooLong(self.max_len));
                }
                Ok(line.as_bytes().text().into_owned())
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(ReadFault::EndOfInput),
            Err(ReadlineError::Io(e)) => Err(ReadFault::Fatal(e)),
            Err(e) => Err(ReadFault::Fatal(io::Error::other(e.to_string()))),
        }
    }
}

/// Memory-backed writer whose contents stay reachable through its clones.
///
/// Handy for capturing what an interpreter printed while the interpreter is still alive.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    /// An empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Return the contents and clear the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buf.borrow_mut());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &str, frame_end: u8, max_len: usize) -> FrameReader<Cursor<Vec<u8>>> {
        FrameReader::new(Cursor::new(input.as_bytes().to_vec()), frame_end, max_len)
    }

    #[test]
    fn test_reads_frames() {
        let mut frames = reader("foo\n\nbar baz\n", b'\n', 255);
        assert_eq!(frames.read_frame().unwrap(), "foo");
        assert_eq!(frames.read_frame().unwrap(), "");
        assert_eq!(frames.read_frame().unwrap(), "bar baz");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_custom_terminator() {
        let mut frames = reader("foo,never gonna0foo,let0", b'0', 255);
        assert_eq!(frames.read_frame().unwrap(), "foo,never gonna");
        assert_eq!(frames.read_frame().unwrap(), "foo,let");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_unterminated_tail_is_end_of_input() {
        let mut frames = reader("foo\nbar", b'\n', 255);
        assert_eq!(frames.read_frame().unwrap(), "foo");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_too_long_line_is_skipped() {
        let mut frames = reader("12345\nabcdefghij\nabcd\n", b'\n', 5);
        assert_eq!(frames.read_frame().unwrap(), "12345");
        assert!(matches!(frames.read_frame(), Err(ReadFault::LineTooLong(5))));
        assert_eq!(frames.read_frame().unwrap(), "abcd");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_too_long_line_at_end_of_input() {
        let mut frames = reader("abcdefghij", b'\n', 5);
        assert!(matches!(frames.read_frame(), Err(ReadFault::LineTooLong(5))));
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_frames_end_at_nul() {
        let mut frames = reader("\0foo\nfoo\0bar baz\n", b'\n', 255);
        assert_eq!(frames.read_frame().unwrap(), "");
        assert_eq!(frames.read_frame().unwrap(), "foo");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    #[test]
    fn test_unbounded_line_length() {
        let mut frames = reader("foo\nbar baz\n", b'\n', usize::MAX);
        assert_eq!(frames.read_frame().unwrap(), "foo");
        assert_eq!(frames.read_frame().unwrap(), "bar baz");
        assert!(matches!(frames.read_frame(), Err(ReadFault::EndOfInput)));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> IoResult<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn test_read_errors_are_fatal() {
        let mut frames = FrameReader::new(io::BufReader::new(FailingReader), b'\n', 255);
        assert!(matches!(frames.read_frame(), Err(ReadFault::Fatal(_))));
    }

    #[test]
    fn test_prompt_goes_to_tty() {
        let mut frames = reader("foo\n", b'\n', 255);
        let mut tty = Vec::new();
        assert_eq!(frames.read_line("$ ", &mut tty).unwrap(), "foo");
        assert!(frames.read_line("$ ", &mut tty).is_err());
        assert_eq!(tty, b"$ $ ");
    }

    #[test]
    fn test_shared_buffer() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        write!(writer, "hello {}", 42).unwrap();
        assert_eq!(buffer.contents(), "hello 42");
        assert_eq!(buffer.take(), "hello 42");
        assert_eq!(buffer.contents(), "");
    }
}
