use std::cell::RefCell;
use std::rc::Rc;

/// Mutable, user-level state of one interpreter session.
///
/// Currently this is the prompt string. A `Session` is a cheap handle: clones share
/// the same state, so command callbacks can capture one and change the prompt
/// while the interpreter is running. Changes show up at the next prompt.
#[derive(Debug, Clone, Default)]
pub struct Session {
    prompt: Rc<RefCell<String>>,
}

impl Session {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Rc::new(RefCell::new(prompt.into())),
        }
    }

    /// The current prompt string.
    pub fn prompt(&self) -> String {
        self.prompt.borrow().clone()
    }

    /// Replace the prompt string.
    pub fn set_prompt(&self, prompt: impl Into<String>) {
        *self.prompt.borrow_mut() = prompt.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_clones_share_prompt() {
        let session = Session::new(">>> ");
        let handle = session.clone();
        assert_eq!(handle.prompt(), ">>> ");

        handle.set_prompt("$ ");
        assert_eq!(session.prompt(), "$ ");
    }
}
