//! Output sink for the native print functions.

use crate::error::{Result, RuntimeError};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Cloneable handle to where `print` and `println` write
///
/// Clones share the same sink, so a buffer console handed to an interpreter
/// can be inspected afterwards through the original handle.
#[derive(Debug, Clone)]
pub struct Console {
    sink: Rc<RefCell<Sink>>,
}

#[derive(Debug)]
enum Sink {
    Stdout,
    Buffer(String),
}

impl Console {
    /// Console writing straight to process stdout
    pub fn stdout() -> Self {
        Self {
            sink: Rc::new(RefCell::new(Sink::Stdout)),
        }
    }

    /// Console capturing everything written into memory
    pub fn buffer() -> Self {
        Self {
            sink: Rc::new(RefCell::new(Sink::Buffer(String::new()))),
        }
    }

    pub fn write(&self, text: &str) -> Result<()> {
        match &mut *self.sink.borrow_mut() {
            Sink::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(text.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(RuntimeError::output)
            }
            Sink::Buffer(buffer) => {
                buffer.push_str(text);
                Ok(())
            }
        }
    }

    /// Everything captured so far; always empty for a stdout console
    pub fn contents(&self) -> String {
        match &*self.sink.borrow() {
            Sink::Stdout => String::new(),
            Sink::Buffer(buffer) => buffer.clone(),
        }
    }

    pub fn is_buffered(&self) -> bool {
        matches!(&*self.sink.borrow(), Sink::Buffer(_))
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_captures_writes() {
        let console = Console::buffer();
        console.write("hello").unwrap();
        console.write(" world\n").unwrap();
        assert_eq!(console.contents(), "hello world\n");
        assert!(console.is_buffered());
    }

    #[test]
    fn test_clones_share_the_sink() {
        let console = Console::buffer();
        let handle = console.clone();
        handle.write("shared").unwrap();
        assert_eq!(console.contents(), "shared");
    }

    #[test]
    fn test_stdout_has_no_contents() {
        let console = Console::stdout();
        assert_eq!(console.contents(), "");
        assert!(!console.is_buffered());
    }
}
