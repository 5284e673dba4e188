//! Line-based console over any reader/writer pair.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show a prompt and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_and_detects_end_of_input() {
        let mut console = Console::new(Cursor::new("  Honda \n"), Vec::new());
        assert_eq!(console.ask("Brand: ").unwrap(), Some("Honda".to_string()));
        assert_eq!(console.ask("Brand: ").unwrap(), None);
        assert_eq!(String::from_utf8_lossy(console.output()), "Brand: Brand: ");
    }
}
