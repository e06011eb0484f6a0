use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::error::Error;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> Result<(), Error> {
        writeln!(self.output, "{}", line)?;

        Ok(())
    }

    pub fn prompt(&mut self, label: &str) -> Result<Option<String>, Error> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);

        Ok(Some(line))
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

#[test]
fn prompt_test() {
    use std::io::Cursor;

    let mut console = Console::new(Cursor::new("first\r\n  second  \n"), Vec::new());

    assert_eq!(console.prompt("a: ").unwrap(), Some("first".into()));
    assert_eq!(console.prompt("b: ").unwrap(), Some("  second  ".into()));
    assert_eq!(console.prompt("c: ").unwrap(), None);
    console.say("done").unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    assert_eq!(output, "a: b: c: done\n");
}
