use crate::html;
use crate::Options;

use std::io;
use std::io::Write;

/// The output side of the HTML formatter: wraps the writer and remembers
/// whether the last byte written was a newline.
pub struct Context<'o> {
    output: &'o mut dyn Write,
    last_was_lf: bool,

    /// The options rendering was started with.
    pub options: &'o Options,
}

impl<'o> Context<'o> {
    /// Starts rendering into `output`.
    pub fn new(output: &'o mut dyn Write, options: &'o Options) -> Self {
        Context {
            output,
            last_was_lf: true,
            options,
        }
    }

    /// Writes a newline unless one was just written.
    pub fn cr(&mut self) -> io::Result<()> {
        if !self.last_was_lf {
            self.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Writes `buffer` with `&`, `<`, `>` and `"` escaped.
    pub fn escape(&mut self, buffer: &str) -> io::Result<()> {
        html::escape(self, buffer.as_bytes())
    }

    /// Writes a URL for an attribute value, percent-encoding as needed.
    /// Dangerous URLs come out empty unless raw HTML is allowed.
    pub fn escape_href(&mut self, url: &str) -> io::Result<()> {
        if !self.options.render.unsafe_ && html::dangerous_url(url) {
            return Ok(());
        }
        html::escape_href(self, url.as_bytes())
    }
}

impl<'o> Write for Context<'o> {
    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.output.write(buf)?;
        if written > 0 {
            self.last_was_lf = buf[written - 1] == b'\n';
        }
        Ok(written)
    }
}

impl<'o> std::fmt::Debug for Context<'o> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        formatter.write_str("<quire::html::Context>")
    }
}
