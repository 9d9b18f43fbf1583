use anyhow::anyhow;
use futures_util::{Stream, StreamExt};

/// Longest line accepted before the stream is treated as broken.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Splits a chunked byte stream into `\n`-terminated lines.
///
/// A trailing `\r` is stripped from each line, and a final line without a
/// terminator is still yielded once the stream ends. Lines are raw bytes; the
/// caller decides what to do with invalid UTF-8. A line longer than the limit
/// is an error, after which the reader yields nothing more.
pub struct LineReader<S> {
    inner: S,
    buf: Vec<u8>,
    // Prefix of `buf` already known to hold no newline.
    scanned: usize,
    max_line_len: usize,
    eof: bool,
}

impl<S, B, E> LineReader<S>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(inner: S) -> Self {
        Self::with_max_line_len(inner, MAX_LINE_BYTES)
    }

    pub fn with_max_line_len(inner: S, max_line_len: usize) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            scanned: 0,
            max_line_len,
            eof: false,
        }
    }

    /// Returns the next line, `None` once the stream is exhausted, or the
    /// error that interrupted it.
    pub async fn next_line(&mut self) -> Option<anyhow::Result<Vec<u8>>> {
        loop {
            if let Some(off) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') {
                let pos = self.scanned + off;
                if pos > self.max_line_len {
                    return Some(Err(self.too_long()));
                }
                let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
                self.scanned = 0;
                line.pop();
                return Some(Ok(strip_cr(line)));
            }
            self.scanned = self.buf.len();

            if self.buf.len() > self.max_line_len {
                return Some(Err(self.too_long()));
            }

            if self.eof {
                if self.buf.is_empty() {
                    return None;
                }
                let line = std::mem::take(&mut self.buf);
                self.scanned = 0;
                return Some(Ok(strip_cr(line)));
            }

            match self.inner.next().await {
                Some(Ok(chunk)) => self.buf.extend_from_slice(chunk.as_ref()),
                Some(Err(e)) => {
                    // Nothing more can be trusted after a transport error.
                    self.stop();
                    return Some(Err(anyhow::Error::new(e)));
                }
                None => self.eof = true,
            }
        }
    }

    fn too_long(&mut self) -> anyhow::Error {
        self.stop();
        anyhow!("line exceeds {} bytes", self.max_line_len)
    }

    fn stop(&mut self) {
        self.eof = true;
        self.buf.clear();
        self.scanned = 0;
    }
}

fn strip_cr(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}
