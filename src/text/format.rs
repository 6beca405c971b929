use std::fmt::{self, Write};

/// Returns the number of bytes `args` formats to, without allocating.
pub(crate) fn formatted_len(args: fmt::Arguments<'_>) -> usize {
    struct Counter(usize);

    impl Write for Counter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.0 += s.len();
            Ok(())
        }
    }

    let mut counter = Counter(0);
    // An error here is reported by the second, writing pass.
    let _ = fmt::write(&mut counter, args);
    counter.0
}

/// Fills a buffer whose final length has already been computed, front to back.
pub(crate) struct SliceWriter<'b> {
    buf: &'b mut [u8],
    pos: usize,
}

impl<'b> SliceWriter<'b> {
    pub(crate) const fn new(buf: &'b mut [u8]) -> SliceWriter<'b> {
        SliceWriter { buf, pos: 0 }
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    pub(crate) fn push_repeated(&mut self, byte: u8, count: usize) {
        self.buf[self.pos..self.pos + count].fill(byte);
        self.pos += count;
    }

    pub(crate) const fn is_full(&self) -> bool {
        self.pos == self.buf.len()
    }
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.buf.len() - self.pos < s.len() {
            return Err(fmt::Error);
        }
        self.push(s.as_bytes());
        Ok(())
    }
}
