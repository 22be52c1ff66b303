use std::fmt;
use std::io::{self, Read, Write};

use bytes::Bytes;

/// A response body that knows how to write itself.
///
/// Bodies are consumed by writing, so a streaming source can be forwarded
/// without being collected first.
pub trait Body: Send + 'static {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()>;
}

impl Body for () {
    fn write_to(self: Box<Self>, _sink: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

impl Body for Vec<u8> {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self)
    }
}

impl Body for String {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(self.as_bytes())
    }
}

impl Body for &'static str {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(self.as_bytes())
    }
}

impl Body for &'static [u8] {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self)
    }
}

impl Body for Bytes {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        sink.write_all(&self)
    }
}

/// Copies everything from a reader into the sink.
pub struct ReaderBody<R>(pub R);

impl<R: Read + Send + 'static> Body for ReaderBody<R> {
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        let mut reader = self.0;
        io::copy(&mut reader, sink)?;
        Ok(())
    }
}

/// A body produced by a closure that writes into the sink.
pub struct WriteFn<F>(pub F);

impl<F> Body for WriteFn<F>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()> + Send + 'static,
{
    fn write_to(self: Box<Self>, sink: &mut dyn Write) -> io::Result<()> {
        (self.0)(sink)
    }
}

impl<R> fmt::Debug for ReaderBody<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ReaderBody(..)")
    }
}

impl<F> fmt::Debug for WriteFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WriteFn(..)")
    }
}
