//! Transport traits for archstream
//!
//! The compression layer talks to the outside world through two callbacks: a
//! [`ByteSink`] that receives compressed chunks on the write side and a
//! [`ByteSource`] that hands out compressed chunks on the read side. Decoded
//! bytes go to any [`std::io::Write`].
//!
//! A zero-length chunk is reserved by the container format above this layer
//! as its end-of-data marker, so sinks never see one, and a source returning
//! zero bytes means end of input.

use std::io::{self, Read, Write};

/// Receives compressed chunks from a compressor session
pub trait ByteSink {
    /// Write one chunk, returning how many bytes were accepted
    ///
    /// Anything other than `Ok(chunk.len())` aborts the session.
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize>;
}

/// Supplies compressed chunks to a decompressor run
pub trait ByteSource {
    /// Read one chunk into `buf`, returning its length
    ///
    /// On entry `buf.len()` is the space the caller offers; the source may
    /// resize `buf` to fit a larger chunk. The chunk is `buf[..n]`. Returning
    /// `Ok(0)` signals end of input.
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        (**self).write_chunk(chunk)
    }
}

impl<S: ByteSink + ?Sized> ByteSink for Box<S> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        (**self).write_chunk(chunk)
    }
}

impl<R: ByteSource + ?Sized> ByteSource for &mut R {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }
}

impl<R: ByteSource + ?Sized> ByteSource for Box<R> {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }
}

/// Sink that writes every chunk to an [`io::Write`]
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped writer
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        self.inner.write_all(chunk)?;
        Ok(chunk.len())
    }
}

/// Source that reads chunks from an [`io::Read`]
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Space offered to the reader when the caller hands in an empty buffer
    const FALLBACK_LEN: usize = 4096;

    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        if buf.is_empty() {
            buf.resize(Self::FALLBACK_LEN, 0);
        }
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }
}

/// Sink backed by a closure, see [`sink_fn`]
pub struct FnSink<F> {
    f: F,
}

/// Create a sink from a closure
pub fn sink_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(&[u8]) -> io::Result<usize>,
{
    FnSink { f }
}

impl<F> ByteSink for FnSink<F>
where
    F: FnMut(&[u8]) -> io::Result<usize>,
{
    fn write_chunk(&mut self, chunk: &[u8]) -> io::Result<usize> {
        (self.f)(chunk)
    }
}

/// Source backed by a closure, see [`source_fn`]
pub struct FnSource<F> {
    f: F,
}

/// Create a source from a closure
pub fn source_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(&mut Vec<u8>) -> io::Result<usize>,
{
    FnSource { f }
}

impl<F> ByteSource for FnSource<F>
where
    F: FnMut(&mut Vec<u8>) -> io::Result<usize>,
{
    fn read_chunk(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        (self.f)(buf)
    }
}
