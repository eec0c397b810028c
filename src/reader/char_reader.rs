//! Character reader abstraction.
//!
//! This module provides the [CharReader] trait: a cursor-based streaming
//! protocol with mark/reset support. The end of the stream is reported as
//! `None`, never as an error.

use crate::reader::reader_error::ReaderError;
use std::fmt;

/// Number of characters moved per bulk read in the provided draining methods.
const TRANSFER_CHUNK: usize = 256;

// =#========================================================================#=
// CHAR READER (Trait)
// =#========================================================================T=
/// Trait defining the interface of a sequential character reader.
///
/// Implementors provide single-character reads, bulk reads into a caller
/// buffer, skipping, and mark/reset repositioning. The draining helpers
/// ([read_buf](CharReader::read_buf),
/// [read_to_string](CharReader::read_to_string),
/// [transfer_to](CharReader::transfer_to)) are built on top of these.
///
/// The trait is object safe, so `&mut dyn CharReader` can be handed to
/// consumers that do not care about the concrete source.
pub trait CharReader {
    /// Releases the reader.
    ///
    /// What this means is up to the implementor; see the implementor's
    /// documentation for whether the reader remains usable afterwards.
    fn close(&mut self);

    /// Marks the current position, so that [reset](CharReader::reset)
    /// returns to it.
    ///
    /// # Arguments
    /// * `read_ahead_limit` - How many characters may be read while
    ///   preserving the mark; implementors may ignore it
    fn mark(&mut self, read_ahead_limit: usize);

    /// Whether [mark](CharReader::mark) and [reset](CharReader::reset) are
    /// supported.
    fn mark_supported(&self) -> bool;

    /// Reads a single character and advances past it.
    ///
    /// # Returns
    /// * `Some(char)` - The next character
    /// * `None` - If the end of the stream has been reached
    fn read_char(&mut self) -> Option<char>;

    /// Reads up to `count` characters into `buf[offset..offset + count]`.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - Number of characters read, short only at the end
    ///   of the stream
    /// * `Ok(None)` - If the end of the stream had already been reached
    ///
    /// # Errors
    /// [ReaderError::OutOfBounds] if the window does not fit into `buf`.
    fn read_into(
        &mut self,
        buf: &mut [char],
        offset: usize,
        count: usize,
    ) -> Result<Option<usize>, ReaderError>;

    /// Moves back to the last marked position.
    fn reset(&mut self);

    /// Skips up to `n` characters.
    ///
    /// # Returns
    /// * `Ok(Some(n))` - Number of characters actually skipped
    /// * `Ok(None)` - If the end of the stream had already been reached
    ///
    /// # Errors
    /// [ReaderError::NegativeSkip] if `n` is negative.
    fn skip(&mut self, n: i64) -> Result<Option<usize>, ReaderError>;

    /// Reads into the whole of `buf`.
    ///
    /// Equivalent to `read_into(buf, 0, buf.len())`.
    fn read_buf(&mut self, buf: &mut [char]) -> Result<Option<usize>, ReaderError> {
        let len = buf.len();
        self.read_into(buf, 0, len)
    }

    /// Reads all remaining characters and appends them to `out`.
    ///
    /// # Returns
    /// Number of characters appended
    fn read_to_string(&mut self, out: &mut String) -> usize {
        let mut chunk = ['\0'; TRANSFER_CHUNK];
        let mut total = 0;
        while let Ok(Some(n)) = self.read_buf(&mut chunk) {
            if n == 0 {
                break;
            }
            out.extend(&chunk[..n]);
            total += n;
        }
        total
    }

    /// Writes all remaining characters to `out`.
    ///
    /// # Returns
    /// Number of characters written
    ///
    /// # Errors
    /// Propagates the first error of `out`; characters read up to that point
    /// are consumed.
    fn transfer_to(&mut self, out: &mut dyn fmt::Write) -> Result<usize, fmt::Error> {
        let mut chunk = ['\0'; TRANSFER_CHUNK];
        let mut total = 0;
        while let Ok(Some(n)) = self.read_buf(&mut chunk) {
            if n == 0 {
                break;
            }
            for &c in &chunk[..n] {
                out.write_char(c)?;
            }
            total += n;
        }
        Ok(total)
    }
}

impl<R: CharReader + ?Sized> CharReader for &mut R {
    fn close(&mut self) {
        (**self).close()
    }

    fn mark(&mut self, read_ahead_limit: usize) {
        (**self).mark(read_ahead_limit)
    }

    fn mark_supported(&self) -> bool {
        (**self).mark_supported()
    }

    fn read_char(&mut self) -> Option<char> {
        (**self).read_char()
    }

    fn read_into(
        &mut self,
        buf: &mut [char],
        offset: usize,
        count: usize,
    ) -> Result<Option<usize>, ReaderError> {
        (**self).read_into(buf, offset, count)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn skip(&mut self, n: i64) -> Result<Option<usize>, ReaderError> {
        (**self).skip(n)
    }
}
