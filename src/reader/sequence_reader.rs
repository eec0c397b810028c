//! In-memory character reader over a borrowed [CharSequence].

use crate::reader::char_reader::CharReader;
use crate::reader::char_sequence::{CharHint, CharSequence};
use crate::reader::reader_error::ReaderError;
use log::{debug, trace};
use std::fmt;

// =#========================================================================#=
// SEQUENCE READER
// =#========================================================================$=
/// A [CharReader] over a character sequence that is already in memory.
///
/// The reader borrows the sequence; it never copies it and never takes
/// ownership. Reads go straight to the sequence by index, so there is no
/// read-ahead buffer and [mark](CharReader::mark) works for any distance.
/// For string sources, the reader remembers where the cursor lies in the
/// underlying bytes, so reading front to back stays linear overall.
///
/// The length of the sequence is captured once, at construction. Reads stop
/// at that length even if a shared backing buffer (see the `RefCell`
/// implementation of [CharSequence]) has grown since, and may stop early if
/// it has shrunk. [skip](CharReader::skip) is the exception: it looks at the
/// live length of the sequence.
///
/// Not meant for use from several places at once. Mutating the backing
/// buffer while a reader is in use is the caller's responsibility.
///
/// # Example
/// ```
/// use charseq::{CharReader, SequenceReader};
///
/// let mut reader = SequenceReader::new("hello");
/// assert_eq!(reader.read_char(), Some('h'));
/// reader.mark(0);
/// assert_eq!(reader.read_char(), Some('e'));
/// assert_eq!(reader.read_char(), Some('l'));
/// reader.reset();
/// assert_eq!(reader.read_char(), Some('e'));
/// assert_eq!(reader.skip(100), Ok(Some(3)));
/// assert_eq!(reader.read_char(), None);
/// ```
pub struct SequenceReader<'a, S: CharSequence + ?Sized> {
    /// Borrowed sequence; `None` reads as an empty sequence
    source: Option<&'a S>,
    /// Length of the sequence at construction time
    length: usize,
    /// Current cursor position
    pos: usize,
    /// Position restored by `reset`
    mark: usize,
    /// Where the last access ended, for sequences that have to scan
    hint: CharHint,
}

impl<'a, S: CharSequence + ?Sized> SequenceReader<'a, S> {
    /// Creates a new reader positioned at the start of `source`.
    ///
    /// # Arguments
    /// * `source` - The sequence to read, e.g. a `&str`, `&[char]` or
    ///   `&RefCell<Vec<char>>`
    pub fn new(source: &'a S) -> Self {
        Self::from_option(Some(source))
    }

    /// Creates a new reader from a sequence that may be absent.
    ///
    /// An absent sequence is read as an empty one.
    pub fn from_option(source: Option<&'a S>) -> Self {
        let length = source.map_or(0, |s| s.char_len());
        Self {
            source,
            length,
            pos: 0,
            mark: 0,
            hint: CharHint::default(),
        }
    }

    /// Returns the current cursor position.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the length captured at construction.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Whether the captured length is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of characters between the cursor and the captured length.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.pos)
    }

    /// Check if at end of the sequence.
    ///
    /// # Returns
    /// `true` if the cursor is at or beyond the captured length
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.length
    }

    /// Peeks at the character under the cursor without consuming it.
    ///
    /// # Returns
    /// * `Some(char)` - The current character if available
    /// * `None` - If at end of the sequence
    pub fn peek(&self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let mut hint = self.hint;
        self.source?.char_at_from(self.pos, &mut hint)
    }

    /// Returns up to `k` characters from the cursor, without advancing.
    ///
    /// Handy for error messages and debugging output.
    pub fn get_context(&self, k: usize) -> String {
        let Some(source) = self.source else {
            return String::new();
        };
        let mut window = vec!['\0'; k.min(self.remaining())];
        let mut hint = self.hint;
        let n = source.copy_chars_from(self.pos, &mut window, &mut hint);
        window[..n].iter().collect()
    }

    /// Returns an iterator over the remaining characters, advancing this
    /// reader as it goes.
    pub fn chars(&mut self) -> Chars<'_, 'a, S> {
        Chars { reader: self }
    }

    /// Length of the sequence as it is right now.
    fn live_len(&self) -> usize {
        self.source.map_or(0, |s| s.char_len())
    }
}

impl<S: CharSequence + ?Sized> CharReader for SequenceReader<'_, S> {
    /// Rewinds to the start and clears the mark.
    ///
    /// There is nothing to release, so unlike most readers this one stays
    /// fully usable after `close`, and `close` may be called any number of
    /// times. Code built on this reader may rely on reading it again after
    /// closing it.
    fn close(&mut self) {
        trace!("close: rewinding from position {}", self.pos);
        self.pos = 0;
        self.mark = 0;
    }

    /// Marks the current position. The read-ahead limit is ignored, since
    /// the whole sequence stays available.
    fn mark(&mut self, _read_ahead_limit: usize) {
        trace!("mark: position {}", self.pos);
        self.mark = self.pos;
    }

    fn mark_supported(&self) -> bool {
        true
    }

    #[inline]
    fn read_char(&mut self) -> Option<char> {
        if self.pos >= self.length {
            return None;
        }
        let c = self.source?.char_at_from(self.pos, &mut self.hint)?;
        self.pos += 1;
        Some(c)
    }

    /// Copies up to `count` characters into `buf[offset..offset + count]` in
    /// one bulk copy.
    ///
    /// The end-of-stream check comes first: at the end, `Ok(None)` is
    /// returned without looking at the arguments. A shared buffer that shrank
    /// below the cursor also reads as the end of the stream.
    fn read_into(
        &mut self,
        buf: &mut [char],
        offset: usize,
        count: usize,
    ) -> Result<Option<usize>, ReaderError> {
        if self.pos >= self.length {
            return Ok(None);
        }
        let Some(source) = self.source else {
            return Ok(None);
        };
        let fits = offset
            .checked_add(count)
            .is_some_and(|end| end <= buf.len());
        if !fits {
            let err = ReaderError::OutOfBounds {
                buffer_len: buf.len(),
                offset,
                count,
            };
            debug!("read_into rejected: {err}");
            return Err(err);
        }

        let wanted = count.min(self.length - self.pos);
        let window = &mut buf[offset..offset + wanted];
        let copied = source.copy_chars_from(self.pos, window, &mut self.hint);
        if copied == 0 && wanted > 0 {
            // Backing buffer shrank below the captured length
            return Ok(None);
        }
        self.pos += copied;
        Ok(Some(copied))
    }

    /// Moves back to the last mark, or to the start if nothing was marked.
    fn reset(&mut self) {
        trace!("reset: position {} -> {}", self.pos, self.mark);
        self.pos = self.mark;
    }

    /// Skips up to `n` characters.
    ///
    /// Unlike the reads, this compares against the live length of the
    /// sequence rather than the length captured at construction. With a
    /// shared buffer that has grown, `skip` can move the cursor past the
    /// captured length, where reads report the end of the stream.
    fn skip(&mut self, n: i64) -> Result<Option<usize>, ReaderError> {
        if n < 0 {
            let err = ReaderError::NegativeSkip(n);
            debug!("skip rejected: {err}");
            return Err(err);
        }
        let live_len = self.live_len();
        if self.pos >= live_len {
            return Ok(None);
        }

        let requested = usize::try_from(n).unwrap_or(usize::MAX);
        let dest = live_len.min(self.pos.saturating_add(requested));
        let skipped = dest - self.pos;
        trace!("skip: position {} -> {}", self.pos, dest);
        self.pos = dest;
        Ok(Some(skipped))
    }
}

// =#========================================================================#=
// CHARS
// =#========================================================================$=
/// Iterator over the remaining characters of a [SequenceReader].
///
/// Created by [SequenceReader::chars]. Each step is a
/// [read_char](CharReader::read_char), so the reader's cursor moves along.
pub struct Chars<'r, 'a, S: CharSequence + ?Sized> {
    reader: &'r mut SequenceReader<'a, S>,
}

impl<S: CharSequence + ?Sized> Iterator for Chars<'_, '_, S> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        self.reader.read_char()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let end = self.reader.length.min(self.reader.live_len());
        let n = end.saturating_sub(self.reader.pos);
        (n, Some(n))
    }
}

/// Writes the full content of the sequence, regardless of the cursor.
impl<S: CharSequence + ?Sized> fmt::Display for SequenceReader<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.source {
            Some(source) => f.write_str(&source.to_text()),
            None => Ok(()),
        }
    }
}

impl<S: CharSequence + ?Sized> fmt::Debug for SequenceReader<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SequenceReader")
            .field("length", &self.length)
            .field("pos", &self.pos)
            .field("mark", &self.mark)
            .finish()
    }
}

impl<S: CharSequence + ?Sized> Clone for SequenceReader<'_, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            length: self.length,
            pos: self.pos,
            mark: self.mark,
            hint: self.hint,
        }
    }
}

impl<S: CharSequence + ?Sized> Default for SequenceReader<'_, S> {
    fn default() -> Self {
        Self::from_option(None)
    }
}
