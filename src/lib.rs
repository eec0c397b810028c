//! Charseq is a small library to read character sequences that are already
//! in memory through a streaming, cursor-based reader interface.
//!
//! Core functionality provided:
//! - [CharReader]: the reader protocol, with single-character reads, bulk
//!   reads into a caller buffer, skipping, and mark/reset repositioning.
//! - [SequenceReader]: a [CharReader] borrowing any [CharSequence] without
//!   copying it.
//! - [CharSequence]: indexable character containers; implemented for
//!   `str`, `String`, `[char]`, `Vec<char>`, boxes, references and
//!   `RefCell`-wrapped buffers.
//!
//! Positions and lengths count `char`s, not bytes. End of stream is
//! reported as `None`, errors are reserved for invalid arguments (see
//! [ReaderError]).
//!
//! # Usage patterns
//! Read a string character by character, with mark and reset:
//! ```
//! use charseq::{CharReader, SequenceReader};
//!
//! let mut reader = SequenceReader::new("((A,B),C);");
//! reader.mark(0);
//! assert_eq!(reader.read_char(), Some('('));
//! reader.reset();
//! assert_eq!(reader.chars().filter(|c| c.is_alphabetic()).count(), 3);
//! ```
//!
//! Bulk reads into a caller-provided buffer:
//! ```
//! use charseq::{CharReader, SequenceReader};
//!
//! let text: Vec<char> = "hello".chars().collect();
//! let mut reader = SequenceReader::new(text.as_slice());
//! let mut buf = ['-'; 10];
//! assert_eq!(reader.read_into(&mut buf, 2, 8)?, Some(5));
//! assert_eq!(&buf[2..7], &['h', 'e', 'l', 'l', 'o']);
//! assert_eq!(reader.read_into(&mut buf, 0, 10)?, None);
//! # Ok::<(), charseq::ReaderError>(())
//! ```
//!
//! # Logging
//! Cursor repositioning is reported through the [log] facade at `trace`
//! level, rejected arguments at `debug` level. No logger is installed by
//! this crate.

pub mod reader;

pub use reader::{
    CharHint, CharReader, CharSequence, Chars, ReaderError, ReaderErrorKind, SequenceReader,
};

// ============================================================================
// Quick API
// ============================================================================
/// Drains the remaining characters of any reader into a new `String`.
///
/// # Example
/// ```
/// use charseq::{read_all, CharReader, SequenceReader};
///
/// let mut reader = SequenceReader::new("kea and kākā");
/// reader.skip(8)?;
/// assert_eq!(read_all(&mut reader), "kākā");
/// # Ok::<(), charseq::ReaderError>(())
/// ```
pub fn read_all<R: CharReader + ?Sized>(reader: &mut R) -> String {
    let mut out = String::new();
    reader.read_to_string(&mut out);
    out
}
