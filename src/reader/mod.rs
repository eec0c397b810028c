//! Cursor-based character reading over in-memory sequences.
pub mod char_reader;
pub mod char_sequence;
pub mod reader_error;
pub mod sequence_reader;

pub use char_reader::CharReader;
pub use char_sequence::{CharHint, CharSequence};
pub use reader_error::{ReaderError, ReaderErrorKind};
pub use sequence_reader::{Chars, SequenceReader};
