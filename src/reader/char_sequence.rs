//! Character sequence abstraction for readers.
//!
//! This module provides the [CharSequence] trait, which describes an ordered,
//! indexable collection of characters with a known length. Positions and
//! lengths always count `char`s (Unicode scalar values), never bytes.

use std::cell::RefCell;

// =#========================================================================#=
// CHAR HINT
// =#========================================================================$=
/// A known pairing of a character index with the byte offset it starts at.
///
/// Sequences without constant-time indexing use it to resume a scan where
/// the previous access stopped. A hint that no longer fits the sequence
/// (e.g. after the backing buffer changed) is discarded, not trusted.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub struct CharHint {
    /// Character index
    pub char_index: usize,
    /// Byte offset at which the character at `char_index` starts
    pub byte_offset: usize,
}

// =#========================================================================#=
// CHAR SEQUENCE (Trait)
// =#========================================================================T=
/// Trait defining an indexable, in-memory character container.
///
/// Implemented for:
/// - Character slices and vectors (`[char]`, `Vec<char>`, `Box<[char]>`),
///   which offer constant-time indexing and a direct slice copy
/// - String data (`str`, `String`), where indexing by character position
///   requires a forward scan; the `_from` methods resume that scan from a
///   [CharHint]
/// - `RefCell<T>` for a backing buffer that its owner keeps mutating
///   between reads
///
/// Only [char_len](CharSequence::char_len) and
/// [char_at](CharSequence::char_at) are required. The provided methods can
/// be overridden when a representation has a faster bulk path, without any
/// change in observable behaviour.
pub trait CharSequence {
    /// Returns the current number of characters.
    fn char_len(&self) -> usize;

    /// Returns the character at `index`.
    ///
    /// # Returns
    /// * `Some(char)` - The character if `index < char_len()`
    /// * `None` - If `index` is out of range
    fn char_at(&self, index: usize) -> Option<char>;

    /// Copies up to `dst.len()` characters, starting at `start`, into `dst`.
    ///
    /// # Arguments
    /// * `start` - Index of the first character to copy
    /// * `dst` - Destination; filled from its beginning
    ///
    /// # Returns
    /// The number of characters copied, fewer than `dst.len()` only if the
    /// sequence ends first
    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        let mut copied = 0;
        for (slot, index) in dst.iter_mut().zip(start..) {
            match self.char_at(index) {
                Some(c) => *slot = c,
                None => break,
            }
            copied += 1;
        }
        copied
    }

    /// Like [char_at](CharSequence::char_at), but may start looking from
    /// `hint` and moves `hint` past the returned character.
    ///
    /// Sequential access through the same hint is then amortised constant
    /// time for sequences that otherwise need a scan. The default ignores
    /// the hint.
    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        let _ = hint;
        self.char_at(index)
    }

    /// Like [copy_chars](CharSequence::copy_chars), but may start looking
    /// from `hint` and moves `hint` past the last copied character.
    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        let _ = hint;
        self.copy_chars(start, dst)
    }

    /// Returns the full content as a `String`.
    fn to_text(&self) -> String {
        (0..self.char_len()).map_while(|i| self.char_at(i)).collect()
    }
}

// =#========================================================================#=
// CHARACTER SLICES
// =#========================================================================$=
impl CharSequence for [char] {
    #[inline]
    fn char_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn char_at(&self, index: usize) -> Option<char> {
        self.get(index).copied()
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        if start >= self.len() {
            return 0;
        }
        let n = dst.len().min(self.len() - start);
        dst[..n].copy_from_slice(&self[start..start + n]);
        n
    }

    fn to_text(&self) -> String {
        self.iter().collect()
    }
}

impl CharSequence for Vec<char> {
    #[inline]
    fn char_len(&self) -> usize {
        self.as_slice().char_len()
    }

    #[inline]
    fn char_at(&self, index: usize) -> Option<char> {
        self.as_slice().char_at(index)
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        self.as_slice().copy_chars(start, dst)
    }

    fn to_text(&self) -> String {
        self.as_slice().to_text()
    }
}

// =#========================================================================#=
// STRINGS
// =#========================================================================$=
impl CharSequence for str {
    fn char_len(&self) -> usize {
        self.chars().count()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.chars().nth(index)
    }

    // One scan for the whole window instead of one per character
    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        let mut copied = 0;
        for (slot, c) in dst.iter_mut().zip(self.chars().skip(start)) {
            *slot = c;
            copied += 1;
        }
        copied
    }

    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        let byte = byte_offset_of(self, index, hint)?;
        let c = self[byte..].chars().next()?;
        *hint = CharHint {
            char_index: index + 1,
            byte_offset: byte + c.len_utf8(),
        };
        Some(c)
    }

    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        let Some(byte) = byte_offset_of(self, start, hint) else {
            return 0;
        };
        let mut end = byte;
        let mut copied = 0;
        for (slot, c) in dst.iter_mut().zip(self[byte..].chars()) {
            *slot = c;
            end += c.len_utf8();
            copied += 1;
        }
        *hint = CharHint {
            char_index: start + copied,
            byte_offset: end,
        };
        copied
    }

    fn to_text(&self) -> String {
        self.to_owned()
    }
}

/// Byte offset of the character at `index`, scanning forward from `hint`
/// when it lies at or before `index`, else from the start.
///
/// # Returns
/// `None` if `index` is at or past the end of `s`
fn byte_offset_of(s: &str, index: usize, hint: &CharHint) -> Option<usize> {
    let usable = hint.char_index <= index && s.is_char_boundary(hint.byte_offset);
    let (from_char, from_byte) = if usable {
        (hint.char_index, hint.byte_offset)
    } else {
        (0, 0)
    };
    s[from_byte..]
        .char_indices()
        .nth(index - from_char)
        .map(|(b, _)| from_byte + b)
}

impl CharSequence for String {
    fn char_len(&self) -> usize {
        self.as_str().char_len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.as_str().char_at(index)
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        self.as_str().copy_chars(start, dst)
    }

    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        self.as_str().char_at_from(index, hint)
    }

    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        self.as_str().copy_chars_from(start, dst, hint)
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

// =#========================================================================#=
// WRAPPERS
// =#========================================================================$=
impl<T: CharSequence + ?Sized> CharSequence for &T {
    fn char_len(&self) -> usize {
        (**self).char_len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        (**self).char_at(index)
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        (**self).copy_chars(start, dst)
    }

    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        (**self).char_at_from(index, hint)
    }

    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        (**self).copy_chars_from(start, dst, hint)
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

impl<T: CharSequence + ?Sized> CharSequence for Box<T> {
    fn char_len(&self) -> usize {
        (**self).char_len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        (**self).char_at(index)
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        (**self).copy_chars(start, dst)
    }

    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        (**self).char_at_from(index, hint)
    }

    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        (**self).copy_chars_from(start, dst, hint)
    }

    fn to_text(&self) -> String {
        (**self).to_text()
    }
}

/// A shared backing buffer.
///
/// Each call holds an immutable borrow only for its own duration, so the
/// owner may grow or shrink the buffer between reads. Calling into the
/// sequence while the owner holds a mutable borrow panics, as any
/// [RefCell] access would.
impl<T: CharSequence + ?Sized> CharSequence for RefCell<T> {
    fn char_len(&self) -> usize {
        self.borrow().char_len()
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.borrow().char_at(index)
    }

    fn copy_chars(&self, start: usize, dst: &mut [char]) -> usize {
        self.borrow().copy_chars(start, dst)
    }

    fn char_at_from(&self, index: usize, hint: &mut CharHint) -> Option<char> {
        self.borrow().char_at_from(index, hint)
    }

    fn copy_chars_from(&self, start: usize, dst: &mut [char], hint: &mut CharHint) -> usize {
        self.borrow().copy_chars_from(start, dst, hint)
    }

    fn to_text(&self) -> String {
        self.borrow().to_text()
    }
}

// =#========================================================================#=
// TESTS - CHAR SEQUENCE
// =#========================================================================$=
#[cfg(test)]
mod tests {
    use super::*;

    /// Sequence relying on the provided methods only.
    struct Repeat(char, usize);

    impl CharSequence for Repeat {
        fn char_len(&self) -> usize {
            self.1
        }

        fn char_at(&self, index: usize) -> Option<char> {
            (index < self.1).then_some(self.0)
        }
    }

    #[test]
    fn test_default_copy_stops_at_end() {
        let seq = Repeat('z', 3);
        let mut dst = ['-'; 5];
        assert_eq!(seq.copy_chars(1, &mut dst), 2);
        assert_eq!(dst, ['z', 'z', '-', '-', '-']);
        assert_eq!(seq.copy_chars(3, &mut dst), 0);
    }

    #[test]
    fn test_default_to_text() {
        assert_eq!(Repeat('a', 4).to_text(), "aaaa");
        assert_eq!(Repeat('a', 0).to_text(), "");
    }

    #[test]
    fn test_slice_copy() {
        let chars: Vec<char> = "kakapo".chars().collect();
        let mut dst = ['-'; 4];
        assert_eq!(chars.copy_chars(2, &mut dst), 4);
        assert_eq!(dst, ['k', 'a', 'p', 'o']);
        assert_eq!(chars.copy_chars(5, &mut dst), 1);
        assert_eq!(dst[0], 'o');
        assert_eq!(chars.copy_chars(6, &mut dst), 0);
        assert_eq!(chars.copy_chars(60, &mut dst), 0);
    }

    #[test]
    fn test_str_counts_chars_not_bytes() {
        let s = "tūī kererū";
        assert_eq!(s.char_len(), 10);
        assert_eq!(s.char_at(1), Some('ū'));
        assert_eq!(s.char_at(9), Some('ū'));
        assert_eq!(s.char_at(10), None);

        let mut dst = ['-'; 3];
        assert_eq!(s.copy_chars(4, &mut dst), 3);
        assert_eq!(dst, ['k', 'e', 'r']);
    }

    #[test]
    fn test_str_hint_follows_sequential_reads() {
        let s = "kōwhai";
        let mut hint = CharHint::default();
        let read: String = (0..6).map_while(|i| s.char_at_from(i, &mut hint)).collect();
        assert_eq!(read, "kōwhai");
        assert_eq!(
            hint,
            CharHint {
                char_index: 6,
                byte_offset: s.len()
            }
        );
        assert_eq!(s.char_at_from(6, &mut hint), None);
    }

    #[test]
    fn test_str_hint_behind_index_restarts() {
        let s = "kōwhai";
        let mut hint = CharHint::default();
        s.char_at_from(4, &mut hint);
        assert_eq!(hint.char_index, 5);
        // Going backwards cannot resume from the hint
        assert_eq!(s.char_at_from(1, &mut hint), Some('ō'));
        assert_eq!(
            hint,
            CharHint {
                char_index: 2,
                byte_offset: 3
            }
        );
    }

    #[test]
    fn test_str_copy_from_hint() {
        let s = "pōhutukawa";
        let mut hint = CharHint::default();
        let mut dst = ['-'; 4];
        assert_eq!(s.copy_chars_from(0, &mut dst, &mut hint), 4);
        assert_eq!(dst, ['p', 'ō', 'h', 'u']);
        assert_eq!(s.copy_chars_from(4, &mut dst, &mut hint), 4);
        assert_eq!(dst, ['t', 'u', 'k', 'a']);
        assert_eq!(s.copy_chars_from(8, &mut dst, &mut hint), 2);
        assert_eq!(&dst[..2], &['w', 'a']);
        assert_eq!(s.copy_chars_from(10, &mut dst, &mut hint), 0);
    }

    #[test]
    fn test_stale_hint_is_discarded() {
        let buffer = RefCell::new(String::from("āāāā"));
        let mut hint = CharHint::default();
        assert_eq!(buffer.char_at_from(2, &mut hint), Some('ā'));
        assert_eq!(hint.byte_offset, 6);

        // Byte 6 is past the end now
        *buffer.borrow_mut() = String::from("abcd");
        assert_eq!(buffer.char_at_from(3, &mut hint), Some('d'));

        // Byte 2 is inside a multi-byte character now
        hint = CharHint {
            char_index: 3,
            byte_offset: 2,
        };
        *buffer.borrow_mut() = String::from("aāāā");
        assert_eq!(buffer.char_at_from(3, &mut hint), Some('ā'));
    }

    #[test]
    fn test_refcell_sees_mutation() {
        let buffer = RefCell::new(vec!['a', 'b']);
        assert_eq!(buffer.char_len(), 2);
        buffer.borrow_mut().push('c');
        assert_eq!(buffer.char_len(), 3);
        assert_eq!(buffer.char_at(2), Some('c'));
        assert_eq!(buffer.to_text(), "abc");
    }

    #[test]
    fn test_wrappers_delegate() {
        let boxed: Box<[char]> = vec!['x', 'y'].into_boxed_slice();
        assert_eq!(boxed.char_len(), 2);
        assert_eq!(boxed.to_text(), "xy");

        let owned = String::from("moa");
        let borrowed = &owned;
        assert_eq!(borrowed.char_at(2), Some('a'));
        assert_eq!(borrowed.to_text(), "moa");
    }
}
