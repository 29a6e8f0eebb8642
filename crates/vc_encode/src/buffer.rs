use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Buffer

/// The growable output of one encode call.
///
/// Buffers are pooled by the [`Engine`](crate::Engine): clearing keeps the
/// capacity, so once capacities settle an encode call does not allocate
/// except for the returned copy.
///
/// # Examples
///
/// ```
/// use vc_encode::Buffer;
///
/// let mut buf = Buffer::with_capacity(16);
/// buf.push(b'[');
/// buf.push_int(-12i32);
/// buf.push(b',');
/// buf.push_quoted("a\tb");
/// buf.push(b']');
///
/// assert_eq!(buf.as_bytes(), br#"[-12,"a\tb"]"#);
/// ```
#[derive(Default, Clone)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    /// Creates an empty buffer that can hold `capacity` bytes without growing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    #[inline]
    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the decimal form of `value`.
    #[inline]
    pub fn push_int<I: itoa::Integer>(&mut self, value: I) {
        let mut tmp = itoa::Buffer::new();
        self.bytes.extend_from_slice(tmp.format(value).as_bytes());
    }

    /// Appends `text` as a double-quoted literal.
    ///
    /// `"` and `\` are backslash-escaped, ASCII control characters use their
    /// short escape (`\n`, `\t` ...) or `\xNN`, and everything else is copied
    /// unchanged, so the output stays valid UTF-8.
    pub fn push_quoted(&mut self, text: &str) {
        let bytes = text.as_bytes();
        self.bytes.reserve(bytes.len() + 2);
        self.bytes.push(b'"');

        // Copy unescaped runs in one go.
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escape: &[u8] = match b {
                b'"' => b"\\\"",
                b'\\' => b"\\\\",
                0x07 => b"\\a",
                0x08 => b"\\b",
                0x0c => b"\\f",
                b'\n' => b"\\n",
                b'\r' => b"\\r",
                b'\t' => b"\\t",
                0x0b => b"\\v",
                0x00..=0x1f | 0x7f => {
                    self.bytes.extend_from_slice(&bytes[start..i]);
                    self.push_hex_escape(b);
                    start = i + 1;
                    continue;
                }
                _ => continue,
            };
            self.bytes.extend_from_slice(&bytes[start..i]);
            self.bytes.extend_from_slice(escape);
            start = i + 1;
        }

        self.bytes.extend_from_slice(&bytes[start..]);
        self.bytes.push(b'"');
    }

    fn push_hex_escape(&mut self, b: u8) {
        const HEX: &[u8; 16] = b"0123456789abcdef";
        self.bytes.extend_from_slice(&[
            b'\\',
            b'x',
            HEX[usize::from(b >> 4)],
            HEX[usize::from(b & 0xf)],
        ]);
    }

    /// Removes all content, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Copies the content into a new vector of exactly the content length.
    #[inline]
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.as_slice().to_vec()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.bytes.len())
            .field("capacity", &self.bytes.capacity())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Buffer;

    fn quoted(text: &str) -> alloc::string::String {
        let mut buf = Buffer::default();
        buf.push_quoted(text);
        alloc::string::String::from_utf8(buf.to_vec()).unwrap()
    }

    #[test]
    fn quote_escapes() {
        assert_eq!(quoted(""), r#""""#);
        assert_eq!(quoted("plain"), r#""plain""#);
        assert_eq!(quoted("a\"b"), r#""a\"b""#);
        assert_eq!(quoted("back\\slash"), r#""back\\slash""#);
        assert_eq!(quoted("\u{7}\u{8}\u{c}\n\r\t\u{b}"), r#""\a\b\f\n\r\t\v""#);
        assert_eq!(quoted("\u{1}x\u{7f}"), r#""\x01x\x7f""#);
    }

    #[test]
    fn quote_keeps_utf8() {
        assert_eq!(quoted("héllo, 世界"), "\"héllo, 世界\"");
    }

    #[test]
    fn ints_in_decimal() {
        let mut buf = Buffer::default();
        buf.push_int(0u8);
        buf.push(b' ');
        buf.push_int(i64::MIN);
        buf.push(b' ');
        buf.push_int(u128::MAX);
        assert_eq!(
            buf.as_bytes(),
            b"0 -9223372036854775808 340282366920938463463374607431768211455"
        );
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut buf = Buffer::with_capacity(8);
        buf.extend(b"0123456789abcdef");
        let cap = buf.capacity();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }
}
