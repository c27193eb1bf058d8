/// A growable buffer that generated characters are written to.
///
/// This is implemented for
/// - `String`
/// - `Vec<char>` to keep one element per code point
/// - `Vec<u8>` to produce UTF-8 encoded bytes
///
/// Generation only ever appends, and only asks whether anything has been written so far
/// (to decide how line anchors behave).
pub trait Output {
    fn new() -> Self;
    fn is_empty(&self) -> bool;
    fn push_char(&mut self, c: char);
    fn push_str(&mut self, s: &str) {
        s.chars().for_each(|c| self.push_char(c));
    }
    fn clear(&mut self);
}

impl Output for String {
    fn new() -> Self {
        Default::default()
    }
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
    fn push_char(&mut self, c: char) {
        self.push(c)
    }
    fn push_str(&mut self, s: &str) {
        String::push_str(self, s)
    }
    fn clear(&mut self) {
        String::clear(self)
    }
}

impl Output for Vec<char> {
    fn new() -> Self {
        Default::default()
    }
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
    fn push_char(&mut self, c: char) {
        self.push(c)
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}

impl Output for Vec<u8> {
    fn new() -> Self {
        Default::default()
    }
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
    fn push_char(&mut self, c: char) {
        let mut b = [0; 4];
        let result = c.encode_utf8(&mut b);
        self.extend(result.as_bytes())
    }
    fn push_str(&mut self, s: &str) {
        self.extend(s.as_bytes())
    }
    fn clear(&mut self) {
        Vec::clear(self)
    }
}
