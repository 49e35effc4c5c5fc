/// The line currently being tokenized and the read position inside it.
#[derive(Debug, Default)]
pub struct SourceLine {
    bytes: Vec<u8>,
    position: usize,
}

impl SourceLine {
    /// Replaces the buffered line, normalizing a trailing `\r\n` to `\n`.
    pub fn reset(&mut self, mut bytes: Vec<u8>) {
        if bytes.ends_with(b"\r\n") {
            bytes.truncate(bytes.len() - 2);
            bytes.push(b'\n');
        }
        self.bytes = bytes;
        self.position = 0;
    }

    pub fn buffer_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    /// Length of the line without its newline.
    pub fn content_length(&self) -> usize {
        match self.bytes.last() {
            Some(b'\n') => self.bytes.len() - 1,
            _ => self.bytes.len(),
        }
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.position += 1;
        Some(c)
    }

    pub fn is_consumed(&self) -> bool {
        self.position >= self.bytes.len()
    }

    pub fn consume_all(&mut self) {
        self.position = self.bytes.len();
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// 1-based column of the next unread byte.
    pub fn column(&self) -> u32 {
        (self.position + 1) as u32
    }

    pub fn slice(&self, start: usize) -> &[u8] {
        &self.bytes[start..self.position]
    }

    pub fn rest(&self) -> &[u8] {
        &self.bytes[self.position.min(self.bytes.len())..]
    }

    /// Lines holding only spaces, optionally followed by a comment.
    pub fn is_blank_or_comment(&self) -> bool {
        let first = self.bytes.iter().find(|&&c| c != b' ');
        matches!(first, None | Some(b'\n') | Some(b'#'))
    }
}
