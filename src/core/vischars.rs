// src/core/vischars.rs
// Visible-text character iterator over an HTML snippet.
// Skips tags (<...>) and comments (<!-- ... -->). A '<' that cannot open a
// tag is kept as text, the way an HTML tokenizer treats it. Entities pass
// through untouched; decode the collected string afterwards.

pub struct VisChars<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
}

impl<'a> VisChars<'a> {
    pub fn new(s: &'a str) -> Self { Self { s, b: s.as_bytes(), i: 0, n: s.len() } }

    #[inline]
    fn opens_markup(&self) -> bool {
        // called when current byte is '<'
        match self.b.get(self.i + 1) {
            Some(c) if c.is_ascii_alphabetic() => true,
            Some(b'/') | Some(b'!') | Some(b'?') => true,
            _ => false,
        }
    }

    #[inline]
    fn skip_comment(&mut self) {
        // called when positioned on "<!--"
        match self.s[self.i + 4..].find("-->") {
            Some(e) => self.i += 4 + e + 3,
            None => self.i = self.n,
        }
    }

    #[inline]
    fn skip_tag(&mut self) {
        // called when current byte is '<'
        self.i += 1;
        let mut in_s = false; // '
        let mut in_d = false; // "
        while self.i < self.n {
            match self.b[self.i] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => { self.i += 1; break; }
                _ => {}
            }
            self.i += 1;
        }
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        let ch = self.s.get(self.i..)?.chars().next()?;
        self.i += ch.len_utf8();
        Some(ch)
    }
}

impl<'a> Iterator for VisChars<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            if self.b[self.i] == b'<' && self.opens_markup() {
                if self.s[self.i..].starts_with("<!--") {
                    self.skip_comment();
                } else {
                    self.skip_tag();
                }
                continue;
            }
            return self.next_char();
        }
        None
    }
}
