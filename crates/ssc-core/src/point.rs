use std::fmt;

/// Access node ("point") code: a kind letter and a two-digit number, e.g. `K13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub kind: char,
    pub number: u8,
}

impl Point {
    /// Parse an uppercase point code. `kinds` lists the accepted letters.
    pub fn parse(code: &str, kinds: &[char]) -> Option<Point> {
        let mut chars = code.chars();
        let kind = chars.next().filter(|k| kinds.contains(k))?;
        let digits = chars.as_str();
        if digits.len() != 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse().ok()?;
        Some(Point { kind, number })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02}", self.kind, self.number)
    }
}
