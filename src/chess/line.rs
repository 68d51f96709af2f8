use shakmaty::Color;

/// an ordered sequence of SAN tokens, White's ply first.
/// openings store their lines as numbered movetext; we strip
/// move numbers on the way in and restore them on the way out.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Line(Vec<String>);

impl Line {
    /// parse plain movetext. move numbers and numeric result
    /// tokens all begin with a digit, so they get dropped.
    pub fn parse(movetext: &str) -> Self {
        movetext
            .split_whitespace()
            .filter(|token| !token.starts_with(|c: char| c.is_ascii_digit()))
            .map(String::from)
            .collect()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }
    pub fn length(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// whose opening a line of this shape is: a line ending on
    /// Black's ply (even length) belongs to Black.
    pub fn color(&self) -> Color {
        if self.0.len() % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// split plies by the side that plays them
    pub fn halves(&self) -> (Vec<&str>, Vec<&str>) {
        let white = self.0.iter().step_by(2).map(String::as_str).collect();
        let black = self.0.iter().skip(1).step_by(2).map(String::as_str).collect();
        (white, black)
    }
}

impl From<Vec<String>> for Line {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}
impl From<Line> for Vec<String> {
    fn from(line: Line) -> Self {
        line.0
    }
}
impl FromIterator<String> for Line {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl<'a> IntoIterator for &'a Line {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if i % 2 == 0 {
                write!(f, "{}. ", i / 2 + 1)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
