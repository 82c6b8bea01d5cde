use std::fmt::{self, Write as _};

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(s: &'static str) -> Self {
        Self::Field(s)
    }
}

impl From<usize> for PathSegment {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

///
/// FieldPath
/// Location inside the output document while a projection is running.
///

#[derive(Clone, Debug, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, seg: impl Into<PathSegment>) {
        self.segments.push(seg.into());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Render as `skills[0].title`; the root renders as `$`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.segments.is_empty() {
            return "$".to_string();
        }

        self.render_segments()
    }

    /// Render the path of a field one level below this one.
    #[must_use]
    pub fn render_child(&self, name: &str) -> String {
        let mut out = self.render_segments();
        if !out.is_empty() {
            out.push('.');
        }
        out.push_str(name);

        out
    }

    fn render_segments(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Field(s) => {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(s);
                }
                PathSegment::Index(idx) => {
                    let _ = write!(out, "[{idx}]");
                }
            }
        }

        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
