use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Which side of the endpoint a schema tree describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    /// Parameter name that binds a user function to the root of this tree.
    pub fn root_parameter(self) -> &'static str {
        match self {
            Direction::Input => "input_schema",
            Direction::Output => "output_schema",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }

    pub fn all() -> [Direction; 2] {
        [Direction::Input, Direction::Output]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named object property
    Key(String),
    /// The single item template of an array
    Item,
    /// The n-th candidate of a union
    Variant(usize),
}

impl PathSegment {
    /// Human label used when a node has no explicit title.
    pub fn label(&self) -> String {
        match self {
            PathSegment::Key(key) => key.clone(),
            PathSegment::Item => "item".to_string(),
            PathSegment::Variant(n) => format!("variant {n}"),
        }
    }
}

/// Location of a node inside a schema tree, relative to the tree root.
///
/// The display form joins keys with `.`, writes the array item template as
/// `[]` and union candidates as `<n>`, e.g. `a.v[]` or `x<1>.y`. Parsing
/// accepts the same grammar plus numeric indices (`coeffs[0]`), which all
/// address the item template since arrays only carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath(Vec<PathSegment>);

impl SchemaPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    #[must_use]
    pub fn key(&self, name: &str) -> Self {
        self.child(PathSegment::Key(name.to_string()))
    }

    /// Path of the enclosing node, `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Identifier-safe rendering: `a_v_item`, `x_v1_y`.
    pub fn uid(&self) -> String {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Key(key) => key.clone(),
                PathSegment::Item => "item".to_string(),
                PathSegment::Variant(n) => format!("v{n}"),
            })
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl From<Vec<PathSegment>> for SchemaPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                PathSegment::Item => f.write_str("[]")?,
                PathSegment::Variant(n) => write!(f, "<{n}>")?,
            }
        }
        Ok(())
    }
}

impl Serialize for SchemaPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid schema path '{0}'")]
pub struct InvalidPath(pub String);

#[derive(Clone, Copy, PartialEq)]
enum ParseState {
    Start,
    InKey,
    AfterDot,
    AfterBracket,
}

impl FromStr for SchemaPath {
    type Err = InvalidPath;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPath(text.to_string());
        let mut segments = Vec::new();
        let mut key = String::new();
        let mut state = ParseState::Start;
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    match state {
                        ParseState::InKey => segments.push(PathSegment::Key(std::mem::take(&mut key))),
                        ParseState::AfterBracket => {}
                        ParseState::Start | ParseState::AfterDot => return Err(invalid()),
                    }
                    state = ParseState::AfterDot;
                }
                '[' | '<' => {
                    match state {
                        ParseState::InKey => segments.push(PathSegment::Key(std::mem::take(&mut key))),
                        ParseState::Start | ParseState::AfterBracket => {}
                        ParseState::AfterDot => return Err(invalid()),
                    }
                    let close = if c == '[' { ']' } else { '>' };
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some(ch) if ch == close => break,
                            Some(ch) if ch.is_ascii_digit() => inner.push(ch),
                            _ => return Err(invalid()),
                        }
                    }
                    if c == '[' {
                        segments.push(PathSegment::Item);
                    } else {
                        let n = inner.parse::<usize>().map_err(|_| invalid())?;
                        segments.push(PathSegment::Variant(n));
                    }
                    state = ParseState::AfterBracket;
                }
                ']' | '>' => return Err(invalid()),
                _ => {
                    if state == ParseState::AfterBracket {
                        return Err(invalid());
                    }
                    key.push(c);
                    state = ParseState::InKey;
                }
            }
        }

        match state {
            ParseState::InKey => segments.push(PathSegment::Key(key)),
            ParseState::AfterDot => return Err(invalid()),
            ParseState::Start | ParseState::AfterBracket => {}
        }
        Ok(Self(segments))
    }
}
