use std::fmt;

/// A reference to one column of a projection.
///
/// A plain column has one segment; columns reached through relations or
/// nested entities carry one segment per hop. How segments are joined into a
/// lookup is up to the row source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnRef {
    segments: Vec<String>,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    pub fn path<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns this column reached through `field` first.
    pub fn prefixed(mut self, field: &str) -> Self {
        self.segments.insert(0, field.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_path(&self) -> bool {
        self.segments.len() > 1
    }

    pub fn join(&self, sep: &str) -> String {
        self.segments.join(sep)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

impl From<&str> for ColumnRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ColumnRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<const N: usize> From<[&str; N]> for ColumnRef {
    fn from(value: [&str; N]) -> Self {
        Self::path(value)
    }
}
