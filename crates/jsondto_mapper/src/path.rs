use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Field(&'static str),
    Index(usize),
    Key(String),
}

/// The location of the value currently being visited, as a stack of
/// field names, list indices and map keys.
///
/// Displayed as `orders[2].lines["sku"]`; the empty path displays as `$`.
///
/// ```
/// use jsondto_mapper::FieldPath;
///
/// let mut path = FieldPath::new();
/// path.push_field("orders");
/// path.push_index(2);
/// path.push_field("placed_at");
/// assert_eq!(path.to_string(), "orders[2].placed_at");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath {
    stack: Vec<Segment>,
}

impl FieldPath {
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push_field(&mut self, name: &'static str) {
        self.stack.push(Segment::Field(name));
    }

    pub fn push_index(&mut self, index: usize) {
        self.stack.push(Segment::Index(index));
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.stack.push(Segment::Key(key.into()));
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return f.write_str("$");
        }

        for (idx, segment) in self.stack.iter().enumerate() {
            match segment {
                Segment::Field(name) if idx == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FieldPath;
    use alloc::string::ToString;

    #[test]
    fn display() {
        let mut path = FieldPath::new();
        assert_eq!(path.to_string(), "$");

        path.push_field("lines");
        path.push_key("sku-1");
        path.push_field("qty");
        assert_eq!(path.to_string(), "lines[\"sku-1\"].qty");

        path.pop();
        path.pop();
        path.push_index(0);
        assert_eq!(path.to_string(), "lines[0]");
        assert_eq!(path.depth(), 2);
    }
}
