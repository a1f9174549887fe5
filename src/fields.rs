//! Ordered, case-insensitive HTTP header table
use std::{fmt::Display, io::Write};

use crate::value::Value;

/// Data structure for HTTP header fields.
///
/// This is an ordered multimap where names are case-insensitive. The casing
/// of a name as first seen is preserved for serialization, entries with the
/// same name are kept in encounter order, and insertion order of distinct
/// names is preserved.
///
/// No validation is performed on whether the names or values are valid HTTP
/// values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    fields: Vec<(String, Value)>,
}

/// Result of a [`HeaderMap::get`] lookup.
///
/// Distinguishes a name seen exactly once from a name seen multiple times.
/// Absence is the `None` of the surrounding `Option`, never an empty entry.
#[derive(Debug, Clone)]
pub enum Entry<'a> {
    One(&'a Value),
    Many(Vec<&'a Value>),
}

// An entry always holds at least one value, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl<'a> Entry<'a> {
    pub fn first(&self) -> &'a Value {
        match self {
            Self::One(value) => *value,
            // Many is never constructed with fewer than two values
            Self::Many(values) => values[0],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(..) => 1,
            Self::Many(values) => values.len(),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Self::Many(..))
    }

    pub fn to_vec(&self) -> Vec<&'a Value> {
        match self {
            Self::One(value) => vec![*value],
            Self::Many(values) => values.clone(),
        }
    }
}

impl<T> PartialEq<T> for Entry<'_>
where
    Value: PartialEq<T>,
{
    fn eq(&self, other: &T) -> bool {
        match self {
            Self::One(value) => (**value).eq(other),
            Self::Many(..) => false,
        }
    }
}

impl HeaderMap {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.fields.clear()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.fields
            .iter()
            .any(|(n, _v)| n.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive lookup.
    ///
    /// Returns [`Entry::One`] when the name was seen exactly once,
    /// [`Entry::Many`] with all values in encounter order when it was seen
    /// more than once, and `None` when it is absent.
    pub fn get(&self, name: &str) -> Option<Entry<'_>> {
        let mut values = self
            .fields
            .iter()
            .filter(|(n, _v)| n.eq_ignore_ascii_case(name))
            .map(|(_n, v)| v);

        let first = values.next()?;
        let mut rest: Vec<&Value> = values.collect();

        if rest.is_empty() {
            Some(Entry::One(first))
        } else {
            rest.insert(0, first);
            Some(Entry::Many(rest))
        }
    }

    /// Returns all values for the name in encounter order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.fields.iter().filter_map(move |(n, v)| {
            if n.eq_ignore_ascii_case(name) {
                Some(v)
            } else {
                None
            }
        })
    }

    /// Replaces all entries for the name with a single new entry.
    ///
    /// When the name already exists, the new entry takes the position and
    /// first-seen casing of the earliest existing entry; otherwise it is
    /// appended at the end.
    pub fn set<N: Into<String>, V: Into<Value>>(&mut self, name: N, value: V) {
        let name = name.into();
        let value = value.into();

        let Some(index) = self
            .fields
            .iter()
            .position(|(n, _v)| n.eq_ignore_ascii_case(&name))
        else {
            self.fields.push((name, value));
            return;
        };

        self.fields[index].1 = value;

        let mut i = index + 1;
        while i < self.fields.len() {
            if self.fields[i].0.eq_ignore_ascii_case(&name) {
                self.fields.remove(i);
            } else {
                i += 1;
            }
        }
    }

    /// Appends an entry, preserving any existing entries with the same name.
    pub fn append<N: Into<String>, V: Into<Value>>(&mut self, name: N, value: V) {
        self.fields.push((name.into(), value.into()))
    }

    pub fn remove(&mut self, name: &str) {
        self.fields.retain(|(n, _v)| !n.eq_ignore_ascii_case(name));
    }

    /// Appends every entry of `other` after the existing entries.
    ///
    /// Nothing is deduplicated: colliding names accumulate as duplicates.
    pub fn combine(&mut self, other: HeaderMap) {
        self.fields.extend(other.fields)
    }

    /// Removes every entry whose name and value both match an entry of
    /// `other`.
    ///
    /// The inverse of [`combine`](Self::combine): names are matched
    /// case-insensitively, values by canonical byte form. Entries of the
    /// same name whose value does not appear in `other` are kept; a name
    /// disappears entirely once all of its values are removed.
    pub fn subtract(&mut self, other: &HeaderMap) {
        self.fields
            .retain(|(n, v)| !other.get_all(n).any(|removed| removed == v));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Writes the fields in table order as `Name: Value\r\n` lines followed
    /// by the blank terminator line.
    pub fn serialize<W: Write>(&self, mut buf: W) -> std::io::Result<()> {
        for (name, value) in &self.fields {
            buf.write_all(name.as_bytes())?;
            buf.write_all(b": ")?;
            buf.write_all(&value.as_bytes())?;
            buf.write_all(b"\r\n")?;
        }

        buf.write_all(b"\r\n")?;

        Ok(())
    }
}

impl IntoIterator for HeaderMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<N: Into<String>, V: Into<Value>> Extend<(N, V)> for HeaderMap {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        self.fields
            .extend(iter.into_iter().map(|(n, v)| (n.into(), v.into())))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for HeaderMap {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}

impl Display for HeaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, value) in &self.fields {
            write!(f, "{}: {}\r\n", name, value)?;
        }

        Ok(())
    }
}
