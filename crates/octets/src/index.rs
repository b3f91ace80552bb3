//! Single-byte indexing, slicing and iteration.
//!
//! Every access yields octets, never a bare integer: `get(0)` on `b"abc"`
//! is `b"a"`, exactly like one step of [`Octets::iter`].

use std::iter::FusedIterator;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use crate::{Octets, OctetsError, Value};

/// Slice bounds with optional start, stop and step, counted like sequence
/// slices in dynamic languages: negative bounds count from the end and out
/// of range bounds are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl SliceSpec {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// Resolves the bounds against a sequence of length `len`.
    ///
    /// Returns `(start, stop, step)` such that walking from `start` by
    /// `step` while strictly before `stop` visits exactly the selected
    /// positions.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::SliceSpec;
    ///
    /// assert_eq!(SliceSpec::new(None, None, Some(-1)).indices(3).unwrap(), (2, -1, -1));
    /// assert_eq!(SliceSpec::new(Some(-10), Some(10), None).indices(3).unwrap(), (0, 3, 1));
    /// ```
    pub fn indices(&self, len: usize) -> Result<(isize, isize, isize), OctetsError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(OctetsError::ZeroStep);
        }
        let len = isize::try_from(len).unwrap_or(isize::MAX);
        let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(b) if b < 0 => b.saturating_add(len).max(lower),
            Some(b) => b.min(upper),
        };
        let start = clamp(self.start, if step > 0 { lower } else { upper });
        let stop = clamp(self.stop, if step > 0 { upper } else { lower });
        Ok((start, stop, step))
    }

    /// Positions selected in a sequence of length `len`, in visiting order.
    pub fn positions(&self, len: usize) -> Result<Vec<usize>, OctetsError> {
        let (start, stop, step) = self.indices(len)?;
        let mut out = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            // Clamping keeps `i` inside 0..len here.
            out.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(out)
    }
}

/// Anything a caller may try to index octets with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Index(isize),
    Slice(SliceSpec),
    /// A key of any other type; indexing with it always fails.
    Unsupported(&'static str),
}

impl From<isize> for Key {
    fn from(i: isize) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i as isize)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(isize::try_from(i).unwrap_or(if i < 0 { isize::MIN } else { isize::MAX }))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(isize::try_from(i).unwrap_or(isize::MAX))
    }
}

impl From<SliceSpec> for Key {
    fn from(s: SliceSpec) -> Self {
        Key::Slice(s)
    }
}

impl From<Range<isize>> for Key {
    fn from(r: Range<isize>) -> Self {
        Key::Slice(SliceSpec::new(Some(r.start), Some(r.end), None))
    }
}

impl From<RangeFrom<isize>> for Key {
    fn from(r: RangeFrom<isize>) -> Self {
        Key::Slice(SliceSpec::new(Some(r.start), None, None))
    }
}

impl From<RangeTo<isize>> for Key {
    fn from(r: RangeTo<isize>) -> Self {
        Key::Slice(SliceSpec::new(None, Some(r.end), None))
    }
}

impl From<RangeFull> for Key {
    fn from(_: RangeFull) -> Self {
        Key::Slice(SliceSpec::default())
    }
}

impl From<RangeInclusive<isize>> for Key {
    fn from(r: RangeInclusive<isize>) -> Self {
        let (start, end) = r.into_inner();
        // `..=-1` runs through the last element.
        let stop = if end == -1 { None } else { end.checked_add(1) };
        Key::Slice(SliceSpec::new(Some(start), stop, None))
    }
}

impl From<&Value> for Key {
    fn from(v: &Value) -> Self {
        match v {
            Value::Int(n) => Key::Index(
                isize::try_from(*n).unwrap_or(if *n < 0 { isize::MIN } else { isize::MAX }),
            ),
            other => Key::Unsupported(other.type_name()),
        }
    }
}

impl From<Value> for Key {
    fn from(v: Value) -> Self {
        Key::from(&v)
    }
}

impl Octets {
    /// Indexes with any supported key: an integer yields one byte, a slice
    /// yields a sub-sequence, anything else is a type error.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::{Octets, Value};
    ///
    /// let o = Octets::from(b"abc");
    /// assert_eq!(o.item(-1).unwrap(), b"c");
    /// assert_eq!(o.item(1..).unwrap(), b"bc");
    /// assert!(o.item(Value::from(1.5)).is_err());
    /// ```
    pub fn item(&self, key: impl Into<Key>) -> Result<Octets, OctetsError> {
        match key.into() {
            Key::Index(i) => self.get(i),
            Key::Slice(spec) => self.slice(spec),
            Key::Unsupported(type_name) => Err(OctetsError::IndexType { type_name }),
        }
    }

    /// The single byte at `index`, as one-byte octets. Negative indices
    /// count from the end.
    pub fn get(&self, index: isize) -> Result<Octets, OctetsError> {
        let len = self.len();
        let resolved = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index as usize).filter(|&i| i < len)
        };
        match resolved {
            Some(i) => Ok(Octets::from(&self.raw_bytes()[i..=i])),
            None => Err(OctetsError::IndexOutOfRange { index, len }),
        }
    }

    /// The sub-sequence selected by `spec`; empty when the range is empty.
    pub fn slice(&self, spec: SliceSpec) -> Result<Octets, OctetsError> {
        let data = self.raw_bytes();
        let (start, stop, step) = spec.indices(data.len())?;
        if step == 1 {
            return Ok(if start < stop {
                Octets::from(&data[start as usize..stop as usize])
            } else {
                Octets::empty()
            });
        }
        let picked: Vec<u8> = spec
            .positions(data.len())?
            .into_iter()
            .map(|i| data[i])
            .collect();
        Ok(Octets::from(picked))
    }

    /// Iterates over the content as one-byte octets, in storage order.
    ///
    /// # Example
    ///
    /// ```
    /// use octets::Octets;
    ///
    /// let parts: Vec<Octets> = Octets::from(b"ab").iter().collect();
    /// assert_eq!(parts, vec![Octets::from(b"a"), Octets::from(b"b")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bytes: self.raw_bytes().iter(),
        }
    }
}

/// Iterator over [`Octets`] yielding one-byte octets.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    bytes: std::slice::Iter<'a, u8>,
}

impl Iterator for Iter<'_> {
    type Item = Octets;

    fn next(&mut self) -> Option<Self::Item> {
        self.bytes.next().map(|&b| Octets::from(vec![b]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.bytes.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.bytes.next_back().map(|&b| Octets::from(vec![b]))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Octets {
    type Item = Octets;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
