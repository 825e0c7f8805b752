//! Lazy, allocation-free delimiter splitting.
//!
//! Descriptors are tiny but are split several times over (event / params /
//! key-value / range bounds / exclusion lists), so every split hands out
//! borrowed sub-slices of the original input instead of building containers.
//!
//! ```text
//! "Evt:A=1;;B=2"
//!   .delimited(':').limit(2)          -> "Evt", "A=1;;B=2"
//!   "A=1;;B=2".delimited(';')
//!            .remove_empty()          -> "A=1", "B=2"
//! ```
//!
//! A [`Delimited`] value only describes the split. Every call to
//! [`Delimited::iter`] starts a fresh traversal, so the same description can be
//! walked any number of times.
//!
//! ## Limits
//!
//! With `.limit(n)` the iterator stops splitting once `n - 1` segments have
//! been produced: the `n`-th segment is the untouched remainder, separators
//! included. Segments dropped by `.remove_empty()` do not count towards the
//! limit.

/// Split description for one input and one separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimited<'a> {
    input: &'a str,
    separator: char,
    limit: Option<usize>,
    remove_empty: bool,
}

impl<'a> Delimited<'a> {
    pub fn new(input: &'a str, separator: char) -> Self {
        Self { input, separator, limit: None, remove_empty: false }
    }

    /// Produce at most `max_segments` segments. `0` produces nothing.
    pub fn limit(mut self, max_segments: usize) -> Self {
        self.limit = Some(max_segments);
        self
    }

    /// Skip zero-length segments (leading, trailing, or between separators).
    pub fn remove_empty(mut self) -> Self {
        self.remove_empty = true;
        self
    }

    /// Start a new traversal.
    pub fn iter(&self) -> Segments<'a> {
        Segments {
            rest: Some(self.input),
            separator: self.separator,
            remaining: self.limit,
            remove_empty: self.remove_empty,
        }
    }

    /// Return the `position`-th segment (1-based), or `""` when there is none.
    pub fn nth_segment(&self, position: usize) -> &'a str {
        match position.checked_sub(1) {
            Some(idx) => self.iter().nth(idx).unwrap_or(""),
            None => "",
        }
    }
}

impl<'a> IntoIterator for Delimited<'a> {
    type Item = &'a str;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Delimited<'a> {
    type Item = &'a str;
    type IntoIter = Segments<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the segments of a [`Delimited`] input.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    /// Unconsumed input; `None` once the last segment has been produced.
    rest: Option<&'a str>,
    separator: char,
    /// Segments still allowed, when limited.
    remaining: Option<usize>,
    remove_empty: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            let rest = self.rest?;

            match self.remaining {
                Some(0) => {
                    self.rest = None;
                    return None;
                }
                Some(1) => {
                    // Last allowed segment: hand out the remainder unsplit.
                    self.rest = None;
                    self.remaining = Some(0);
                    if self.remove_empty && rest.is_empty() {
                        return None;
                    }
                    return Some(rest);
                }
                _ => {}
            }

            let segment = match rest.find(self.separator) {
                Some(idx) => {
                    self.rest = Some(&rest[idx + self.separator.len_utf8()..]);
                    &rest[..idx]
                }
                None => {
                    self.rest = None;
                    rest
                }
            };

            if self.remove_empty && segment.is_empty() {
                continue;
            }
            if let Some(n) = self.remaining.as_mut() {
                *n -= 1;
            }
            return Some(segment);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.rest, self.remaining) {
            (None, _) | (_, Some(0)) => (0, Some(0)),
            (Some(rest), limit) => {
                let upper = rest.matches(self.separator).count() + 1;
                let upper = limit.map_or(upper, |n| upper.min(n));
                let lower = if self.remove_empty { 0 } else { 1 };
                (lower, Some(upper))
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// Splitting entry point for string slices.
pub trait Delimit {
    fn delimited(&self, separator: char) -> Delimited<'_>;
}

impl Delimit for str {
    fn delimited(&self, separator: char) -> Delimited<'_> {
        Delimited::new(self, separator)
    }
}
