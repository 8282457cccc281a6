use regex::Regex;
use thiserror::Error;

/// Something that exposes a module name to match against.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for str {
    fn name(&self) -> &str {
        self
    }
}

impl Named for String {
    fn name(&self) -> &str {
        self
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (*self).name()
    }
}

/// An ordered set of compiled patterns with union semantics: a candidate
/// matches the set if it matches any one pattern.
///
/// Every pattern is compiled when the set is built, so a malformed pattern
/// fails here, before any candidate is scanned.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(pattern).map_err(|source| PatternError {
                pattern: pattern.to_string(),
                source,
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    pub fn single(pattern: &str) -> Result<Self, PatternError> {
        Self::new([pattern])
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the candidates that match at least one pattern.
    ///
    /// Matches are grouped by the pattern that first matched them, in pattern
    /// order, and keep their original order within a group. A candidate
    /// already claimed by an earlier pattern is not emitted again. An empty
    /// set matches nothing.
    pub fn filter<'a, T: Named>(&self, candidates: &'a [T]) -> Vec<&'a T> {
        let mut claimed = vec![false; candidates.len()];
        let mut matches = Vec::new();

        for pattern in &self.patterns {
            for (index, candidate) in candidates.iter().enumerate() {
                if !claimed[index] && pattern.is_match(candidate.name()) {
                    claimed[index] = true;
                    matches.push(candidate);
                }
            }
        }

        matches
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(name))
    }
}

impl From<Regex> for PatternSet {
    fn from(regex: Regex) -> Self {
        Self {
            patterns: vec![regex],
        }
    }
}

impl FromIterator<Regex> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Regex>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

/// A supplied pattern failed to compile.
#[derive(Debug, Error)]
#[error("invalid pattern `{pattern}`: {source}")]
pub struct PatternError {
    pattern: String,
    #[source]
    source: regex::Error,
}

impl PatternError {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
