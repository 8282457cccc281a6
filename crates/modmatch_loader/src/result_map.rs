/// Loaded modules keyed by name, in the order they were matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultMap<M> {
    entries: Vec<(String, M)>,
}

impl<M> ResultMap<M> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: String, module: M) {
        debug_assert!(!self.contains(&name));
        self.entries.push((name, module));
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, module)| module)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &M)> {
        self.entries
            .iter()
            .map(|(name, module)| (name.as_str(), module))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for ResultMap<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> IntoIterator for ResultMap<M> {
    type Item = (String, M);
    type IntoIter = std::vec::IntoIter<(String, M)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
