/// Merges two values where the fields of `self` take precedence over the
/// fields of `other`.
///
/// Used to layer caller-supplied options over defaults: the caller's value
/// wins wherever it is set, the fallback fills the gaps.
pub trait Combine {
    #[must_use]
    fn combine(mut self, other: Self) -> Self
    where
        Self: Sized,
    {
        self.combine_with(other);
        self
    }

    fn combine_with(&mut self, other: Self);
}

impl<T> Combine for Option<T> {
    fn combine_with(&mut self, other: Self) {
        if self.is_none() {
            *self = other;
        }
    }
}

impl<T> Combine for Vec<T> {
    fn combine_with(&mut self, mut other: Self) {
        self.append(&mut other);
    }
}
