/// A wrapper that remembers whether the value has changed since it was last observed.
#[derive(Clone, Copy, Default, Debug)]
pub(super) struct Recorder<T> {
    inner: T,
    is_updated: bool,
}

impl<T> Recorder<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            is_updated: false,
        }
    }

    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Gives mutable access to the value, marking it as updated whether or not it is modified.
    pub fn get_mut(&mut self) -> &mut T {
        self.is_updated = true;
        &mut self.inner
    }

    /// Replaces the value. This marks the value as updated iff it differs from the old one.
    pub fn set(&mut self, value: T)
    where
        T: PartialEq,
    {
        if self.inner != value {
            self.inner = value;
            self.is_updated = true;
        }
    }

    /// Returns the value if it has been updated since the last call, and clears the mark.
    pub fn take_update(&mut self) -> Option<&T> {
        if self.is_updated {
            self.is_updated = false;
            Some(&self.inner)
        } else {
            None
        }
    }
}
