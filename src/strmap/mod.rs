use std::cmp::Ordering;

/// A map from segment text to values, kept sorted by key.
#[derive(Debug, Clone)]
pub struct StrMap<T> {
    keys: Vec<Box<str>>,
    values: Vec<T>,
}

impl<T> Default for StrMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StrMap<T> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        match self.find_index(key) {
            Ok(i) => self.values.get(i),
            Err(_) => None,
        }
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        match self.find_index(key) {
            Ok(i) => self.values.get_mut(i),
            Err(_) => None,
        }
    }

    /// Inserts or overwrites, returning the previous value.
    pub fn insert(&mut self, key: &str, value: T) -> Option<T> {
        match self.find_index(key) {
            Ok(i) => Some(std::mem::replace(&mut self.values[i], value)),
            Err(i) => {
                self.keys.insert(i, key.into());
                self.values.insert(i, value);
                None
            }
        }
    }

    /// Keys in ascending byte order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.keys.iter().map(|k| &**k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.keys.iter().map(|k| &**k).zip(self.values.iter())
    }

    fn find_index(&self, key: &str) -> Result<usize, usize> {
        let key = key.as_bytes();
        let mut l: usize = 0;
        let mut r: usize = self.keys.len();

        while l < r {
            let mid = l + (r - l) / 2;
            match self.keys[mid].as_bytes().cmp(key) {
                Ordering::Less => l = mid + 1,
                Ordering::Equal => return Ok(mid),
                Ordering::Greater => r = mid,
            }
        }
        Err(l)
    }
}
