use std::{collections::HashSet, fmt, hash::Hash};

/// A finite set that remembers first-insertion order.
///
/// Membership goes through a hash index; `items` keeps the order elements
/// were first seen so results read naturally next to their inputs.
#[derive(Debug, Clone)]
pub struct FiniteSet<T: Eq + Hash + Clone> {
    items: Vec<T>,
    index: HashSet<T>,
}

impl<T: Eq + Hash + Clone> Default for FiniteSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashSet::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> FiniteSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the element was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if !self.index.insert(item.clone()) {
            return false;
        }
        self.items.push(item);
        true
    }

    #[inline(always)]
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains(item)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn sorted(&self) -> Vec<T>
    where
        T: Ord,
    {
        let mut ret = self.items.clone();
        ret.sort();
        ret
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FiniteSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Self::new();
        for item in iter {
            ret.insert(item);
        }
        ret
    }
}

impl<T: Eq + Hash + Clone> PartialEq for FiniteSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T: Eq + Hash + Clone> Eq for FiniteSet<T> {}

impl<T: Eq + Hash + Clone + Ord + fmt::Display> fmt::Display for FiniteSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.sorted().iter().map(|x| x.to_string()).collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// A ∪ B: A's elements in order, then B's elements not already in A.
pub fn union<T: Eq + Hash + Clone>(a: &FiniteSet<T>, b: &FiniteSet<T>) -> FiniteSet<T> {
    a.iter().chain(b.iter()).cloned().collect()
}

/// A ∩ B in A's order.
pub fn intersection<T: Eq + Hash + Clone>(a: &FiniteSet<T>, b: &FiniteSet<T>) -> FiniteSet<T> {
    a.iter().filter(|item| b.contains(item)).cloned().collect()
}

/// A - B in A's order.
pub fn difference<T: Eq + Hash + Clone>(a: &FiniteSet<T>, b: &FiniteSet<T>) -> FiniteSet<T> {
    a.iter().filter(|item| !b.contains(item)).cloned().collect()
}

pub fn cardinality<T: Eq + Hash + Clone>(a: &FiniteSet<T>) -> usize {
    a.len()
}
