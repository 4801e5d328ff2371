//! The closed set of color categories and compact collections over it.
//!
//! Classification is non-exclusive: a pixel may belong to several chromatic
//! categories at once, and always belongs to at least one category
//! (achromatic is the guaranteed fallback). [`CategorySet`] represents such
//! a membership as a fixed-width bitset, and [`CategoryMap`] stores one
//! value per category without hashing.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One of the seven color categories an image pixel can belong to.
///
/// Six chromatic hues plus a catch-all achromatic bucket for low-saturation
/// or extreme-brightness pixels (near white, gray, or black).
///
/// The declaration order (Red, Orange, Yellow, Green, Blue, Pink,
/// Achromatic) is the deterministic tie-break ordering used whenever
/// categories with equal percentages must be ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Pink,
    Achromatic,
}

impl ColorCategory {
    /// Number of categories.
    pub const COUNT: usize = 7;

    /// All categories in tie-break order.
    pub const ALL: [ColorCategory; 7] = [
        ColorCategory::Red,
        ColorCategory::Orange,
        ColorCategory::Yellow,
        ColorCategory::Green,
        ColorCategory::Blue,
        ColorCategory::Pink,
        ColorCategory::Achromatic,
    ];

    /// The six chromatic categories, in tie-break order.
    pub const CHROMATIC: [ColorCategory; 6] = [
        ColorCategory::Red,
        ColorCategory::Orange,
        ColorCategory::Yellow,
        ColorCategory::Green,
        ColorCategory::Blue,
        ColorCategory::Pink,
    ];

    /// Position of this category in [`Self::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name, matching the JSON configuration keys.
    pub fn name(self) -> &'static str {
        match self {
            ColorCategory::Red => "red",
            ColorCategory::Orange => "orange",
            ColorCategory::Yellow => "yellow",
            ColorCategory::Green => "green",
            ColorCategory::Blue => "blue",
            ColorCategory::Pink => "pink",
            ColorCategory::Achromatic => "achromatic",
        }
    }

    /// Whether this is one of the six hue-based categories.
    #[inline]
    pub fn is_chromatic(self) -> bool {
        !matches!(self, ColorCategory::Achromatic)
    }
}

impl fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of categories packed into a single byte.
///
/// The per-pixel classification result. Bit `i` corresponds to
/// `ColorCategory::ALL[i]`, so membership tests and inserts are branch-free
/// and the hot pixel loop never allocates.
///
/// # Example
///
/// ```
/// use hue_classify::{CategorySet, ColorCategory};
///
/// let mut set = CategorySet::empty();
/// set.insert(ColorCategory::Red);
/// set.insert(ColorCategory::Pink);
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(ColorCategory::Red));
/// assert!(!set.contains(ColorCategory::Blue));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    /// The empty set.
    #[inline]
    pub fn empty() -> Self {
        CategorySet(0)
    }

    /// A set containing exactly one category.
    #[inline]
    pub fn single(category: ColorCategory) -> Self {
        CategorySet(1 << category.index())
    }

    #[inline]
    pub fn insert(&mut self, category: ColorCategory) {
        self.0 |= 1 << category.index();
    }

    #[inline]
    pub fn remove(&mut self, category: ColorCategory) {
        self.0 &= !(1 << category.index());
    }

    #[inline]
    pub fn contains(self, category: ColorCategory) -> bool {
        self.0 & (1 << category.index()) != 0
    }

    /// Number of member categories.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Member categories in tie-break order.
    pub fn iter(self) -> impl Iterator<Item = ColorCategory> {
        ColorCategory::ALL
            .into_iter()
            .filter(move |c| self.contains(*c))
    }

    /// Member categories collected into a vector, in tie-break order.
    pub fn to_vec(self) -> Vec<ColorCategory> {
        self.iter().collect()
    }
}

impl FromIterator<ColorCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = ColorCategory>>(iter: I) -> Self {
        let mut set = CategorySet::empty();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for category in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(category.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Dense per-category storage.
///
/// Backs percentages, raw counts, and weights in analysis results. Indexing
/// by [`ColorCategory`] is a direct array access.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryMap<T> {
    values: [T; ColorCategory::COUNT],
}

impl<T> CategoryMap<T> {
    /// Build a map by evaluating `f` for every category.
    pub fn from_fn(mut f: impl FnMut(ColorCategory) -> T) -> Self {
        CategoryMap {
            values: ColorCategory::ALL.map(&mut f),
        }
    }

    /// Entries in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorCategory, &T)> {
        ColorCategory::ALL.iter().map(move |&c| (c, &self[c]))
    }
}

impl<T: Default> Default for CategoryMap<T> {
    fn default() -> Self {
        CategoryMap {
            values: std::array::from_fn(|_| T::default()),
        }
    }
}

impl<T> Index<ColorCategory> for CategoryMap<T> {
    type Output = T;

    #[inline]
    fn index(&self, category: ColorCategory) -> &T {
        &self.values[category.index()]
    }
}

impl<T> IndexMut<ColorCategory> for CategoryMap<T> {
    #[inline]
    fn index_mut(&mut self, category: ColorCategory) -> &mut T {
        &mut self.values[category.index()]
    }
}

impl<T: Serialize> Serialize for CategoryMap<T> {
    /// Serializes as a JSON object keyed by lowercase category name.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ColorCategory::COUNT))?;
        for category in ColorCategory::ALL {
            map.serialize_entry(category.name(), &self[category])?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_stable() {
        // The tie-break ordering is part of the public contract.
        let names: Vec<&str> = ColorCategory::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec!["red", "orange", "yellow", "green", "blue", "pink", "achromatic"]
        );
        assert_eq!(ColorCategory::Achromatic.index(), 6);
    }

    #[test]
    fn test_chromatic_excludes_achromatic() {
        assert!(ColorCategory::CHROMATIC.iter().all(|c| c.is_chromatic()));
        assert!(!ColorCategory::Achromatic.is_chromatic());
    }

    #[test]
    fn test_set_insert_remove_contains() {
        let mut set = CategorySet::empty();
        assert!(set.is_empty());

        set.insert(ColorCategory::Green);
        set.insert(ColorCategory::Achromatic);
        assert_eq!(set.len(), 2);
        assert!(set.contains(ColorCategory::Green));
        assert!(set.contains(ColorCategory::Achromatic));

        set.remove(ColorCategory::Green);
        assert!(!set.contains(ColorCategory::Green));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_insert_is_idempotent() {
        let mut set = CategorySet::single(ColorCategory::Blue);
        set.insert(ColorCategory::Blue);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_set_iter_follows_tiebreak_order() {
        let set: CategorySet = [
            ColorCategory::Achromatic,
            ColorCategory::Red,
            ColorCategory::Blue,
        ]
        .into_iter()
        .collect();

        assert_eq!(
            set.to_vec(),
            vec![
                ColorCategory::Red,
                ColorCategory::Blue,
                ColorCategory::Achromatic
            ]
        );
    }

    #[test]
    fn test_map_index_and_from_fn() {
        let mut counts: CategoryMap<u64> = CategoryMap::default();
        counts[ColorCategory::Red] = 5;
        assert_eq!(counts[ColorCategory::Red], 5);
        assert_eq!(counts[ColorCategory::Pink], 0);

        let indices = CategoryMap::from_fn(|c| c.index());
        assert_eq!(indices[ColorCategory::Achromatic], 6);
    }

    #[test]
    fn test_map_serializes_with_category_keys() {
        let mut map: CategoryMap<f64> = CategoryMap::default();
        map[ColorCategory::Red] = 50.0;

        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["red"], 50.0);
        assert_eq!(json["achromatic"], 0.0);
    }

    #[test]
    fn test_category_serde_lowercase_names() {
        let json = serde_json::to_string(&ColorCategory::Achromatic).unwrap();
        assert_eq!(json, "\"achromatic\"");

        let parsed: ColorCategory = serde_json::from_str("\"pink\"").unwrap();
        assert_eq!(parsed, ColorCategory::Pink);
    }
}
