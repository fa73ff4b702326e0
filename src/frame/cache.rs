//! A tile-keyed cache of reconstructed codons.

use std::collections::HashMap;

use crate::codon::Codon;
use crate::tile;

/// The codons of every transcript on a tile, by transcript id.
pub type TileCodons = HashMap<String, Vec<Codon>>;

/// Codons for the tiles that are currently registered.
///
/// Results for a tile are only accepted while that tile is registered, so
/// reconstructions that finish after their tile was evicted are dropped.
#[derive(Clone, Debug, Default)]
pub struct Cache {
    /// The codons by tile.
    tiles: HashMap<tile::Key, TileCodons>,
}

impl Cache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tile. Registering a tile twice keeps its codons.
    pub fn register(&mut self, key: tile::Key) {
        self.tiles.entry(key).or_default();
    }

    /// Returns whether a tile is registered.
    pub fn is_registered(&self, key: &tile::Key) -> bool {
        self.tiles.contains_key(key)
    }

    /// Evicts a tile and returns its codons.
    pub fn evict(&mut self, key: &tile::Key) -> Option<TileCodons> {
        self.tiles.remove(key)
    }

    /// Evicts every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Stores the codons of a transcript on a tile.
    ///
    /// Returns `false`, and stores nothing, if the tile is not registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use txtrack::codon::AminoAcid;
    /// use txtrack::codon::Codon;
    /// use txtrack::frame::Cache;
    /// use txtrack::tile::Key;
    ///
    /// let key = Key::new(3, 7);
    /// let codons = vec![Codon::new([100, 101, 102], AminoAcid::Methionine)];
    ///
    /// let mut cache = Cache::new();
    /// assert!(!cache.apply(key, "T1", codons.clone()));
    ///
    /// cache.register(key);
    /// assert!(cache.apply(key, "T1", codons));
    /// assert_eq!(cache.codons(&key, "T1").unwrap().len(), 1);
    ///
    /// cache.evict(&key);
    /// assert!(cache.codons(&key, "T1").is_none());
    /// ```
    pub fn apply(&mut self, key: tile::Key, id: impl Into<String>, codons: Vec<Codon>) -> bool {
        match self.tiles.get_mut(&key) {
            Some(tile) => {
                tile.insert(id.into(), codons);
                true
            }
            None => false,
        }
    }

    /// Gets the codons of every transcript on a tile.
    pub fn tile(&self, key: &tile::Key) -> Option<&TileCodons> {
        self.tiles.get(key)
    }

    /// Gets the codons of a transcript on a tile.
    pub fn codons(&self, key: &tile::Key, id: &str) -> Option<&[Codon]> {
        self.tiles
            .get(key)
            .and_then(|tile| tile.get(id))
            .map(|codons| codons.as_slice())
    }

    /// Gets the number of registered tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns whether no tiles are registered.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::codon::AminoAcid;

    use super::*;

    #[test]
    fn test_register_keeps_codons() {
        let key = tile::Key::new(1, 1);
        let mut cache = Cache::new();

        cache.register(key);
        cache.apply(key, "T1", vec![Codon::new([0, 1, 2], AminoAcid::Lysine)]);
        cache.register(key);

        assert_eq!(cache.codons(&key, "T1").map(|codons| codons.len()), Some(1));
    }

    #[test]
    fn test_clear() {
        let mut cache = Cache::new();
        cache.register(tile::Key::new(1, 1));
        cache.register(tile::Key::new(1, 2));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.apply(tile::Key::new(1, 1), "T1", Vec::new()));
    }
}
