//! Palette of tile kinds available to the generator.

use arrayvec::ArrayVec;

use crate::types::{TileType, MAX_PALETTE_SIZE, MIN_PALETTE_SIZE};

/// Ordered set of kinds `0..len`, stack-allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    kinds: ArrayVec<TileType, MAX_PALETTE_SIZE>,
}

impl Palette {
    /// Build a palette of `size` kinds.
    ///
    /// Returns None unless `MIN_PALETTE_SIZE <= size <= MAX_PALETTE_SIZE`. Fewer than
    /// three kinds cannot always avoid an immediate triple during generation.
    pub fn new(size: usize) -> Option<Self> {
        if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&size) {
            return None;
        }
        let kinds = (0..size as u8).map(TileType).collect();
        Some(Self { kinds })
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<TileType> {
        self.kinds.get(index).copied()
    }

    pub fn contains(&self, kind: TileType) -> bool {
        kind.index() < self.kinds.len()
    }

    pub fn kinds(&self) -> &[TileType] {
        &self.kinds
    }
}

impl Default for Palette {
    fn default() -> Self {
        let kinds = (0..MIN_PALETTE_SIZE as u8).map(TileType).collect();
        Self { kinds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(Palette::new(0).is_none());
        assert!(Palette::new(2).is_none());
        assert!(Palette::new(MAX_PALETTE_SIZE + 1).is_none());
        assert!(Palette::new(3).is_some());
        assert!(Palette::new(MAX_PALETTE_SIZE).is_some());
    }

    #[test]
    fn kinds_are_sequential() {
        let palette = Palette::new(4).unwrap();
        assert_eq!(palette.len(), 4);
        assert_eq!(
            palette.kinds(),
            &[TileType(0), TileType(1), TileType(2), TileType(3)]
        );
        assert_eq!(palette.get(3), Some(TileType(3)));
        assert_eq!(palette.get(4), None);
        assert!(palette.contains(TileType(3)));
        assert!(!palette.contains(TileType(4)));
    }

    #[test]
    fn default_is_minimum_palette() {
        assert_eq!(Palette::default(), Palette::new(MIN_PALETTE_SIZE).unwrap());
    }
}
