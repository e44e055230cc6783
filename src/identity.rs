//! Per-category match masks for each block of pattern positions.
//!
//! For block width `K`, pattern position `p` lives in block `p / K` at bit
//! `p % K`. The table holds, for every base category and block, a `K`-bit
//! mask of the positions that category satisfies. Positions past the end of
//! the pattern (in a partial last block) are set, i.e. "always satisfied";
//! the scanner discounts them afterwards.
use crate::alphabet::NUM_CATEGORIES;
use crate::automaton::check_block_width;
use crate::common::NucgrepError;
use crate::pattern::Pattern;

#[derive(Clone, Debug)]
pub struct IdentityTable {
    width: usize,
    blocks: usize,
    pattern_len: usize,
    /// Category-major: `masks[category * blocks + block]`.
    masks: Vec<u8>,
}

impl IdentityTable {
    /// Build the table for `pattern` with blocks of `width` positions.
    pub fn new(pattern: &Pattern, width: usize) -> Result<Self, NucgrepError> {
        check_block_width(width)?;
        let len = pattern.len();
        let blocks = len.div_ceil(width);
        let full = (0xFFu16 >> (8 - width)) as u8;
        let mut masks = vec![full; blocks * NUM_CATEGORIES];
        for category in 0..NUM_CATEGORIES {
            let row = &mut masks[category * blocks..(category + 1) * blocks];
            for (pos, mask) in pattern.masks().iter().enumerate() {
                if !mask.contains(category as u8) {
                    row[pos / width] &= !(1 << (pos % width));
                }
            }
        }
        Ok(Self { width, blocks, pattern_len: len, masks })
    }

    /// Match masks of every block for one base category.
    #[inline]
    pub fn row(&self, category: u8) -> &[u8] {
        let start = category as usize * self.blocks;
        &self.masks[start..start + self.blocks]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of blocks, `ceil(L / K)`.
    pub fn blocks(&self) -> usize {
        self.blocks
    }

    /// Used positions in the last block, or 0 if it is full.
    pub fn depth(&self) -> usize {
        self.pattern_len % self.width
    }
}
