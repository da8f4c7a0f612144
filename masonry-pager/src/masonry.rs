//! Column balancing for the masonry grid.
//!
//! Real tile heights are unknown until the tiles render, so the grid
//! estimates them from the image aspect ratio: a tile's height per unit of
//! width is `1 / aspect_ratio`. Each item goes to the section whose running
//! sum of those inverse ratios is smallest, i.e. the visually shortest one.
//!
//! The estimate ignores everything below the image (titles, sale messages),
//! so columns can still end up uneven when those differ a lot.
//!
//! The partition is pure and cheap (one pass, `items x sections`), so it is
//! recomputed over the full item list on every render pass instead of being
//! maintained incrementally.

use smallvec::SmallVec;

use crate::item::MasonryItem;

/// One vertical lane of the grid.
#[derive(Debug, PartialEq)]
pub struct MasonrySection<'a, T> {
    index: usize,
    items: Vec<&'a T>,
    inverse_ratio_sum: f64,
}

impl<'a, T> MasonrySection<'a, T> {
    fn new(index: usize) -> Self {
        Self {
            index,
            items: Vec::new(),
            inverse_ratio_sum: 0.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    /// Sum of `1 / aspect_ratio` over the section's items.
    pub fn inverse_ratio_sum(&self) -> f64 {
        self.inverse_ratio_sum
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Splits `items` into `section_count` sections of roughly equal estimated
/// height.
///
/// Items without an image are dropped. Ties go to the lowest section index,
/// so the result depends only on the inputs. A `section_count` of zero is
/// treated as one.
pub fn partition_into_sections<'a, T, I>(items: I, section_count: usize) -> Vec<MasonrySection<'a, T>>
where
    T: MasonryItem + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let section_count = section_count.max(1);
    let mut sections: Vec<_> = (0..section_count).map(MasonrySection::new).collect();
    let mut sums: SmallVec<[f64; 4]> = SmallVec::from_elem(0.0, section_count);

    for item in items {
        let Some(image) = item.image() else {
            continue;
        };
        let target = shortest_section(&sums);
        sums[target] += image.inverse_aspect_ratio();
        sections[target].items.push(item);
    }

    for (section, sum) in sections.iter_mut().zip(sums) {
        section.inverse_ratio_sum = sum;
    }
    sections
}

/// Index of the strictly smallest sum, first one on ties.
fn shortest_section(sums: &[f64]) -> usize {
    let mut lowest = f64::INFINITY;
    let mut index = 0;
    for (candidate, &sum) in sums.iter().enumerate() {
        if sum < lowest {
            lowest = sum;
            index = candidate;
        }
    }
    index
}
