//! Render output of the grid.
//!
//! A [`GridFrame`] is everything a UI adapter needs to draw one pass of the
//! grid: the sections with their widths and margins, the items in each
//! section with stable keys and estimated positions, the spacers between
//! items, and whether the loading spinner should show.
//!
//! Positions are estimates derived from aspect ratios. The adapter is free to
//! lay tiles out with their real measured heights instead.

use crate::{Dp, item::MasonryItem, layout::SectionLayout, masonry::MasonrySection};

/// Accessibility label of spacer elements.
pub const SPACER_ACCESSIBILITY_LABEL: &str = "Spacer View";

/// A tile in a section.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemElement<T> {
    /// Stable render key: section, position and item identity.
    pub key: String,
    pub item: T,
    /// Estimated top edge within the section.
    pub y: Dp,
    /// Estimated image height: section width over aspect ratio.
    pub height: Dp,
}

/// Vertical gap between two tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct SpacerElement {
    pub key: String,
    /// Always [`SPACER_ACCESSIBILITY_LABEL`].
    pub accessibility_label: &'static str,
    pub y: Dp,
    pub height: Dp,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SectionElement<T> {
    Item(ItemElement<T>),
    Spacer(SpacerElement),
}

impl<T> SectionElement<T> {
    pub fn key(&self) -> &str {
        match self {
            Self::Item(item) => &item.key,
            Self::Spacer(spacer) => &spacer.key,
        }
    }

    pub fn as_item(&self) -> Option<&ItemElement<T>> {
        match self {
            Self::Item(item) => Some(item),
            Self::Spacer(_) => None,
        }
    }
}

/// One rendered column.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionFrame<T> {
    pub index: usize,
    /// `"Section {index}"`.
    pub accessibility_label: String,
    pub x: Dp,
    pub width: Dp,
    /// Gap to the next section, zero for the last one.
    pub trailing_margin: Dp,
    pub elements: Vec<SectionElement<T>>,
    /// Estimated height of all elements.
    pub estimated_height: Dp,
}

impl<T> SectionFrame<T> {
    /// Tiles of the section, spacers skipped.
    pub fn items(&self) -> impl Iterator<Item = &ItemElement<T>> {
        self.elements.iter().filter_map(SectionElement::as_item)
    }
}

/// One render pass of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct GridFrame<T> {
    /// Empty until the grid has been measured.
    pub sections: Vec<SectionFrame<T>>,
    /// Whether a page fetch is outstanding.
    pub show_spinner: bool,
    /// Height of the tallest section.
    pub estimated_content_height: Dp,
}

impl<T> GridFrame<T> {
    /// Frame with no sections, used before the first layout pass.
    pub fn unmeasured(show_spinner: bool) -> Self {
        Self {
            sections: Vec::new(),
            show_spinner,
            estimated_content_height: Dp::ZERO,
        }
    }

    /// Number of tiles across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|section| section.items().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Turns balanced sections into a frame.
pub fn build_frame<T>(
    layout: &SectionLayout,
    sections: &[MasonrySection<'_, T>],
    item_margin: Dp,
    show_spinner: bool,
) -> GridFrame<T>
where
    T: MasonryItem + Clone,
{
    let width = layout.section_width();
    let item_margin = item_margin.non_negative();

    let sections: Vec<_> = sections
        .iter()
        .map(|section| {
            let index = section.index();
            let mut elements = Vec::with_capacity(section.len() * 2);
            let mut y = Dp::ZERO;
            let last = section.len().saturating_sub(1);

            for (position, item) in section.items().iter().enumerate() {
                let id = item.id();
                let ratio = item
                    .image()
                    .map_or(1.0, |image| image.resolved_aspect_ratio());
                let height = width / ratio;
                elements.push(SectionElement::Item(ItemElement {
                    key: format!("artwork-{index}-{position}-{id}"),
                    item: (*item).clone(),
                    y,
                    height,
                }));
                y += height;

                if position < last {
                    elements.push(SectionElement::Spacer(SpacerElement {
                        key: format!("spacer-{index}-{position}-{id}"),
                        accessibility_label: SPACER_ACCESSIBILITY_LABEL,
                        y,
                        height: item_margin,
                    }));
                    y += item_margin;
                }
            }

            SectionFrame {
                index,
                accessibility_label: format!("Section {index}"),
                x: layout.section_origin(index),
                width,
                trailing_margin: layout.trailing_margin(index),
                elements,
                estimated_height: y,
            }
        })
        .collect();

    let estimated_content_height = sections
        .iter()
        .map(|section| section.estimated_height)
        .fold(Dp::ZERO, Dp::max);

    GridFrame {
        sections,
        show_spinner,
        estimated_content_height,
    }
}
