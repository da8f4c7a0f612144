//! Items placed in the masonry grid.
//!
//! The layout only needs two things from an item: its identity, used to
//! build stable render keys, and the aspect ratio of its image, used to
//! estimate how tall it will be.

use derive_setters::Setters;

/// Aspect ratio used when an image carries none, or an unusable one.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Image metadata attached to an item.
#[derive(Clone, Debug, Default, PartialEq, Setters)]
#[setters(strip_option, into)]
pub struct ImageDescriptor {
    /// Identity of the image on the data source, if known.
    pub id: Option<String>,
    /// Width divided by height.
    pub aspect_ratio: Option<f64>,
    /// Location of the image, opaque to the grid.
    pub url: Option<String>,
}

impl ImageDescriptor {
    /// Creates an image descriptor with the given aspect ratio.
    pub fn with_aspect_ratio(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio: Some(aspect_ratio),
            ..Self::default()
        }
    }

    /// Returns the aspect ratio, falling back to [`DEFAULT_ASPECT_RATIO`] when
    /// it is missing, non-positive or not finite.
    pub fn resolved_aspect_ratio(&self) -> f64 {
        match self.aspect_ratio {
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => ratio,
            _ => DEFAULT_ASPECT_RATIO,
        }
    }

    /// Height per unit of width. Lower values mean a shorter tile.
    pub fn inverse_aspect_ratio(&self) -> f64 {
        1.0 / self.resolved_aspect_ratio()
    }
}

/// Anything the masonry grid can lay out.
pub trait MasonryItem {
    /// Opaque identity token, used in render keys.
    fn id(&self) -> &str;

    /// Image metadata. Items without an image are left out of the layout.
    fn image(&self) -> Option<&ImageDescriptor>;
}

impl<T: MasonryItem + ?Sized> MasonryItem for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn image(&self) -> Option<&ImageDescriptor> {
        (**self).image()
    }
}

impl<T: MasonryItem + ?Sized> MasonryItem for std::sync::Arc<T> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn image(&self) -> Option<&ImageDescriptor> {
        (**self).image()
    }
}

/// An artwork as returned by the artworks connection.
///
/// Everything except `id` and `image` is display payload that the grid
/// carries through untouched.
#[derive(Clone, Debug, Default, PartialEq, Setters)]
#[setters(strip_option, into, prefix = "with_")]
pub struct Artwork {
    /// Opaque identity token.
    #[setters(skip)]
    pub id: String,
    /// Primary image, when the artwork has one.
    pub image: Option<ImageDescriptor>,
    /// Display title.
    pub title: Option<String>,
    /// Display artist names.
    pub artist_names: Option<String>,
    /// Sale message such as a price or "Sold".
    pub sale_message: Option<String>,
}

impl Artwork {
    /// Creates an artwork with no image and no payload.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

impl MasonryItem for Artwork {
    fn id(&self) -> &str {
        &self.id
    }

    fn image(&self) -> Option<&ImageDescriptor> {
        self.image.as_ref()
    }
}
