//! Book layout
//!
//! Sizes the cover and interior leaves inside the host container and
//! assigns each page its box, anchor edge and semantic label. Pure math:
//! the host applies the result to whatever it renders with.

use std::collections::HashMap;
use std::hash::BuildHasher;

use flipbook_geometry::Size;

use crate::config::BookOptions;
use crate::error::Result;
use crate::semantics::{PageSemantic, PageSemantics};

/// Horizontal edge of a page box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Right,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Host element the book renders into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
    /// Number of page nodes found inside the container
    pub page_count: usize,
}

impl Container {
    pub fn new(width: f32, height: f32, page_count: usize) -> Self {
        Self {
            width,
            height,
            page_count,
        }
    }
}

/// Lookup of containers by selector
pub trait Surface {
    fn query(&self, selector: &str) -> Option<Container>;
}

impl<S: BuildHasher> Surface for HashMap<String, Container, S> {
    fn query(&self, selector: &str) -> Option<Container> {
        self.get(selector).copied()
    }
}

/// Which side of its leaf a page is printed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSide {
    Front,
    Back,
}

/// Placement of one page
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub index: usize,
    pub leaf_index: usize,
    pub side: PageSide,
    pub size: Size,
    /// Edge the page box is anchored to inside the container
    pub anchor: Edge,
    /// Distance from the anchor edge to the spread
    pub inline_offset: f32,
    pub top: f32,
    /// Stacking order before any leaf turns
    pub z_index: i64,
    pub is_cover: bool,
    pub semantic: PageSemantic,
}

/// Computed layout of a rendered book
#[derive(Debug, Clone, PartialEq)]
pub struct BookLayout {
    pub container: Size,
    pub cover_size: Size,
    pub leaf_size: Size,
    /// CSS-style perspective distance for the 3D turn
    pub perspective: f32,
    pub pages: Vec<PageLayout>,
}

impl BookLayout {
    /// Lay out `options.pages_count` pages inside `container`
    pub fn compute(
        container: &Container,
        options: &BookOptions,
        semantics: &dyn PageSemantics,
    ) -> Result<Self> {
        let bounds = Size::new(container.width, container.height)?;
        let padding = options.padding.max(0.0);

        // Half the container holds one page of the spread
        let page_bounds = Size::new(
            (bounds.width() - 2.0 * padding) / 2.0,
            bounds.height() - 2.0 * padding,
        )?;

        let cover_ratio = options.cover_aspect_ratio;
        let leaf_ratio = options.leaf_aspect_ratio;
        let cover_size = page_bounds.aspect_ratio_fit(&cover_ratio);
        let leaf_size = Size::new(
            cover_size.width() * leaf_ratio.width() / cover_ratio.width(),
            cover_size.height() * leaf_ratio.height() / cover_ratio.height(),
        )?;

        let perspective = (leaf_size.width() * 2.0).min(leaf_size.height()) * 2.0;

        let pages_count = options.pages_count;
        let leaves_count = pages_count.div_ceil(2);
        let distinct_covers = options.distinct_covers();
        let anchor = if options.direction.is_ltr() {
            Edge::Left
        } else {
            Edge::Right
        };

        let pages = (0..pages_count)
            .map(|index| {
                let leaf_index = index / 2;
                let is_cover =
                    distinct_covers && (leaf_index == 0 || leaf_index + 1 == leaves_count);
                let size = if is_cover { cover_size } else { leaf_size };
                PageLayout {
                    index,
                    leaf_index,
                    side: if index % 2 == 0 {
                        PageSide::Front
                    } else {
                        PageSide::Back
                    },
                    size,
                    anchor,
                    inline_offset: (bounds.width() - 2.0 * size.width()) / 2.0,
                    top: (bounds.height() - size.height()) / 2.0,
                    z_index: pages_count as i64 - index as i64,
                    is_cover,
                    semantic: PageSemantic::lookup(semantics, index),
                }
            })
            .collect();

        Ok(Self {
            container: bounds,
            cover_size,
            leaf_size,
            perspective,
            pages,
        })
    }

    /// Width of an open two-page spread, the full travel of a drag
    pub fn spread_width(&self) -> f32 {
        self.leaf_size.width() * 2.0
    }

    pub fn page(&self, index: usize) -> Option<&PageLayout> {
        self.pages.get(index)
    }
}
