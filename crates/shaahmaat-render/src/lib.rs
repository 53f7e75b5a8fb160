//! Board rendering for parsed ShaahMaat blocks.
//!
//! [`render`] lays out the 64 squares for the board's orientation, places the
//! pieces, builds the arrow polygons and returns an immutable markup tree.
//! [`document`] applies the same to every `shaahmaat` fence of a markdown file.

pub mod arrow;
pub mod document;
pub mod layout;
pub mod markup;
pub mod renderer;
pub mod style;

pub use arrow::{arrow_geometry, square_center, ArrowGeometry, Point};
pub use document::{collect, render_document, CollectedDocument, DocumentError};
pub use layout::{displayed_square, grid_position, BoardLayout, SquareView};
pub use markup::{Element, ElementBuilder, Node, SVG_NAMESPACE};
pub use renderer::{render, BoardRenderer};
pub use style::{StyleConfig, StyleOverrides};
