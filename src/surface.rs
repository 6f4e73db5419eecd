//! The image element as seen by the viewport controller.
//!
//! [`ImageSurface`] is the seam between transform logic and the page: the
//! browser build implements it over live DOM elements, [`MemorySurface`]
//! over a static layout for tests and trace replay.

use serde::{Deserialize, Serialize};

use crate::constants::style::{TRANSFORM_NONE, TRANSFORM_ORIGIN};
use crate::error::ViewerError;
use crate::layout::{self, LayoutBox, Point, Size};
use crate::zoom_math::Transform;

/// Geometry source and style sink for one image inside one container.
pub trait ImageSurface {
    /// Pointer position in untransformed image space.
    fn image_position(&self, page: Point) -> Point;

    /// Container size in CSS pixels.
    fn container_size(&self) -> Size;

    /// Image offset inside the container.
    fn image_offset(&self) -> Point;

    /// Native pixel size of the image.
    fn native_size(&self) -> Result<Size, ViewerError>;

    /// Pin the origin at the top-left corner, then set `transform`.
    fn apply_transform(&mut self, transform: &Transform) -> Result<(), ViewerError>;

    /// Return to the CSS-fitted view.
    fn clear_transform(&mut self) -> Result<(), ViewerError>;
}

/// Parse a native size attribute; must be a positive integer.
pub fn parse_dimension(attribute: &str, raw: &str) -> Result<f64, ViewerError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(f64::from(value)),
        _ => Err(ViewerError::invalid_dimension(attribute, raw)),
    }
}

/// Inline style values of the image element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub transform_origin: Option<String>,
    pub transform: Option<String>,
}

/// Surface over a fixed layout; style writes are recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySurface {
    /// Container box with its offset-parent chain
    pub container: LayoutBox,
    /// Image offset inside the container
    #[serde(default, rename = "image")]
    pub image_offset: Point,
    /// Native pixel size of the image
    pub native: Size,
    #[serde(skip)]
    style: InlineStyle,
}

impl MemorySurface {
    pub fn new(container: LayoutBox, image_offset: Point, native: Size) -> Self {
        Self {
            container,
            image_offset,
            native,
            style: InlineStyle::default(),
        }
    }

    pub fn style(&self) -> &InlineStyle {
        &self.style
    }
}

impl ImageSurface for MemorySurface {
    fn image_position(&self, page: Point) -> Point {
        layout::position(page, &self.container, self.image_offset)
    }

    fn container_size(&self) -> Size {
        self.container.size()
    }

    fn image_offset(&self) -> Point {
        self.image_offset
    }

    fn native_size(&self) -> Result<Size, ViewerError> {
        if self.native.is_empty() {
            return Err(ViewerError::invalid_dimension(
                "native size",
                format!("{}x{}", self.native.width, self.native.height),
            ));
        }
        Ok(self.native)
    }

    fn apply_transform(&mut self, transform: &Transform) -> Result<(), ViewerError> {
        self.style.transform_origin = Some(TRANSFORM_ORIGIN.to_string());
        self.style.transform = Some(transform.to_css());
        Ok(())
    }

    fn clear_transform(&mut self) -> Result<(), ViewerError> {
        self.style.transform = Some(TRANSFORM_NONE.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("data-width", "1600").unwrap(), 1600.0);
        assert_eq!(parse_dimension("data-width", " 1200 ").unwrap(), 1200.0);
    }

    #[test]
    fn test_parse_dimension_rejects_garbage() {
        for raw in ["", "0", "-5", "12.5", "wide", "1600px"] {
            let err = parse_dimension("data-height", raw).unwrap_err();
            assert!(
                matches!(&err, ViewerError::InvalidDimension { attribute, value }
                    if attribute == "data-height" && value == raw),
                "{raw:?}: {err}"
            );
        }
    }

    #[test]
    fn test_memory_surface_records_style() {
        let mut surface = MemorySurface::new(
            LayoutBox::new(0.0, 0.0, 800.0, 600.0),
            Point::ORIGIN,
            Size::new(1600.0, 1200.0),
        );
        assert_eq!(surface.style(), &InlineStyle::default());

        surface
            .apply_transform(&Transform::new(-400.0, -300.0, 2.0))
            .unwrap();
        assert_eq!(surface.style().transform_origin.as_deref(), Some("0px 0px"));
        assert_eq!(
            surface.style().transform.as_deref(),
            Some("translate(-400px, -300px) scale(2)")
        );

        surface.clear_transform().unwrap();
        assert_eq!(surface.style().transform.as_deref(), Some("none"));
    }

    #[test]
    fn test_memory_surface_rejects_empty_native_size() {
        let surface = MemorySurface::new(
            LayoutBox::new(0.0, 0.0, 800.0, 600.0),
            Point::ORIGIN,
            Size::new(0.0, 1200.0),
        );
        assert!(surface.native_size().is_err());
    }
}
