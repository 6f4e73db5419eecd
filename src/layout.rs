//! Page geometry and pointer coordinate mapping.
//!
//! Every transform computation works in the image's local, untransformed
//! coordinate space: the origin is the top-left corner of the image
//! element as laid out inside its container, before any pan or zoom.
//! [`position`] converts page coordinates of a pointer event into that
//! space by walking the container's offset-parent chain.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin (0, 0).
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True unless both sides are strictly positive.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Center point of a box of this size anchored at the origin.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An element positioned relative to its offset parent.
///
/// Mirrors the DOM's `offsetLeft` / `offsetTop` / `offsetParent` triple.
pub trait OffsetElement: Sized {
    /// Horizontal offset from the offset parent's padding edge.
    fn offset_left(&self) -> f64;
    /// Vertical offset from the offset parent's padding edge.
    fn offset_top(&self) -> f64;
    /// Next element up the offset chain, `None` at the document root.
    fn offset_parent(&self) -> Option<Self>;
}

/// Sum the offsets of `element` and every offset ancestor.
pub fn page_offset<E: OffsetElement>(element: E) -> Point {
    let mut offset = Point::ORIGIN;
    let mut current = Some(element);
    while let Some(el) = current {
        offset.x += el.offset_left();
        offset.y += el.offset_top();
        current = el.offset_parent();
    }
    offset
}

/// Map a pointer's page coordinates into untransformed image space.
///
/// `image_offset` is the image's own offset inside `container`. Layout may
/// change between events, so callers re-derive this for every event.
pub fn position<E: OffsetElement>(page: Point, container: E, image_offset: Point) -> Point {
    page - page_offset(container) - image_offset
}

/// Pick a pointer coordinate: the fractional `pageX`/`pageY` value when the
/// browser reports a finite one, else the integer fallback.
pub fn page_coordinate(precise: Option<f64>, rounded: i32) -> f64 {
    precise
        .filter(|value| value.is_finite())
        .unwrap_or_else(|| f64::from(rounded))
}

/// A static layout box, used where no live DOM is available.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBox {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Offset parent, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<LayoutBox>>,
}

impl LayoutBox {
    /// Create a root box at the given offset with the given size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            parent: None,
        }
    }

    /// Attach an offset parent.
    pub fn with_parent(mut self, parent: LayoutBox) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl<'a> OffsetElement for &'a LayoutBox {
    fn offset_left(&self) -> f64 {
        self.left
    }

    fn offset_top(&self) -> f64 {
        self.top
    }

    fn offset_parent(&self) -> Option<&'a LayoutBox> {
        let this: &'a LayoutBox = *self;
        this.parent.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offset_of_root_box() {
        let root = LayoutBox::new(12.0, 34.0, 100.0, 100.0);
        assert_eq!(page_offset(&root), Point::new(12.0, 34.0));
    }

    #[test]
    fn test_page_offset_walks_parent_chain() {
        let body = LayoutBox::new(8.0, 8.0, 0.0, 0.0);
        let main = LayoutBox::new(100.0, 40.0, 0.0, 0.0).with_parent(body);
        let container = LayoutBox::new(20.0, 10.0, 800.0, 600.0).with_parent(main);

        assert_eq!(page_offset(&container), Point::new(128.0, 58.0));
    }

    #[test]
    fn test_position_subtracts_container_and_image_offsets() {
        let container =
            LayoutBox::new(50.0, 20.0, 800.0, 600.0).with_parent(LayoutBox::new(10.0, 10.0, 0.0, 0.0));
        let pos = position(Point::new(465.0, 330.0), &container, Point::new(5.0, 0.0));

        assert_eq!(pos, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_position_at_origin_is_identity() {
        let container = LayoutBox::new(0.0, 0.0, 800.0, 600.0);
        let pos = position(Point::new(400.0, 300.0), &container, Point::ORIGIN);
        assert_eq!(pos, Point::new(400.0, 300.0));
    }

    #[test]
    fn test_page_coordinate_keeps_subpixel_position() {
        assert_eq!(page_coordinate(Some(412.75), 412), 412.75);
        assert_eq!(page_coordinate(None, 412), 412.0);
        assert_eq!(page_coordinate(Some(f64::NAN), 7), 7.0);
        assert_eq!(page_coordinate(Some(f64::INFINITY), 7), 7.0);
    }

    #[test]
    fn test_empty_size() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(Size::new(f64::NAN, 10.0).is_empty());
        assert!(!Size::new(800.0, 600.0).is_empty());
    }

    #[test]
    fn test_layout_box_parses_without_parent() {
        let json = r#"{"left": 5, "top": 6, "width": 800, "height": 600}"#;
        let parsed: LayoutBox = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, LayoutBox::new(5.0, 6.0, 800.0, 600.0));
    }
}
