//! Viewport transform controller.
//!
//! Owns the pan/zoom state of one image inside one container and turns
//! wheel and pointer input into transforms written through an
//! [`ImageSurface`]. All handlers run to completion; state is only
//! committed after the surface accepted the matching style write.

use crate::config::ZoomConfig;
use crate::error::ViewerError;
use crate::layout::Point;
use crate::state::pan::{DragEnd, PanDragState};
use crate::surface::ImageSurface;
use crate::zoom_math::{self, Transform};

/// Result of a wheel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomOutcome {
    /// New transform was applied
    Applied(Transform),
    /// Step would reach the minimum scale; nothing changed
    Rejected,
}

/// Result of a click on the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Zoomed to native size around the clicked point
    Zoomed(Transform),
    /// Returned to the CSS-fitted view
    Reset,
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerUp {
    /// No drag session was open
    Ignored,
    /// Session moved the image
    Panned,
    /// Session had no movement and was handled as a click
    Clicked(ClickOutcome),
}

impl PointerUp {
    /// A release that ends a pan is not also a page click.
    pub fn consumes_event(&self) -> bool {
        matches!(self, PointerUp::Panned)
    }
}

/// Pan/zoom controller for one image.
#[derive(Debug)]
pub struct ViewportController<S> {
    surface: S,
    /// `None` while the image shows the CSS-fitted view
    transform: Option<Transform>,
    drag: PanDragState,
    zoom: ZoomConfig,
}

impl<S: ImageSurface> ViewportController<S> {
    pub fn new(surface: S, zoom: ZoomConfig) -> Self {
        Self {
            surface,
            transform: None,
            drag: PanDragState::default(),
            zoom,
        }
    }

    /// Active transform, `None` in the fitted view.
    pub fn transform(&self) -> Option<Transform> {
        self.transform
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for layout changes between events.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Zoom by one wheel step, keeping the image point under the pointer fixed.
    ///
    /// Steps that would bring the scale to or below the configured minimum
    /// leave the state untouched.
    pub fn wheel(&mut self, page: Point, delta_y: f64) -> Result<ZoomOutcome, ViewerError> {
        let current = self.transform.unwrap_or_default();
        let new_scale = current.scale * zoom_math::wheel_scale_factor(delta_y, self.zoom.step);

        if new_scale.is_nan() || new_scale <= self.zoom.min_scale {
            log::debug!(
                "Zoom to {new_scale} rejected (minimum {})",
                self.zoom.min_scale
            );
            return Ok(ZoomOutcome::Rejected);
        }

        let cursor = self.surface.image_position(page);
        let next = current.zoom_to_cursor(new_scale, cursor);
        self.apply(next)?;
        Ok(ZoomOutcome::Applied(next))
    }

    /// Toggle between the fitted view and native size at the clicked point.
    pub fn click(&mut self, page: Point) -> Result<ClickOutcome, ViewerError> {
        if self.transform.is_some() {
            self.reset()?;
            log::debug!("Image back to fitted view");
            return Ok(ClickOutcome::Reset);
        }

        let container = self.surface.container_size();
        if container.is_empty() {
            return Err(ViewerError::EmptyViewport {
                width: container.width,
                height: container.height,
            });
        }
        let native = self.surface.native_size()?;

        let pos = self.surface.image_position(page);
        let next = zoom_math::zoom_at_point(pos, container, native, self.surface.image_offset());
        self.apply(next)?;
        log::debug!("Zoomed to native size at ({}, {})", pos.x, pos.y);
        Ok(ClickOutcome::Zoomed(next))
    }

    /// Open a drag session at `page`.
    pub fn pointer_down(&mut self, page: Point) {
        let translation = self.transform.unwrap_or_default().translation();
        self.drag.start_drag(page, translation);
    }

    /// Pan to follow the pointer; `None` outside a drag session.
    pub fn pointer_move(&mut self, page: Point) -> Result<Option<Transform>, ViewerError> {
        let Some(translation) = self.drag.drag_to(page) else {
            return Ok(None);
        };

        let next = self.transform.unwrap_or_default().with_translation(translation);
        self.apply(next)?;
        Ok(Some(next))
    }

    /// Close the drag session; a session without movement becomes a click.
    pub fn pointer_up(&mut self, page: Point) -> Result<PointerUp, ViewerError> {
        match self.drag.stop_drag() {
            None => Ok(PointerUp::Ignored),
            Some(DragEnd::Pan) => Ok(PointerUp::Panned),
            Some(DragEnd::Click) => self.click(page).map(PointerUp::Clicked),
        }
    }

    /// Drop the transform and return to the fitted view.
    pub fn reset(&mut self) -> Result<(), ViewerError> {
        self.surface.clear_transform()?;
        self.transform = None;
        Ok(())
    }

    fn apply(&mut self, transform: Transform) -> Result<(), ViewerError> {
        self.surface.apply_transform(&transform)?;
        self.transform = Some(transform);
        Ok(())
    }
}
