//! DOM implementations of the viewer traits.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlElement, Location, MouseEvent};

use crate::constants::attribute::{HEIGHT, WIDTH};
use crate::constants::style::{TRANSFORM_NONE, TRANSFORM_ORIGIN};
use crate::error::ViewerError;
use crate::keybindings::NavIntent;
use crate::layout::{self, OffsetElement, Point, Size};
use crate::navigation::{NavigationTargets, Navigator};
use crate::surface::{ImageSurface, parse_dimension};
use crate::zoom_math::Transform;

pub(crate) fn dom_error(err: JsValue) -> ViewerError {
    ViewerError::Dom(format!("{err:?}"))
}

/// Look up `id` as an HTML element.
pub(crate) fn html_element(document: &Document, id: &str) -> Result<HtmlElement, ViewerError> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .ok_or_else(|| ViewerError::missing_element(id))
}

/// Pointer position in page coordinates, keeping sub-pixel precision.
///
/// `MouseEvent::page_x` is bound as an integer, so the raw properties are
/// read first.
pub(crate) fn page_point(event: &MouseEvent) -> Point {
    Point::new(
        layout::page_coordinate(event_number(event, "pageX"), event.page_x()),
        layout::page_coordinate(event_number(event, "pageY"), event.page_y()),
    )
}

fn event_number(event: &MouseEvent, property: &str) -> Option<f64> {
    js_sys::Reflect::get(event, &JsValue::from_str(property))
        .ok()?
        .as_f64()
}

impl OffsetElement for HtmlElement {
    fn offset_left(&self) -> f64 {
        f64::from(HtmlElement::offset_left(self))
    }

    fn offset_top(&self) -> f64 {
        f64::from(HtmlElement::offset_top(self))
    }

    fn offset_parent(&self) -> Option<Self> {
        HtmlElement::offset_parent(self).and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
    }
}

/// The album image and its clipping container.
pub(crate) struct DomSurface {
    container: HtmlElement,
    image: HtmlElement,
}

impl DomSurface {
    pub(crate) fn new(container: HtmlElement, image: HtmlElement) -> Self {
        Self { container, image }
    }

    pub(crate) fn container(&self) -> &HtmlElement {
        &self.container
    }

    fn dimension(&self, attribute: &str) -> Result<f64, ViewerError> {
        let raw = self
            .image
            .get_attribute(attribute)
            .ok_or_else(|| ViewerError::missing_attribute(self.image.id(), attribute))?;
        parse_dimension(attribute, &raw)
    }
}

impl ImageSurface for DomSurface {
    fn image_position(&self, page: Point) -> Point {
        layout::position(page, self.container.clone(), self.image_offset())
    }

    fn container_size(&self) -> Size {
        Size::new(
            f64::from(self.container.offset_width()),
            f64::from(self.container.offset_height()),
        )
    }

    fn image_offset(&self) -> Point {
        Point::new(
            f64::from(HtmlElement::offset_left(&self.image)),
            f64::from(HtmlElement::offset_top(&self.image)),
        )
    }

    fn native_size(&self) -> Result<Size, ViewerError> {
        Ok(Size::new(self.dimension(WIDTH)?, self.dimension(HEIGHT)?))
    }

    fn apply_transform(&mut self, transform: &Transform) -> Result<(), ViewerError> {
        let style = self.image.style();
        style
            .set_property("transform-origin", TRANSFORM_ORIGIN)
            .map_err(dom_error)?;
        style
            .set_property("transform", &transform.to_css())
            .map_err(dom_error)
    }

    fn clear_transform(&mut self) -> Result<(), ViewerError> {
        self.image
            .style()
            .set_property("transform", TRANSFORM_NONE)
            .map_err(dom_error)
    }
}

/// `data-<intent>` attributes of the navigation element.
///
/// The element is looked up on every key press; pages without it never
/// navigate.
pub(crate) struct PageTargets {
    document: Document,
    page_id: String,
}

impl PageTargets {
    pub(crate) fn new(document: Document, page_id: impl Into<String>) -> Self {
        Self {
            document,
            page_id: page_id.into(),
        }
    }
}

impl NavigationTargets for PageTargets {
    fn target(&self, intent: NavIntent) -> Option<String> {
        let Some(page) = self.document.get_element_by_id(&self.page_id) else {
            log::debug!("Navigation element #{} not found", self.page_id);
            return None;
        };
        page.get_attribute(&intent.attribute())
    }
}

pub(crate) struct LocationNavigator {
    location: Location,
}

impl LocationNavigator {
    pub(crate) fn new(location: Location) -> Self {
        Self { location }
    }
}

impl Navigator for LocationNavigator {
    fn navigate(&mut self, url: &str) -> Result<(), ViewerError> {
        self.location.set_href(url).map_err(dom_error)
    }
}

/// Move/up listeners of one drag session.
///
/// Listeners are removed by [`DragListeners::detach`] or on drop, whichever
/// comes first.
pub(crate) struct DragListeners {
    target: EventTarget,
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
    attached: bool,
}

impl DragListeners {
    pub(crate) fn attach(
        target: &EventTarget,
        on_move: impl FnMut(MouseEvent) + 'static,
        on_up: impl FnMut(MouseEvent) + 'static,
    ) -> Result<Self, ViewerError> {
        let listeners = Self {
            target: target.clone(),
            on_move: Closure::wrap(Box::new(on_move) as Box<dyn FnMut(MouseEvent)>),
            on_up: Closure::wrap(Box::new(on_up) as Box<dyn FnMut(MouseEvent)>),
            attached: true,
        };

        // On failure the drop below removes whatever was registered.
        target
            .add_event_listener_with_callback("mousemove", listeners.on_move.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        target
            .add_event_listener_with_callback("mouseup", listeners.on_up.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        Ok(listeners)
    }

    /// Unregister both listeners. The closures stay alive until drop, so this
    /// may be called from inside `on_up`.
    pub(crate) fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;

        self.target
            .remove_event_listener_with_callback("mousemove", self.on_move.as_ref().unchecked_ref())
            .ok();
        self.target
            .remove_event_listener_with_callback("mouseup", self.on_up.as_ref().unchecked_ref())
            .ok();
    }
}

impl Drop for DragListeners {
    fn drop(&mut self) {
        self.detach();
    }
}
