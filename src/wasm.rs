use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, KeyboardEvent, MouseEvent, WheelEvent, Window};

use crate::config::ViewerConfig;
use crate::dom::{self, DomSurface, DragListeners, LocationNavigator, PageTargets};
use crate::error::ViewerError;
use crate::navigation::{NavigationTargets, PageNavigator};
use crate::state::ViewportController;

type SharedViewer = Rc<RefCell<ViewportController<DomSurface>>>;
type DragSlot = Rc<RefCell<Option<DragListeners>>>;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Records are filtered through log::set_max_level below.
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("Logger not initialized: {e}").into());
    }

    let config = ViewerConfig::load_from_local_storage().unwrap_or_default();
    log::set_max_level(config.log_level.to_level_filter());

    let Some(window) = web_sys::window() else {
        return;
    };

    let on_load = Closure::wrap(Box::new(move |_event: Event| {
        if let Err(e) = bootstrap(&config) {
            log::warn!("Album viewer not started: {e}");
        }
    }) as Box<dyn FnMut(Event)>);
    window
        .add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())
        .ok();
    on_load.forget();
}

fn bootstrap(config: &ViewerConfig) -> Result<(), ViewerError> {
    let window = web_sys::window().ok_or_else(|| ViewerError::Dom("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ViewerError::Dom("no document".to_string()))?;

    register_navigation(&window, &document, config)?;

    match viewer_surface(&document, config) {
        Ok(surface) => {
            register_viewport(surface, config)?;
            log::debug!("Pan and zoom enabled on #{}", config.elements.container);
        }
        Err(e) => log::debug!("Pan and zoom disabled: {e}"),
    }
    Ok(())
}

fn register_navigation(
    window: &Window,
    document: &Document,
    config: &ViewerConfig,
) -> Result<(), ViewerError> {
    let targets = PageTargets::new(document.clone(), config.elements.page.as_str());
    log::debug!("Navigation targets: {:?}", targets.available());
    let mut pages = PageNavigator::new(
        config.keybindings,
        Some(targets),
        LocationNavigator::new(window.location()),
    );

    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if let Err(e) = pages.key_down(&event.key()) {
            log::debug!("Navigation failed: {e}");
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document
        .add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())
        .map_err(dom::dom_error)?;
    on_key.forget();
    Ok(())
}

fn viewer_surface(document: &Document, config: &ViewerConfig) -> Result<DomSurface, ViewerError> {
    let container = dom::html_element(document, &config.elements.container)?;
    let image = dom::html_element(document, &config.elements.image)?;
    Ok(DomSurface::new(container, image))
}

fn register_viewport(surface: DomSurface, config: &ViewerConfig) -> Result<(), ViewerError> {
    let target: EventTarget = surface.container().clone().into();
    let viewer: SharedViewer = Rc::new(RefCell::new(ViewportController::new(surface, config.zoom)));
    let drag: DragSlot = Rc::new(RefCell::new(None));

    // Wheel zoom
    {
        let viewer = viewer.clone();
        let on_wheel = Closure::wrap(Box::new(move |event: WheelEvent| {
            event.prevent_default();
            if let Err(e) = viewer
                .borrow_mut()
                .wheel(dom::page_point(&event), event.delta_y())
            {
                log::debug!("Zoom failed: {e}");
            }
        }) as Box<dyn FnMut(WheelEvent)>);
        target
            .add_event_listener_with_callback("wheel", on_wheel.as_ref().unchecked_ref())
            .map_err(dom::dom_error)?;
        on_wheel.forget();
    }

    // Drag session start; move/up listeners live in `drag` until the next one
    {
        let listen_on = target.clone();
        let on_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            // Keeps the browser from starting an image drag or text selection.
            event.prevent_default();
            event.stop_propagation();
            viewer.borrow_mut().pointer_down(dom::page_point(&event));
            match drag_listeners(&listen_on, &viewer, &drag) {
                Ok(listeners) => *drag.borrow_mut() = Some(listeners),
                Err(e) => log::debug!("Pan listeners not attached: {e}"),
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        target
            .add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())
            .map_err(dom::dom_error)?;
        on_down.forget();
    }

    Ok(())
}

fn drag_listeners(
    target: &EventTarget,
    viewer: &SharedViewer,
    slot: &DragSlot,
) -> Result<DragListeners, ViewerError> {
    let on_move = {
        let viewer = viewer.clone();
        move |event: MouseEvent| {
            if let Err(e) = viewer.borrow_mut().pointer_move(dom::page_point(&event)) {
                log::debug!("Pan failed: {e}");
            }
        }
    };

    // Weak: the slot owns this closure.
    let on_up = {
        let viewer = viewer.clone();
        let slot: Weak<RefCell<Option<DragListeners>>> = Rc::downgrade(slot);
        move |event: MouseEvent| {
            if let Some(slot) = slot.upgrade() {
                if let Some(listeners) = slot.borrow_mut().as_mut() {
                    listeners.detach();
                }
            }
            match viewer.borrow_mut().pointer_up(dom::page_point(&event)) {
                Ok(outcome) => {
                    if outcome.consumes_event() {
                        event.prevent_default();
                        event.stop_propagation();
                    }
                    log::trace!("Pointer released: {outcome:?}");
                }
                Err(e) => log::debug!("Click failed: {e}"),
            }
        }
    };

    DragListeners::attach(target, on_move, on_up)
}
