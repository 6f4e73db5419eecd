//! Global constants for the album viewer

/// Scale change per unit of wheel `deltaY`.
pub const DEFAULT_ZOOM_STEP: f64 = 0.05;

/// Exclusive lower bound for the image scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Element ids rendered by the album page templates.
pub mod element {
    /// Fixed-size box clipping the image
    pub const CONTAINER_ID: &str = "image-container";
    /// The pannable, zoomable image
    pub const IMAGE_ID: &str = "image";
    /// Carrier of the `data-<intent>` navigation URLs
    pub const PAGE_ID: &str = "page";
}

/// Data attributes read from the page.
pub mod attribute {
    /// Native pixel width of the image
    pub const WIDTH: &str = "data-width";
    /// Native pixel height of the image
    pub const HEIGHT: &str = "data-height";
    /// Prefix of the navigation target attributes
    pub const NAVIGATION_PREFIX: &str = "data-";
}

/// Inline style values written to the image element.
pub mod style {
    /// Transform origin pinned to the image's top-left corner
    pub const TRANSFORM_ORIGIN: &str = "0px 0px";
    /// Transform value of the CSS-fitted view
    pub const TRANSFORM_NONE: &str = "none";
}
