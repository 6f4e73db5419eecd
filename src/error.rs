//! Error types for viewer operations.
//!
//! None of these reach the user: event handlers log them and leave the
//! page untouched.

use thiserror::Error;

/// Errors that can occur while reading page geometry or writing styles.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Required element is not on the page
    #[error("Element not found: #{id}")]
    MissingElement {
        /// Id that was looked up
        id: String,
    },

    /// Required data attribute is absent
    #[error("Element #{element} has no {attribute} attribute")]
    MissingAttribute {
        /// Id of the element that was inspected
        element: String,
        /// Name of the missing attribute
        attribute: String,
    },

    /// Native size attribute is not a positive integer
    #[error("Invalid {attribute} value '{value}'")]
    InvalidDimension {
        /// Name of the offending attribute
        attribute: String,
        /// Raw attribute value
        value: String,
    },

    /// Container has no area to fit the image into
    #[error("Viewport has no area ({width}x{height})")]
    EmptyViewport {
        /// Container width in CSS pixels
        width: f64,
        /// Container height in CSS pixels
        height: f64,
    },

    /// A browser API call failed
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ViewerError {
    /// Create a missing element error.
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a missing attribute error.
    pub fn missing_attribute(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Create an invalid dimension error.
    pub fn invalid_dimension(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDimension {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}
