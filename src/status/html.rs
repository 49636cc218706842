//! Embedded HTML UI Module
//!
//! This module provides the embedded HTML user interface for the status API.

/// Return the embedded HTML UI
pub fn ui_html() -> &'static str {
    include_str!("../../web/status-ui.html")
}
