//! Common types shared across multiple modules.
//!
//! Both the editor and zone persistence report their latest outcome through
//! the status line at the bottom of the window.

use bevy::prelude::*;

/// One-line feedback shown in the status bar
#[derive(Resource, Default, Debug)]
pub struct StatusLine {
    message: Option<String>,
    is_error: bool,
}

impl StatusLine {
    pub fn info(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.is_error = false;
    }

    /// Show a rejection or failure. Also logged as a warning.
    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.message = Some(message);
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
