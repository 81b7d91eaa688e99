/**
 * Shared Types Module
 *
 * Defines the screens of the app, the signed-in session and the navigation
 * stack that decides which screen is shown.
 */

use serde::{Deserialize, Serialize};

/// Current app view/mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    /// Email/password screen
    Auth,
    /// Record form and list
    Records,
}

/// The signed-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque user identifier
    pub uid: String,
    pub email: Option<String>,
}

/// Stack of visited screens; the top is what is rendered.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<AppView>,
}

impl Navigator {
    pub fn new(root: AppView) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> AppView {
        // The stack is never empty: `back` refuses to pop the root.
        self.stack.last().copied().unwrap_or(AppView::Auth)
    }

    pub fn push(&mut self, view: AppView) {
        self.stack.push(view);
    }

    /// Replace the current screen so that back does not return to it
    pub fn replace(&mut self, view: AppView) {
        self.stack.pop();
        self.stack.push(view);
    }

    /// Drop all history and start over at `view`
    pub fn reset_to(&mut self, view: AppView) {
        self.stack.clear();
        self.stack.push(view);
    }

    /// Pop the current screen. Returns false at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
