mod controls;
mod focus;
mod view;


pub use view::{AccessibilityPanel, Props};
