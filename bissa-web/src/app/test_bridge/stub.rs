use crate::app::overlay::OverlayControls;
use yew::prelude::*;

#[hook]
pub fn use_test_bridge(controls: &OverlayControls) {
    let _ = controls;
}
