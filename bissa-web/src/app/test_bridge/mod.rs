#[cfg(any(test, target_arch = "wasm32"))]
mod shared;
#[cfg(not(target_arch = "wasm32"))]
mod stub;
#[cfg(target_arch = "wasm32")]
mod wasm;

use crate::app::overlay::OverlayControls;
use yew::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
#[hook]
pub fn use_test_bridge(controls: &OverlayControls) {
    stub::use_test_bridge(controls);
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_test_bridge(controls: &OverlayControls) {
    wasm::use_test_bridge(controls);
}
