//! Projection of [`AccessibilitySettings`] onto document-level presentation state.

use crate::constants::{
    BRIGHTNESS_NEUTRAL, CSS_ANIMATION_DURATION, CSS_CURSOR_SCALE, CSS_FONT_SCALE,
    CSS_TRANSITION_DURATION, FOCUS_MODE_CLASS, FONT_SIZE_NEUTRAL, READING_GUIDE_ID,
    SATURATION_NEUTRAL,
};
use crate::settings::AccessibilitySettings;

/// Every custom property the applier may write. `clear_all` removes each one.
pub const MANAGED_PROPERTIES: [&str; 4] = [
    CSS_FONT_SCALE,
    CSS_CURSOR_SCALE,
    CSS_ANIMATION_DURATION,
    CSS_TRANSITION_DURATION,
];

/// The document root as seen by the overlay.
///
/// Implementations must treat removals of absent state as no-ops.
pub trait PresentationSurface {
    fn set_style_property(&self, name: &str, value: &str);
    fn remove_style_property(&self, name: &str);
    fn set_filter(&self, filter: &str);
    fn clear_filter(&self);
    fn add_root_class(&self, class: &str);
    fn remove_root_class(&self, class: &str);
    fn remove_element(&self, id: &str);
}

impl<P: PresentationSurface + ?Sized> PresentationSurface for std::rc::Rc<P> {
    fn set_style_property(&self, name: &str, value: &str) {
        (**self).set_style_property(name, value);
    }
    fn remove_style_property(&self, name: &str) {
        (**self).remove_style_property(name);
    }
    fn set_filter(&self, filter: &str) {
        (**self).set_filter(filter);
    }
    fn clear_filter(&self) {
        (**self).clear_filter();
    }
    fn add_root_class(&self, class: &str) {
        (**self).add_root_class(class);
    }
    fn remove_root_class(&self, class: &str) {
        (**self).remove_root_class(class);
    }
    fn remove_element(&self, id: &str) {
        (**self).remove_element(id);
    }
}

/// What an apply pass will write, computed without touching a surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EffectPlan {
    pub font_scale: Option<String>,
    pub filter: Option<String>,
    pub cursor_scale: Option<&'static str>,
    pub pause_animations: bool,
    pub focus_mode: bool,
}

impl EffectPlan {
    #[must_use]
    pub fn from_settings(settings: &AccessibilitySettings) -> Self {
        if !settings.enabled {
            return Self::default();
        }
        Self {
            font_scale: font_scale(settings.font_size),
            filter: compose_filter(settings),
            cursor_scale: settings.cursor_size.scale(),
            pause_animations: settings.pause_animations,
            focus_mode: settings.focus_mode,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn font_scale(font_size: u16) -> Option<String> {
    (font_size != FONT_SIZE_NEUTRAL).then(|| format!("{}", f64::from(font_size) / 100.0))
}

/// Compose the root color filter in its fixed order:
/// contrast, brightness, saturation, invert, grayscale.
///
/// Returns `None` when every component is neutral.
#[must_use]
pub fn compose_filter(settings: &AccessibilitySettings) -> Option<String> {
    let mut terms: Vec<String> = Vec::with_capacity(5);
    if let Some(term) = settings.contrast.filter_term() {
        terms.push(term.to_string());
    }
    if settings.brightness != BRIGHTNESS_NEUTRAL {
        terms.push(format!("brightness({}%)", settings.brightness));
    }
    if settings.saturation != SATURATION_NEUTRAL {
        terms.push(format!("saturate({}%)", settings.saturation));
    }
    if settings.invert_colors {
        terms.push("invert(1)".to_string());
    }
    if settings.grayscale {
        terms.push("grayscale(1)".to_string());
    }
    (!terms.is_empty()).then(|| terms.join(" "))
}

pub struct EffectApplier<P: PresentationSurface> {
    surface: P,
}

impl<P: PresentationSurface> EffectApplier<P> {
    pub const fn new(surface: P) -> Self {
        Self { surface }
    }

    #[must_use]
    pub const fn surface(&self) -> &P {
        &self.surface
    }

    /// Remove every effect the overlay can produce. Safe to call repeatedly.
    pub fn clear_all(&self) {
        for name in MANAGED_PROPERTIES {
            self.surface.remove_style_property(name);
        }
        self.surface.clear_filter();
        self.surface.remove_root_class(FOCUS_MODE_CLASS);
        self.surface.remove_element(READING_GUIDE_ID);
    }

    /// Clear, then write the effects for `settings` if the master switch is on.
    pub fn apply(&self, settings: &AccessibilitySettings) -> EffectPlan {
        self.clear_all();
        let plan = EffectPlan::from_settings(settings);

        if let Some(scale) = plan.font_scale.as_deref() {
            self.surface.set_style_property(CSS_FONT_SCALE, scale);
        }
        if let Some(filter) = plan.filter.as_deref() {
            self.surface.set_filter(filter);
        }
        if let Some(scale) = plan.cursor_scale {
            self.surface.set_style_property(CSS_CURSOR_SCALE, scale);
        }
        if plan.pause_animations {
            self.surface.set_style_property(CSS_ANIMATION_DURATION, "0s");
            self.surface.set_style_property(CSS_TRANSITION_DURATION, "0s");
        }
        if plan.focus_mode {
            self.surface.add_root_class(FOCUS_MODE_CLASS);
        }
        plan
    }
}
