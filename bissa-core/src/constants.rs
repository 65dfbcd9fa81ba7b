//! Centralized tuning constants for the accessibility overlay and listings.
//!
//! The ranges below validate persisted settings and bound the panel sliders.

// Persistence ---------------------------------------------------------------
pub const SETTINGS_STORAGE_KEY: &str = "accessibility-settings";

// Visual ranges -------------------------------------------------------------
pub const FONT_SIZE_MIN: u16 = 50;
pub const FONT_SIZE_MAX: u16 = 200;
pub const FONT_SIZE_NEUTRAL: u16 = 100;
pub const BRIGHTNESS_MIN: u16 = 50;
pub const BRIGHTNESS_MAX: u16 = 150;
pub const BRIGHTNESS_NEUTRAL: u16 = 100;
pub const SATURATION_MIN: u16 = 0;
pub const SATURATION_MAX: u16 = 200;
pub const SATURATION_NEUTRAL: u16 = 100;
pub const PERCENT_SLIDER_STEP: u16 = 10;

// Speech ranges -------------------------------------------------------------
pub const TTS_DELAY_MIN_MS: u32 = 0;
pub const TTS_DELAY_MAX_MS: u32 = 600;
pub const TTS_DELAY_DEFAULT_MS: u32 = 120;
pub const TTS_RATE_MIN: f32 = 0.5;
pub const TTS_RATE_MAX: f32 = 1.5;
pub const TTS_RATE_DEFAULT: f32 = 0.95;
pub const TTS_PITCH_MIN: f32 = 0.5;
pub const TTS_PITCH_MAX: f32 = 1.5;
pub const TTS_PITCH_DEFAULT: f32 = 1.0;
pub const TTS_VOLUME_MIN: f32 = 0.0;
pub const TTS_VOLUME_MAX: f32 = 1.0;
pub const TTS_VOLUME_DEFAULT: f32 = 0.9;

// Lifecycle timing ------------------------------------------------------------
/// Delay between an apply pass and attaching speech listeners, so freshly
/// rendered nodes exist before the first hover.
pub const TTS_ACTIVATION_DELAY_MS: u32 = 500;
/// Quiet period after a navigation-sized DOM replacement before speech
/// listeners are re-attached.
pub const ROUTE_REINIT_DEBOUNCE_MS: u32 = 1_000;

// Document effect names -----------------------------------------------------
pub const CSS_FONT_SCALE: &str = "--accessibility-font-scale";
pub const CSS_CURSOR_SCALE: &str = "--cursor-scale";
pub const CSS_ANIMATION_DURATION: &str = "--animation-duration";
pub const CSS_TRANSITION_DURATION: &str = "--transition-duration";
pub const FOCUS_MODE_CLASS: &str = "focus-mode";
pub const READING_GUIDE_ID: &str = "reading-guide";
pub const OVERLAY_PANEL_ID: &str = "accessibility-overlay";

// Text extraction -------------------------------------------------------------
pub const SPEECH_TEXT_LIMIT: usize = 200;
pub const DESCENDANT_TEXT_LIMIT: usize = 100;
pub const DESCENDANT_TEXT_COUNT: usize = 3;
pub const FALLBACK_IMAGE: &str = "Gambar";
pub const FALLBACK_BUTTON: &str = "Tombol";
pub const FALLBACK_LINK: &str = "Link";
pub const SELECT_PREFIX: &str = "Pilihan";
pub const SELECT_NONE: &str = "Tidak ada pilihan";
pub const INPUT_PREFIX: &str = "Input";

// Listings --------------------------------------------------------------------
pub const LANDING_JOB_LIMIT: usize = 6;
pub const AVATAR_SERVICE_URL: &str = "https://ui-avatars.com/api/";
