//! Bissa Kerja core
//!
//! Platform-agnostic logic behind the public pages: the accessibility
//! overlay (settings, visual effects, listener lifecycle, hover/focus speech)
//! and the job and company listings. Nothing here touches the DOM; the web
//! crate supplies browser implementations of the seams below.

pub mod api;
pub mod companies;
pub mod constants;
pub mod effects;
pub mod extract;
pub mod headless;
pub mod jobs;
pub mod landing;
pub mod lifecycle;
pub mod overlay;
pub mod route;
pub mod settings;
pub mod speech;
pub mod storage;
pub mod store;

// Re-export commonly used types
pub use api::{ApiError, ApiResponse, ListingState, Pagination, Resource, decode_envelope, endpoint_url};
pub use companies::{Company, CompanyProfile, CompanyStatus, logo_url};
pub use effects::{EffectApplier, EffectPlan, PresentationSurface, compose_filter};
pub use extract::{ElementSnapshot, ElementView, is_excluded, speakable_text};
pub use headless::{HeadlessHost, HeadlessOverlay, HeadlessRig, ManualScheduler, MemoryStorage, MemorySurface, RecordingSpeech};
pub use jobs::{JobCardView, JobFilter, JobVacancy, SortOrder};
pub use landing::{Testimonial, TestimonialCarousel, curated_jobs, testimonials};
pub use lifecycle::{Scheduler, Teardown, TeardownRegistry, TimerId, TimerSlot};
pub use overlay::{AccessibilityOverlay, FeatureHost, OverlaySnapshot};
pub use route::{MutationSummary, RouteSignals, is_navigation_change};
pub use settings::{AccessibilitySettings, Contrast, CursorSize, SettingChange, Toggle};
pub use speech::{KeyOutcome, SpeechController, SpeechEngine, Trigger, Utterance, VoiceInfo};
pub use storage::{KeyValueStorage, StorageError};
pub use store::SettingsStore;
