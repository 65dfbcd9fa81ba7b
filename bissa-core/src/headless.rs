//! In-memory implementations of every browser seam.
//!
//! Used by unit tests and by `bissa-tester`'s logic scenarios. All fakes are
//! cheap handles over shared state, so a test can keep a clone and inspect
//! what the code under test did.

use crate::effects::PresentationSurface;
use crate::extract::ElementSnapshot;
use crate::lifecycle::{Scheduler, Teardown, TimerId};
use crate::overlay::{AccessibilityOverlay, FeatureHost};
use crate::route::{MutationSummary, RouteSignals};
use crate::settings::AccessibilitySettings;
use crate::speech::{KeyOutcome, SpeechController, SpeechEngine, Trigger, Utterance, VoiceInfo, speak_now};
use crate::storage::{KeyValueStorage, StorageError};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

// Storage -------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    /// Seed a raw value, bypassing the failure switch.
    pub fn insert(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Make every `set_item` fail as if the quota were exhausted.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::WriteRejected("quota exceeded".into()));
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// Surface -------------------------------------------------------------------

/// Observable document-root state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SurfaceState {
    pub properties: BTreeMap<String, String>,
    pub filter: Option<String>,
    pub classes: Vec<String>,
    pub elements: BTreeSet<String>,
}

#[derive(Clone, Default)]
pub struct MemorySurface {
    state: Rc<RefCell<SurfaceState>>,
}

impl MemorySurface {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<String> {
        self.state.borrow().properties.get(name).cloned()
    }

    #[must_use]
    pub fn filter(&self) -> Option<String> {
        self.state.borrow().filter.clone()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_count(class) > 0
    }

    #[must_use]
    pub fn class_count(&self, class: &str) -> usize {
        self.state
            .borrow()
            .classes
            .iter()
            .filter(|c| *c == class)
            .count()
    }

    pub fn insert_element(&self, id: &str) {
        self.state.borrow_mut().elements.insert(id.to_string());
    }

    #[must_use]
    pub fn has_element(&self, id: &str) -> bool {
        self.state.borrow().elements.contains(id)
    }

    #[must_use]
    pub fn snapshot(&self) -> SurfaceState {
        self.state.borrow().clone()
    }

    /// True when no overlay effect is visible.
    #[must_use]
    pub fn is_pristine(&self) -> bool {
        *self.state.borrow() == SurfaceState::default()
    }
}

impl PresentationSurface for MemorySurface {
    fn set_style_property(&self, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .properties
            .insert(name.to_string(), value.to_string());
    }

    fn remove_style_property(&self, name: &str) {
        self.state.borrow_mut().properties.remove(name);
    }

    fn set_filter(&self, filter: &str) {
        self.state.borrow_mut().filter = Some(filter.to_string());
    }

    fn clear_filter(&self) {
        self.state.borrow_mut().filter = None;
    }

    fn add_root_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_root_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn remove_element(&self, id: &str) {
        self.state.borrow_mut().elements.remove(id);
    }
}

// Scheduler -----------------------------------------------------------------

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), Box<dyn FnOnce()>>,
    due_by_id: HashMap<u64, u64>,
}

/// Virtual clock. Timers only fire inside [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl ManualScheduler {
    /// Move the clock forward, firing due timers in due order.
    ///
    /// Timers scheduled by a firing callback run in the same call if they
    /// fall due before the target time.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now.saturating_add(ms);
        loop {
            let callback = {
                let mut clock = self.clock.borrow_mut();
                let Some(&(due, id)) = clock.queue.keys().next() else {
                    break;
                };
                if due > target {
                    break;
                }
                clock.due_by_id.remove(&id);
                clock.now = due;
                clock.queue.remove(&(due, id))
            };
            if let Some(callback) = callback {
                callback();
            }
        }
        self.clock.borrow_mut().now = target;
    }

    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    /// Number of timers that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut clock = self.clock.borrow_mut();
        clock.next_id += 1;
        let id = clock.next_id;
        let due = clock.now + u64::from(delay_ms);
        clock.queue.insert((due, id), callback);
        clock.due_by_id.insert(id, due);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        let mut clock = self.clock.borrow_mut();
        if let Some(due) = clock.due_by_id.remove(&id.0) {
            clock.queue.remove(&(due, id.0));
        }
    }
}

// Speech --------------------------------------------------------------------

#[derive(Default)]
struct SpeechLog {
    voices: Vec<VoiceInfo>,
    spoken: Vec<Utterance>,
    cancels: usize,
    speaking: bool,
    paused: bool,
}

/// Speech engine that records utterances instead of playing them.
#[derive(Clone, Default)]
pub struct RecordingSpeech {
    log: Rc<RefCell<SpeechLog>>,
}

impl RecordingSpeech {
    #[must_use]
    pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
        let speech = Self::default();
        speech.log.borrow_mut().voices = voices;
        speech
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<Utterance> {
        self.log.borrow().spoken.clone()
    }

    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.log.borrow().cancels
    }

    /// The current utterance reached its end.
    pub fn finish(&self) {
        let mut log = self.log.borrow_mut();
        log.speaking = false;
        log.paused = false;
    }
}

impl SpeechEngine for RecordingSpeech {
    fn voices(&self) -> Vec<VoiceInfo> {
        self.log.borrow().voices.clone()
    }

    fn speak(&self, utterance: &Utterance) {
        let mut log = self.log.borrow_mut();
        log.spoken.push(utterance.clone());
        log.speaking = true;
        log.paused = false;
    }

    fn cancel(&self) {
        let mut log = self.log.borrow_mut();
        log.cancels += 1;
        log.speaking = false;
        log.paused = false;
    }

    fn pause(&self) {
        let mut log = self.log.borrow_mut();
        if log.speaking {
            log.paused = true;
        }
    }

    fn resume(&self) {
        self.log.borrow_mut().paused = false;
    }

    fn is_speaking(&self) -> bool {
        self.log.borrow().speaking
    }

    fn is_paused(&self) -> bool {
        self.log.borrow().paused
    }
}

// Feature host --------------------------------------------------------------

type HeadlessController = SpeechController<RecordingSpeech, ManualScheduler, ElementSnapshot>;
type NavigationSink = Rc<dyn Fn(Option<&[MutationSummary]>)>;

struct HostState {
    surface: MemorySurface,
    scheduler: ManualScheduler,
    speech: RecordingSpeech,
    speech_available: Cell<bool>,
    next_id: Cell<u64>,
    guide_listeners: Cell<usize>,
    listener_sets: RefCell<BTreeMap<u64, HeadlessController>>,
    watchers: RefCell<BTreeMap<u64, NavigationSink>>,
}

impl HostState {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Feature host that keeps its "listeners" in maps so tests can dispatch
/// events to them and count leaks.
#[derive(Clone)]
pub struct HeadlessHost {
    state: Rc<HostState>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(surface: MemorySurface, scheduler: ManualScheduler, speech: RecordingSpeech) -> Self {
        Self {
            state: Rc::new(HostState {
                surface,
                scheduler,
                speech,
                speech_available: Cell::new(true),
                next_id: Cell::new(0),
                guide_listeners: Cell::new(0),
                listener_sets: RefCell::new(BTreeMap::new()),
                watchers: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    /// Simulate a browser without `speechSynthesis`.
    pub fn set_speech_available(&self, available: bool) {
        self.state.speech_available.set(available);
    }

    #[must_use]
    pub fn listener_sets(&self) -> usize {
        self.state.listener_sets.borrow().len()
    }

    #[must_use]
    pub fn navigation_watchers(&self) -> usize {
        self.state.watchers.borrow().len()
    }

    #[must_use]
    pub fn guide_listeners(&self) -> usize {
        self.state.guide_listeners.get()
    }

    fn controllers(&self) -> Vec<HeadlessController> {
        self.state.listener_sets.borrow().values().cloned().collect()
    }

    fn sinks(&self) -> Vec<NavigationSink> {
        self.state.watchers.borrow().values().cloned().collect()
    }

    /// Dispatch `mouseover`; returns how many listener sets queued speech.
    pub fn hover(&self, target: &ElementSnapshot) -> usize {
        self.controllers()
            .iter()
            .filter(|c| c.handle(Trigger::Hover, target))
            .count()
    }

    /// Dispatch `focusin`; returns how many listener sets queued speech.
    pub fn focus(&self, target: &ElementSnapshot) -> usize {
        self.controllers()
            .iter()
            .filter(|c| c.handle(Trigger::Focus, target))
            .count()
    }

    pub fn mouse_out(&self) {
        for controller in self.controllers() {
            controller.on_mouse_out();
        }
    }

    /// Dispatch `keydown`; true when any listener asked to prevent the default.
    pub fn key(&self, key: &str) -> bool {
        self.controllers()
            .iter()
            .map(|c| c.on_key(key))
            .fold(false, |acc, outcome| acc || outcome == KeyOutcome::PreventDefault)
    }

    /// Deliver a batch of body mutation records.
    pub fn navigate(&self, records: &[MutationSummary]) {
        for sink in self.sinks() {
            sink(Some(records));
        }
    }

    pub fn popstate(&self) {
        for sink in self.sinks() {
            sink(None);
        }
    }
}

impl FeatureHost for HeadlessHost {
    fn attach_reading_guide(&self) -> Option<Teardown> {
        let state = Rc::clone(&self.state);
        state.surface.insert_element(crate::constants::READING_GUIDE_ID);
        state.guide_listeners.set(state.guide_listeners.get() + 1);
        Some(Box::new(move || {
            state
                .guide_listeners
                .set(state.guide_listeners.get().saturating_sub(1));
            state.surface.remove_element(crate::constants::READING_GUIDE_ID);
        }))
    }

    fn attach_speech(&self, settings: &AccessibilitySettings) -> Option<Teardown> {
        if !self.state.speech_available.get() {
            return None;
        }
        let controller = SpeechController::new(
            self.state.speech.clone(),
            self.state.scheduler.clone(),
            settings.clone(),
        );
        let id = self.state.next_id();
        self.state
            .listener_sets
            .borrow_mut()
            .insert(id, controller.clone());

        let state = Rc::clone(&self.state);
        Some(Box::new(move || {
            state.listener_sets.borrow_mut().remove(&id);
            controller.shutdown();
        }))
    }

    fn watch_navigation<S>(&self, signals: RouteSignals<S>) -> Option<Teardown>
    where
        S: Scheduler + Clone + 'static,
    {
        let id = self.state.next_id();
        let sink: NavigationSink = Rc::new(move |records| match records {
            Some(records) => signals.mutations(records),
            None => signals.popstate(),
        });
        self.state.watchers.borrow_mut().insert(id, sink);

        let state = Rc::clone(&self.state);
        Some(Box::new(move || {
            state.watchers.borrow_mut().remove(&id);
        }))
    }

    fn cancel_speech(&self) {
        self.state.speech.cancel();
    }

    fn speak(&self, settings: &AccessibilitySettings, text: &str) {
        speak_now(&self.state.speech, settings, text);
    }
}

// Rig -----------------------------------------------------------------------

pub type HeadlessOverlay =
    AccessibilityOverlay<MemoryStorage, MemorySurface, HeadlessHost, ManualScheduler>;

/// Every fake wired together, ready to mount an overlay.
#[derive(Clone)]
pub struct HeadlessRig {
    pub storage: MemoryStorage,
    pub surface: MemorySurface,
    pub scheduler: ManualScheduler,
    pub speech: RecordingSpeech,
    pub host: HeadlessHost,
}

impl Default for HeadlessRig {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessRig {
    #[must_use]
    pub fn new() -> Self {
        let surface = MemorySurface::default();
        let scheduler = ManualScheduler::default();
        let speech = RecordingSpeech::with_voices(vec![
            VoiceInfo::new("Google US English", "en-US"),
            VoiceInfo::new("Google Bahasa Indonesia", "id-ID"),
        ]);
        let host = HeadlessHost::new(surface.clone(), scheduler.clone(), speech.clone());
        Self {
            storage: MemoryStorage::default(),
            surface,
            scheduler,
            speech,
            host,
        }
    }

    /// Seed the persisted record before mounting.
    pub fn persist(&self, settings: &AccessibilitySettings) {
        if let Ok(raw) = serde_json::to_string(settings) {
            self.storage
                .insert(crate::constants::SETTINGS_STORAGE_KEY, &raw);
        }
    }

    #[must_use]
    pub fn mount(&self) -> HeadlessOverlay {
        AccessibilityOverlay::mount(
            self.storage.clone(),
            self.surface.clone(),
            self.host.clone(),
            self.scheduler.clone(),
        )
    }

    /// Nothing the overlay created is still alive.
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.surface.is_pristine()
            && self.host.listener_sets() == 0
            && self.host.navigation_watchers() == 0
            && self.host.guide_listeners() == 0
            && self.scheduler.pending() == 0
    }
}
