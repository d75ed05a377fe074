//! Reveal-on-scroll: a one-way "has been visible" latch per region.
//!
//! [`attach`] subscribes to an [`IntersectionObserver`] for one region and
//! returns a [`RevealHandle`]. The first entry that is intersecting with at
//! least `threshold` of the region in view latches the handle visible and
//! drops the subscription. The default threshold is 0, so any sliver of the
//! region in view counts. Nothing re-arms it: scrolling the region out and
//! back again does not change the handle.
//!
//! ## Lifetimes
//!
//! The observer owns the callback; the callback holds only a weak reference
//! to the handle's state. Dropping the handle (or calling
//! [`RevealHandle::detach`]) cancels the subscription synchronously, and a
//! callback that still fires afterwards finds nothing to update.
//!
//! Everything here runs on the host's UI loop. State lives in `Rc`/`Cell`;
//! none of it is `Send`.

use crate::config::RevealConfig;
use crate::types::RegionId;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use tracing::debug;

/// One observation delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub region: RegionId,
    /// Fraction of the region inside the viewport, 0.0 to 1.0.
    pub ratio: f64,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserveOptions {
    /// Minimum `ratio` that counts as visible. Zero means any overlap.
    pub threshold: f64,
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

impl From<&RevealConfig> for ObserveOptions {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }
}

pub type IntersectionCallback = Box<dyn FnMut(&IntersectionEntry)>;

/// Host-side viewport intersection source.
pub trait IntersectionObserver {
    /// Start delivering entries for `region` to `callback` until the returned
    /// subscription is cancelled or dropped.
    fn observe(
        &self,
        region: RegionId,
        options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> Subscription;
}

/// Cancellation handle for an observation. Cancels on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[derive(Default)]
struct RevealState {
    has_been_visible: Cell<bool>,
    subscription: RefCell<Option<Subscription>>,
}

impl RevealState {
    /// Take the subscription out before dropping it so the cancel closure
    /// never runs while the cell is borrowed.
    fn stop_observing(&self) {
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
    }
}

/// Live view of one region's reveal state.
pub struct RevealHandle {
    region: RegionId,
    state: Rc<RevealState>,
}

impl RevealHandle {
    /// Whether the region has ever been in view. Once `true`, stays `true`.
    pub fn is_visible(&self) -> bool {
        self.state.has_been_visible.get()
    }

    /// The region binding to attach to the rendered element.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Whether an observation is still pending.
    pub fn is_observing(&self) -> bool {
        self.state.subscription.borrow().is_some()
    }

    /// Stop observing. The visible flag keeps its current value.
    pub fn detach(&self) {
        self.state.stop_observing();
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealHandle")
            .field("region", &self.region)
            .field("visible", &self.is_visible())
            .field("observing", &self.is_observing())
            .finish()
    }
}

fn qualifies(entry: &IntersectionEntry, threshold: f64) -> bool {
    entry.is_intersecting && entry.ratio >= threshold
}

/// Begin observing `region` and return its reveal handle.
pub fn attach<O>(observer: &O, region: RegionId, options: ObserveOptions) -> RevealHandle
where
    O: IntersectionObserver + ?Sized,
{
    let state = Rc::new(RevealState::default());
    let weak: Weak<RevealState> = Rc::downgrade(&state);
    let threshold = options.threshold;

    let callback: IntersectionCallback = Box::new(move |entry: &IntersectionEntry| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if state.has_been_visible.get() || !qualifies(entry, threshold) {
            return;
        }
        state.has_been_visible.set(true);
        debug!(region = %entry.region, ratio = entry.ratio, "region revealed");
        state.stop_observing();
    });

    let subscription = observer.observe(region, options, callback);
    // Hosts may deliver the first entry synchronously from `observe`.
    if !state.has_been_visible.get() {
        *state.subscription.borrow_mut() = Some(subscription);
    }

    RevealHandle { region, state }
}

/// The two render states of a revealed section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTransition {
    /// Pixels the hidden state sits below its final position.
    pub offset_y: f64,
    /// Seconds.
    pub duration: f64,
    /// Seconds before the transition starts.
    pub delay: f64,
}

/// Target values for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f64,
    pub offset_y: f64,
}

impl RevealTransition {
    /// Transition for the `index`-th section of a page; later sections start
    /// `stagger` seconds after the previous one.
    pub fn for_section(config: &RevealConfig, index: usize) -> Self {
        Self {
            offset_y: config.offset_y,
            duration: config.duration,
            delay: config.stagger * index as f64,
        }
    }

    pub fn frame(&self, visible: bool) -> RevealFrame {
        if visible {
            RevealFrame {
                opacity: 1.0,
                offset_y: 0.0,
            }
        } else {
            RevealFrame {
                opacity: 0.0,
                offset_y: self.offset_y,
            }
        }
    }

    /// Inline CSS for the state.
    pub fn style(&self, visible: bool) -> String {
        let frame = self.frame(visible);
        format!(
            "opacity: {}; transform: translateY({}px); transition: opacity {d}s ease-out {delay}s, transform {d}s ease-out {delay}s",
            frame.opacity,
            frame.offset_y,
            d = self.duration,
            delay = self.delay,
        )
    }
}

/// A page section: its reveal handle plus how it animates.
#[derive(Debug)]
pub struct RevealSection {
    pub handle: RevealHandle,
    pub transition: RevealTransition,
}

impl RevealSection {
    pub fn style(&self) -> String {
        self.transition.style(self.handle.is_visible())
    }
}

/// Attach one reveal section per region, staggered in order.
pub fn attach_sections<O>(observer: &O, regions: &[RegionId], config: &RevealConfig) -> Vec<RevealSection>
where
    O: IntersectionObserver + ?Sized,
{
    regions
        .iter()
        .enumerate()
        .map(|(i, region)| RevealSection {
            handle: attach(observer, *region, config.into()),
            transition: RevealTransition::for_section(config, i),
        })
        .collect()
}

// =============================================================================
// In-memory host
// =============================================================================

/// A vertical document with a scrollable viewport, acting as the
/// intersection source.
///
/// Regions are mounted at fixed vertical spans. [`Self::scroll_to`] moves the
/// viewport and delivers an entry to each observation whose ratio changed
/// since its last delivery; a fresh observation gets its first entry on the
/// next [`Self::flush`] or scroll, never from inside `observe`.
#[derive(Clone)]
pub struct ViewportSimulator {
    inner: Rc<RefCell<Registry>>,
}

struct Registry {
    viewport_height: f64,
    scroll_y: f64,
    next_region: u64,
    next_watch: u64,
    regions: BTreeMap<RegionId, Span>,
    watches: BTreeMap<u64, Watch>,
}

#[derive(Clone, Copy)]
struct Span {
    top: f64,
    height: f64,
}

struct Watch {
    region: RegionId,
    /// `None` while the callback is being run.
    callback: Option<IntersectionCallback>,
    last_ratio: Option<f64>,
}

impl Registry {
    fn entry_for(&self, region: RegionId) -> Option<IntersectionEntry> {
        let span = self.regions.get(&region)?;
        let view_top = self.scroll_y;
        let view_bottom = self.scroll_y + self.viewport_height;
        let bottom = span.top + span.height;
        let overlap = (bottom.min(view_bottom) - span.top.max(view_top)).max(0.0);

        let (ratio, is_intersecting) = if span.height > 0.0 {
            (overlap / span.height, overlap > 0.0)
        } else {
            let inside = span.top >= view_top && span.top <= view_bottom;
            (if inside { 1.0 } else { 0.0 }, inside)
        };
        Some(IntersectionEntry {
            region,
            ratio,
            is_intersecting,
        })
    }
}

impl ViewportSimulator {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                viewport_height,
                scroll_y: 0.0,
                next_region: 0,
                next_watch: 0,
                regions: BTreeMap::new(),
                watches: BTreeMap::new(),
            })),
        }
    }

    /// Place a region at `top` with `height` px and return its handle.
    pub fn mount(&self, top: f64, height: f64) -> RegionId {
        let mut reg = self.inner.borrow_mut();
        let id = RegionId(reg.next_region);
        reg.next_region += 1;
        reg.regions.insert(id, Span { top, height });
        id
    }

    /// Remove a region from the document. Observations of it stop receiving entries.
    pub fn unmount(&self, region: RegionId) {
        self.inner.borrow_mut().regions.remove(&region);
    }

    pub fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    /// Move the viewport and deliver changed entries.
    pub fn scroll_to(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y.max(0.0);
        self.flush();
    }

    /// Deliver an entry to every observation whose ratio changed.
    pub fn flush(&self) {
        let pending: Vec<(u64, IntersectionEntry)> = {
            let mut reg = self.inner.borrow_mut();
            let computed: Vec<(u64, IntersectionEntry)> = reg
                .watches
                .iter()
                .filter_map(|(id, w)| {
                    let entry = reg.entry_for(w.region)?;
                    (w.last_ratio != Some(entry.ratio)).then_some((*id, entry))
                })
                .collect();
            for (id, entry) in &computed {
                if let Some(w) = reg.watches.get_mut(id) {
                    w.last_ratio = Some(entry.ratio);
                }
            }
            computed
        };
        self.deliver(pending);
    }

    /// Deliver an arbitrary entry to every observation of `entry.region`.
    pub fn dispatch(&self, entry: IntersectionEntry) {
        let ids: Vec<u64> = self
            .inner
            .borrow()
            .watches
            .iter()
            .filter(|(_, w)| w.region == entry.region)
            .map(|(id, _)| *id)
            .collect();
        self.deliver(ids.into_iter().map(|id| (id, entry)).collect());
    }

    fn deliver(&self, pending: Vec<(u64, IntersectionEntry)>) {
        for (id, entry) in pending {
            // No registry borrow may be held while the callback runs: it is
            // allowed to cancel its own subscription.
            let callback = self
                .inner
                .borrow_mut()
                .watches
                .get_mut(&id)
                .and_then(|w| w.callback.take());
            let Some(mut callback) = callback else {
                continue;
            };
            callback(&entry);
            let leftover = match self.inner.borrow_mut().watches.get_mut(&id) {
                Some(w) => {
                    w.callback = Some(callback);
                    None
                }
                None => Some(callback),
            };
            drop(leftover);
        }
    }

    /// Number of live observations.
    pub fn active_observations(&self) -> usize {
        self.inner.borrow().watches.len()
    }

    /// Current intersection of a mounted region.
    pub fn entry_for(&self, region: RegionId) -> Option<IntersectionEntry> {
        self.inner.borrow().entry_for(region)
    }
}

impl IntersectionObserver for ViewportSimulator {
    fn observe(
        &self,
        region: RegionId,
        _options: ObserveOptions,
        callback: IntersectionCallback,
    ) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_watch;
            reg.next_watch += 1;
            reg.watches.insert(
                id,
                Watch {
                    region,
                    callback: Some(callback),
                    last_ratio: None,
                },
            );
            id
        };
        let registry = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                let removed = registry.borrow_mut().watches.remove(&id);
                drop(removed);
            }
        })
    }
}
