//! Story playback sessions.
//!
//! A [`StoryPlayer`] walks one story for one profile. Every navigation bumps a
//! [`ViewEpoch`]; an illustration that arrives after the viewer moved on is
//! not applied, although the job that produced it still fills the cache.

use crate::{IllustrationResolver, Resolution};
use derive_getters::Getters;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use storypal_core::{ImageReference, Profile, SlideKind, Story, substitute};

/// Shared view token. Any holder can invalidate pending image loads.
#[derive(Debug, Clone, Default)]
pub struct ViewEpoch(Arc<AtomicU64>);

impl ViewEpoch {
    /// Current value.
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Invalidate everything captured so far.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// A slide ready for display, with every placeholder substituted.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PresentedSlide {
    index: usize,
    total: usize,
    kind: SlideKind,
    #[getter(skip)]
    tip_title: &'static str,
    text: String,
    parent_tip: String,
    parent_action: String,
    choices: Vec<String>,
}

impl PresentedSlide {
    /// Caregiver-facing heading for this slide.
    pub fn tip_title(&self) -> &&'static str {
        &self.tip_title
    }

    /// Whether this is the final slide.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Result of moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the slide at this index
    Moved(usize),
    /// Already on the last slide; the story is finished
    Finished,
}

/// Interactive session over one story.
#[derive(Debug)]
pub struct StoryPlayer {
    story: Story,
    profile: Profile,
    resolver: IllustrationResolver,
    index: usize,
    epoch: ViewEpoch,
    images: std::sync::Mutex<HashMap<usize, ImageReference>>,
    closed: bool,
}

impl StoryPlayer {
    /// Start at the first slide.
    pub fn new(story: Story, profile: Profile, resolver: IllustrationResolver) -> Self {
        Self {
            story,
            profile,
            resolver,
            index: 0,
            epoch: ViewEpoch::default(),
            images: std::sync::Mutex::new(HashMap::new()),
            closed: false,
        }
    }

    /// Story being played.
    pub fn story(&self) -> &Story {
        &self.story
    }

    /// Index of the active slide.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Handle to this session's view epoch.
    pub fn epoch(&self) -> ViewEpoch {
        self.epoch.clone()
    }

    /// Whether [`close`](Self::close) was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Substituted content of slide `index`, or `None` if out of range.
    pub fn present(&self, index: usize) -> Option<PresentedSlide> {
        let slide = self.story.slide(index)?;
        Some(PresentedSlide {
            index,
            total: self.story.len(),
            kind: slide.kind,
            tip_title: slide.kind.tip_title(),
            text: substitute(&slide.text, &self.profile),
            parent_tip: substitute(&slide.parent_tip, &self.profile),
            parent_action: substitute(&slide.parent_action, &self.profile),
            choices: slide
                .choices
                .iter()
                .map(|c| substitute(&c.text, &self.profile))
                .collect(),
        })
    }

    /// Active slide.
    pub fn current(&self) -> Option<PresentedSlide> {
        self.present(self.index)
    }

    /// Substituted feedback for choice `choice` on the active slide.
    pub fn choose(&self, choice: usize) -> Option<String> {
        let slide = self.story.slide(self.index)?;
        slide
            .choices
            .get(choice)
            .map(|c| substitute(&c.feedback, &self.profile))
    }

    /// Move forward, or report that the story is finished.
    pub fn next(&mut self) -> Advance {
        if self.index + 1 >= self.story.len() {
            return Advance::Finished;
        }
        self.go_to(self.index + 1);
        Advance::Moved(self.index)
    }

    /// Move back; stays on the first slide.
    pub fn previous(&mut self) -> usize {
        if self.index > 0 {
            self.go_to(self.index - 1);
        }
        self.index
    }

    /// Jump to `index`. Returns `false` if out of range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.story.len() {
            return false;
        }
        self.index = index;
        self.epoch.bump();
        true
    }

    /// Image already applied for slide `index`.
    pub fn image(&self, index: usize) -> Option<ImageReference> {
        self.images
            .lock()
            .ok()
            .and_then(|images| images.get(&index).cloned())
    }

    /// Resolve the active slide's illustration.
    ///
    /// Returns `None` if the view changed (navigation, [`close`], or an
    /// external [`ViewEpoch::bump`]) before the result arrived; the result is
    /// then not applied to this session.
    ///
    /// [`close`]: Self::close
    #[tracing::instrument(skip(self), fields(story = %self.story.id, index = self.index))]
    pub async fn load_active_image(&self) -> Option<Resolution> {
        if self.closed {
            return None;
        }
        let index = self.index;
        let slide = self.story.slide(index)?;
        if let Some(reference) = self.image(index) {
            return Some(Resolution {
                reference,
                source: crate::ResolutionSource::Cached,
            });
        }

        let captured = self.epoch.current();
        let resolution = self
            .resolver
            .resolve(&self.story.id, index, slide, &self.profile)
            .await;

        if self.epoch.current() != captured {
            tracing::debug!("View changed while loading, discarding image");
            return None;
        }
        if let Ok(mut images) = self.images.lock() {
            images.insert(index, resolution.reference.clone());
        }
        Some(resolution)
    }

    /// End the session. Pending loads are discarded.
    pub fn close(&mut self) {
        self.closed = true;
        self.epoch.bump();
    }
}
