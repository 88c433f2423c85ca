//! Per-slide illustration resolution.
//!
//! Lookup order for a slide:
//!
//! 1. Cached reference
//! 2. Static illustration bundled with the slide (never cached)
//! 3. Pre-generated illustration stored with the slide
//! 4. One generation job, shared by every concurrent caller for the same
//!    slide; success or fallback is written to the cache
//!
//! Jobs run on their own task, so a caller that stops waiting does not stop
//! the job. A job remembers the cache epoch of its story and drops its write
//! if the story was deleted or regenerated meanwhile.

use crate::{FallbackImages, ResolverConfig, illustration_prompt};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use storypal_cache::{CacheKey, ContentCache};
use storypal_core::{ImageReference, Profile, SlideTemplate};
use storypal_error::StorypalResult;
use storypal_interface::GenerationProvider;
use tokio::sync::Mutex;

/// Where a resolved illustration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ResolutionSource {
    /// Content cache
    #[display("cached")]
    Cached,
    /// Static illustration bundled with the slide
    #[display("static")]
    Static,
    /// Illustration stored with the slide at creation time
    #[display("pre-generated")]
    PreGenerated,
    /// Freshly generated
    #[display("generated")]
    Generated,
    /// Generation was attempted and failed
    #[display("fallback")]
    Fallback,
    /// Generation was impossible (provider not configured)
    #[display("fallback (provider unavailable)")]
    FallbackUnavailable,
}

impl ResolutionSource {
    /// Whether the reference is a fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            ResolutionSource::Fallback | ResolutionSource::FallbackUnavailable
        )
    }
}

/// A resolved illustration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Image to show
    pub reference: ImageReference,
    /// How it was obtained
    pub source: ResolutionSource,
}

impl Resolution {
    fn new(reference: impl Into<ImageReference>, source: ResolutionSource) -> Self {
        Self {
            reference: reference.into(),
            source,
        }
    }
}

type SharedJob = Shared<BoxFuture<'static, Resolution>>;

/// Jobs in flight, keyed by slide and the story's cache epoch at start.
type JobRegistry = Arc<Mutex<HashMap<(CacheKey, u64), SharedJob>>>;

/// Resolves slide illustrations through the cache, static assets and the
/// generation provider.
#[derive(Clone)]
pub struct IllustrationResolver {
    provider: Arc<dyn GenerationProvider>,
    cache: ContentCache,
    fallbacks: FallbackImages,
    timeout: Duration,
    style_directive: String,
    in_flight: JobRegistry,
}

impl std::fmt::Debug for IllustrationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IllustrationResolver")
            .field("provider", &self.provider.provider_name())
            .field("fallbacks", &self.fallbacks.len())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl IllustrationResolver {
    /// Create a resolver.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the fallback set is empty.
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        cache: ContentCache,
        config: &ResolverConfig,
    ) -> StorypalResult<Self> {
        Ok(Self {
            provider,
            cache,
            fallbacks: FallbackImages::new(config.fallback_images().iter().map(String::as_str))?,
            timeout: Duration::from_secs(*config.image_timeout_secs()),
            style_directive: config.style_directive().clone(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Fallback set.
    pub fn fallbacks(&self) -> &FallbackImages {
        &self.fallbacks
    }

    /// Cache used by this resolver.
    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    /// Number of jobs currently running.
    pub async fn jobs_in_flight(&self) -> usize {
        self.in_flight.lock().await.len()
    }

    /// Resolve the illustration for one slide of a story.
    ///
    /// Never fails: every generation problem ends in a fallback.
    #[tracing::instrument(skip(self, slide, profile))]
    pub async fn resolve(
        &self,
        collection_id: &str,
        slide_index: usize,
        slide: &SlideTemplate,
        profile: &Profile,
    ) -> Resolution {
        if let Some(reference) = self.cache.get(collection_id, slide_index).await {
            return Resolution::new(reference, ResolutionSource::Cached);
        }
        if let Some(reference) = slide.static_image() {
            return Resolution::new(reference, ResolutionSource::Static);
        }
        if let Some(reference) = slide.pre_generated_image() {
            return Resolution::new(reference, ResolutionSource::PreGenerated);
        }
        if !self.provider.is_configured() {
            tracing::warn!("Provider not configured, using fallback");
            return self.unavailable(slide_index);
        }

        let job = {
            let mut registry = self.in_flight.lock().await;

            // A job may have finished between the first lookup and the lock
            if let Some(reference) = self.cache.get(collection_id, slide_index).await {
                return Resolution::new(reference, ResolutionSource::Cached);
            }

            let epoch = self.cache.epoch(collection_id).await;
            let key = (CacheKey::new(collection_id, slide_index), epoch);
            if let Some(job) = registry.get(&key).cloned() {
                tracing::debug!("Joining in-flight job");
                job
            } else {
                let job = self.spawn_job(key.clone(), slide, profile);
                registry.insert(key, job.clone());
                job
            }
        };

        job.await
    }

    fn spawn_job(&self, key: (CacheKey, u64), slide: &SlideTemplate, profile: &Profile) -> SharedJob {
        let prompt = illustration_prompt(slide, profile, &self.style_directive);
        let resolver = self.clone();
        let fallback = self.fallbacks.select(*key.0.slide_index()).clone();

        tracing::info!(key = %key.0, epoch = key.1, "Starting illustration job");
        let handle = tokio::spawn(async move {
            let (cache_key, epoch) = &key;
            let resolution = resolver.generate(*cache_key.slide_index(), &prompt).await;

            // Unavailable fallbacks stay uncached so a later key enables generation
            let write = if resolution.source == ResolutionSource::FallbackUnavailable {
                Ok(false)
            } else {
                resolver
                    .cache
                    .put_if_fresh(
                        cache_key.collection_id(),
                        *cache_key.slide_index(),
                        resolution.reference.clone(),
                        *epoch,
                    )
                    .await
            };
            match write {
                Ok(true) => tracing::debug!(key = %cache_key, source = %resolution.source, "Cached illustration"),
                Ok(false) => tracing::debug!(key = %cache_key, "Illustration not cached"),
                Err(e) => tracing::warn!(key = %cache_key, error = %e, "Failed to cache illustration"),
            }

            resolver.in_flight.lock().await.remove(&key);
            resolution
        });

        async move {
            handle.await.unwrap_or_else(|e| {
                tracing::error!(error = %e, "Illustration job aborted");
                Resolution::new(fallback, ResolutionSource::Fallback)
            })
        }
        .boxed()
        .shared()
    }

    /// Illustrate one slide without touching the cache.
    ///
    /// Used while a story is being created, before it has an id in the
    /// repository.
    #[tracing::instrument(skip(self, slide, profile))]
    pub async fn render(&self, slide_index: usize, slide: &SlideTemplate, profile: &Profile) -> Resolution {
        if !self.provider.is_configured() {
            tracing::warn!("Provider not configured, using fallback");
            return self.unavailable(slide_index);
        }
        let prompt = illustration_prompt(slide, profile, &self.style_directive);
        self.generate(slide_index, &prompt).await
    }

    /// One image request, bounded by the timeout, with fallback on failure.
    async fn generate(&self, slide_index: usize, prompt: &str) -> Resolution {
        match tokio::time::timeout(self.timeout, self.provider.generate_image(prompt)).await {
            Ok(Ok(image)) => Resolution::new(image.into_reference(), ResolutionSource::Generated),
            Ok(Err(e)) => {
                tracing::warn!(
                    slide_index,
                    error = %e,
                    quota = e.kind.is_quota(),
                    "Image generation failed, using fallback"
                );
                if e.kind.is_unavailable() {
                    self.unavailable(slide_index)
                } else {
                    self.fallback(slide_index)
                }
            }
            Err(_) => {
                tracing::warn!(
                    slide_index,
                    timeout_secs = self.timeout.as_secs(),
                    "Image generation timed out, using fallback"
                );
                self.fallback(slide_index)
            }
        }
    }

    fn fallback(&self, slide_index: usize) -> Resolution {
        Resolution::new(
            self.fallbacks.select(slide_index).clone(),
            ResolutionSource::Fallback,
        )
    }

    fn unavailable(&self, slide_index: usize) -> Resolution {
        Resolution::new(
            self.fallbacks.select(slide_index).clone(),
            ResolutionSource::FallbackUnavailable,
        )
    }
}
