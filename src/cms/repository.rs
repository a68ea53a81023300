//! Post repository - fetch cycles and the shared result slot

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::PostSource;
use crate::content::Post;

/// Result of the latest fetch cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No data yet, no error
    #[default]
    Loading,
    /// The cycle failed; the message is meant for display
    Failure(String),
    /// Normalized posts in source order
    Success(Arc<[Post]>),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Posts of a successful cycle
    pub fn posts(&self) -> Option<&[Post]> {
        match self {
            FetchState::Success(posts) => Some(&posts[..]),
            _ => None,
        }
    }

    /// Error message of a failed cycle
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failure(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Owns the post snapshot for one consuming context
///
/// Reads never trigger network traffic: a fetch only happens through
/// [`PostRepository::activate`] or [`PostRepository::fetch_all`].
pub struct PostRepository {
    source: Arc<dyn PostSource>,
    state: Arc<watch::Sender<FetchState>>,
    generation: Arc<AtomicU64>,
}

impl PostRepository {
    /// Create a repository in the `Loading` state
    pub fn new(source: Arc<dyn PostSource>) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        Self {
            source,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start one fetch cycle in the background
    ///
    /// The state is reset to `Loading` until the cycle completes.
    pub fn activate(&self) -> JoinHandle<()> {
        let cycle = self.begin_cycle();
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);

        tokio::spawn(async move {
            run_cycle(source.as_ref(), &state, &generation, cycle).await;
        })
    }

    /// Run one fetch cycle to completion and return its result
    pub async fn fetch_all(&self) -> FetchState {
        let cycle = self.begin_cycle();
        run_cycle(self.source.as_ref(), &self.state, &self.generation, cycle).await
    }

    /// Current result
    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// Watch for results of future cycles
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    fn begin_cycle(&self) -> u64 {
        // Bump and reset under the slot lock so no older cycle can interleave
        let mut cycle = 0;
        self.state.send_modify(|state| {
            cycle = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::Loading;
        });
        tracing::info!("Fetching posts (cycle {})", cycle);
        cycle
    }
}

async fn run_cycle(
    source: &dyn PostSource,
    state: &watch::Sender<FetchState>,
    generation: &AtomicU64,
    cycle: u64,
) -> FetchState {
    let result = match source.fetch_posts().await {
        Ok(posts) => {
            tracing::info!("Fetched {} posts (cycle {})", posts.len(), cycle);
            warn_on_duplicates(&posts);
            FetchState::Success(posts.into())
        }
        Err(e) => {
            tracing::warn!("Fetching posts failed (cycle {}): {}", cycle, e);
            FetchState::Failure(e.to_string())
        }
    };

    // A newer cycle owns the slot; drop this result
    let published = state.send_if_modified(|current| {
        if generation.load(Ordering::SeqCst) == cycle {
            *current = result.clone();
            true
        } else {
            false
        }
    });
    if !published {
        tracing::debug!("Discarding result of superseded cycle {}", cycle);
    }

    result
}

fn warn_on_duplicates(posts: &[Post]) {
    for (i, post) in posts.iter().enumerate() {
        let earlier = posts.iter().take(i);
        for other in earlier {
            if other.id == post.id {
                tracing::warn!("Duplicate post id {} in CMS response", post.id);
            }
            if !post.slug.is_empty() && other.slug == post.slug {
                tracing::warn!("Duplicate post slug '{}' in CMS response", post.slug);
            }
        }
    }
}
