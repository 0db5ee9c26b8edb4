//! The contract every scoring engine implements.

use tracing::warn;

use crate::context::ScoringContext;
use crate::errors::EngineError;
use crate::model::{ContentItem, Score, UserProfile};

/// A single scoring heuristic: a pure function of
/// (content, viewer, context, config) producing a score in [0, 1].
///
/// Implementations put the real computation in [`try_score`] and declare a
/// [`fallback`] constant; the provided [`score`] adapter guarantees the
/// never-propagate policy at the trait level, so the fallback behavior is
/// testable independent of logging.
///
/// [`try_score`]: ScoringEngine::try_score
/// [`fallback`]: ScoringEngine::fallback
/// [`score`]: ScoringEngine::score
pub trait ScoringEngine: Send + Sync {
    /// Stable identifier: registry key and breakdown key.
    fn name(&self) -> &'static str;

    /// The fallible computation. Data absence (no connection, no metric
    /// row, anonymous viewer) is signal, not an error: implementations
    /// return their documented neutral score for it. `Err` is reserved for
    /// genuinely unexpected failures.
    fn try_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError>;

    /// Score returned when `try_score` fails. Engine-specific; see each
    /// engine's module docs.
    fn fallback(&self) -> Score;

    /// External fields and relations this engine reads. Introspection and
    /// documentation only; nothing enforces it at runtime.
    fn required_data(&self) -> &'static [&'static str];

    /// Infallible scoring: any engine error is logged with content and
    /// viewer identifiers and converted to the engine's fallback.
    fn score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Score {
        match self.try_score(content, user, ctx) {
            Ok(score) => score,
            Err(e) => {
                warn!(
                    engine = self.name(),
                    content_id = %content.id,
                    user_id = user.map(|u| u.id.as_str()).unwrap_or("-"),
                    error = %e,
                    "engine failed, returning fallback"
                );
                self.fallback()
            }
        }
    }
}
