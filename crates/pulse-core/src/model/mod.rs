pub mod content;
pub mod engagement;
pub mod metrics;
pub mod score;
pub mod user;

pub use content::{ContentItem, ContentKind};
pub use engagement::{EngagementKind, EngagementRecord, EngagementStat};
pub use metrics::{CreatorMetric, TrendingMetric, WindowStats};
pub use score::{CompositeScore, ContentScoreRecord, Score, ScoredContent};
pub use user::{
    CircleType, Connection, ConnectionStatus, InterestKind, ScoringPreferences, UserInterest,
    UserProfile,
};
