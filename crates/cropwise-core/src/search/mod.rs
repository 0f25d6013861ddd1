pub mod candidates;
pub mod engine;
pub mod options;
pub mod score;

pub use candidates::{generate_crops, Candidate, ScoredCrop};
pub use engine::{analyse, best_crop, crop, Analysis, SearchResult};
pub use options::{ImportanceParams, ScoreWeights, SearchOptions};
pub use score::{importance, score, thirds, Score};
