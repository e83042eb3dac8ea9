//! Persona-driven relevance ranking.
//!
//! Sections are scored by cosine similarity between their embeddings and
//! the embedding of a "persona + job" query, then filtered and re-weighted
//! by a [`RuleSet`] before the top entries receive ranks and snippets.

mod embedding;
mod options;
mod ranker;
mod rules;
mod snippet;

pub use embedding::{cosine_similarity, Embedder, HashingEmbedder};
pub use options::RankOptions;
pub use ranker::{Ranker, Ranking};
pub use rules::{ActiveRules, BoostRule, BoostTarget, ExclusionRule, RuleEngine, RuleSet};
pub use snippet::SnippetExtractor;
