//! Multi-source relevance ranking.
//!
//! Transcript chunks and reference pages are scored independently, pooled
//! into one source-tagged list, and the top K returned. With an embedding
//! service the scores are cosine similarities; without one a lexical
//! word-overlap fallback covers the transcript side only.

use super::{truncate_chars, ContextSource, RetrievalConfig, ScoredContext};
use crate::corpus::{ChunkStore, ReferenceLibrary};
use crate::embedding::{cosine_similarity, Embedder};
use crate::error::{Result, SkaldError};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Character cap for reference-page previews in ranked results.
const REFERENCE_PREVIEW_CHARS: usize = 1000;

/// Scores and ranks context candidates for a query.
pub struct ContextRanker {
    embedder: Option<Arc<dyn Embedder>>,
    config: RetrievalConfig,
}

impl ContextRanker {
    /// Create a lexical-only ranker (no embedding service configured).
    pub fn lexical(config: RetrievalConfig) -> Self {
        Self {
            embedder: None,
            config,
        }
    }

    /// Create a semantic ranker backed by an embedding service.
    pub fn semantic(embedder: Arc<dyn Embedder>, config: RetrievalConfig) -> Self {
        Self {
            embedder: Some(embedder),
            config,
        }
    }

    /// Rank both corpora against a query and return the top K items.
    ///
    /// The result is sorted by descending score; ties keep the key-sorted
    /// traversal order (transcript store first, then reference library),
    /// so repeated calls over identical inputs return identical sequences.
    pub async fn rank(
        &self,
        query: &str,
        chunks: &ChunkStore,
        references: &ReferenceLibrary,
        speakers: &[String],
    ) -> Result<Vec<ScoredContext>> {
        let mut scored = match &self.embedder {
            Some(embedder) => {
                self.score_semantic(embedder.as_ref(), query, chunks, references, speakers)
                    .await?
            }
            None => self.score_lexical(query, chunks),
        };

        // Stable sort keeps traversal order for equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.top_k);

        debug!("Ranked {} context items for query", scored.len());
        Ok(scored)
    }

    /// Word-overlap scoring over transcript chunks.
    fn score_lexical(&self, query: &str, chunks: &ChunkStore) -> Vec<ScoredContext> {
        let query_lower = query.to_lowercase();
        let query_words: HashSet<&str> = query_lower.split_whitespace().collect();

        let mut scored = Vec::new();

        for (_, chunk) in chunks.iter() {
            let text_lower = chunk.text.to_lowercase();
            let chunk_words: HashSet<&str> = text_lower.split_whitespace().collect();

            let overlap = query_words.intersection(&chunk_words).count();
            let word_ratio = if query_words.is_empty() {
                0.0
            } else {
                overlap as f32 / query_words.len() as f32
            };

            let phrase_bonus = if !query_lower.is_empty() && text_lower.contains(&query_lower) {
                1.0
            } else {
                0.0
            };

            let score = word_ratio + phrase_bonus;
            if score > 0.0 {
                scored.push(ScoredContext {
                    source: ContextSource::Transcript,
                    text: chunk.text.clone(),
                    score,
                });
            }
        }

        scored
    }

    /// Cosine-similarity scoring over both corpora.
    async fn score_semantic(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        chunks: &ChunkStore,
        references: &ReferenceLibrary,
        speakers: &[String],
    ) -> Result<Vec<ScoredContext>> {
        let query_embedding = embedder.embed(query).await?;

        // Speakers the query mentions, lowercased for substring checks.
        let query_lower = query.to_lowercase();
        let mentioned: Vec<String> = speakers
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|s| query_lower.contains(s.as_str()))
            .collect();

        let texts: Vec<String> = chunks.iter().map(|(_, c)| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;
        if embeddings.len() != texts.len() {
            return Err(SkaldError::Retrieval(format!(
                "embedding service returned {} vectors for {} chunks",
                embeddings.len(),
                texts.len()
            )));
        }

        let mut scored = Vec::with_capacity(chunks.len() + references.len());

        for ((_, chunk), embedding) in chunks.iter().zip(&embeddings) {
            let mut score = cosine_similarity(&query_embedding, embedding);

            if !mentioned.is_empty() {
                let text_lower = chunk.text.to_lowercase();
                // The bonus stacks once per distinct mentioned speaker.
                for name in &mentioned {
                    if text_lower.contains(name.as_str()) {
                        score += self.config.character_bonus;
                    }
                }
            }

            scored.push(ScoredContext {
                source: ContextSource::Transcript,
                text: chunk.text.clone(),
                score,
            });
        }

        for (title, page) in references {
            let score =
                cosine_similarity(&query_embedding, &page.embedding) * self.config.reference_weight;

            let (preview, truncated) = truncate_chars(&page.text, REFERENCE_PREVIEW_CHARS);
            let text = if truncated {
                format!("{}: {}...", title, preview)
            } else {
                format!("{}: {}", title, preview)
            };

            scored.push(ScoredContext {
                source: ContextSource::Reference,
                text,
                score,
            });
        }

        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::TranscriptChunk;
    use crate::corpus::ReferencePage;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Deterministic embedder returning preset vectors per exact text.
    struct FakeEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl FakeEmbedder {
        fn new(entries: &[(&str, Vec<f32>)]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vector)| (text.to_string(), vector.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl Embedder for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(self
                .vectors
                .get(text)
                .cloned()
                .unwrap_or_else(|| vec![0.0, 0.0, 0.0]))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut embeddings = Vec::with_capacity(texts.len());
            for text in texts {
                embeddings.push(self.embed(text).await?);
            }
            Ok(embeddings)
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    /// Embedding service that always fails.
    struct BrokenEmbedder;

    #[async_trait]
    impl Embedder for BrokenEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(SkaldError::Retrieval("embedding service down".to_string()))
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(SkaldError::Retrieval("embedding service down".to_string()))
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn store(texts: &[&str]) -> ChunkStore {
        let chunks = texts
            .iter()
            .enumerate()
            .map(|(i, text)| TranscriptChunk {
                id: i as u64,
                text: text.to_string(),
                start_sentence: i,
                end_sentence: i,
                char_count: text.chars().count(),
            })
            .collect();
        ChunkStore::from_chunks(chunks).unwrap()
    }

    fn config(top_k: usize) -> RetrievalConfig {
        RetrievalConfig {
            top_k,
            ..RetrievalConfig::default()
        }
    }

    #[tokio::test]
    async fn test_lexical_matches_query_words() {
        let ranker = ContextRanker::lexical(config(5));
        let chunks = store(&["Alice: Hi there.", "Bob: Hello friend."]);

        let results = ranker
            .rank("hello", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();

        // Only the chunk containing "hello" scores above zero.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "Bob: Hello friend.");
        assert_eq!(results[0].source, ContextSource::Transcript);
    }

    #[tokio::test]
    async fn test_lexical_higher_overlap_ranks_first() {
        let ranker = ContextRanker::lexical(config(5));
        let chunks = store(&[
            "the red dragon sleeps",
            "the red dragon guards the gold hoard",
        ]);

        let results = ranker
            .rank(
                "dragon gold hoard",
                &chunks,
                &ReferenceLibrary::new(),
                &[],
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "the red dragon guards the gold hoard");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_lexical_phrase_bonus_outweighs_overlap() {
        let ranker = ContextRanker::lexical(config(5));
        let chunks = store(&[
            "silver hand rebels meet tonight",
            "the silver hand will rise",
        ]);

        let results = ranker
            .rank("silver hand", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();

        // Both contain the literal phrase, both get the bonus.
        assert_eq!(results.len(), 2);
        assert!(results[0].score > 1.0);
        assert!(results[1].score > 1.0);
    }

    #[tokio::test]
    async fn test_lexical_empty_query_yields_nothing() {
        let ranker = ContextRanker::lexical(config(5));
        let chunks = store(&["anything at all"]);

        let results = ranker
            .rank("", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_semantic_reference_weighting() {
        // Query along the x axis; chunk at cos 0.5, reference at cos 0.8.
        let embedder = Arc::new(FakeEmbedder::new(&[
            ("what is the citadel", vec![1.0, 0.0, 0.0]),
            ("the citadel stands tall", vec![0.5, 0.866_025_4, 0.0]),
        ]));

        let mut references = ReferenceLibrary::new();
        references.insert(
            "Citadel".to_string(),
            ReferencePage {
                text: "A fortress in the old town.".to_string(),
                embedding: vec![0.8, 0.6, 0.0],
            },
        );

        let ranker = ContextRanker::semantic(
            embedder,
            RetrievalConfig {
                top_k: 5,
                character_bonus: 0.05,
                reference_weight: 0.5,
            },
        );
        let chunks = store(&["the citadel stands tall"]);

        let results = ranker
            .rank("what is the citadel", &chunks, &references, &[])
            .await
            .unwrap();

        // Weighted reference (0.8 * 0.5 = 0.4) ranks below the chunk (0.5).
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, ContextSource::Transcript);
        assert!((results[0].score - 0.5).abs() < 0.001);
        assert_eq!(results[1].source, ContextSource::Reference);
        assert!((results[1].score - 0.4).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_semantic_speaker_bonus_stacks() {
        let embedder = Arc::new(FakeEmbedder::new(&[(
            "do alice and bob get along",
            vec![1.0, 0.0, 0.0],
        )]));

        let ranker = ContextRanker::semantic(
            embedder,
            RetrievalConfig {
                top_k: 5,
                character_bonus: 0.05,
                reference_weight: 0.7,
            },
        );
        let chunks = store(&[
            "Alice: Bob is my oldest friend.",
            "Alice: The weather is dreadful.",
            "Nobody speaks here.",
        ]);
        let speakers = vec!["Alice".to_string(), "Bob".to_string()];

        let results = ranker
            .rank(
                "do alice and bob get along",
                &chunks,
                &ReferenceLibrary::new(),
                &speakers,
            )
            .await
            .unwrap();

        // All chunk embeddings are zero vectors, so scores are bonus-only:
        // both speakers, one speaker, no speakers.
        assert_eq!(results.len(), 3);
        assert!((results[0].score - 0.10).abs() < 0.001);
        assert_eq!(results[0].text, "Alice: Bob is my oldest friend.");
        assert!((results[1].score - 0.05).abs() < 0.001);
        assert!((results[2].score - 0.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_semantic_reference_preview_truncation() {
        let embedder = Arc::new(FakeEmbedder::new(&[("query", vec![1.0, 0.0, 0.0])]));

        let long_text = "x".repeat(1500);
        let mut references = ReferenceLibrary::new();
        references.insert(
            "Long Page".to_string(),
            ReferencePage {
                text: long_text,
                embedding: vec![1.0, 0.0, 0.0],
            },
        );

        let ranker = ContextRanker::semantic(embedder, config(5));
        let results = ranker
            .rank("query", &ChunkStore::default(), &references, &[])
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        let expected = format!("Long Page: {}...", "x".repeat(1000));
        assert_eq!(results[0].text, expected);
    }

    #[tokio::test]
    async fn test_semantic_short_reference_has_no_ellipsis() {
        let embedder = Arc::new(FakeEmbedder::new(&[("query", vec![1.0, 0.0, 0.0])]));

        let mut references = ReferenceLibrary::new();
        references.insert(
            "Short Page".to_string(),
            ReferencePage {
                text: "brief".to_string(),
                embedding: vec![1.0, 0.0, 0.0],
            },
        );

        let ranker = ContextRanker::semantic(embedder, config(5));
        let results = ranker
            .rank("query", &ChunkStore::default(), &references, &[])
            .await
            .unwrap();

        assert_eq!(results[0].text, "Short Page: brief");
    }

    #[tokio::test]
    async fn test_top_k_truncation() {
        let ranker = ContextRanker::lexical(config(1));
        let chunks = store(&["hello one", "hello two", "hello three"]);

        let results = ranker
            .rank("hello", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_corpora_yield_empty_result() {
        let embedder = Arc::new(FakeEmbedder::new(&[]));
        let ranker = ContextRanker::semantic(embedder, config(5));

        let results = ranker
            .rank("query", &ChunkStore::default(), &ReferenceLibrary::new(), &[])
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_ranking_is_deterministic() {
        let embedder = Arc::new(FakeEmbedder::new(&[("query", vec![1.0, 0.0, 0.0])]));
        let ranker = ContextRanker::semantic(embedder, config(5));
        // Identical zero-vector scores: ties resolve by key-sorted order.
        let chunks = store(&["first chunk", "second chunk", "third chunk"]);

        let first = ranker
            .rank("query", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();
        let second = ranker
            .rank("query", &chunks, &ReferenceLibrary::new(), &[])
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].text, "first chunk");
        assert_eq!(first[1].text, "second chunk");
        assert_eq!(first[2].text, "third chunk");
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let ranker = ContextRanker::semantic(Arc::new(BrokenEmbedder), config(5));
        let chunks = store(&["some text"]);

        let result = ranker
            .rank("query", &chunks, &ReferenceLibrary::new(), &[])
            .await;
        assert!(matches!(result, Err(SkaldError::Retrieval(_))));
    }
}
