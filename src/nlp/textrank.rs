//! Extractive summarization with TextRank.
//!
//! Sentences are nodes in a graph weighted by word overlap normalized by
//! sentence length; PageRank over that graph picks the central sentences.

use std::collections::HashSet;

use super::tokenize::{content_words, sentences};

/// Condenses text by selecting existing sentences.
pub trait ExtractiveSummarizer: Send + Sync {
    /// Selected sentences, or an empty string when nothing qualifies.
    fn summarize(&self, text: &str) -> String;
}

pub const DEFAULT_RATIO: f64 = 0.2;
pub const DAMPING: f64 = 0.85;

const MAX_ITERATIONS: usize = 100;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// TextRank sentence extraction.
#[derive(Debug, Clone)]
pub struct TextRank {
    /// Share of sentences kept in the summary.
    pub ratio: f64,
    pub damping: f64,
}

impl Default for TextRank {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_RATIO,
            damping: DAMPING,
        }
    }
}

impl TextRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio,
            ..Self::default()
        }
    }

    /// Indices of the selected sentences, in document order.
    fn select(&self, sentence_words: &[HashSet<String>]) -> Vec<usize> {
        let n = sentence_words.len();
        let keep = (n as f64 * self.ratio) as usize;
        if keep == 0 {
            return Vec::new();
        }

        let weights = similarity_matrix(sentence_words);
        let scores = pagerank(&weights, self.damping);

        // Sentences sharing no words with any other sentence score zero.
        let scores: Vec<f64> = (0..n)
            .map(|i| {
                if weights[i].iter().any(|&w| w > 0.0) {
                    scores[i]
                } else {
                    0.0
                }
            })
            .collect();
        let mut ranked: Vec<usize> = (0..n).collect();
        ranked.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        ranked.truncate(keep);
        ranked.sort_unstable();
        ranked
    }
}

impl ExtractiveSummarizer for TextRank {
    fn summarize(&self, text: &str) -> String {
        let sentences = sentences(text);
        let sentence_words: Vec<HashSet<String>> = sentences
            .iter()
            .map(|s| content_words(s).into_iter().collect())
            .collect();

        self.select(&sentence_words)
            .into_iter()
            .map(|i| sentences[i].as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Overlap similarity: shared words over the sum of log sentence lengths.
fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let common = a.intersection(b).count();
    if common == 0 {
        return 0.0;
    }
    let norm = (a.len() as f64).ln() + (b.len() as f64).ln();
    if norm <= 0.0 {
        return 0.0;
    }
    common as f64 / norm
}

fn similarity_matrix(sentence_words: &[HashSet<String>]) -> Vec<Vec<f64>> {
    let n = sentence_words.len();
    let mut weights = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let w = similarity(&sentence_words[i], &sentence_words[j]);
            weights[i][j] = w;
            weights[j][i] = w;
        }
    }
    weights
}

/// Weighted PageRank over a symmetric adjacency matrix.
fn pagerank(weights: &[Vec<f64>], damping: f64) -> Vec<f64> {
    let n = weights.len();
    let out_weight: Vec<f64> = weights.iter().map(|row| row.iter().sum()).collect();
    let mut scores = vec![1.0; n];

    for _ in 0..MAX_ITERATIONS {
        let mut delta = 0.0;
        let mut next = vec![1.0 - damping; n];
        for (i, score) in next.iter_mut().enumerate() {
            let inbound: f64 = (0..n)
                .filter(|&j| weights[j][i] > 0.0)
                .map(|j| weights[j][i] / out_weight[j] * scores[j])
                .sum();
            *score += damping * inbound;
            delta += (*score - scores[i]).abs();
        }
        scores = next;
        if delta < CONVERGENCE_THRESHOLD {
            break;
        }
    }
    scores
}
