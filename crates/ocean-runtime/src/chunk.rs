//! Chunk packing.
//!
//! Individual items — one rendered record, or one fragment of a split
//! record — can be as brief as a single message, too little context for an
//! accurate classification. The packer concatenates items into the fewest
//! chunks close to the token budget, maximizing context per oracle call and
//! so minimizing call count.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tokens::TokenCounter;

/// Separator between items joined into one chunk.
const ITEM_SEPARATOR: char = ' ';

/// A budget-sized concatenation of items, tagged with its approximate token
/// count (the sum of its items' counts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Concatenated item text.
    pub text: String,
    /// Approximate token count.
    pub tokens: usize,
}

/// Greedily pack items into chunks close to `budget` tokens.
///
/// Single pass, no lookahead. When appending an item would exceed the
/// budget, whichever outcome lands closer to the target wins: the chunk is
/// closed early, or the item is appended anyway and the chunk overshoots by
/// at most that one item. No item is lost, duplicated, or reordered; a
/// chunk is never forcibly capped, so one item larger than the budget
/// becomes its own oversized chunk.
#[must_use]
pub fn pack(items: &[String], budget: usize, counter: &dyn TokenCounter) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut text = String::new();
    let mut used = 0usize;

    for item in items {
        let item_tokens = counter.count(item);

        if !text.is_empty() && used + item_tokens > budget {
            // Close now, or overshoot? Keep whichever lands closer to the
            // budget.
            if budget.abs_diff(used) < budget.abs_diff(used + item_tokens) {
                chunks.push(Chunk {
                    text: std::mem::take(&mut text),
                    tokens: used,
                });
                text.push_str(item);
                used = item_tokens;
            } else {
                text.push(ITEM_SEPARATOR);
                text.push_str(item);
                used += item_tokens;
            }
        } else {
            if !text.is_empty() {
                text.push(ITEM_SEPARATOR);
            }
            text.push_str(item);
            used += item_tokens;
        }
    }

    if !text.is_empty() {
        chunks.push(Chunk {
            text,
            tokens: used,
        });
    }

    debug!(chunks = chunks.len(), "packed items into chunks");
    chunks
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
