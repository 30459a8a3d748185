//! Oversized-item splitting.
//!
//! A single rendered record can exceed the model-context budget on its own.
//! [`split_oversized`] breaks such an item into an ordered sequence of
//! fragments, preferring line boundaries so semantic units survive the cut.
//! Sizing is heuristic: a character budget is extrapolated linearly from the
//! item's token density, with a safety margin absorbing tokenizer
//! non-linearity.

use tracing::debug;

use crate::tokens::TokenCounter;

/// Largest char-boundary index `<= i` in `s`.
fn floor_boundary(s: &str, i: usize) -> usize {
    let mut end = i.min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}

/// Split one text item into fragments that fit under `budget` tokens.
///
/// Items already within budget come back unchanged as a single-element
/// sequence. Otherwise the text is cut at the last line break at or before
/// the extrapolated character budget; with no line break available, the cut
/// falls back to the midpoint of the window, which guarantees at least one
/// character of progress per iteration and hence termination.
///
/// Fragments are non-empty and, concatenated in order, reconstruct the
/// original text modulo whitespace at the cut points.
#[must_use]
pub fn split_oversized(
    text: &str,
    budget: usize,
    margin: usize,
    counter: &dyn TokenCounter,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;

    loop {
        let tokens = counter.count(rest);
        if tokens <= budget || rest.len() <= 1 {
            if !rest.is_empty() {
                pieces.push(rest.to_string());
            }
            break;
        }

        // Extrapolate a byte budget from the observed token density, then
        // back off by the margin. `tokens > budget` here, so the window is
        // a strict prefix.
        let approx = (budget * rest.len() / tokens)
            .saturating_sub(margin)
            .clamp(1, rest.len() - 1);
        let window_end = floor_boundary(rest, approx);

        let cut = match rest[..window_end].rfind('\n') {
            Some(pos) => pos,
            None => {
                // No line boundary in the window: cut at the midpoint.
                let mut mid = floor_boundary(rest, (approx / 2).max(1));
                if mid == 0 {
                    mid = rest.chars().next().map_or(rest.len(), char::len_utf8);
                }
                mid
            }
        };

        let piece = rest[..cut].trim_end();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        rest = rest[cut..].trim_start();
        if rest.is_empty() {
            break;
        }
    }

    pieces
}

/// Split every oversized item in a sequence, keeping already-fitting items
/// untouched and in order.
#[must_use]
pub fn split_all(
    items: &[String],
    budget: usize,
    margin: usize,
    counter: &dyn TokenCounter,
) -> Vec<String> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if counter.count(item) <= budget {
            out.push(item.clone());
        } else {
            let fragments = split_oversized(item, budget, margin, counter);
            debug!(fragments = fragments.len(), "split oversized item");
            out.extend(fragments);
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::HeuristicTokenCounter;

    /// One token per char — makes budgets exact in tests.
    fn char_counter() -> HeuristicTokenCounter {
        HeuristicTokenCounter::new(1)
    }

    /// Whitespace-free view — cut points may add or drop whitespace, the
    /// non-whitespace content must survive exactly.
    fn stripped(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn text_within_budget_is_unchanged() {
        let fragments = split_oversized("short text", 100, 5, &char_counter());
        assert_eq!(fragments, vec!["short text".to_string()]);
    }

    #[test]
    fn text_at_exact_budget_is_unchanged() {
        let text = "a".repeat(50);
        let fragments = split_oversized(&text, 50, 5, &char_counter());
        assert_eq!(fragments, vec![text]);
    }

    #[test]
    fn oversized_text_cuts_at_line_boundaries() {
        let text = "first line of chat\nsecond line of chat\nthird line of chat\n";
        let fragments = split_oversized(text, 30, 2, &char_counter());
        assert!(fragments.len() > 1);
        // Cuts land on line boundaries, so every fragment holds whole lines.
        assert_eq!(fragments[0], "first line of chat");
        for fragment in &fragments {
            assert!(!fragment.is_empty());
        }
    }

    #[test]
    fn fragments_fit_within_budget() {
        let line = "a chat message with some words\n";
        let text = line.repeat(40);
        let budget = 100;
        let counter = char_counter();
        for fragment in split_oversized(&text, budget, 10, &counter) {
            assert!(
                counter.count(&fragment) <= budget,
                "fragment of {} tokens exceeds budget {budget}",
                counter.count(&fragment)
            );
        }
    }

    #[test]
    fn concatenated_fragments_reconstruct_input() {
        let text = "alpha beta\ngamma delta\nepsilon zeta\neta theta\n".repeat(10);
        let fragments = split_oversized(&text, 40, 4, &char_counter());
        assert_eq!(stripped(&fragments.concat()), stripped(&text));
    }

    #[test]
    fn no_line_breaks_falls_back_to_midpoint() {
        let text = "x".repeat(200);
        let fragments = split_oversized(&text, 50, 5, &char_counter());
        assert!(fragments.len() > 1);
        let total: usize = fragments.iter().map(String::len).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "héllö wörld ünïcödé tèxt ".repeat(20);
        // Must not panic on a mid-char byte index.
        let fragments = split_oversized(&text, 40, 4, &char_counter());
        assert!(!fragments.is_empty());
        assert_eq!(stripped(&fragments.concat()), stripped(&text));
    }

    #[test]
    fn split_all_keeps_small_items_and_splits_large() {
        let items = vec!["small".to_string(), "line one\nline two\nline three\nline four\n".repeat(5)];
        let out = split_all(&items, 30, 2, &char_counter());
        assert_eq!(out[0], "small");
        assert!(out.len() > 2);
    }

    #[test]
    fn split_all_preserves_order() {
        let items = vec!["first".to_string(), "second".to_string()];
        let out = split_all(&items, 100, 5, &char_counter());
        assert_eq!(out, items);
    }
}
