//! Context-window assembly.

use super::{truncate_chars, ScoredContext};

/// Separator between rendered context blocks.
const BLOCK_DELIMITER: &str = "\n\n---\n\n";

/// Render ranked context items into one bounded text block.
///
/// Each item is truncated to `max_block_length` characters and labelled
/// with its source. A running total of accumulated text is kept; once a
/// block would push the total past `max_block_length` times the number of
/// input items, assembly stops and later items are dropped. An empty input
/// yields an empty string.
pub fn assemble_context(contexts: &[ScoredContext], max_block_length: usize) -> String {
    let budget = max_block_length * contexts.len();

    let mut blocks = Vec::with_capacity(contexts.len());
    let mut total_length = 0;

    for context in contexts {
        let (text, _) = truncate_chars(&context.text, max_block_length);
        let length = text.chars().count();

        if total_length + length > budget {
            break;
        }

        blocks.push(format!("{}\n{}", context.source.label(), text));
        total_length += length;
    }

    blocks.join(BLOCK_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrieval::ContextSource;

    fn item(source: ContextSource, text: &str) -> ScoredContext {
        ScoredContext {
            source,
            text: text.to_string(),
            score: 1.0,
        }
    }

    #[test]
    fn test_empty_input_yields_empty_string() {
        assert_eq!(assemble_context(&[], 2000), "");
    }

    #[test]
    fn test_blocks_are_labelled_and_delimited() {
        let contexts = vec![
            item(ContextSource::Transcript, "first passage"),
            item(ContextSource::Reference, "second passage"),
        ];

        let block = assemble_context(&contexts, 2000);
        assert_eq!(
            block,
            "[TRANSCRIPT]\nfirst passage\n\n---\n\n[REFERENCE]\nsecond passage"
        );
    }

    #[test]
    fn test_long_items_are_truncated() {
        let contexts = vec![item(ContextSource::Transcript, &"a".repeat(50))];

        let block = assemble_context(&contexts, 10);
        assert_eq!(block, format!("[TRANSCRIPT]\n{}", "a".repeat(10)));
    }

    #[test]
    fn test_output_stays_within_proportional_bound() {
        let contexts: Vec<ScoredContext> = (0..4)
            .map(|_| item(ContextSource::Transcript, &"b".repeat(500)))
            .collect();

        let max_block_length = 100;
        let block = assemble_context(&contexts, max_block_length);

        let delimiter_overhead =
            (contexts.len() - 1) * BLOCK_DELIMITER.chars().count();
        let label_overhead = contexts.len() * "[TRANSCRIPT]\n".chars().count();
        assert!(
            block.chars().count()
                <= max_block_length * contexts.len() + delimiter_overhead + label_overhead
        );
    }

    #[test]
    fn test_input_order_is_preserved() {
        let contexts = vec![
            item(ContextSource::Reference, "low scorer rendered first"),
            item(ContextSource::Transcript, "high scorer rendered second"),
        ];

        let block = assemble_context(&contexts, 2000);
        let first = block.find("low scorer").unwrap();
        let second = block.find("high scorer").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_multibyte_text_is_not_split() {
        let contexts = vec![item(ContextSource::Transcript, "blåbærsyltetøy")];

        let block = assemble_context(&contexts, 6);
        assert_eq!(block, "[TRANSCRIPT]\nblåbær");
    }
}
