//! Property tests for the text utilities.

use proptest::prelude::*;
use wowinfo_rag::{chunk_text, clean_text};

/// *For any* input string, applying `clean_text` twice SHALL produce the
/// same output as applying it once.
mod prop_clean_text_idempotent {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn clean_twice_equals_clean_once(input in "\\PC{0,200}") {
            let once = clean_text(&input);
            let twice = clean_text(&once);
            prop_assert_eq!(&twice, &once);
        }
    }
}

/// *For any* text and chunk parameters with `overlap < chunk_size`,
/// removing the last `overlap` characters of every chunk except the last
/// and concatenating SHALL reproduce the original text, and the final
/// chunk SHALL end exactly at the end of the text.
mod prop_chunk_reconstruction {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn overlap_trim_reconstructs_original(
            text in "\\PC{0,300}",
            chunk_size in 1usize..50,
            overlap_fraction in 0.0f64..1.0,
        ) {
            // derive overlap strictly below chunk_size
            let overlap = ((chunk_size as f64) * overlap_fraction) as usize;
            prop_assume!(overlap < chunk_size);

            let chunks = chunk_text(&text, chunk_size, overlap);
            prop_assert!(!chunks.is_empty());

            let mut reconstructed = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                if i + 1 == chunks.len() {
                    reconstructed.push_str(chunk);
                } else {
                    let keep = chunk.chars().count().saturating_sub(overlap);
                    reconstructed.extend(chunk.chars().take(keep));
                }
            }
            prop_assert_eq!(&reconstructed, &text);

            // every chunk respects the size bound
            for chunk in &chunks {
                prop_assert!(chunk.chars().count() <= chunk_size);
            }
        }
    }
}
