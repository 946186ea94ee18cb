//! Word frequency counting over any [`AssociativeStructure`].

use crate::error::Result;
use crate::structure::AssociativeStructure;

/// A word and how often it occurred
pub type WordCount = (String, u64);

/// Count `words` into `structure`, returning how many were new.
///
/// A word already present has its count bumped through
/// [`get_node`](AssociativeStructure::get_node); a new word is inserted with
/// count 1.
pub fn count_words<S, I>(structure: &mut S, words: I) -> Result<usize>
where
    S: AssociativeStructure<WordCount> + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut distinct = 0;
    for word in words {
        let word = word.as_ref().to_string();
        if structure.contains(&word) {
            if let Some(mut node) = structure.get_node(&word) {
                if let Some(count) = node.payload_mut() {
                    *count += 1;
                }
            }
        } else if structure.insert((word, 1))? {
            distinct += 1;
        }
    }
    Ok(distinct)
}

/// The `n` most frequent words, ties broken alphabetically
pub fn top_words<S>(structure: &S, n: usize) -> Vec<WordCount>
where
    S: AssociativeStructure<WordCount> + ?Sized,
{
    let mut counts: Vec<WordCount> = structure.ordered_content().into_iter().cloned().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts.truncate(n);
    counts
}

/// Sum of all counts
pub fn total_count<S>(structure: &S) -> u64
where
    S: AssociativeStructure<WordCount> + ?Sized,
{
    structure.ordered_content().iter().map(|(_, count)| count).sum()
}
