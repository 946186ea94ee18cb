//! Word-frequency and benchmark harness
//!
//! - [`text`]: tokenizing input text
//! - [`frequency`]: counting words into any structure
//! - [`runner`]: seeded insert/search/remove benchmark
//! - [`report`]: summary table and CSV output
//!
//! ```rust
//! use arbora::harness::{count_words, tokenize, top_words, WordCount};
//! use arbora::{create_structure, StructureKind};
//!
//! let mut counts = create_structure::<WordCount>(StructureKind::Avl);
//! count_words(counts.as_mut(), tokenize("to be or not to be")).unwrap();
//! assert_eq!(top_words(counts.as_ref(), 2), vec![("be".to_string(), 2), ("to".to_string(), 2)]);
//! ```

pub mod frequency;
pub mod report;
pub mod runner;
pub mod text;

pub use frequency::{count_words, top_words, total_count, WordCount};
pub use report::{save_csv, summary_table, write_csv, CSV_HEADER};
pub use runner::{Benchmark, Phase, TestResult};
pub use text::{read_words, tokenize};
