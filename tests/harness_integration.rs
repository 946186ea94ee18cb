//! Word counting, factory selection and benchmark output end to end.

use std::fs;

use arbora::config::{BenchmarkConfig, Config, HashMapConfig};
use arbora::harness::{self, report, Benchmark, Phase, WordCount, CSV_HEADER};
use arbora::{ArboraError, AssociativeStructure, StructureFactory, StructureKind};
use tempfile::tempdir;

const TEXT: &str = "livro texto palavra árvore código programa dados função variável classe \
livro texto programa dados livro função código variável classe palavra texto";

#[test]
fn word_counts_match_for_every_selector() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("words.txt");
    fs::write(&path, TEXT).unwrap();
    let words = harness::read_words(&path).unwrap();
    assert_eq!(words.len(), 21);

    let factory = StructureFactory::<WordCount>::with_defaults().unwrap();
    let mut reference = None;
    for selector in ["avl", "rb", "open", "chained", "extern", "redblack"] {
        let mut counts = factory.create(selector).unwrap();
        assert_eq!(harness::count_words(counts.as_mut(), &words).unwrap(), 10);
        assert_eq!(harness::total_count(counts.as_ref()), 21);

        let top = harness::top_words(counts.as_ref(), 3);
        assert_eq!(top[0], ("livro".to_string(), 3));
        assert_eq!(top[1], ("texto".to_string(), 3));

        let all: Vec<WordCount> = counts.ordered_content().into_iter().cloned().collect();
        match &reference {
            None => reference = Some(all),
            Some(expected) => assert_eq!(&all, expected, "{}", selector),
        }
    }
}

#[test]
fn removing_a_counted_word() {
    let factory = StructureFactory::<WordCount>::with_defaults().unwrap();
    for kind in StructureKind::ALL {
        let mut counts = factory.create_kind(kind).unwrap();
        harness::count_words(counts.as_mut(), harness::tokenize(TEXT)).unwrap();
        let removed = counts.remove(&"variável".to_string()).unwrap();
        assert_eq!(removed, Some(("variável".to_string(), 2)));
        assert!(!counts.contains(&"variável".to_string()));
        assert_eq!(counts.len(), 9);
    }
}

#[test]
fn unknown_selector_is_reported() {
    let factory = StructureFactory::<WordCount>::with_defaults().unwrap();
    let err = factory.create("skiplist").err().unwrap();
    assert!(matches!(err, ArboraError::UnknownStructure { .. }));
    assert_eq!(err.to_string(), "Unknown structure: 'skiplist'");
    assert_eq!(err.category(), "factory");
}

#[test]
fn factory_uses_hash_configs() {
    let factory = StructureFactory::<u32>::with_hash_configs(
        HashMapConfig::open_addressing().with_capacity(3),
        HashMapConfig::chaining().with_capacity(3),
    )
    .unwrap();
    let mut open = factory.create("open").unwrap();
    for k in 0..10 {
        open.insert(k).unwrap();
    }
    assert_eq!(open.len(), 10);
    assert_eq!(open.render().lines().count(), 17);
}

#[test]
fn benchmark_writes_csv_report() {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("performance_results.csv");
    let config = BenchmarkConfig {
        data_sizes: vec![25, 50],
        search_sample: 10,
        remove_sample: 5,
        csv_path: csv.clone(),
        ..BenchmarkConfig::default()
    };

    let mut bench = Benchmark::new(config.clone()).unwrap();
    let results = bench.run().unwrap().to_vec();
    assert_eq!(results.len(), 2 * 18);
    report::save_csv(&results, &config.csv_path).unwrap();

    let text = fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(CSV_HEADER));
    let rows: Vec<Vec<&str>> = lines.map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.len(), results.len());
    assert!(rows.iter().all(|r| r.len() == 11));
    assert_eq!(rows[0][0], "AVL Tree");
    assert_eq!(rows[0][1], "Insert");
    assert_eq!(rows[0][2], "25");

    assert!(results
        .iter()
        .filter(|r| r.operation == Phase::Remove)
        .all(|r| r.data_size == 5));

    let table = report::summary_table(&results);
    assert_eq!(table.lines().count(), results.len() + 2);
}

#[test]
fn benchmark_config_file_drives_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bench.json");
    let config = BenchmarkConfig {
        data_sizes: vec![12],
        search_sample: 4,
        remove_sample: 2,
        structures: vec![StructureKind::ChainedHash, StructureKind::Avl],
        ..BenchmarkConfig::default()
    };
    config.save_to_file(&path).unwrap();

    let loaded = BenchmarkConfig::load_from_file(&path).unwrap();
    let mut bench = Benchmark::new(loaded).unwrap();
    let names: Vec<String> = bench
        .run()
        .unwrap()
        .iter()
        .map(|r| r.structure_name.clone())
        .collect();
    assert_eq!(names.len(), 3 + 6);
    assert!(names[..3].iter().all(|n| n == "ChainedHashMap"));
    assert!(names[3..].iter().all(|n| n == "AVL Tree"));
}
