use keyevolve::config::CorpusPaths;
use keyevolve::consts::{DEFAULT_ALPHABET, DEFAULT_GENERATOR_ALPHABET};
use keyevolve::error::KeyEvolveError;
use keyevolve::layout::{Layout, Mapping};
use keyevolve::layouts::KnownLayout;
use keyevolve::scorer::{reference_layout, ScorerKind};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

struct Corpus {
    _dir: TempDir,
    monograms: PathBuf,
    bigrams: PathBuf,
}

impl Corpus {
    fn new(monograms: &[&str], bigrams: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mono_path = dir.path().join("monograms.txt");
        let bi_path = dir.path().join("bigrams.txt");

        let mut f = File::create(&mono_path).unwrap();
        for line in monograms {
            writeln!(f, "{}", line).unwrap();
        }
        let mut f = File::create(&bi_path).unwrap();
        for line in bigrams {
            writeln!(f, "{}", line).unwrap();
        }

        Self {
            _dir: dir,
            monograms: mono_path,
            bigrams: bi_path,
        }
    }

    fn english() -> Self {
        Self::new(
            &["e 1200", "t 910", "a 810", "o 770", "i 730", "n 700", "s 630", "h 610",
              "r 600", "d 430", ". 120", "Q 10", "! 999"],
            &["th 356", "he 307", "in 243", "er 205", "an 199", "re 185", "on 176",
              "nd 163", "es 140", "e. 40", "?a 77"],
        )
    }

    fn paths(&self) -> CorpusPaths {
        CorpusPaths {
            monograms: self.monograms.to_str().unwrap().to_string(),
            bigrams: self.bigrams.to_str().unwrap().to_string(),
        }
    }
}

#[test]
fn test_reference_layout_normalizes_to_one() {
    let corpus = Corpus::english();
    let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
    let reference = reference_layout(&mapping);
    assert_eq!(reference, KnownLayout::Qwerty.to_layout(&mapping).unwrap());

    for kind in [ScorerKind::Monogram, ScorerKind::Bigram] {
        let scorer = kind.build(&mapping, &corpus.paths()).unwrap();
        let score = scorer.calculate_score(&reference);
        assert_eq!(score, scorer.baseline_score());
        assert_eq!(scorer.normalize_score(score), 1.0, "{} scorer", kind);
    }
}

#[test]
fn test_scores_are_deterministic_across_instances() {
    let corpus = Corpus::english();
    let mapping = Mapping::build(DEFAULT_GENERATOR_ALPHABET).unwrap();
    let mut rng = fastrand::Rng::with_seed(11);
    let layouts: Vec<Layout> = (0..50).map(|_| Layout::random(&mut rng)).collect();

    for kind in [ScorerKind::Monogram, ScorerKind::Bigram] {
        let a = kind.build(&mapping, &corpus.paths()).unwrap();
        let b = kind.build(&mapping, &corpus.paths()).unwrap();
        for layout in &layouts {
            let first = a.calculate_score(layout);
            assert_eq!(first, a.calculate_score(layout));
            assert_eq!(first, b.calculate_score(layout));
        }
    }
}

#[test]
fn test_generator_alphabet_still_uses_qwerty_reference() {
    // Same symbols in a different order: only the ids differ.
    let corpus = Corpus::english();
    let mapping = Mapping::build(DEFAULT_GENERATOR_ALPHABET).unwrap();
    let scorer = ScorerKind::Monogram.build(&mapping, &corpus.paths()).unwrap();
    let qwerty = Layout::parse("qwertyuiopasdfghjkl;zxcvbnm.,/", &mapping).unwrap();
    assert_eq!(scorer.normalize_score(scorer.calculate_score(&qwerty)), 1.0);
}

#[test]
fn test_empty_corpus_scores_zero_and_normalizes_to_nan() {
    let corpus = Corpus::new(&[], &[]);
    let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
    let mut rng = fastrand::Rng::with_seed(3);

    for kind in [ScorerKind::Monogram, ScorerKind::Bigram] {
        let scorer = kind.build(&mapping, &corpus.paths()).unwrap();
        assert_eq!(scorer.baseline_score(), 0);
        for _ in 0..10 {
            assert_eq!(scorer.calculate_score(&Layout::random(&mut rng)), 0);
        }
        assert!(scorer.normalize_score(0).is_nan());
    }
}

#[test]
fn test_toy_alphabet_is_rejected() {
    let corpus = Corpus::english();
    let mapping = Mapping::build("abcde").unwrap();
    for kind in [ScorerKind::Monogram, ScorerKind::Bigram] {
        match kind.build(&mapping, &corpus.paths()) {
            Err(KeyEvolveError::Config(msg)) => assert!(msg.contains("30")),
            Err(other) => panic!("Expected Config error, got {:?}", other),
            Ok(_) => panic!("5-symbol alphabet accepted by {} scorer", kind),
        }
    }
}

#[test]
fn test_missing_corpus_file_is_io_error() {
    let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
    let paths = CorpusPaths {
        monograms: "/definitely/not/here/monograms.txt".to_string(),
        bigrams: "/definitely/not/here/bigrams.txt".to_string(),
    };
    assert!(matches!(
        ScorerKind::Monogram.build(&mapping, &paths),
        Err(KeyEvolveError::Io(_))
    ));
    assert!(matches!(
        ScorerKind::Bigram.build(&mapping, &paths),
        Err(KeyEvolveError::Io(_))
    ));
}

#[test]
fn test_non_numeric_count_is_corpus_error() {
    let corpus = Corpus::new(&["e 12", "t lots"], &["th many"]);
    let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();

    match ScorerKind::Monogram.build(&mapping, &corpus.paths()) {
        Err(KeyEvolveError::Corpus { line, .. }) => assert_eq!(line, 2),
        Err(other) => panic!("Expected Corpus error, got {:?}", other),
        Ok(_) => panic!("bad monogram count accepted"),
    }
    match ScorerKind::Bigram.build(&mapping, &corpus.paths()) {
        Err(KeyEvolveError::Corpus { line, .. }) => assert_eq!(line, 1),
        Err(other) => panic!("Expected Corpus error, got {:?}", other),
        Ok(_) => panic!("bad bigram count accepted"),
    }
}

#[test]
fn test_better_placement_scores_higher() {
    let corpus = Corpus::new(&["e 1000"], &[]);
    let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
    let scorer = ScorerKind::Monogram.build(&mapping, &corpus.paths()).unwrap();

    let e = mapping.id_of('e').unwrap() as usize;
    let mut on_home = Layout::identity();
    on_home.swap(e, 12);
    let mut on_corner = Layout::identity();
    on_corner.swap(e, 24);

    assert!(scorer.calculate_score(&on_home) > scorer.calculate_score(&on_corner));
    assert!(scorer.normalize_score(scorer.calculate_score(&on_home)) > 1.0);
}
