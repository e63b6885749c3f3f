use std::fs::File;
use std::io::{BufReader, Write};

use tempfile::NamedTempFile;

use nwalign_core::{align, base_index, parse_input, Alignment, CostModel, ExpandError, Limits, GAP};

fn write_input(lines: &[&str]) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp input");
    for l in lines {
        writeln!(f, "{}", l).unwrap();
    }
    f
}

fn parse_file(f: &NamedTempFile) -> Result<(Vec<u8>, Vec<u8>), ExpandError> {
    let reader = BufReader::new(File::open(f.path()).unwrap());
    let (d1, d2) = parse_input(reader)?;
    let limits = Limits::default();
    Ok((d1.expand(limits.max_seq_len)?, d2.expand(limits.max_seq_len)?))
}

fn strip_gaps(row: &[u8]) -> Vec<u8> {
    row.iter().copied().filter(|&b| b != GAP).collect()
}

/// Score an emitted alignment column by column, independently of the
/// DP table the engine built.
fn rescore(result: &Alignment, model: &CostModel) -> u64 {
    result
        .row1
        .iter()
        .zip(&result.row2)
        .map(|(&a, &b)| {
            if a == GAP || b == GAP {
                model.gap as u64
            } else {
                model.sub[base_index(a).unwrap()][base_index(b).unwrap()] as u64
            }
        })
        .sum()
}

#[test]
fn expand_and_align_doubling_input() {
    // Two descriptions with two doubling steps each: 8 -> 32 and 10 -> 40.
    let input = write_input(&["ACACACTA", "3", "6", "TATTATAACC", "1", "2"]);
    let (s1, s2) = parse_file(&input).expect("parse and expand");
    assert_eq!(s1.len(), 32);
    assert_eq!(s2.len(), 40);

    let model = CostModel::default();
    let limits = Limits::default();
    let result = align(&s1, &s2, &model, &limits).expect("align");

    // Fixed reference value for this input under the default model.
    assert_eq!(result.cost, 816);

    assert_eq!(result.row1.len(), result.row2.len());
    assert_eq!(strip_gaps(&result.row1), s1);
    assert_eq!(strip_gaps(&result.row2), s2);
    for (a, b) in result.row1.iter().zip(&result.row2) {
        assert!(*a != GAP || *b != GAP);
    }

    // The reported cost matches the emitted alignment and cannot beat
    // the trivial all-gaps bound.
    assert_eq!(rescore(&result, &model), result.cost);
    assert!(result.cost <= model.gap as u64 * (s1.len() + s2.len()) as u64);

    // Bit-identical on a second run.
    let again = align(&s1, &s2, &model, &limits).expect("align again");
    assert_eq!(again, result);
}

#[test]
fn cost_commutes_for_the_reference_model() {
    let input = write_input(&["ACACACTA", "2", "TATTATAACC", "4"]);
    let (s1, s2) = parse_file(&input).unwrap();

    let model = CostModel::default();
    let limits = Limits::default();
    let forward = align(&s1, &s2, &model, &limits).unwrap();
    let backward = align(&s2, &s1, &model, &limits).unwrap();
    assert_eq!(forward.cost, backward.cost);
}

#[test]
fn append_fallback_reaches_the_engine() {
    // Position 100 is out of range for an 8-symbol string, so the base
    // is appended instead of spliced in.
    let input = write_input(&["ACACACTA", "100", "TATTATAACC"]);
    let (s1, s2) = parse_file(&input).unwrap();
    assert_eq!(s1, b"ACACACTAACACACTA");
    assert_eq!(s2, b"TATTATAACC");

    let result = align(&s1, &s2, &CostModel::default(), &Limits::default()).unwrap();
    assert_eq!(strip_gaps(&result.row1), s1);
    assert_eq!(strip_gaps(&result.row2), s2);
}

#[test]
fn truncated_input_file_is_rejected() {
    let input = write_input(&["ACACACTA", "3", "6"]);
    match parse_file(&input) {
        Err(ExpandError::TruncatedDescription) => {}
        other => panic!("expected TruncatedDescription, got {:?}", other),
    }
}

#[test]
fn invalid_bases_survive_expansion_but_fail_alignment() {
    // The expander treats any non-numeric line as a base string; the
    // alphabet check belongs to the engine.
    let input = write_input(&["ACXGT", "0", "ACGT"]);
    let (s1, s2) = parse_file(&input).unwrap();
    assert!(align(&s1, &s2, &CostModel::default(), &Limits::default()).is_err());
}
