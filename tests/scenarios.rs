//! End-to-end checks of the documented search behaviour through the public API.
use nucgrep::*;

fn search(pattern: &str, dist: i64, input: &str) -> String {
    let m = Matcher::new(pattern, dist).unwrap();
    let mut out = Vec::new();
    search_reader(&m, input.as_bytes(), &SearchOptions::default(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn scenario_a_exact() {
    assert_eq!(search("ACGT", 0, "ACGT\n"), "1:3,0\n");
}

#[test]
fn scenario_b_substitution() {
    assert_eq!(search("ACGT", 1, "ACCT\n"), "1:3,1\n");
}

#[test]
fn scenario_c_no_hit() {
    assert_eq!(search("AC", 1, "TTTT\n"), "");
}

#[test]
fn scenario_d_unmatched_bracket() {
    assert!(matches!(Matcher::new("AC]", 0), Err(NucgrepError::PatternSyntax { position: 2, .. })));
}

#[test]
fn scenario_e_distance_not_below_length() {
    let err = Matcher::new("AC", 2).unwrap_err();
    assert!(matches!(err, NucgrepError::DistanceTooLarge { dist: 2, len: 2 }));
}

#[test]
fn scenario_f_group() {
    assert_eq!(search("A[CG]T", 0, "AGT\n"), "1:2,0\n");
    assert_eq!(search("A[CG]T", 0, "ACT\n"), "1:2,0\n");
    assert_eq!(search("A[CG]T", 0, "ATT\n"), "");
    assert_eq!(search("A[CG]T", 0, "AGT\nACT\nATT\n"), "1:2,0\n2:2,0\n");
}

#[test]
fn negative_distance() {
    assert!(matches!(Matcher::new("ACGT", -3), Err(NucgrepError::NegativeDistance(-3))));
}

#[test]
fn record_equal_to_pattern_gives_single_zero_hit() {
    for pattern in ["A", "ACGT", "GATTACA", "NNACGTNN", "ACGTACGTACGTACGTACGTAC", "TTTTTTTTTGGGGGGGGGCCCCCCCCCAAAAAAAAA"] {
        let len = pattern.len();
        for dist in [0, (len - 1) / 2, len - 1] {
            for width in 1..=MAX_BLOCK_WIDTH {
                let m = Matcher::with_block_width(pattern, dist as i64, width).unwrap();
                let mut record = pattern.as_bytes().to_vec();
                record.push(b'\n');
                assert_eq!(
                    m.scan(7, &record),
                    vec![Hit { record: 7, offset: len - 1, distance: 0 }],
                    "pattern {pattern} dist {dist} width {width}"
                );
            }
        }
    }
}

#[test]
fn repeated_scans_are_identical() {
    let m = Matcher::new("GGA[CT]NTT", 2).unwrap();
    let input = "ACGGACTTTGGGATTTACGGTCATTGA\nGGCAGTT\n\nTTTTTTTT\n";
    let mut first = Vec::new();
    search_reader(&m, input.as_bytes(), &SearchOptions::default(), &mut first).unwrap();
    for _ in 0..3 {
        let mut again = Vec::new();
        search_reader(&m, input.as_bytes(), &SearchOptions::default(), &mut again).unwrap();
        assert_eq!(again, first);
    }
    assert!(!first.is_empty());
}

#[test]
fn one_report_per_occurrence() {
    // Two occurrences separated by enough mismatching sequence.
    assert_eq!(search("GATTACA", 1, "GATTACATTTTTTTGATTGCA\n"), "1:6,0\n1:20,1\n");
}

#[test]
fn shared_automaton_across_patterns() {
    let dfa = std::sync::Arc::new(BlockAutomaton::new(3).unwrap());
    let a = Matcher::with_automaton(Pattern::compile("ACGT").unwrap(), 0, dfa.clone()).unwrap();
    let b = Matcher::with_automaton(Pattern::compile("TTGCA").unwrap(), 1, dfa).unwrap();
    assert!(std::sync::Arc::ptr_eq(a.automaton(), b.automaton()));
    assert_eq!(a.scan(1, b"ACGT\n"), vec![Hit { record: 1, offset: 3, distance: 0 }]);
    assert_eq!(b.scan(1, b"TTGCA\n"), vec![Hit { record: 1, offset: 4, distance: 0 }]);
}
