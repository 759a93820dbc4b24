//! Property tests for the quantified invariants in the testable-properties list, run end to end
//! against naive references, for uniformly random byte strings.

use tlz::{bwt, sais};

fn naive_suffix_array(text: &[u8]) -> Vec<usize> {
    let n = text.len() + 1;
    let mut t: Vec<usize> = text.iter().map(|&b| b as usize + 1).collect();
    t.push(0);
    let mut sa: Vec<usize> = (0..n).collect();
    sa.sort_by(|&a, &b| t[a..].cmp(&t[b..]));
    sa
}

fn naive_bwt(text: &[u8]) -> Vec<usize> {
    let n = text.len();
    let t: Vec<usize> = text
        .iter()
        .map(|&b| b as usize + 1)
        .chain(std::iter::once(0))
        .collect();
    let mut rotations: Vec<usize> = (0..=n).collect();
    rotations.sort_by(|&a, &b| {
        let rot_a = (0..=n).map(|k| t[(a + k) % (n + 1)]);
        let rot_b = (0..=n).map(|k| t[(b + k) % (n + 1)]);
        rot_a.cmp(rot_b)
    });
    rotations
        .into_iter()
        .map(|r| t[(r + n) % (n + 1)].saturating_sub(1))
        .collect()
}

proptest::proptest! {
    /// Invariants 1–2: `SA` is a permutation of `{0,...,n}`, sorted in lexicographic suffix
    /// order, with `SA[0] == n`.
    #[test]
    fn suffix_array_matches_naive_reference(text in proptest::collection::vec(proptest::num::u8::ANY, 0..1024)) {
        let sa = sais::build(&text);
        assert_eq!(naive_suffix_array(&text), sa);
        assert_eq!(text.len(), sa[0]);
    }

    /// Invariant 3: the BWT derived from `SA` matches an independent rotation-sort reference.
    #[test]
    fn bwt_matches_naive_reference(text in proptest::collection::vec(proptest::num::u8::ANY, 0..1024)) {
        let sa = sais::build(&text);
        let fast = bwt::extract(&text, &sa);
        assert_eq!(naive_bwt(&text), fast);
    }

    /// Invariant 7: fixed input always produces the same output bytes.
    #[test]
    fn compression_is_deterministic(text in proptest::collection::vec(proptest::num::u8::ANY, 0..1024)) {
        let mut first = Vec::new();
        let mut second = Vec::new();
        tlz::compress(&text, &mut first).unwrap();
        tlz::compress(&text, &mut second).unwrap();
        assert_eq!(first, second);
    }
}
