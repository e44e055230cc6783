//! Plain dynamic-programming scanner used to cross-check the automaton.
//!
//! Keeps one full semi-global edit-distance column (`L + 1` cells) and
//! recomputes it for every symbol, then applies the same local-minimum rule
//! as [`Matcher::scan_record`](crate::Matcher::scan_record). O(L) work per
//! symbol, no pruning.
use crate::alphabet::{classify, Category};
use crate::pattern::Pattern;
use crate::scanner::Hit;

/// Report hits for one record by direct DP over the full column.
pub fn reference_scan(pattern: &Pattern, dist: usize, record: usize, bytes: &[u8]) -> Vec<Hit> {
    let len = pattern.len();
    let mut column: Vec<usize> = (0..=len).collect();
    let mut next = vec![0usize; len + 1];
    let mut last_score = dist + 1;
    let mut hit_pending = true;
    let mut out = Vec::new();

    for i in 0..=bytes.len() {
        let c = match bytes.get(i).map_or(Category::EndOfStream, |&b| classify(b)) {
            Category::Base(c) => c,
            Category::Terminator | Category::EndOfStream => {
                if last_score <= dist && hit_pending {
                    out.push(Hit { record, offset: i - 1, distance: last_score });
                }
                break;
            }
        };
        next[0] = 0;
        for row in 1..=len {
            let sub = column[row - 1] + usize::from(!pattern.accepts(row - 1, c));
            next[row] = sub.min(column[row] + 1).min(next[row - 1] + 1);
        }
        std::mem::swap(&mut column, &mut next);
        let score = column[len];

        if last_score <= dist && score > last_score && hit_pending {
            out.push(Hit { record, offset: i - 1, distance: last_score });
            hit_pending = false;
        } else if score < last_score {
            hit_pending = true;
        }
        last_score = score;
    }
    out
}

/// Smallest edit distance between `pattern` and any substring of `text`
/// that ends at the last byte of `text`.
pub fn end_distance(pattern: &Pattern, text: &[u8]) -> usize {
    let len = pattern.len();
    let mut column: Vec<usize> = (0..=len).collect();
    for &b in text {
        let c = match classify(b) {
            Category::Base(c) => c,
            _ => break,
        };
        let mut diag = column[0];
        for row in 1..=len {
            let up = column[row];
            column[row] = (diag + usize::from(!pattern.accepts(row - 1, c))).min(up + 1).min(column[row - 1] + 1);
            diag = up;
        }
    }
    column[len]
}
