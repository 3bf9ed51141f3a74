// libs/scheduling-cell/src/services/interval.rs
//
// The interval predicates every checker in this cell shares. All intervals
// are half-open [start, end) over times-of-day on a single date.

use chrono::NaiveTime;

/// True iff [start_a, end_a) and [start_b, end_b) overlap.
///
/// Strict inequality on both sides: back-to-back intervals where one ends
/// exactly when the other starts do NOT overlap. Loosening either side
/// would reject valid back-to-back bookings or let double-bookings through.
pub fn overlaps(start_a: NaiveTime, end_a: NaiveTime, start_b: NaiveTime, end_b: NaiveTime) -> bool {
    start_a < end_b && end_a > start_b
}

/// True iff [req_start, req_end) lies fully inside [block_start, block_end].
pub fn contains(
    block_start: NaiveTime,
    block_end: NaiveTime,
    req_start: NaiveTime,
    req_end: NaiveTime,
) -> bool {
    block_start <= req_start && block_end >= req_end
}

/// Work-block conflict predicate: three OR'd sub-conditions, kept separate
/// from `overlaps` because its boundary behavior differs. A new block whose
/// start equals an existing block's end (or end equals an existing start)
/// is NOT a conflict.
pub fn block_conflict(
    new_start: NaiveTime,
    new_end: NaiveTime,
    existing_start: NaiveTime,
    existing_end: NaiveTime,
) -> bool {
    // New start falls inside the existing span
    (new_start >= existing_start && new_start < existing_end)
        // New end falls inside the existing span
        || (new_end > existing_start && new_end <= existing_end)
        // New block fully contains the existing span
        || (new_start <= existing_start && new_end >= existing_end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn overlapping_intervals_detected() {
        assert!(overlaps(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
        assert!(overlaps(t(10, 30), t(11, 30), t(10, 0), t(11, 0)));
        assert!(overlaps(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn touching_endpoints_do_not_overlap() {
        assert!(!overlaps(t(10, 0), t(11, 0), t(11, 0), t(12, 0)));
        assert!(!overlaps(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        assert!(!overlaps(t(8, 0), t(9, 0), t(14, 0), t(15, 0)));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (t(10, 0), t(11, 0), t(10, 30), t(11, 30)),
            (t(10, 0), t(11, 0), t(11, 0), t(12, 0)),
            (t(7, 0), t(20, 0), t(9, 15), t(9, 45)),
            (t(13, 0), t(14, 0), t(15, 0), t(16, 0)),
        ];
        for (sa, ea, sb, eb) in cases {
            assert_eq!(overlaps(sa, ea, sb, eb), overlaps(sb, eb, sa, ea));
        }
    }

    #[test]
    fn containment_allows_exact_fit() {
        assert!(contains(t(9, 0), t(17, 0), t(10, 0), t(11, 0)));
        assert!(contains(t(10, 0), t(11, 0), t(10, 0), t(11, 0)));
        assert!(!contains(t(10, 0), t(11, 0), t(9, 30), t(11, 0)));
        assert!(!contains(t(10, 0), t(11, 0), t(10, 0), t(11, 30)));
    }

    #[test]
    fn block_conflict_detects_overlapping_spans() {
        // new start inside existing
        assert!(block_conflict(t(10, 30), t(12, 0), t(10, 0), t(11, 0)));
        // new end inside existing
        assert!(block_conflict(t(9, 0), t(10, 30), t(10, 0), t(11, 0)));
        // new contains existing
        assert!(block_conflict(t(9, 0), t(12, 0), t(10, 0), t(11, 0)));
        // identical spans
        assert!(block_conflict(t(10, 0), t(11, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn block_conflict_permits_touching_boundaries() {
        // new block starts exactly when the existing one ends
        assert!(!block_conflict(t(11, 0), t(12, 0), t(10, 0), t(11, 0)));
        // new block ends exactly when the existing one starts
        assert!(!block_conflict(t(9, 0), t(10, 0), t(10, 0), t(11, 0)));
    }
}
