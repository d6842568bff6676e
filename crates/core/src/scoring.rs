//! Scoring module
//!
//! - Every lock awards a flat `LOCK_SCORE` (10).
//! - Clearing `n` rows at once awards `100 * 2^(n-1)`: 100, 200, 400, 800.
//! - The auto-drop interval is a constant 500ms regardless of rows cleared.

use crate::types::{DROP_INTERVAL_MS, LINE_CLEAR_BASE, LOCK_SCORE};

/// Score calculation result for one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub lock_score: u32,
    pub line_clear_score: u32,
    pub total: u32,
}

/// Points for clearing `lines` rows simultaneously.
pub fn calculate_line_score(lines: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_CLEAR_BASE.saturating_mul(1u32.checked_shl(lines - 1).unwrap_or(u32::MAX))
}

/// Complete score for a lock that cleared `lines` rows.
pub fn calculate_score(lines: u32) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines);
    ScoreResult {
        lock_score: LOCK_SCORE,
        line_clear_score,
        total: LOCK_SCORE.saturating_add(line_clear_score),
    }
}

/// Auto-drop interval for the current game.
///
/// `rows` is accepted for call-site symmetry with the row counter but does not
/// change the interval: there is no difficulty ramp.
pub fn get_drop_interval_ms(_rows: u32) -> u32 {
    DROP_INTERVAL_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0), 0);
        assert_eq!(calculate_line_score(1), 100);
        assert_eq!(calculate_line_score(2), 200);
        assert_eq!(calculate_line_score(3), 400);
        assert_eq!(calculate_line_score(4), 800);
    }

    #[test]
    fn test_line_score_saturates() {
        assert_eq!(calculate_line_score(40), u32::MAX);
    }

    #[test]
    fn test_lock_always_scores_ten() {
        let result = calculate_score(0);
        assert_eq!(result.lock_score, 10);
        assert_eq!(result.line_clear_score, 0);
        assert_eq!(result.total, 10);

        let result = calculate_score(2);
        assert_eq!(result.total, 210);
    }

    #[test]
    fn test_drop_interval_is_constant() {
        assert_eq!(get_drop_interval_ms(0), 500);
        assert_eq!(get_drop_interval_ms(10), 500);
        assert_eq!(get_drop_interval_ms(1_000), 500);
    }
}
