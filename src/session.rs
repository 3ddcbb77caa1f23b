//! Per-session counters and the persisted session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live counters for the session in progress.
#[derive(Debug, Clone)]
pub struct SessionStats {
    pub started_at: DateTime<Utc>,
    pub correct: u32,
    pub wrong: u32,
    pub credits_earned: u64,
    pub best_streak: u32,
}

impl SessionStats {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            correct: 0,
            wrong: 0,
            credits_earned: 0,
            best_streak: 0,
        }
    }

    pub fn record_answer(&mut self, correct: bool, earned: u64, streak: u32) {
        if correct {
            self.correct += 1;
            self.credits_earned += earned;
        } else {
            self.wrong += 1;
        }
        if streak > self.best_streak {
            self.best_streak = streak;
        }
    }

    /// Finalizes the session. Returns `None` when no answers were recorded,
    /// in which case nothing should be persisted.
    pub fn finish(&self, now: DateTime<Utc>) -> Option<SessionRecord> {
        let total = self.correct + self.wrong;
        if total == 0 {
            return None;
        }
        let duration = (now - self.started_at).num_seconds().max(0) as u64;
        Some(SessionRecord {
            date: now,
            duration,
            correct: self.correct,
            wrong: self.wrong,
            credits_earned: self.credits_earned,
            best_streak: self.best_streak,
            accuracy: ((self.correct as f64 / total as f64) * 100.0).round() as u8,
        })
    }
}

/// One persisted entry of the session history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub date: DateTime<Utc>,
    pub duration: u64,
    pub correct: u32,
    pub wrong: u32,
    pub credits_earned: u64,
    pub best_streak: u32,
    pub accuracy: u8,
}

/// Appends a record to the log, evicting the oldest entries beyond `cap`.
pub fn push_record(log: &mut Vec<SessionRecord>, record: SessionRecord, cap: usize) {
    log.push(record);
    while log.len() > cap {
        log.remove(0);
    }
}

/// All-time aggregates over the session history.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTotals {
    pub sessions: usize,
    pub total_seconds: u64,
    pub correct: u32,
    pub wrong: u32,
    pub credits_earned: u64,
    pub best_streak: u32,
    pub accuracy: u8,
}

pub fn totals(log: &[SessionRecord]) -> SessionTotals {
    let mut out = SessionTotals {
        sessions: log.len(),
        ..Default::default()
    };
    for record in log {
        out.total_seconds += record.duration;
        out.correct += record.correct;
        out.wrong += record.wrong;
        out.credits_earned += record.credits_earned;
        out.best_streak = out.best_streak.max(record.best_streak);
    }
    let answered = out.correct + out.wrong;
    if answered > 0 {
        out.accuracy = ((out.correct as f64 / answered as f64) * 100.0).round() as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn empty_session_produces_no_record() {
        let stats = SessionStats::start(at(0));
        assert!(stats.finish(at(120)).is_none());
    }

    #[test]
    fn finished_session_rounds_accuracy() {
        let mut stats = SessionStats::start(at(0));
        for _ in 0..3 {
            stats.record_answer(true, 1, 1);
        }
        for _ in 0..2 {
            stats.record_answer(false, 0, 0);
        }
        let record = stats.finish(at(90)).expect("answers were recorded");
        assert_eq!(record.correct, 3);
        assert_eq!(record.wrong, 2);
        assert_eq!(record.accuracy, 60);
        assert_eq!(record.duration, 90);
    }

    #[test]
    fn best_streak_tracks_the_maximum() {
        let mut stats = SessionStats::start(at(0));
        stats.record_answer(true, 1, 1);
        stats.record_answer(true, 1, 2);
        stats.record_answer(false, 0, 0);
        stats.record_answer(true, 1, 1);
        assert_eq!(stats.best_streak, 2);
    }

    #[test]
    fn log_evicts_oldest_beyond_cap() {
        let mut log = Vec::new();
        for i in 0..51 {
            let mut stats = SessionStats::start(at(0));
            stats.record_answer(true, i, 1);
            push_record(&mut log, stats.finish(at(10)).unwrap(), 50);
        }
        assert_eq!(log.len(), 50);
        assert_eq!(log[0].credits_earned, 1, "the oldest record was evicted");
        assert_eq!(log[49].credits_earned, 50);
    }

    #[test]
    fn totals_aggregate_across_records() {
        let mut log = Vec::new();
        let mut a = SessionStats::start(at(0));
        a.record_answer(true, 4, 3);
        a.record_answer(false, 0, 0);
        push_record(&mut log, a.finish(at(60)).unwrap(), 50);

        let mut b = SessionStats::start(at(100));
        b.record_answer(true, 2, 5);
        push_record(&mut log, b.finish(at(130)).unwrap(), 50);

        let t = totals(&log);
        assert_eq!(t.sessions, 2);
        assert_eq!(t.total_seconds, 90);
        assert_eq!(t.correct, 2);
        assert_eq!(t.wrong, 1);
        assert_eq!(t.credits_earned, 6);
        assert_eq!(t.best_streak, 5);
        assert_eq!(t.accuracy, 67);
    }
}
