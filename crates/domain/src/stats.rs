use crate::status::Status;
use serde::{Deserialize, Serialize};

/// Number of memos per derived status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub expired: usize,
}

impl MemoStats {
    pub fn tally<I: IntoIterator<Item = Status>>(statuses: I) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.total += 1;
            match status {
                Status::Pending => stats.pending += 1,
                Status::Completed => stats.completed += 1,
                Status::Expired => stats.expired += 1,
                _ => (),
            }
        }
        stats
    }
}

/// Number of monitors per derived status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStats {
    pub total: usize,
    pub valid: usize,
    pub revoked: usize,
    pub expired: usize,
    pub unknown: usize,
    pub paused: usize,
}

impl MonitorStats {
    pub fn tally<I: IntoIterator<Item = Status>>(statuses: I) -> Self {
        let mut stats = Self::default();
        for status in statuses {
            stats.total += 1;
            match status {
                Status::Valid => stats.valid += 1,
                Status::Revoked => stats.revoked += 1,
                Status::Expired => stats.expired += 1,
                Status::Paused => stats.paused += 1,
                _ => stats.unknown += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tallies_memo_statuses() {
        let stats = MemoStats::tally(vec![
            Status::Pending,
            Status::Expired,
            Status::Expired,
            Status::Completed,
        ]);
        assert_eq!(
            stats,
            MemoStats {
                total: 4,
                pending: 1,
                completed: 1,
                expired: 2,
            }
        );
    }

    #[test]
    fn tallies_monitor_statuses() {
        let stats = MonitorStats::tally(vec![
            Status::Valid,
            Status::Revoked,
            Status::Unknown,
            Status::Paused,
            Status::Valid,
        ]);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.valid, 2);
        assert_eq!(stats.revoked, 1);
        assert_eq!(stats.unknown, 1);
        assert_eq!(stats.paused, 1);
        assert_eq!(stats.expired, 0);
    }
}
