//! Access guards.

use crate::error::GovernanceError;
use agora_types::{BallotId, Timestamp};

/// Allow the call only once `now` has reached `end_time` of `ballot`.
pub fn only_after(
    ballot: BallotId,
    end_time: Timestamp,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    if now < end_time {
        return Err(GovernanceError::VotingNotEnded {
            ballot,
            end_time,
            now,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_time_itself_is_allowed() {
        let b = BallotId::new(1);
        assert!(only_after(b, Timestamp::new(100), Timestamp::new(99)).is_err());
        assert!(only_after(b, Timestamp::new(100), Timestamp::new(100)).is_ok());
        assert!(only_after(b, Timestamp::new(100), Timestamp::new(u64::MAX)).is_ok());
    }
}
