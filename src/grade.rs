//! Grade promotion policy.
//!
//! Tiers form an explicit ordered table of `(grade, threshold)` pairs. A
//! user moves at most one row down the table per evaluation, and only when
//! the next row has a threshold; ADMIN has none, so it is never reached
//! through promotion.

use tracing::info;

use crate::board::BoardRepository;
use crate::config::GradeConfig;
use crate::db::{DbConn, Grade, User, UserRepository};
use crate::Result;

/// One row of the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// The grade this row grants.
    pub grade: Grade,
    /// Authored boards required, or `None` if the grade is not earned by posting.
    pub threshold: Option<i64>,
}

/// Ordered tier table.
#[derive(Debug, Clone)]
pub struct GradePolicy {
    tiers: Vec<Tier>,
}

impl Default for GradePolicy {
    fn default() -> Self {
        Self::from_config(&GradeConfig::default())
    }
}

impl GradePolicy {
    /// Build the SILVER -> GOLD -> RED -> ADMIN table from configured thresholds.
    pub fn from_config(config: &GradeConfig) -> Self {
        Self {
            tiers: vec![
                Tier {
                    grade: Grade::Silver,
                    threshold: None,
                },
                Tier {
                    grade: Grade::Gold,
                    threshold: Some(config.gold_threshold),
                },
                Tier {
                    grade: Grade::Red,
                    threshold: Some(config.red_threshold),
                },
                Tier {
                    grade: Grade::Admin,
                    threshold: None,
                },
            ],
        }
    }

    /// The tier table, lowest first.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Grade a user with `current` and `board_count` authored boards should hold.
    ///
    /// Returns `current` unchanged when the next tier is not reached, has no
    /// threshold, or `current` is not in the table.
    pub fn next_grade(&self, current: Grade, board_count: i64) -> Grade {
        let Some(position) = self.tiers.iter().position(|t| t.grade == current) else {
            return current;
        };
        match self.tiers.get(position + 1) {
            Some(Tier {
                grade,
                threshold: Some(threshold),
            }) if board_count >= *threshold => *grade,
            _ => current,
        }
    }
}

/// Re-evaluate a user's grade from their authored board count.
///
/// Persists and returns the new grade when promoted; otherwise returns the
/// current grade without writing.
pub async fn upgrade_grade(conn: &mut DbConn, policy: &GradePolicy, user: &User) -> Result<Grade> {
    let board_count = BoardRepository::new(&mut *conn).count_by_user(user.id).await?;

    let next = policy.next_grade(user.grade, board_count);
    if next != user.grade {
        UserRepository::new(conn).update_grade(user.id, next).await?;
        info!(
            user_id = user.id,
            from = %user.grade,
            to = %next,
            board_count,
            "User promoted"
        );
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silver_promoted_at_gold_threshold() {
        let policy = GradePolicy::default();
        assert_eq!(policy.next_grade(Grade::Silver, 4), Grade::Silver);
        assert_eq!(policy.next_grade(Grade::Silver, 5), Grade::Gold);
        assert_eq!(policy.next_grade(Grade::Silver, 6), Grade::Gold);
    }

    #[test]
    fn test_only_one_step_per_evaluation() {
        let policy = GradePolicy::default();
        assert_eq!(policy.next_grade(Grade::Silver, 50), Grade::Gold);
        assert_eq!(policy.next_grade(Grade::Gold, 50), Grade::Red);
    }

    #[test]
    fn test_gold_waits_for_red_threshold() {
        let policy = GradePolicy::default();
        assert_eq!(policy.next_grade(Grade::Gold, 9), Grade::Gold);
        assert_eq!(policy.next_grade(Grade::Gold, 10), Grade::Red);
    }

    #[test]
    fn test_never_promotes_into_admin() {
        let policy = GradePolicy::default();
        assert_eq!(policy.next_grade(Grade::Red, 10_000), Grade::Red);
        assert_eq!(policy.next_grade(Grade::Admin, 10_000), Grade::Admin);
        assert_eq!(policy.next_grade(Grade::Admin, 0), Grade::Admin);
    }

    #[test]
    fn test_never_demotes() {
        let policy = GradePolicy::default();
        assert_eq!(policy.next_grade(Grade::Red, 0), Grade::Red);
        assert_eq!(policy.next_grade(Grade::Gold, 0), Grade::Gold);
    }

    #[test]
    fn test_configured_thresholds() {
        let policy = GradePolicy::from_config(&GradeConfig {
            gold_threshold: 1,
            red_threshold: 2,
        });
        assert_eq!(policy.next_grade(Grade::Silver, 1), Grade::Gold);
        assert_eq!(policy.next_grade(Grade::Gold, 2), Grade::Red);
        assert_eq!(policy.tiers().len(), 4);
        assert_eq!(policy.tiers()[3].threshold, None);
    }

    #[tokio::test]
    async fn test_upgrade_grade_counts_authored_boards() {
        use crate::board::NewBoard;
        use crate::db::NewUser;
        use crate::Database;

        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let alice = UserRepository::new(&mut conn)
            .create(&NewUser::new("alice", "hash", "Alice"))
            .await
            .unwrap();
        let bob = UserRepository::new(&mut conn)
            .create(&NewUser::new("bob", "hash", "Bob"))
            .await
            .unwrap();
        let policy = GradePolicy::from_config(&GradeConfig {
            gold_threshold: 2,
            red_threshold: 3,
        });

        let mut boards = BoardRepository::new(&mut conn);
        boards.create(&NewBoard::new(alice.id, "a", "1")).await.unwrap();
        boards.create(&NewBoard::new(bob.id, "b", "1")).await.unwrap();

        assert_eq!(
            upgrade_grade(&mut conn, &policy, &alice).await.unwrap(),
            Grade::Silver
        );

        BoardRepository::new(&mut conn)
            .create(&NewBoard::new(alice.id, "a", "2"))
            .await
            .unwrap();
        assert_eq!(
            upgrade_grade(&mut conn, &policy, &alice).await.unwrap(),
            Grade::Gold
        );
        let stored = UserRepository::new(&mut conn)
            .get_by_id(alice.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.grade, Grade::Gold);
    }
}
