// src/exam/selector.rs

use rand::Rng;
use rand::seq::SliceRandom;

use crate::bank;
use crate::models::question::{Category, Question};

/// Branch bucket driving the category mix of a paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchBucket {
    ComputerLike,
    ElectronicsLike,
    Other,
}

/// Case-insensitive substring classification. Anything unrecognized falls
/// into `Other`; a bad branch string is never an error.
fn classify_branch(branch: &str) -> BranchBucket {
    let branch = branch.to_lowercase();
    if branch.contains("computer") || branch.contains("information") {
        BranchBucket::ComputerLike
    } else if branch.contains("electronics") || branch.contains("electrical") {
        BranchBucket::ElectronicsLike
    } else {
        BranchBucket::Other
    }
}

/// Category quota for one bucket. `take` on the pool iterator caps each
/// quota at the pool size, so a short pool shrinks the paper instead of
/// failing.
fn quota(bucket: BranchBucket) -> &'static [(Category, usize)] {
    match bucket {
        BranchBucket::ComputerLike => &[(Category::Technical, 15), (Category::General, 5)],
        BranchBucket::ElectronicsLike => &[
            (Category::Technical, 8),
            (Category::Electronics, 7),
            (Category::General, 5),
        ],
        BranchBucket::Other => &[(Category::Technical, 10), (Category::General, 10)],
    }
}

/// Builds a branch-appropriate, uniformly shuffled paper of at most `count`
/// questions drawn from the static bank. Pure apart from the injected rng.
pub fn select_questions<R: Rng + ?Sized>(
    branch: &str,
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool: Vec<Question> = Vec::new();

    for &(category, limit) in quota(classify_branch(branch)) {
        pool.extend(
            bank::by_category(category)
                .into_iter()
                .take(limit)
                .cloned(),
        );
    }

    // Fisher-Yates, uniform over permutations.
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn category_counts(questions: &[Question]) -> (usize, usize, usize) {
        let count = |c: Category| questions.iter().filter(|q| q.category == c).count();
        (
            count(Category::Technical),
            count(Category::General),
            count(Category::Electronics),
        )
    }

    #[test]
    fn classifies_known_branches() {
        assert_eq!(
            classify_branch("Computer Science Engineering"),
            BranchBucket::ComputerLike
        );
        assert_eq!(
            classify_branch("Information Technology"),
            BranchBucket::ComputerLike
        );
        assert_eq!(
            classify_branch("Electronics & Communication"),
            BranchBucket::ElectronicsLike
        );
        assert_eq!(
            classify_branch("Electrical Engineering"),
            BranchBucket::ElectronicsLike
        );
        assert_eq!(
            classify_branch("Mechanical Engineering"),
            BranchBucket::Other
        );
        assert_eq!(classify_branch(""), BranchBucket::Other);
    }

    #[test]
    fn computer_branch_respects_quotas() {
        let paper = select_questions("Computer Science Engineering", 20, &mut rng());
        assert!(paper.len() <= 20);

        let (technical, general, electronics) = category_counts(&paper);
        assert!(technical <= 15);
        assert!(general <= 5);
        assert_eq!(electronics, 0);
    }

    #[test]
    fn electronics_branch_gets_electronics_quota() {
        let paper = select_questions("Electronics & Communication", 20, &mut rng());

        let (technical, general, electronics) = category_counts(&paper);
        assert!(technical <= 8);
        assert!(electronics <= 7);
        assert!(general <= 5);
    }

    #[test]
    fn other_branch_gets_balanced_mix() {
        let paper = select_questions("Civil Engineering", 20, &mut rng());

        let (technical, general, electronics) = category_counts(&paper);
        assert!(technical <= 10);
        assert!(general <= 10);
        assert_eq!(electronics, 0);
    }

    #[test]
    fn no_duplicate_question_ids() {
        for branch in ["Computer Science Engineering", "Electrical Engineering", "Biotechnology"] {
            let paper = select_questions(branch, 20, &mut rng());
            let ids: HashSet<i64> = paper.iter().map(|q| q.id).collect();
            assert_eq!(ids.len(), paper.len(), "duplicates for {branch}");
        }
    }

    #[test]
    fn all_questions_come_from_the_bank() {
        let paper = select_questions("Mechanical Engineering", 20, &mut rng());
        for q in &paper {
            let original = bank::find(q.id).expect("question not in bank");
            assert_eq!(original.correct_option, q.correct_option);
        }
    }

    #[test]
    fn exact_count_when_pool_is_large_enough() {
        // Every bucket's pool holds at least 10 questions.
        for branch in [
            "Computer Science Engineering",
            "Electronics & Communication",
            "Chemical Engineering",
        ] {
            let paper = select_questions(branch, 10, &mut rng());
            assert_eq!(paper.len(), 10, "branch {branch}");
        }
    }

    #[test]
    fn count_truncates_the_paper() {
        let paper = select_questions("Computer Science Engineering", 5, &mut rng());
        assert_eq!(paper.len(), 5);
    }

    #[test]
    fn count_larger_than_pool_returns_whole_pool() {
        let paper = select_questions("Civil Engineering", 500, &mut rng());
        // Other bucket draws at most 10 + 10.
        assert!(paper.len() <= 20);
        assert!(!paper.is_empty());
    }
}
