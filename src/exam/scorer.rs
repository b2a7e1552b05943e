// src/exam/scorer.rs

use serde::Serialize;

use crate::models::result::Answer;

/// Raw score and rounded percentage for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreSummary {
    pub score: i64,
    pub percentage: i64,
}

/// Letter grade with its display message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub grade: &'static str,
    pub message: &'static str,
}

/// Counts correct answers and derives the rounded percentage.
///
/// Precondition: `answers` is non-empty. Handlers reject empty submissions
/// before scoring; an empty slice here is a programmer error.
pub fn score(answers: &[Answer]) -> ScoreSummary {
    debug_assert!(!answers.is_empty(), "scoring an empty answer set");

    let correct = answers.iter().filter(|a| a.is_correct).count() as i64;
    let total = answers.len() as i64;
    let percentage = ((correct as f64 / total as f64) * 100.0).round() as i64;

    ScoreSummary {
        score: correct,
        percentage,
    }
}

/// Step function over percentage bands, inclusive at each lower edge.
pub fn grade_of(percentage: i64) -> Grade {
    if percentage >= 90 {
        Grade {
            grade: "A+",
            message: "Outstanding Performance!",
        }
    } else if percentage >= 80 {
        Grade {
            grade: "A",
            message: "Excellent Work!",
        }
    } else if percentage >= 70 {
        Grade {
            grade: "B+",
            message: "Good Performance!",
        }
    } else if percentage >= 60 {
        Grade {
            grade: "B",
            message: "Satisfactory!",
        }
    } else if percentage >= 50 {
        Grade {
            grade: "C",
            message: "Needs Improvement!",
        }
    } else {
        Grade {
            grade: "F",
            message: "Better Luck Next Time!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(correct: usize, wrong: usize) -> Vec<Answer> {
        let mut out = Vec::new();
        for i in 0..correct + wrong {
            out.push(Answer {
                question_id: i as i64 + 1,
                selected_option: 0,
                is_correct: i < correct,
            });
        }
        out
    }

    #[test]
    fn perfect_score() {
        let summary = score(&answers(20, 0));
        assert_eq!(summary.score, 20);
        assert_eq!(summary.percentage, 100);
    }

    #[test]
    fn zero_score() {
        let summary = score(&answers(0, 20));
        assert_eq!(summary.score, 0);
        assert_eq!(summary.percentage, 0);
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        // 1/3 = 33.33.. -> 33, 2/3 = 66.66.. -> 67
        assert_eq!(score(&answers(1, 2)).percentage, 33);
        assert_eq!(score(&answers(2, 1)).percentage, 67);
    }

    #[test]
    fn percentage_stays_in_range() {
        for correct in 0..=20 {
            let p = score(&answers(correct, 20 - correct)).percentage;
            assert!((0..=100).contains(&p));
        }
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(grade_of(100).grade, "A+");
        assert_eq!(grade_of(95).grade, "A+");
        assert_eq!(grade_of(90).grade, "A+");
        assert_eq!(grade_of(89).grade, "A");
        assert_eq!(grade_of(80).grade, "A");
        assert_eq!(grade_of(79).grade, "B+");
        assert_eq!(grade_of(70).grade, "B+");
        assert_eq!(grade_of(69).grade, "B");
        assert_eq!(grade_of(60).grade, "B");
        assert_eq!(grade_of(59).grade, "C");
        assert_eq!(grade_of(50).grade, "C");
        assert_eq!(grade_of(49).grade, "F");
        assert_eq!(grade_of(0).grade, "F");
    }
}
