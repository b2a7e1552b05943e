// src/bank.rs
//
// The static question bank. Loaded once at process start; immutable for the
// lifetime of the process. Selection quotas over the three categories live
// in `exam::selector`.

use once_cell::sync::Lazy;

use crate::models::question::{Category, Question};

static QUESTIONS: Lazy<Vec<Question>> = Lazy::new(build_bank);

/// Every question in the bank, in catalog order.
pub fn all() -> &'static [Question] {
    &QUESTIONS
}

/// Questions carrying the given category tag, in catalog order.
pub fn by_category(category: Category) -> Vec<&'static Question> {
    QUESTIONS.iter().filter(|q| q.category == category).collect()
}

/// Looks a question up by id.
pub fn find(id: i64) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

fn question(
    id: i64,
    text: &str,
    options: [&str; 4],
    correct_option: usize,
    category: Category,
) -> Question {
    Question {
        id,
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_option,
        category,
    }
}

fn build_bank() -> Vec<Question> {
    use Category::{Electronics, General, Technical};

    vec![
        question(
            1,
            "In rectangle ABCD, the diagonals AC and BD intersect at point E. If the area of the rectangle is 120 square units, what is the area of triangle EBC (the triangle with vertices E, B, C)?",
            ["30", "40", "60", "20"],
            0,
            General,
        ),
        question(
            2,
            "In most C-like languages, what is the result of the integer division 5 / 2?",
            ["2", "2.5", "3", "Error"],
            0,
            Technical,
        ),
        question(
            3,
            "In an ordered array, a search algorithm repeatedly divides the search interval in half until the target element is found or the interval becomes empty. What is the time complexity of this algorithm?",
            ["O(1)", "O(n)", "O(log n)", "O(n log n)"],
            2,
            Technical,
        ),
        question(
            4,
            "What is the output of: print(2 ** 3 ** 2)",
            ["64", "512", "256", "8"],
            1,
            Technical,
        ),
        question(
            5,
            "Which of the following represents a semantic HTML element?",
            ["<div>", "<section>", "<span>", "<b>"],
            1,
            Technical,
        ),
        question(
            6,
            "Which CSS property is used to create rounded corners?",
            ["border-width", "border-style", "border-radius", "border-round"],
            2,
            Technical,
        ),
        question(
            7,
            "In the context of web communication, when a client requests a resource that does not exist on the server, the server responds with which HTTP status code?",
            ["200", "301", "404", "500"],
            2,
            Technical,
        ),
        question(
            8,
            "In JavaScript, == and === differ because:",
            [
                "== checks value only, === checks value + type",
                "== checks type only, === checks value only",
                "Both are identical",
                "=== is only used in TypeScript",
            ],
            0,
            Technical,
        ),
        question(
            9,
            "Which of the following is a non-volatile memory?",
            ["RAM", "ROM", "Cache", "Register"],
            1,
            Technical,
        ),
        question(
            10,
            "What is printed by: for (int i = 0; i < 3; i++) printf(\"%d\", i);",
            ["012", "0123", "123", "0"],
            0,
            Technical,
        ),
        question(
            12,
            "In binary, what is the result of 1011 + 110?",
            ["10001", "11001", "10000", "11101"],
            0,
            Technical,
        ),
        question(
            13,
            "If in a certain code \"CAT\" is written as \"DBU\", then \"DOG\" will be coded as:",
            ["EPH", "DPH", "EOH", "ENH"],
            0,
            General,
        ),
        question(
            14,
            "Which is greater: log2(16) or log3(27)?",
            ["log2(16)", "log3(27)", "Both equal", "Cannot be compared"],
            2,
            General,
        ),
        question(
            15,
            "A person faces North, turns 90 degrees clockwise, then 180 degrees clockwise, and again 90 degrees clockwise. Which direction is he facing now?",
            ["North", "East", "South", "West"],
            0,
            General,
        ),
        question(
            16,
            "If 15 men can build a wall in 12 days, how many days will 10 men take?",
            ["12", "15", "18", "20"],
            2,
            General,
        ),
        question(
            17,
            "The mean of five numbers is 20. If one number is excluded, the mean becomes 18. Find the excluded number.",
            ["30", "32", "28", "26"],
            0,
            General,
        ),
        question(
            18,
            "If in a certain code, TABLE is written as YFQJK, how is CHAIR written in that code?",
            ["HMQWX", "HMPWX", "HMPWY", "GMPWY"],
            1,
            General,
        ),
        question(
            19,
            "What is the sum of the squares of the roots of the equation x^2 - 6x + 8 = 0?",
            ["20", "34", "28", "16"],
            2,
            General,
        ),
        question(
            20,
            "Five people (A, B, C, D, E) are sitting in a row. A is to the left of B and right of C. D is to the right of E and left of A. Who is sitting in the middle?",
            ["A", "B", "C", "D"],
            3,
            General,
        ),
        question(
            21,
            "What is the primary function of a capacitor in an electronic circuit?",
            [
                "To amplify signals",
                "To store electrical energy",
                "To convert AC to DC",
                "To regulate voltage",
            ],
            1,
            Electronics,
        ),
        question(
            22,
            "In digital electronics, what does a NOT gate do?",
            [
                "Inverts the input signal",
                "Amplifies the input signal",
                "Stores the input signal",
                "Delays the input signal",
            ],
            0,
            Electronics,
        ),
        question(
            23,
            "What is the unit of electrical resistance?",
            ["Volt", "Ampere", "Ohm", "Watt"],
            2,
            Electronics,
        ),
        question(
            24,
            "Which programming paradigm does Python primarily support?",
            [
                "Only procedural",
                "Only object-oriented",
                "Multi-paradigm",
                "Only functional",
            ],
            2,
            Technical,
        ),
        question(
            25,
            "What does API stand for?",
            [
                "Application Programming Interface",
                "Advanced Programming Integration",
                "Automated Program Instruction",
                "Application Process Integration",
            ],
            0,
            Technical,
        ),
        question(
            26,
            "In a database, what is a primary key?",
            [
                "The first column in a table",
                "A unique identifier for each record",
                "The most important data field",
                "A password for database access",
            ],
            1,
            Technical,
        ),
        question(
            27,
            "What is the result of 3! + 4! (factorial)?",
            ["30", "24", "18", "12"],
            0,
            General,
        ),
        question(
            28,
            "If A = 1, B = 2, C = 3... what is the sum of letters in \"CODE\"?",
            ["31", "32", "33", "34"],
            2,
            General,
        ),
        question(
            29,
            "What is the next number in the sequence: 2, 6, 12, 20, 30, ?",
            ["40", "42", "44", "46"],
            1,
            General,
        ),
        question(
            30,
            "In electronics, what does LED stand for?",
            [
                "Light Emitting Diode",
                "Low Energy Device",
                "Linear Electronic Display",
                "Laser Emission Detector",
            ],
            0,
            Electronics,
        ),
    ]
}
