//! Keyword-based response resolution.
//!
//! Maps free-text input to one of a fixed set of canned replies. The input is
//! lowercased and tested against keyword sets in a fixed priority order;
//! the first matching topic wins and exactly one reply is produced per call.

// =============================================================================
// Topics and canned replies
// =============================================================================

/// A query category the assistant can answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Fees,
    Attendance,
    Grades,
    Schedule,
    Exams,
    Library,
}

impl Topic {
    /// Keywords matched as literal substrings of the lowercased input.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Topic::Fees => &["fee", "payment"],
            Topic::Attendance => &["attendance"],
            Topic::Grades => &["grade", "result"],
            Topic::Schedule => &["schedule", "timetable"],
            Topic::Exams => &["exam"],
            Topic::Library => &["library"],
        }
    }

    /// The canned reply for this topic, returned verbatim.
    pub fn reply(&self) -> &'static str {
        match self {
            Topic::Fees => {
                "Your current semester fee is $2,500. The due date is January 31st. \
                 You can pay online through the student portal or at the finance office."
            }
            Topic::Attendance => {
                "Your current attendance is 85%. You need at least 75% to be eligible \
                 for exams. You have 3 unexcused absences this semester."
            }
            Topic::Grades => {
                "Your current GPA is 3.7. Last semester results: Mathematics A-, \
                 Physics B+, Chemistry A, English B+. Results for pending assignments \
                 will be available next week."
            }
            Topic::Schedule => {
                "Tomorrow you have: 9:00 AM - Mathematics (Room 101), \
                 11:00 AM - Physics Lab (Lab 2), 2:00 PM - Chemistry (Room 205). \
                 No classes on Friday."
            }
            Topic::Exams => {
                "Upcoming exams: Mathematics - March 15th, Physics - March 18th, \
                 Chemistry - March 22nd. Exam hall assignments will be posted next week."
            }
            Topic::Library => {
                "Library hours: Monday-Friday 8:00 AM - 10:00 PM, \
                 Saturday 9:00 AM - 6:00 PM. You have 2 books due next week. \
                 No outstanding fines."
            }
        }
    }
}

/// Reply used when no keyword matches, listing the supported topics.
pub const FALLBACK_REPLY: &str = "I can help you with fees, attendance, grades, schedules, \
     exams, and library information. Could you please be more specific about what you \
     need help with?";

/// Topics in match-priority order. Earlier entries win: an input containing
/// both "fee" and "exam" resolves to the fee reply.
const MATCH_ORDER: [Topic; 6] = [
    Topic::Fees,
    Topic::Attendance,
    Topic::Grades,
    Topic::Schedule,
    Topic::Exams,
    Topic::Library,
];

// =============================================================================
// Responder
// =============================================================================

/// Pure, total resolver from input text to a canned reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responder;

impl Responder {
    pub fn new() -> Self {
        Self
    }

    /// Classify the input, if any keyword set matches.
    pub fn classify(&self, input: &str) -> Option<Topic> {
        let lowered = input.to_lowercase();
        MATCH_ORDER
            .iter()
            .find(|topic| topic.keywords().iter().any(|kw| lowered.contains(kw)))
            .copied()
    }

    /// Resolve the input to a reply. Always returns a string; unmatched
    /// inputs get the fallback reply.
    pub fn resolve(&self, input: &str) -> &'static str {
        match self.classify(input) {
            Some(topic) => topic.reply(),
            None => FALLBACK_REPLY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn responder() -> Responder {
        Responder::new()
    }

    // ---- Per-topic classification ----

    #[test]
    fn test_fee_keyword() {
        assert_eq!(responder().classify("what are my fees"), Some(Topic::Fees));
    }

    #[test]
    fn test_payment_keyword() {
        assert_eq!(
            responder().classify("how do I make a payment"),
            Some(Topic::Fees)
        );
    }

    #[test]
    fn test_attendance_keyword() {
        assert_eq!(
            responder().classify("show my attendance record"),
            Some(Topic::Attendance)
        );
    }

    #[test]
    fn test_grade_keyword() {
        assert_eq!(
            responder().classify("check my grades"),
            Some(Topic::Grades)
        );
    }

    #[test]
    fn test_result_keyword() {
        assert_eq!(
            responder().classify("when are results out"),
            Some(Topic::Grades)
        );
    }

    #[test]
    fn test_schedule_keyword() {
        assert_eq!(
            responder().classify("what's my schedule"),
            Some(Topic::Schedule)
        );
    }

    #[test]
    fn test_timetable_keyword() {
        assert_eq!(
            responder().classify("show my class timetable"),
            Some(Topic::Schedule)
        );
    }

    #[test]
    fn test_exam_keyword() {
        assert_eq!(
            responder().classify("when are my upcoming exams?"),
            Some(Topic::Exams)
        );
    }

    #[test]
    fn test_library_keyword() {
        assert_eq!(
            responder().classify("check library status"),
            Some(Topic::Library)
        );
    }

    // ---- Priority order ----

    #[test]
    fn test_fee_beats_exam() {
        // Contains both "fee" and "exam"; rule 1 precedes rule 5.
        assert_eq!(
            responder().resolve("I need to pay my fee for the exam"),
            Topic::Fees.reply()
        );
    }

    #[test]
    fn test_grade_beats_exam() {
        assert_eq!(
            responder().classify("grades for the exam"),
            Some(Topic::Grades)
        );
    }

    #[test]
    fn test_attendance_beats_library() {
        assert_eq!(
            responder().classify("library attendance"),
            Some(Topic::Attendance)
        );
    }

    // ---- Substring policy ----

    #[test]
    fn test_gpa_does_not_match_grade() {
        // "GPA" is not a literal substring of any keyword set.
        assert_eq!(responder().classify("what's my GPA"), None);
        assert_eq!(responder().resolve("what's my GPA"), FALLBACK_REPLY);
    }

    #[test]
    fn test_grade_matches_literally() {
        assert_eq!(responder().resolve("what's my grade"), Topic::Grades.reply());
    }

    #[test]
    fn test_keyword_inside_longer_word_matches() {
        // Literal substring policy: "fees" contains "fee".
        assert_eq!(responder().classify("feestival"), Some(Topic::Fees));
    }

    // ---- Case insensitivity ----

    #[test]
    fn test_case_insensitive() {
        assert_eq!(responder().classify("SHOW MY ATTENDANCE"), Some(Topic::Attendance));
        assert_eq!(responder().classify("Exam Dates"), Some(Topic::Exams));
    }

    // ---- Fallback ----

    #[test]
    fn test_hello_falls_back() {
        let reply = responder().resolve("hello");
        assert_eq!(reply, FALLBACK_REPLY);
        for topic_word in ["fees", "attendance", "grades", "schedules", "exams", "library"] {
            assert!(reply.contains(topic_word), "fallback should list {topic_word}");
        }
    }

    #[test]
    fn test_empty_input_is_total() {
        assert_eq!(responder().resolve(""), FALLBACK_REPLY);
    }

    #[test]
    fn test_unicode_input_is_total() {
        assert_eq!(responder().resolve("\u{00e9}cole \u{1f393}"), FALLBACK_REPLY);
    }

    // ---- Reply fixtures ----

    #[test]
    fn test_each_topic_reply_is_distinct() {
        let replies: Vec<&str> = [
            Topic::Fees,
            Topic::Attendance,
            Topic::Grades,
            Topic::Schedule,
            Topic::Exams,
            Topic::Library,
        ]
        .iter()
        .map(|t| t.reply())
        .collect();
        let mut unique = replies.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), replies.len());
    }

    #[test]
    fn test_resolve_returns_reply_verbatim() {
        assert!(responder().resolve("fee").contains("$2,500"));
        assert!(responder().resolve("attendance").contains("85%"));
        assert!(responder().resolve("grade").contains("3.7"));
        assert!(responder().resolve("timetable").contains("Room 101"));
        assert!(responder().resolve("exam").contains("March 15th"));
        assert!(responder().resolve("library").contains("8:00 AM - 10:00 PM"));
    }

    #[test]
    fn test_exactly_one_reply_per_call() {
        // Input mentioning every topic still yields only the top-priority reply.
        let input = "fee attendance grade schedule exam library";
        assert_eq!(responder().resolve(input), Topic::Fees.reply());
    }
}
