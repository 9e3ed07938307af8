//! Preset query shortcuts.
//!
//! A fixed, build-time list of (label, icon, query) tuples. Triggering one
//! is equivalent in effect to manually submitting its query text.

/// A clickable query shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub query: &'static str,
}

/// The six quick actions, in display order.
pub const QUICK_ACTIONS: [QuickAction; 6] = [
    QuickAction {
        label: "Check Fees",
        icon: "\u{1f4b0}",
        query: "What are my current fees?",
    },
    QuickAction {
        label: "Attendance",
        icon: "\u{1f4ca}",
        query: "Show my attendance record",
    },
    QuickAction {
        label: "Grades & Results",
        icon: "\u{1f4cb}",
        query: "Check my grades and results",
    },
    QuickAction {
        label: "Class Schedule",
        icon: "\u{1f552}",
        query: "Show my class timetable",
    },
    QuickAction {
        label: "Exam Dates",
        icon: "\u{1f4da}",
        query: "When are my upcoming exams?",
    },
    QuickAction {
        label: "Library Info",
        icon: "\u{1f4d6}",
        query: "Check library status",
    },
];

/// Look up a quick action by zero-based index.
pub fn get(index: usize) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.get(index)
}
