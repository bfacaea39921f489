//! The embedded promotional text processed when no input is given.

/// Promotional text with two submission dates and a masterclass date.
pub const SAMPLE_TEXT: &str = "Win a MacBook Air, iPad, or AirPods! 🎁
Plus, unlock your chance to study abroad!

Pitch your dream university in a 60-second video for Dream University Pitch 2024! 🎓
Get a FREE counseling session with Leverage Edu (worth INR 4,999).
🗓 Submissions: 16th Oct - 10th Nov
📅 Masterclass: 25th Oct

Make your study abroad dream come true! Register for FREE
Good luck!";
