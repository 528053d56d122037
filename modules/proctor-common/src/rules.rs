//! Risk rules: the fixed table mapping a detector's event label to its risk
//! contribution and the warning shown to the candidate.
//!
//! Total over all strings. Unrecognised labels carry zero risk rather than
//! erroring, so a new client-side detector can ship before the table knows it.

/// Ceiling for a session's accumulated risk score.
pub const MAX_RISK_SCORE: u32 = 100;

/// Warnings at which a session is marked high risk.
pub const HIGH_RISK_WARNING_THRESHOLD: u32 = 3;

pub const DEFAULT_WARNING_MESSAGE: &str = "Warning: Suspicious activity detected.";

pub const HIGH_RISK_MESSAGE: &str = "High risk marked: Too many warnings.";

/// Risk contribution of a single event.
pub fn risk_of(event_type: &str) -> u32 {
    match event_type {
        "tab_switch" => 15,
        "no_face" => 20,
        "multiple_faces" => 35,
        "looking_away" => 10,
        "voice_detected" => 25,
        "fast_answering" => 5,
        _ => 0,
    }
}

/// Candidate-facing warning text for an event.
///
/// Only meaningful when `risk_of(event_type) > 0`; zero-risk events never
/// produce a warning.
pub fn message_for(event_type: &str) -> &'static str {
    match event_type {
        "tab_switch" => "Warning: Please stay on the exam tab.",
        "no_face" => "Warning: No face detected in webcam.",
        "multiple_faces" => "Warning: Multiple faces detected!",
        "looking_away" => "Warning: Please stay focused on the screen.",
        "voice_detected" => "Warning: Voice detected in the background.",
        _ => DEFAULT_WARNING_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_events_carry_fixed_risk() {
        assert_eq!(risk_of("tab_switch"), 15);
        assert_eq!(risk_of("no_face"), 20);
        assert_eq!(risk_of("multiple_faces"), 35);
        assert_eq!(risk_of("looking_away"), 10);
        assert_eq!(risk_of("voice_detected"), 25);
        assert_eq!(risk_of("fast_answering"), 5);
    }

    #[test]
    fn unknown_event_is_zero_risk() {
        assert_eq!(risk_of("blinked"), 0);
        assert_eq!(risk_of(""), 0);
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(risk_of("TAB_SWITCH"), 0);
    }

    #[test]
    fn known_events_have_custom_messages() {
        assert_eq!(message_for("tab_switch"), "Warning: Please stay on the exam tab.");
        assert_eq!(message_for("no_face"), "Warning: No face detected in webcam.");
        assert_eq!(message_for("multiple_faces"), "Warning: Multiple faces detected!");
        assert_eq!(
            message_for("looking_away"),
            "Warning: Please stay focused on the screen."
        );
        assert_eq!(
            message_for("voice_detected"),
            "Warning: Voice detected in the background."
        );
    }

    #[test]
    fn fast_answering_falls_back_to_default_message() {
        assert!(risk_of("fast_answering") > 0);
        assert_eq!(message_for("fast_answering"), DEFAULT_WARNING_MESSAGE);
    }

    #[test]
    fn unknown_event_gets_default_message() {
        assert_eq!(message_for("something_new"), DEFAULT_WARNING_MESSAGE);
    }
}
