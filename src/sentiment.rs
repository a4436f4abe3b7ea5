//! The fixed sentiment label set and its display colors.

use std::fmt;

/// Sentiment labels understood by the app, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sentiment {
    Happy,
    Sad,
    Fear,
    Angry,
    Confusion,
    Supportive,
    Opposing,
    /// Noise or spam; predictions with this label skip the feedback workflow.
    Irrelevant,
}

/// Plain RGB triple so the label table stays independent of the UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelColor {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

/// Color used for labels outside the known set.
pub const UNKNOWN_LABEL_COLOR: LabelColor = LabelColor {
    name: "black",
    rgb: [0, 0, 0],
};

impl Sentiment {
    pub const ALL: [Sentiment; 8] = [
        Sentiment::Happy,
        Sentiment::Sad,
        Sentiment::Fear,
        Sentiment::Angry,
        Sentiment::Confusion,
        Sentiment::Supportive,
        Sentiment::Opposing,
        Sentiment::Irrelevant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Happy => "happy",
            Sentiment::Sad => "sad",
            Sentiment::Fear => "fear",
            Sentiment::Angry => "angry",
            Sentiment::Confusion => "confusion",
            Sentiment::Supportive => "supportive",
            Sentiment::Opposing => "opposing",
            Sentiment::Irrelevant => "irrelevant",
        }
    }

    /// Parse a stored label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|sentiment| sentiment.as_str().eq_ignore_ascii_case(label))
    }

    pub fn color(self) -> LabelColor {
        let (name, rgb) = match self {
            Sentiment::Happy => ("white", [255, 255, 255]),
            Sentiment::Sad => ("blue", [0, 0, 255]),
            Sentiment::Fear => ("purple", [128, 0, 128]),
            Sentiment::Angry => ("red", [255, 0, 0]),
            Sentiment::Confusion => ("orange", [255, 165, 0]),
            Sentiment::Supportive => ("teal", [0, 128, 128]),
            Sentiment::Opposing => ("brown", [165, 42, 42]),
            Sentiment::Irrelevant => ("gray", [128, 128, 128]),
        };
        LabelColor { name, rgb }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display color for any stored label; unknown labels render black.
pub fn label_color(label: &str) -> LabelColor {
    Sentiment::parse(label)
        .map(Sentiment::color)
        .unwrap_or(UNKNOWN_LABEL_COLOR)
}

pub fn is_irrelevant(label: &str) -> bool {
    Sentiment::parse(label) == Some(Sentiment::Irrelevant)
}

/// Canonical label strings in display order.
pub fn known_labels() -> Vec<String> {
    Sentiment::ALL
        .iter()
        .map(|sentiment| sentiment.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Sentiment::parse("Angry"), Some(Sentiment::Angry));
        assert_eq!(Sentiment::parse(" IRRELEVANT "), Some(Sentiment::Irrelevant));
        assert_eq!(Sentiment::parse("bored"), None);
    }

    #[test]
    fn colors_follow_the_fixed_table() {
        assert_eq!(label_color("happy").name, "white");
        assert_eq!(label_color("Sad").name, "blue");
        assert_eq!(label_color("supportive").name, "teal");
        assert_eq!(label_color("opposing").name, "brown");
        assert_eq!(label_color("irrelevant").name, "gray");
        assert_eq!(label_color("sarcastic"), UNKNOWN_LABEL_COLOR);
    }

    #[test]
    fn irrelevant_detection_is_case_insensitive() {
        assert!(is_irrelevant("Irrelevant"));
        assert!(!is_irrelevant("fear"));
        assert_eq!(known_labels().len(), 8);
    }
}
