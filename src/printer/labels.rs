//! # Label Stock
//!
//! Physical label formats (DK rolls) and the dot geometry the print head
//! uses for each.
//!
//! Endless labels have no fixed length; the job decides how long the label
//! is. Die-cut labels have a fixed printable area and images must match it
//! exactly.
//!
//! ```text
//!   ├──────────── print head (device pixel width) ────────────┤
//!   │ unused │      printable dots      │ right margin │
//! ```

use super::models::WIDE_MODELS;

/// How the stock is cut on the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFactor {
    /// Continuous tape, length set per job
    Endless,
    /// Pre-cut rectangular labels
    DieCut,
    /// Pre-cut round labels
    RoundDieCut,
}

impl FormFactor {
    /// Media type byte for `ESC i z`.
    pub fn media_type(self) -> u8 {
        match self {
            FormFactor::Endless => 0x0A,
            FormFactor::DieCut | FormFactor::RoundDieCut => 0x0B,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormFactor::Endless => "endless",
            FormFactor::DieCut => "die-cut",
            FormFactor::RoundDieCut => "round die-cut",
        }
    }
}

/// A label stock entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    /// Identifier used in requests, e.g. "62" or "102x152"
    pub identifier: &'static str,
    /// Tape width and length in millimetres (length 0 for endless)
    pub tape_size: (u8, u8),
    pub form_factor: FormFactor,
    /// Printable area in dots (height 0 for endless)
    pub dots_printable: (u32, u32),
    /// Blank dots between the image and the right edge of the head
    pub right_margin: u32,
    /// Feed margin for `ESC i d`
    pub feed_margin: u16,
    /// Models that can print this stock; empty means all
    pub restricted_to: &'static [&'static str],
}

impl Label {
    const fn endless(identifier: &'static str, width_mm: u8, dots: u32, right_margin: u32) -> Self {
        Self {
            identifier,
            tape_size: (width_mm, 0),
            form_factor: FormFactor::Endless,
            dots_printable: (dots, 0),
            right_margin,
            feed_margin: 35,
            restricted_to: &[],
        }
    }

    const fn die_cut(
        identifier: &'static str,
        tape_size: (u8, u8),
        dots_printable: (u32, u32),
        right_margin: u32,
    ) -> Self {
        Self {
            identifier,
            tape_size,
            form_factor: FormFactor::DieCut,
            dots_printable,
            right_margin,
            feed_margin: 0,
            restricted_to: &[],
        }
    }

    const fn round(self) -> Self {
        Self {
            form_factor: FormFactor::RoundDieCut,
            ..self
        }
    }

    const fn wide_only(self) -> Self {
        Self {
            restricted_to: WIDE_MODELS,
            ..self
        }
    }

    /// Look up a label by identifier.
    pub fn by_identifier(identifier: &str) -> Option<&'static Label> {
        LABELS.iter().find(|l| l.identifier == identifier)
    }

    /// Whether `model` can print this stock.
    pub fn supports_model(&self, model: &str) -> bool {
        self.restricted_to.is_empty()
            || self
                .restricted_to
                .iter()
                .any(|m| m.eq_ignore_ascii_case(model))
    }

    /// Human-readable size, e.g. "62mm endless" or "102mm x 153mm die-cut".
    pub fn describe(&self) -> String {
        match self.form_factor {
            FormFactor::Endless => format!("{}mm endless", self.tape_size.0),
            FormFactor::RoundDieCut => format!("{}mm round", self.tape_size.0),
            FormFactor::DieCut => format!(
                "{}mm x {}mm die-cut",
                self.tape_size.0, self.tape_size.1
            ),
        }
    }
}

/// Every label stock the converter knows.
pub const LABELS: &[Label] = &[
    Label::endless("12", 12, 106, 29),
    Label::endless("29", 29, 306, 6),
    Label::endless("38", 38, 413, 12),
    Label::endless("50", 50, 554, 12),
    Label::endless("54", 54, 590, 0),
    Label::endless("62", 62, 696, 12),
    Label::endless("102", 102, 1164, 12).wide_only(),
    Label::die_cut("17x54", (17, 54), (165, 566), 0),
    Label::die_cut("17x87", (17, 87), (165, 956), 0),
    Label::die_cut("23x23", (23, 23), (202, 202), 42),
    Label::die_cut("29x42", (29, 42), (306, 425), 6),
    Label::die_cut("29x90", (29, 90), (306, 991), 6),
    Label::die_cut("39x90", (38, 90), (413, 991), 12),
    Label::die_cut("39x48", (39, 48), (425, 495), 6),
    Label::die_cut("52x29", (52, 29), (578, 271), 0),
    Label::die_cut("62x29", (62, 29), (696, 271), 12),
    Label::die_cut("62x100", (62, 100), (696, 1109), 12),
    Label::die_cut("102x51", (102, 51), (1164, 526), 12).wide_only(),
    Label::die_cut("102x152", (102, 153), (1164, 1660), 12).wide_only(),
    Label::die_cut("d24", (24, 24), (164, 164), 42).round(),
    Label::die_cut("d58", (58, 58), (618, 618), 12).round(),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stock_matches_default_canvas() {
        let label = Label::by_identifier("102x152").unwrap();
        assert_eq!(label.dots_printable, (1164, 1660));
        assert_eq!(label.form_factor, FormFactor::DieCut);
    }

    #[test]
    fn test_restrictions() {
        let wide = Label::by_identifier("102x152").unwrap();
        assert!(wide.supports_model("QL-1060N"));
        assert!(!wide.supports_model("QL-700"));

        let narrow = Label::by_identifier("62").unwrap();
        assert!(narrow.supports_model("QL-700"));
        assert!(narrow.supports_model("QL-1060N"));
    }

    #[test]
    fn test_media_type() {
        assert_eq!(FormFactor::Endless.media_type(), 0x0A);
        assert_eq!(FormFactor::DieCut.media_type(), 0x0B);
        assert_eq!(FormFactor::RoundDieCut.media_type(), 0x0B);
    }

    #[test]
    fn test_identifiers_are_unique() {
        for (i, a) in LABELS.iter().enumerate() {
            for b in &LABELS[i + 1..] {
                assert_ne!(a.identifier, b.identifier);
            }
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(Label::by_identifier("62").unwrap().describe(), "62mm endless");
        assert_eq!(
            Label::by_identifier("102x152").unwrap().describe(),
            "102mm x 153mm die-cut"
        );
        assert_eq!(Label::by_identifier("d24").unwrap().describe(), "24mm round");
    }
}
