//! Metrics for the two fonts the renderer draws with.
//!
//! Everything is set in Helvetica or Helvetica-Bold, registered as
//! non-embedded Type1 fonts with WinAnsi encoding, so layout runs off the
//! standard AFM advance widths at 1000 units per em.

use pdf_writer::Name;

/// Helvetica advance widths for chars 32..=126, 1000 units/em.
static REGULAR_WIDTHS: [f32; 95] = [
    278.0, 278.0, 355.0, 556.0, 556.0, 889.0, 667.0, 191.0, 333.0, 333.0, // ' '..')'
    389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0, // '*'..'3'
    556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 278.0, 278.0, 584.0, 584.0, // '4'..'='
    584.0, 556.0, 1015.0, 667.0, 667.0, 722.0, 722.0, 667.0, 611.0, 778.0, // '>'..'G'
    722.0, 278.0, 500.0, 667.0, 556.0, 833.0, 722.0, 778.0, 667.0, 778.0, // 'H'..'Q'
    722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 278.0, // 'R'..'['
    278.0, 278.0, 469.0, 556.0, 333.0, 556.0, 556.0, 500.0, 556.0, 556.0, // '\'..'e'
    278.0, 556.0, 556.0, 222.0, 222.0, 500.0, 222.0, 833.0, 556.0, 556.0, // 'f'..'o'
    556.0, 556.0, 333.0, 500.0, 278.0, 556.0, 500.0, 722.0, 500.0, 500.0, // 'p'..'y'
    500.0, 334.0, 260.0, 334.0, 584.0, // 'z'..'~'
];

/// Helvetica-Bold advance widths for chars 32..=126, 1000 units/em.
static BOLD_WIDTHS: [f32; 95] = [
    278.0, 333.0, 474.0, 556.0, 556.0, 889.0, 722.0, 238.0, 333.0, 333.0, // ' '..')'
    389.0, 584.0, 278.0, 333.0, 278.0, 278.0, 556.0, 556.0, 556.0, 556.0, // '*'..'3'
    556.0, 556.0, 556.0, 556.0, 556.0, 556.0, 333.0, 333.0, 584.0, 584.0, // '4'..'='
    584.0, 611.0, 975.0, 722.0, 722.0, 722.0, 722.0, 667.0, 611.0, 778.0, // '>'..'G'
    722.0, 278.0, 556.0, 722.0, 611.0, 833.0, 722.0, 778.0, 667.0, 778.0, // 'H'..'Q'
    722.0, 667.0, 611.0, 722.0, 667.0, 944.0, 667.0, 667.0, 611.0, 333.0, // 'R'..'['
    278.0, 333.0, 584.0, 556.0, 333.0, 556.0, 611.0, 556.0, 611.0, 556.0, // '\'..'e'
    333.0, 611.0, 611.0, 278.0, 278.0, 556.0, 278.0, 889.0, 611.0, 611.0, // 'f'..'o'
    611.0, 611.0, 389.0, 556.0, 333.0, 611.0, 556.0, 778.0, 556.0, 556.0, // 'p'..'y'
    500.0, 389.0, 280.0, 389.0, 584.0, // 'z'..'~'
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Resource name the font is registered under on every page.
    pub(crate) fn pdf_name(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"F1"),
            Font::Bold => Name(b"F2"),
        }
    }

    pub(crate) fn base_font(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"Helvetica"),
            Font::Bold => Name(b"Helvetica-Bold"),
        }
    }

    fn char_width_1000(self, c: char) -> f32 {
        let table = match self {
            Font::Regular => &REGULAR_WIDTHS,
            Font::Bold => &BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '\u{2022}' => 350.0,
            '\u{2013}' => 556.0,
            '\u{2014}' => 1000.0,
            '\u{2018}' | '\u{2019}' => {
                if self == Font::Bold { 278.0 } else { 222.0 }
            }
            '\u{201C}' | '\u{201D}' => {
                if self == Font::Bold { 500.0 } else { 333.0 }
            }
            _ => 556.0,
        }
    }

    pub(crate) fn text_width(self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| self.char_width_1000(c) * size / 1000.0)
            .sum()
    }

    /// Greedy word wrap to `max_width`. A word wider than the limit gets its
    /// own line rather than being split mid-word.
    pub(crate) fn wrap(self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let space_w = self.char_width_1000(' ') * size / 1000.0;
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_w = 0.0f32;

        for word in text.split_whitespace() {
            let word_w = self.text_width(word, size);
            if current.is_empty() {
                current.push_str(word);
                current_w = word_w;
            } else if current_w + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_w = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_w += space_w + word_w;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str
/// encoding. Unmappable chars drop.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_words_whole() {
        // "mm" is one of the widest pairs; force a narrow column.
        let lines = Font::Regular.wrap("alpha beta gamma delta", 10.0, 60.0);
        assert!(lines.len() > 1);
        for line in &lines {
            for word in line.split(' ') {
                assert!(["alpha", "beta", "gamma", "delta"].contains(&word));
            }
        }
        assert_eq!(lines.join(" "), "alpha beta gamma delta");
    }

    #[test]
    fn wrap_respects_width_limit() {
        let width = 120.0;
        let lines = Font::Regular.wrap(
            "the quick brown fox jumps over the lazy dog again and again",
            10.0,
            width,
        );
        for line in &lines {
            assert!(Font::Regular.text_width(line, 10.0) <= width + 0.01, "{line}");
        }
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = Font::Regular.wrap("a superlongunbreakabletoken b", 10.0, 40.0);
        assert_eq!(lines, ["a", "superlongunbreakabletoken", "b"]);
    }

    #[test]
    fn empty_text_wraps_to_nothing() {
        assert!(Font::Regular.wrap("   ", 10.0, 100.0).is_empty());
    }

    #[test]
    fn bold_runs_wider_than_regular() {
        let text = "Infrastructure";
        assert!(Font::Bold.text_width(text, 10.0) > Font::Regular.text_width(text, 10.0));
    }

    #[test]
    fn winansi_maps_bullet_and_drops_unmappable() {
        assert_eq!(to_winansi_bytes("\u{2022} ok"), vec![0x95, b' ', b'o', b'k']);
        assert_eq!(to_winansi_bytes("漢"), Vec::<u8>::new());
    }
}
