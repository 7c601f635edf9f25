//! Static font-metric tables for the two builtin report faces.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard Helvetica AFM tables (width / 1000). Builtin PDF fonts carry no
//! embedded metrics we can query at runtime, so the renderer wraps and
//! paginates from these tables instead.
//! Both tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// The two faces available in the report: Helvetica for body text,
/// Helvetica-Bold for the title, headings, and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

/// Layout parameters for a report page (A4 portrait).
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub title_size_pt: f32,
    pub heading_size_pt: f32,
    pub body_size_pt: f32,
    /// Baseline-to-baseline distance as a multiple of font size.
    pub line_spacing: f32,
}

impl PageConfig {
    pub fn a4() -> Self {
        PageConfig {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
            title_size_pt: 18.0,
            heading_size_pt: 13.0,
            body_size_pt: 11.0,
            line_spacing: 1.4,
        }
    }

    /// Usable text width in points.
    pub fn text_width_pt(&self) -> f32 {
        (self.width_mm - 2.0 * self.margin_mm) * PT_PER_MM
    }

    /// Usable text width in em units at the given font size.
    pub fn text_width_em(&self, font_size_pt: f32) -> f32 {
        self.text_width_pt() / font_size_pt
    }

    /// Baseline advance in millimeters for the given font size.
    pub fn line_height_mm(&self, font_size_pt: f32) -> f32 {
        font_size_pt * self.line_spacing / PT_PER_MM
    }
}

/// Static character-width table for one face.
///
/// `widths[i]` = width of ASCII character `(i + 32)` in em units, covering
/// 0x20 (space) through 0x7E (~). Non-ASCII characters fall back to
/// `average_char_width`.
pub struct FontMetricTable {
    widths: [f32; 95],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in millimeters at a font size.
    pub fn measure_mm(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt / PT_PER_MM
    }

    /// Greedy word-wraps `s` to lines no wider than `max_width_em`.
    ///
    /// A single word wider than the limit gets a line of its own rather than
    /// being split mid-word.
    pub fn wrap_words(&self, s: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in s.split_whitespace() {
            let word_width = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + self.space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica (body text).
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.53,
    space_width: 0.278,
};

/// Helvetica-Bold (title, headings, labels).
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.56,
    space_width: 0.278,
};

/// Returns the static metric table for a face.
pub fn metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA_TABLE,
        FontFace::Bold => &HELVETICA_BOLD_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(metrics(FontFace::Regular).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let width = metrics(FontFace::Regular).measure_str(" ");
        assert!((width - 0.278).abs() < 1e-4, "space should be 0.278 em, got {width}");
    }

    #[test]
    fn test_measure_str_known_word() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics(FontFace::Regular).measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "Rust should be 2.056 em, got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let table = metrics(FontFace::Regular);
        let width = table.measure_str("é");
        assert!((width - table.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_face_is_wider() {
        let text = "Interview Evaluation";
        assert!(
            metrics(FontFace::Bold).measure_str(text) > metrics(FontFace::Regular).measure_str(text)
        );
    }

    #[test]
    fn test_wrap_words_respects_width() {
        let table = metrics(FontFace::Regular);
        let config = PageConfig::a4();
        let max = config.text_width_em(config.body_size_pt);
        let text = "The candidate demonstrated a thorough understanding of ownership, \
                    borrowing, and lifetimes, and reasoned clearly about concurrency \
                    trade-offs under interviewer pressure throughout the session.";
        let lines = table.wrap_words(text, max);
        assert!(lines.len() > 1, "long text should wrap");
        for line in &lines {
            assert!(
                table.measure_str(line) <= max,
                "wrapped line exceeds width: {line}"
            );
        }
    }

    #[test]
    fn test_wrap_words_preserves_all_words() {
        let table = metrics(FontFace::Regular);
        let text = "one two three four five six seven eight nine ten";
        let lines = table.wrap_words(text, 3.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_words_empty_input_yields_no_lines() {
        let table = metrics(FontFace::Regular);
        assert!(table.wrap_words("   ", 10.0).is_empty());
    }

    #[test]
    fn test_oversized_word_gets_own_line() {
        let table = metrics(FontFace::Regular);
        let lines = table.wrap_words("a incomprehensibilities b", 2.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "incomprehensibilities");
    }

    #[test]
    fn test_page_config_a4_sanity() {
        let config = PageConfig::a4();
        // 170 mm of usable width is about 482 pt, about 43.8 em at 11 pt
        let em = config.text_width_em(config.body_size_pt);
        assert!(em > 40.0 && em < 50.0, "unexpected text width: {em} em");
        assert!(config.line_height_mm(11.0) > 5.0);
    }
}
