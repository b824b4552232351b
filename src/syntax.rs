use crate::lang::{DEFINITION_KEYWORDS, KEYWORDS};
use crate::theme::{SyntaxColors, ThemeColor, UiColors};
use ratatui::style::Style;
use ratatui::text::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Comment,
    Str,
    Number,
    Definition,
}

/// A concrete match instance for one line, in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub len: usize,
    pub kind: TokenKind,
}

/// Finds the next match at or after the given character position.
type Matcher = fn(&[char], usize) -> Option<(usize, usize)>;

struct HighlightRule {
    kind: TokenKind,
    find: Matcher,
}

/// Fixed rule table, built once at startup and reused for every line.
/// Registration order is the overlap precedence: keywords < comments <
/// strings < numbers < def/class names. Later rules are painted last and
/// win on overlapping ranges.
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn find_keyword(chars: &[char], from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < chars.len() {
        if is_word(chars[pos]) && (pos == 0 || !is_word(chars[pos - 1])) {
            let start = pos;
            while pos < chars.len() && is_word(chars[pos]) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            if KEYWORDS.contains(&word.as_str()) {
                return Some((start, pos - start));
            }
        } else {
            pos += 1;
        }
    }
    None
}

// Everything from # to end of line, strings notwithstanding. A # inside a
// string produces an overlapping comment span that the later string rule
// paints over.
fn find_comment(chars: &[char], from: usize) -> Option<(usize, usize)> {
    chars[from..]
        .iter()
        .position(|&c| c == '#')
        .map(|i| (from + i, chars.len() - (from + i)))
}

fn find_string(chars: &[char], from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < chars.len() {
        let quote = chars[pos];
        if quote == '"' || quote == '\'' {
            if let Some(close) = chars[pos + 1..].iter().position(|&c| c == quote) {
                return Some((pos, close + 2));
            }
            // Unterminated: no match for this quote, keep scanning
        }
        pos += 1;
    }
    None
}

fn find_number(chars: &[char], from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < chars.len() {
        if chars[pos].is_ascii_digit() && (pos == 0 || !is_word(chars[pos - 1])) {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            // Decimal part only when a digit actually follows the dot
            if pos + 1 < chars.len() && chars[pos] == '.' && chars[pos + 1].is_ascii_digit() {
                pos += 1;
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            if pos < chars.len() && is_word(chars[pos]) {
                continue; // "1x" is not a number literal
            }
            return Some((start, pos - start));
        }
        pos += 1;
    }
    None
}

// `def name` / `class Name` - the span covers the keyword through the
// identifier, mirroring the keyword-then-name coloring of classic naive
// highlighters.
fn find_definition(chars: &[char], from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos < chars.len() {
        if is_word(chars[pos]) && (pos == 0 || !is_word(chars[pos - 1])) {
            let start = pos;
            while pos < chars.len() && is_word(chars[pos]) {
                pos += 1;
            }
            let word: String = chars[start..pos].iter().collect();
            if DEFINITION_KEYWORDS.contains(&word.as_str()) {
                let mut name_start = pos;
                while name_start < chars.len() && chars[name_start].is_whitespace() {
                    name_start += 1;
                }
                if name_start > pos
                    && name_start < chars.len()
                    && (chars[name_start].is_alphabetic() || chars[name_start] == '_')
                {
                    let mut end = name_start;
                    while end < chars.len() && is_word(chars[end]) {
                        end += 1;
                    }
                    return Some((start, end - start));
                }
            }
        } else {
            pos += 1;
        }
    }
    None
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            rules: vec![
                HighlightRule {
                    kind: TokenKind::Keyword,
                    find: find_keyword,
                },
                HighlightRule {
                    kind: TokenKind::Comment,
                    find: find_comment,
                },
                HighlightRule {
                    kind: TokenKind::Str,
                    find: find_string,
                },
                HighlightRule {
                    kind: TokenKind::Number,
                    find: find_number,
                },
                HighlightRule {
                    kind: TokenKind::Definition,
                    find: find_definition,
                },
            ],
        }
    }

    /// All raw spans for one line, every rule matched repeatedly until
    /// exhausted. Spans may overlap; `kind_map` resolves the overlap.
    pub fn spans_for_line(&self, chars: &[char]) -> Vec<HighlightSpan> {
        let mut spans = Vec::new();
        for rule in &self.rules {
            let mut pos = 0;
            while pos < chars.len() {
                match (rule.find)(chars, pos) {
                    Some((start, len)) => {
                        spans.push(HighlightSpan {
                            start,
                            len,
                            kind: rule.kind,
                        });
                        pos = start + len.max(1);
                    }
                    None => break,
                }
            }
        }
        spans
    }

    /// Per-character token kinds after painting spans in rule order.
    fn kind_map(&self, chars: &[char]) -> Vec<Option<TokenKind>> {
        let mut kinds = vec![None; chars.len()];
        for span in self.spans_for_line(chars) {
            for slot in kinds.iter_mut().skip(span.start).take(span.len) {
                *slot = Some(span.kind);
            }
        }
        kinds
    }

    pub fn highlight_line(&self, line: &str, colors: &SyntaxColors) -> Vec<Span<'static>> {
        self.highlight_line_with_search(line, colors, None, None, None)
    }

    /// Highlight one line, optionally layering search-match backgrounds on
    /// top of the syntax colors. `current_match_col` is the character
    /// column of the current match on this line, if any.
    pub fn highlight_line_with_search(
        &self,
        line: &str,
        colors: &SyntaxColors,
        search_query: Option<&str>,
        ui: Option<&UiColors>,
        current_match_col: Option<usize>,
    ) -> Vec<Span<'static>> {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let kinds = self.kind_map(&chars);

        #[derive(Clone, Copy, PartialEq, Eq)]
        enum MatchBg {
            None,
            Found,
            Current,
        }

        let mut backgrounds = vec![MatchBg::None; chars.len()];
        if let Some(query) = search_query.filter(|q| !q.is_empty()) {
            for start in match_positions(&chars, query) {
                let bg = if current_match_col == Some(start) {
                    MatchBg::Current
                } else {
                    MatchBg::Found
                };
                let len = query.chars().count();
                for slot in backgrounds.iter_mut().skip(start).take(len) {
                    *slot = bg;
                }
            }
        }

        // Coalesce equal-styled runs into spans
        let mut result = Vec::new();
        let mut run_start = 0;
        for i in 1..=chars.len() {
            if i == chars.len() || kinds[i] != kinds[run_start] || backgrounds[i] != backgrounds[run_start]
            {
                let text: String = chars[run_start..i].iter().collect();
                let fg = color_for(kinds[run_start], colors);
                let mut style = Style::default().fg(fg.to_color());
                if let Some(ui) = ui {
                    style = match backgrounds[run_start] {
                        MatchBg::Found => style.bg(ui.search_match.to_color()),
                        MatchBg::Current => style.bg(ui.search_match_current.to_color()),
                        MatchBg::None => style,
                    };
                }
                result.push(Span::styled(text, style));
                run_start = i;
            }
        }
        result
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn color_for<'a>(kind: Option<TokenKind>, colors: &'a SyntaxColors) -> &'a ThemeColor {
    match kind {
        Some(TokenKind::Keyword) => &colors.keyword,
        Some(TokenKind::Comment) => &colors.comment,
        Some(TokenKind::Str) => &colors.string,
        Some(TokenKind::Number) => &colors.number,
        Some(TokenKind::Definition) => &colors.definition,
        None => &colors.plain,
    }
}

/// Case-insensitive match start columns of `query` within `chars`.
pub fn match_positions(chars: &[char], query: &str) -> Vec<usize> {
    let query: Vec<char> = query.chars().flat_map(|c| c.to_lowercase()).collect();
    if query.is_empty() || query.len() > chars.len() {
        return Vec::new();
    }
    let lowered: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase()).collect();
    // flat_map can change lengths for exotic case mappings; bail to exact
    // matching in that case rather than mis-index
    if lowered.len() != chars.len() {
        return chars
            .windows(query.len())
            .enumerate()
            .filter(|(_, w)| w.iter().copied().eq(query.iter().copied()))
            .map(|(i, _)| i)
            .collect();
    }
    lowered
        .windows(query.len())
        .enumerate()
        .filter(|(_, w)| w.iter().copied().eq(query.iter().copied()))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn spans_of_kind(spans: &[HighlightSpan], kind: TokenKind) -> Vec<(usize, usize)> {
        spans
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| (s.start, s.len))
            .collect()
    }

    #[test]
    fn keyword_per_occurrence() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("for i in items"));
        assert_eq!(
            spans_of_kind(&spans, TokenKind::Keyword),
            vec![(0, 3), (6, 2)]
        );
    }

    #[test]
    fn keyword_not_matched_inside_identifier() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("definition iffy for_x"));
        assert!(spans_of_kind(&spans, TokenKind::Keyword).is_empty());
    }

    #[test]
    fn string_then_comment_non_overlapping() {
        let hl = Highlighter::new();
        let line = chars("\"hi\" # note");
        let spans = hl.spans_for_line(&line);
        assert_eq!(spans_of_kind(&spans, TokenKind::Str), vec![(0, 4)]);
        assert_eq!(spans_of_kind(&spans, TokenKind::Comment), vec![(5, 6)]);

        // And the painted map agrees with both attributions
        let kinds = hl.kind_map(&line);
        assert_eq!(kinds[0], Some(TokenKind::Str));
        assert_eq!(kinds[3], Some(TokenKind::Str));
        assert_eq!(kinds[5], Some(TokenKind::Comment));
        assert_eq!(kinds[10], Some(TokenKind::Comment));
        assert_eq!(kinds[4], None);
    }

    #[test]
    fn hash_inside_string_painted_as_string() {
        let hl = Highlighter::new();
        let line = chars("x = \"a#b\"");
        let kinds = hl.kind_map(&line);
        // The comment rule matches from the #, but the later string rule
        // repaints the whole literal
        assert_eq!(kinds[6], Some(TokenKind::Str));
        assert_eq!(kinds[4], Some(TokenKind::Str));
        assert_eq!(kinds[8], Some(TokenKind::Str));
    }

    #[test]
    fn numbers_integer_and_decimal() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("x = 12 + 3.25"));
        assert_eq!(
            spans_of_kind(&spans, TokenKind::Number),
            vec![(4, 2), (9, 4)]
        );
    }

    #[test]
    fn number_not_matched_inside_identifier() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("abc1 x2y 1x"));
        assert!(spans_of_kind(&spans, TokenKind::Number).is_empty());
    }

    #[test]
    fn definition_covers_keyword_and_name() {
        let hl = Highlighter::new();
        let line = chars("def foo(bar):");
        let spans = hl.spans_for_line(&line);
        assert_eq!(spans_of_kind(&spans, TokenKind::Definition), vec![(0, 7)]);

        // Definition is registered last, so it wins over the keyword span
        let kinds = hl.kind_map(&line);
        assert_eq!(kinds[0], Some(TokenKind::Definition));
        assert_eq!(kinds[6], Some(TokenKind::Definition));
        assert_eq!(kinds[8], None);
    }

    #[test]
    fn class_definition_matched() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("class Editor:"));
        assert_eq!(
            spans_of_kind(&spans, TokenKind::Definition),
            vec![(0, 12)]
        );
    }

    #[test]
    fn bare_def_without_name_is_only_a_keyword() {
        let hl = Highlighter::new();
        let line = chars("def ");
        let spans = hl.spans_for_line(&line);
        assert!(spans_of_kind(&spans, TokenKind::Definition).is_empty());
        assert_eq!(spans_of_kind(&spans, TokenKind::Keyword), vec![(0, 3)]);
    }

    #[test]
    fn unterminated_string_not_matched() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("x = \"oops"));
        assert!(spans_of_kind(&spans, TokenKind::Str).is_empty());
    }

    #[test]
    fn both_quote_styles_matched() {
        let hl = Highlighter::new();
        let spans = hl.spans_for_line(&chars("'a' \"b\""));
        assert_eq!(
            spans_of_kind(&spans, TokenKind::Str),
            vec![(0, 3), (4, 3)]
        );
    }

    #[test]
    fn empty_line_yields_no_spans() {
        let hl = Highlighter::new();
        assert!(hl.spans_for_line(&chars("")).is_empty());
        assert!(hl
            .highlight_line("", &crate::theme::Theme::dark().syntax)
            .is_empty());
    }

    #[test]
    fn highlighted_spans_reassemble_the_line() {
        let hl = Highlighter::new();
        let theme = crate::theme::Theme::dark();
        let line = "if x == 1:  # check";
        let rebuilt: String = hl
            .highlight_line(line, &theme.syntax)
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(rebuilt, line);
    }

    #[test]
    fn search_positions_case_insensitive() {
        assert_eq!(match_positions(&chars("Foo foo FOO"), "foo"), vec![0, 4, 8]);
        assert!(match_positions(&chars("abc"), "").is_empty());
    }
}
