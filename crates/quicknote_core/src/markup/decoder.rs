use super::{StyledRun, StyledText};
use log::warn;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<![^>]*>|<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)[^>]*>")
        .expect("valid tag regex")
});
static ENTITY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]+);").expect("valid entity regex")
});

/// Markup that could not be turned into styled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The byte input is not valid UTF-8.
    InvalidEncoding,
    /// A tag opens at `offset` but is never closed with `>`.
    UnterminatedTag { offset: usize },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEncoding => write!(f, "markup is not valid UTF-8"),
            Self::UnterminatedTag { offset } => {
                write!(f, "unterminated tag at byte offset {offset}")
            }
        }
    }
}

impl Error for DecodeError {}

/// Decodes stored markup for display.
///
/// Returns `None` instead of an error when the markup is malformed.
pub fn decode(markup: &str) -> Option<StyledText> {
    match try_decode(markup) {
        Ok(text) => Some(text),
        Err(err) => {
            warn!("event=markup_decode module=markup status=error error={err}");
            None
        }
    }
}

/// Decodes raw bytes, treating a failed UTF-8 conversion as absent text.
pub fn decode_bytes(bytes: &[u8]) -> Option<StyledText> {
    match std::str::from_utf8(bytes) {
        Ok(markup) => decode(markup),
        Err(_) => {
            warn!(
                "event=markup_decode module=markup status=error error={}",
                DecodeError::InvalidEncoding
            );
            None
        }
    }
}

/// Decodes markup as an HTML fragment.
///
/// Newlines are treated as `<br>`. `<html>`/`<body>` wrappers are optional.
/// Unknown tags are dropped and their text kept; `<head>`, `<style>` and
/// `<script>` contents are skipped entirely.
pub fn try_decode(markup: &str) -> Result<StyledText, DecodeError> {
    let html = markup.replace('\n', "<br>");
    let mut decoder = FragmentDecoder::default();
    let mut cursor = 0;

    for caps in TAG_RE.captures_iter(&html) {
        let Some(tag) = caps.get(0) else {
            continue;
        };
        decoder.text(&html[cursor..tag.start()], cursor)?;
        decoder.tag(&caps);
        cursor = tag.end();
    }
    decoder.text(&html[cursor..], cursor)?;

    Ok(decoder.finish())
}

#[derive(Default)]
struct FragmentDecoder {
    output: StyledText,
    bold_depth: usize,
    italic_depth: usize,
    skip_depth: usize,
}

impl FragmentDecoder {
    fn text(&mut self, segment: &str, base_offset: usize) -> Result<(), DecodeError> {
        if let Some(offset) = find_unterminated_tag(segment) {
            return Err(DecodeError::UnterminatedTag {
                offset: base_offset + offset,
            });
        }
        if self.skip_depth > 0 || segment.is_empty() {
            return Ok(());
        }
        self.emit(unescape_entities(segment));
        Ok(())
    }

    fn tag(&mut self, caps: &Captures<'_>) {
        let Some(name) = caps.get(2) else {
            // comment or doctype
            return;
        };
        let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        let name = name.as_str().to_ascii_lowercase();

        match name.as_str() {
            "head" | "style" | "script" => {
                self.skip_depth = depth_step(self.skip_depth, closing);
            }
            _ if self.skip_depth > 0 => {}
            "b" | "strong" => self.bold_depth = depth_step(self.bold_depth, closing),
            "i" | "em" => self.italic_depth = depth_step(self.italic_depth, closing),
            "br" => self.emit("\n".to_string()),
            "p" if !closing => self.break_paragraph(),
            _ => {}
        }
    }

    fn break_paragraph(&mut self) {
        let text = self.output.plain_text();
        if !text.is_empty() && !text.ends_with('\n') {
            self.emit("\n".to_string());
        }
    }

    fn emit(&mut self, text: String) {
        self.output
            .push(StyledRun::new(text, self.bold_depth > 0, self.italic_depth > 0));
    }

    fn finish(self) -> StyledText {
        self.output
    }
}

fn depth_step(depth: usize, closing: bool) -> usize {
    if closing {
        depth.saturating_sub(1)
    } else {
        depth + 1
    }
}

/// Finds a `<` that starts a tag but is not matched by the tag pattern,
/// which only happens when no `>` follows it.
fn find_unterminated_tag(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    bytes.iter().enumerate().find_map(|(idx, byte)| {
        if *byte != b'<' {
            return None;
        }
        let next = bytes.get(idx + 1).copied();
        let after = bytes.get(idx + 2).copied();
        let opens_tag = match next {
            Some(b'!') => true,
            Some(b'/') => after.is_some_and(|c| c.is_ascii_alphabetic()),
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        };
        opens_tag.then_some(idx)
    })
}

fn unescape_entities(segment: &str) -> String {
    ENTITY_RE
        .replace_all(segment, |caps: &Captures<'_>| {
            let entity = &caps[1];
            resolve_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn resolve_entity(entity: &str) -> Option<String> {
    if let Some(code) = entity.strip_prefix('#') {
        let value = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => code.parse::<u32>().ok()?,
        };
        return char::from_u32(value).map(String::from);
    }

    let resolved = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        _ => return None,
    };
    Some(resolved.to_string())
}

#[cfg(test)]
mod tests {
    use super::{decode, decode_bytes, try_decode, DecodeError};
    use crate::markup::{encode, StyledRun};

    #[test]
    fn decodes_bold_and_italic_spans() {
        let text = decode("Buy <b>milk</b> and <i>eggs</i>").unwrap();
        assert_eq!(
            text.runs(),
            &[
                StyledRun::plain("Buy "),
                StyledRun::bold("milk"),
                StyledRun::plain(" and "),
                StyledRun::italic("eggs"),
            ]
        );
    }

    #[test]
    fn newlines_become_line_breaks() {
        let text = decode("Milk\nEggs").unwrap();
        assert_eq!(text.plain_text(), "Milk\nEggs");
    }

    #[test]
    fn tolerates_html_and_body_wrappers() {
        let wrapped =
            decode("<html><head><style>b {}</style></head><body><b>hi</b></body></html>").unwrap();
        let bare = decode("<b>hi</b>").unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn nested_bold_italic_decodes_to_one_run() {
        let text = decode("<i><b>both</b></i>").unwrap();
        assert_eq!(text.runs(), &[StyledRun::new("both", true, true)]);
    }

    #[test]
    fn resolves_entities_and_keeps_unknown_ones() {
        let text = decode("a &lt;b&gt; &amp; &#65;&#x42; &bogus;").unwrap();
        assert_eq!(text.plain_text(), "a <b> & AB &bogus;");
    }

    #[test]
    fn paragraphs_start_on_new_lines() {
        let text = decode("<p>one</p><p>two</p>").unwrap();
        assert_eq!(text.plain_text(), "one\ntwo");
    }

    #[test]
    fn unterminated_tag_is_reported_and_swallowed() {
        let err = try_decode("fine <b").unwrap_err();
        assert_eq!(err, DecodeError::UnterminatedTag { offset: 5 });
        assert!(decode("fine <b").is_none());
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let text = decode("1 < 2").unwrap();
        assert_eq!(text.plain_text(), "1 < 2");
    }

    #[test]
    fn invalid_utf8_bytes_decode_to_none() {
        assert!(decode_bytes(&[0x66, 0xff, 0xfe]).is_none());
        assert_eq!(
            decode_bytes("<b>ok</b>".as_bytes()).map(|text| text.plain_text()),
            Some("ok".to_string())
        );
    }

    #[test]
    fn round_trip_preserves_plain_text() {
        let cases: Vec<Vec<StyledRun>> = vec![
            vec![],
            vec![StyledRun::plain("just text")],
            vec![
                StyledRun::bold("Title"),
                StyledRun::plain("\n○ milk & <eggs>\n"),
                StyledRun::italic("later"),
                StyledRun::new(" both ", true, true),
            ],
            vec![StyledRun::plain("a &amp; b"), StyledRun::bold("<br>")],
        ];

        for runs in cases {
            let expected: String = runs.iter().map(|run| run.text.as_str()).collect();
            let decoded = decode(&encode(&runs)).unwrap();
            assert_eq!(decoded.plain_text(), expected);
        }
    }
}
