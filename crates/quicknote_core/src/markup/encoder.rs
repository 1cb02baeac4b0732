use super::StyledRun;

/// Encodes runs into stored markup, in order.
///
/// Bold wraps first and italic wraps the result, so a bold+italic run becomes
/// `<i><b>text</b></i>`. `&`, `<` and `>` in run text are escaped; newlines
/// stay literal. Empty runs produce nothing.
pub fn encode(runs: &[StyledRun]) -> String {
    let mut markup = String::new();
    for run in runs.iter().filter(|run| !run.text.is_empty()) {
        let mut text = escape_text(&run.text);
        if run.bold {
            text = format!("<b>{text}</b>");
        }
        if run.italic {
            text = format!("<i>{text}</i>");
        }
        markup.push_str(&text);
    }
    markup
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
