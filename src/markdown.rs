//! Course Description Markdown
//!
//! Trainers write course descriptions in Markdown. Rendering goes through
//! pulldown-cmark with raw HTML stripped, since descriptions are
//! user-authored and end up in `inner_html`.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Full description for the course detail page
pub fn render_description(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

// State for the event transformer
enum State {
    Normal,
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                // Raw HTML is shown as text, never injected
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                Event::Start(Tag::Image { dest_url, .. }) => {
                    if is_safe_url(&dest_url) {
                        let html = format!(
                            r#"<img class="course-image" src="{}" style="max-width: 100%; max-height: 360px; border-radius: 4px;" />"#,
                            escape_html(&dest_url)
                        );
                        events.push(Event::Html(CowStr::from(html)));
                    }
                    // alt text events are dropped
                    state = State::InImage { depth: 0 };
                }

                Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                    let dest_url = if is_safe_url(&dest_url) { dest_url } else { CowStr::from("#") };
                    events.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
                }

                other => events.push(other),
            },

            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(TagEnd::Image) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth = depth.saturating_sub(1),
                _ => {}
            },
        }
    }

    events
}

fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    !(lower.starts_with("javascript:") || lower.starts_with("data:") || lower.starts_with("vbscript:"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Plain-text preview for catalog cards, cut on a word boundary
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, get_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => plain.push_str(&t),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => plain.push(' '),
            _ => {}
        }
    }
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");

    if plain.chars().count() <= max_chars {
        return plain;
    }
    let cut: String = plain.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let html = render_description("**Strong** start\n\n- squats\n- lunges");
        assert!(html.contains("<strong>Strong</strong>"));
        assert!(html.contains("<li>squats</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_description("Hi <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unsafe_links_and_images_neutralized() {
        let html = render_description("[click](javascript:alert(1)) ![x](javascript:bad)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_image_alt_text_dropped() {
        let html = render_description("![a *fancy* squat](https://cdn.example.com/squat.png)");
        assert!(html.contains(r#"src="https://cdn.example.com/squat.png""#));
        assert!(!html.contains("fancy"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("# Title\n\nShort *text*.", 100), "Title Short text.");
        assert_eq!(excerpt("one two three four", 9), "one two…");
    }
}
