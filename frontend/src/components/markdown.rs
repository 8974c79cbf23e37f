use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MarkdownProps {
    pub content: String,
}

/// Renders model output as markdown.
///
/// Raw HTML in the text is turned back into plain text before rendering, and
/// links or images pointing anywhere but http(s)/mailto keep only their text,
/// so nothing the model writes is ever injected as markup or script.
#[function_component(Markdown)]
pub fn markdown(props: &MarkdownProps) -> Html {
    Html::from_html_unchecked(AttrValue::from(render_markdown(&props.content)))
}

fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_SMART_PUNCTUATION);

    // One entry per open link/image: whether its start tag was dropped.
    let mut dropped = Vec::new();
    let events = Parser::new_ext(markdown, options).filter_map(move |event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. } | Tag::Image { ref dest_url, .. }) => {
            let safe = is_safe_url(dest_url);
            dropped.push(!safe);
            safe.then_some(event)
        }
        Event::End(TagEnd::Link | TagEnd::Image) => {
            let was_dropped = dropped.pop().unwrap_or(false);
            (!was_dropped).then_some(event)
        }
        other => Some(other),
    });

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, events);
    // Wrapped in one element so yew gets a single root node.
    format!("<div class=\"markdown\">{rendered}</div>")
}

/// Relative URLs and the http, https and mailto schemes are allowed.
fn is_safe_url(url: &str) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let url: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    let Some((scheme, _)) = url.split_once(':') else {
        return true;
    };
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    matches!(
        scheme.to_ascii_lowercase().as_str(),
        "http" | "https" | "mailto"
    )
}
