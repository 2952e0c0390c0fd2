//! Turning a [`ViewState`] into something a host can show.
//!
//! `Ready` markup is wrapped in a standalone HTML document that carries the
//! embedded-browser settings: a `<base>` element for relative references, a
//! viewport hint for the content mode, and a Content-Security-Policy built
//! from the origin whitelist and the script flag.

use anyhow::Result;
use refwidget_config::{ContentMode, RenderConfig};

use crate::state::ViewState;

/// Embedded browser settings for the `Ready` state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    pub base_url: String,
    pub origin_whitelist: Vec<String>,
    pub javascript_enabled: bool,
    pub content_mode: ContentMode,
}

impl EmbedOptions {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            origin_whitelist: config.origin_whitelist.clone(),
            javascript_enabled: config.javascript_enabled,
            content_mode: config.content_mode,
        }
    }

    fn viewport(&self) -> &'static str {
        match self.content_mode {
            ContentMode::Mobile => "width=device-width, initial-scale=1",
            ContentMode::Desktop => "width=1024",
        }
    }

    fn content_security_policy(&self) -> String {
        let origins = self.origin_whitelist.join(" ");
        let scripts = if self.javascript_enabled {
            format!("script-src {origins} 'unsafe-inline' 'unsafe-eval'")
        } else {
            "script-src 'none'".to_string()
        };
        format!("default-src {origins} data: blob: 'unsafe-inline'; {scripts}")
    }
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

/// What a surface should display for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Neutral blocking indicator, nothing else.
    Indicator,
    /// Plain-text message.
    Message(String),
    /// Complete HTML document embedding the widget.
    Document(String),
}

impl Frame {
    pub fn for_state(state: &ViewState, options: &EmbedOptions) -> Self {
        match state {
            ViewState::Loading => Self::Indicator,
            ViewState::Error(message) => Self::Message(message.clone()),
            ViewState::Ready(html) => Self::Document(render_document(options, html)),
        }
    }
}

/// Wrap the widget fragment in a document configured by `options`.
///
/// The fragment is inserted verbatim; it is trusted markup from the referral
/// service and runs inside the policy set by the document head.
pub fn render_document(options: &EmbedOptions, html: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"{viewport}\">\n",
            "<meta http-equiv=\"Content-Security-Policy\" content=\"{csp}\">\n",
            "<base href=\"{base}\">\n",
            "</head>\n",
            "<body>\n",
            "{html}\n",
            "</body>\n",
            "</html>\n"
        ),
        viewport = options.viewport(),
        csp = escape_html(&options.content_security_policy()),
        base = escape_html(&options.base_url),
        html = html,
    )
}

/// Escape text for use in HTML content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// A place the screen's state is displayed.
pub trait RenderSurface {
    fn render(&mut self, state: &ViewState) -> Result<()>;
}

/// Surface that keeps every frame in memory. Useful for hosts that hand the
/// document to their own web view, and for tests.
#[derive(Debug, Default)]
pub struct DocumentSurface {
    options: EmbedOptions,
    frames: Vec<Frame>,
}

impl DocumentSurface {
    pub fn new(options: EmbedOptions) -> Self {
        Self {
            options,
            frames: Vec::new(),
        }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl RenderSurface for DocumentSurface {
    fn render(&mut self, state: &ViewState) -> Result<()> {
        self.frames.push(Frame::for_state(state, &self.options));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_embeds_fragment_with_base_and_policy() {
        let doc = render_document(&EmbedOptions::default(), "<div>hi</div>");
        assert_eq!(
            doc,
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <meta http-equiv=\"Content-Security-Policy\" content=\"default-src * data: blob: &#39;unsafe-inline&#39;; script-src * &#39;unsafe-inline&#39; &#39;unsafe-eval&#39;\">\n\
             <base href=\"https://ssqt.co\">\n</head>\n<body>\n<div>hi</div>\n</body>\n</html>\n"
        );
    }

    #[test]
    fn disabled_scripts_and_desktop_mode_change_head() {
        let options = EmbedOptions {
            javascript_enabled: false,
            content_mode: ContentMode::Desktop,
            origin_whitelist: vec!["https://ssqt.co".into(), "https://fonts.example".into()],
            ..EmbedOptions::default()
        };
        let doc = render_document(&options, "<p>x</p>");
        assert!(doc.contains("content=\"width=1024\""));
        assert!(doc.contains("script-src &#39;none&#39;"));
        assert!(doc.contains("default-src https://ssqt.co https://fonts.example data:"));
    }

    #[test]
    fn frames_follow_state() {
        let options = EmbedOptions::default();
        assert_eq!(Frame::for_state(&ViewState::Loading, &options), Frame::Indicator);
        assert_eq!(
            Frame::for_state(&ViewState::Error("Failed".into()), &options),
            Frame::Message("Failed".into())
        );
        match Frame::for_state(&ViewState::Ready("<b>w</b>".into()), &options) {
            Frame::Document(doc) => assert!(doc.contains("<body>\n<b>w</b>\n</body>")),
            other => panic!("expected document, got {other:?}"),
        }
    }

    #[test]
    fn document_surface_records_frames() {
        let mut surface = DocumentSurface::default();
        surface.render(&ViewState::Loading).unwrap();
        surface.render(&ViewState::Error("nope".into())).unwrap();
        assert_eq!(surface.frames().len(), 2);
        assert_eq!(surface.last(), Some(&Frame::Message("nope".into())));
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
