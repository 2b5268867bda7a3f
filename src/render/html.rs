//! HTML rendering for rich-text documents.

use std::fmt::Write;

use crate::error::Result;
use crate::model::{
    Document, ElementAttrs, ElementFormat, Heading, ImageNode, NodeRef, Step, TextFormat,
    TextNode, WalkControl,
};

use super::images::extract_image_names;
use super::rewrite::rewrite_upload_urls;
use super::visitor::{DocumentVisitor, VisitorAction};
use super::{RenderOptions, RenderResult, RenderStats};

/// Pixels of inline-start padding per indent level.
const INDENT_PX: u32 = 40;

/// Render a document to HTML with default options.
pub fn render(doc: &Document) -> String {
    HtmlRenderer::new(RenderOptions::default()).render_internal(doc)
}

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to HTML with image references and statistics.
pub fn to_html_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = HtmlRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    stats: RenderStats,
    visitor: Option<Box<dyn DocumentVisitor>>,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
            visitor: None,
        }
    }

    /// Customize rendering with a visitor.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitor = Some(Box::new(visitor));
        self
    }

    /// Render a document to HTML.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document to HTML with image references and statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let html = self.render_internal(doc);

        // Word counts come from the source text, not the markup
        self.stats.count_text(&doc.plain_text());

        Ok(RenderResult::new(html, extract_image_names(doc), self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let mut output = String::new();

        if let Some(visitor) = self.visitor.as_mut() {
            visitor.on_document_start();
        }

        if doc.is_empty() {
            if let Some(ref placeholder) = self.options.empty_placeholder {
                output.push_str(placeholder);
            }
        } else {
            doc.walk(&mut |step| match step {
                Step::Enter(node) => self.enter(&mut output, node),
                Step::Leave(node) => {
                    self.leave(&mut output, node);
                    WalkControl::Continue
                }
            });
        }

        if let Some(visitor) = self.visitor.as_mut() {
            visitor.on_document_end();
        }

        if let Some(ref base) = self.options.asset_base_url {
            output = rewrite_upload_urls(&output, &self.options.upload_prefix, base);
        }

        if self.options.collect_stats {
            log::debug!(
                "rendered {} headings, {} paragraphs, {} images",
                self.stats.heading_count,
                self.stats.paragraph_count,
                self.stats.image_count
            );
        }

        output
    }

    fn enter(&mut self, output: &mut String, node: NodeRef<'_>) -> WalkControl {
        match node {
            NodeRef::Root(_) => WalkControl::Continue,
            NodeRef::Heading(heading) => {
                let action = self.ask(|v| v.visit_heading(heading));
                if self.customize(output, action) {
                    return WalkControl::SkipChildren;
                }
                self.stats.add_heading();
                let _ = write!(
                    output,
                    "<h{}{}>",
                    self.heading_level(heading),
                    block_attrs(heading.attrs())
                );
                WalkControl::Continue
            }
            NodeRef::Paragraph(para) => {
                let action = self.ask(|v| v.visit_paragraph(para));
                if self.customize(output, action) {
                    return WalkControl::SkipChildren;
                }
                self.stats.add_paragraph();
                let attrs = block_attrs(para.attrs());
                if para.children().is_empty() {
                    let _ = write!(output, "<p{}><br></p>", attrs);
                    return WalkControl::SkipChildren;
                }
                let _ = write!(output, "<p{}>", attrs);
                WalkControl::Continue
            }
            NodeRef::Text(text) => {
                let action = self.ask(|v| v.visit_text(text));
                if !self.customize(output, action) {
                    self.stats.add_text_run();
                    render_text(output, text);
                }
                WalkControl::SkipChildren
            }
            NodeRef::Image(image) => {
                let action = self.ask(|v| v.visit_image(image));
                if !self.customize(output, action) {
                    self.stats.add_image();
                    self.render_image(output, image);
                }
                WalkControl::SkipChildren
            }
        }
    }

    fn leave(&mut self, output: &mut String, node: NodeRef<'_>) {
        match node {
            NodeRef::Heading(heading) => {
                let _ = write!(output, "</h{}>", self.heading_level(heading));
            }
            NodeRef::Paragraph(_) => output.push_str("</p>"),
            _ => {}
        }
    }

    fn ask(&mut self, f: impl FnOnce(&mut dyn DocumentVisitor) -> VisitorAction) -> VisitorAction {
        match self.visitor.as_deref_mut() {
            Some(visitor) => f(visitor),
            None => VisitorAction::Continue,
        }
    }

    /// Applies a visitor action. Returns true when default rendering is bypassed.
    fn customize(&mut self, output: &mut String, action: VisitorAction) -> bool {
        match action {
            VisitorAction::Continue => false,
            VisitorAction::Skip => {
                self.stats.add_customized();
                true
            }
            VisitorAction::Replace(html) => {
                self.stats.add_customized();
                output.push_str(&html);
                true
            }
        }
    }

    fn heading_level(&self, heading: &Heading) -> u8 {
        heading.level().get().min(self.options.max_heading_level.max(1))
    }

    fn render_image(&self, output: &mut String, image: &ImageNode) {
        let _ = write!(
            output,
            "<img src=\"{}\" alt=\"{}\"",
            escape_html(image.src()),
            escape_html(image.alt_text())
        );
        let class = self.options.image_classes.class_for(image.alignment());
        if !class.is_empty() {
            let _ = write!(output, " class=\"{}\"", escape_html(&class));
        }
        if self.options.cross_origin {
            output.push_str(" crossorigin=\"anonymous\"");
        }
        output.push('>');
    }
}

/// `dir` and `style` attributes for a block, with a leading space when non-empty.
fn block_attrs(attrs: ElementAttrs) -> String {
    let mut out = String::new();
    if let Some(direction) = attrs.direction {
        let _ = write!(out, " dir=\"{}\"", direction.as_str());
    }

    let mut style = Vec::new();
    if attrs.format != ElementFormat::Unset {
        style.push(format!("text-align: {};", attrs.format.as_str()));
    }
    if attrs.indent > 0 {
        style.push(format!(
            "padding-inline-start: {}px;",
            attrs.indent.saturating_mul(INDENT_PX)
        ));
    }
    if !style.is_empty() {
        let _ = write!(out, " style=\"{}\"", style.join(" "));
    }
    out
}

fn render_text(output: &mut String, text: &TextNode) {
    let format = text.format();
    let mut html = escape_html(text.text());

    // Innermost first
    const WRAPPERS: [(TextFormat, &str); 8] = [
        (TextFormat::ITALIC, "em"),
        (TextFormat::CODE, "code"),
        (TextFormat::SUBSCRIPT, "sub"),
        (TextFormat::SUPERSCRIPT, "sup"),
        (TextFormat::STRIKETHROUGH, "s"),
        (TextFormat::UNDERLINE, "u"),
        (TextFormat::HIGHLIGHT, "mark"),
        (TextFormat::BOLD, "strong"),
    ];
    for (flag, tag) in WRAPPERS {
        if format.contains(flag) {
            html = format!("<{tag}>{html}</{tag}>");
        }
    }

    if !text.style().is_empty() {
        html = format!("<span style=\"{}\">{}</span>", escape_html(text.style()), html);
    }

    output.push_str(&html);
}

/// Escape text for HTML content and attribute values.
pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Alignment, Direction, HeadingLevel, Node, Paragraph,
    };
    use crate::render::visitor::SkipImagesVisitor;

    fn doc(blocks: Vec<Node>) -> Document {
        Document::from_blocks(blocks).unwrap()
    }

    #[test]
    fn test_render_heading() {
        let d = doc(vec![Heading::with_text(HeadingLevel::H1, "Hi").into()]);
        assert_eq!(render(&d), "<h1>Hi</h1>");
    }

    #[test]
    fn test_render_empty_paragraph() {
        let d = doc(vec![Paragraph::empty().into()]);
        assert_eq!(render(&d), "<p><br></p>");
    }

    #[test]
    fn test_render_empty_document() {
        assert_eq!(render(&Document::new()), "");

        let options = RenderOptions::new().with_empty_placeholder("<p>Nothing yet</p>");
        assert_eq!(
            to_html(&Document::new(), &options).unwrap(),
            "<p>Nothing yet</p>"
        );
    }

    #[test]
    fn test_render_text_formats() {
        let text = TextNode::new(
            "x",
            TextFormat::BOLD | TextFormat::ITALIC | TextFormat::UNDERLINE,
            "color: red",
        );
        let mut out = String::new();
        render_text(&mut out, &text);
        assert_eq!(
            out,
            "<span style=\"color: red\"><strong><u><em>x</em></u></strong></span>"
        );
    }

    #[test]
    fn test_render_escapes_text() {
        let d = doc(vec![Paragraph::with_text("a < b & \"c\"").into()]);
        assert_eq!(render(&d), "<p>a &lt; b &amp; &quot;c&quot;</p>");
    }

    #[test]
    fn test_render_block_attrs() {
        let attrs = ElementAttrs {
            direction: Some(Direction::Rtl),
            format: ElementFormat::Center,
            indent: 2,
        };
        let d = doc(vec![Paragraph::with_text("x").with_attrs(attrs).into()]);
        assert_eq!(
            render(&d),
            "<p dir=\"rtl\" style=\"text-align: center; padding-inline-start: 80px;\">x</p>"
        );
    }

    #[test]
    fn test_render_image() {
        let heading = Heading::new(
            HeadingLevel::H2,
            [Node::from(ImageNode::new(
                "/upload/blog/a.png",
                "A cat",
                Alignment::Left,
            ))],
        )
        .unwrap();
        let d = doc(vec![heading.into()]);

        assert_eq!(
            render(&d),
            "<h2><img src=\"/upload/blog/a.png\" alt=\"A cat\" \
             class=\"my-4 max-w-full rounded float-left\" crossorigin=\"anonymous\"></h2>"
        );

        let options = RenderOptions::new()
            .with_asset_base_url("https://api.example.com/")
            .with_cross_origin(false);
        let html = to_html(&d, &options).unwrap();
        assert!(html.contains("src=\"https://api.example.com/upload/blog/a.png\""));
        assert!(!html.contains("crossorigin"));
    }

    #[test]
    fn test_render_max_heading() {
        let d = doc(vec![Heading::with_text(HeadingLevel::clamped(5), "Deep").into()]);
        let options = RenderOptions::new().with_max_heading(3);
        assert_eq!(to_html(&d, &options).unwrap(), "<h3>Deep</h3>");
    }

    #[test]
    fn test_render_with_visitor() {
        let heading = Heading::new(
            HeadingLevel::H1,
            [
                Node::from(TextNode::plain("Title")),
                ImageNode::new("a.png", "", Alignment::Center).into(),
            ],
        )
        .unwrap();
        let d = doc(vec![heading.into()]);

        let result = HtmlRenderer::new(RenderOptions::default())
            .with_visitor(SkipImagesVisitor)
            .render_with_stats(&d)
            .unwrap();

        assert_eq!(result.html, "<h1>Title</h1>");
        assert_eq!(result.image_names, vec!["a.png"]);
        assert_eq!(result.stats.customized_count, 1);
        assert_eq!(result.stats.image_count, 0);
    }

    #[test]
    fn test_render_with_stats() {
        let d = doc(vec![
            Heading::with_text(HeadingLevel::H1, "Hello world").into(),
            Paragraph::with_text("one two three").into(),
        ]);
        let result = to_html_with_stats(&d, &RenderOptions::default()).unwrap();

        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.text_run_count, 2);
        assert_eq!(result.stats.word_count, 5);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>"), "&lt;a href=&#39;x&#39;&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
