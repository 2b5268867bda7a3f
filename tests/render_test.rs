//! Integration tests for HTML rendering and the visitor pattern.

use richpost::model::{Heading, ImageNode, Paragraph, TextNode};
use richpost::render::visitor::{
    CompositeVisitor, DocumentVisitor, SkipEmptyParagraphsVisitor, SkipImagesVisitor,
    VisitorAction,
};
use richpost::render::{
    extract_image_names, render, rewrite_upload_urls, to_html, to_text, HtmlRenderer,
};
use richpost::{parse_str, Alignment, Document, HeadingLevel, Node, RenderOptions};

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    heading_count: usize,
    paragraph_count: usize,
    text_count: usize,
    image_count: usize,
    started: bool,
    ended: bool,
}

impl DocumentVisitor for CountingVisitor {
    fn visit_heading(&mut self, _heading: &Heading) -> VisitorAction {
        self.heading_count += 1;
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, _para: &Paragraph) -> VisitorAction {
        self.paragraph_count += 1;
        VisitorAction::Continue
    }

    fn visit_text(&mut self, _text: &TextNode) -> VisitorAction {
        self.text_count += 1;
        VisitorAction::Continue
    }

    fn visit_image(&mut self, _image: &ImageNode) -> VisitorAction {
        self.image_count += 1;
        VisitorAction::Continue
    }

    fn on_document_start(&mut self) {
        self.started = true;
    }

    fn on_document_end(&mut self) {
        self.ended = true;
        assert!(self.started);
    }
}

/// Replaces every image with a figure.
struct FigureVisitor;

impl DocumentVisitor for FigureVisitor {
    fn visit_image(&mut self, image: &ImageNode) -> VisitorAction {
        VisitorAction::Replace(format!(
            "<figure><img src=\"{}\"><figcaption>{}</figcaption></figure>",
            image.src(),
            image.alt_text()
        ))
    }
}

fn image_heading(level: HeadingLevel, src: &str) -> Heading {
    Heading::new(level, [Node::from(ImageNode::new(src, "", Alignment::Center))]).unwrap()
}

#[test]
fn test_end_to_end_heading() {
    let json = r#"{"root":{"type":"root","version":1,"children":[
        {"type":"heading","version":1,"tag":"h1","children":[
            {"type":"text","version":1,"text":"Hi","format":0,"style":"","mode":"normal","detail":0}
        ]}
    ]}}"#;
    let doc = parse_str(json).unwrap();
    assert_eq!(render(&doc), "<h1>Hi</h1>");
}

#[test]
fn test_image_names_in_document_order() {
    let doc = Document::from_blocks([
        Node::from(image_heading(HeadingLevel::H1, "/upload/blog/a.png")),
        Paragraph::with_text("between").into(),
        image_heading(HeadingLevel::H2, "/upload/blog/b.png").into(),
        image_heading(HeadingLevel::H3, "/upload/blog/a.png").into(),
    ])
    .unwrap();

    assert_eq!(extract_image_names(&doc), vec!["a.png", "b.png", "a.png"]);
}

#[test]
fn test_rendering_is_pure() {
    let doc = Document::from_blocks([
        Node::from(Heading::with_text(HeadingLevel::H1, "Title")),
        Paragraph::with_text("Body").into(),
    ])
    .unwrap();
    let before = doc.clone();

    let first = render(&doc);
    let second = render(&doc);

    assert_eq!(first, second);
    assert_eq!(doc, before);
}

#[test]
fn test_rewrite_matches_base_url_option() {
    let doc = Document::from_blocks([Node::from(image_heading(
        HeadingLevel::H1,
        "/upload/blog/a.png",
    ))])
    .unwrap();

    let rewritten = rewrite_upload_urls(&render(&doc), "/upload/", "https://api.example.com");
    let options = RenderOptions::new().with_asset_base_url("https://api.example.com");

    assert_eq!(to_html(&doc, &options).unwrap(), rewritten);
}

#[test]
fn test_counting_visitor() {
    let heading = Heading::new(
        HeadingLevel::H1,
        [
            Node::from(TextNode::plain("a")),
            ImageNode::new("x.png", "", Alignment::Left).into(),
        ],
    )
    .unwrap();
    let doc = Document::from_blocks([
        Node::from(heading),
        Paragraph::with_text("b").into(),
        Paragraph::empty().into(),
    ])
    .unwrap();

    let mut visitor = CountingVisitor::default();
    doc.visit(|node| {
        use richpost::model::NodeRef;
        match node {
            NodeRef::Heading(h) => {
                visitor.visit_heading(h);
            }
            NodeRef::Paragraph(p) => {
                visitor.visit_paragraph(p);
            }
            NodeRef::Text(t) => {
                visitor.visit_text(t);
            }
            NodeRef::Image(i) => {
                visitor.visit_image(i);
            }
            NodeRef::Root(_) => {}
        }
    });

    assert_eq!(visitor.heading_count, 1);
    assert_eq!(visitor.paragraph_count, 2);
    assert_eq!(visitor.text_count, 2);
    assert_eq!(visitor.image_count, 1);

    // The renderer drives the same hooks
    let html = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(CountingVisitor::default())
        .render(&doc)
        .unwrap();
    assert!(html.ends_with("<p>b</p><p><br></p>"));
}

#[test]
fn test_replace_visitor() {
    let heading = Heading::new(
        HeadingLevel::H2,
        [Node::from(ImageNode::new("/upload/blog/a.png", "A cat", Alignment::Center))],
    )
    .unwrap();
    let doc = Document::from_blocks([Node::from(heading)]).unwrap();

    let html = HtmlRenderer::new(RenderOptions::new().with_asset_base_url("https://h"))
        .with_visitor(FigureVisitor)
        .render(&doc)
        .unwrap();

    assert_eq!(
        html,
        "<h2><figure><img src=\"https://h/upload/blog/a.png\"><figcaption>A cat</figcaption></figure></h2>"
    );
}

#[test]
fn test_composite_visitor_rendering() {
    let doc = Document::from_blocks([
        Node::from(image_heading(HeadingLevel::H1, "a.png")),
        Paragraph::empty().into(),
        Paragraph::with_text("kept").into(),
    ])
    .unwrap();

    let composite = CompositeVisitor::new()
        .with_visitor(SkipImagesVisitor)
        .with_visitor(SkipEmptyParagraphsVisitor);
    let result = HtmlRenderer::new(RenderOptions::default())
        .with_visitor(composite)
        .render_with_stats(&doc)
        .unwrap();

    assert_eq!(result.html, "<h1></h1><p>kept</p>");
    assert_eq!(result.stats.customized_count, 2);
    assert_eq!(result.image_names, vec!["a.png"]);
}

#[test]
fn test_to_text() {
    let doc = Document::from_blocks([
        Node::from(Heading::with_text(HeadingLevel::H1, "Title")),
        Paragraph::with_text("Body").into(),
    ])
    .unwrap();
    assert_eq!(to_text(&doc).unwrap(), "Title\n\nBody");
}
