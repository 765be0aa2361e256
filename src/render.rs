//! Markup builder that escapes every attribute value and text node it is
//! given. `Markup` can only come out of `Element::render`, so a card can not
//! carry unescaped backend text.

use std::fmt;
use html_escape::encode_quoted_attribute;
use crate::config::PageConfig;
use crate::models::{ChannelContext, Video};

const VOID_TAGS: [&str; 4] = ["img", "input", "br", "meta"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
enum Node {
    Text(String),
    Element(Element),
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Element { tag, attrs: Vec::new(), children: Vec::new() }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.children.push(Node::Text(value.into()));
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn render(&self) -> Markup {
        let mut out = String::new();
        self.write_to(&mut out);
        Markup(out)
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&encode_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }

        for child in &self.children {
            match child {
                // Text gets the attribute encoding too so quotes are escaped everywhere.
                Node::Text(text) => out.push_str(&encode_quoted_attribute(text)),
                Node::Element(element) => element.write_to(out),
            }
        }

        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Element ids a rendered card exposes so the pager can find its form again.
pub fn analyze_form_id(card_id: usize) -> String {
    format!("analyze-form-{card_id}")
}

pub fn analyze_button_id(card_id: usize) -> String {
    format!("analyze-button-{card_id}")
}

pub struct VideoCard<'a> {
    pub video: &'a Video,
    pub channel: &'a ChannelContext,
    pub config: &'a PageConfig,
}

impl<'a> VideoCard<'a> {
    pub fn new(video: &'a Video, channel: &'a ChannelContext, config: &'a PageConfig) -> Self {
        VideoCard { video, channel, config }
    }

    pub fn render(&self, card_id: usize) -> Markup {
        let video = self.video;
        let thumbnail = if video.thumbnail.trim().is_empty() {
            self.config.placeholder_thumbnail.as_str()
        } else {
            video.thumbnail.as_str()
        };

        let hidden = |name: &'static str, value: &str| {
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", name)
                .attr("value", value)
        };

        Element::new("article")
            .class("video-item")
            .child(
                Element::new("a")
                    .attr("href", video.video_url.as_str())
                    .attr("target", "_blank")
                    .attr("rel", "noopener")
                    .class("thumb-wrap")
                    .attr("aria-label", video.title.as_str())
                    .child(
                        Element::new("img")
                            .attr("src", thumbnail)
                            .attr("alt", self.config.copy.thumbnail_alt.as_str())
                            .class("thumb"),
                    ),
            )
            .child(
                Element::new("div")
                    .class("video-body")
                    .child(
                        Element::new("h3")
                            .class("video-title")
                            .attr("title", video.title.as_str())
                            .text(video.title.as_str()),
                    )
                    .child(Element::new("span").class("video-type").text(video.video_type.as_str())),
            )
            .child(
                Element::new("form")
                    .class("analyze-form")
                    .attr("id", analyze_form_id(card_id))
                    .attr("action", self.config.analyze_action.as_str())
                    .attr("method", "post")
                    .child(hidden("input_url", &video.video_url))
                    .child(hidden("analysis_mode", "video"))
                    .child(hidden("channel_id", &self.channel.channel_id))
                    .child(hidden("channel_url", &self.channel.channel_url))
                    .child(
                        Element::new("button")
                            .attr("type", "submit")
                            .class("analyze-button")
                            .attr("id", analyze_button_id(card_id))
                            .text(self.config.copy.analyze_button_label.as_str()),
                    ),
            )
            .render()
    }
}
