//! RSS document decoding.
//!
//! Bytes are transcoded to UTF-8 first (see [`charset`]) and then walked
//! with `quick-xml`. Only the handful of RSS elements the pipeline reads
//! are kept; everything else is skipped.

pub mod charset;

use html_escape::decode_html_entities;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use thiserror::Error;

use crate::domain::{RawFeed, RawItem};

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported character encoding '{0}'")]
    UnknownCharset(String),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document ended inside <{0}>")]
    UnexpectedEof(String),

    #[error("no <channel> element in document")]
    MissingChannel,
}

#[derive(Clone, Default)]
pub struct FeedDecoder;

impl FeedDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, body: &[u8], content_type: Option<&str>) -> Result<RawFeed, DecodeError> {
        let text = charset::transcode(body, content_type)?;

        let mut reader = Reader::from_str(&text);
        reader.config_mut().trim_text(true);

        let mut feed = RawFeed::default();
        let mut stack: Vec<String> = Vec::new();
        let mut item: Option<RawItem> = None;
        let mut saw_channel = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match name.as_str() {
                        "channel" => saw_channel = true,
                        "item" => item = Some(RawItem::default()),
                        _ => {}
                    }
                    stack.push(name);
                }
                Event::Empty(e) => {
                    if e.name().as_ref() == b"channel" {
                        saw_channel = true;
                    }
                }
                Event::End(_) => {
                    if stack.pop().as_deref() == Some("item") {
                        if let Some(done) = item.take() {
                            feed.items.push(done);
                        }
                    }
                }
                Event::Text(e) => {
                    append_text(&stack, &mut feed, item.as_mut(), &unescape(&e));
                }
                Event::CData(e) => {
                    append_text(&stack, &mut feed, item.as_mut(), &String::from_utf8_lossy(&e));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(DecodeError::UnexpectedEof(open));
        }
        if !saw_channel {
            return Err(DecodeError::MissingChannel);
        }

        Ok(feed)
    }
}

/// XML-unescape text, falling back to HTML entity rules for sloppy feeds
/// that use `&nbsp;` and friends.
fn unescape(text: &BytesText) -> String {
    match text.unescape() {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => decode_html_entities(&String::from_utf8_lossy(text)).into_owned(),
    }
}

/// Route character data to the field named by its enclosing element. Only
/// direct children of `<channel>` and `<item>` are read.
fn append_text(stack: &[String], feed: &mut RawFeed, item: Option<&mut RawItem>, text: &str) {
    let [.., parent, field] = stack else {
        return;
    };

    let target = match (parent.as_str(), item) {
        ("item", Some(item)) => match field.as_str() {
            "title" => &mut item.title,
            "link" => &mut item.link,
            "description" => &mut item.description,
            "guid" => &mut item.guid,
            "pubDate" => &mut item.pub_date,
            _ => return,
        },
        ("channel", _) => match field.as_str() {
            "title" => &mut feed.title,
            "link" => &mut feed.link,
            "description" => &mut feed.description,
            "lastBuildDate" => &mut feed.last_build_date,
            _ => return,
        },
        _ => return,
    };
    target.push_str(text);
}
