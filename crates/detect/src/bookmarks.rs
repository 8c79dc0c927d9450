//! Recently-used document bookmarks (XBEL).

use crate::error::{DetectError, DetectResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One application recorded as having opened a bookmarked file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkApplication {
    pub name: String,
    pub exec: Option<String>,
    pub count: Option<u32>,
}

/// A recent-document entry and the applications that opened it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkMetadata {
    pub href: String,
    pub applications: Vec<BookmarkApplication>,
}

impl BookmarkMetadata {
    pub fn application_names(&self) -> impl Iterator<Item = &str> {
        self.applications.iter().map(|app| app.name.as_str())
    }
}

/// `<user data dir>/recently-used.xbel`.
pub fn recently_used_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("recently-used.xbel"))
}

pub fn load_xbel(path: &Path) -> DetectResult<Vec<BookmarkMetadata>> {
    let contents = std::fs::read_to_string(path).map_err(|source| DetectError::ReadBookmarks {
        path: path.to_path_buf(),
        source,
    })?;
    parse_xbel(&contents)
}

// Element path from <bookmark> down to the application list.
const APPLICATIONS_PATH: &[&[u8]] = &[b"bookmark", b"info", b"metadata", b"applications"];

/// Parse an XBEL document. Namespace prefixes (`bookmark:`) are ignored.
pub fn parse_xbel(xml: &str) -> DetectResult<Vec<BookmarkMetadata>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut bookmarks = Vec::new();
    let mut current: Option<BookmarkMetadata> = None;
    let mut stack: Vec<Vec<u8>> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"bookmark" {
                    current = Some(BookmarkMetadata {
                        href: attribute(&e, b"href")?.unwrap_or_default(),
                        applications: Vec::new(),
                    });
                    stack.clear();
                }
                if current.is_some() {
                    stack.push(name);
                }
            }
            Event::Empty(e) => {
                let local = e.local_name();
                if local.as_ref() == b"bookmark" {
                    bookmarks.push(BookmarkMetadata {
                        href: attribute(&e, b"href")?.unwrap_or_default(),
                        applications: Vec::new(),
                    });
                } else if local.as_ref() == b"application" && in_application_list(&stack) {
                    if let (Some(bookmark), Some(app)) = (current.as_mut(), application(&e)?) {
                        bookmark.applications.push(app);
                    }
                }
            }
            Event::End(e) => {
                if current.is_some() {
                    stack.pop();
                    if e.local_name().as_ref() == b"bookmark" {
                        bookmarks.extend(current.take());
                        stack.clear();
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!(count = bookmarks.len(), "parsed recently-used bookmarks");
    Ok(bookmarks)
}

fn in_application_list(stack: &[Vec<u8>]) -> bool {
    stack.len() >= APPLICATIONS_PATH.len()
        && stack[stack.len() - APPLICATIONS_PATH.len()..]
            .iter()
            .zip(APPLICATIONS_PATH)
            .all(|(seen, expected)| seen.as_slice() == *expected)
}

fn application(e: &BytesStart<'_>) -> DetectResult<Option<BookmarkApplication>> {
    let Some(name) = attribute(e, b"name")? else {
        return Ok(None);
    };

    Ok(Some(BookmarkApplication {
        name,
        exec: attribute(e, b"exec")?,
        count: attribute(e, b"count")?.and_then(|count| count.trim().parse().ok()),
    }))
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> DetectResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
