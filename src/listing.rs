//! Discovery of remote data files.
//!
//! The archive only exposes Apache-style HTML directory indexes, so listing
//! is done by scraping anchors. Callers go through [`RemoteIndex`] and never
//! see the HTML.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use reqwest::Url;

use crate::domain::Year;
use crate::error::MirrorError;

pub trait RemoteIndex {
    /// Subdirectory hrefs (e.g. `2005/`) listed for `year` on the top-level index.
    fn year_subdirs(&self, year: &Year) -> Result<Vec<String>, MirrorError>;

    /// Data file names listed in one subdirectory.
    fn data_files(&self, subdir: &str) -> Result<Vec<String>, MirrorError>;
}

pub trait FileFetcher {
    /// Downloads `url` to `destination`, replacing any existing file.
    fn download(&self, url: &Url, destination: &Path) -> Result<(), MirrorError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

fn anchor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#)
            .expect("anchor pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"))
}

fn data_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^gpcp_.*\.nc$").expect("data file pattern is valid"))
}

/// All anchors in `html`, with inner markup stripped from the visible text.
pub fn parse_anchors(html: &str) -> Vec<Anchor> {
    anchor_regex()
        .captures_iter(html)
        .map(|caps| {
            let href = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            let inner = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            Anchor {
                href: href.trim().to_string(),
                text: tag_regex().replace_all(inner, "").trim().to_string(),
            }
        })
        .collect()
}

pub fn year_subdirs_in(html: &str, year: &Year) -> Vec<String> {
    let prefix = year.subdir_prefix();
    parse_anchors(html)
        .into_iter()
        .filter(|anchor| anchor.text.starts_with(&prefix))
        .map(|anchor| anchor.href)
        .filter(|href| !href.is_empty())
        .collect()
}

pub fn data_files_in(html: &str) -> Vec<String> {
    parse_anchors(html)
        .into_iter()
        .filter(|anchor| data_file_regex().is_match(&anchor.text))
        .filter_map(|anchor| file_name_from_href(&anchor.href))
        .filter(|name| data_file_regex().is_match(name))
        .collect()
}

/// Last path segment of an href, without query or fragment.
pub fn file_name_from_href(href: &str) -> Option<String> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(|name| name.to_string())
}

/// `base/subdir/file_name`, with `subdir` treated as a directory.
pub fn remote_file_url(base: &Url, subdir: &str, file_name: &str) -> Result<Url, MirrorError> {
    subdir_url(base, subdir)?
        .join(file_name)
        .map_err(|err| MirrorError::InvalidBaseUrl(format!("{base}{subdir}{file_name}: {err}")))
}

pub fn subdir_url(base: &Url, subdir: &str) -> Result<Url, MirrorError> {
    let subdir = if subdir.ends_with('/') {
        subdir.to_string()
    } else {
        format!("{subdir}/")
    };
    base.join(&subdir)
        .map_err(|err| MirrorError::InvalidBaseUrl(format!("{base}{subdir}: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
<html><body><table>
<tr><th><a href="?C=N;O=D">Name</a></th></tr>
<tr><td><a href="/data/">Parent Directory</a></td></tr>
<tr><td><a href="2004/">2004/</a></td><td>2019-01-03 10:15</td></tr>
<tr><td><a href="2005/">2005/</a></td><td>2019-01-03 10:15</td></tr>
<tr><td><a href="20050/">20050/</a></td></tr>
</table></body></html>
"#;

    #[test]
    fn parse_anchor_text_strips_markup() {
        let anchors = parse_anchors(r#"<A HREF='x.nc'><b>x.nc</b></A>"#);
        assert_eq!(
            anchors,
            vec![Anchor {
                href: "x.nc".to_string(),
                text: "x.nc".to_string()
            }]
        );
    }

    #[test]
    fn year_subdirs_match_prefix_only() {
        let year: Year = "2005".parse().unwrap();
        assert_eq!(year_subdirs_in(INDEX, &year), vec!["2005/".to_string()]);
    }

    #[test]
    fn data_file_href_must_match_too() {
        let html = r#"<a href="fetch.php?f=gpcp_a_d1_c2.nc">gpcp_a_d1_c2.nc</a>
<a href="../gpcp_b_d2_c2.nc">gpcp_b_d2_c2.nc</a>"#;
        assert_eq!(data_files_in(html), vec!["gpcp_b_d2_c2.nc".to_string()]);
    }

    #[test]
    fn href_file_name() {
        assert_eq!(file_name_from_href("/a/b/c.nc?x=1"), Some("c.nc".to_string()));
        assert_eq!(file_name_from_href("dir/"), None);
    }

    #[test]
    fn remote_url_join() {
        let base = Url::parse("https://example.org/gpcp/access/").unwrap();
        let url = remote_file_url(&base, "2005", "gpcp_a_d1_c2.nc").unwrap();
        assert_eq!(url.as_str(), "https://example.org/gpcp/access/2005/gpcp_a_d1_c2.nc");
    }
}
