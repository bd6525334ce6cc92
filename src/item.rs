//! Work-item identifier parsing
//!
//! An item names one wiki to harvest, in the form
//! `type:api_endpoint:base_path`, e.g.
//! `mediawiki:thegrishaverse.wikia.com/api.php:thegrishaverse.wikia.com/wiki/`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which family of query API an item targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteType {
    /// Standard MediaWiki site: categories, images, pages and users are enumerated
    Mediawiki,
    /// External-URL-usage harvest: only the `exturlusage` list is enumerated
    MediawikiEu,
}

impl SiteType {
    /// Whether record keys are tracked for runaway-pagination detection
    pub(crate) fn tracks_duplicates(self) -> bool {
        !matches!(self, SiteType::MediawikiEu)
    }

    /// The query parameter carrying the continuation cursor
    pub(crate) fn cursor_param(self) -> &'static str {
        match self {
            SiteType::Mediawiki => "from",
            SiteType::MediawikiEu => "offset",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Mediawiki => write!(f, "mediawiki"),
            SiteType::MediawikiEu => write!(f, "mediawikieu"),
        }
    }
}

/// One unit of archival work: a site type, its query API and the page base path
///
/// # Examples
///
/// ```
/// use wiki_harvest::ItemDescriptor;
///
/// let item = ItemDescriptor::parse("mediawiki:example.com/api.php:example.com/wiki/").unwrap();
/// assert_eq!(item.api_endpoint, "example.com/api.php");
/// assert_eq!(item.base_path, "example.com/wiki/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDescriptor {
    /// Which API family the item targets
    pub site_type: SiteType,
    /// Host and path of the query API, without scheme
    pub api_endpoint: String,
    /// Host and path prefix content pages live under, without scheme
    pub base_path: String,
}

impl ItemDescriptor {
    /// Parse an identifier string of the form `type:api_endpoint:base_path`
    ///
    /// Splits on the first two colons only, so the base path may itself
    /// contain colons; the endpoint segment cannot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedIdentifier`] if fewer than three segments are
    /// present or the endpoint does not form a usable URL, and
    /// [`Error::UnsupportedSiteType`] for an unrecognized type segment.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let (Some(type_part), Some(api_endpoint), Some(base_path)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::MalformedIdentifier(s.to_string()));
        };

        let site_type = match type_part {
            "mediawiki" => SiteType::Mediawiki,
            "mediawikieu" => SiteType::MediawikiEu,
            other => return Err(Error::UnsupportedSiteType(other.to_string())),
        };

        // Reject endpoints the paginator could never build a request from.
        let endpoint_url = format!("http://{}", api_endpoint);
        if api_endpoint.is_empty() || url::Url::parse(&endpoint_url).is_err() {
            return Err(Error::MalformedIdentifier(format!(
                "unusable API endpoint in {}",
                s
            )));
        }

        Ok(Self {
            site_type,
            api_endpoint: api_endpoint.to_string(),
            base_path: base_path.to_string(),
        })
    }

    /// The host portion of the base path (everything before the first `/`)
    pub fn host(&self) -> &str {
        self.base_path
            .split('/')
            .next()
            .unwrap_or(&self.base_path)
    }
}

impl FromStr for ItemDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Display feeds the WARC item header, so it must round-trip the identifier.
impl fmt::Display for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.site_type, self.api_endpoint, self.base_path
        )
    }
}
