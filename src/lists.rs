//! Catalog of enumerable API lists per site type

use crate::item::{ItemDescriptor, SiteType};

/// One enumerable list of the query API
///
/// `id_prefix` is the module prefix MediaWiki puts on the list's query
/// parameters and continuation keys (`ac`, `ai`, `ap`, `au`, `eu`);
/// `page_prefix` is the namespace prefix prepended when turning a record key
/// into a page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSpec {
    /// List name passed as `list=` to the API
    pub name: &'static str,
    /// Parameter prefix for limit, cursor and continuation keys
    pub id_prefix: &'static str,
    /// Namespace prefix for emitted page URLs
    pub page_prefix: &'static str,
}

pub(crate) const MEDIAWIKI_LISTS: [ListSpec; 4] = [
    ListSpec {
        name: "allcategories",
        id_prefix: "ac",
        page_prefix: "Category:",
    },
    ListSpec {
        name: "allimages",
        id_prefix: "ai",
        page_prefix: "",
    },
    ListSpec {
        name: "allpages",
        id_prefix: "ap",
        page_prefix: "",
    },
    ListSpec {
        name: "allusers",
        id_prefix: "au",
        page_prefix: "User:",
    },
];

pub(crate) const MEDIAWIKIEU_LISTS: [ListSpec; 1] = [ListSpec {
    name: "exturlusage",
    id_prefix: "eu",
    page_prefix: "",
}];

impl SiteType {
    /// The lists enumerated for this site type, in harvest order
    pub fn lists(self) -> &'static [ListSpec] {
        match self {
            SiteType::Mediawiki => &MEDIAWIKI_LISTS,
            SiteType::MediawikiEu => &MEDIAWIKIEU_LISTS,
        }
    }
}

/// Initial continuation cursor for one list of an item
///
/// `!` sorts before every printable title on a standard MediaWiki install;
/// exturlusage offsets are numeric and start at `0`. Wikia-hosted wikis
/// reject `allusers` enumeration, so that list is seeded empty there and
/// thereby skipped (an empty cursor means "done").
pub(crate) fn seed_cursor(spec: &ListSpec, item: &ItemDescriptor) -> String {
    if spec.name == "allusers" && is_wikia_host(&item.api_endpoint) {
        return String::new();
    }
    match item.site_type {
        SiteType::Mediawiki => "!",
        SiteType::MediawikiEu => "0",
    }
    .to_string()
}

fn is_wikia_host(api_endpoint: &str) -> bool {
    api_endpoint
        .split('/')
        .next()
        .is_some_and(|host| host == "wikia.com" || host.ends_with(".wikia.com"))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn mediawiki_item(api: &str) -> ItemDescriptor {
        ItemDescriptor::parse(&format!("mediawiki:{}:example.com/wiki/", api)).unwrap()
    }

    #[test]
    fn mediawiki_catalog_order_and_prefixes() {
        let lists = SiteType::Mediawiki.lists();
        let names: Vec<_> = lists.iter().map(|l| l.name).collect();
        assert_eq!(
            names,
            vec!["allcategories", "allimages", "allpages", "allusers"]
        );
        assert_eq!(lists[0].page_prefix, "Category:");
        assert_eq!(lists[3].page_prefix, "User:");
        assert_eq!(lists[1].id_prefix, "ai");
    }

    #[test]
    fn exturlusage_is_the_only_eu_list() {
        let lists = SiteType::MediawikiEu.lists();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "exturlusage");
        assert_eq!(lists[0].id_prefix, "eu");
        assert_eq!(lists[0].page_prefix, "");
    }

    #[test]
    fn mediawiki_lists_seed_with_bang() {
        let item = mediawiki_item("example.com/api.php");
        for spec in SiteType::Mediawiki.lists() {
            assert_eq!(seed_cursor(spec, &item), "!");
        }
    }

    #[test]
    fn exturlusage_seeds_with_zero() {
        let item =
            ItemDescriptor::parse("mediawikieu:example.com/api.php:example.com/wiki/").unwrap();
        let spec = &SiteType::MediawikiEu.lists()[0];
        assert_eq!(seed_cursor(spec, &item), "0");
    }

    #[test]
    fn wikia_hosts_skip_allusers_only() {
        let item = mediawiki_item("thegrishaverse.wikia.com/api.php");
        for spec in SiteType::Mediawiki.lists() {
            let seed = seed_cursor(spec, &item);
            if spec.name == "allusers" {
                assert!(seed.is_empty(), "allusers must be skipped on Wikia hosts");
            } else {
                assert_eq!(seed, "!");
            }
        }
    }

    #[test]
    fn wikia_match_is_host_scoped() {
        // A wikia.com mention in the path must not trigger the carve-out
        let item = mediawiki_item("example.com/wikia.com/api.php");
        let allusers = &SiteType::Mediawiki.lists()[3];
        assert_eq!(seed_cursor(allusers, &item), "!");

        // Nor should a lookalike host
        let item = mediawiki_item("notwikia.common.example/api.php");
        assert_eq!(seed_cursor(allusers, &item), "!");
    }
}
