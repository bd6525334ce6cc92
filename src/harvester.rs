//! Core harvester: drives every list of an item to exhaustion
//!
//! One item is processed synchronously, list-by-list, page-by-page; the only
//! suspension point is the sleep between connection retries. All working
//! state is scoped to one harvest and dropped when it completes or fails.

use crate::assembler;
use crate::config::HarvestConfig;
use crate::error::{Error, Result};
use crate::guard::LoopGuard;
use crate::item::{ItemDescriptor, SiteType};
use crate::lists::{self, ListSpec};
use crate::paginator;
use futures::TryStreamExt;
use futures::stream::Stream;
use serde_json::Value;
use std::collections::VecDeque;

/// Harvests the content URLs of one MediaWiki-family site at a time
///
/// Owns the HTTP client and configuration; everything per-item lives inside
/// the stream returned by [`stream_urls`](Self::stream_urls).
pub struct WikiHarvester {
    config: HarvestConfig,
    client: reqwest::Client,
}

impl WikiHarvester {
    /// Create a harvester from an explicit configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    /// The configuration this harvester was built with
    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Lazily produce the item's URLs in discovery order
    ///
    /// The stream is finite: it ends when every list of the item's catalog is
    /// exhausted, or with a single `Err` on the first fatal failure (nothing
    /// is yielded after an error). Re-running the harvest means calling this
    /// again; pagination restarts from the seed cursor.
    ///
    /// For `mediawiki` items the first two URLs are always the base path and
    /// the host root, ahead of any list enumeration.
    pub fn stream_urls<'a>(
        &'a self,
        item: &ItemDescriptor,
    ) -> impl Stream<Item = Result<String>> + 'a {
        let state = HarvestState::new(self, item.clone());
        futures::stream::unfold(state, |mut state| async move {
            let next = state.next_url().await;
            next.map(|res| (res, state))
        })
    }

    /// Collect the whole URL sequence eagerly
    ///
    /// A fatal error discards everything collected so far; the item must be
    /// retried from scratch by whatever schedules it.
    pub async fn collect_urls(&self, item: &ItemDescriptor) -> Result<Vec<String>> {
        self.stream_urls(item).try_collect().await
    }

    /// Harvest the item and merge the URLs into the downloader argument set
    pub async fn downloader_args(&self, item: &ItemDescriptor) -> Result<Vec<String>> {
        let urls = self.collect_urls(item).await?;
        Ok(assembler::downloader_args(&self.config, item, urls))
    }
}

/// Working state of one in-flight harvest
struct HarvestState<'a> {
    harvester: &'a WikiHarvester,
    item: ItemDescriptor,
    lists: std::slice::Iter<'static, ListSpec>,
    current: Option<ActiveList>,
    pending: VecDeque<String>,
    done: bool,
}

/// The list currently being paginated
struct ActiveList {
    spec: &'static ListSpec,
    cursor: String,
    guard: LoopGuard,
}

impl<'a> HarvestState<'a> {
    fn new(harvester: &'a WikiHarvester, item: ItemDescriptor) -> Self {
        let mut pending = VecDeque::new();
        if item.site_type == SiteType::Mediawiki {
            pending.push_back(format!("http://{}", item.base_path));
            pending.push_back(format!("http://{}", item.host()));
        }
        let lists = item.site_type.lists().iter();
        Self {
            harvester,
            item,
            lists,
            current: None,
            pending,
            done: false,
        }
    }

    /// Terminate the stream with `e`; queued URLs are discarded
    fn fail(&mut self, e: Error) -> Option<Result<String>> {
        self.pending.clear();
        self.done = true;
        Some(Err(e))
    }

    /// Yield the next URL, fetching further pages as needed
    async fn next_url(&mut self) -> Option<Result<String>> {
        loop {
            if let Some(url) = self.pending.pop_front() {
                return Some(Ok(url));
            }
            if self.done {
                return None;
            }

            let mut active = match self.current.take() {
                Some(active) => active,
                None => {
                    let Some(spec) = self.lists.next() else {
                        self.done = true;
                        return None;
                    };
                    let cursor = lists::seed_cursor(spec, &self.item);
                    if cursor.is_empty() {
                        tracing::debug!(list = spec.name, "list not enumerable on this host");
                        continue;
                    }
                    ActiveList {
                        spec,
                        cursor,
                        guard: LoopGuard::new(),
                    }
                }
            };

            let page = match paginator::fetch_page(
                &self.harvester.client,
                &self.harvester.config,
                &self.item,
                active.spec,
                &active.cursor,
            )
            .await
            {
                Ok(page) => page,
                Err(e) => return self.fail(e),
            };

            let mut next_cursor = page.next_cursor;
            for record in &page.records {
                let emissions = match map_record(active.spec, &self.item, record) {
                    Ok(emissions) => emissions,
                    Err(e) => return self.fail(e),
                };
                for (key, url) in emissions {
                    if self.item.site_type.tracks_duplicates() {
                        active.guard.record(&key);
                    }
                    self.pending.push_back(url);
                }
            }
            tracing::info!(
                list = active.spec.name,
                records = page.records.len(),
                "found and queued URLs, continuing"
            );

            if self.item.site_type.tracks_duplicates() && active.guard.looped() {
                tracing::warn!(
                    list = active.spec.name,
                    "repeated records across pages, probably a loop, finishing list"
                );
                active.guard.dedupe();
                next_cursor.clear();
            }

            // An empty cursor means the list is exhausted; dropping `active`
            // here lets the next iteration advance the catalog.
            if !next_cursor.is_empty() {
                active.cursor = next_cursor;
                self.current = Some(active);
            }
        }
    }
}

fn key_field(spec: &ListSpec) -> &'static str {
    match spec.name {
        "allcategories" => "*",
        "allusers" => "name",
        "exturlusage" => "url",
        _ => "title",
    }
}

/// Map one record to its `(key, url)` emissions
///
/// The key goes to the loop guard, the URL to the output sequence. Most
/// lists emit one page URL built from base path, namespace prefix and key;
/// `exturlusage` emits its `url` field verbatim; `allimages` additionally
/// emits the file's `url` field verbatim.
pub(crate) fn map_record(
    spec: &ListSpec,
    item: &ItemDescriptor,
    record: &Value,
) -> Result<Vec<(String, String)>> {
    let field = key_field(spec);
    let key = record.get(field).and_then(Value::as_str).ok_or_else(|| {
        Error::UnexpectedResponse(format!(
            "{} record is missing its {} field",
            spec.name, field
        ))
    })?;

    let mut emissions = Vec::with_capacity(2);
    let url = if spec.name == "exturlusage" {
        key.to_string()
    } else {
        format!("http://{}{}{}", item.base_path, spec.page_prefix, key)
    };
    emissions.push((key.to_string(), url));

    if spec.name == "allimages" {
        let file_url = record.get("url").and_then(Value::as_str).ok_or_else(|| {
            Error::UnexpectedResponse("allimages record is missing its url field".to_string())
        })?;
        emissions.push((file_url.to_string(), file_url.to_string()));
    }

    Ok(emissions)
}
