//! Downloader argument assembly
//!
//! Pure merge of the harvested URL sequence into the fixed downloader
//! option template. Nothing is transformed here: URLs keep their discovery
//! order and duplicates pass through unchanged.

use crate::config::HarvestConfig;
use crate::item::ItemDescriptor;

/// Merge `urls` into the downloader argument set for `item`
///
/// The fixed prefix identifies the operator and pipeline version through
/// WARC headers and carries the item identifier so the resulting archive is
/// attributable. A configured bind address goes after the URLs.
pub fn downloader_args(
    config: &HarvestConfig,
    item: &ItemDescriptor,
    urls: Vec<String>,
) -> Vec<String> {
    let mut args: Vec<String> = vec![
        config.downloader_path.display().to_string(),
        "-U".to_string(),
        config.user_agent.clone(),
        "-nv".to_string(),
        "-o".to_string(),
        config.log_path.display().to_string(),
        "--no-check-certificate".to_string(),
        "--output-document".to_string(),
        format!("{}.tmp", config.warc_file_base),
        "--truncate-output".to_string(),
        "-e".to_string(),
        "robots=off".to_string(),
        "--rotate-dns".to_string(),
        "--no-parent".to_string(),
        "--page-requisites".to_string(),
        "--timeout".to_string(),
        "30".to_string(),
        "--tries".to_string(),
        "inf".to_string(),
        "--span-hosts".to_string(),
        "--waitretry".to_string(),
        "30".to_string(),
        "--warc-file".to_string(),
        config.warc_file_base.clone(),
        "--warc-header".to_string(),
        format!("operator: {}", config.warc_operator),
        "--warc-header".to_string(),
        format!("wiki-harvest-version: {}", config.pipeline_version),
        "--warc-header".to_string(),
        format!("wiki-harvest-item: {}", item),
    ];

    args.extend(urls);

    if let Some(addr) = &config.bind_address {
        args.push("--bind-address".to_string());
        args.push(addr.clone());
    }

    args
}
