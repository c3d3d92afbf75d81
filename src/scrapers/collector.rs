//! Walks a city's result pages and collects detail-page URLs.

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::scrapers::browser::{poll_until, Session};
use crate::scrapers::navigator::LISTING_CONTAINER;

/// Canonical detail-page address, keyed by the numeric listing identifier.
const DETAIL_URL_TEMPLATE: &str =
    "https://venda-imoveis.caixa.gov.br/sistema/detalhe-imovel.asp?hdnimovel=";

/// Hidden field where the host page publishes its total page count.
const PAGE_COUNT_FIELD: &str = "#hdnQtdPag";

/// Listing items carry the identifier inside an inline click handler.
const ID_PATTERN: &str = r"detalhe_imovel\(\s*'?(\d+)'?\s*\)";

const REPAGINATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Fixed delay used when the repagination wait times out.
const REPAGINATE_FALLBACK: Duration = Duration::from_secs(5);

/// Collect the de-duplicated detail-page URLs for the city currently loaded
/// in the session. Pagination overlap across pages cannot produce duplicate
/// URLs; identifiers are tracked in a set across the whole walk.
pub fn collect_city_urls(session: &Session, max_pages: Option<usize>) -> Result<Vec<String>> {
    let first_page = session.page_html()?;
    let mut total_pages = page_count_hint(&first_page);
    if let Some(cap) = max_pages {
        total_pages = total_pages.min(cap.max(1));
    }
    debug!("Walking {} result page(s)", total_pages);

    let mut seen: HashSet<String> = HashSet::new();
    let mut urls: Vec<String> = Vec::new();

    for id in extract_listing_ids(&first_page) {
        if seen.insert(id.clone()) {
            urls.push(format!("{DETAIL_URL_TEMPLATE}{id}"));
        }
    }

    for page in 2..=total_pages {
        // The host page repaginates in place through its own function.
        let _ = session.eval(&format!("carregaListaImoveis({page});"))?;

        let repopulated = poll_until("result list to repopulate", REPAGINATE_TIMEOUT, || {
            session.eval_bool(&format!(
                r#"document.querySelectorAll('{LISTING_CONTAINER} [onclick*="detalhe_imovel"]').length > 0"#
            ))
        });
        if let Err(e) = repopulated {
            warn!("Page {} did not repopulate in time ({:#}), proceeding after fixed delay", page, e);
            thread::sleep(REPAGINATE_FALLBACK);
        }

        let html = session.page_html()?;
        for id in extract_listing_ids(&html) {
            if seen.insert(id.clone()) {
                urls.push(format!("{DETAIL_URL_TEMPLATE}{id}"));
            }
        }
    }

    Ok(urls)
}

/// Read the total-page-count hint; absent or unparseable values mean one page.
pub fn page_count_hint(html: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(PAGE_COUNT_FIELD).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Pull listing identifiers out of the inline click handlers of the current
/// result page, in encounter order. Items whose handler lacks the expected
/// pattern are skipped.
pub fn extract_listing_ids(html: &str) -> Vec<String> {
    let re = Regex::new(ID_PATTERN).unwrap();
    let document = Html::parse_document(html);
    let selector = Selector::parse("[onclick]").unwrap();

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("onclick"))
        .filter_map(|onclick| re.captures(onclick))
        .map(|caps| caps[1].to_string())
        .collect()
}
