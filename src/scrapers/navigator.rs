//! Drives the search form: region selection, the asynchronously populated
//! city dropdown, and the wizard steps leading to a city's listing page.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::CityEntry;
use crate::scrapers::browser::{poll_until, Session};

const SEARCH_URL: &str = "https://venda-imoveis.caixa.gov.br/sistema/busca-imovel.asp?sltTipoBusca=imoveis";

const REGION_SELECT: &str = "#cmb_estado";
const CITY_SELECT: &str = "#cmb_cidade";

/// Wizard "next" affordances, clicked in order when present.
const NEXT_BUTTONS: [&str; 2] = ["#btn_next0", "#btn_next1"];

/// Container holding the paginated result list.
pub const LISTING_CONTAINER: &str = "#listaimoveispaginacao";

/// Message shown instead of the list when a city has no listings.
const NO_RESULTS_TEXT: &str = "imóveis encontrados: 0";

/// Population of the dependent city dropdown is driven by the host page's
/// own change handler; this bounds how long we wait for it.
const DROPDOWN_TIMEOUT: Duration = Duration::from_secs(60);

/// Bound on each wizard-step wait. Exceeding it degrades, it does not fail.
const WIZARD_TIMEOUT: Duration = Duration::from_secs(60);

/// Load the search entry page and dismiss consent overlays if any are up.
/// Overlay handling is best-effort; a missing dialog is not an error.
pub fn open_search(session: &Session) -> Result<()> {
    session
        .navigate(SEARCH_URL)
        .context("Failed to open the search page")?;

    let _ = session.eval(
        r#"
        (() => {
            const selectors = ['#cookiebanner button', '.cc-btn', 'button[id*="accept"]'];
            for (const sel of selectors) {
                const btn = document.querySelector(sel);
                if (btn) btn.click();
            }
        })();
        "#,
    );

    Ok(())
}

/// Select the region and block until the city dropdown gains at least one
/// eligible option. Assigning the value alone does nothing: the host page
/// fills the dependent dropdown from its own `change` handler, so the event
/// must be dispatched explicitly.
///
/// A timeout here is fatal for this region's processing.
pub fn select_region(session: &Session, region: &str) -> Result<()> {
    debug!("Selecting region {}", region);
    let _ = session.eval(&format!(
        r#"
        (() => {{
            const sel = document.querySelector('{REGION_SELECT}');
            sel.value = '{region}';
            sel.dispatchEvent(new Event('change'));
        }})();
        "#
    ))?;

    poll_until("city dropdown options", DROPDOWN_TIMEOUT, || {
        session.eval_bool(&format!(
            r#"
            (() => {{
                const sel = document.querySelector('{CITY_SELECT}');
                if (!sel) return false;
                return Array.from(sel.options)
                    .some(o => o.value && o.value.trim() !== '' && o.value !== '0');
            }})()
            "#
        ))
    })
}

/// Read the populated city dropdown. Sentinel placeholder options are skipped.
pub fn list_cities(session: &Session) -> Result<Vec<CityEntry>> {
    let value = session
        .eval(&format!(
            r#"
            (() => {{
                const sel = document.querySelector('{CITY_SELECT}');
                if (!sel) return '[]';
                const cities = Array.from(sel.options)
                    .filter(o => o.value && o.value.trim() !== '' && o.value !== '0')
                    .map(o => ({{ code: o.value, displayName: o.text.trim() }}));
                return JSON.stringify(cities);
            }})()
            "#
        ))?
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| "[]".to_string());

    let cities: Vec<CityEntry> =
        serde_json::from_str(&value).context("Failed to parse city dropdown options")?;
    Ok(cities)
}

/// Select the target city and click through the wizard until the listing
/// page (or its "no results" message) is up.
///
/// Wait timeouts inside the wizard are logged and swallowed: the collector
/// re-checks for listing presence directly, so proceeding is safe.
pub fn select_city(session: &Session, city_code: &str) -> Result<()> {
    debug!("Selecting city {}", city_code);
    let _ = session.eval(&format!(
        r#"
        (() => {{
            const sel = document.querySelector('{CITY_SELECT}');
            sel.value = '{city_code}';
            sel.dispatchEvent(new Event('change'));
        }})();
        "#
    ))?;

    // Give the host page a moment to react before the wizard buttons appear.
    thread::sleep(Duration::from_secs(2));

    for button in NEXT_BUTTONS {
        let clicked = session.eval_bool(&format!(
            r#"
            (() => {{
                const btn = document.querySelector('{button}');
                if (!btn) return false;
                btn.click();
                return true;
            }})()
            "#
        ))?;
        if !clicked {
            continue;
        }

        let wait = poll_until("listing container or empty-result message", WIZARD_TIMEOUT, || {
            session.eval_bool(&format!(
                r#"
                (() => {{
                    if (document.querySelector('{LISTING_CONTAINER}')) return true;
                    return document.body.innerText.includes('{NO_RESULTS_TEXT}');
                }})()
                "#
            ))
        });
        if let Err(e) = wait {
            warn!("Wizard step after {} did not settle: {:#}", button, e);
        }
    }

    Ok(())
}
