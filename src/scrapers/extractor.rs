//! Detail-page extraction: one loaded page in, one [`PropertyRecord`] out.
//!
//! The browser only captures the rendered document; every rule below works
//! on the HTML string, so the whole extraction logic runs in tests without
//! Chrome. Missing sections leave fields at their empty-string default.

use std::time::Duration;

use anyhow::Result;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::{debug, warn};

use crate::models::{CityContext, PropertyRecord};
use crate::scrapers::browser::Session;
use crate::text::{format_discount, normalize, parse_brl};

/// Main info block; parsing requires it to be present.
const CONTENT_CONTAINER: &str = "#dadosImovel";
const GALLERY: &str = "#galeria-imagens";
const RELATED_BOX: &str = ".related-box";

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(120);
const CONTENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Visit one detail page and extract its record.
///
/// Returns `None` on any navigation or load failure; the batch never aborts
/// for a single listing. Pacing between visits is the caller's concern.
pub fn fetch_detail(session: &Session, url: &str, ctx: &CityContext) -> Option<PropertyRecord> {
    debug!("Visiting {}", url);
    let attempt = || -> Result<PropertyRecord> {
        session.navigate(url)?;
        session.wait_for("body", NAVIGATION_TIMEOUT)?;
        session.wait_for(CONTENT_CONTAINER, CONTENT_TIMEOUT)?;
        let html = session.page_html()?;
        Ok(parse_detail(&html, ctx, url))
    };
    match attempt() {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Skipping listing {}: {:#}", url, e);
            None
        }
    }
}

/// Parse an already-captured detail page. Pure function over the HTML.
pub fn parse_detail(html: &str, ctx: &CityContext, page_url: &str) -> PropertyRecord {
    let document = Html::parse_document(html);
    let mut record = PropertyRecord::default();

    record.titulo = heading_title(&document);
    record.codigo = hidden_value(&document, "#hdnimovel");

    extract_monetary(&document, &mut record);
    apply_label_rules(&document, &mut record);
    extract_related_info(&document, &mut record);
    extract_paragraphs(&document, &mut record);
    extract_documents(&document, page_url, &mut record);
    record.imagens = extract_images(&document, page_url).join("|");

    if !record.endereco.is_empty() {
        let addr = decompose_address(&record.endereco);
        record.rua = addr.street;
        record.numero = addr.number;
        record.bairro = addr.neighborhood;
        record.cep = addr.postal_code;
        record.cidade = addr.city;
        record.estado = addr.state;
    }

    // Hidden location fields trump the caller context; the caller's city
    // name trumps the one derived from the address text.
    record.codigo_estado = prefer(hidden_value(&document, "#hdnEstado"), &ctx.region);
    record.codigo_cidade = prefer(hidden_value(&document, "#hdnCidade"), &ctx.city_code);
    record.codigo_bairro = hidden_value(&document, "#hdnBairro");
    if !ctx.city_name.is_empty() {
        record.cidade = ctx.city_name.clone();
    }

    record
}

fn prefer(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// Leading text node of the heading; the trailing badge inside the same
/// heading is a separate text node and stays out.
fn heading_title(document: &Html) -> String {
    let selector = Selector::parse("h5").unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.text().next())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

fn hidden_value(document: &Html, selector: &str) -> String {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("value"))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Monetary block: four independent extractions over the appraisal
/// paragraph. Listing templates are inconsistent: some show one minimum,
/// some two, some only the generic phrasing. The generic value is trusted
/// only when neither numbered variant matched.
fn extract_monetary(document: &Html, record: &mut PropertyRecord) {
    let p_sel = Selector::parse("p").unwrap();
    let Some(norm) = document
        .select(&p_sel)
        .map(|el| normalize(&el.text().collect::<Vec<_>>().join(" ")))
        .find(|text| text.contains("valor de avaliacao"))
    else {
        return;
    };

    let capture = |pattern: &str| -> Option<String> {
        Regex::new(pattern)
            .unwrap()
            .captures(&norm)
            .map(|caps| caps[1].to_string())
    };

    let appraisal = capture(r"valor de avaliacao[^:]*:\s*r\$\s*([\d.,]*\d)");
    let first = capture(r"valor minimo de venda\s*(?:do\s*)?1o\s*leilao\s*:?\s*r\$\s*([\d.,]*\d)");
    let second = capture(r"valor minimo de venda\s*(?:do\s*)?2o\s*leilao\s*:?\s*r\$\s*([\d.,]*\d)");
    let generic = capture(r"valor minimo de venda\s*:\s*r\$\s*([\d.,]*\d)");

    record.valor_avaliacao = appraisal.clone().unwrap_or_default();
    record.valor_minimo_primeiro_leilao = first.clone().unwrap_or_default();
    record.valor_minimo_segundo_leilao = second.clone().unwrap_or_default();
    record.valor_minimo_venda = generic.clone().unwrap_or_default();

    let numbered: Vec<String> = [first, second].into_iter().flatten().collect();
    let pool = if numbered.is_empty() {
        generic.into_iter().collect()
    } else {
        numbered
    };

    let overall = pool
        .into_iter()
        .filter_map(|text| parse_brl(&text).map(|value| (value, text)))
        .min_by(|a, b| a.0.total_cmp(&b.0));

    if let Some((minimum, text)) = overall {
        record.valor_minimo = text;
        if let Some(appraisal) = appraisal.as_deref().and_then(parse_brl) {
            record.desconto = format_discount(appraisal, minimum);
        }
    }
}

/// One declarative row of the label table: which line to look for, which
/// separators split label from value, and where the value lands.
struct LabelRule {
    label: &'static str,
    separators: &'static [char],
    strip_star: bool,
    set: fn(&mut PropertyRecord, String),
}

/// The two info columns render differently: one separates with ':', the
/// area column uses '=' when present (falling back to ':') and prefixes
/// values with an asterisk.
const LABEL_RULES: &[LabelRule] = &[
    LabelRule { label: "tipo de imovel", separators: &[':'], strip_star: false, set: |r, v| r.tipo_imovel = v },
    LabelRule { label: "quartos", separators: &[':'], strip_star: false, set: |r, v| r.quartos = v },
    LabelRule { label: "garagem", separators: &[':'], strip_star: false, set: |r, v| r.vagas_garagem = v },
    LabelRule { label: "numero do imovel", separators: &[':'], strip_star: false, set: |r, v| r.numero_imovel = v },
    LabelRule { label: "matricula(s)", separators: &[':'], strip_star: false, set: |r, v| r.matricula = v },
    LabelRule { label: "comarca", separators: &[':'], strip_star: false, set: |r, v| r.comarca = v },
    LabelRule { label: "oficio", separators: &[':'], strip_star: false, set: |r, v| r.oficio = v },
    LabelRule { label: "inscricao imobiliaria", separators: &[':'], strip_star: false, set: |r, v| r.inscricao_imobiliaria = v },
    LabelRule { label: "averbacao do leilao negativo", separators: &[':'], strip_star: false, set: |r, v| r.averbacao_leilao_negativo = v },
    LabelRule { label: "area total", separators: &['=', ':'], strip_star: true, set: |r, v| r.area_total = v },
    LabelRule { label: "area privativa", separators: &['=', ':'], strip_star: true, set: |r, v| r.area_privativa = v },
    LabelRule { label: "area do terreno", separators: &['=', ':'], strip_star: true, set: |r, v| r.area_terreno = v },
];

fn apply_label_rules(document: &Html, record: &mut PropertyRecord) {
    let lines = container_lines(document);
    for rule in LABEL_RULES {
        let Some(line) = lines
            .iter()
            .find(|line| normalize(line).contains(rule.label))
        else {
            continue;
        };
        let Some(pos) = rule
            .separators
            .iter()
            .find_map(|sep| line.find(*sep))
        else {
            continue;
        };
        let mut value = line[pos + 1..].trim().to_string();
        if rule.strip_star {
            value = value.trim_start_matches(['*', ' ']).to_string();
        }
        if !value.is_empty() {
            (rule.set)(record, value);
        }
    }
}

/// Text lines of the main info block, trimmed and non-empty.
fn container_lines(document: &Html) -> Vec<String> {
    let selector = Selector::parse(CONTENT_CONTAINER).unwrap();
    let Some(container) = document.select(&selector).next() else {
        return Vec::new();
    };
    container
        .text()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Auction metadata block: bolded auction type, labeled spans, and the two
/// auction-date sentences, which are kept verbatim rather than stripped.
fn extract_related_info(document: &Html, record: &mut PropertyRecord) {
    let box_sel = Selector::parse(RELATED_BOX).unwrap();
    let Some(related) = document.select(&box_sel).next() else {
        return;
    };

    let b_sel = Selector::parse("b").unwrap();
    if let Some(b) = related.select(&b_sel).next() {
        record.tipo_leilao = b.text().collect::<String>().trim().to_string();
    }

    let edital_re = Regex::new(r"(?i)^\s*edital\s*:?\s*").unwrap();
    let leiloeiro_re = Regex::new(r"(?i)^\s*leiloeiro\(?a?\)?\s*:?\s*").unwrap();
    let item_re = Regex::new(r"(?i)^\s*n[úu]mero\s+do\s+item\s*:?\s*").unwrap();

    let span_sel = Selector::parse("span").unwrap();
    for span in related.select(&span_sel) {
        let line = span.text().collect::<Vec<_>>().join(" ").trim().to_string();
        if line.is_empty() {
            continue;
        }
        let norm = normalize(&line);
        if norm.starts_with("edital") && record.edital.is_empty() {
            record.edital = edital_re.replace(&line, "").trim().to_string();
        } else if norm.starts_with("leiloeiro") && record.leiloeiro.is_empty() {
            record.leiloeiro = leiloeiro_re.replace(&line, "").trim().to_string();
        } else if norm.starts_with("numero do item") && record.numero_item.is_empty() {
            record.numero_item = item_re.replace(&line, "").trim().to_string();
        } else if norm.contains("data do 1o leilao") && record.data_primeiro_leilao.is_empty() {
            record.data_primeiro_leilao = line;
        } else if norm.contains("data do 2o leilao") && record.data_segundo_leilao.is_empty() {
            record.data_segundo_leilao = line;
        }
    }
}

/// Address, description and payment-terms paragraphs.
fn extract_paragraphs(document: &Html, record: &mut PropertyRecord) {
    let p_sel = Selector::parse("p").unwrap();
    for p in document.select(&p_sel) {
        let line = p.text().collect::<Vec<_>>().join(" ").trim().to_string();
        let norm = normalize(&line);
        if norm.starts_with("endereco:") && record.endereco.is_empty() {
            record.endereco = after_colon(&line);
        } else if norm.starts_with("descricao:") && record.descricao.is_empty() {
            record.descricao = after_colon(&line);
        } else if norm.contains("formas de pagamento aceitas") && record.formas_pagamento.is_empty() {
            record.formas_pagamento = line;
        }
    }
}

fn after_colon(line: &str) -> String {
    line.splitn(2, ':').nth(1).unwrap_or("").trim().to_string()
}

/// Document links: both anchors carry the path inside the viewer-function
/// call of their click handler, resolved against the page's own origin.
fn extract_documents(document: &Html, page_url: &str, record: &mut PropertyRecord) {
    let path_re = Regex::new(r"ExibeDoc\(\s*'([^']+)'").unwrap();
    let a_sel = Selector::parse("a").unwrap();

    for a in document.select(&a_sel) {
        let onclick = a.value().attr("onclick").unwrap_or("");
        if onclick.contains("ExibeDoc") && onclick.contains("/matricula/") && record.link_matricula.is_empty() {
            if let Some(caps) = path_re.captures(onclick) {
                record.link_matricula = absolutize(page_url, &caps[1]);
            }
            continue;
        }
        let text = normalize(&a.text().collect::<Vec<_>>().join(" "));
        if text == "baixar edital" && record.link_edital.is_empty() {
            if let Some(caps) = path_re.captures(onclick) {
                record.link_edital = absolutize(page_url, &caps[1]);
            }
        }
    }
}

/// Gallery images in encounter order; lazy-load attributes are fallbacks
/// for the plain source attribute. Empty candidates are dropped.
fn extract_images(document: &Html, page_url: &str) -> Vec<String> {
    let selector = Selector::parse(&format!("{GALLERY} img")).unwrap();
    document
        .select(&selector)
        .filter_map(|img| {
            let el = img.value();
            el.attr("src")
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .or_else(|| el.attr("data-lazy").map(str::trim).filter(|s| !s.is_empty()))
                .or_else(|| el.attr("data-src").map(str::trim).filter(|s| !s.is_empty()))
                .or_else(|| el.attr("data-original").map(str::trim).filter(|s| !s.is_empty()))
                .map(|src| absolutize(page_url, src))
        })
        .collect()
}

/// Resolve a possibly relative path against the page URL, keeping the raw
/// string when resolution fails.
fn absolutize(page_url: &str, path: &str) -> String {
    Url::parse(page_url)
        .ok()
        .and_then(|base| base.join(path).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Sub-fields heuristically split out of one address line.
#[derive(Debug, Default, PartialEq)]
pub struct AddressParts {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub postal_code: String,
    pub city: String,
    pub state: String,
}

/// Comma-delimited address decomposition. Addresses off the convention
/// yield partially empty sub-fields, never an error.
pub fn decompose_address(address: &str) -> AddressParts {
    let mut out = AddressParts::default();

    let cep_re = Regex::new(r"(?i)CEP:\s*([0-9-]+)").unwrap();
    let remainder = match cep_re.captures(address) {
        Some(caps) => {
            out.postal_code = caps[1].to_string();
            cep_re.replace(address, "").to_string()
        }
        None => address.to_string(),
    };

    let parts: Vec<&str> = remainder
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if let Some(street) = parts.first() {
        out.street = street.to_string();
    }
    if let Some(number_part) = parts.get(1) {
        let num_re = Regex::new(r"(?i)n[ºo°.]*\s*(\d+)").unwrap();
        if let Some(caps) = num_re.captures(number_part) {
            out.number = caps[1].to_string();
        }
    }
    if let Some(neighborhood) = parts.get(2) {
        out.neighborhood = neighborhood.trim_end_matches('-').trim().to_string();
    }
    if parts.len() >= 4 {
        let last = parts[parts.len() - 1];
        let city_re = Regex::new(r"^(.*?)\s*-\s*([A-Za-z]{2})$").unwrap();
        match city_re.captures(last) {
            Some(caps) => {
                out.city = caps[1].trim().to_string();
                out.state = caps[2].to_uppercase();
            }
            None => out.city = last.to_string(),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str =
        "https://venda-imoveis.caixa.gov.br/sistema/detalhe-imovel.asp?hdnimovel=8444408556557";

    fn ctx() -> CityContext {
        CityContext {
            region: "RO".into(),
            city_code: "5075".into(),
            city_name: "Porto Velho".into(),
        }
    }

    fn detail_page(monetary: &str) -> String {
        format!(
            r##"<html><body>
            <div id="dadosImovel">
              <h5> Casa em Porto Velho <span class="badge">Desocupado</span></h5>
              <input type="hidden" id="hdnimovel" value="8444408556557">
              <input type="hidden" id="hdnEstado" value="RO">
              <input type="hidden" id="hdnCidade" value="5075">
              <input type="hidden" id="hdnBairro" value="310">
              <p>{monetary}</p>
              <div class="control-item">
                <span>Tipo de imóvel: Casa</span>
                <span>Quartos: 3</span>
                <span>Garagem: 2</span>
                <span>Número do imóvel: 0001.234567-8</span>
                <span>Matrícula(s): 12345</span>
                <span>Comarca: PORTO VELHO</span>
                <span>Ofício: 1º Ofício de Registro</span>
                <span>Inscrição imobiliária: 99.88.77</span>
              </div>
              <div class="control-item">
                <span>* Área total = 426,00m²</span>
                <span>* Área privativa = 120,00m²</span>
                <span>* Área do terreno = 300,00m²</span>
              </div>
              <div class="related-box">
                <b>Leilão SFI - Edital Único</b>
                <span>Edital: 0001/2025-RO</span>
                <span>Leiloeiro(a): FULANO DE TAL</span>
                <span>Número do item: 42</span>
                <span>Data do 1º Leilão - 10/09/2025 às 10h00</span>
                <span>Data do 2º Leilão - 25/09/2025 às 10h00</span>
                <p>Endereço: Rua A, Nº 123, Bairro B, CEP: 12345-000, Cidade C - RO</p>
                <p>Descrição: Casa com quintal.</p>
                <p>FORMAS DE PAGAMENTO ACEITAS: somente à vista.</p>
                <a onclick="ExibeDoc('/editais/matricula/12345.pdf')">Ver matrícula do imóvel</a>
                <a onclick="ExibeDoc('/editais/EDITAL-0001.pdf')">BAIXAR EDITAL</a>
              </div>
              <div id="galeria-imagens">
                <img src="/fotos/F1.jpg">
                <img data-lazy="/fotos/F2.jpg">
                <img data-src="/fotos/F3.jpg">
                <img data-original="https://cdn.example.test/F4.jpg">
                <img src="">
              </div>
            </div>
            </body></html>"##
        )
    }

    #[test]
    fn extracts_title_code_and_labels() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.titulo, "Casa em Porto Velho");
        assert_eq!(record.codigo, "8444408556557");
        assert_eq!(record.tipo_imovel, "Casa");
        assert_eq!(record.quartos, "3");
        assert_eq!(record.vagas_garagem, "2");
        assert_eq!(record.numero_imovel, "0001.234567-8");
        assert_eq!(record.matricula, "12345");
        assert_eq!(record.comarca, "PORTO VELHO");
        assert_eq!(record.oficio, "1º Ofício de Registro");
        assert_eq!(record.inscricao_imobiliaria, "99.88.77");
    }

    #[test]
    fn area_column_uses_equals_and_strips_star() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.area_total, "426,00m²");
        assert_eq!(record.area_privativa, "120,00m²");
        assert_eq!(record.area_terreno, "300,00m²");
    }

    #[test]
    fn overall_minimum_is_smaller_numbered_variant() {
        let html = detail_page(
            "Valor de avaliação: R$ 100.000,00. \
             Valor mínimo de venda 1º Leilão: R$ 90.000,00. \
             Valor mínimo de venda 2º Leilão: R$ 80.000,00.",
        );
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.valor_avaliacao, "100.000,00");
        assert_eq!(record.valor_minimo_primeiro_leilao, "90.000,00");
        assert_eq!(record.valor_minimo_segundo_leilao, "80.000,00");
        assert_eq!(record.valor_minimo, "80.000,00");
        assert_eq!(record.desconto, "20,00%");
    }

    #[test]
    fn generic_minimum_ignored_when_numbered_present() {
        let html = detail_page(
            "Valor de avaliação: R$ 100.000,00. \
             Valor mínimo de venda 1º Leilão: R$ 90.000,00. \
             Valor mínimo de venda 2º Leilão: R$ 80.000,00. \
             Valor mínimo de venda: R$ 10.000,00.",
        );
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.valor_minimo_venda, "10.000,00");
        assert_eq!(record.valor_minimo, "80.000,00");
    }

    #[test]
    fn generic_minimum_used_when_alone() {
        let html = detail_page(
            "Valor de avaliação: R$ 100.000,00. Valor mínimo de venda: R$ 75.000,00.",
        );
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.valor_minimo, "75.000,00");
        assert_eq!(record.desconto, "25,00%");
    }

    #[test]
    fn related_info_block_is_parsed() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.tipo_leilao, "Leilão SFI - Edital Único");
        assert_eq!(record.edital, "0001/2025-RO");
        assert_eq!(record.leiloeiro, "FULANO DE TAL");
        assert_eq!(record.numero_item, "42");
        // Date sentences are kept whole, not label-stripped.
        assert_eq!(record.data_primeiro_leilao, "Data do 1º Leilão - 10/09/2025 às 10h00");
        assert_eq!(record.data_segundo_leilao, "Data do 2º Leilão - 25/09/2025 às 10h00");
        assert_eq!(record.descricao, "Casa com quintal.");
        assert_eq!(record.formas_pagamento, "FORMAS DE PAGAMENTO ACEITAS: somente à vista.");
    }

    #[test]
    fn document_links_resolve_against_origin() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(
            record.link_matricula,
            "https://venda-imoveis.caixa.gov.br/editais/matricula/12345.pdf"
        );
        assert_eq!(
            record.link_edital,
            "https://venda-imoveis.caixa.gov.br/editais/EDITAL-0001.pdf"
        );
    }

    #[test]
    fn images_join_with_pipe_in_encounter_order() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(
            record.imagens,
            "https://venda-imoveis.caixa.gov.br/fotos/F1.jpg\
             |https://venda-imoveis.caixa.gov.br/fotos/F2.jpg\
             |https://venda-imoveis.caixa.gov.br/fotos/F3.jpg\
             |https://cdn.example.test/F4.jpg"
        );
    }

    #[test]
    fn address_feeds_sub_fields_with_caller_city_name_preferred() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let record = parse_detail(&html, &ctx(), PAGE_URL);

        assert_eq!(record.endereco, "Rua A, Nº 123, Bairro B, CEP: 12345-000, Cidade C - RO");
        assert_eq!(record.rua, "Rua A");
        assert_eq!(record.numero, "123");
        assert_eq!(record.bairro, "Bairro B");
        assert_eq!(record.cep, "12345-000");
        assert_eq!(record.estado, "RO");
        // Caller context wins over the address-derived city name.
        assert_eq!(record.cidade, "Porto Velho");
    }

    #[test]
    fn hidden_location_codes_override_context() {
        let html = detail_page("Valor de avaliação: R$ 100.000,00");
        let other = CityContext {
            region: "SP".into(),
            city_code: "9999".into(),
            city_name: "Outra".into(),
        };
        let record = parse_detail(&html, &other, PAGE_URL);

        assert_eq!(record.codigo_estado, "RO");
        assert_eq!(record.codigo_cidade, "5075");
        assert_eq!(record.codigo_bairro, "310");
    }

    #[test]
    fn empty_page_yields_defaults_plus_context_codes() {
        let record = parse_detail("<html><body></body></html>", &ctx(), PAGE_URL);

        assert_eq!(record.titulo, "");
        assert_eq!(record.valor_minimo, "");
        assert_eq!(record.desconto, "");
        assert_eq!(record.imagens, "");
        // Without hidden fields the caller context fills the codes.
        assert_eq!(record.codigo_estado, "RO");
        assert_eq!(record.codigo_cidade, "5075");
        assert_eq!(record.cidade, "Porto Velho");
    }

    #[test]
    fn decomposes_full_address() {
        let parts = decompose_address("Rua A, Nº 123, Bairro B, CEP: 12345-000, Cidade C - RO");
        assert_eq!(
            parts,
            AddressParts {
                street: "Rua A".into(),
                number: "123".into(),
                neighborhood: "Bairro B".into(),
                postal_code: "12345-000".into(),
                city: "Cidade C".into(),
                state: "RO".into(),
            }
        );
    }

    #[test]
    fn short_address_leaves_city_empty() {
        let parts = decompose_address("Rua A, Nº 45, Centro");
        assert_eq!(parts.street, "Rua A");
        assert_eq!(parts.number, "45");
        assert_eq!(parts.neighborhood, "Centro");
        assert_eq!(parts.city, "");
        assert_eq!(parts.state, "");
    }

    #[test]
    fn address_without_state_pattern_keeps_city_only() {
        let parts = decompose_address("Rua A, Nº 45, Centro -, Cidade C");
        assert_eq!(parts.neighborhood, "Centro");
        assert_eq!(parts.city, "Cidade C");
        assert_eq!(parts.state, "");
    }
}
