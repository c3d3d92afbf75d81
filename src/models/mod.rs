use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One option read from the city dropdown after a region is chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityEntry {
    pub code: String,
    pub display_name: String,
}

/// Detail-page URLs collected for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityUrls {
    pub city_name: String,
    pub urls: Vec<String>,
}

/// The intermediate artifact: city code -> collected detail-page URLs.
/// Serialized once as `urls_<region>_por_cidade.json`.
pub type CityUrlIndex = BTreeMap<String, CityUrls>;

/// City context carried into detail extraction.
#[derive(Debug, Clone)]
pub struct CityContext {
    pub region: String,
    pub city_code: String,
    pub city_name: String,
}

/// One extracted property listing.
///
/// Every field is a plain string defaulting to empty; partial extraction is
/// the normal case. Field order here is the spreadsheet column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub codigo: String,
    pub titulo: String,
    pub valor_avaliacao: String,
    pub valor_minimo_primeiro_leilao: String,
    pub valor_minimo_segundo_leilao: String,
    pub valor_minimo_venda: String,
    pub valor_minimo: String,
    pub desconto: String,
    pub tipo_imovel: String,
    pub quartos: String,
    pub vagas_garagem: String,
    pub numero_imovel: String,
    pub matricula: String,
    pub comarca: String,
    pub oficio: String,
    pub inscricao_imobiliaria: String,
    pub averbacao_leilao_negativo: String,
    pub area_total: String,
    pub area_privativa: String,
    pub area_terreno: String,
    pub tipo_leilao: String,
    pub edital: String,
    pub leiloeiro: String,
    pub numero_item: String,
    pub data_primeiro_leilao: String,
    pub data_segundo_leilao: String,
    pub endereco: String,
    pub rua: String,
    pub numero: String,
    pub bairro: String,
    pub cep: String,
    pub cidade: String,
    pub estado: String,
    pub descricao: String,
    pub formas_pagamento: String,
    pub link_matricula: String,
    pub link_edital: String,
    pub imagens: String,
    pub codigo_estado: String,
    pub codigo_cidade: String,
    pub codigo_bairro: String,
}

/// Spreadsheet header row. Must stay in lockstep with [`PropertyRecord::to_row`].
pub const FIELD_HEADERS: [&str; 41] = [
    "codigo",
    "titulo",
    "valor_avaliacao",
    "valor_minimo_primeiro_leilao",
    "valor_minimo_segundo_leilao",
    "valor_minimo_venda",
    "valor_minimo",
    "desconto",
    "tipo_imovel",
    "quartos",
    "vagas_garagem",
    "numero_imovel",
    "matricula",
    "comarca",
    "oficio",
    "inscricao_imobiliaria",
    "averbacao_leilao_negativo",
    "area_total",
    "area_privativa",
    "area_terreno",
    "tipo_leilao",
    "edital",
    "leiloeiro",
    "numero_item",
    "data_primeiro_leilao",
    "data_segundo_leilao",
    "endereco",
    "rua",
    "numero",
    "bairro",
    "cep",
    "cidade",
    "estado",
    "descricao",
    "formas_pagamento",
    "link_matricula",
    "link_edital",
    "imagens",
    "codigo_estado",
    "codigo_cidade",
    "codigo_bairro",
];

impl PropertyRecord {
    /// Values in the fixed spreadsheet column order, one per header.
    pub fn to_row(&self) -> [&str; 41] {
        [
            &self.codigo,
            &self.titulo,
            &self.valor_avaliacao,
            &self.valor_minimo_primeiro_leilao,
            &self.valor_minimo_segundo_leilao,
            &self.valor_minimo_venda,
            &self.valor_minimo,
            &self.desconto,
            &self.tipo_imovel,
            &self.quartos,
            &self.vagas_garagem,
            &self.numero_imovel,
            &self.matricula,
            &self.comarca,
            &self.oficio,
            &self.inscricao_imobiliaria,
            &self.averbacao_leilao_negativo,
            &self.area_total,
            &self.area_privativa,
            &self.area_terreno,
            &self.tipo_leilao,
            &self.edital,
            &self.leiloeiro,
            &self.numero_item,
            &self.data_primeiro_leilao,
            &self.data_segundo_leilao,
            &self.endereco,
            &self.rua,
            &self.numero,
            &self.bairro,
            &self.cep,
            &self.cidade,
            &self.estado,
            &self.descricao,
            &self.formas_pagamento,
            &self.link_matricula,
            &self.link_edital,
            &self.imagens,
            &self.codigo_estado,
            &self.codigo_cidade,
            &self.codigo_bairro,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_matches_header_schema() {
        // A default record still produces every column, all empty.
        let record = PropertyRecord::default();
        let row = record.to_row();
        assert_eq!(row.len(), FIELD_HEADERS.len());
        assert!(row.iter().all(|v| v.is_empty()));
    }

    #[test]
    fn row_order_follows_headers() {
        let record = PropertyRecord {
            codigo: "8444408556557".into(),
            codigo_bairro: "99".into(),
            ..Default::default()
        };
        let row = record.to_row();
        assert_eq!(row[0], "8444408556557");
        assert_eq!(row[FIELD_HEADERS.len() - 1], "99");
        assert_eq!(FIELD_HEADERS[0], "codigo");
        assert_eq!(FIELD_HEADERS[FIELD_HEADERS.len() - 1], "codigo_bairro");
    }

    #[test]
    fn city_urls_serializes_camel_case() {
        let entry = CityUrls {
            city_name: "Porto Velho".into(),
            urls: vec!["https://example.test/detalhe?hdnimovel=1".into()],
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["cityName"], "Porto Velho");
        assert_eq!(json["urls"].as_array().unwrap().len(), 1);
    }
}
