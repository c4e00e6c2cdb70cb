use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::DashboardError;

pub const ABSENT: &str = "Ausente";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DoencaMencionada,
    Substancias,
    ResponsavelTecnico,
    AutoridadeCitada,
    Autorizacoes,
    TipoDeProduto,
    VariacaoTipografica,
    Ilustracao,
    Moldura,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Tab {
    Discourse,
    GraphicDesign,
}

impl Category {
    pub const ALL: [Self; 9] = [
        Self::DoencaMencionada,
        Self::Substancias,
        Self::ResponsavelTecnico,
        Self::AutoridadeCitada,
        Self::Autorizacoes,
        Self::TipoDeProduto,
        Self::VariacaoTipografica,
        Self::Ilustracao,
        Self::Moldura,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Self::DoencaMencionada => "doenca_mencionada",
            Self::Substancias => "substancias",
            Self::ResponsavelTecnico => "responsavel_tecnico",
            Self::AutoridadeCitada => "autoridade_citada",
            Self::Autorizacoes => "autorizacoes",
            Self::TipoDeProduto => "tipo_de_produto",
            Self::VariacaoTipografica => "variacao_tipografica",
            Self::Ilustracao => "ilustracao",
            Self::Moldura => "moldura",
        }
    }

    pub fn column(self) -> &'static str {
        self.table()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DoencaMencionada => "Doença mencionada",
            Self::Substancias => "Substâncias",
            Self::ResponsavelTecnico => "Responsável técnico",
            Self::AutoridadeCitada => "Autoridade citada",
            Self::Autorizacoes => "Autorizações",
            Self::TipoDeProduto => "Tipo de produto",
            Self::VariacaoTipografica => "Variação tipográfica",
            Self::Ilustracao => "Ilustração",
            Self::Moldura => "Moldura",
        }
    }

    pub fn tab(self) -> Tab {
        match self {
            Self::VariacaoTipografica | Self::Ilustracao | Self::Moldura => Tab::GraphicDesign,
            _ => Tab::Discourse,
        }
    }

    pub fn is_multi_valued(self) -> bool {
        matches!(
            self,
            Self::DoencaMencionada | Self::Substancias | Self::AutoridadeCitada
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Category {
    type Err = DashboardError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|category| category.table() == normalized)
            .ok_or_else(|| DashboardError::MalformedCategory {
                name: name.to_string(),
            })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    Ads,
    Placements,
}

impl Basis {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ads => "ads",
            Self::Placements => "placements",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Ads => "Anúncios",
            Self::Placements => "Veiculações",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SentinelPolicy {
    Keep,
    Exclude,
}

impl SentinelPolicy {
    pub fn keeps(self, value: &str) -> bool {
        match self {
            Self::Keep => true,
            Self::Exclude => value != ABSENT,
        }
    }
}

pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_accepts_table_names_and_cli_spelling() {
        assert_eq!(
            "doenca_mencionada".parse::<Category>().unwrap(),
            Category::DoencaMencionada
        );
        assert_eq!(
            "Tipo-De-Produto".parse::<Category>().unwrap(),
            Category::TipoDeProduto
        );
    }

    #[test]
    fn from_str_rejects_names_outside_allow_list() {
        let err = "anuncios; DROP TABLE veiculacoes"
            .parse::<Category>()
            .unwrap_err();
        assert!(matches!(err, DashboardError::MalformedCategory { .. }));
    }

    #[test]
    fn every_category_maps_to_a_plain_identifier() {
        for category in Category::ALL {
            assert!(
                category
                    .table()
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_'),
                "{category}"
            );
            assert_eq!(category.column(), category.table());
        }
    }

    #[test]
    fn graphic_design_categories_are_grouped_together() {
        let design = Category::ALL
            .into_iter()
            .filter(|category| category.tab() == Tab::GraphicDesign)
            .collect::<Vec<_>>();
        assert_eq!(
            design,
            vec![
                Category::VariacaoTipografica,
                Category::Ilustracao,
                Category::Moldura
            ]
        );
    }

    #[test]
    fn sentinel_policy_only_filters_absent() {
        assert!(!SentinelPolicy::Exclude.keeps(ABSENT));
        assert!(SentinelPolicy::Exclude.keeps("Febre"));
        assert!(SentinelPolicy::Keep.keeps(ABSENT));
    }

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("Página"), "\"Página\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
