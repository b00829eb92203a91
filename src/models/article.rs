use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{default_true, validate_non_negative_decimal, validate_percentage};
use crate::client::Resource;
use crate::table::{CellValue, Column, Tabular};

/// Whether an article is bought as-is or assembled from other articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ArticleType {
    Component,
    #[serde(alias = "BOM")]
    #[strum(serialize = "BOM")]
    Bom,
}

/// A component line of a bill-of-materials article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArticleComponent {
    pub component_id: Uuid,
    #[serde(default)]
    pub component_code: Option<String>,
    #[validate(custom = "validate_non_negative_decimal")]
    pub quantity: Decimal,
    #[validate(custom = "validate_non_negative_decimal")]
    pub unit_price: Decimal,
}

impl ArticleComponent {
    pub fn cost(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// A purchasable or sellable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub article_type: ArticleType,
    #[serde(default)]
    pub family_id: Option<Uuid>,
    #[serde(default)]
    pub provider_id: Option<Uuid>,
    /// Price paid to the provider.
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub purchasing_price: Decimal,
    /// Cost base the margin is applied to.
    #[serde(default)]
    #[validate(custom = "validate_non_negative_decimal")]
    pub amount: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_percentage")]
    pub margin: Option<Decimal>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    #[validate]
    pub components: Vec<ArticleComponent>,
}

impl Article {
    pub fn is_bom(&self) -> bool {
        self.article_type == ArticleType::Bom
    }

    /// Sum of the component costs. Plain components have no bill of materials.
    pub fn bom_cost(&self) -> Decimal {
        self.components.iter().map(ArticleComponent::cost).sum()
    }

    /// `amount` raised by the margin percentage.
    pub fn sale_price(&self) -> Decimal {
        let margin = self.margin.unwrap_or(Decimal::ZERO);
        self.amount * (Decimal::ONE + margin / Decimal::ONE_HUNDRED)
    }
}

impl Resource for Article {
    const PATH: &'static str = "article";
    const LABEL: &'static str = "Article";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Article {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |a: &Article| a.code.as_str().into()),
            Column::new("description", "Description", |a: &Article| {
                a.description.as_str().into()
            }),
            Column::new("type", "Type", |a: &Article| a.article_type.to_string().into()),
            Column::new("purchasingPrice", "Purchasing price", |a: &Article| {
                a.purchasing_price.into()
            }),
            Column::new("salePrice", "Sale price", |a: &Article| a.sale_price().into()),
            Column::new("active", "Active", |a: &Article| CellValue::Bool(a.active))
                .not_filterable(),
        ]
    }
}
