use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::default_one;
use super::invoice::SalesLine;
use crate::client::Resource;
use crate::services::assembly;
use crate::services::pricing::{compute_totals, line_total, DocumentTotals, PriceLine, Priced};
use crate::table::{Column, Tabular};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum BudgetStatus {
    Pending,
    Accepted,
    Rejected,
    Closed,
}

/// An article placed somewhere in an assembly budget tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyArticle {
    pub id: Uuid,
    #[serde(default)]
    pub article_id: Option<Uuid>,
    #[serde(default)]
    pub code: Option<String>,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount: Option<Decimal>,
    #[serde(default)]
    pub tax_percentage: Option<Decimal>,
}

impl Priced for AssemblyArticle {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    fn discount(&self) -> Option<Decimal> {
        self.discount
    }

    fn tax_percentage(&self) -> Option<Decimal> {
        self.tax_percentage
    }
}

/// A folder groups articles and other folders. Its quantity multiplies
/// everything beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyFolder {
    pub id: Uuid,
    pub description: String,
    #[serde(default = "default_one")]
    pub quantity: Decimal,
    #[serde(default)]
    pub children: Vec<AssemblyNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum AssemblyNode {
    Folder(AssemblyFolder),
    Article(AssemblyArticle),
}

impl AssemblyNode {
    pub fn id(&self) -> Uuid {
        match self {
            AssemblyNode::Folder(folder) => folder.id,
            AssemblyNode::Article(article) => article.id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            AssemblyNode::Folder(folder) => &folder.description,
            AssemblyNode::Article(article) => &article.description,
        }
    }

    /// Line total of an article, or folder quantity times its children's totals.
    pub fn total(&self) -> Decimal {
        match self {
            AssemblyNode::Article(article) => {
                line_total(article.quantity, article.unit_price, article.discount)
            }
            AssemblyNode::Folder(folder) => {
                folder.quantity * folder.children.iter().map(AssemblyNode::total).sum::<Decimal>()
            }
        }
    }
}

fn validate_assembly(nodes: &[AssemblyNode]) -> Result<(), ValidationError> {
    for node in assembly::flatten(nodes) {
        if node.description.trim().is_empty() {
            let mut err = ValidationError::new("assembly_description");
            err.message = Some("Every assembly node needs a description".into());
            return Err(err);
        }
        if node.quantity < Decimal::ZERO {
            let mut err = ValidationError::new("assembly_quantity");
            err.message = Some("Assembly quantities must not be negative".into());
            return Err(err);
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    pub customer_id: Uuid,
    pub date: DateTime<Utc>,
    pub status: BudgetStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[validate]
    pub items: Vec<SalesLine>,
    /// Folder/article tree of an assembly budget. Empty for plain budgets.
    #[serde(default)]
    #[validate(custom = "validate_assembly")]
    pub assembly: Vec<AssemblyNode>,
}

impl Budget {
    pub fn is_assembly(&self) -> bool {
        !self.assembly.is_empty()
    }

    /// Totals over the plain items plus every assembly article at its effective
    /// quantity.
    pub fn totals(&self) -> DocumentTotals {
        let items = self.items.iter().map(PriceLine::of);
        let assembly = assembly::price_lines(&self.assembly);
        compute_totals(items.chain(assembly))
    }
}

impl Resource for Budget {
    const PATH: &'static str = "budget";
    const LABEL: &'static str = "Budget";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Tabular for Budget {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("code", "Code", |b: &Budget| b.code.as_str().into()),
            Column::new("date", "Date", |b: &Budget| b.date.into()),
            Column::new("status", "Status", |b: &Budget| b.status.to_string().into()),
            Column::new("description", "Description", |b: &Budget| {
                b.description.clone().into()
            }),
            Column::new("total", "Total", |b: &Budget| b.totals().total.into()).totalized(),
        ]
    }
}
