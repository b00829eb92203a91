//! Line totals and tax-bracket aggregation shared by every priced document.
//!
//! `line total = quantity * unit price * (1 - discount / 100)` and
//! `tax = line total * tax / 100`. A missing discount or tax counts as zero.
//! Arithmetic is exact; rounding only happens in [`DocumentTotals::rounded`].

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A document line that can be priced.
pub trait Priced {
    fn quantity(&self) -> Decimal;
    fn unit_price(&self) -> Decimal;

    /// Discount percentage, 0..=100.
    fn discount(&self) -> Option<Decimal> {
        None
    }

    /// Tax percentage applied to the discounted amount.
    fn tax_percentage(&self) -> Option<Decimal> {
        None
    }

    fn line_total(&self) -> Decimal {
        line_total(self.quantity(), self.unit_price(), self.discount())
    }

    fn tax_amount(&self) -> Decimal {
        tax_amount(self.line_total(), self.tax_percentage())
    }
}

impl<T: Priced + ?Sized> Priced for &T {
    fn quantity(&self) -> Decimal {
        (**self).quantity()
    }

    fn unit_price(&self) -> Decimal {
        (**self).unit_price()
    }

    fn discount(&self) -> Option<Decimal> {
        (**self).discount()
    }

    fn tax_percentage(&self) -> Option<Decimal> {
        (**self).tax_percentage()
    }
}

/// Owned copy of the priced fields of any line, used to mix line types in one
/// aggregation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLine {
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Option<Decimal>,
    pub tax_percentage: Option<Decimal>,
}

impl PriceLine {
    pub fn of<P: Priced>(line: &P) -> Self {
        Self {
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            discount: line.discount(),
            tax_percentage: line.tax_percentage(),
        }
    }
}

impl Priced for PriceLine {
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

pub fn line_total(quantity: Decimal, unit_price: Decimal, discount: Option<Decimal>) -> Decimal {
    let discount = discount.unwrap_or(Decimal::ZERO);
    quantity * unit_price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
}

pub fn tax_amount(line_total: Decimal, tax_percentage: Option<Decimal>) -> Decimal {
    line_total * tax_percentage.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED
}

/// Taxable base and tax collected under one tax percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBracket {
    pub tax_percentage: Decimal,
    pub taxable_base: Decimal,
    pub tax_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTotals {
    /// Sum of quantity * unit price before discounts.
    pub gross: Decimal,
    pub discount_total: Decimal,
    /// Sum of line totals.
    pub subtotal: Decimal,
    pub tax_total: Decimal,
    pub total: Decimal,
    /// Ordered by ascending tax percentage.
    pub brackets: Vec<TaxBracket>,
}

impl Default for DocumentTotals {
    fn default() -> Self {
        Self {
            gross: Decimal::ZERO,
            discount_total: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            total: Decimal::ZERO,
            brackets: Vec::new(),
        }
    }
}

impl DocumentTotals {
    pub fn bracket(&self, tax_percentage: Decimal) -> Option<&TaxBracket> {
        self.brackets
            .iter()
            .find(|b| b.tax_percentage == tax_percentage)
    }

    /// Copy with every amount rounded half away from zero, for display.
    pub fn rounded(&self, dp: u32) -> Self {
        let round = |d: Decimal| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        Self {
            gross: round(self.gross),
            discount_total: round(self.discount_total),
            subtotal: round(self.subtotal),
            tax_total: round(self.tax_total),
            total: round(self.total),
            brackets: self
                .brackets
                .iter()
                .map(|b| TaxBracket {
                    tax_percentage: b.tax_percentage,
                    taxable_base: round(b.taxable_base),
                    tax_amount: round(b.tax_amount),
                })
                .collect(),
        }
    }
}

/// Aggregates lines into totals and tax brackets.
pub fn compute_totals<I>(lines: I) -> DocumentTotals
where
    I: IntoIterator,
    I::Item: Priced,
{
    let mut totals = DocumentTotals::default();
    let mut brackets: BTreeMap<Decimal, (Decimal, Decimal)> = BTreeMap::new();

    for line in lines {
        let gross = line.quantity() * line.unit_price();
        let base = line.line_total();
        let tax = line.tax_amount();
        let key = line.tax_percentage().unwrap_or(Decimal::ZERO).normalize();

        totals.gross += gross;
        totals.subtotal += base;
        totals.tax_total += tax;

        let entry = brackets.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += base;
        entry.1 += tax;
    }

    totals.discount_total = totals.gross - totals.subtotal;
    totals.total = totals.subtotal + totals.tax_total;
    totals.brackets = brackets
        .into_iter()
        .map(|(tax_percentage, (taxable_base, tax_amount))| TaxBracket {
            tax_percentage,
            taxable_base,
            tax_amount,
        })
        .collect();
    totals
}
