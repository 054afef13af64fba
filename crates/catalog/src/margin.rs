//! Administrative margin report.

use product_store::Product;
use serde::Serialize;

/// One element of the margin report.
///
/// The report is a flat sequence alternating a full product record and the
/// margin computed for it. Entries serialize without a tag, so the wire
/// form is `[product, margin, product, margin, ...]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarginReportEntry {
    Product(Product),
    Margin(i64),
}

/// Builds the interleaved report, keeping the input order.
pub fn margin_report(products: Vec<Product>) -> Vec<MarginReportEntry> {
    products
        .into_iter()
        .flat_map(|product| {
            let margin = product.margin();
            [
                MarginReportEntry::Product(product),
                MarginReportEntry::Margin(margin),
            ]
        })
        .collect()
}
