//! Display strings shared by the product views

use pris_core::{format_count, format_nok_compact, Label, Product};

pub const SIGN_IN_TO_BOOKMARK: &str = "Logg inn for å bokmerke produkter";
pub const PRODUCT_LOAD_FAILED: &str = "Kunne ikke laste produkt fra API";

/// `"29,90 kr"`, or a placeholder when the product has no price
pub fn price_label(product: &Product) -> String {
    product
        .current_price
        .map(format_nok_compact)
        .unwrap_or_else(|| "Pris ikke tilgjengelig".to_string())
}

/// `"59,80 kr/ml"`
pub fn unit_price_label(product: &Product) -> Option<String> {
    let unit_price = product.current_unit_price?;
    let price = format_nok_compact(unit_price);
    Some(match &product.weight {
        Some(weight) => format!("{}/{}", price, weight.unit),
        None => price,
    })
}

/// Signed percentage change between the first and last recorded price
pub fn price_change_label(product: &Product) -> Option<(String, &'static str)> {
    let change = product.price_change()?;
    if change.abs() < 0.0005 {
        return Some(("0,0 %".to_string(), "change-flat"));
    }
    let text = format!("{:+.1} %", change * 100.0).replace('.', ",");
    let class = if change > 0.0 { "change-up" } else { "change-down" };
    Some((text, class))
}

pub fn image_or_placeholder(product: &Product, size: u32) -> String {
    product
        .image
        .clone()
        .unwrap_or_else(|| format!("/placeholder.svg?height={}&width={}", size, size))
}

pub fn catalog_subtitle(total_items: u64) -> String {
    let base = "Bla gjennom og sammenlign priser på tvers av butikker";
    if total_items == 0 {
        base.to_string()
    } else {
        format!("{} • {} produkter tilgjengelig", base, format_count(total_items))
    }
}

pub fn results_summary(shown: usize, filtered: bool) -> String {
    let suffix = if filtered { " (filtrert)" } else { "" };
    format!("Viser {} produkter{}", shown, suffix)
}

pub fn label_tooltip(label: &Label) -> String {
    label
        .description
        .clone()
        .unwrap_or_else(|| format!("{} sertifisert produkt", label.display_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pris_core::{RawPricePoint, RawProduct};

    fn product(price: Option<f64>, unit: Option<f64>, history: &[(f64, &str)]) -> Product {
        RawProduct {
            id: Some(1),
            name: Some("Lettmelk".into()),
            current_price: price,
            current_unit_price: unit,
            weight: Some(1.0),
            weight_unit: Some("l".into()),
            price_history: Some(
                history
                    .iter()
                    .map(|(p, d)| RawPricePoint {
                        price: Some(*p),
                        date: Some(d.to_string()),
                        store_code: None,
                    })
                    .collect(),
            ),
            ..Default::default()
        }
        .normalize()
        .unwrap()
    }

    #[test]
    fn test_price_labels() {
        let milk = product(Some(24.9), Some(24.9), &[]);
        assert_eq!(price_label(&milk), "24,90\u{a0}kr");
        assert_eq!(unit_price_label(&milk).as_deref(), Some("24,90\u{a0}kr/l"));

        let unpriced = product(None, None, &[]);
        assert_eq!(price_label(&unpriced), "Pris ikke tilgjengelig");
        assert_eq!(unit_price_label(&unpriced), None);
    }

    #[test]
    fn test_price_change_label() {
        let up = product(
            Some(22.0),
            None,
            &[(20.0, "2025-01-01T00:00:00Z"), (22.0, "2025-02-01T00:00:00Z")],
        );
        assert_eq!(price_change_label(&up), Some(("+10,0 %".to_string(), "change-up")));

        let down = product(
            Some(18.0),
            None,
            &[(20.0, "2025-01-01T00:00:00Z"), (18.0, "2025-02-01T00:00:00Z")],
        );
        assert_eq!(price_change_label(&down), Some(("-10,0 %".to_string(), "change-down")));

        let single = product(Some(18.0), None, &[(18.0, "2025-01-01T00:00:00Z")]);
        assert_eq!(price_change_label(&single), None);
    }

    #[test]
    fn test_catalog_texts() {
        assert_eq!(
            catalog_subtitle(0),
            "Bla gjennom og sammenlign priser på tvers av butikker"
        );
        assert!(catalog_subtitle(6000).ends_with("6\u{a0}000 produkter tilgjengelig"));
        assert_eq!(results_summary(3, false), "Viser 3 produkter");
        assert_eq!(results_summary(1, true), "Viser 1 produkter (filtrert)");
    }

    #[test]
    fn test_placeholder_image() {
        let milk = product(None, None, &[]);
        assert_eq!(
            image_or_placeholder(&milk, 300),
            "/placeholder.svg?height=300&width=300"
        );
    }

    #[test]
    fn test_label_tooltip() {
        let label = Label {
            name: "nyckelhalet".into(),
            display_name: "Nøkkelhullet".into(),
            description: None,
            icon_url: None,
        };
        assert_eq!(label_tooltip(&label), "Nøkkelhullet sertifisert produkt");
    }
}
