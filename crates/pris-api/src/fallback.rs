//! Built-in catalog used when the API is unreachable

use crate::ApiError;
use pris_core::{
    Product, ProductId, RawCategory, RawPricePoint, RawProduct, RawStore,
};

fn monster_ultra_white() -> RawProduct {
    RawProduct {
        id: Some(1881),
        name: Some("Monster Ultra White 0,5l boks".into()),
        brand: Some("Monster".into()),
        vendor: Some("Coca-cola europacific partners norge as".into()),
        ean: Some("5060337502238".into()),
        url: Some(
            "https://joker.no/nettbutikk/varer/drikkevarer/energidrikk/monster-5060337502238".into(),
        ),
        image: Some("https://bilder.ngdata.no/5060337502238/kmh/large.jpg".into()),
        category: Some(vec![
            RawCategory {
                id: Some(26),
                depth: Some(-1),
                name: Some("Drikke".into()),
            },
            RawCategory {
                id: Some(111),
                depth: Some(0),
                name: Some("Energidrikk".into()),
            },
        ]),
        description: None,
        ingredients: Some(
            "Kullsyreholdig vann, syre (sitronsyre), taurin (0.4%), surhetsregulerende middel \
             (natriumsitrater), aromaer, panax ginsengrot-ekstrakt (0.08%), søtstoffer (sukralose, \
             acesulfam k), konserveringsmidler (sorbinsyre, bensoesyre), koffein (0.03%), vitaminer \
             (niacin (vit b3), pantotensyre (vit b5), b6, b12), inositol."
                .into(),
        ),
        current_price: Some(29.9),
        current_unit_price: Some(59.8),
        weight: Some(500.0),
        weight_unit: Some("ml".into()),
        store: Some(RawStore {
            name: Some("Joker".into()),
            code: Some("JOKER_NO".into()),
            url: Some("https://joker.no/nettbutikk/varer".into()),
            logo: Some("https://kassal.app/logos/Joker.svg".into()),
        }),
        price_history: Some(vec![RawPricePoint {
            price: Some(29.9),
            date: Some("2025-05-19T07:00:20.000000Z".into()),
            store_code: None,
        }]),
        allergens: Some(Vec::new()),
        nutrition: Some(Vec::new()),
        labels: Some(Vec::new()),
        created_at: Some("2022-01-09T18:29:23.000000Z".into()),
        updated_at: Some("2025-05-19T07:00:20.000000Z".into()),
    }
}

/// Products shown when the listing cannot be fetched
pub fn fallback_products() -> Vec<Product> {
    [monster_ultra_white()]
        .into_iter()
        .filter_map(|raw| match raw.normalize() {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::error!("Invalid fallback product: {}", e);
                None
            }
        })
        .collect()
}

pub fn fallback_product(id: ProductId) -> Option<Product> {
    fallback_products().into_iter().find(|p| p.id == id)
}

/// Fetched product, else its fallback entry, else nothing
pub fn or_fallback(id: ProductId, fetched: Result<Product, ApiError>) -> Option<Product> {
    match fetched {
        Ok(product) => Some(product),
        Err(e) => {
            tracing::warn!("Failed to fetch product {}: {}", id, e);
            fallback_product(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_catalog_is_valid() {
        let products = fallback_products();
        assert_eq!(products.len(), 1);

        let monster = &products[0];
        assert_eq!(monster.id, ProductId::new(1881));
        assert_eq!(monster.current_price, Some(29.9));
        assert_eq!(monster.store_name(), Some("Joker"));
        assert_eq!(monster.primary_category().map(|c| c.name.as_str()), Some("Energidrikk"));
        assert_eq!(monster.price_history.len(), 1);
        assert_eq!(monster.weight.as_ref().map(|w| w.to_string()).as_deref(), Some("500 ml"));
    }

    #[test]
    fn test_fallback_lookup() {
        assert!(fallback_product(ProductId::new(1881)).is_some());
        assert!(fallback_product(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_or_fallback() {
        let fetched = fallback_product(ProductId::new(1881)).unwrap();
        assert_eq!(
            or_fallback(ProductId::new(1881), Ok(fetched.clone())),
            Some(fetched.clone())
        );
        assert_eq!(
            or_fallback(ProductId::new(1881), Err(ApiError::NotFound)),
            Some(fetched)
        );
        assert_eq!(
            or_fallback(ProductId::new(99), Err(ApiError::Network("offline".into()))),
            None
        );
    }
}
