//! Mock product catalog for demo/development

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

use pris_core::{
    ApiPage, RawAllergen, RawCategory, RawLabel, RawNutrient, RawPageMeta, RawPricePoint,
    RawProduct, RawStore,
};

/// Upper bound the real API puts on `size`
pub const MAX_PAGE_SIZE: u32 = 100;

const STORES: &[(&str, &str)] = &[
    ("Meny", "MENY_NO"),
    ("Kiwi", "KIWI"),
    ("Rema 1000", "REMA_1000"),
    ("Joker", "JOKER_NO"),
    ("Coop Extra", "COOP_EXTRA"),
    ("Spar", "SPAR_NO"),
];

struct Template {
    name: &'static str,
    brand: &'static str,
    category: (u64, &'static str),
    weight: f64,
    unit: &'static str,
    base_price: f64,
}

const TEMPLATES: &[Template] = &[
    Template { name: "Lettmelk 1% 1l", brand: "Tine", category: (12, "Meieri"), weight: 1000.0, unit: "ml", base_price: 24.9 },
    Template { name: "Norvegia 26% 1kg", brand: "Tine", category: (12, "Meieri"), weight: 1000.0, unit: "g", base_price: 129.0 },
    Template { name: "Grovbrød 750g", brand: "Bakers", category: (31, "Brød"), weight: 750.0, unit: "g", base_price: 39.9 },
    Template { name: "Kaffe Filtermalt 250g", brand: "Friele", category: (44, "Kaffe"), weight: 250.0, unit: "g", base_price: 54.9 },
    Template { name: "Pepsi Max 1,5l", brand: "Pepsi", category: (26, "Drikke"), weight: 1500.0, unit: "ml", base_price: 32.5 },
    Template { name: "Monster Ultra White 0,5l", brand: "Monster", category: (111, "Energidrikk"), weight: 500.0, unit: "ml", base_price: 29.9 },
    Template { name: "Kyllingfilet 400g", brand: "Prior", category: (58, "Kjøtt"), weight: 400.0, unit: "g", base_price: 89.9 },
    Template { name: "Laksefilet 4x125g", brand: "Lerøy", category: (63, "Fisk"), weight: 500.0, unit: "g", base_price: 119.0 },
    Template { name: "Bananer løsvekt", brand: "Bama", category: (70, "Frukt og grønt"), weight: 1000.0, unit: "g", base_price: 27.9 },
    Template { name: "Kvikk Lunsj 47g", brand: "Freia", category: (82, "Sjokolade"), weight: 47.0, unit: "g", base_price: 19.9 },
    Template { name: "Grandiosa Original", brand: "Stabburet", category: (90, "Frysevarer"), weight: 575.0, unit: "g", base_price: 64.9 },
    Template { name: "Havregryn Lettkokt 1,1kg", brand: "Axa", category: (35, "Frokost"), weight: 1100.0, unit: "g", base_price: 34.9 },
];

/// Random-walk price series, one point per week ending at `now`
struct PriceWalk {
    price: f64,
    volatility: f64,
    trend: f64,
}

impl PriceWalk {
    fn new(initial_price: f64) -> Self {
        Self {
            price: initial_price,
            volatility: 0.04,
            trend: 0.0,
        }
    }

    fn tick(&mut self, rng: &mut impl Rng) -> f64 {
        let drift = self.trend * 0.01;
        let random = (rng.r#gen::<f64>() - 0.5) * 2.0 * self.volatility;

        if rng.r#gen::<f64>() < 0.15 {
            self.trend = (rng.r#gen::<f64>() - 0.5) * 2.0;
        }

        self.price *= 1.0 + drift + random;
        self.price = self.price.max(1.0);
        round_price(self.price)
    }

    fn history(mut self, rng: &mut impl Rng, weeks: usize, now: DateTime<Utc>) -> Vec<RawPricePoint> {
        (0..weeks)
            .rev()
            .map(|weeks_ago| RawPricePoint {
                price: Some(self.tick(rng)),
                date: Some(timestamp(now - Duration::weeks(weeks_ago as i64))),
                store_code: None,
            })
            .collect()
    }
}

fn round_price(price: f64) -> f64 {
    (price * 10.0).round() / 10.0
}

fn timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// In-memory stand-in for the kassal.app product catalog
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    products: Vec<RawProduct>,
}

impl MockCatalog {
    /// Generate `count` products spread over the template and store lists
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let now = Utc::now();
        let products = (0..count)
            .map(|i| {
                let template = &TEMPLATES[i % TEMPLATES.len()];
                let (store_name, store_code) = STORES[(i / TEMPLATES.len() + i) % STORES.len()];
                let id = 1000 + i as u64;

                let weeks = rng.gen_range(6..=20);
                let history = PriceWalk::new(template.base_price).history(rng, weeks, now);
                let current_price = history.last().and_then(|p| p.price);
                let unit_price = current_price.map(|p| round_price(p * 1000.0 / template.weight));
                let ean = format!("70{:011}", id * 7919 % 100_000_000_000);

                RawProduct {
                    id: Some(id),
                    name: Some(template.name.to_string()),
                    brand: Some(template.brand.to_string()),
                    vendor: Some(format!("{} AS", template.brand)),
                    url: Some(format!(
                        "https://{}.no/varer/{}-{}",
                        slug(store_name),
                        slug(template.name),
                        ean
                    )),
                    image: Some(format!("https://bilder.ngdata.no/{}/kmh/large.jpg", ean)),
                    ean: Some(ean),
                    category: Some(vec![RawCategory {
                        id: Some(template.category.0),
                        depth: Some(0),
                        name: Some(template.category.1.to_string()),
                    }]),
                    description: None,
                    ingredients: None,
                    current_price,
                    current_unit_price: unit_price,
                    weight: Some(template.weight),
                    weight_unit: Some(template.unit.to_string()),
                    store: Some(RawStore {
                        name: Some(store_name.to_string()),
                        code: Some(store_code.to_string()),
                        url: Some(format!("https://{}.no", slug(store_name))),
                        logo: Some(format!("https://kassal.app/logos/{}.svg", store_name)),
                    }),
                    allergens: Some(mock_allergens(template.category.1)),
                    nutrition: Some(mock_nutrition(rng)),
                    labels: Some(mock_labels(rng)),
                    created_at: history.first().and_then(|p| p.date.clone()),
                    updated_at: history.last().and_then(|p| p.date.clone()),
                    price_history: Some(history),
                }
            })
            .collect();

        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn get(&self, id: u64) -> Option<&RawProduct> {
        self.products.iter().find(|p| p.id == Some(id))
    }

    /// One page of products, optionally filtered by a name/brand search
    pub fn page(&self, page: u32, size: u32, search: Option<&str>) -> ApiPage<RawProduct> {
        let size = size.clamp(1, MAX_PAGE_SIZE);
        let page = page.max(1);
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matches: Vec<&RawProduct> = self
            .products
            .iter()
            .filter(|p| match &needle {
                None => true,
                Some(needle) => [&p.name, &p.brand]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(needle.as_str())),
            })
            .collect();

        let total = matches.len() as u64;
        let last_page = (total.div_ceil(size as u64)).max(1) as u32;
        let start = (page as u64 - 1) * size as u64;
        let data: Vec<RawProduct> = matches
            .into_iter()
            .skip(start as usize)
            .take(size as usize)
            .cloned()
            .collect();

        let meta = RawPageMeta {
            current_page: Some(page),
            last_page: Some(last_page),
            per_page: Some(size),
            total: Some(total),
            from: (!data.is_empty()).then_some(start + 1),
            to: (!data.is_empty()).then_some(start + data.len() as u64),
        };

        ApiPage {
            data,
            meta: Some(meta),
        }
    }

    /// Unique categories in first-seen order
    pub fn categories(&self) -> Vec<RawCategory> {
        let mut seen = Vec::<RawCategory>::new();
        for category in self.products.iter().filter_map(|p| p.category.as_ref()).flatten() {
            if !seen.iter().any(|c| c.id == category.id) {
                seen.push(category.clone());
            }
        }
        seen
    }

    /// Unique stores in first-seen order
    pub fn stores(&self) -> Vec<RawStore> {
        let mut seen = Vec::<RawStore>::new();
        for store in self.products.iter().filter_map(|p| p.store.as_ref()) {
            if !seen.iter().any(|s| s.code == store.code) {
                seen.push(store.clone());
            }
        }
        seen
    }
}

fn mock_allergens(category: &str) -> Vec<RawAllergen> {
    let allergen = |code: &str, name: &str, contains: &str| RawAllergen {
        code: Some(code.to_string()),
        display_name: Some(name.to_string()),
        contains: Some(contains.to_string()),
    };

    match category {
        "Meieri" => vec![allergen("melk", "Melk", "YES"), allergen("gluten", "Gluten", "NO")],
        "Brød" | "Frokost" => vec![
            allergen("gluten", "Gluten", "YES"),
            allergen("sesam", "Sesamfrø", "UNKNOWN"),
            allergen("melk", "Melk", "NO"),
        ],
        "Fisk" => vec![allergen("fisk", "Fisk", "YES")],
        "Sjokolade" | "Frysevarer" => vec![
            allergen("melk", "Melk", "YES"),
            allergen("gluten", "Gluten", "YES"),
            allergen("notter", "Nøtter", "UNKNOWN"),
        ],
        _ => Vec::new(),
    }
}

fn mock_nutrition(rng: &mut impl Rng) -> Vec<RawNutrient> {
    let nutrient = |code: &str, name: &str, amount: f64, unit: &str| RawNutrient {
        code: Some(code.to_string()),
        display_name: Some(name.to_string()),
        amount: Some(round_price(amount)),
        unit: Some(unit.to_string()),
    };

    vec![
        nutrient("energi_kcal", "Kalorier", rng.gen_range(20.0..450.0), "kcal"),
        nutrient("fett_totalt", "Fett", rng.gen_range(0.0..30.0), "g"),
        nutrient("karbohydrater", "Karbohydrater", rng.gen_range(0.0..60.0), "g"),
        nutrient("protein", "Protein", rng.gen_range(0.0..25.0), "g"),
        nutrient("salt", "Salt", rng.gen_range(0.0..2.0), "g"),
    ]
}

fn mock_labels(rng: &mut impl Rng) -> Vec<RawLabel> {
    if rng.r#gen::<f64>() < 0.5 {
        return Vec::new();
    }
    vec![RawLabel {
        name: Some("nyckelhalsen".to_string()),
        display_name: Some("Nøkkelhullet".to_string()),
        description: Some("Sunnere valg innenfor matvaregruppen".to_string()),
        icon: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog(count: usize) -> MockCatalog {
        MockCatalog::generate(count, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_generated_products_normalize() {
        let catalog = catalog(30);
        assert_eq!(catalog.len(), 30);
        for raw in catalog.products.iter().cloned() {
            let product = raw.normalize().unwrap();
            assert!(!product.price_history.is_empty());
            assert!(product.current_price.is_some());
        }
    }

    #[test]
    fn test_price_walk_stays_positive_and_ordered() {
        let mut rng = StdRng::seed_from_u64(1);
        let history = PriceWalk::new(2.0).history(&mut rng, 52, Utc::now());
        assert_eq!(history.len(), 52);
        assert!(history.iter().all(|p| p.price.unwrap() >= 1.0));

        let dates: Vec<&String> = history.iter().map(|p| p.date.as_ref().unwrap()).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_paging_meta() {
        let catalog = catalog(120);
        let page = catalog.page(3, 50, None);
        let meta = page.meta.unwrap();

        assert_eq!(page.data.len(), 20);
        assert_eq!(meta.current_page, Some(3));
        assert_eq!(meta.last_page, Some(3));
        assert_eq!(meta.total, Some(120));
        assert_eq!(meta.from, Some(101));
        assert_eq!(meta.to, Some(120));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = catalog(10).page(5, 50, None);
        assert!(page.data.is_empty());
        let meta = page.meta.unwrap();
        assert_eq!(meta.last_page, Some(1));
        assert_eq!(meta.from, None);
    }

    #[test]
    fn test_size_is_clamped() {
        let catalog = catalog(250);
        assert_eq!(catalog.page(1, 1000, None).data.len(), MAX_PAGE_SIZE as usize);
        assert_eq!(catalog.page(1, 0, None).data.len(), 1);
    }

    #[test]
    fn test_search_matches_name_and_brand() {
        let catalog = catalog(TEMPLATES.len());
        let by_name = catalog.page(1, 50, Some("grandiosa"));
        assert_eq!(by_name.data.len(), 1);

        let by_brand = catalog.page(1, 50, Some("TINE"));
        assert_eq!(by_brand.data.len(), 2);

        let blank = catalog.page(1, 50, Some("  "));
        assert_eq!(blank.data.len(), TEMPLATES.len());
    }

    #[test]
    fn test_get_by_id() {
        let catalog = catalog(5);
        assert_eq!(catalog.get(1003).and_then(|p| p.id), Some(1003));
        assert!(catalog.get(42).is_none());
    }

    #[test]
    fn test_unique_categories_and_stores() {
        let catalog = catalog(60);
        let categories = catalog.categories();
        let stores = catalog.stores();

        assert!(categories.len() <= TEMPLATES.len());
        assert!(stores.len() <= STORES.len());
        assert!(stores.iter().all(|s| s.clone().normalize().is_some()));
    }
}
