//! Product grid rendering.

use askama::Template;
use tracing::instrument;

use crate::error::Result;
use crate::models::Catalog;
use crate::services::filter::{ALL_CATEGORIES, CategoryFilter, FilterCriteria, Visibility};

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub category: String,
    pub image: String,
    pub price: i64,
    pub price_label: String,
    pub visible: bool,
}

impl From<Visibility<'_>> for ProductView {
    fn from(v: Visibility<'_>) -> Self {
        Self {
            id: v.entry.id.to_string(),
            title: v.entry.title.clone(),
            category: v.entry.category.clone(),
            image: v.entry.image.clone(),
            price: v.entry.price.amount(),
            price_label: v.entry.price.to_string(),
            visible: v.visible,
        }
    }
}

/// Product grid template.
#[derive(Template)]
#[template(path = "products/grid.html")]
pub struct ProductGridTemplate {
    pub products: Vec<ProductView>,
    pub categories: Vec<String>,
    pub selected_category: String,
    pub query: String,
    pub max_price: i64,
    pub visible_count: usize,
}

/// Render the catalog with `criteria` applied.
///
/// # Errors
///
/// Returns `AppError::Render` if the template fails.
#[instrument(skip_all, fields(query = criteria.query(), max_price = criteria.max_price.amount()))]
pub fn render(catalog: &Catalog, criteria: &FilterCriteria) -> Result<String> {
    let products: Vec<ProductView> = criteria
        .apply(catalog)
        .into_iter()
        .map(ProductView::from)
        .collect();
    let visible_count = products.iter().filter(|p| p.visible).count();
    tracing::debug!(visible_count, total = products.len(), "Filtered catalog");

    let selected_category = match &criteria.category {
        CategoryFilter::All => ALL_CATEGORIES.to_string(),
        CategoryFilter::Exact(category) => category.clone(),
    };

    Ok(ProductGridTemplate {
        categories: catalog.categories().into_iter().map(String::from).collect(),
        selected_category,
        query: criteria.query().to_string(),
        max_price: criteria.max_price.amount(),
        visible_count,
        products,
    }
    .render()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use bazaar_core::Price;

    use super::*;
    use crate::services::filter::FilterControls;

    #[test]
    fn test_hidden_cards_are_marked() {
        let catalog = Catalog::from_json(
            r#"[
                {"id":"p1","title":"Shoe","price":500,"category":"footwear"},
                {"id":"p2","title":"Hat","price":300,"category":"accessory"}
            ]"#,
        )
        .unwrap();
        let criteria = FilterCriteria::from_controls(
            &FilterControls {
                query: Some("shoe".to_string()),
                category: Some("all".to_string()),
                max_price: Some("1000".to_string()),
            },
            Price::new(3000),
        );

        let html = render(&catalog, &criteria).unwrap();
        assert!(html.contains("1 of 2 products"));
        assert!(html.contains(r#"<span id="maxPriceValue">1000</span>"#));

        let hat_card = html.split("data-id=\"p2\"").nth(1).unwrap();
        let hat_tag_end = hat_card.find('>').unwrap();
        assert!(hat_card[..hat_tag_end].contains("display: none"));

        let shoe_card = html.split("data-id=\"p1\"").nth(1).unwrap();
        let shoe_tag_end = shoe_card.find('>').unwrap();
        assert!(!shoe_card[..shoe_tag_end].contains("display: none"));
    }

    #[test]
    fn test_search_box_keeps_typed_text() {
        let catalog =
            Catalog::from_json(r#"[{"id":"p1","title":"Shoe","price":500,"category":"footwear"}]"#)
                .unwrap();
        let criteria = FilterCriteria::from_controls(
            &FilterControls {
                query: Some("Shoe".to_string()),
                ..FilterControls::default()
            },
            Price::new(3000),
        );

        let html = render(&catalog, &criteria).unwrap();
        assert!(html.contains(r#"<input id="searchInput" value="Shoe">"#));
        assert!(html.contains("1 of 1 products"));
    }
}
