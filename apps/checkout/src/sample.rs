//! Built-in reference data: the eight shop items and a promotion catalog
//! covering every campaign.

use cartwise_core::{CatalogEntry, Item, ItemCategory, Money};

const SAMPLE_PROMOTIONS: &str = include_str!("../data/sample_promotions.json");

/// The shop's item catalog.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new(1, "Tops", Money::from_major(300), ItemCategory::Clothing),
        Item::new(2, "Bottoms", Money::from_major(350), ItemCategory::Clothing),
        Item::new(3, "Sandals", Money::from_major(900), ItemCategory::Footwear),
        Item::new(4, "Sneakers", Money::from_major(2000), ItemCategory::Footwear),
        Item::new(5, "Tote bag", Money::from_major(750), ItemCategory::Bags),
        Item::new(6, "Backpack", Money::from_major(1000), ItemCategory::Bags),
        Item::new(7, "Watches", Money::from_major(800), ItemCategory::Accessories),
        Item::new(8, "Jewelry", Money::from_major(150), ItemCategory::Accessories),
    ]
}

/// Sample promotions in the catalog wire format.
pub fn sample_promotions() -> Result<Vec<CatalogEntry>, serde_json::Error> {
    serde_json::from_str(SAMPLE_PROMOTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartwise_core::{ingest, CampaignKind};
    use std::collections::HashSet;

    #[test]
    fn test_sample_items_unique() {
        let items = sample_items();
        let ids: HashSet<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_sample_promotions_cover_every_campaign() {
        let snapshot = ingest(&sample_promotions().unwrap());
        assert!(snapshot.rejected.is_empty(), "{:?}", snapshot.rejected);

        let kinds: HashSet<CampaignKind> = snapshot.promotions.iter().map(|p| p.kind()).collect();
        assert_eq!(kinds.len(), CampaignKind::ALL.len());
    }
}
