use std::collections::BTreeMap;

use crate::inventory::types::{DietTag, PantryItem};

/// Grocery inventory plus the shopping list, both in-memory only.
#[derive(Debug, Clone, Default)]
pub struct InventoryStore {
    items: BTreeMap<u64, PantryItem>,
    shopping: Vec<PantryItem>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The original mock dataset, seeded into both lists.
    pub fn demo() -> Self {
        let items = vec![
            PantryItem::new(1, "Apples", 5.0, "pcs", DietTag::Vegan),
            PantryItem::new(2, "Milk", 1.0, "L", DietTag::Vegetarian),
            PantryItem::new(3, "Flour", 2.0, "kg", DietTag::Vegan),
            PantryItem::new(4, "Eggs", 12.0, "pcs", DietTag::Vegetarian),
            PantryItem::new(5, "Chicken Breast", 1.0, "kg", DietTag::None),
        ];
        Self {
            items: items.iter().cloned().map(|i| (i.id, i)).collect(),
            shopping: items,
        }
    }

    pub fn inventory(&self) -> Vec<PantryItem> {
        self.items.values().cloned().collect()
    }

    pub fn shopping_list(&self) -> &[PantryItem] {
        &self.shopping
    }

    /// Set the owned amount for a known item. A quantity of zero or less
    /// removes the item from the inventory. Returns false for unknown ids.
    pub fn set_amount(&mut self, id: u64, quantity: f64) -> bool {
        if !self.items.contains_key(&id) {
            return false;
        }
        if quantity > 0.0 {
            if let Some(item) = self.items.get_mut(&id) {
                item.amount = quantity;
            }
        } else {
            self.items.remove(&id);
        }
        true
    }

    /// Move a shopping-list entry into the inventory, merging amounts when
    /// the item is already owned.
    pub fn collect(&mut self, id: u64) -> Option<PantryItem> {
        let pos = self.shopping.iter().position(|i| i.id == id)?;
        let item = self.shopping.remove(pos);
        let merged = self
            .items
            .entry(item.id)
            .and_modify(|owned| owned.amount += item.amount)
            .or_insert_with(|| item.clone());
        Some(merged.clone())
    }
}
