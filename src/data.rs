//! Category descriptors and the published price dataset

use crate::scout::models::{CurrencyItem, UniqueItem};

/// Display text of the currency used as the exchange reference
pub const DIVINE_ORB: &str = "Divine Orb";

/// Static descriptor for one fetched item category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryDef {
    /// File name of the per-league backup
    pub backup_file: &'static str,
    /// API path under the base URL
    pub endpoint: &'static str,
}

/// The fixed category set, one descriptor per `PriceData` field
pub mod category {
    use super::CategoryDef;

    pub const CURRENCY: CategoryDef = CategoryDef {
        backup_file: "Currency.json",
        endpoint: "items/currency/currency",
    };
    pub const BREACH: CategoryDef = CategoryDef {
        backup_file: "Breach.json",
        endpoint: "items/currency/breachcatalyst",
    };
    pub const WEAPONS: CategoryDef = CategoryDef {
        backup_file: "Weapons.json",
        endpoint: "items/unique/weapon",
    };
    pub const ARMOUR: CategoryDef = CategoryDef {
        backup_file: "Armour.json",
        endpoint: "items/unique/armour",
    };
    pub const ACCESSORIES: CategoryDef = CategoryDef {
        backup_file: "Accessories.json",
        endpoint: "items/unique/accessory",
    };
    pub const DELIRIUM: CategoryDef = CategoryDef {
        backup_file: "Delirium.json",
        endpoint: "items/currency/delirium",
    };
    pub const ESSENCES: CategoryDef = CategoryDef {
        backup_file: "Essences.json",
        endpoint: "items/currency/essences",
    };
    pub const RUNES: CategoryDef = CategoryDef {
        backup_file: "Runes.json",
        endpoint: "items/currency/runes",
    };
    pub const RITUAL: CategoryDef = CategoryDef {
        backup_file: "Ritual.json",
        endpoint: "items/currency/ritual",
    };
    pub const ULTIMATUMS: CategoryDef = CategoryDef {
        backup_file: "Ultimatum.json",
        endpoint: "items/currency/ultimatum",
    };
    pub const FRAGMENTS: CategoryDef = CategoryDef {
        backup_file: "Fragments.json",
        endpoint: "items/currency/fragments",
    };
    pub const TALISMANS: CategoryDef = CategoryDef {
        backup_file: "Talismans.json",
        endpoint: "items/currency/talismans",
    };
    pub const EXPEDITIONS: CategoryDef = CategoryDef {
        backup_file: "Expedition.json",
        endpoint: "items/currency/expedition",
    };
    pub const WAYSTONES: CategoryDef = CategoryDef {
        backup_file: "Waystones.json",
        endpoint: "items/currency/waystones",
    };
    pub const VAULT_KEYS: CategoryDef = CategoryDef {
        backup_file: "VaultKeys.json",
        endpoint: "items/currency/vaultkeys",
    };
    pub const ABYSS: CategoryDef = CategoryDef {
        backup_file: "Abyss.json",
        endpoint: "items/currency/abyss",
    };
    pub const UNCUT_GEMS: CategoryDef = CategoryDef {
        backup_file: "UncutGems.json",
        endpoint: "items/currency/uncutgems",
    };
}

/// One fully resolved price dataset for a league.
///
/// Built fresh by every refresh and swapped in as a whole; never mutated
/// after publication. A category that could be resolved from neither the
/// web nor a backup is an empty list, which consumers should treat as "no
/// pricing available".
#[derive(Debug, Default)]
pub struct PriceData {
    pub currency: Vec<CurrencyItem>,
    pub breach: Vec<CurrencyItem>,
    pub weapons: Vec<UniqueItem>,
    pub armour: Vec<UniqueItem>,
    pub accessories: Vec<UniqueItem>,
    pub delirium: Vec<CurrencyItem>,
    pub essences: Vec<CurrencyItem>,
    pub runes: Vec<CurrencyItem>,
    pub ritual: Vec<CurrencyItem>,
    pub ultimatums: Vec<CurrencyItem>,
    pub fragments: Vec<CurrencyItem>,
    pub talismans: Vec<CurrencyItem>,
    pub expeditions: Vec<CurrencyItem>,
    pub waystones: Vec<CurrencyItem>,
    pub vault_keys: Vec<CurrencyItem>,
    pub abyss: Vec<CurrencyItem>,
    pub uncut_gems: Vec<CurrencyItem>,
    pub(crate) divine_value: Option<f64>,
}

impl PriceData {
    /// Derives the reference price and seals the dataset for publication
    pub(crate) fn seal(mut self) -> Self {
        self.divine_value = self.currency_price(DIVINE_ORB);
        self
    }

    /// Price of the reference currency ("Divine Orb"), if present
    pub fn divine_value(&self) -> Option<f64> {
        self.divine_value
    }

    /// Looks up a currency price by display text (main currency list only)
    pub fn currency_price(&self, text: &str) -> Option<f64> {
        self.currency
            .iter()
            .find(|item| item.text == text)
            .map(|item| item.current_price)
    }

    /// Looks up a unique item price by display text across the three
    /// unique-equipment categories
    pub fn unique_price(&self, text: &str) -> Option<f64> {
        [&self.weapons, &self.armour, &self.accessories]
            .into_iter()
            .find_map(|list| list.iter().find(|item| item.text == text))
            .map(|item| item.current_price)
    }

    /// Total number of priced entries across all categories
    pub fn item_count(&self) -> usize {
        self.currency.len()
            + self.breach.len()
            + self.weapons.len()
            + self.armour.len()
            + self.accessories.len()
            + self.delirium.len()
            + self.essences.len()
            + self.runes.len()
            + self.ritual.len()
            + self.ultimatums.len()
            + self.fragments.len()
            + self.talismans.len()
            + self.expeditions.len()
            + self.waystones.len()
            + self.vault_keys.len()
            + self.abyss.len()
            + self.uncut_gems.len()
    }
}
