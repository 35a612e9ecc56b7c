use super::database::DataAccessError;

pub const DEFAULT_CATALOG_TABLE: &str = "fruit_options";
pub const DEFAULT_ORDERS_TABLE: &str = "orders";

/// Fruit list loaded by `--init`, with the aliases the nutrition API knows them by.
pub const DEFAULT_FRUITS: &[(&str, Option<&str>)] = &[
    ("Apples", Some("Apple")),
    ("Blueberries", Some("Blueberry")),
    ("Cantaloupe", None),
    ("Dragon Fruit", Some("Dragonfruit")),
    ("Elderberries", Some("Elderberry")),
    ("Figs", Some("Fig")),
    ("Guava", None),
    ("Honeydew", None),
    ("Jackfruit", Some("Jack Fruit")),
    ("Kiwi", None),
    ("Lime", None),
    ("Mango", None),
    ("Nectarine", None),
    ("Papaya", None),
    ("Raspberries", Some("Raspberry")),
    ("Strawberries", Some("Strawberry")),
    ("Tangerine", None),
    ("Ugli Fruit", Some("Ugli")),
    ("Vanilla Fruit", Some("Vanilla")),
    ("Watermelon", None),
    ("Ximenia", None),
    ("Yerba Mate", None),
    ("Ziziphus Jujube", Some("Jujube")),
];

/// Table names interpolated into SQL text. Only plain identifiers are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub catalog: String,
    pub orders: String,
}

impl TableNames {
    pub fn new(catalog: impl Into<String>, orders: impl Into<String>) -> Result<Self, DataAccessError> {
        let catalog = catalog.into();
        let orders = orders.into();
        validate_identifier(&catalog)?;
        validate_identifier(&orders)?;
        Ok(Self { catalog, orders })
    }

    pub fn create_tables_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {catalog} (
                FRUIT_ID INTEGER PRIMARY KEY,
                FRUIT_NAME TEXT NOT NULL UNIQUE,
                SEARCH_ON TEXT
            );
            CREATE TABLE IF NOT EXISTS {orders} (
                ORDER_UID INTEGER PRIMARY KEY,
                ORDER_FILLED INTEGER NOT NULL DEFAULT 0,
                NAME_ON_ORDER TEXT,
                INGREDIENTS TEXT NOT NULL,
                ORDER_TS DATETIME DEFAULT CURRENT_TIMESTAMP
            );",
            catalog = self.catalog,
            orders = self.orders,
        )
    }

    pub fn select_catalog_sql(&self) -> String {
        format!("SELECT FRUIT_NAME, SEARCH_ON FROM {}", self.catalog)
    }

    pub fn seed_catalog_sql(&self) -> String {
        format!(
            "INSERT OR IGNORE INTO {} (FRUIT_NAME, SEARCH_ON) VALUES (?1, ?2)",
            self.catalog
        )
    }

    pub fn insert_order_sql(&self) -> String {
        format!(
            "INSERT INTO {} (INGREDIENTS, NAME_ON_ORDER) VALUES (?1, ?2)",
            self.orders
        )
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_TABLE.to_string(),
            orders: DEFAULT_ORDERS_TABLE.to_string(),
        }
    }
}

fn validate_identifier(name: &str) -> Result<(), DataAccessError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DataAccessError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_reject_non_identifiers() {
        assert!(TableNames::new("fruit_options", "orders_2024").is_ok());
        assert!(TableNames::new("_catalog", "Orders").is_ok());

        for bad in ["", "1orders", "orders; DROP TABLE x", "smoothies.public.orders", "o-rders"] {
            assert!(
                matches!(TableNames::new("fruit_options", bad), Err(DataAccessError::InvalidIdentifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_statements_use_configured_tables() {
        let tables = TableNames::new("catalog", "placed").unwrap();
        assert_eq!(tables.select_catalog_sql(), "SELECT FRUIT_NAME, SEARCH_ON FROM catalog");
        assert!(tables.insert_order_sql().starts_with("INSERT INTO placed (INGREDIENTS, NAME_ON_ORDER)"));
        assert!(tables.create_tables_sql().contains("CREATE TABLE IF NOT EXISTS placed"));
    }
}
