use crate::error::ItemError;

const TABLE_VAR: &str = "ITEMS_TABLE";
const DEFAULT_TABLE: &str = "http-crud-tutorial-items";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) table_name: String,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self, ItemError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ItemError> {
        let table_name = match lookup(TABLE_VAR) {
            Some(name) if name.trim().is_empty() => {
                return Err(ItemError::Config(format!("{TABLE_VAR} is set but empty")))
            }
            Some(name) => name,
            None => DEFAULT_TABLE.to_string(),
        };

        Ok(Config { table_name })
    }
}
