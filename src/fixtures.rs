//! Fixtures

use serde::Deserialize;
use thiserror::Error;

use crate::products::Product;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown fixture set name
    #[error("Unknown fixture set: {0}")]
    UnknownSet(String),
}

/// A named catalog of sample products for tests and demos.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Products in the set.
    pub products: Vec<Product>,
}

impl Fixture {
    /// Load a bundled fixture set by name.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] for an unknown set name or malformed YAML.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let raw = match name {
            "storefront" => include_str!("fixtures/storefront.yaml"),
            other => return Err(FixtureError::UnknownSet(other.to_owned())),
        };

        Self::from_yaml(raw)
    }

    /// Parse a fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] when the YAML does not describe a product catalog.
    pub fn from_yaml(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(raw)?)
    }

    /// Look up a product by name.
    pub fn product(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.name == name)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn storefront_set_loads() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        assert!(!fixture.products.is_empty());

        Ok(())
    }

    #[test]
    fn products_carry_minor_unit_prices() -> TestResult {
        let fixture = Fixture::from_set("storefront")?;

        let kettle = fixture
            .product("Stovetop Kettle")
            .expect("catalog should include the kettle");

        assert_eq!(kettle.price, 24_99);
        assert!(kettle.stock > 0);

        Ok(())
    }

    #[test]
    fn unknown_set_errors() {
        let result = Fixture::from_set("warehouse");

        assert!(
            matches!(result, Err(FixtureError::UnknownSet(ref name)) if name == "warehouse"),
            "expected UnknownSet, got {result:?}"
        );
    }

    #[test]
    fn malformed_yaml_errors() {
        let result = Fixture::from_yaml("products: [not: [a: catalog");

        assert!(
            matches!(result, Err(FixtureError::Yaml(_))),
            "expected Yaml error, got {result:?}"
        );
    }
}
