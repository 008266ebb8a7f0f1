//! Read-only product catalog.
//!
//! Products are loaded once at startup from a JSON array:
//!
//! ```json
//! [{
//!   "id": "block-print-tee",
//!   "name": "Block Print Tee",
//!   "image": "/static/products/tee.jpg",
//!   "price": { "amount": "1500.00", "currency_code": "PKR" },
//!   "available_stock": 12,
//!   "variants": { "Size": ["S", "M", "L"], "Colour": ["Indigo"] }
//! }]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use bazaar_core::{CartItem, CartItemId, Price, ProductId};
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading the catalog or resolving a product selection.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate product id in catalog: {0}")]
    DuplicateProduct(ProductId),

    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("invalid variant selection: {0}")]
    InvalidVariant(String),
}

/// A product that can be added to the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: Price,
    pub available_stock: u32,
    /// Variant options keyed by type, e.g. `Size -> [S, M, L]`.
    #[serde(default)]
    pub variants: BTreeMap<String, Vec<String>>,
}

impl Product {
    /// Parse and validate a `Type:Value,Type:Value` selection.
    ///
    /// Every variant type the product offers must be chosen exactly once,
    /// with one of its listed values.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidVariant` describing the first problem.
    pub fn parse_variants(&self, raw: &str) -> Result<BTreeMap<String, String>, CatalogError> {
        let mut selected = BTreeMap::new();

        for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (kind, value) = pair
                .split_once(':')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| CatalogError::InvalidVariant(format!("expected Type:Value, got {pair:?}")))?;

            let options = self
                .variants
                .get(kind)
                .ok_or_else(|| CatalogError::InvalidVariant(format!("{} has no {kind} option", self.name)))?;
            if !options.iter().any(|option| option == value) {
                return Err(CatalogError::InvalidVariant(format!(
                    "{value} is not a valid {kind} for {}",
                    self.name
                )));
            }
            if selected.insert(kind.to_string(), value.to_string()).is_some() {
                return Err(CatalogError::InvalidVariant(format!("{kind} chosen more than once")));
            }
        }

        if let Some(missing) = self.variants.keys().find(|kind| !selected.contains_key(*kind)) {
            return Err(CatalogError::InvalidVariant(format!("choose a {missing}")));
        }

        Ok(selected)
    }

    /// Build a new cart line for this product.
    #[must_use]
    pub fn cart_line(
        &self,
        id: CartItemId,
        quantity: u32,
        selected_variants: BTreeMap<String, String>,
    ) -> CartItem {
        CartItem {
            id,
            product_id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            price: self.price,
            quantity,
            available_stock: self.available_stock,
            selected_variants,
        }
    }
}

/// Products indexed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    /// A catalog with no products.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index a list of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut indexed = HashMap::with_capacity(products.len());
        for product in products {
            if let Some(previous) = indexed.insert(product.id.clone(), product) {
                return Err(CatalogError::DuplicateProduct(previous.id));
            }
        }
        Ok(Self { products: indexed })
    }

    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the JSON is malformed or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_products(serde_json::from_str(json)?)
    }

    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&json)
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` if the id is not in the catalog.
    pub fn product(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.products
            .get(id)
            .ok_or_else(|| CatalogError::UnknownProduct(id.clone()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
