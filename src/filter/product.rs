use super::{clamp_max, clamp_min, facets, sort_listings, toggle, Facet, Range, SortKey};
use crate::models::{Id, Product};

/// Filter state for the shop catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCriteria {
    /// Bounds on `selling_price`; `None` means unconstrained
    pub price: Option<Range>,
    /// Brand names, compared case-insensitively; empty matches every brand
    pub brands: Vec<String>,
    /// Empty matches every category
    pub categories: Vec<Id>,
    pub in_stock: bool,
    pub sort: Option<SortKey>,
}

impl ProductCriteria {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(range) = self.price {
            if !range.contains(product.selling_price) {
                return false;
            }
        }

        if !self.brands.is_empty() {
            let brand = product.brand.to_lowercase();
            if !self.brands.iter().any(|b| b.to_lowercase() == brand) {
                return false;
            }
        }

        if !self.categories.is_empty() {
            match &product.category {
                Some(category) if self.categories.contains(category) => {}
                _ => return false,
            }
        }

        !self.in_stock || product.in_stock()
    }

    /// Filter then sort into a new vector; `products` is left untouched
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut out: Vec<Product> = products.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_listings(&mut out, self.sort);
        out
    }
}

/// Values available for filtering, derived from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFacets {
    pub brands: Vec<Facet<String>>,
    pub categories: Vec<Facet<Id>>,
    pub price: Range,
}

impl ProductFacets {
    pub fn derive(products: &[Product]) -> Self {
        Self {
            brands: facets(products, |p| Some(p.brand.to_lowercase())),
            categories: facets(products, |p| p.category.clone()),
            price: Range::bounds(products.iter().map(|p| p.selling_price)),
        }
    }
}

/// Interactive filter panel over the shop catalog
#[derive(Debug, Clone)]
pub struct ProductPanel {
    products: Vec<Product>,
    facets: ProductFacets,
    criteria: ProductCriteria,
}

impl ProductPanel {
    pub fn new(products: Vec<Product>) -> Self {
        let facets = ProductFacets::derive(&products);
        let criteria = Self::initial(&facets);
        Self {
            products,
            facets,
            criteria,
        }
    }

    fn initial(facets: &ProductFacets) -> ProductCriteria {
        ProductCriteria {
            price: Some(facets.price),
            ..ProductCriteria::default()
        }
    }

    /// Swap in a new collection, re-deriving facets and resetting the selection
    pub fn replace(&mut self, products: Vec<Product>) {
        *self = Self::new(products);
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn facets(&self) -> &ProductFacets {
        &self.facets
    }

    pub fn criteria(&self) -> &ProductCriteria {
        &self.criteria
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.criteria.brands, brand.to_lowercase());
    }

    pub fn clear_brands(&mut self) {
        self.criteria.brands.clear();
    }

    pub fn toggle_category(&mut self, category: Id) {
        toggle(&mut self.criteria.categories, category);
    }

    pub fn clear_categories(&mut self) {
        self.criteria.categories.clear();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.criteria.sort = sort;
    }

    pub fn set_in_stock(&mut self, in_stock: bool) {
        self.criteria.in_stock = in_stock;
    }

    pub fn set_min_price(&mut self, value: f64) {
        let current = self.current_range();
        self.criteria.price = Some(Range::new(clamp_min(value, current), current.max));
    }

    pub fn set_max_price(&mut self, value: f64) {
        let current = self.current_range();
        let max = clamp_max(value, current, self.facets.price);
        self.criteria.price = Some(Range::new(current.min, max));
    }

    fn current_range(&self) -> Range {
        self.criteria.price.unwrap_or(self.facets.price)
    }

    pub fn reset(&mut self) {
        self.criteria = Self::initial(&self.facets);
    }

    /// True when `reset` would change the selection
    pub fn is_dirty(&self) -> bool {
        self.criteria != Self::initial(&self.facets)
    }

    pub fn apply(&self) -> Vec<Product> {
        self.criteria.apply(&self.products)
    }
}
