use super::{clamp_max, clamp_min, facets, sort_listings, toggle, Facet, Range, SortKey};
use crate::models::Property;

/// Filter state for the rent listings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyCriteria {
    /// Bounds on `rent_per_month`; `None` means unconstrained
    pub rent: Option<Range>,
    /// Exact location names; empty matches every location
    pub locations: Vec<String>,
    /// `None` shows furnished and unfurnished alike
    pub furnished: Option<bool>,
    /// Only listings with at least one vacancy left
    pub available_only: bool,
    pub sort: Option<SortKey>,
}

impl PropertyCriteria {
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(range) = self.rent {
            if !range.contains(property.rent_per_month) {
                return false;
            }
        }

        if !self.locations.is_empty() && !self.locations.contains(&property.location) {
            return false;
        }

        if let Some(furnished) = self.furnished {
            if property.furnished != furnished {
                return false;
            }
        }

        !self.available_only || property.has_vacancy()
    }

    pub fn apply(&self, properties: &[Property]) -> Vec<Property> {
        let mut out: Vec<Property> = properties.iter().filter(|p| self.matches(p)).cloned().collect();
        sort_listings(&mut out, self.sort);
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFacets {
    pub locations: Vec<Facet<String>>,
    pub rent: Range,
}

impl PropertyFacets {
    pub fn derive(properties: &[Property]) -> Self {
        Self {
            locations: facets(properties, |p| Some(p.location.clone())),
            rent: Range::bounds(properties.iter().map(|p| p.rent_per_month)),
        }
    }
}

/// Interactive filter panel over rent listings
#[derive(Debug, Clone)]
pub struct PropertyPanel {
    properties: Vec<Property>,
    facets: PropertyFacets,
    criteria: PropertyCriteria,
}

impl PropertyPanel {
    pub fn new(properties: Vec<Property>) -> Self {
        let facets = PropertyFacets::derive(&properties);
        let criteria = Self::initial(&facets);
        Self {
            properties,
            facets,
            criteria,
        }
    }

    fn initial(facets: &PropertyFacets) -> PropertyCriteria {
        PropertyCriteria {
            rent: Some(facets.rent),
            ..PropertyCriteria::default()
        }
    }

    pub fn replace(&mut self, properties: Vec<Property>) {
        *self = Self::new(properties);
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn facets(&self) -> &PropertyFacets {
        &self.facets
    }

    pub fn criteria(&self) -> &PropertyCriteria {
        &self.criteria
    }

    pub fn toggle_location(&mut self, location: &str) {
        toggle(&mut self.criteria.locations, location.to_string());
    }

    pub fn clear_locations(&mut self) {
        self.criteria.locations.clear();
    }

    pub fn set_furnished(&mut self, furnished: Option<bool>) {
        self.criteria.furnished = furnished;
    }

    pub fn set_available_only(&mut self, available_only: bool) {
        self.criteria.available_only = available_only;
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.criteria.sort = sort;
    }

    pub fn set_min_rent(&mut self, value: f64) {
        let current = self.current_range();
        self.criteria.rent = Some(Range::new(clamp_min(value, current), current.max));
    }

    pub fn set_max_rent(&mut self, value: f64) {
        let current = self.current_range();
        let max = clamp_max(value, current, self.facets.rent);
        self.criteria.rent = Some(Range::new(current.min, max));
    }

    fn current_range(&self) -> Range {
        self.criteria.rent.unwrap_or(self.facets.rent)
    }

    pub fn reset(&mut self) {
        self.criteria = Self::initial(&self.facets);
    }

    pub fn is_dirty(&self) -> bool {
        self.criteria != Self::initial(&self.facets)
    }

    pub fn apply(&self) -> Vec<Property> {
        self.criteria.apply(&self.properties)
    }
}
