//! UI property schema.
//!
//! Filters describe their settings UI as an ordered list of typed properties;
//! the host turns that into widgets. Property names are settings keys.

use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComboType {
    /// Drop-down whose text can also be typed freely.
    Editable,
    List,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ComboFormat {
    String,
    Int,
    Float,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListItem {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListProperty {
    pub name: String,
    pub description: String,
    pub combo: ComboType,
    pub format: ComboFormat,
    items: Vec<ListItem>,
}

impl ListProperty {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        combo: ComboType,
        format: ComboFormat,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            combo,
            format,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Inserts at `index`, clamped to the end of the list.
    pub fn insert_string(&mut self, index: usize, name: &str, value: &str) {
        let index = index.min(self.items.len());
        self.items.insert(
            index,
            ListItem {
                name: name.to_owned(),
                value: value.to_owned(),
            },
        );
    }

    /// Inserts `name` (as both label and value) keeping the list in
    /// case-insensitive lexical order. Names already present are skipped.
    pub fn insert_sorted(&mut self, name: &str) {
        if self.contains(name) {
            return;
        }
        let index = self
            .items
            .iter()
            .position(|item| caseless_cmp(name, &item.name) == Ordering::Less)
            .unwrap_or(self.items.len());
        self.insert_string(index, name, name);
    }
}

/// Case-insensitive order, ties broken by the exact bytes so it stays total.
fn caseless_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct IntSlider {
    pub name: String,
    pub description: String,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatSlider {
    pub name: String,
    pub description: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    List(ListProperty),
    IntSlider(IntSlider),
    FloatSlider(FloatSlider),
}

impl Property {
    pub fn name(&self) -> &str {
        match self {
            Property::List(p) => &p.name,
            Property::IntSlider(p) => &p.name,
            Property::FloatSlider(p) => &p.name,
        }
    }
}

impl From<ListProperty> for Property {
    fn from(p: ListProperty) -> Self {
        Property::List(p)
    }
}

impl From<IntSlider> for Property {
    fn from(p: IntSlider) -> Self {
        Property::IntSlider(p)
    }
}

impl From<FloatSlider> for Property {
    fn from(p: FloatSlider) -> Self {
        Property::FloatSlider(p)
    }
}

/// Ordered property list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    props: Vec<Property>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, prop: impl Into<Property>) {
        self.props.push(prop.into());
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> ListProperty {
        ListProperty::new("source", "Source", ComboType::Editable, ComboFormat::String)
    }

    fn names(list: &ListProperty) -> Vec<&str> {
        list.items().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn sorted_insert_ignores_case() {
        let mut l = list();
        for name in ["beta", "Alpha", "gamma", "Delta", "alpha2"] {
            l.insert_sorted(name);
        }
        assert_eq!(names(&l), vec!["Alpha", "alpha2", "beta", "Delta", "gamma"]);
    }

    #[test]
    fn sorted_insert_skips_duplicates() {
        let mut l = list();
        l.insert_sorted("Scene");
        l.insert_sorted("Scene");
        assert_eq!(l.items().len(), 1);
    }

    #[test]
    fn case_only_difference_is_stable() {
        let mut l = list();
        l.insert_sorted("light");
        l.insert_sorted("Light");
        assert_eq!(names(&l), vec!["Light", "light"]);
    }

    #[test]
    fn insert_string_clamps_index() {
        let mut l = list();
        l.insert_string(10, "a", "a");
        l.insert_string(0, "", "");
        assert_eq!(names(&l), vec!["", "a"]);
    }

    #[test]
    fn lookup_by_name() {
        let mut props = Properties::new();
        props.add(list());
        props.add(IntSlider {
            name: "partitions".into(),
            description: "Grid Size".into(),
            min: 1,
            max: 64,
            step: 1,
        });
        assert_eq!(props.len(), 2);
        assert!(matches!(props.get("partitions"), Some(Property::IntSlider(_))));
        assert!(props.get("missing").is_none());
    }
}
