//! Property -> LinkML attribute mapping

use indexmap::IndexMap;

use super::names::to_attribute_name;
use super::types::{ArrayConstraint, CollectionType, EnumType, LinkMLAttribute, RangeKind};
use crate::model::Attribute;

/// Map a single property descriptor.
///
/// Unknown ranges and collection types are dropped rather than rejected.
pub fn property_to_attribute(property: &Attribute) -> LinkMLAttribute {
    let range = property.range.as_deref().and_then(RangeKind::parse);
    let collection = property
        .collection_type
        .as_deref()
        .and_then(CollectionType::from_name);

    let multivalued = matches!(collection, Some(CollectionType::List | CollectionType::Set));
    let array = match (collection, property.dimensions) {
        (Some(CollectionType::Array), Some(dimensions)) => Some(ArrayConstraint {
            exact_number_dimensions: Some(dimensions),
        }),
        _ => None,
    };

    LinkMLAttribute {
        range: range.map(|r| r.linkml_range().to_string()),
        description: Some(property.description.clone()),
        multivalued: multivalued.then_some(true),
        unique_values: (collection == Some(CollectionType::Set)).then_some(true),
        required: property.required,
        identifier: property.identifier,
        pattern: match range {
            Some(RangeKind::Regex(regex)) => Some(regex.pattern().to_string()),
            _ => None,
        },
        array,
        ..Default::default()
    }
}

/// Map a property map, keyed by attribute name, preserving order
pub fn properties_to_attributes(
    properties: &IndexMap<String, Attribute>,
) -> IndexMap<String, LinkMLAttribute> {
    properties
        .iter()
        .map(|(key, property)| (to_attribute_name(key), property_to_attribute(property)))
        .collect()
}

/// Enum types referenced by a property map, in property order
pub fn referenced_enums(properties: &IndexMap<String, Attribute>) -> impl Iterator<Item = EnumType> + '_ {
    properties
        .values()
        .filter_map(|p| p.range.as_deref().and_then(EnumType::from_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_range_and_flags() {
        let attr = property_to_attribute(
            &Attribute::described("Age in years").with_range("integer").required(),
        );
        assert_eq!(attr.range.as_deref(), Some("integer"));
        assert_eq!(attr.description.as_deref(), Some("Age in years"));
        assert_eq!(attr.required, Some(true));
        assert_eq!(attr.identifier, None);
        assert_eq!(attr.multivalued, None);
        assert_eq!(attr.pattern, None);
    }

    #[test]
    fn test_unknown_range_is_dropped() {
        let attr = property_to_attribute(&Attribute::described("Money").with_range("currency"));
        assert_eq!(attr.range, None);
        assert_eq!(attr.description.as_deref(), Some("Money"));
    }

    #[test]
    fn test_collection_types() {
        let list = property_to_attribute(&Attribute::described("").with_collection("list"));
        assert_eq!(list.multivalued, Some(true));
        assert_eq!(list.unique_values, None);

        let set = property_to_attribute(&Attribute::described("").with_collection("set"));
        assert_eq!(set.multivalued, Some(true));
        assert_eq!(set.unique_values, Some(true));

        let array = property_to_attribute(
            &Attribute::described("").with_collection("array").with_dimensions(3),
        );
        assert_eq!(array.multivalued, None);
        assert_eq!(array.array.unwrap().exact_number_dimensions, Some(3));

        let array_without_dimensions =
            property_to_attribute(&Attribute::described("").with_collection("array"));
        assert!(array_without_dimensions.array.is_none());

        let bogus = property_to_attribute(&Attribute::described("").with_collection("bag"));
        assert_eq!(bogus.multivalued, None);
        assert!(bogus.array.is_none());
    }

    #[test]
    fn test_regex_range_emits_pattern() {
        let attr = property_to_attribute(
            &Attribute::described("Phone").with_range("American Phone Number"),
        );
        assert_eq!(attr.range.as_deref(), Some("string"));
        assert_eq!(attr.pattern.as_deref(), Some(r"^[\d\(\)\-]+$"));
    }

    #[test]
    fn test_keys_become_attribute_names() {
        let mut properties = IndexMap::new();
        properties.insert("Date of birth".to_string(), Attribute::described("DOB").with_range("date"));
        properties.insert("gender".to_string(), Attribute::described("G").with_range("Gender"));

        let attributes = properties_to_attributes(&properties);
        let keys: Vec<_> = attributes.keys().cloned().collect();
        assert_eq!(keys, vec!["dateOfBirth", "gender"]);
        assert_eq!(attributes["gender"].range.as_deref(), Some("Gender"));

        let enums: Vec<_> = referenced_enums(&properties).collect();
        assert_eq!(enums, vec![EnumType::Gender]);
    }
}
