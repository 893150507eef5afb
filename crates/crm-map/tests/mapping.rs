//! Mapping table properties across every entity type.

use std::io::Write;

use crm_map::{Destination, FieldMapper, MappingOverrides, header_rules};
use crm_model::EntityType;

#[test]
fn known_headers_map_to_exactly_one_field_and_are_idempotent() {
    for entity in EntityType::ALL {
        let mapper = FieldMapper::new(entity);
        for rule in header_rules(entity) {
            let Some(Destination::Field(field)) = mapper.resolve(rule.header) else {
                continue;
            };
            let once = mapper.map_headers(&[rule.header.to_string()]);
            assert_eq!(once.fields(), vec![field.as_str()], "{entity}: {}", rule.header);

            let twice = mapper.map_headers(&[field.clone()]);
            assert_eq!(twice.fields(), once.fields(), "{entity}: {field}");
        }
    }
}

#[test]
fn canonical_columns_map_to_themselves() {
    for entity in EntityType::ALL {
        let mapper = FieldMapper::new(entity);
        for column in entity.schema().columns {
            assert_eq!(
                mapper.resolve(column.name),
                Some(&Destination::Field(column.name.to_string())),
                "{entity}"
            );
        }
    }
}

#[test]
fn contact_headers_from_a_typical_export() {
    let mapper = FieldMapper::new(EntityType::Contacts);
    let mapping = mapper.map_headers(&[
        "First Name".to_string(),
        "Last Name".to_string(),
        "Email".to_string(),
    ]);
    assert_eq!(mapping.fields(), vec!["first_name", "last_name", "email"]);
    assert!(mapping.unmapped.is_empty());
}

#[test]
fn overrides_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("mappings.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(br#"{ "vendors": { "Supplier Rating": "rating" } }"#)
        .unwrap();

    let overrides = MappingOverrides::load(&path).unwrap();
    let mapper = FieldMapper::with_overrides(EntityType::Vendors, &overrides);
    let mapping = mapper.map_headers(&["Supplier Rating".to_string()]);
    assert_eq!(mapping.fields(), vec!["rating"]);
}
