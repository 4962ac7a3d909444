//! Property tests for version floor matching in descriptors.

use proptest::prelude::*;

use catsync::domain::services::{parse_descriptor, VersionSet};
use catsync::domain::value_objects::{CatalogVersion, ResourceLocation};

fn version() -> impl Strategy<Value = (u32, u32, u32)> {
    (0u32..12, 0u32..6, 0u32..4)
}

fn tag((major, minor, patch): (u32, u32, u32)) -> String {
    if patch == 0 {
        format!("{major}.{minor}")
    } else {
        format!("{major}.{minor}.{patch}")
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the floor is the greatest listed version not above the request.
    #[test]
    fn property_floor_is_greatest_not_above(
        listed in proptest::collection::vec(version(), 1..8),
        requested in version()
    ) {
        let mut set = VersionSet::new();
        for v in &listed {
            set.insert(&tag(*v)).unwrap();
        }
        let requested_version = CatalogVersion::new(requested.0, requested.1, requested.2);

        let expected = listed
            .iter()
            .filter(|v| **v <= requested)
            .max()
            .map(|v| CatalogVersion::new(v.0, v.1, v.2));
        let actual = set
            .floor(&requested_version)
            .map(|t| t.parse::<CatalogVersion>().unwrap());

        prop_assert_eq!(actual, expected);
    }

    /// PROPERTY: a publisher whose versions are all newer than the application
    /// ends the parse. Publishers before it are kept, it and everything after
    /// it are dropped, and no warning is recorded for the cut-off.
    #[test]
    fn property_too_new_publisher_ends_the_catalog(
        newer in proptest::collection::vec(9u32..20, 1..4),
        before in 0usize..3,
        after in 1usize..3,
        older in 1u32..9
    ) {
        let mut text = String::new();
        for i in 0..before {
            text.push_str(&format!(
                "[Before{i}]\nFormat=pgz\nVersion_{older}.0_PgzFiles=ftp://h/before{i}.pgz\n"
            ));
        }
        text.push_str("[Future]\nFormat=pgz\n");
        for major in &newer {
            text.push_str(&format!("Version_{major}.0_PgzFiles=ftp://h/{major}/PGSuper.pgz\n"));
        }
        for i in 0..after {
            text.push_str(&format!(
                "[After{i}]\nFormat=pgz\nVersion_{older}.0_PgzFiles=ftp://h/after{i}.pgz\n"
            ));
        }

        let descriptor = parse_descriptor(&text, &CatalogVersion::new(8, 5, 0)).unwrap();

        let expected: Vec<String> = (0..before).map(|i| format!("Before{i}")).collect();
        prop_assert_eq!(descriptor.publisher_names(), expected);
        prop_assert!(descriptor.warnings().is_empty());
        if before > 0 {
            let expected_archive = "ftp://h/before0.pgz".to_string();
            match &descriptor.get("Before0").unwrap().location {
                ResourceLocation::Bundle { archive } => prop_assert_eq!(archive, &expected_archive),
                other => prop_assert!(false, "unexpected location {:?}", other),
            }
        }
    }

    /// PROPERTY: parsing arbitrary text never panics.
    #[test]
    fn property_parse_never_panics(text in "[\\[\\]=A-Za-z0-9_. \n]{0,200}") {
        let _ = parse_descriptor(&text, &CatalogVersion::new(8, 0, 0));
    }
}
