//! Property tests for server creation strings.

use proptest::prelude::*;

use catsync::catalog::{decode_creation_string, ServerKind};

fn field() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9:/\\\\._ -]{0,40}")
        .unwrap()
        .prop_map(|s| s.trim().to_string())
        .prop_filter("non-empty", |s| !s.is_empty())
}

fn kind() -> impl Strategy<Value = ServerKind> {
    prop_oneof![
        field().prop_map(|address| ServerKind::Ftp { address }),
        field().prop_map(|address| ServerKind::Http { address }),
        field().prop_map(|address| ServerKind::LocalFileSystemIni { address }),
        (proptest::option::of(field()), field()).prop_map(|(library, template_folder)| {
            ServerKind::LocalFileSystem {
                library_file: library.unwrap_or_default(),
                template_folder,
            }
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: encoding then decoding yields the same server.
    #[test]
    fn property_creation_string_round_trips(kind in kind()) {
        let encoded = kind.creation_string();
        let decoded = decode_creation_string(&encoded).unwrap();
        prop_assert_eq!(decoded.name, None);
        prop_assert_eq!(decoded.kind, kind);
    }

    /// PROPERTY: decoding arbitrary text never panics.
    #[test]
    fn property_decode_never_panics(text in "\\PC{0,60}") {
        let _ = decode_creation_string(&text);
    }
}
