//! Property tests for the package naming convention

use augment_harness::naming::is_valid_package_id;
use augment_harness::{to_implementation_name, to_package_id};
use proptest::prelude::*;

fn package_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}(_[a-z][a-z0-9]{0,7}){0,3}"
}

proptest! {
    /// Valid package ids survive a round trip through the class name
    #[test]
    fn package_ids_round_trip(package_id in package_id_strategy()) {
        prop_assert!(is_valid_package_id(&package_id));
        let class_name = to_implementation_name(&package_id);
        prop_assert_eq!(to_package_id(&class_name), package_id);
    }

    /// Class names never contain the separator
    #[test]
    fn class_names_are_camel_case(package_id in package_id_strategy()) {
        let class_name = to_implementation_name(&package_id);
        prop_assert!(!class_name.contains('_'));
        prop_assert!(class_name.starts_with(|c: char| c.is_ascii_uppercase()));
    }

    /// Names with characters outside the convention are rejected
    #[test]
    fn uppercase_names_are_not_package_ids(name in "[A-Z][a-zA-Z]{0,10}") {
        prop_assert!(!is_valid_package_id(&name));
    }
}
