/// Checks that `$obj` survives a round trip through JSON and Message Pack. The calling crate must
/// depend on `serde_json` and `rmp_serde`.
#[macro_export]
macro_rules! test_serialization {
    ($obj_type:ty, $obj: expr) => {
        // Test JSON serialization
        let ser = serde_json::to_string(&$obj).unwrap();
        let deser = serde_json::from_str::<$obj_type>(&ser).unwrap();
        assert_eq!($obj, deser);

        // Test Message Pack serialization
        let ser = rmp_serde::to_vec_named(&$obj).unwrap();
        let deser = rmp_serde::from_slice::<$obj_type>(&ser).unwrap();
        assert_eq!($obj, deser);
    };
}
