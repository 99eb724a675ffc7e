use crate::assert_err;

#[derive(Debug)]
enum DemoError {
    Named(String),
    MissingConsumerPort { layer: String, data: String },
}

#[test]
fn test_assert_err_macro() {
    let named: Result<(), DemoError> = Err(DemoError::Named("conv1".to_string()));
    assert_err!(named);
    assert_err!(named, DemoError::Named("conv1"));
    assert_err!(named, DemoError::Named(msg) if msg.starts_with("conv"));

    let port: Result<u32, DemoError> = Err(DemoError::MissingConsumerPort {
        layer: "pool1".to_string(),
        data: "conv1".to_string(),
    });
    assert_err!(port, DemoError::MissingConsumerPort("pool1", "conv1"));
}
