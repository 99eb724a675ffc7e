use super::{add_output_data, conv_pool_network};
use crate::ir::*;

#[test]
fn test_default_options() {
    let options = CloneOptions::default();
    assert_eq!(options.input_layer_types, vec!["input"]);
    assert_eq!(
        options.output_excluded_types,
        vec!["priorbox", "PriorBoxClustered"]
    );
}

#[test]
fn test_options_from_json() {
    // 缺省字段保持默认值
    let options = CloneOptions::from_json(r#"{ "input_layer_types": ["Input", "Const"] }"#).unwrap();
    assert_eq!(options.input_layer_types, vec!["Input", "Const"]);
    assert_eq!(
        options.output_excluded_types,
        CloneOptions::default().output_excluded_types
    );

    assert_eq!(CloneOptions::from_json("{}").unwrap(), CloneOptions::default());
    assert!(CloneOptions::from_json("[1, 2]").is_err());
}

#[test]
fn test_custom_input_layer_types() {
    let mut fixture = conv_pool_network();
    // 常量层生产的数据喂给池化层的第二个端口
    let constant = fixture
        .net
        .add_layer(Layer::new("bias", "Const", Generic))
        .unwrap();
    let bias = add_output_data(&mut fixture.net, constant, "bias");
    fixture.net.connect_input_port(fixture.pool, bias, "pool.1").unwrap();

    let layers = [fixture.input, constant, fixture.conv, fixture.pool];
    let cloned = clone_net_layers(&fixture.net, &layers, clone_layer).unwrap();
    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["data"]);

    let options = CloneOptions::from_json(r#"{ "input_layer_types": ["input", "const"] }"#).unwrap();
    let cloned = clone_net_with_options(&fixture.net, &layers, clone_layer, &options).unwrap();
    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["bias", "data"]);
}
