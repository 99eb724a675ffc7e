use super::{add_output_data, conv_pool_network, random_network, seeded_rng};
use crate::assert_err;
use crate::ir::*;

#[test]
fn test_clone_net_scenario() {
    let fixture = conv_pool_network();
    let cloned = clone_net(&fixture.net).unwrap();

    assert_eq!(cloned.name(), "conv_pool");
    assert_eq!(cloned.precision, Precision::FP32);
    assert_eq!(cloned.layer_count(), 3);
    assert_eq!(cloned.data_count(), 3);

    let conv = cloned.get_layer(cloned.layer_by_name("conv").unwrap()).unwrap();
    let params = conv.params.as_convolution().unwrap();
    assert_eq!(params.kernel, (3, 3));
    assert_eq!(params.stride, (1, 1));
    assert_eq!(params.padding, (0, 0));
    let pool = cloned.get_layer(cloned.layer_by_name("pool").unwrap()).unwrap();
    assert_eq!(pool.params.as_pooling().unwrap().kernel, (2, 2));

    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["data"]);
    assert_eq!(cloned.outputs().keys().collect::<Vec<_>>(), vec!["pool_out"]);

    // 克隆与源网络的描述完全一致
    assert_eq!(cloned.describe().unwrap(), fixture.net.describe().unwrap());
}

#[test]
fn test_clone_net_rebuilds_links() {
    let fixture = conv_pool_network();
    let cloned = clone_net(&fixture.net).unwrap();

    let conv = cloned.layer_by_name("conv").unwrap();
    let pool = cloned.layer_by_name("pool").unwrap();
    let conv_out = cloned.data_by_name("conv_out").unwrap();
    let data = cloned.get_data(conv_out).unwrap();

    // 双向链接都指向新网络中的对象，端口名与源一致
    assert_eq!(data.creator(), Some(conv));
    assert_eq!(data.port_of(pool), Some("pool"));
    assert_eq!(cloned.get_layer(conv).unwrap().out_data(), &[conv_out]);
    assert_eq!(cloned.get_layer(pool).unwrap().ins_data(), &[conv_out]);
}

#[test]
fn test_clone_net_shares_nothing() {
    let fixture = conv_pool_network();
    let before = fixture.net.describe().unwrap();

    let mut cloned = clone_net(&fixture.net).unwrap();
    let conv = cloned.layer_by_name("conv").unwrap();
    let layer = cloned.get_layer_mut(conv).unwrap();
    layer.precision = Precision::I8;
    layer.params.as_convolution_mut().unwrap().kernel = (5, 5);
    let conv_out = cloned.data_by_name("conv_out").unwrap();
    cloned.get_data_mut(conv_out).unwrap().dims = vec![1, 16, 4, 4];
    let extra = cloned
        .add_layer(Layer::from_params("relu", ReluParams::default()))
        .unwrap();
    cloned.connect_input(extra, conv_out).unwrap();

    assert_eq!(fixture.net.describe().unwrap(), before);
    assert_ne!(cloned.describe().unwrap(), before);
}

#[test]
fn test_clone_net_ports_preserved() {
    let mut net = Network::new();
    let input = net.add_layer(Layer::input("in")).unwrap();
    let add = net
        .add_layer(Layer::from_params("add", EltwiseParams::default()))
        .unwrap();
    let x = add_output_data(&mut net, input, "x");
    net.connect_input_port(add, x, "0").unwrap();
    add_output_data(&mut net, add, "sum");
    net.set_input_info(InputInfo::new(x)).unwrap();
    net.resolve_output();

    let cloned = clone_net(&net).unwrap();
    let x = cloned.data_by_name("x").unwrap();
    let add = cloned.layer_by_name("add").unwrap();
    assert_eq!(cloned.get_data(x).unwrap().port_of(add), Some("0"));
}

#[test]
fn test_clone_net_same_data_on_two_ports() {
    // x + x：同一数据从两个端口进入同一层
    let mut net = Network::new();
    let input = net.add_layer(Layer::input("in")).unwrap();
    let add = net
        .add_layer(Layer::from_params("add", EltwiseParams::default()))
        .unwrap();
    let x = add_output_data(&mut net, input, "x");
    net.connect_input_port(add, x, "0").unwrap();
    net.connect_input_port(add, x, "1").unwrap();
    add_output_data(&mut net, add, "sum");
    net.set_input_info(InputInfo::new(x)).unwrap();
    net.resolve_output();

    let cloned = clone_net(&net).unwrap();
    let x = cloned.data_by_name("x").unwrap();
    let add = cloned.layer_by_name("add").unwrap();
    let ports: Vec<&str> = cloned.get_data(x).unwrap().ports_of(add).collect();
    assert_eq!(ports, vec!["0", "1"]);
    assert_eq!(cloned.get_layer(add).unwrap().ins_data(), &[x, x]);

    let described = net.describe().unwrap();
    let inputs = &described.layer("add").unwrap().inputs;
    assert_eq!(
        inputs,
        &vec![
            ("0".to_string(), "x".to_string()),
            ("1".to_string(), "x".to_string())
        ]
    );
    assert_eq!(cloned.describe().unwrap(), described);
}

#[test]
fn test_clone_net_keeps_untouched_inputs_and_outputs() {
    let mut fixture = conv_pool_network();
    // 没有任何层触及的直通数据：既是声明输入也是声明输出
    let side = fixture
        .net
        .add_data(Data::new("side", &[1, 4], Precision::FP16))
        .unwrap();
    let mut info = InputInfo::new(side);
    info.precision = Precision::FP16;
    fixture.net.set_input_info(info).unwrap();
    fixture.net.add_output("side").unwrap();

    let cloned = clone_net(&fixture.net).unwrap();
    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["data", "side"]);
    assert_eq!(cloned.outputs().keys().collect::<Vec<_>>(), vec!["pool_out", "side"]);
    assert_eq!(cloned.inputs()["side"].precision, Precision::FP16);

    let side = cloned.data_by_name("side").unwrap();
    let data = cloned.get_data(side).unwrap();
    assert_eq!(data.dims(), &[1, 4]);
    assert_eq!(data.creator(), None);
    assert!(data.input_to().is_empty());
    assert_eq!(cloned.describe().unwrap(), fixture.net.describe().unwrap());
}

#[test]
fn test_clone_subset_registers_inputs_and_outputs() {
    let fixture = conv_pool_network();

    // 只克隆卷积：其输出的消费者在集合之外，所以成为网络输出
    let cloned = clone_net_layers(&fixture.net, &[fixture.conv], clone_layer).unwrap();
    assert_eq!(cloned.layer_count(), 1);
    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["data"]);
    assert_eq!(cloned.outputs().keys().collect::<Vec<_>>(), vec!["conv_out"]);

    // 只克隆池化：没有生产者的输入数据登记为网络输入
    let cloned = clone_net_layers(&fixture.net, &[fixture.pool], clone_layer).unwrap();
    assert_eq!(cloned.inputs().keys().collect::<Vec<_>>(), vec!["conv_out"]);
    assert_eq!(cloned.outputs().keys().collect::<Vec<_>>(), vec!["pool_out"]);
}

#[test]
fn test_clone_with_custom_cloner() {
    let fixture = conv_pool_network();
    let layers = fixture.net.layers().unwrap();
    let cloned = clone_net_layers(&fixture.net, &layers, |layer| {
        clone_layer(layer).with_attribute("origin", fixture.net.name())
    })
    .unwrap();

    for id in cloned.layer_ids() {
        let layer = cloned.get_layer(id).unwrap();
        assert_eq!(layer.attributes.get("origin").map(String::as_str), Some("conv_pool"));
    }
}

#[test]
fn test_prior_box_consumer_not_output() {
    let build = |consumer_type: &str| {
        let mut fixture = conv_pool_network();
        let conv_out = fixture.net.data_by_name("conv_out").unwrap();
        let extra = fixture
            .net
            .add_layer(Layer::new("extra", consumer_type, Generic))
            .unwrap();
        fixture.net.connect_input(extra, conv_out).unwrap();
        add_output_data(&mut fixture.net, extra, "extra_out");
        fixture
    };

    // PriorBox 消费者在集合之外时，不因此把数据标记为输出（类型名忽略大小写）
    let fixture = build("PriorBox");
    let layers = [fixture.input, fixture.conv, fixture.pool];
    let cloned = clone_net_layers(&fixture.net, &layers, clone_layer).unwrap();
    assert_eq!(cloned.outputs().keys().collect::<Vec<_>>(), vec!["pool_out"]);

    // 普通消费者在集合之外：数据成为输出
    let fixture = build("ReLU");
    let layers = [fixture.input, fixture.conv, fixture.pool];
    let cloned = clone_net_layers(&fixture.net, &layers, clone_layer).unwrap();
    assert_eq!(
        cloned.outputs().keys().collect::<Vec<_>>(),
        vec!["conv_out", "pool_out"]
    );

    // 清空排除列表后，PriorBox 消费者同样使数据成为输出
    let fixture = build("priorboxclustered");
    let layers = [fixture.input, fixture.conv, fixture.pool];
    let options = CloneOptions {
        output_excluded_types: Vec::new(),
        ..Default::default()
    };
    let cloned = clone_net_with_options(&fixture.net, &layers, clone_layer, &options).unwrap();
    assert_eq!(
        cloned.outputs().keys().collect::<Vec<_>>(),
        vec!["conv_out", "pool_out"]
    );
}

#[test]
fn test_clone_missing_consumer_port() {
    let mut fixture = conv_pool_network();
    let data = fixture.net.data_by_name("data").unwrap();
    // 人为破坏不变式：卷积仍把 data 列为输入，但 data 的消费映射里没有它
    fixture.net.get_data_mut(data).unwrap().input_to.clear();

    let layers = [fixture.input, fixture.conv, fixture.pool];
    let result = clone_net_layers(&fixture.net, &layers, clone_layer);
    assert_err!(result, IrError::MissingConsumerPort("conv", "data"));
}

#[test]
fn test_clone_net_with_cycle() {
    let mut net = Network::new();
    let x = net.add_layer(Layer::from_params("x", ReluParams::default())).unwrap();
    let y = net.add_layer(Layer::from_params("y", TanhParams)).unwrap();
    let x_out = add_output_data(&mut net, x, "x_out");
    let y_out = add_output_data(&mut net, y, "y_out");
    net.connect_input(y, x_out).unwrap();
    net.connect_input(x, y_out).unwrap();

    assert_err!(clone_net(&net), IrError::CycleDetected(_));
}

#[test]
fn test_random_clone_fidelity_and_reclone() {
    let mut rng = seeded_rng(7);
    for _ in 0..20 {
        let net = random_network(&mut rng, 12);
        let source = net.describe().unwrap();

        let cloned = clone_net(&net).unwrap();
        assert_eq!(cloned.describe().unwrap(), source);
        assert_eq!(cloned.layer_count(), net.layer_count());
        assert_eq!(cloned.data_count(), net.data_count());

        let recloned = clone_net(&cloned).unwrap();
        assert_eq!(recloned.describe().unwrap(), cloned.describe().unwrap());
    }
}
