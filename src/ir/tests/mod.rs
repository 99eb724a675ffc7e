use crate::ir::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod clone_net;
mod config;

/// 测试中各网络的句柄
pub(super) struct ConvPool {
    pub net: Network,
    pub input: LayerId,
    pub conv: LayerId,
    pub pool: LayerId,
}

/// input -> Convolution(3x3, stride 1, pad 0) -> Pooling(2x2) -> 输出 `pool_out`
pub(super) fn conv_pool_network() -> ConvPool {
    let mut net = Network::with_name("conv_pool");
    net.precision = Precision::FP32;

    let input = net.add_layer(Layer::input("data")).unwrap();
    let conv = net
        .add_layer(Layer::from_params(
            "conv",
            ConvolutionParams {
                weightable: Weightable {
                    weights_dims: vec![16, 3, 3, 3],
                    biases_dims: vec![16],
                },
                kernel: (3, 3),
                stride: (1, 1),
                padding: (0, 0),
                out_depth: 16,
                ..Default::default()
            },
        ))
        .unwrap();
    let pool = net
        .add_layer(Layer::from_params(
            "pool",
            PoolingParams {
                kernel: (2, 2),
                stride: (2, 2),
                pool_type: PoolType::Max,
                ..Default::default()
            },
        ))
        .unwrap();

    let data = net
        .add_data(Data::new("data", &[1, 3, 8, 8], Precision::FP32))
        .unwrap();
    let conv_out = net
        .add_data(Data::new("conv_out", &[1, 16, 6, 6], Precision::FP32))
        .unwrap();
    let pool_out = net
        .add_data(Data::new("pool_out", &[1, 16, 3, 3], Precision::FP32))
        .unwrap();

    net.connect_output(input, data).unwrap();
    net.connect_input(conv, data).unwrap();
    net.connect_output(conv, conv_out).unwrap();
    net.connect_input(pool, conv_out).unwrap();
    net.connect_output(pool, pool_out).unwrap();

    net.set_input_info(InputInfo::new(data)).unwrap();
    net.add_output("pool_out").unwrap();

    ConvPool {
        net,
        input,
        conv,
        pool,
    }
}

/// 菱形：input -> a -> (b, c) -> d
pub(super) struct Diamond {
    pub net: Network,
    pub a: LayerId,
    pub b: LayerId,
    pub c: LayerId,
    pub d: LayerId,
}

pub(super) fn diamond_network() -> Diamond {
    let mut net = Network::with_name("diamond");
    let input = net.add_layer(Layer::input("in")).unwrap();
    let a = net.add_layer(Layer::from_params("a", ReluParams::default())).unwrap();
    let b = net.add_layer(Layer::from_params("b", TanhParams)).unwrap();
    let c = net.add_layer(Layer::from_params("c", SigmoidParams)).unwrap();
    let d = net
        .add_layer(Layer::from_params("d", EltwiseParams::default()))
        .unwrap();

    let in_data = add_output_data(&mut net, input, "in_data");
    let a_out = add_output_data(&mut net, a, "a_out");
    let b_out = add_output_data(&mut net, b, "b_out");
    let c_out = add_output_data(&mut net, c, "c_out");
    add_output_data(&mut net, d, "d_out");

    net.connect_input(a, in_data).unwrap();
    net.connect_input(b, a_out).unwrap();
    net.connect_input(c, a_out).unwrap();
    net.connect_input(d, b_out).unwrap();
    net.connect_input(d, c_out).unwrap();

    net.set_input_info(InputInfo::new(in_data)).unwrap();
    net.resolve_output();

    Diamond { net, a, b, c, d }
}

/// 新建数据并令 `layer` 成为其生产者
pub(super) fn add_output_data(net: &mut Network, layer: LayerId, name: &str) -> DataId {
    let data = net.add_data(Data::new(name, &[1, 8], Precision::FP32)).unwrap();
    net.connect_output(layer, data).unwrap();
    data
}

/// 随机有向无环网络：每层消费 1~2 个此前产生的（互不相同的）数据，产生一个数据
pub(super) fn random_network(rng: &mut StdRng, layer_count: usize) -> Network {
    let mut net = Network::with_name("random");
    let input = net.add_layer(Layer::input("in")).unwrap();
    let in_data = add_output_data(&mut net, input, "in_data");
    net.set_input_info(InputInfo::new(in_data)).unwrap();

    let mut produced = vec![in_data];
    for i in 0..layer_count {
        let name = format!("l{i}");
        let params: LayerParams = match rng.gen_range(0..5) {
            0 => ConvolutionParams {
                kernel: (rng.gen_range(1..4), rng.gen_range(1..4)),
                out_depth: rng.gen_range(1..32),
                ..Default::default()
            }
            .into(),
            1 => PoolingParams::default().into(),
            2 => ReluParams {
                negative_slope: 0.1,
            }
            .into(),
            3 => FullyConnectedParams {
                out_num: rng.gen_range(1..100),
                ..Default::default()
            }
            .into(),
            _ => EltwiseParams::default().into(),
        };
        let layer = net.add_layer(Layer::from_params(&name, params)).unwrap();

        // 只有第一层直接消费网络输入，其余层都可从它到达
        let choices = if produced.len() > 1 {
            &produced[1..]
        } else {
            &produced[..]
        };
        let first = choices[rng.gen_range(0..choices.len())];
        net.connect_input(layer, first).unwrap();
        if choices.len() > 1 && rng.gen_bool(0.5) {
            let second = choices[rng.gen_range(0..choices.len())];
            if second != first {
                net.connect_input(layer, second).unwrap();
            }
        }
        produced.push(add_output_data(&mut net, layer, &format!("{name}_out")));
    }
    net.resolve_output();
    net
}

pub(super) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
