/*
 * @Date         : 2026-03-02
 * @Description  : 将 IR 网络输出为 Graphviz DOT 文本
 *
 * 只依赖遍历 API（森林 DFS）与数据的只读查询接口。
 * 使用 `strict digraph`，同一条边被打印多次时由 Graphviz 去重。
 */

use super::data::Data;
use super::error::IrError;
use super::layer::{Layer, LayerId};
use super::network::Network;
use super::traverse::{forest_dfs, input_consumers};
use std::collections::{BTreeSet, HashSet};

/// 有序的 (键, 值) 属性列表
pub type OrderedProperties = Vec<(String, String)>;

/// 逐层回调：向第一个列表追加显示属性，向第二个列表追加节点样式
pub type LayerCallback<'a> = dyn FnMut(&Layer, &mut OrderedProperties, &mut OrderedProperties) + 'a;

const DATA_COLOR: &str = "#FCF6E3";
const LAYER_COLOR: &str = "#D9EAD3";

/// 生成 DOT 文本；网络没有声明任何输入时返回 `NoInputs`
pub fn save_graph_to_dot(
    network: &Network,
    mut layer_cb: Option<&mut LayerCallback<'_>>,
) -> Result<String, IrError> {
    if network.inputs().is_empty() {
        return Err(IrError::NoInputs);
    }

    // 网络输入的全部消费层作为森林的头
    let heads: Vec<LayerId> = input_consumers(network)?
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut order = Vec::new();
    forest_dfs(network, &heads, |layer| order.push(layer), true)?;

    let mut out = String::from("strict digraph Network {\n");
    let mut printed_data = HashSet::new();
    for id in order {
        let layer = network.get_layer(id)?;
        print_layer_node(&mut out, layer, layer_cb.as_deref_mut());

        for &data in layer.out_data() {
            let data = network.get_data(data)?;
            if printed_data.insert(data.name().to_string()) {
                print_data_node(&mut out, data);
            }
            print_edge(&mut out, layer, data, false);
        }
        for &data in layer.ins_data() {
            let data = network.get_data(data)?;
            if printed_data.insert(data.name().to_string()) {
                print_data_node(&mut out, data);
            }
            print_edge(&mut out, layer, data, true);
        }
    }
    out.push_str("}\n");
    Ok(out)
}

fn format_size((x, y): (usize, usize)) -> String {
    if x == y {
        x.to_string()
    } else {
        format!("{x}x{y}")
    }
}

/// DOT 节点名中不能出现 `.` 与 `/`
fn clean_node_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '.')
        .map(|c| if c == '/' { '_' } else { c })
        .collect()
}

fn print_layer_node(
    out: &mut String,
    layer: &Layer,
    layer_cb: Option<&mut LayerCallback<'_>>,
) {
    let mut printed: OrderedProperties = vec![("type".to_string(), layer.layer_type.clone())];
    let mut node: OrderedProperties = vec![
        ("shape".to_string(), "box".to_string()),
        ("style".to_string(), "filled".to_string()),
        ("fillcolor".to_string(), LAYER_COLOR.to_string()),
    ];

    if let Some(conv) = layer.params.as_convolution() {
        printed.push(("kernel size".to_string(), format_size(conv.kernel)));
        printed.push(("output depth".to_string(), conv.out_depth.to_string()));
        printed.push(("padding".to_string(), format_size(conv.padding)));
        printed.push(("stride".to_string(), format_size(conv.stride)));
    } else if let Some(pool) = layer.params.as_pooling() {
        printed.push(("window size".to_string(), format_size(pool.kernel)));
        printed.push(("padding".to_string(), format_size(pool.padding)));
        printed.push(("stride".to_string(), format_size(pool.stride)));
    }

    if let Some(cb) = layer_cb {
        cb(layer, &mut printed, &mut node);
    }

    let node_name = format!("layer_{}", clean_node_name(layer.name()));
    print_node(out, &node_name, layer.name(), &node, &printed);
}

fn print_data_node(out: &mut String, data: &Data) {
    let dims: Vec<String> = data.dims().iter().map(ToString::to_string).collect();
    let printed = vec![("dims".to_string(), format!("[{}]", dims.join(", ")))];
    let node = vec![
        ("shape".to_string(), "ellipse".to_string()),
        ("style".to_string(), "filled".to_string()),
        ("fillcolor".to_string(), DATA_COLOR.to_string()),
    ];
    let node_name = format!("data_{}", clean_node_name(data.name()));
    print_node(out, &node_name, data.name(), &node, &printed);
}

fn print_node(
    out: &mut String,
    node_name: &str,
    title: &str,
    node: &OrderedProperties,
    printed: &OrderedProperties,
) {
    out.push_str(&format!("\t{node_name} ["));
    for (key, value) in node {
        out.push_str(&format!("{key}=\"{value}\", "));
    }
    out.push_str(&format!("label=\"{}", title.replace('/', "_")));
    for (key, value) in printed {
        out.push_str(&format!("\\n{key}: {value}"));
    }
    out.push_str("\"];\n");
}

/// `reverse` 为 true 时画 data -> layer
fn print_edge(out: &mut String, layer: &Layer, data: &Data, reverse: bool) {
    let layer_name = format!("layer_{}", clean_node_name(layer.name()));
    let data_name = format!("data_{}", clean_node_name(data.name()));
    let (from, to) = if reverse {
        (data_name, layer_name)
    } else {
        (layer_name, data_name)
    };
    out.push_str(&format!("\t{from} -> {to};\n"));
}
