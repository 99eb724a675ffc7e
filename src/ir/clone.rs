/*
 * @Date         : 2026-03-02
 * @Description  : 数据/层/网络的深拷贝
 *
 * 克隆结果拥有一套与源网络完全不相交的对象，所有链接都在新网络中显式重建，
 * 源网络与克隆之间不共享任何可变状态。
 */

use super::config::CloneOptions;
use super::data::{Data, DataId};
use super::error::IrError;
use super::layer::{Layer, LayerId};
use super::network::{InputInfo, Network};
use crate::utils::caseless::caseless_contains;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// 复制数据的描述字段，清空生产者与消费映射
pub fn clone_data(source: &Data) -> Data {
    let mut cloned = source.clone();
    cloned.creator = None;
    cloned.input_to.clear();
    cloned
}

/// 复制为同一具体类型的层（类型特有参数一并复制），清空 fused_with 与输入/输出列表
pub fn clone_layer(source: &Layer) -> Layer {
    let mut cloned = source.clone();
    cloned.clear_links();
    cloned
}

/// 克隆整个网络：按规范顺序克隆全部层，再原样补上源网络声明的输入与输出。
/// 没有任何层触及的声明输入/输出（如直通的输入数据）也一并克隆
pub fn clone_net(network: &Network) -> Result<Network, IrError> {
    let layers = network.layers()?;
    let mut net = clone_net_layers(network, &layers, clone_layer)?;

    for (name, info) in network.inputs() {
        let id = match net.data_by_name(name).ok() {
            Some(id) => id,
            None => net.add_data(clone_data(network.get_data(info.input_data())?))?,
        };
        let mut cloned_info = InputInfo::new(id);
        cloned_info.precision = info.precision;
        net.set_input_info(cloned_info)?;
    }
    for (name, &source_id) in network.outputs() {
        if net.data_by_name(name).is_err() {
            net.add_data(clone_data(network.get_data(source_id)?))?;
        }
        net.add_output(name)?;
    }
    Ok(net)
}

/// 克隆给定的层集合及其触及的全部数据，使用默认 [`CloneOptions`]
pub fn clone_net_layers<C>(
    source: &Network,
    layers: &[LayerId],
    layer_cloner: C,
) -> Result<Network, IrError>
where
    C: FnMut(&Layer) -> Layer,
{
    clone_net_with_options(source, layers, layer_cloner, &CloneOptions::default())
}

/// 克隆给定的层集合：
/// - 输入数据：复用或新建克隆，并以源层在该数据上的端口名登记克隆层
/// - 输出数据：复用或新建克隆并以克隆层为生产者；若源数据有集合外的消费者
///   （且不在 `output_excluded_types` 中），标记为网络输出
/// - 没有生产者或由输入占位层生产的数据登记为网络输入
/// - 最后按图形状补充推导输出
pub fn clone_net_with_options<C>(
    source: &Network,
    layers: &[LayerId],
    mut layer_cloner: C,
    options: &CloneOptions,
) -> Result<Network, IrError>
where
    C: FnMut(&Layer) -> Layer,
{
    debug!(network = source.name(), layers = layers.len(), "开始克隆网络");
    let mut net = Network::with_name(source.name());
    net.precision = source.precision;

    let members: HashSet<LayerId> = layers.iter().copied().collect();
    let mut cloner = DataCloner::default();

    for &src_id in layers {
        let src_layer = source.get_layer(src_id)?;
        let mut cloned = layer_cloner(src_layer);
        // 所有链接都要在新图中重建
        cloned.clear_links();
        let cloned_id = net.add_layer(cloned)?;

        // 同一数据被本层读取多次时，第 k 次读取对应第 k 个端口
        let mut occurrences: HashMap<DataId, usize> = HashMap::new();
        for &src_data in src_layer.ins_data() {
            let cloned_data = cloner.get_or_clone(source, &mut net, src_data)?;
            let data = source.get_data(src_data)?;
            let occurrence = occurrences.entry(src_data).or_default();
            let port = data
                .port_at(src_id, *occurrence)
                .ok_or_else(|| IrError::MissingConsumerPort {
                    layer: src_layer.name().to_string(),
                    data: data.name().to_string(),
                })?;
            *occurrence += 1;
            net.connect_input_port(cloned_id, cloned_data, port)?;
        }

        for &src_data in src_layer.out_data() {
            let cloned_data = cloner.get_or_clone(source, &mut net, src_data)?;
            net.connect_output(cloned_id, cloned_data)?;

            let data = source.get_data(src_data)?;
            for consumer in data.input_to().values() {
                let consumer_type = &source.get_layer(*consumer)?.layer_type;
                if !members.contains(consumer)
                    && !caseless_contains(&options.output_excluded_types, consumer_type)
                {
                    net.add_output(data.name())?;
                    break;
                }
            }
        }
    }

    for &data in &cloner.cloned {
        let is_input = match net.get_data(data)?.creator() {
            None => true,
            Some(creator) => caseless_contains(
                &options.input_layer_types,
                &net.get_layer(creator)?.layer_type,
            ),
        };
        if is_input {
            net.set_input_info(InputInfo::new(data))?;
        }
    }

    net.resolve_output();

    debug!(
        layers = net.layer_count(),
        data = net.data_count(),
        inputs = net.inputs().len(),
        outputs = net.outputs().len(),
        "网络克隆完成"
    );
    Ok(net)
}

/// 源数据 -> 克隆数据，按源身份去重
#[derive(Default)]
struct DataCloner {
    map: HashMap<DataId, DataId>,
    /// 按首次克隆的顺序
    cloned: Vec<DataId>,
}

impl DataCloner {
    fn get_or_clone(
        &mut self,
        source: &Network,
        target: &mut Network,
        data: DataId,
    ) -> Result<DataId, IrError> {
        if let Some(&cloned) = self.map.get(&data) {
            return Ok(cloned);
        }
        let cloned = target.add_data(clone_data(source.get_data(data)?))?;
        self.map.insert(data, cloned);
        self.cloned.push(cloned);
        Ok(cloned)
    }
}
