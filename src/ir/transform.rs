/*
 * @Date         : 2026-03-02
 * @Description  : 按层类型分派的访问器，以及向层注入任意载荷
 *
 * - `transform_layer`: 按“最派生优先”的顺序，对层结构上所属的每个类别调用访问器，
 *   直到某次调用返回 true（已处理，不再检查更基础的类别）
 * - `Network::inject_data`: 生成带载荷的层副本，载荷存放在网络的 (层, 载荷类型) 旁表中
 * - `Network::get_injected_data`: 按载荷类型取回
 */

use super::data::DataId;
use super::layer::*;
use super::network::Network;
use std::any::{Any, TypeId};
use tracing::debug;

/// 层访问器：每个类别一个方法，返回 true 表示“已处理，停止”。
/// 未覆盖的方法默认返回 false，于是继续尝试更基础的类别
#[allow(unused_variables)]
pub trait LayerVisitor {
    fn visit_batch_normalization(&mut self, layer: &Layer, params: &BatchNormalizationParams) -> bool {
        false
    }
    fn visit_power(&mut self, layer: &Layer, params: &PowerParams) -> bool {
        false
    }
    fn visit_scale_shift(&mut self, layer: &Layer, params: &ScaleShiftParams) -> bool {
        false
    }
    fn visit_tile(&mut self, layer: &Layer, params: &TileParams) -> bool {
        false
    }
    fn visit_reshape(&mut self, layer: &Layer, params: &ReshapeParams) -> bool {
        false
    }
    fn visit_crop(&mut self, layer: &Layer, params: &CropParams) -> bool {
        false
    }
    fn visit_eltwise(&mut self, layer: &Layer, params: &EltwiseParams) -> bool {
        false
    }
    fn visit_clamp(&mut self, layer: &Layer, params: &ClampParams) -> bool {
        false
    }
    fn visit_relu(&mut self, layer: &Layer, params: &ReluParams) -> bool {
        false
    }
    fn visit_tanh(&mut self, layer: &Layer, params: &TanhParams) -> bool {
        false
    }
    fn visit_sigmoid(&mut self, layer: &Layer, params: &SigmoidParams) -> bool {
        false
    }
    fn visit_softmax(&mut self, layer: &Layer, params: &SoftmaxParams) -> bool {
        false
    }
    fn visit_norm(&mut self, layer: &Layer, params: &NormParams) -> bool {
        false
    }
    fn visit_split(&mut self, layer: &Layer, params: &SplitParams) -> bool {
        false
    }
    fn visit_concat(&mut self, layer: &Layer, params: &ConcatParams) -> bool {
        false
    }
    fn visit_fully_connected(&mut self, layer: &Layer, params: &FullyConnectedParams) -> bool {
        false
    }
    fn visit_pooling(&mut self, layer: &Layer, params: &PoolingParams) -> bool {
        false
    }
    fn visit_deconvolution(&mut self, layer: &Layer, params: &DeconvolutionParams) -> bool {
        false
    }
    fn visit_convolution(&mut self, layer: &Layer, params: &ConvolutionParams) -> bool {
        false
    }
    fn visit_weightable(&mut self, layer: &Layer, weights: &Weightable) -> bool {
        false
    }
    fn visit_generic(&mut self, layer: &Layer) -> bool {
        false
    }
}

/// 对 `layer` 按最派生优先的顺序分派；返回是否有访问器声明“已处理”
pub fn transform_layer<V: LayerVisitor + ?Sized>(layer: &Layer, visitor: &mut V) -> bool {
    LayerClass::MOST_DERIVED_FIRST
        .iter()
        .filter(|class| layer.is_a(**class))
        .any(|&class| visit_as(layer, class, visitor))
}

/// 以 `class` 的视角访问层；层结构上不属于该类别时返回 false
fn visit_as<V: LayerVisitor + ?Sized>(layer: &Layer, class: LayerClass, visitor: &mut V) -> bool {
    let params = &layer.params;
    match class {
        LayerClass::BatchNormalization => params
            .as_batch_normalization()
            .is_some_and(|p| visitor.visit_batch_normalization(layer, p)),
        LayerClass::Power => params.as_power().is_some_and(|p| visitor.visit_power(layer, p)),
        LayerClass::ScaleShift => params
            .as_scale_shift()
            .is_some_and(|p| visitor.visit_scale_shift(layer, p)),
        LayerClass::Tile => params.as_tile().is_some_and(|p| visitor.visit_tile(layer, p)),
        LayerClass::Reshape => params
            .as_reshape()
            .is_some_and(|p| visitor.visit_reshape(layer, p)),
        LayerClass::Crop => params.as_crop().is_some_and(|p| visitor.visit_crop(layer, p)),
        LayerClass::Eltwise => params
            .as_eltwise()
            .is_some_and(|p| visitor.visit_eltwise(layer, p)),
        LayerClass::Clamp => params.as_clamp().is_some_and(|p| visitor.visit_clamp(layer, p)),
        LayerClass::Relu => params.as_relu().is_some_and(|p| visitor.visit_relu(layer, p)),
        LayerClass::Tanh => params.as_tanh().is_some_and(|p| visitor.visit_tanh(layer, p)),
        LayerClass::Sigmoid => params
            .as_sigmoid()
            .is_some_and(|p| visitor.visit_sigmoid(layer, p)),
        LayerClass::Softmax => params
            .as_softmax()
            .is_some_and(|p| visitor.visit_softmax(layer, p)),
        LayerClass::Norm => params.as_norm().is_some_and(|p| visitor.visit_norm(layer, p)),
        LayerClass::Split => params.as_split().is_some_and(|p| visitor.visit_split(layer, p)),
        LayerClass::Concat => params
            .as_concat()
            .is_some_and(|p| visitor.visit_concat(layer, p)),
        LayerClass::FullyConnected => params
            .as_fully_connected()
            .is_some_and(|p| visitor.visit_fully_connected(layer, p)),
        LayerClass::Pooling => params
            .as_pooling()
            .is_some_and(|p| visitor.visit_pooling(layer, p)),
        LayerClass::Deconvolution => params
            .as_deconvolution()
            .is_some_and(|p| visitor.visit_deconvolution(layer, p)),
        LayerClass::Convolution => params
            .as_convolution()
            .is_some_and(|p| visitor.visit_convolution(layer, p)),
        LayerClass::Weightable => params
            .weightable()
            .is_some_and(|w| visitor.visit_weightable(layer, w)),
        LayerClass::Generic => visitor.visit_generic(layer),
    }
}

impl Network {
    /// 生成 `source` 的带载荷副本：
    /// - 具体类型与参数同源层一致，输入列表仍引用源层的输入数据
    /// - 输出数据深拷贝为新对象（生产者为副本），保留源数据的消费映射，
    ///   因而修改副本的输出不会影响源层
    /// - 副本是游离层，不进入名称映射
    ///
    /// `source` 不存在时返回 None
    pub fn inject_data<T: Any>(&mut self, source: LayerId, value: T) -> Option<LayerId> {
        let mut layer = self.get_layer(source).ok()?.clone();
        let outputs = std::mem::take(&mut layer.out_data)
            .into_iter()
            .map(|data| self.get_data(data).cloned())
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        let injected = self.push_layer(layer);
        let copies: Vec<DataId> = outputs
            .into_iter()
            .map(|mut copy| {
                copy.creator = Some(injected);
                self.push_data(copy)
            })
            .collect();
        self.get_layer_mut(injected).ok()?.out_data = copies;

        self.injected
            .insert((injected, TypeId::of::<T>()), Box::new(value));
        debug!(
            source = %self.layer_label(source),
            payload = std::any::type_name::<T>(),
            "注入层数据"
        );
        Some(injected)
    }

    /// 若 `layer` 由 `inject_data` 以类型 `T` 的载荷产生，返回该载荷
    pub fn get_injected_data<T: Any>(&self, layer: LayerId) -> Option<&T> {
        self.injected
            .get(&(layer, TypeId::of::<T>()))
            .and_then(|payload| payload.downcast_ref::<T>())
    }

    pub fn get_injected_data_mut<T: Any>(&mut self, layer: LayerId) -> Option<&mut T> {
        self.injected
            .get_mut(&(layer, TypeId::of::<T>()))
            .and_then(|payload| payload.downcast_mut::<T>())
    }
}
