/*
 * @Date         : 2026-03-02
 * @Description  : 层类型的封闭集合及各类型特有参数
 *
 * 层类型在编译期固定，只能通过新增变体扩展。
 * “继承”关系以结构体嵌套表达：
 * - Deconvolution 内嵌 Convolution 参数
 * - Convolution/FullyConnected/ScaleShift/BatchNormalization 内嵌 Weightable
 * 对应的 is-a 关系见 [`LayerClass::parent`]。
 */

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// 层类别标签（不带参数），用于按“最派生优先”的顺序做结构匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerClass {
    Generic,
    Weightable,
    Convolution,
    Deconvolution,
    Pooling,
    FullyConnected,
    Concat,
    Split,
    Norm,
    Softmax,
    Relu,
    Clamp,
    Tanh,
    Sigmoid,
    Eltwise,
    Crop,
    Reshape,
    Tile,
    ScaleShift,
    Power,
    BatchNormalization,
}

impl LayerClass {
    /// 最派生的类别必须排在前面：派生类别先于其基类被检查
    pub const MOST_DERIVED_FIRST: [Self; 21] = [
        Self::BatchNormalization,
        Self::Power,
        Self::ScaleShift,
        Self::Tile,
        Self::Reshape,
        Self::Crop,
        Self::Eltwise,
        Self::Clamp,
        Self::Relu,
        Self::Tanh,
        Self::Sigmoid,
        Self::Softmax,
        Self::Norm,
        Self::Split,
        Self::Concat,
        Self::FullyConnected,
        Self::Pooling,
        Self::Deconvolution,
        Self::Convolution,
        Self::Weightable,
        Self::Generic,
    ];

    /// 直接基类；`Generic` 是根
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Generic => None,
            Self::Deconvolution => Some(Self::Convolution),
            Self::Convolution
            | Self::FullyConnected
            | Self::ScaleShift
            | Self::BatchNormalization => Some(Self::Weightable),
            _ => Some(Self::Generic),
        }
    }

    /// `derived` 是否“是一个” `self`（包括相等）
    pub fn is_base_of(self, derived: Self) -> bool {
        let mut current = Some(derived);
        while let Some(class) = current {
            if class == self {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// 该类别层的默认类型名
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Generic => "Generic",
            Self::Weightable => "Weightable",
            Self::Convolution => "Convolution",
            Self::Deconvolution => "Deconvolution",
            Self::Pooling => "Pooling",
            Self::FullyConnected => "FullyConnected",
            Self::Concat => "Concat",
            Self::Split => "Split",
            Self::Norm => "Norm",
            Self::Softmax => "SoftMax",
            Self::Relu => "ReLU",
            Self::Clamp => "Clamp",
            Self::Tanh => "TanH",
            Self::Sigmoid => "Sigmoid",
            Self::Eltwise => "Eltwise",
            Self::Crop => "Crop",
            Self::Reshape => "Reshape",
            Self::Tile => "Tile",
            Self::ScaleShift => "ScaleShift",
            Self::Power => "Power",
            Self::BatchNormalization => "BatchNormalization",
        }
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓各类型参数↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/

/// 无特有参数的基础层（包括输入占位层）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generic;

/// 带权重的层：只记录权重/偏置的形状，不持有缓冲区
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Weightable {
    pub weights_dims: Vec<usize>,
    pub biases_dims: Vec<usize>,
}

/// 二维尺寸统一按 (x, y) 存放
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionParams {
    pub weightable: Weightable,
    pub kernel: (usize, usize),
    pub stride: (usize, usize),
    pub padding: (usize, usize),
    pub dilation: (usize, usize),
    pub out_depth: usize,
    pub group: usize,
}

impl Default for ConvolutionParams {
    fn default() -> Self {
        Self {
            weightable: Weightable::default(),
            kernel: (1, 1),
            stride: (1, 1),
            padding: (0, 0),
            dilation: (1, 1),
            out_depth: 0,
            group: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeconvolutionParams {
    pub conv: ConvolutionParams,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolType {
    #[default]
    Max,
    Avg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingParams {
    pub kernel: (usize, usize),
    pub stride: (usize, usize),
    pub padding: (usize, usize),
    pub pool_type: PoolType,
    pub exclude_pad: bool,
}

impl Default for PoolingParams {
    fn default() -> Self {
        Self {
            kernel: (1, 1),
            stride: (1, 1),
            padding: (0, 0),
            pool_type: PoolType::Max,
            exclude_pad: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FullyConnectedParams {
    pub weightable: Weightable,
    pub out_num: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcatParams {
    pub axis: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParams {
    pub axis: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormParams {
    pub size: usize,
    pub k: usize,
    pub alpha: f32,
    pub beta: f32,
    pub across_maps: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftmaxParams {
    pub axis: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReluParams {
    pub negative_slope: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClampParams {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TanhParams;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EltwiseOp {
    #[default]
    Sum,
    Prod,
    Max,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EltwiseParams {
    pub op: EltwiseOp,
    pub coeff: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropParams {
    pub axis: Vec<i32>,
    pub dim: Vec<i32>,
    pub offset: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeParams {
    pub axis: i32,
    pub num_axes: i32,
    pub shape: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileParams {
    pub axis: i32,
    pub tiles: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleShiftParams {
    pub weightable: Weightable,
    pub broadcast: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerParams {
    pub power: f32,
    pub scale: f32,
    pub offset: f32,
}

impl Default for PowerParams {
    fn default() -> Self {
        Self {
            power: 1.0,
            scale: 1.0,
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchNormalizationParams {
    pub weightable: Weightable,
    pub epsilon: f32,
}

/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑各类型参数↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

#[enum_dispatch]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerParams {
    Generic(Generic),
    Weightable(Weightable),
    Convolution(ConvolutionParams),
    Deconvolution(DeconvolutionParams),
    Pooling(PoolingParams),
    FullyConnected(FullyConnectedParams),
    Concat(ConcatParams),
    Split(SplitParams),
    Norm(NormParams),
    Softmax(SoftmaxParams),
    Relu(ReluParams),
    Clamp(ClampParams),
    Tanh(TanhParams),
    Sigmoid(SigmoidParams),
    Eltwise(EltwiseParams),
    Crop(CropParams),
    Reshape(ReshapeParams),
    Tile(TileParams),
    ScaleShift(ScaleShiftParams),
    Power(PowerParams),
    BatchNormalization(BatchNormalizationParams),
}

impl Default for LayerParams {
    fn default() -> Self {
        Self::Generic(Generic)
    }
}

#[enum_dispatch(LayerParams)]
pub trait TraitLayerParams {
    /// 参数所对应的（最派生的）层类别
    fn class(&self) -> LayerClass;

    /// 带权重类别的权重描述；其它类别返回 None
    fn weightable(&self) -> Option<&Weightable> {
        None
    }

    fn weightable_mut(&mut self) -> Option<&mut Weightable> {
        None
    }

    /// 未显式给出类型名时使用的类型名
    fn default_type(&self) -> &'static str {
        self.class().type_name()
    }
}

// 为简单类别批量实现 `TraitLayerParams`
macro_rules! impl_simple_params {
    ($($ty:ty => $class:ident),* $(,)?) => {
        $(
            impl TraitLayerParams for $ty {
                fn class(&self) -> LayerClass {
                    LayerClass::$class
                }
            }
        )*
    };
}

impl_simple_params! {
    Generic => Generic,
    PoolingParams => Pooling,
    ConcatParams => Concat,
    SplitParams => Split,
    NormParams => Norm,
    SoftmaxParams => Softmax,
    ReluParams => Relu,
    ClampParams => Clamp,
    TanhParams => Tanh,
    SigmoidParams => Sigmoid,
    EltwiseParams => Eltwise,
    CropParams => Crop,
    ReshapeParams => Reshape,
    TileParams => Tile,
    PowerParams => Power,
}

// 带权重的类别：权重描述位于 `weightable` 字段（Deconvolution 经由内嵌的卷积参数）
macro_rules! impl_weighted_params {
    ($($ty:ty => $class:ident),* $(,)?) => {
        $(
            impl TraitLayerParams for $ty {
                fn class(&self) -> LayerClass {
                    LayerClass::$class
                }

                fn weightable(&self) -> Option<&Weightable> {
                    Some(&self.weightable)
                }

                fn weightable_mut(&mut self) -> Option<&mut Weightable> {
                    Some(&mut self.weightable)
                }
            }
        )*
    };
}

impl_weighted_params! {
    ConvolutionParams => Convolution,
    FullyConnectedParams => FullyConnected,
    ScaleShiftParams => ScaleShift,
    BatchNormalizationParams => BatchNormalization,
}

impl TraitLayerParams for Weightable {
    fn class(&self) -> LayerClass {
        LayerClass::Weightable
    }

    fn weightable(&self) -> Option<&Weightable> {
        Some(self)
    }

    fn weightable_mut(&mut self) -> Option<&mut Weightable> {
        Some(self)
    }
}

impl TraitLayerParams for DeconvolutionParams {
    fn class(&self) -> LayerClass {
        LayerClass::Deconvolution
    }

    fn weightable(&self) -> Option<&Weightable> {
        Some(&self.conv.weightable)
    }

    fn weightable_mut(&mut self) -> Option<&mut Weightable> {
        Some(&mut self.conv.weightable)
    }
}

// 按变体精确取参数：`as_pooling()`、`as_batch_normalization_mut()` 等
macro_rules! params_accessors {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        paste::paste! {
            impl LayerParams {
                $(
                    pub fn [<as_ $variant:snake>](&self) -> Option<&$ty> {
                        match self {
                            Self::$variant(params) => Some(params),
                            _ => None,
                        }
                    }

                    pub fn [<as_ $variant:snake _mut>](&mut self) -> Option<&mut $ty> {
                        match self {
                            Self::$variant(params) => Some(params),
                            _ => None,
                        }
                    }
                )*
            }
        }
    };
}

params_accessors! {
    Deconvolution => DeconvolutionParams,
    Pooling => PoolingParams,
    FullyConnected => FullyConnectedParams,
    Concat => ConcatParams,
    Split => SplitParams,
    Norm => NormParams,
    Softmax => SoftmaxParams,
    Relu => ReluParams,
    Clamp => ClampParams,
    Tanh => TanhParams,
    Sigmoid => SigmoidParams,
    Eltwise => EltwiseParams,
    Crop => CropParams,
    Reshape => ReshapeParams,
    Tile => TileParams,
    ScaleShift => ScaleShiftParams,
    Power => PowerParams,
    BatchNormalization => BatchNormalizationParams,
}

impl LayerParams {
    /// 卷积参数；反卷积“是一个”卷积，所以也会返回其内嵌的卷积参数
    pub fn as_convolution(&self) -> Option<&ConvolutionParams> {
        match self {
            Self::Convolution(params) => Some(params),
            Self::Deconvolution(params) => Some(&params.conv),
            _ => None,
        }
    }

    pub fn as_convolution_mut(&mut self) -> Option<&mut ConvolutionParams> {
        match self {
            Self::Convolution(params) => Some(params),
            Self::Deconvolution(params) => Some(&mut params.conv),
            _ => None,
        }
    }
}
