//! # Infer IR
//!
//! `infer_ir`是神经网络推理引擎的图核心：
//! - `ade`: 与领域无关的底层图原语（节点、边、句柄）
//! - `ir`: 层/数据二部图形式的中间表示，以及遍历、子图划分、深拷贝与按层类别分派等操作
//!
//! 模型加载、形状推断与具体的优化遍不在本库范围内。
//!

pub mod ade;
pub mod ir;
pub mod utils;
