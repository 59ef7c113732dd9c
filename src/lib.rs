#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use jm_model as model;
pub use jm_utils as utils;
pub use jm_value as value;
