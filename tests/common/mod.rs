#![allow(dead_code)]

pub mod fixtures;
pub mod mock_aws;
pub mod mock_ocm;
