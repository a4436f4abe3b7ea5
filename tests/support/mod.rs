#![allow(dead_code)]

pub mod dataset;
pub mod tweetsense_env;
