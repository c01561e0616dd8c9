pub mod schemas;
pub mod texta_utils;
