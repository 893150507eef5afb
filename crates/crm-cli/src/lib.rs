//! Library components shared by the `crm-import` binary.

pub mod logging;
